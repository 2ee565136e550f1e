use core::fmt;

use serde::Serialize;

use logiflow_core::{BatchId, OrderId, ProductId};
use logiflow_events::DeliveryStatus;
use logiflow_fulfillment::{AllocationStatus, BatchOutcome, Shipment, ShipmentBook};
use logiflow_inventory::StockLevel;

/// Headline counters of the daily MIS report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MisSummary {
    pub total_orders: usize,
    /// Orders that received any stock (full or partial).
    pub allocated_orders: usize,
    pub backorders: usize,
    pub on_time_deliveries: usize,
    pub late_deliveries: usize,
    /// Units returned, whatever their condition.
    pub returned_units: u128,
    /// Units put back into stock (good condition only).
    pub restocked_units: u128,
}

impl MisSummary {
    /// Counters derived from shipments alone. `restocked_units` stays 0.
    pub fn from_shipments(shipments: &ShipmentBook) -> Self {
        Self {
            total_orders: shipments.total_orders(),
            allocated_orders: shipments.allocated_orders(),
            backorders: shipments.backorders(),
            on_time_deliveries: shipments.on_time_deliveries(),
            late_deliveries: shipments.late_deliveries(),
            returned_units: shipments.returned_units(),
            restocked_units: 0,
        }
    }

    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self {
            restocked_units: outcome.returns.restocked_units,
            ..Self::from_shipments(&outcome.shipments)
        }
    }
}

/// One row of the shipment-level view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipmentLine {
    pub order_id: OrderId,
    pub product: ProductId,
    pub requested_qty: u64,
    pub shipped_qty: u64,
    pub allocation_status: AllocationStatus,
    pub delivery_status: DeliveryStatus,
    pub returned_qty: u64,
}

impl From<&Shipment> for ShipmentLine {
    fn from(shipment: &Shipment) -> Self {
        Self {
            order_id: shipment.order_id,
            product: shipment.product.clone(),
            requested_qty: shipment.requested_qty,
            shipped_qty: shipment.shipped_qty,
            allocation_status: shipment.allocation_status,
            delivery_status: shipment.delivery_status,
            returned_qty: shipment.returned_qty,
        }
    }
}

impl fmt::Display for ShipmentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order {} | {} | Requested: {} | Shipped: {} | Status: {} | Delivery: {} | Returned: {}",
            self.order_id,
            self.product,
            self.requested_qty,
            self.shipped_qty,
            self.allocation_status,
            self.delivery_status,
            self.returned_qty
        )
    }
}

/// Full daily report: counters, closing stock and one line per shipment.
///
/// `Display` renders the plain-text report; `Serialize` gives the same data as
/// JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisReport {
    pub batch_id: BatchId,
    pub summary: MisSummary,
    pub inventory: Vec<StockLevel>,
    pub shipments: Vec<ShipmentLine>,
}

impl MisReport {
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self {
            batch_id: outcome.batch_id,
            summary: MisSummary::from_outcome(outcome),
            inventory: outcome.inventory.snapshot(),
            shipments: outcome.shipments.iter().map(ShipmentLine::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "=== DAILY LOGISTICS MIS REPORT ===")?;
        writeln!(f, "Total orders received: {}", s.total_orders)?;
        writeln!(
            f,
            "Orders with stock allocated (full or partial): {}",
            s.allocated_orders
        )?;
        writeln!(f, "Orders on backorder (no stock): {}", s.backorders)?;
        writeln!(f, "On-time deliveries: {}", s.on_time_deliveries)?;
        writeln!(f, "Late deliveries: {}", s.late_deliveries)?;
        writeln!(
            f,
            "Total units returned (reverse logistics): {}",
            s.returned_units
        )?;

        writeln!(f)?;
        writeln!(f, "Remaining inventory levels:")?;
        for level in &self.inventory {
            writeln!(f, "  {}: {} units", level.product, level.quantity)?;
        }

        writeln!(f)?;
        writeln!(f, "Shipment-level view:")?;
        for line in &self.shipments {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use logiflow_core::CustomerId;
    use logiflow_events::{DeliveryUpdate, ReturnCondition, ReturnEvent};
    use logiflow_fulfillment::{BatchInput, Pipeline, PipelineConfig, index_updates};
    use logiflow_inventory::InventoryStore;
    use logiflow_sales::Order;

    fn product(name: &str) -> ProductId {
        ProductId::new(name).unwrap()
    }

    fn test_outcome() -> BatchOutcome {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let order = |id: u64, name: &str, qty: u64| Order {
            order_id: OrderId::new(id),
            product: product(name),
            requested_qty: qty,
            customer: CustomerId::new("Asha").unwrap(),
            order_date: date,
        };
        let input = BatchInput {
            inventory: InventoryStore::with_levels([
                (product("Laptop"), 3),
                (product("Keyboard"), 0),
            ]).unwrap(),
            orders: vec![order(1, "Laptop", 2), order(2, "Laptop", 2), order(3, "Keyboard", 1)],
            delivery_updates: index_updates([
                DeliveryUpdate {
                    order_id: OrderId::new(1),
                    delivery_status: DeliveryStatus::Delivered,
                    on_time: true,
                },
                DeliveryUpdate {
                    order_id: OrderId::new(2),
                    delivery_status: DeliveryStatus::Delivered,
                    on_time: false,
                },
            ]),
            returns: vec![ReturnEvent {
                order_id: OrderId::new(1),
                product: product("Laptop"),
                qty_returned: 1,
                reason: "Defective".to_string(),
                condition: ReturnCondition::Damaged,
            }],
        };
        Pipeline::new(PipelineConfig::default()).run(input).unwrap()
    }

    #[test]
    fn summary_counts_outcome() {
        let summary = MisSummary::from_outcome(&test_outcome());
        assert_eq!(
            summary,
            MisSummary {
                total_orders: 3,
                allocated_orders: 2,
                backorders: 1,
                on_time_deliveries: 1,
                late_deliveries: 1,
                returned_units: 1,
                restocked_units: 0,
            }
        );
    }

    #[test]
    fn text_report_renders_every_section() {
        let text = MisReport::from_outcome(&test_outcome()).to_string();

        assert!(text.starts_with("=== DAILY LOGISTICS MIS REPORT ===\n"));
        assert!(text.contains("Orders on backorder (no stock): 1\n"));
        assert!(text.contains("\nRemaining inventory levels:\n  Laptop: 0 units\n  Keyboard: 0 units\n"));
        assert!(text.contains(
            "Order 2 | Laptop | Requested: 2 | Shipped: 1 | Status: Partially Allocated | Delivery: Delivered | Returned: 0\n"
        ));
        assert!(text.contains(
            "Order 3 | Keyboard | Requested: 1 | Shipped: 0 | Status: Backorder | Delivery: Unknown | Returned: 0\n"
        ));
    }

    #[test]
    fn json_report_uses_wire_labels() {
        let json = MisReport::from_outcome(&test_outcome()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total_orders"], 3);
        assert_eq!(value["shipments"][1]["allocation_status"], "Partially Allocated");
        assert_eq!(value["shipments"][2]["delivery_status"], "Unknown");
        assert_eq!(value["inventory"][0]["product"], "Laptop");
    }
}
