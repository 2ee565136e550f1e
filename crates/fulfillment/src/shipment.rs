use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use logiflow_core::{CustomerId, DomainError, DomainResult, Entity, OrderId, ProductId};
use logiflow_events::DeliveryStatus;
use logiflow_sales::Order;

/// Outcome of allocating stock to one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllocationStatus {
    Allocated,
    #[serde(rename = "Partially Allocated")]
    PartiallyAllocated,
    Backorder,
}

impl AllocationStatus {
    pub fn label(self) -> &'static str {
        match self {
            AllocationStatus::Allocated => "Allocated",
            AllocationStatus::PartiallyAllocated => "Partially Allocated",
            AllocationStatus::Backorder => "Backorder",
        }
    }
}

impl core::fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fulfillment record for one order.
///
/// Created by allocation; delivery fields and `returned_qty` are filled in by
/// the later stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub order_id: OrderId,
    pub product: ProductId,
    pub customer: CustomerId,
    pub order_date: NaiveDate,
    pub requested_qty: u64,
    pub shipped_qty: u64,
    pub allocation_status: AllocationStatus,
    pub note: String,
    pub delivery_status: DeliveryStatus,
    pub on_time: bool,
    pub returned_qty: u64,
}

impl Shipment {
    /// Shipment for `order` with no delivery or return information yet.
    pub fn for_order(
        order: &Order,
        shipped_qty: u64,
        allocation_status: AllocationStatus,
        note: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order.order_id,
            product: order.product.clone(),
            customer: order.customer.clone(),
            order_date: order.order_date,
            requested_qty: order.requested_qty,
            shipped_qty,
            allocation_status,
            note: note.into(),
            delivery_status: DeliveryStatus::Unknown,
            on_time: false,
            returned_qty: 0,
        }
    }

    pub fn has_stock(&self) -> bool {
        self.shipped_qty > 0
    }

    pub fn is_backorder(&self) -> bool {
        self.allocation_status == AllocationStatus::Backorder
    }

    pub fn delivered_on_time(&self) -> bool {
        self.delivery_status == DeliveryStatus::Delivered && self.on_time
    }

    pub fn delivered_late(&self) -> bool {
        self.delivery_status == DeliveryStatus::Delivered && !self.on_time
    }

    /// Units that could still come back before exceeding what shipped.
    pub fn returnable_qty(&self) -> u64 {
        self.shipped_qty.saturating_sub(self.returned_qty)
    }
}

impl Entity for Shipment {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.order_id
    }
}

/// Shipments in order-arrival sequence, indexed by `OrderId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentBook {
    shipments: Vec<Shipment>,
    index: HashMap<OrderId, usize>,
}

impl ShipmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shipments: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Append a shipment. Each order gets exactly one.
    pub fn push(&mut self, shipment: Shipment) -> DomainResult<()> {
        let id = *shipment.id();
        if self.index.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "shipment for order {id} already exists"
            )));
        }
        self.index.insert(id, self.shipments.len());
        self.shipments.push(shipment);
        Ok(())
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Shipment> {
        let pos = *self.index.get(order_id)?;
        self.shipments.get(pos)
    }

    pub fn get_mut(&mut self, order_id: &OrderId) -> Option<&mut Shipment> {
        let pos = *self.index.get(order_id)?;
        self.shipments.get_mut(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shipment> {
        self.shipments.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shipment> {
        self.shipments.iter_mut()
    }

    pub fn as_slice(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }

    // Aggregates backing the MIS report.

    pub fn total_orders(&self) -> usize {
        self.shipments.len()
    }

    /// Orders that received any stock (full or partial).
    pub fn allocated_orders(&self) -> usize {
        self.iter().filter(|s| s.has_stock()).count()
    }

    pub fn backorders(&self) -> usize {
        self.iter().filter(|s| s.is_backorder()).count()
    }

    pub fn on_time_deliveries(&self) -> usize {
        self.iter().filter(|s| s.delivered_on_time()).count()
    }

    pub fn late_deliveries(&self) -> usize {
        self.iter().filter(|s| s.delivered_late()).count()
    }

    pub fn returned_units(&self) -> u128 {
        self.iter().map(|s| u128::from(s.returned_qty)).sum()
    }

    /// Units shipped for one product across all orders.
    pub fn shipped_units(&self, product: &ProductId) -> u128 {
        self.iter()
            .filter(|s| &s.product == product)
            .map(|s| u128::from(s.shipped_qty))
            .sum()
    }
}

impl<'a> IntoIterator for &'a ShipmentBook {
    type Item = &'a Shipment;
    type IntoIter = core::slice::Iter<'a, Shipment>;

    fn into_iter(self) -> Self::IntoIter {
        self.shipments.iter()
    }
}
