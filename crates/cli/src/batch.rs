//! JSON batch file ingestion.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use logiflow_core::{DomainResult, ProductId};
use logiflow_events::{DeliveryUpdate, ReturnEvent};
use logiflow_fulfillment::{BatchInput, index_updates};
use logiflow_inventory::InventoryStore;
use logiflow_sales::Order;

/// Opening stock row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryRow {
    pub product: ProductId,
    pub quantity: u64,
}

/// On-disk shape of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchFile {
    pub inventory: Vec<InventoryRow>,
    pub orders: Vec<Order>,
    #[serde(default)]
    pub delivery_updates: Vec<DeliveryUpdate>,
    #[serde(default)]
    pub returns: Vec<ReturnEvent>,
}

impl BatchFile {
    pub fn into_input(self) -> DomainResult<BatchInput> {
        let inventory = InventoryStore::with_levels(
            self.inventory
                .into_iter()
                .map(|row| (row.product, row.quantity)),
        )?;

        Ok(BatchInput {
            inventory,
            orders: self.orders,
            delivery_updates: index_updates(self.delivery_updates),
            returns: self.returns,
        })
    }
}

pub fn parse(json: &str) -> anyhow::Result<BatchFile> {
    serde_json::from_str(json).context("malformed batch file")
}

pub fn load(path: &Path) -> anyhow::Result<BatchFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file {}", path.display()))?;
    let batch =
        parse(&raw).with_context(|| format!("failed to parse batch file {}", path.display()))?;

    tracing::debug!(
        products = batch.inventory.len(),
        orders = batch.orders.len(),
        delivery_updates = batch.delivery_updates.len(),
        returns = batch.returns.len(),
        "batch file loaded"
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logiflow_core::OrderId;
    use logiflow_events::DeliveryStatus;

    const MINIMAL: &str = r#"{
        "inventory": [{"product": "Laptop", "quantity": 10}],
        "orders": [{"order_id": 1, "product": "Laptop", "qty": 2,
                    "customer": "Asha", "order_date": "2025-12-01"}]
    }"#;

    #[test]
    fn optional_sections_default_to_empty() {
        let batch = parse(MINIMAL).unwrap();
        assert!(batch.delivery_updates.is_empty());
        assert!(batch.returns.is_empty());

        let input = batch.into_input().unwrap();
        assert_eq!(input.inventory.get(&ProductId::new("Laptop").unwrap()), 10);
        assert_eq!(input.orders.len(), 1);
    }

    #[test]
    fn later_delivery_update_replaces_earlier() {
        let batch = parse(
            r#"{
            "inventory": [],
            "orders": [],
            "delivery_updates": [
                {"order_id": 4, "delivery_status": "In Transit", "on_time": false},
                {"order_id": 4, "delivery_status": "Delivered", "on_time": true}
            ]
        }"#,
        )
        .unwrap();

        let input = batch.into_input().unwrap();
        let update = &input.delivery_updates[&OrderId::new(4)];
        assert_eq!(update.delivery_status, DeliveryStatus::Delivered);
        assert!(update.on_time);
    }

    #[test]
    fn opening_stock_overflow_is_rejected() {
        let batch = parse(
            r#"{
            "inventory": [
                {"product": "Laptop", "quantity": 18446744073709551615},
                {"product": "Laptop", "quantity": 1}
            ],
            "orders": []
        }"#,
        )
        .unwrap();
        assert!(batch.into_input().is_err());
    }

    #[test]
    fn unknown_top_level_field_is_rejected() {
        let err = parse(r#"{"inventory": [], "orders": [], "shipments": []}"#).unwrap_err();
        assert!(err.to_string().contains("malformed batch file"));
    }

    #[test]
    fn blank_product_is_rejected() {
        assert!(parse(r#"{"inventory": [{"product": "", "quantity": 1}], "orders": []}"#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load(Path::new("/nonexistent/batch.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/batch.json"));
    }
}
