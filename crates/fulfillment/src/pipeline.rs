//! Batch orchestration.
//!
//! Stage order is fixed: every order is allocated before any delivery update
//! is merged, and every update is merged before any return is applied. Good
//! returns therefore never feed orders of the same batch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use logiflow_core::{BatchId, DomainResult, OrderId, ProductId};
use logiflow_events::{DeliveryUpdate, ReturnEvent};
use logiflow_inventory::InventoryStore;
use logiflow_sales::{Order, validate_batch};

use crate::allocation::allocate;
use crate::delivery::{DeliveryMergeStats, merge_delivery_updates};
use crate::returns::{OverReturnPolicy, ReturnsProcessor, ReturnsSummary};
use crate::shipment::ShipmentBook;

/// Knobs for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub over_return: OverReturnPolicy,
}

/// Everything one batch consumes.
#[derive(Debug, Clone, Default)]
pub struct BatchInput {
    pub inventory: InventoryStore,
    /// In arrival order.
    pub orders: Vec<Order>,
    pub delivery_updates: HashMap<OrderId, DeliveryUpdate>,
    pub returns: Vec<ReturnEvent>,
}

/// Final state of a completed batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub batch_id: BatchId,
    pub opening_inventory: InventoryStore,
    pub inventory: InventoryStore,
    pub shipments: ShipmentBook,
    pub delivery: DeliveryMergeStats,
    pub returns: ReturnsSummary,
}

impl BatchOutcome {
    /// `opening + restocked - shipped` for `product`.
    ///
    /// Always equals the closing level; exposed so callers can audit a run.
    /// Computed in `u128` so levels near `u64::MAX` cannot overflow.
    pub fn expected_stock(&self, product: &ProductId) -> u128 {
        (u128::from(self.opening_inventory.get(product))
            + u128::from(self.returns.restocked(product)))
        .saturating_sub(self.shipments.shipped_units(product))
    }

    /// True when every product's closing level balances.
    pub fn is_balanced(&self) -> bool {
        self.opening_inventory
            .iter()
            .map(|(product, _)| product)
            .chain(self.inventory.iter().map(|(product, _)| product))
            .all(|product| u128::from(self.inventory.get(product)) == self.expected_stock(product))
    }
}

/// Runs allocation, delivery tracking and returns over one batch.
#[derive(Debug, Clone)]
pub struct Pipeline {
    batch_id: BatchId,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_batch_id(BatchId::new(), config)
    }

    pub fn with_batch_id(batch_id: BatchId, config: PipelineConfig) -> Self {
        Self { batch_id, config }
    }

    pub fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    /// Run the whole batch.
    ///
    /// Input is validated before any stock moves. On error nothing is
    /// returned, so a failed run leaves no partial state behind.
    pub fn run(&self, input: BatchInput) -> DomainResult<BatchOutcome> {
        let span = tracing::info_span!("batch", batch_id = %self.batch_id);
        let _guard = span.enter();

        let BatchInput {
            inventory,
            orders,
            delivery_updates,
            returns,
        } = input;

        validate_batch(&orders)?;
        for event in &returns {
            event.validate()?;
        }

        tracing::info!(
            products = inventory.len(),
            orders = orders.len(),
            delivery_updates = delivery_updates.len(),
            returns = returns.len(),
            "batch started"
        );

        let opening_inventory = inventory.clone();
        let mut store = inventory;

        let mut shipments = allocate(&mut store, &orders)?;
        let delivery = merge_delivery_updates(&mut shipments, &delivery_updates);
        let returns = ReturnsProcessor::new(self.config.over_return).process(
            &mut shipments,
            &mut store,
            &returns,
        )?;

        tracing::info!(
            stock_units = store.total_units(),
            returned_units = shipments.returned_units(),
            "batch complete"
        );

        Ok(BatchOutcome {
            batch_id: self.batch_id,
            opening_inventory,
            inventory: store,
            shipments,
            delivery,
            returns,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
