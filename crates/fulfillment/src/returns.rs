//! Reverse logistics: record returns against shipments and restock good items.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use logiflow_core::{DomainError, DomainResult, OrderId, ProductId};
use logiflow_events::{Event, ReturnEvent};
use logiflow_inventory::InventoryStore;

use crate::shipment::ShipmentBook;

/// What to do when returns for an order add up to more than was shipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverReturnPolicy {
    /// Record the return anyway.
    #[default]
    Accept,
    /// Fail the batch with a validation error.
    Reject,
}

impl FromStr for OverReturnPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(DomainError::validation(format!(
                "unknown over-return policy '{other}' (expected 'accept' or 'reject')"
            ))),
        }
    }
}

/// Result of applying one return event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnDisposition {
    /// Recorded and put back into stock.
    Restocked,
    /// Recorded, but kept out of the stock pool.
    Scrapped,
    /// No shipment for the order; nothing changed.
    Unmatched,
}

/// Totals for one returns run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnsSummary {
    pub restocked_units: u128,
    pub scrapped_units: u128,
    pub restocked_by_product: BTreeMap<ProductId, u64>,
    pub unmatched: Vec<OrderId>,
}

impl ReturnsSummary {
    pub fn restocked(&self, product: &ProductId) -> u64 {
        self.restocked_by_product.get(product).copied().unwrap_or(0)
    }
}

/// Applies return events to shipments and the stock pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnsProcessor {
    policy: OverReturnPolicy,
}

impl ReturnsProcessor {
    pub fn new(policy: OverReturnPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverReturnPolicy {
        self.policy
    }

    /// Apply a single return.
    ///
    /// The quantity is added to the shipment's returned total. Stock for the
    /// returned product only goes up when the goods came back in good
    /// condition.
    pub fn apply(
        &self,
        book: &mut ShipmentBook,
        store: &mut InventoryStore,
        event: &ReturnEvent,
    ) -> DomainResult<ReturnDisposition> {
        event.validate()?;

        let Some(shipment) = book.get_mut(&event.order_id()) else {
            tracing::warn!(
                order_id = %event.order_id(),
                event_type = event.event_type(),
                "return for unknown order dropped"
            );
            return Ok(ReturnDisposition::Unmatched);
        };

        if event.qty_returned > shipment.returnable_qty() {
            match self.policy {
                OverReturnPolicy::Accept => tracing::warn!(
                    order_id = %shipment.order_id,
                    shipped = shipment.shipped_qty,
                    already_returned = shipment.returned_qty,
                    qty = event.qty_returned,
                    "return exceeds shipped quantity"
                ),
                OverReturnPolicy::Reject => {
                    return Err(DomainError::validation(format!(
                        "return of {} for order {} exceeds returnable quantity {}",
                        event.qty_returned,
                        shipment.order_id,
                        shipment.returnable_qty()
                    )));
                }
            }
        }

        if event.product != shipment.product {
            tracing::warn!(
                order_id = %shipment.order_id,
                shipped_product = %shipment.product,
                returned_product = %event.product,
                "returned product differs from shipped product"
            );
        }

        let returned_qty = shipment
            .returned_qty
            .checked_add(event.qty_returned)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "returned quantity for order {} would overflow",
                    shipment.order_id
                ))
            })?;

        if event.condition.is_restockable() {
            let level = store.increment(&event.product, event.qty_returned)?;
            shipment.returned_qty = returned_qty;
            tracing::debug!(
                order_id = %event.order_id,
                product = %event.product,
                qty = event.qty_returned,
                level,
                "returned goods restocked"
            );
            Ok(ReturnDisposition::Restocked)
        } else {
            shipment.returned_qty = returned_qty;
            tracing::debug!(
                order_id = %event.order_id,
                product = %event.product,
                qty = event.qty_returned,
                condition = ?event.condition,
                reason = %event.reason,
                "returned goods held out of stock"
            );
            Ok(ReturnDisposition::Scrapped)
        }
    }

    /// Apply every return in sequence.
    pub fn process(
        &self,
        book: &mut ShipmentBook,
        store: &mut InventoryStore,
        events: &[ReturnEvent],
    ) -> DomainResult<ReturnsSummary> {
        let mut summary = ReturnsSummary::default();

        for event in events {
            match self.apply(book, store, event)? {
                ReturnDisposition::Restocked => {
                    summary.restocked_units += u128::from(event.qty_returned);
                    // Bounded by the store level, which increment keeps within u64.
                    let restocked = summary
                        .restocked_by_product
                        .entry(event.product.clone())
                        .or_insert(0);
                    *restocked = restocked.saturating_add(event.qty_returned);
                }
                ReturnDisposition::Scrapped => {
                    summary.scrapped_units += u128::from(event.qty_returned)
                }
                ReturnDisposition::Unmatched => summary.unmatched.push(event.order_id),
            }
        }

        tracing::info!(
            events = events.len(),
            restocked = summary.restocked_units,
            scrapped = summary.scrapped_units,
            unmatched = summary.unmatched.len(),
            "returns processed"
        );
        Ok(summary)
    }
}
