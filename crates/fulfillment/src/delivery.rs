//! Merge carrier delivery updates onto shipments. No stock effect.

use std::collections::HashMap;

use logiflow_core::OrderId;
use logiflow_events::{DeliveryStatus, DeliveryUpdate, Event};

use crate::shipment::ShipmentBook;

/// How many shipments received an update versus fell back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryMergeStats {
    pub matched: usize,
    pub defaulted: usize,
}

/// Key updates by order. A later update for the same order replaces an earlier one.
pub fn index_updates<I>(updates: I) -> HashMap<OrderId, DeliveryUpdate>
where
    I: IntoIterator<Item = DeliveryUpdate>,
{
    let mut index = HashMap::new();
    for update in updates {
        if let Some(previous) = index.insert(update.order_id(), update) {
            tracing::debug!(
                order_id = %previous.order_id,
                "delivery update superseded by a later one"
            );
        }
    }
    index
}

/// Copy status and punctuality from `updates` onto each shipment.
///
/// Shipments without an update are reset to `Unknown` / not on time, so
/// running the merge twice with the same updates gives the same result.
pub fn merge_delivery_updates(
    book: &mut ShipmentBook,
    updates: &HashMap<OrderId, DeliveryUpdate>,
) -> DeliveryMergeStats {
    let mut stats = DeliveryMergeStats::default();

    for shipment in book.iter_mut() {
        match updates.get(&shipment.order_id) {
            Some(update) => {
                shipment.delivery_status = update.delivery_status;
                shipment.on_time = update.on_time;
                stats.matched += 1;
            }
            None => {
                shipment.delivery_status = DeliveryStatus::Unknown;
                shipment.on_time = false;
                stats.defaulted += 1;
            }
        }
    }

    for update in updates.values() {
        if book.get(&update.order_id()).is_none() {
            tracing::debug!(
                order_id = %update.order_id(),
                event_type = update.event_type(),
                "delivery update for unknown order ignored"
            );
        }
    }

    tracing::info!(
        matched = stats.matched,
        defaulted = stats.defaulted,
        "delivery updates merged"
    );
    stats
}
