//! Fulfillment pipeline: allocation, delivery tracking and returns.
//!
//! Every stage works on the same [`InventoryStore`](logiflow_inventory::InventoryStore)
//! and the same [`ShipmentBook`]. Stages must run in a fixed order
//! (allocate, then merge deliveries, then apply returns); [`Pipeline`] is the
//! only place that sequences them.

pub mod allocation;
pub mod delivery;
pub mod pipeline;
pub mod returns;
pub mod shipment;

pub use allocation::{allocate, allocate_order};
pub use delivery::{DeliveryMergeStats, index_updates, merge_delivery_updates};
pub use pipeline::{BatchInput, BatchOutcome, Pipeline, PipelineConfig};
pub use returns::{OverReturnPolicy, ReturnDisposition, ReturnsProcessor, ReturnsSummary};
pub use shipment::{AllocationStatus, Shipment, ShipmentBook};
