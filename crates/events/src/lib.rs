//! External events consumed by the fulfillment pipeline.
//!
//! Delivery updates come from carrier scans and mobile apps, returns from the
//! reverse-logistics desk. Both are facts keyed by `OrderId`; neither is
//! validated against shipments here.

pub mod delivery;
pub mod event;
pub mod returns;

pub use delivery::{DeliveryStatus, DeliveryUpdate};
pub use event::Event;
pub use returns::{ReturnCondition, ReturnEvent};
