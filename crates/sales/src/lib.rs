//! Sales orders: the demand side of a fulfillment batch.
//!
//! Orders are immutable input records. Their position in the batch decides
//! who wins scarce stock, so nothing here reorders them.

pub mod order;

pub use order::{Order, validate_batch};
