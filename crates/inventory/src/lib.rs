//! Inventory domain module.
//!
//! A single shared stock pool, implemented purely as deterministic domain
//! logic (no IO, no storage).

pub mod store;

pub use store::{InventoryStore, StockLevel};
