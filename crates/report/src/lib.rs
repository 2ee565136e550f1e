//! MIS reporting over a finished batch.
//!
//! Pure derivation and formatting; no decisions are made here.

pub mod summary;

pub use summary::{MisReport, MisSummary, ShipmentLine};
