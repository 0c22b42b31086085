//! Costing
//!
//! Derived-cost recalculation for the ingredient → recipe → product chain:
//! - [`calculator`] - pure cost derivation and aggregation
//! - [`sync`] - the fetch → compute → persist pipeline over the store

pub mod calculator;
pub mod sync;

pub use sync::{CostSyncService, SyncReport};
