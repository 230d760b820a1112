//! # Core Module
//!
//! The stateless building blocks of structure scoring.
//!
//! - **Data Models** ([`models`]) - Ordered point sets and atom selectors
//! - **File I/O** ([`io`]) - Coordinate extraction from fixed-width atom records and the
//!   tabular score sink
//! - **Superposition** ([`alignment`]) - Optimal rotation (Kabsch) and residual computation
//! - **Scoring** ([`metrics`]) - Residual normalization into the reported metric variants
//!
//! Nothing in this module keeps state between calls.

pub mod alignment;
pub mod io;
pub mod metrics;
pub mod models;
