//! # Engine Module
//!
//! Drives the evaluation of predicted structures against a native reference.
//!
//! ## Overview
//!
//! The engine owns everything between a single pure scoring call and a complete batch:
//! which atoms to select and which metric to report ([`config`]), how failures of one pair are
//! classified without aborting the others ([`error`]), how progress is surfaced to a front end
//! ([`progress`]), and the batch evaluator itself ([`batch`]).
//!
//! ## Key Capabilities
//!
//! - **Independent pairs** - every prediction is extracted, aligned and scored on its own, so
//!   pairs run in parallel when the `parallel` feature is enabled
//! - **Failure isolation** - malformed or missing predictions become error entries, length
//!   mismatches become skips
//! - **Stable ordering** - results keep the order in which predictions were submitted
//! - **Optional strict correspondence** - atom names can be compared position by position

pub mod batch;
pub mod config;
pub mod error;
pub mod progress;
