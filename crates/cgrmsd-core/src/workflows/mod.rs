//! # Workflows Module
//!
//! High-level entry points tying extraction, the batch engine and score tables together.
//!
//! - **Evaluation Workflow** ([`evaluate`]) - Extracts the native structure once, scores every
//!   prediction against it and reports progress; also discovers prediction files on disk.
//! - **Merge Workflow** ([`merge`]) - Joins a score table with externally computed quality
//!   metrics so the two can be compared downstream.

pub mod evaluate;
pub mod merge;
