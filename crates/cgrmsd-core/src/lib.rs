//! # CG-RMSD Core Library
//!
//! Scores predicted molecular structures against a native reference by optimal rigid-body
//! superposition of a selected atom subset, followed by a deviation metric over the residual.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`PointSet`, `AtomSelector`),
//!   coordinate extraction from fixed-width structure files, the Kabsch alignment solver and
//!   the deviation metrics.
//!
//! - **[`engine`]: The Logic Core.** Evaluation configuration, error aggregation, progress
//!   reporting and the batch evaluator that scores one native structure against many
//!   predictions, in parallel when the `parallel` feature is enabled.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures: evaluating a native file
//!   against a set of predicted files, discovering prediction files on disk, and merging score
//!   tables with external quality metrics.

pub mod core;
pub mod engine;
pub mod workflows;
