//! Optimal rigid-body superposition of corresponding point sets.
//!
//! The solver eliminates translation by centering both sets and then finds the proper rotation
//! minimizing the sum of squared deviations (the Kabsch problem) through a singular-value
//! decomposition of the cross-covariance matrix.

pub mod kabsch;

pub use kabsch::{AlignmentError, AlignmentResult, align};
