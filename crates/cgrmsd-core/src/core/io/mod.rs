//! Provides input/output functionality for structure files and score tables.
//!
//! Coordinate extraction goes through the [`traits::StructureFile`] trait, implemented for
//! fixed-width crystallographic atom records by [`pdb::PdbFile`]. Score tables produced by the
//! batch evaluator are persisted and read back through [`results`]; [`superposition`] dumps
//! aligned coordinates for plotting.

pub mod pdb;
pub mod results;
pub mod superposition;
pub mod traits;
