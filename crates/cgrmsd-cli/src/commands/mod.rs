pub mod batch;
pub mod dataset;
pub mod merge;
pub mod pair;
