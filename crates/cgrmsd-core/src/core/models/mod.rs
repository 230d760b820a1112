//! Data structures shared by extraction, alignment and scoring.
//!
//! A [`point_set::PointSet`] is the only thing that flows between the extractor and the
//! solver; atom identity is carried purely by position. A [`selector::AtomSelector`]
//! decides which atom records contribute to a point set.

pub mod point_set;
pub mod selector;
