use crate::core::alignment::AlignmentResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MetricError {
    #[error("Cannot score an alignment over {n_atoms} atoms; at least one atom is required")]
    InvalidInput { n_atoms: usize },

    #[error(
        "Unknown metric '{0}'. Expected one of: rssd, cg-rmsd, root-rssd, rmsd (or sum, mean, root-sum, root-mean)."
    )]
    UnknownMode(String),
}

/// The normalization applied to an alignment residual.
///
/// `Sum` and `Mean` are the two historical variants: the raw residual ("RSSD") and the residual
/// divided by the atom count ("CG-RMSD"). The mean variant deliberately takes no square root;
/// the rooted forms are available as separate modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MetricMode {
    Sum,
    #[default]
    Mean,
    RootSum,
    RootMean,
}

impl MetricMode {
    pub const ALL: [MetricMode; 4] = [
        MetricMode::Sum,
        MetricMode::Mean,
        MetricMode::RootSum,
        MetricMode::RootMean,
    ];

    /// Column header used for this metric in score tables.
    pub fn label(&self) -> &'static str {
        match self {
            MetricMode::Sum => "RSSD",
            MetricMode::Mean => "CG-RMSD",
            MetricMode::RootSum => "root-RSSD",
            MetricMode::RootMean => "RMSD",
        }
    }

    fn kebab_name(&self) -> &'static str {
        match self {
            MetricMode::Sum => "sum",
            MetricMode::Mean => "mean",
            MetricMode::RootSum => "root-sum",
            MetricMode::RootMean => "root-mean",
        }
    }

    pub fn apply(&self, residual: f64, n_atoms: usize) -> f64 {
        let n = n_atoms as f64;
        match self {
            MetricMode::Sum => residual,
            MetricMode::Mean => residual / n,
            MetricMode::RootSum => residual.sqrt(),
            MetricMode::RootMean => (residual / n).sqrt(),
        }
    }
}

impl FromStr for MetricMode {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        MetricMode::ALL
            .into_iter()
            .find(|mode| {
                needle.eq_ignore_ascii_case(mode.label())
                    || needle.eq_ignore_ascii_case(mode.kebab_name())
            })
            .ok_or_else(|| MetricError::UnknownMode(s.to_string()))
    }
}

impl TryFrom<String> for MetricMode {
    type Error = MetricError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MetricMode> for String {
    fn from(mode: MetricMode) -> Self {
        mode.label().to_string()
    }
}

impl fmt::Display for MetricMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationScore {
    pub mode: MetricMode,
    pub value: f64,
}

/// Converts an alignment residual into the requested metric.
///
/// # Errors
///
/// Returns [`MetricError::InvalidInput`] when `n_atoms` is zero. Empty selections must be
/// caught before scoring.
pub fn score(
    alignment: &AlignmentResult,
    n_atoms: usize,
    mode: MetricMode,
) -> Result<DeviationScore, MetricError> {
    if n_atoms == 0 {
        return Err(MetricError::InvalidInput { n_atoms });
    }
    Ok(DeviationScore {
        mode,
        value: mode.apply(alignment.residual, n_atoms),
    })
}
