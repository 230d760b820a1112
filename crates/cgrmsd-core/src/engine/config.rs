use crate::core::metrics::MetricMode;
use crate::core::models::selector::AtomSelector;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Where a structure's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureSource {
    Path(PathBuf),
    Inline(String),
}

impl StructureSource {
    /// Human-readable name used in logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            StructureSource::Path(path) => path.display().to_string(),
            StructureSource::Inline(_) => "<inline>".to_string(),
        }
    }
}

/// One predicted structure to be scored, with the identifier reported in the result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictedStructure {
    pub identifier: String,
    pub source: StructureSource,
}

impl PredictedStructure {
    pub fn from_path(identifier: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            source: StructureSource::Path(path.into()),
        }
    }

    pub fn inline(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            source: StructureSource::Inline(content.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub selector: AtomSelector,
    pub mode: MetricMode,
    /// Compare atom names position by position before aligning.
    pub strict_atom_names: bool,
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    selector: Option<AtomSelector>,
    mode: Option<MetricMode>,
    strict_atom_names: Option<bool>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selector(mut self, selector: AtomSelector) -> Self {
        self.selector = Some(selector);
        self
    }
    pub fn mode(mut self, mode: MetricMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn strict_atom_names(mut self, strict: bool) -> Self {
        self.strict_atom_names = Some(strict);
        self
    }

    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        Ok(EvaluationConfig {
            selector: self
                .selector
                .ok_or(ConfigError::MissingParameter("selector"))?,
            mode: self.mode.ok_or(ConfigError::MissingParameter("mode"))?,
            strict_atom_names: self.strict_atom_names.unwrap_or(false),
        })
    }
}

/// A complete batch: one native structure, the predictions to score against it, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    pub native: StructureSource,
    pub predictions: Vec<PredictedStructure>,
    pub config: EvaluationConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_selector_and_mode() {
        assert_eq!(
            EvaluationConfigBuilder::new().mode(MetricMode::Sum).build(),
            Err(ConfigError::MissingParameter("selector"))
        );
        assert_eq!(
            EvaluationConfigBuilder::new()
                .selector(AtomSelector::All)
                .build(),
            Err(ConfigError::MissingParameter("mode"))
        );
    }

    #[test]
    fn strict_atom_names_defaults_to_off() {
        let config = EvaluationConfigBuilder::new()
            .selector(AtomSelector::names(["P"]))
            .mode(MetricMode::Mean)
            .build()
            .unwrap();
        assert!(!config.strict_atom_names);
        assert_eq!(config.mode, MetricMode::Mean);
    }

    #[test]
    fn describe_uses_path_or_inline_marker() {
        assert_eq!(
            StructureSource::Path(PathBuf::from("a/b.pdb")).describe(),
            "a/b.pdb"
        );
        assert_eq!(StructureSource::Inline(String::new()).describe(), "<inline>");
    }
}
