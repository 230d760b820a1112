use crate::error::{CliError, Result};
use cgrmsd::core::metrics::MetricMode;
use cgrmsd::core::models::selector::AtomSelector;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileScoringConfig {
    pub atoms: Option<AtomSelector>,
    pub metric: Option<MetricMode>,
    pub strict_atom_names: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileInputConfig {
    pub extension: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub scoring: Option<FileScoringConfig>,
    pub input: Option<FileInputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_file() {
        let config = FileConfig::from_toml(
            r#"
            [scoring]
            atoms = "C5',P"
            metric = "rssd"
            strict-atom-names = true

            [input]
            extension = "ent"
            "#,
        )
        .unwrap();

        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.atoms, Some(AtomSelector::names(["C5'", "P"])));
        assert_eq!(scoring.metric, Some(MetricMode::Sum));
        assert_eq!(scoring.strict_atom_names, Some(true));
        assert_eq!(config.input.unwrap().extension.as_deref(), Some("ent"));
    }

    #[test]
    fn empty_file_leaves_everything_unset() {
        let config = FileConfig::from_toml("").unwrap();
        assert!(config.scoring.is_none());
        assert!(config.input.is_none());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(FileConfig::from_toml("[scoring]\nresidues = \"A\"\n").is_err());
        assert!(FileConfig::from_toml("[scoring]\nmetric = \"tm-score\"\n").is_err());
        assert!(FileConfig::from_toml("[scoring]\natoms = \" , \"\n").is_err());
    }

    #[test]
    fn from_file_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[scoring\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
