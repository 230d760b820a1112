use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ScoringArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use cgrmsd::core::metrics::{MetricError, MetricMode};
use cgrmsd::core::models::selector::{AtomSelector, SelectorError};
use cgrmsd::engine::config::EvaluationConfigBuilder;

pub fn build_config(args: &ScoringArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let scoring_file = file_config.scoring.take().unwrap_or_default();
    let input_file = file_config.input.take().unwrap_or_default();

    let atoms = match args.atoms.as_deref() {
        Some(raw) => raw
            .parse::<AtomSelector>()
            .map_err(|e| CliError::Argument(e.to_string()))?,
        None => scoring_file.atoms.unwrap_or(defaults.atoms),
    };
    let metric = match args.metric.as_deref() {
        Some(raw) => raw
            .parse::<MetricMode>()
            .map_err(|e| CliError::Argument(e.to_string()))?,
        None => scoring_file.metric.unwrap_or(defaults.metric),
    };
    let strict_atom_names = args.strict_names
        || scoring_file
            .strict_atom_names
            .unwrap_or(defaults.strict_atom_names);

    let extension = input_file.extension.unwrap_or(defaults.extension);
    let extension = extension.trim_start_matches('.').to_string();
    if extension.is_empty() {
        return Err(CliError::Config(
            "`input.extension` cannot be empty.".to_string(),
        ));
    }

    let evaluation = EvaluationConfigBuilder::new()
        .selector(atoms)
        .mode(metric)
        .strict_atom_names(strict_atom_names)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        evaluation,
        extension,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "scoring.atoms" => {
                let atoms: AtomSelector = value_str.parse().map_err(|e: SelectorError| {
                    CliError::Config(format!("Invalid value for {}: {}", key, e))
                })?;
                config.scoring.get_or_insert_with(Default::default).atoms = Some(atoms);
            }
            "scoring.metric" => {
                let metric: MetricMode = value_str.parse().map_err(|e: MetricError| {
                    CliError::Config(format!("Invalid value for {}: {}", key, e))
                })?;
                config.scoring.get_or_insert_with(Default::default).metric = Some(metric);
            }
            "scoring.strict-atom-names" => {
                config
                    .scoring
                    .get_or_insert_with(Default::default)
                    .strict_atom_names = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            "input.extension" => {
                config.input.get_or_insert_with(Default::default).extension =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
