use cgrmsd::engine::config::EvaluationConfig;

/// Fully resolved settings for one scoring command.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub evaluation: EvaluationConfig,
    /// Extension of structure files picked up from directories, without the dot.
    pub extension: String,
}
