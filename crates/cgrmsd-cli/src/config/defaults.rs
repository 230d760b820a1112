use cgrmsd::core::metrics::MetricMode;
use cgrmsd::core::models::selector::AtomSelector;

pub struct DefaultsConfig {
    pub atoms: AtomSelector,
    pub metric: MetricMode,
    pub strict_atom_names: bool,
    pub extension: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            atoms: AtomSelector::All,
            metric: MetricMode::Mean,
            strict_atom_names: false,
            extension: "pdb".to_string(),
        }
    }
}
