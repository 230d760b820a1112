use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "CG-RMSD CLI - Score predicted RNA structures against a native structure by rigid superposition of selected atoms.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single predicted structure against a native structure.
    Pair(PairArgs),
    /// Score every structure in a directory against one native structure.
    Batch(BatchArgs),
    /// Score a whole dataset: one native structure per target, one prediction folder per target.
    Dataset(DatasetArgs),
    /// Join a score table with externally computed quality metrics.
    Merge(MergeArgs),
    /// Join every per-target score table of a dataset with its metrics file.
    MergeDataset(MergeDatasetArgs),
}

/// Scoring options shared by `pair`, `batch` and `dataset`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Atom names to superpose, comma separated (e.g., "C5',P"), or "all".
    #[arg(short, long, value_name = "NAMES")]
    pub atoms: Option<String>,

    /// Metric to report: rssd, cg-rmsd, root-rssd or rmsd.
    #[arg(short, long, value_name = "METRIC")]
    pub metric: Option<String>,

    /// Require atom names to match position by position before aligning.
    #[arg(long)]
    pub strict_names: bool,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scoring.atoms=P
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `pair` subcommand.
#[derive(Args, Debug)]
pub struct PairArgs {
    /// Path to the native (reference) structure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub native: PathBuf,

    /// Path to the predicted structure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub predicted: PathBuf,

    /// Also write the score as a one-row score table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write native, predicted and superposed coordinates to a CSV file for plotting.
    #[arg(long, value_name = "PATH")]
    pub superposed: Option<PathBuf>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Path to the native (reference) structure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub native: PathBuf,

    /// Directory containing the predicted structures.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub predictions: PathBuf,

    /// Path of the score table to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Arguments for the `dataset` subcommand.
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Directory of native structures, one `<id>.<ext>` file per target.
    #[arg(long, required = true, value_name = "DIR")]
    pub natives: PathBuf,

    /// Directory holding one `<id>/` folder of predictions per target.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub predictions: PathBuf,

    /// Directory receiving one `<id>.csv` score table per target.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Arguments for the `merge` subcommand.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Score table produced by `pair`, `batch` or `dataset`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub scores: PathBuf,

    /// Header-less metrics CSV whose first column is the model identifier.
    #[arg(long, required = true, value_name = "PATH")]
    pub metrics: PathBuf,

    /// Path of the merged table to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Names of the metrics columns, comma separated.
    #[arg(long, value_name = "NAMES", default_value = "RMSD,MCQ,TM-score")]
    pub columns: String,
}

/// Arguments for the `merge-dataset` subcommand.
#[derive(Args, Debug)]
pub struct MergeDatasetArgs {
    /// Directory of `<id>.csv` score tables, as written by `dataset`.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub scores_dir: PathBuf,

    /// Directory of header-less `<id>.csv` metrics files.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub metrics_dir: PathBuf,

    /// Directory receiving one `merged_<id>.csv` table per target.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Names of the metrics columns, comma separated.
    #[arg(long, value_name = "NAMES", default_value = "RMSD,MCQ,TM-score")]
    pub columns: String,
}
