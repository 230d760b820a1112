use crate::cli::{MergeArgs, MergeDatasetArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use cgrmsd::workflows;
use tracing::info;

pub async fn run(args: MergeArgs) -> Result<()> {
    let columns =
        parser::parse_columns(&args.columns).map_err(|e| CliError::Argument(e.to_string()))?;
    info!("Metrics columns: {:?}", columns);

    let summary = tokio::task::block_in_place(|| {
        workflows::merge::run(&args.scores, &args.metrics, &args.output, columns)
    })?;

    println!(
        "{} row(s) merged ({} score row(s) and {} metrics row(s) unmatched). Written to: {}",
        summary.matched,
        summary.unmatched_scores,
        summary.unmatched_metrics,
        args.output.display()
    );
    Ok(())
}

pub async fn run_dataset(args: MergeDatasetArgs) -> Result<()> {
    let columns =
        parser::parse_columns(&args.columns).map_err(|e| CliError::Argument(e.to_string()))?;
    info!("Metrics columns: {:?}", columns);
    std::fs::create_dir_all(&args.output_dir)?;

    let summary = tokio::task::block_in_place(|| {
        workflows::merge::run_dataset(
            &args.scores_dir,
            &args.metrics_dir,
            &args.output_dir,
            &columns,
        )
    })?;

    println!(
        "{} target(s) merged, {} skipped for lack of a metrics file. Written to: {}",
        summary.merged.len(),
        summary.missing_metrics.len(),
        args.output_dir.display()
    );
    Ok(())
}
