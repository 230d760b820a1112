use crate::cli::DatasetArgs;
use crate::config::{AppConfig, build_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cgrmsd::{
    engine::{
        config::{EvaluationRequest, PredictedStructure, StructureSource},
        error::EngineError,
        progress::ProgressReporter,
    },
    workflows,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// One target of the dataset: its native structure and where its predictions and scores live.
#[derive(Debug, Clone, PartialEq)]
struct Target {
    id: String,
    native: PathBuf,
    predictions: PathBuf,
    output: PathBuf,
}

/// Pairs every native structure with `predictions/<id>/` and `output/<id>.csv`.
fn plan_targets(natives: &[PredictedStructure], args: &DatasetArgs) -> Vec<Target> {
    natives
        .iter()
        .filter_map(|native| {
            let StructureSource::Path(path) = &native.source else {
                return None;
            };
            let id = path.file_stem()?.to_str()?.to_string();
            Some(Target {
                predictions: args.predictions.join(&id),
                output: args.output.join(format!("{id}.csv")),
                native: path.clone(),
                id,
            })
        })
        .collect()
}

/// Counts of targets handled by one dataset run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct DatasetSummary {
    written: usize,
    skipped: usize,
}

pub async fn run(args: DatasetArgs) -> Result<()> {
    let app = build_config(&args.scoring)?;

    let natives = workflows::evaluate::collect_structures(&args.natives, &app.extension)?;
    let targets = plan_targets(&natives, &args);
    info!(
        "Found {} native structure(s) in {:?}",
        targets.len(),
        &args.natives
    );
    std::fs::create_dir_all(&args.output)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let summary = tokio::task::block_in_place(|| score_targets(&targets, &app, &reporter))?;

    println!(
        "{} target(s) scored, {} skipped. Score tables written to: {}",
        summary.written,
        summary.skipped,
        args.output.display()
    );
    Ok(())
}

/// Scores every target in order, writing one score table per target.
///
/// Targets without a prediction folder, and targets whose native structure is unreadable or
/// has no selected atoms, are skipped with a warning. Any other error aborts the run.
fn score_targets(
    targets: &[Target],
    app: &AppConfig,
    reporter: &ProgressReporter,
) -> Result<DatasetSummary> {
    let mut summary = DatasetSummary::default();
    for target in targets {
        if !target.predictions.is_dir() {
            warn!(
                "No prediction folder for target '{}' at {:?}; skipping.",
                target.id, target.predictions
            );
            summary.skipped += 1;
            continue;
        }

        let request = EvaluationRequest {
            native: StructureSource::Path(target.native.clone()),
            predictions: workflows::evaluate::collect_structures(
                &target.predictions,
                &app.extension,
            )?,
            config: app.evaluation.clone(),
        };

        match workflows::evaluate::run(&request, reporter) {
            Ok(result) => {
                result
                    .to_score_table()
                    .write_to_path(&target.output)
                    .map_err(EngineError::from)?;
                info!("Target '{}' written to {:?}", target.id, target.output);
                summary.written += 1;
            }
            Err(e @ (EngineError::EmptySelection { .. } | EngineError::Extraction { .. })) => {
                warn!("Skipping target '{}': {}", target.id, e);
                summary.skipped += 1;
            }
            Err(e) => {
                error!("Target '{}' failed: {}", target.id, e);
                return Err(e.into());
            }
        }
    }
    Ok(summary)
}
