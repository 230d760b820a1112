use crate::cli::BatchArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cgrmsd::{
    engine::{
        config::{EvaluationRequest, StructureSource},
        error::EngineError,
        progress::ProgressReporter,
    },
    workflows,
};
use tracing::{info, warn};

pub async fn run(args: BatchArgs) -> Result<()> {
    let app = build_config(&args.scoring)?;

    info!(
        "Collecting '*.{}' predictions from {:?}",
        app.extension, &args.predictions
    );
    let predictions =
        workflows::evaluate::collect_structures(&args.predictions, &app.extension)?;
    if predictions.is_empty() {
        warn!(
            "No '*.{}' files found in {:?}; the score table will be empty.",
            app.extension, &args.predictions
        );
    }

    let request = EvaluationRequest {
        native: StructureSource::Path(args.native.clone()),
        predictions,
        config: app.evaluation,
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Scoring {} prediction(s) against {}...",
        request.predictions.len(),
        args.native.display()
    );
    let result = tokio::task::block_in_place(|| workflows::evaluate::run(&request, &reporter))?;

    result
        .to_score_table()
        .write_to_path(&args.output)
        .map_err(EngineError::from)?;

    println!(
        "{} scored, {} skipped, {} failed. Score table written to: {}",
        result.scored_count(),
        result.skipped.len(),
        result.failed_count(),
        args.output.display()
    );
    Ok(())
}
