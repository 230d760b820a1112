use crate::engine::batch::{self, BatchResult};
use crate::engine::config::{EvaluationRequest, PredictedStructure, StructureSource};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Evaluates every prediction of `request` against its native structure.
///
/// The native structure is extracted once and shared by all pairs. An empty native selection
/// is rejected up front, since no prediction could be scored against it.
///
/// # Errors
///
/// Returns an error only for problems with the native structure. Failures of individual
/// predictions are recorded in the returned [`BatchResult`].
#[instrument(skip_all, name = "evaluation_workflow", fields(native = %request.native.describe()))]
pub fn run(
    request: &EvaluationRequest,
    reporter: &ProgressReporter,
) -> Result<BatchResult, EngineError> {
    let config = &request.config;
    info!(
        selector = %config.selector,
        metric = %config.mode,
        "Extracting native structure."
    );
    let native = batch::extract(&request.native, &config.selector)?;
    if native.is_empty() {
        return Err(EngineError::EmptySelection {
            path: match &request.native {
                StructureSource::Path(path) => path.clone(),
                StructureSource::Inline(_) => PathBuf::from("<inline>"),
            },
        });
    }
    info!(
        "Native structure has {} selected atoms; scoring {} prediction(s).",
        native.len(),
        request.predictions.len()
    );

    reporter.report(Progress::BatchStart {
        native: request.native.describe(),
        total: request.predictions.len() as u64,
    });

    let result = batch::evaluate(&native, &request.predictions, config, reporter);
    if !result.skipped.is_empty() {
        reporter.report(Progress::Message(format!(
            "{} prediction(s) skipped: atom counts differ from the native structure ({} atoms).",
            result.skipped.len(),
            native.len()
        )));
    }

    reporter.report(Progress::BatchFinish {
        scored: result.scored_count(),
        skipped: result.skipped.len(),
        failed: result.failed_count(),
    });
    info!(
        scored = result.scored_count(),
        skipped = result.skipped.len(),
        failed = result.failed_count(),
        "Evaluation finished."
    );
    Ok(result)
}

/// Lists the structure files with the given extension in `dir`, sorted by file name.
///
/// The identifier of each prediction is its file name, which is what score tables report.
/// Subdirectories and files with other extensions are ignored.
///
/// # Errors
///
/// Returns [`EngineError::Discovery`] if the directory cannot be read.
pub fn collect_structures(
    dir: &Path,
    extension: &str,
) -> Result<Vec<PredictedStructure>, EngineError> {
    let discovery_error = |source| EngineError::Discovery {
        path: dir.to_path_buf(),
        source,
    };

    let mut structures = Vec::new();
    for entry in fs::read_dir(dir).map_err(discovery_error)? {
        let path = entry.map_err(discovery_error)?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!("Skipping file with non UTF-8 name: {:?}", path);
            continue;
        };
        structures.push(PredictedStructure::from_path(file_name, path.clone()));
    }

    structures.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(structures)
}
