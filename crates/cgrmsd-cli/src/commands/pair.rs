use crate::cli::PairArgs;
use crate::config::build_config;
use crate::error::Result;
use cgrmsd::{
    core::io::{
        results::{ScoreRecord, ScoreTable, ScoreValue},
        superposition,
    },
    engine::{
        batch,
        config::{PredictedStructure, StructureSource},
        error::EngineError,
    },
};
use std::path::Path;
use tracing::info;

pub async fn run(args: PairArgs) -> Result<()> {
    let app = build_config(&args.scoring)?;
    let config = &app.evaluation;

    info!("Loading native structure from {:?}", &args.native);
    let native = batch::extract(&StructureSource::Path(args.native.clone()), &config.selector)?;
    if native.is_empty() {
        return Err(EngineError::EmptySelection {
            path: args.native.clone(),
        }
        .into());
    }

    let identifier = file_name_or_display(&args.predicted);
    let prediction = PredictedStructure::from_path(identifier.clone(), args.predicted.clone());

    info!(
        "Superposing {} onto {} over {} selected atom(s).",
        identifier,
        args.native.display(),
        native.len()
    );
    let pair =
        tokio::task::block_in_place(|| batch::superpose_pair(&native, &prediction, config))?;

    let label = pair.deviation.mode.label();
    println!("{}: {} = {:?}", identifier, label, pair.deviation.value);

    if let Some(output) = &args.output {
        let table = ScoreTable {
            label: label.to_string(),
            records: vec![ScoreRecord {
                model: identifier.clone(),
                value: ScoreValue::Score(pair.deviation.value),
            }],
        };
        table.write_to_path(output).map_err(EngineError::from)?;
        info!("Score table written to {:?}", output);
    }

    if let Some(path) = &args.superposed {
        superposition::write_superposition_to_path(
            path,
            native.points(),
            pair.candidate.points(),
            &pair.superposed(),
        )
        .map_err(EngineError::from)?;
        println!("Superposed coordinates written to: {}", path.display());
    }

    Ok(())
}

fn file_name_or_display(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
