use crate::core::alignment::{AlignmentError, AlignmentResult, align};
use crate::core::io::pdb::PdbFile;
use crate::core::io::results::{ScoreRecord, ScoreTable, ScoreValue};
use crate::core::io::traits::StructureFile;
use crate::core::metrics::{DeviationScore, MetricMode, score};
use crate::core::models::point_set::PointSet;
use crate::core::models::selector::AtomSelector;
use crate::engine::config::{EvaluationConfig, PredictedStructure, StructureSource};
use crate::engine::error::EngineError;
use crate::engine::progress::{PairStatus, Progress, ProgressReporter};
use nalgebra::Point3;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug)]
pub enum PairOutcome {
    Scored(DeviationScore),
    Failed(EngineError),
}

#[derive(Debug)]
pub struct BatchEntry {
    pub identifier: String,
    pub outcome: PairOutcome,
}

impl BatchEntry {
    pub fn score(&self) -> Option<f64> {
        match &self.outcome {
            PairOutcome::Scored(s) => Some(s.value),
            PairOutcome::Failed(_) => None,
        }
    }
}

/// A prediction left out of the result table because its selected atom count differs from
/// the native structure's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPair {
    pub identifier: String,
    pub reference_len: usize,
    pub candidate_len: usize,
}

#[derive(Debug)]
pub struct BatchResult {
    pub mode: MetricMode,
    /// One entry per prediction that was not skipped, in submission order.
    pub entries: Vec<BatchEntry>,
    pub skipped: Vec<SkippedPair>,
}

impl BatchResult {
    pub fn scored_count(&self) -> usize {
        self.entries.iter().filter(|e| e.score().is_some()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.scored_count()
    }

    /// Flattens the entries into the two-column table handed to the result sink.
    pub fn to_score_table(&self) -> ScoreTable {
        ScoreTable {
            label: self.mode.label().to_string(),
            records: self
                .entries
                .iter()
                .map(|entry| ScoreRecord {
                    model: entry.identifier.clone(),
                    value: entry
                        .score()
                        .map_or(ScoreValue::Error, ScoreValue::Score),
                })
                .collect(),
        }
    }
}

enum Evaluated {
    Entry(BatchEntry),
    Skipped(SkippedPair),
}

/// Extracts the selected atoms of a structure from a file or from inline text.
pub fn extract(
    source: &StructureSource,
    selector: &AtomSelector,
) -> Result<PointSet, EngineError> {
    let result = match source {
        StructureSource::Path(path) => PdbFile::read_coordinates_from_path(path, selector),
        StructureSource::Inline(content) => PdbFile::read_coordinates_from_str(content, selector),
    };
    result.map_err(|e| EngineError::Extraction {
        source_name: source.describe(),
        source: e,
    })
}

/// Extracts, validates, aligns and scores one prediction against the native point set.
///
/// # Errors
///
/// Returns an [`EngineError`] for extraction failures, length mismatches
/// ([`EngineError::is_shape_mismatch`]), atom-name mismatches in strict mode, and metric
/// failures on empty selections.
pub fn evaluate_pair(
    native: &PointSet,
    prediction: &PredictedStructure,
    config: &EvaluationConfig,
) -> Result<DeviationScore, EngineError> {
    superpose_pair(native, prediction, config).map(|pair| pair.deviation)
}

/// Everything computed for one pair: the extracted prediction, its optimal alignment onto the
/// native point set, and the resulting score.
#[derive(Debug, Clone)]
pub struct PairSuperposition {
    pub candidate: PointSet,
    pub alignment: AlignmentResult,
    pub deviation: DeviationScore,
}

impl PairSuperposition {
    /// The prediction's points after applying the alignment.
    pub fn superposed(&self) -> Vec<Point3<f64>> {
        self.alignment.superpose(&self.candidate)
    }
}

/// Like [`evaluate_pair`], but keeps the alignment for callers that need the superposed
/// coordinates.
pub fn superpose_pair(
    native: &PointSet,
    prediction: &PredictedStructure,
    config: &EvaluationConfig,
) -> Result<PairSuperposition, EngineError> {
    let candidate = extract(&prediction.source, &config.selector)?;

    if config.strict_atom_names {
        check_atom_names(native, &candidate)?;
    }

    let alignment = align(native, &candidate)?;
    let deviation = score(&alignment, native.len(), config.mode)?;
    Ok(PairSuperposition {
        candidate,
        alignment,
        deviation,
    })
}

fn check_atom_names(native: &PointSet, candidate: &PointSet) -> Result<(), EngineError> {
    if native.len() != candidate.len() {
        return Err(AlignmentError::ShapeMismatch {
            reference: native.len(),
            candidate: candidate.len(),
        }
        .into());
    }
    let (Some(reference_names), Some(candidate_names)) =
        (native.atom_names(), candidate.atom_names())
    else {
        return Ok(());
    };
    match reference_names
        .iter()
        .zip(candidate_names)
        .position(|(a, b)| a != b)
    {
        Some(index) => Err(EngineError::AtomNameMismatch {
            index,
            reference: reference_names[index].clone(),
            candidate: candidate_names[index].clone(),
        }),
        None => Ok(()),
    }
}

fn evaluate_one(
    native: &PointSet,
    prediction: &PredictedStructure,
    config: &EvaluationConfig,
    reporter: &ProgressReporter,
) -> Evaluated {
    let identifier = prediction.identifier.clone();
    let (evaluated, status) = match evaluate_pair(native, prediction, config) {
        Ok(deviation) => {
            debug!(model = %identifier, score = deviation.value, "Scored prediction.");
            (
                Evaluated::Entry(BatchEntry {
                    identifier: identifier.clone(),
                    outcome: PairOutcome::Scored(deviation),
                }),
                PairStatus::Scored,
            )
        }
        Err(EngineError::Alignment(AlignmentError::ShapeMismatch {
            reference,
            candidate,
        })) => {
            warn!(
                "Skipping {}: shape mismatch ({} native atoms vs {} predicted atoms).",
                identifier, reference, candidate
            );
            (
                Evaluated::Skipped(SkippedPair {
                    identifier: identifier.clone(),
                    reference_len: reference,
                    candidate_len: candidate,
                }),
                PairStatus::Skipped,
            )
        }
        Err(e) => {
            warn!("Error processing {}: {}", identifier, e);
            (
                Evaluated::Entry(BatchEntry {
                    identifier: identifier.clone(),
                    outcome: PairOutcome::Failed(e),
                }),
                PairStatus::Failed,
            )
        }
    };
    reporter.report(Progress::PairFinished { identifier, status });
    evaluated
}

/// Scores every prediction against an already extracted native point set.
///
/// No single prediction can abort the batch: length mismatches are collected in
/// [`BatchResult::skipped`] and every other failure becomes an error entry. Entries keep the
/// order of `predictions` regardless of how the work was scheduled.
#[instrument(skip_all, name = "batch_evaluation", fields(native_atoms = native.len(), predictions = predictions.len()))]
pub fn evaluate(
    native: &PointSet,
    predictions: &[PredictedStructure],
    config: &EvaluationConfig,
    reporter: &ProgressReporter,
) -> BatchResult {
    #[cfg(not(feature = "parallel"))]
    let iterator = predictions.iter();

    #[cfg(feature = "parallel")]
    let iterator = predictions.par_iter();

    let evaluated: Vec<Evaluated> = iterator
        .map(|prediction| evaluate_one(native, prediction, config, reporter))
        .collect();

    let mut entries = Vec::with_capacity(evaluated.len());
    let mut skipped = Vec::new();
    for item in evaluated {
        match item {
            Evaluated::Entry(entry) => entries.push(entry),
            Evaluated::Skipped(pair) => skipped.push(pair),
        }
    }

    BatchResult {
        mode: config.mode,
        entries,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EvaluationConfigBuilder;
    use std::sync::Mutex;

    const TOLERANCE: f64 = 1e-6;

    fn atom_line(serial: usize, name: &str, x: f64, y: f64, z: f64) -> String {
        format!(
            "ATOM  {:>5} {:<4} {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00",
            serial, name, "G", serial, x, y, z
        )
    }

    fn structure(atoms: &[(&str, [f64; 3])]) -> String {
        let mut lines: Vec<String> = atoms
            .iter()
            .enumerate()
            .map(|(i, (name, [x, y, z]))| atom_line(i + 1, name, *x, *y, *z))
            .collect();
        lines.push("END".to_string());
        lines.join("\n")
    }

    fn config(mode: MetricMode) -> EvaluationConfig {
        EvaluationConfigBuilder::new()
            .selector(AtomSelector::All)
            .mode(mode)
            .build()
            .unwrap()
    }

    fn native_triangle() -> PointSet {
        PointSet::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
    }

    #[test]
    fn atom_line_matches_fixed_columns() {
        let line = atom_line(1, "C5'", 1.5, -2.25, 30.0);
        assert_eq!(line.get(12..16).unwrap().trim(), "C5'");
        assert_eq!(line.get(30..38).unwrap().trim(), "1.500");
        assert_eq!(line.get(38..46).unwrap().trim(), "-2.250");
        assert_eq!(line.get(46..54).unwrap().trim(), "30.000");
    }

    #[test]
    fn rotated_and_translated_prediction_scores_zero() {
        // 90 degrees about Z, then shifted by (5, 5, 5).
        let prediction = PredictedStructure::inline(
            "rotated.pdb",
            structure(&[
                ("P", [5.0, 5.0, 5.0]),
                ("P", [5.0, 6.0, 5.0]),
                ("P", [4.0, 5.0, 5.0]),
            ]),
        );
        let result = evaluate(
            &native_triangle(),
            &[prediction],
            &config(MetricMode::Mean),
            &ProgressReporter::new(),
        );
        assert_eq!(result.entries.len(), 1);
        assert!(result.entries[0].score().unwrap().abs() < TOLERANCE);
    }

    #[test]
    fn superpose_pair_maps_prediction_onto_native() {
        let prediction = PredictedStructure::inline(
            "rotated.pdb",
            structure(&[
                ("P", [5.0, 5.0, 5.0]),
                ("P", [5.0, 6.0, 5.0]),
                ("P", [4.0, 5.0, 5.0]),
            ]),
        );
        let native = native_triangle();
        let pair = superpose_pair(&native, &prediction, &config(MetricMode::Sum)).unwrap();

        assert_eq!(pair.candidate.len(), 3);
        assert!(pair.deviation.value.abs() < TOLERANCE);
        for (expected, actual) in native.points().iter().zip(pair.superposed()) {
            assert!((expected - actual).norm() < TOLERANCE);
        }
    }

    #[test]
    fn stretched_prediction_has_positive_residual_and_mean_is_half_of_sum() {
        let native = PointSet::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let prediction = PredictedStructure::inline(
            "stretched.pdb",
            structure(&[("P", [0.0, 0.0, 0.0]), ("P", [2.0, 0.0, 0.0])]),
        );

        let sum = evaluate_pair(&native, &prediction, &config(MetricMode::Sum)).unwrap();
        let mean = evaluate_pair(&native, &prediction, &config(MetricMode::Mean)).unwrap();

        assert!(sum.value > 0.0);
        assert!((sum.value - 0.5).abs() < TOLERANCE);
        assert_eq!(mean.value, sum.value / 2.0);
    }

    #[test]
    fn malformed_prediction_becomes_error_entry_without_aborting_batch() {
        let good = structure(&[
            ("P", [0.0, 0.0, 0.0]),
            ("P", [1.0, 0.0, 0.0]),
            ("P", [0.0, 1.0, 0.0]),
        ]);
        let broken = good.replacen("1.000", "1.0x0", 1);
        let predictions = vec![
            PredictedStructure::inline("a.pdb", good.clone()),
            PredictedStructure::inline("b.pdb", broken),
            PredictedStructure::inline("c.pdb", good),
        ];

        let result = evaluate(
            &native_triangle(),
            &predictions,
            &config(MetricMode::Mean),
            &ProgressReporter::new(),
        );

        let ids: Vec<&str> = result.entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a.pdb", "b.pdb", "c.pdb"]);
        assert_eq!(result.scored_count(), 2);
        assert_eq!(result.failed_count(), 1);
        assert!(matches!(
            result.entries[1].outcome,
            PairOutcome::Failed(EngineError::Extraction { .. })
        ));
    }

    #[test]
    fn shape_mismatch_is_skipped_not_recorded() {
        let predictions = vec![
            PredictedStructure::inline("short.pdb", structure(&[("P", [0.0, 0.0, 0.0])])),
            PredictedStructure::inline(
                "ok.pdb",
                structure(&[
                    ("P", [0.0, 0.0, 0.0]),
                    ("P", [1.0, 0.0, 0.0]),
                    ("P", [0.0, 1.0, 0.0]),
                ]),
            ),
        ];

        let result = evaluate(
            &native_triangle(),
            &predictions,
            &config(MetricMode::Sum),
            &ProgressReporter::new(),
        );

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].identifier, "ok.pdb");
        assert_eq!(
            result.skipped,
            vec![SkippedPair {
                identifier: "short.pdb".into(),
                reference_len: 3,
                candidate_len: 1,
            }]
        );
    }

    #[test]
    fn missing_prediction_file_becomes_error_entry() {
        let dir = tempfile::tempdir().unwrap();
        let prediction = PredictedStructure::from_path("gone.pdb", dir.path().join("gone.pdb"));
        let result = evaluate(
            &native_triangle(),
            &[prediction],
            &config(MetricMode::Mean),
            &ProgressReporter::new(),
        );
        assert_eq!(result.failed_count(), 1);
        let table = result.to_score_table();
        assert_eq!(table.label, "CG-RMSD");
        assert_eq!(table.records[0].value, ScoreValue::Error);
    }

    #[test]
    fn strict_mode_rejects_reordered_atom_names() {
        let native_text = structure(&[
            ("P", [0.0, 0.0, 0.0]),
            ("C5'", [1.0, 0.0, 0.0]),
            ("C4'", [0.0, 1.0, 0.0]),
        ]);
        let native = extract(&StructureSource::Inline(native_text), &AtomSelector::All).unwrap();
        let prediction = PredictedStructure::inline(
            "swapped.pdb",
            structure(&[
                ("P", [0.0, 0.0, 0.0]),
                ("C4'", [1.0, 0.0, 0.0]),
                ("C5'", [0.0, 1.0, 0.0]),
            ]),
        );

        let lenient = config(MetricMode::Mean);
        assert!(evaluate_pair(&native, &prediction, &lenient).is_ok());

        let strict = EvaluationConfig {
            strict_atom_names: true,
            ..lenient
        };
        match evaluate_pair(&native, &prediction, &strict) {
            Err(EngineError::AtomNameMismatch {
                index,
                reference,
                candidate,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(reference, "C5'");
                assert_eq!(candidate, "C4'");
            }
            other => panic!("Expected atom name mismatch, got {other:?}"),
        }
    }

    #[test]
    fn strict_mode_still_skips_length_mismatch() {
        let prediction =
            PredictedStructure::inline("short.pdb", structure(&[("P", [0.0, 0.0, 0.0])]));
        let strict = EvaluationConfig {
            strict_atom_names: true,
            ..config(MetricMode::Mean)
        };
        let err = evaluate_pair(&native_triangle(), &prediction, &strict).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn empty_native_and_prediction_fail_with_invalid_input() {
        let prediction = PredictedStructure::inline("empty.pdb", "END\n");
        let err =
            evaluate_pair(&PointSet::default(), &prediction, &config(MetricMode::Sum)).unwrap_err();
        assert!(matches!(err, EngineError::Metric(_)));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let predictions = vec![PredictedStructure::inline(
            "noisy.pdb",
            structure(&[
                ("P", [0.1, -0.2, 0.05]),
                ("P", [1.3, 0.1, -0.1]),
                ("P", [-0.1, 0.9, 0.2]),
            ]),
        )];
        let cfg = config(MetricMode::Sum);
        let first = evaluate(&native_triangle(), &predictions, &cfg, &ProgressReporter::new());
        let second = evaluate(&native_triangle(), &predictions, &cfg, &ProgressReporter::new());
        assert_eq!(first.entries[0].score(), second.entries[0].score());
        assert!(first.entries[0].score().unwrap() > 0.0);
    }

    #[test]
    fn reports_one_progress_event_per_prediction() {
        let statuses = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PairFinished { status, .. } = event {
                statuses.lock().unwrap().push(status);
            }
        }));
        let predictions = vec![
            PredictedStructure::inline("short.pdb", structure(&[("P", [0.0, 0.0, 0.0])])),
            PredictedStructure::inline("bad.pdb", "ATOM      1  P     G A   1      abc"),
        ];
        evaluate(
            &native_triangle(),
            &predictions,
            &config(MetricMode::Sum),
            &reporter,
        );
        drop(reporter);

        let mut statuses = statuses.into_inner().unwrap();
        statuses.sort_by_key(|s| *s as u8);
        assert_eq!(statuses, vec![PairStatus::Skipped, PairStatus::Failed]);
    }
}
