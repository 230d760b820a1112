use crate::core::io::traits::StructureFile;
use crate::core::models::point_set::PointSet;
use crate::core::models::selector::AtomSelector;
use nalgebra::Point3;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use thiserror::Error;

const ATOM_RECORD_TAG: &str = "ATOM";

const NAME_COLUMNS: (usize, usize) = (12, 16);
const X_COLUMNS: (usize, usize) = (30, 38);
const Y_COLUMNS: (usize, usize) = (38, 46);
const Z_COLUMNS: (usize, usize) = (46, 54);

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("Structure file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Malformed coordinate in columns {columns} (value: '{value}')")]
    MalformedRecord { columns: String, value: String },
}

fn slice_and_trim(line: &str, (start, end): (usize, usize)) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("").trim()
}

fn parse_coordinate(line: &str, line_num: usize, columns: (usize, usize)) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, columns);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::MalformedRecord {
            columns: format!("{}-{}", columns.0 + 1, columns.1),
            value: value.into(),
        },
    })
}

/// Coordinate reader for the crystallographic fixed-width atom-record layout.
///
/// Only lines starting with `ATOM` are considered. The atom name is taken from columns 13-16
/// and the coordinates from columns 31-38, 39-46 and 47-54 (1-based, inclusive). All other
/// records, including `HETATM`, model separators and connectivity, are ignored.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_coordinates(
        reader: &mut impl BufRead,
        selector: &AtomSelector,
    ) -> Result<PointSet, Self::Error> {
        let mut point_set = PointSet::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if !line.starts_with(ATOM_RECORD_TAG) {
                continue;
            }

            let name = slice_and_trim(&line, NAME_COLUMNS);
            if !selector.matches(name) {
                continue;
            }

            let x = parse_coordinate(&line, line_num, X_COLUMNS)?;
            let y = parse_coordinate(&line, line_num, Y_COLUMNS)?;
            let z = parse_coordinate(&line, line_num, Z_COLUMNS)?;

            point_set.push_named(Point3::new(x, y, z), name);
        }

        Ok(point_set)
    }

    fn not_found(path: &Path) -> Self::Error {
        PdbError::NotFound {
            path: path.to_path_buf(),
        }
    }
}
