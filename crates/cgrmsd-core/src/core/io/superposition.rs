use super::results::ResultsError;
use nalgebra::Point3;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 10] = [
    "index",
    "native_x",
    "native_y",
    "native_z",
    "predicted_x",
    "predicted_y",
    "predicted_z",
    "superposed_x",
    "superposed_y",
    "superposed_z",
];

/// Writes matched native, predicted and superposed coordinates side by side, one row per atom.
///
/// Rows stop at the shortest of the three slices; after a successful alignment they all have
/// the same length.
pub fn write_superposition(
    writer: impl Write,
    native: &[Point3<f64>],
    predicted: &[Point3<f64>],
    superposed: &[Point3<f64>],
) -> Result<(), ResultsError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for (index, ((a, b), c)) in native.iter().zip(predicted).zip(superposed).enumerate() {
        let mut row = Vec::with_capacity(HEADER.len());
        row.push(index.to_string());
        for point in [a, b, c] {
            row.extend(point.coords.iter().map(|v| format!("{v:?}")));
        }
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_superposition_to_path<P: AsRef<Path>>(
    path: P,
    native: &[Point3<f64>],
    predicted: &[Point3<f64>],
    superposed: &[Point3<f64>],
) -> Result<(), ResultsError> {
    write_superposition(File::create(path)?, native, predicted, superposed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_row_per_atom_with_header() {
        let native = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let predicted = [Point3::new(5.0, 5.0, 5.0), Point3::new(5.0, 6.0, 5.0)];
        let superposed = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];

        let mut buffer = Vec::new();
        write_superposition(&mut buffer, &native, &predicted, &superposed).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(lines[2], "1,1.0,0.0,0.0,5.0,6.0,5.0,1.0,0.0,0.0");
    }

    #[test]
    fn empty_sets_write_only_the_header() {
        let mut buffer = Vec::new();
        write_superposition(&mut buffer, &[], &[], &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), format!("{}\n", HEADER.join(",")));
    }
}
