use crate::core::models::point_set::PointSet;
use crate::core::models::selector::AtomSelector;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for extracting selected atom coordinates from a structure format.
///
/// Implementors handle the format-specific record layout; the caller only sees an ordered
/// [`PointSet`]. Extraction is all-or-nothing: a single malformed selected record fails the
/// whole read.
pub trait StructureFile {
    /// The error type for extraction.
    type Error: Error + From<io::Error>;

    /// Reads the coordinates of every record accepted by `selector`, in file order.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `selector` - The atom filter deciding which records contribute points.
    ///
    /// # Return
    ///
    /// Returns the extracted point set, which may be empty if no record matched.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be parsed or the reader fails.
    fn read_coordinates(
        reader: &mut impl BufRead,
        selector: &AtomSelector,
    ) -> Result<PointSet, Self::Error>;

    /// Builds the error reported when the input file does not exist.
    fn not_found(path: &Path) -> Self::Error;

    /// Reads the coordinates of every record accepted by `selector` from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`StructureFile::not_found`] if the file is missing, or any error raised by
    /// [`StructureFile::read_coordinates`].
    fn read_coordinates_from_path<P: AsRef<Path>>(
        path: P,
        selector: &AtomSelector,
    ) -> Result<PointSet, Self::Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Self::not_found(path),
            _ => e.into(),
        })?;
        let mut reader = BufReader::new(file);
        Self::read_coordinates(&mut reader, selector)
    }

    /// Reads coordinates from structure text held in memory.
    fn read_coordinates_from_str(
        content: &str,
        selector: &AtomSelector,
    ) -> Result<PointSet, Self::Error> {
        let mut reader = content.as_bytes();
        Self::read_coordinates(&mut reader, selector)
    }
}
