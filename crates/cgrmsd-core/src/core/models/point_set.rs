use nalgebra::{Point3, Vector3};

/// An ordered sequence of 3D coordinates for a selected subset of atoms.
///
/// The i-th point of two point sets being compared must describe the same physical atom.
/// That correspondence is never checked during alignment; the optional atom names recorded at
/// extraction time only serve the strict validation mode of the batch evaluator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point3<f64>>,
    atom_names: Vec<String>,
}

impl PointSet {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self {
            points,
            atom_names: Vec::new(),
        }
    }

    pub fn from_coords(coords: &[[f64; 3]]) -> Self {
        Self::new(coords.iter().map(|&c| Point3::from(c)).collect())
    }

    pub(crate) fn push_named(&mut self, point: Point3<f64>, name: &str) {
        self.points.push(point);
        self.atom_names.push(name.to_string());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Atom names in point order, or `None` if the set was built from bare coordinates.
    pub fn atom_names(&self) -> Option<&[String]> {
        if self.atom_names.is_empty() && !self.points.is_empty() {
            None
        } else {
            Some(&self.atom_names)
        }
    }

    /// Arithmetic mean of all points; `None` for an empty set.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.points.iter().map(|p| p.coords).sum();
        Some(Point3::from(sum / self.points.len() as f64))
    }

    /// Points with the centroid subtracted, as displacement vectors.
    pub fn centered(&self) -> Vec<Vector3<f64>> {
        match self.centroid() {
            Some(center) => self.points.iter().map(|p| p - center).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_empty_set_is_none() {
        assert!(PointSet::default().centroid().is_none());
        assert!(PointSet::default().centered().is_empty());
    }

    #[test]
    fn centroid_is_mean_of_points() {
        let set = PointSet::from_coords(&[[0.0, 0.0, 0.0], [2.0, 4.0, 6.0]]);
        assert_eq!(set.centroid(), Some(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn centered_points_sum_to_zero() {
        let set = PointSet::from_coords(&[[1.0, 2.0, 3.0], [4.0, -1.0, 0.5], [7.0, 7.0, 7.0]]);
        let sum: Vector3<f64> = set.centered().iter().sum();
        assert!(sum.norm() < 1e-12);
    }

    #[test]
    fn bare_point_set_has_no_atom_names() {
        let set = PointSet::from_coords(&[[0.0, 0.0, 0.0]]);
        assert!(set.atom_names().is_none());
    }

    #[test]
    fn named_points_keep_insertion_order() {
        let mut set = PointSet::default();
        set.push_named(Point3::new(1.0, 0.0, 0.0), "P");
        set.push_named(Point3::new(2.0, 0.0, 0.0), "C5'");
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.atom_names(),
            Some(&["P".to_string(), "C5'".to_string()][..])
        );
    }
}
