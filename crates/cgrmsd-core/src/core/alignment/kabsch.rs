use crate::core::models::point_set::PointSet;
use nalgebra::{Matrix3, Point3, Rotation3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AlignmentError {
    #[error("Shape mismatch: reference has {reference} points, candidate has {candidate}")]
    ShapeMismatch { reference: usize, candidate: usize },

    #[error("Singular value decomposition of the covariance matrix did not converge")]
    DecompositionFailed,
}

/// The outcome of superposing a candidate point set onto a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// Proper rotation taking centered candidate points into the reference frame.
    pub rotation: Rotation3<f64>,
    /// Minimized sum of squared deviations over all point pairs, never negative.
    pub residual: f64,
    pub reference_centroid: Point3<f64>,
    pub candidate_centroid: Point3<f64>,
}

impl AlignmentResult {
    fn identity(reference_centroid: Point3<f64>, candidate_centroid: Point3<f64>) -> Self {
        Self {
            rotation: Rotation3::identity(),
            residual: 0.0,
            reference_centroid,
            candidate_centroid,
        }
    }

    /// Translation applied after the rotation: `x' = R·x + t`.
    pub fn translation(&self) -> Vector3<f64> {
        self.reference_centroid - self.rotation * self.candidate_centroid
    }

    /// Maps candidate points onto the reference frame with the solved transform.
    pub fn superpose(&self, candidate: &PointSet) -> Vec<Point3<f64>> {
        let rotation = &self.rotation;
        candidate
            .points()
            .iter()
            .map(|p| self.reference_centroid + rotation * (p - self.candidate_centroid))
            .collect()
    }
}

/// Solves for the rotation `R` minimizing `Σ ‖a_i − R·b_i‖²` over centered points.
///
/// `reference` (`a`) stays fixed; `candidate` (`b`) is the mobile set. Both are centered
/// before solving, so translation never contributes to the residual.
///
/// Sets with fewer than two points have no meaningful rotation: the identity is returned with
/// a zero residual. Collinear sets are solved normally; any rotation about the common axis is
/// equally optimal and the residual is unaffected by the choice.
///
/// # Errors
///
/// Returns [`AlignmentError::ShapeMismatch`] if the sets differ in length and
/// [`AlignmentError::DecompositionFailed`] if the SVD yields no singular vectors.
pub fn align(reference: &PointSet, candidate: &PointSet) -> Result<AlignmentResult, AlignmentError> {
    if reference.len() != candidate.len() {
        return Err(AlignmentError::ShapeMismatch {
            reference: reference.len(),
            candidate: candidate.len(),
        });
    }

    let (Some(ref_center), Some(cand_center)) = (reference.centroid(), candidate.centroid())
    else {
        return Ok(AlignmentResult::identity(Point3::origin(), Point3::origin()));
    };
    if reference.len() == 1 {
        return Ok(AlignmentResult::identity(ref_center, cand_center));
    }

    let ref_centered = reference.centered();
    let cand_centered = candidate.centered();

    let mut covariance = Matrix3::zeros();
    for (a, b) in ref_centered.iter().zip(cand_centered.iter()) {
        covariance += a * b.transpose();
    }

    let rotation = optimal_rotation(&covariance)?;
    let residual = sum_squared_deviation(&ref_centered, &cand_centered, &rotation);

    Ok(AlignmentResult {
        rotation,
        residual,
        reference_centroid: ref_center,
        candidate_centroid: cand_center,
    })
}

fn optimal_rotation(covariance: &Matrix3<f64>) -> Result<Rotation3<f64>, AlignmentError> {
    let svd = covariance.svd(true, true);
    let u = svd.u.ok_or(AlignmentError::DecompositionFailed)?;
    let v_t = svd.v_t.ok_or(AlignmentError::DecompositionFailed)?;

    // Singular values come sorted in descending order, so the reflection correction flips the
    // axis of the smallest one.
    let mut rotation = u * v_t;
    if rotation.determinant() < 0.0 {
        let mut correction = Matrix3::identity();
        correction[(2, 2)] = -1.0;
        rotation = u * correction * v_t;
    }

    Ok(Rotation3::from_matrix_unchecked(rotation))
}

fn sum_squared_deviation(
    reference: &[Vector3<f64>],
    candidate: &[Vector3<f64>],
    rotation: &Rotation3<f64>,
) -> f64 {
    reference
        .iter()
        .zip(candidate.iter())
        .map(|(a, b)| (a - rotation * b).norm_squared())
        .sum::<f64>()
        .max(0.0)
}
