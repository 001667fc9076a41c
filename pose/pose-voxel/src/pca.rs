//! Symmetric 3x3 eigen-decomposition and linearity scoring.

use nalgebra::Matrix3;
use pose_types::Vector3;

/// Eigen-decompose a symmetric 3x3 matrix, eigenvalues sorted descending.
///
/// Returns `(eigenvalues, eigenvectors)` with `eigenvalues[0] >=
/// eigenvalues[1] >= eigenvalues[2]` and `eigenvectors[i]` the unit vector
/// for `eigenvalues[i]`.
///
/// Degenerate contract: a (near-)zero matrix yields zero eigenvalues and
/// the canonical basis, never NaN. Callers rely on this when a voxel's
/// members are coincident.
#[must_use]
pub fn symmetric_eigen3(matrix: &Matrix3<f64>) -> ([f64; 3], [Vector3<f64>; 3]) {
    if matrix.norm() < f64::EPSILON {
        return (
            [0.0; 3],
            [Vector3::x(), Vector3::y(), Vector3::z()],
        );
    }

    let eigen = matrix.symmetric_eigen();
    let mut order = [0usize, 1, 2];
    order.sort_unstable_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let values = [
        eigen.eigenvalues[order[0]],
        eigen.eigenvalues[order[1]],
        eigen.eigenvalues[order[2]],
    ];
    let vectors = [
        eigen.eigenvectors.column(order[0]).into_owned(),
        eigen.eigenvectors.column(order[1]).into_owned(),
        eigen.eigenvectors.column(order[2]).into_owned(),
    ];
    (values, vectors)
}

/// Linearity score of a descending eigenvalue triple.
///
/// `(lambda1 - lambda2) / lambda1`, or zero when `lambda1 <= 0`. Near 1
/// means the samples concentrate along a single line; near 0 means they
/// spread isotropically or across a plane.
#[must_use]
pub fn linearity(eigenvalues: &[f64; 3]) -> f64 {
    if eigenvalues[0] > 0.0 {
        (eigenvalues[0] - eigenvalues[1]) / eigenvalues[0]
    } else {
        0.0
    }
}
