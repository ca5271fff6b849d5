//! Principal component projection of a topic-document matrix onto its two
//! directions of largest variance.
//!
//! Eigenvectors are only defined up to sign. Each component is flipped so its
//! largest-magnitude entry is positive, which makes the output reproducible
//! for a given input; comparisons across implementations should still allow
//! for a per-axis sign flip.

use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

const JACOBI_MAX_SWEEPS: usize = 100;
const JACOBI_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Topic-document matrix is empty ({rows}x{cols})")]
    Empty { rows: usize, cols: usize },
    #[error("Topic-document matrix has a non-finite value at row {row}, column {col}")]
    NonFinite { row: usize, col: usize },
}

/// Output of [`project`].
#[derive(Debug, Clone)]
pub struct Projection {
    /// N x 2 coordinates, PC1 then PC2.
    pub coords: Array2<f64>,
    /// 2 x K principal axes, one per row.
    pub components: Array2<f64>,
    pub explained_variance_ratio: [f64; 2],
}

/// Projects an N x K matrix onto its top two principal components.
///
/// # Errors
/// * `Empty` if the matrix has no rows or no columns.
/// * `NonFinite` at the first NaN or infinite entry in row-major order.
pub fn project(matrix: &Array2<f64>) -> Result<Projection, ProjectionError> {
    let (rows, cols) = matrix.dim();
    if rows == 0 || cols == 0 {
        return Err(ProjectionError::Empty { rows, cols });
    }
    if let Some(((row, col), _)) = matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(ProjectionError::NonFinite { row, col });
    }

    let mean = matrix.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(cols));
    let centered = matrix - &mean.insert_axis(Axis(0));
    let cov = centered.t().dot(&centered) / (rows.saturating_sub(1).max(1) as f64);

    let (eigenvalues, eigenvectors) = symmetric_eigen(cov);
    let mut order = (0..cols).collect::<Vec<_>>();
    // stable sort keeps column order on ties
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    let mut components = Array2::zeros((2, cols));
    let mut top = [0.0; 2];
    for (slot, &idx) in order.iter().take(2).enumerate() {
        let mut axis = eigenvectors.column(idx).to_owned();
        fix_sign(&mut axis);
        components.row_mut(slot).assign(&axis);
        top[slot] = eigenvalues[idx].max(0.0);
    }

    let total: f64 = eigenvalues.iter().map(|v| v.max(0.0)).sum();
    let explained_variance_ratio = if total > 0.0 {
        [top[0] / total, top[1] / total]
    } else {
        [0.0, 0.0]
    };

    let coords = centered.dot(&components.t());
    tracing::debug!(
        rows,
        cols,
        pc1 = explained_variance_ratio[0],
        pc2 = explained_variance_ratio[1],
        "projected topic-document matrix"
    );

    Ok(Projection {
        coords,
        components,
        explained_variance_ratio,
    })
}

/// Flips `axis` so its largest-magnitude entry is positive.
fn fix_sign(axis: &mut Array1<f64>) {
    let pivot = axis
        .iter()
        .copied()
        .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
    if pivot < 0.0 {
        axis.mapv_inplace(|v| -v);
    }
}

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns the eigenvalues and a matrix whose columns are the matching
/// unit eigenvectors.
fn symmetric_eigen(mut a: Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off_diag: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        let scale: f64 = a.iter().map(|x| x * x).sum();
        if off_diag <= JACOBI_TOLERANCE * JACOBI_TOLERANCE * scale.max(f64::MIN_POSITIVE) {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                // smaller root of t^2 + 2*theta*t - 1 = 0
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    /// Either equal or equal after negation, per axis.
    fn assert_equal_up_to_sign(a: &Array2<f64>, b: &Array2<f64>) {
        assert_eq!(a.dim(), b.dim());
        for axis in 0..2 {
            let (x, y) = (a.column(axis), b.column(axis));
            let same = x.iter().zip(y.iter()).all(|(p, q)| (p - q).abs() < 1e-9);
            let flipped = x.iter().zip(y.iter()).all(|(p, q)| (p + q).abs() < 1e-9);
            assert!(same || flipped, "axis {axis} differs beyond sign");
        }
    }

    #[test]
    fn test_output_shape() {
        let data = Array::from_shape_fn((37, 5), |(i, j)| ((i * 7 + j * 13) % 17) as f64 / 17.0);
        let projection = project(&data).unwrap();
        assert_eq!(projection.coords.dim(), (37, 2));
        assert_eq!(projection.components.dim(), (2, 5));
    }

    #[test]
    fn test_deterministic_up_to_sign() {
        let data = Array::from_shape_fn((20, 4), |(i, j)| ((i * 3 + j * j * 5) % 11) as f64);
        let first = project(&data).unwrap();
        let second = project(&data).unwrap();
        assert_equal_up_to_sign(&first.coords, &second.coords);
    }

    #[test]
    fn test_collinear_data_puts_all_variance_on_pc1() {
        let data = array![[0.0, 0.0], [1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let projection = project(&data).unwrap();

        assert_close(projection.explained_variance_ratio[0], 1.0);
        assert_close(projection.explained_variance_ratio[1], 0.0);
        for row in projection.coords.rows() {
            assert_close(row[1], 0.0);
        }

        // distances along the line are preserved
        let step = 5.0_f64.sqrt();
        let pc1 = projection.coords.column(0);
        for i in 1..4 {
            assert_close((pc1[i] - pc1[i - 1]).abs(), step);
        }
    }

    #[test]
    fn test_known_axes() {
        // variance 4 along column 1, variance 1 along column 0
        let data = array![[1.0, 0.0], [-1.0, 0.0], [0.0, 2.0], [0.0, -2.0]];
        let projection = project(&data).unwrap();
        let components = projection.components;
        assert_close(components[[0, 0]].abs(), 0.0);
        assert_close(components[[0, 1]], 1.0);
        assert_close(components[[1, 0]], 1.0);
        assert_close(components[[1, 1]].abs(), 0.0);
        assert_close(projection.coords[[2, 0]], 2.0);
        assert_close(projection.coords[[0, 1]], 1.0);
    }

    #[test]
    fn test_coords_are_centered() {
        let data = Array::from_shape_fn((15, 3), |(i, j)| (i as f64).powi(j as i32 + 1) / 100.0);
        let projection = project(&data).unwrap();
        for axis in projection.coords.columns() {
            assert_close(axis.sum(), 0.0);
        }
    }

    #[test]
    fn test_single_topic_has_flat_second_axis() {
        let data = array![[0.1], [0.5], [0.9]];
        let projection = project(&data).unwrap();
        assert_eq!(projection.coords.dim(), (3, 2));
        assert!(projection.coords.column(1).iter().all(|v| *v == 0.0));
        assert_close(projection.coords[[1, 0]], 0.0);
    }

    #[test]
    fn test_single_document_projects_to_origin() {
        let data = array![[0.2, 0.3, 0.5]];
        let projection = project(&data).unwrap();
        assert!(projection.coords.iter().all(|v| *v == 0.0));
        assert_eq!(projection.explained_variance_ratio, [0.0, 0.0]);
    }

    #[test]
    fn test_empty_matrix_is_rejected() {
        let data = Array2::<f64>::zeros((0, 4));
        assert_eq!(
            project(&data).unwrap_err(),
            ProjectionError::Empty { rows: 0, cols: 4 }
        );
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let data = array![[0.1, 0.2], [0.3, f64::NAN], [f64::INFINITY, 0.0]];
        assert_eq!(
            project(&data).unwrap_err(),
            ProjectionError::NonFinite { row: 1, col: 1 }
        );
    }
}
