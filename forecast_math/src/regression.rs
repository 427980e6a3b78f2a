//! Ordinary least squares on a dense design matrix
//!
//! The normal equations `X'X β = X'y` are solved by inverting `X'X` with
//! Gauss-Jordan elimination. The inverse is kept because prediction
//! intervals need `x' (X'X)^-1 x` for every evaluated row. Models in this
//! crate have at most a dozen parameters, so the cubic cost is irrelevant.

use crate::{MathError, Result};

/// Pivots smaller than this fraction of the largest diagonal entry are
/// treated as zero.
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// A fitted linear least-squares regression
#[derive(Debug, Clone)]
pub struct LeastSquares {
    coefficients: Vec<f64>,
    xtx_inverse: Vec<Vec<f64>>,
    residual_variance: f64,
    observations: usize,
}

impl LeastSquares {
    /// Fit `targets ≈ design · β`.
    ///
    /// Every row of `design` must have the same, non-zero width and there
    /// must be at least as many rows as columns.
    pub fn fit(design: &[Vec<f64>], targets: &[f64]) -> Result<Self> {
        if design.len() != targets.len() {
            return Err(MathError::InvalidInput(format!(
                "Design matrix has {} rows but {} targets were given",
                design.len(),
                targets.len()
            )));
        }

        let width = match design.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => {
                return Err(MathError::InsufficientData(
                    "Design matrix is empty".to_string(),
                ))
            }
        };

        if design.iter().any(|row| row.len() != width) {
            return Err(MathError::InvalidInput(
                "Design matrix rows have different widths".to_string(),
            ));
        }

        if design.len() < width {
            return Err(MathError::InsufficientData(format!(
                "Need at least {} observations to estimate {} parameters, got {}",
                width,
                width,
                design.len()
            )));
        }

        let mut xtx = vec![vec![0.0; width]; width];
        let mut xty = vec![0.0; width];
        for (row, &y) in design.iter().zip(targets) {
            for i in 0..width {
                xty[i] += row[i] * y;
                for j in 0..width {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        let xtx_inverse = invert(&xtx)?;
        let coefficients: Vec<f64> = xtx_inverse
            .iter()
            .map(|inv_row| inv_row.iter().zip(&xty).map(|(a, b)| a * b).sum())
            .collect();

        let ssr: f64 = design
            .iter()
            .zip(targets)
            .map(|(row, &y)| {
                let fitted: f64 = row.iter().zip(&coefficients).map(|(x, b)| x * b).sum();
                (y - fitted).powi(2)
            })
            .sum();

        let dof = design.len() - width;
        let residual_variance = if dof > 0 { ssr / dof as f64 } else { 0.0 };

        Ok(Self {
            coefficients,
            xtx_inverse,
            residual_variance,
            observations: design.len(),
        })
    }

    /// Estimated coefficients, in design column order
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Unbiased residual variance; zero when the fit is exactly determined
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// Number of rows the model was fitted on
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Evaluate the fitted linear predictor at `row`
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        self.check_width(row)?;
        Ok(row.iter().zip(&self.coefficients).map(|(x, b)| x * b).sum())
    }

    /// Standard error of a new observation at `row`:
    /// `sigma * sqrt(1 + x' (X'X)^-1 x)`
    pub fn prediction_std_error(&self, row: &[f64]) -> Result<f64> {
        self.check_width(row)?;

        let leverage: f64 = self
            .xtx_inverse
            .iter()
            .zip(row)
            .map(|(inv_row, xi)| xi * inv_row.iter().zip(row).map(|(a, xj)| a * xj).sum::<f64>())
            .sum();

        Ok((self.residual_variance * (1.0 + leverage.max(0.0))).sqrt())
    }

    fn check_width(&self, row: &[f64]) -> Result<()> {
        if row.len() != self.coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "Expected {} regressors, got {}",
                self.coefficients.len(),
                row.len()
            )));
        }
        Ok(())
    }
}

/// Invert a square matrix using Gauss-Jordan elimination with partial pivoting
pub fn invert(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let n = matrix.len();
    if n == 0 || matrix.iter().any(|row| row.len() != n) {
        return Err(MathError::InvalidInput(
            "Matrix must be square and non-empty".to_string(),
        ));
    }

    let scale = (0..n).map(|i| matrix[i][i].abs()).fold(0.0, f64::max);
    if scale == 0.0 {
        return Err(MathError::CalculationError(
            "Design matrix is singular: all columns are zero".to_string(),
        ));
    }
    let tolerance = SINGULAR_TOLERANCE * scale;

    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut inv: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .unwrap_or(col);

        if a[pivot_row][col].abs() < tolerance {
            return Err(MathError::CalculationError(
                "Design matrix is singular: the data does not vary enough to fit the model"
                    .to_string(),
            ));
        }

        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = a[col][col];
        for j in 0..n {
            a[col][j] /= pivot;
            inv[col][j] /= pivot;
        }

        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = a[r][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[r][j] -= factor * a[col][j];
                inv[r][j] -= factor * inv[col][j];
            }
        }
    }

    Ok(inv)
}
