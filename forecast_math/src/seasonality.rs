//! Fourier basis for periodic components

use std::f64::consts::PI;

/// Fourier regressors `[cos(2π·1·t/P), sin(2π·1·t/P), ..., cos(2π·K·t/P), sin(2π·K·t/P)]`
pub fn fourier_terms(t: f64, period: f64, order: usize) -> Vec<f64> {
    let mut terms = Vec::with_capacity(2 * order);
    for k in 1..=order {
        let angle = 2.0 * PI * k as f64 * t / period;
        terms.push(angle.cos());
        terms.push(angle.sin());
    }
    terms
}

/// Highest Fourier order that stays identifiable on an integer time grid.
///
/// At `k = P / 2` the sine column is identically zero on integer `t`, so the
/// order is kept strictly below the Nyquist limit.
pub fn max_fourier_order(period: f64) -> usize {
    if period < 3.0 {
        return 0;
    }
    ((period - 1.0) / 2.0).floor() as usize
}
