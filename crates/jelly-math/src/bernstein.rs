//! Cubic Bernstein polynomials.
//!
//! ```text
//! B0(t) = (1 - t)³
//! B1(t) = 3t(1 - t)²
//! B2(t) = 3t²(1 - t)
//! B3(t) = t³
//! ```

use crate::sampling::sample_parameter;

/// Evaluates the cubic Bernstein polynomial `B_index(t)`.
///
/// Indices outside `0..=3` contribute nothing and return `0.0`.
#[inline]
pub fn bernstein(index: usize, t: f32) -> f32 {
    let s = 1.0 - t;
    match index {
        0 => s * s * s,
        1 => 3.0 * t * s * s,
        2 => 3.0 * t * t * s,
        3 => t * t * t,
        _ => 0.0,
    }
}

/// All four basis values at `t`.
#[inline]
pub fn bernstein_basis(t: f32) -> [f32; 4] {
    [bernstein(0, t), bernstein(1, t), bernstein(2, t), bernstein(3, t)]
}

/// Basis values precomputed at `n` uniform samples of `[0, 1]`.
///
/// Tessellating a patch at resolution `n` reads the same `n × 4` values for
/// both parametric axes and for every face, so they are computed once.
#[derive(Debug, Clone)]
pub struct BernsteinTable {
    values: Vec<[f32; 4]>,
}

impl BernsteinTable {
    /// Builds the table for `n` samples.
    pub fn new(n: usize) -> Self {
        let values = (0..n)
            .map(|i| bernstein_basis(sample_parameter(i, n)))
            .collect();
        Self { values }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Basis values at sample `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f32; 4] {
        &self.values[i]
    }
}
