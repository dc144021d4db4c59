//! Uniform sampling of the unit parameter interval.

/// Parameter value of sample `i` out of `n` uniform samples over `[0, 1]`.
///
/// Sample `0` maps to exactly `0.0` and sample `n - 1` to exactly `1.0`.
/// With fewer than two samples there is no spacing and every sample sits at `0.0`.
#[inline]
pub fn sample_parameter(i: usize, n: usize) -> f32 {
    if n < 2 {
        return 0.0;
    }
    i as f32 / (n - 1) as f32
}
