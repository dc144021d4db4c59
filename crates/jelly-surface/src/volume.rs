//! Surfaces embedded in the lattice volume.
//!
//! A [`VolumeDomain`] holds sample positions in the unit cube together with a
//! reference normal per sample. Mapping every sample through the tricubic
//! volume bends the surface along with the lattice.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use jelly_math::Vec3;
use jelly_types::constants::{LATTICE_POINT_COUNT, NORMAL_OFFSET};
use jelly_types::{JellyError, JellyResult};

use crate::grid::{grid_normals, GridTopology, SurfaceMesh};
use crate::indices::wrapped_indices;
use crate::patch::TricubicVolume;

/// How normals of a deformed volume surface are estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolumeNormals {
    /// `normalize(f(p) - f(p - NORMAL_OFFSET · n))` with the domain's reference normal `n`.
    #[default]
    OffsetDerivative,
    /// Wrapped finite differences over the deformed grid, oriented to agree
    /// with the reference normal. Needs a grid domain.
    GridDifference,
}

/// Sample points in `[0, 1]³` with reference normals and a triangle list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDomain {
    samples: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    grid_resolution: Option<usize>,
}

impl VolumeDomain {
    /// Sphere of radius 0.5 centred in the unit cube, sampled on an `n × n`
    /// angle grid with steps of `2π / n`.
    ///
    /// ```text
    /// y = sin(a)/2 + 0.5
    /// x = cos(a)·sin(b)/2 + 0.5
    /// z = cos(a)·cos(b)/2 + 0.5
    /// ```
    pub fn sphere(resolution: usize) -> Self {
        let n = resolution;
        let angles: Vec<(f32, f32)> = (0..n)
            .map(|i| {
                let angle = i as f64 * 2.0 * std::f64::consts::PI / n as f64;
                (angle.sin() as f32, angle.cos() as f32)
            })
            .collect();

        let mut samples = Vec::with_capacity(n * n);
        let mut normals = Vec::with_capacity(n * n);
        for &(sin_a, cos_a) in &angles {
            let y = sin_a / 2.0 + 0.5;
            for &(sin_b, cos_b) in &angles {
                let z = cos_a * cos_b / 2.0 + 0.5;
                let x = cos_a * sin_b / 2.0 + 0.5;
                let p = Vec3::new(x, y, z);
                samples.push(p);
                normals.push((p - Vec3::splat(0.5)).normalize_or_zero());
            }
        }

        Self {
            samples,
            normals,
            indices: wrapped_indices(n),
            grid_resolution: Some(n),
        }
    }

    /// Fits an external point set into the unit cube.
    ///
    /// Points are scaled by the largest bounding-box extent and then shifted
    /// so their mean sits at `(0.5, 0.5, 0.5)`. Normals are kept as given.
    pub fn from_points(points: &[Vec3], normals: &[Vec3], indices: Vec<u32>) -> JellyResult<Self> {
        if points.is_empty() {
            return Err(JellyError::InvalidSurface("Domain has no points".into()));
        }
        if normals.len() != points.len() {
            return Err(JellyError::InvalidSurface(format!(
                "{} normals for {} points",
                normals.len(),
                points.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= points.len()) {
            return Err(JellyError::InvalidSurface(format!(
                "Index {bad} out of range for {} points",
                points.len()
            )));
        }

        let min = points.iter().fold(Vec3::splat(f32::INFINITY), |acc, p| acc.min(*p));
        let max = points.iter().fold(Vec3::splat(f32::NEG_INFINITY), |acc, p| acc.max(*p));
        let extent = (max - min).max_element();
        if !extent.is_finite() || extent <= 0.0 {
            return Err(JellyError::InvalidSurface(format!(
                "Domain extent {extent} is degenerate"
            )));
        }

        let scaled: Vec<Vec3> = points.iter().map(|p| (*p - min) / extent).collect();
        let mean = scaled.iter().fold(Vec3::ZERO, |acc, p| acc + *p) / scaled.len() as f32;
        let shift = mean - Vec3::splat(0.5);
        let samples = scaled.into_iter().map(|p| p - shift).collect();

        Ok(Self {
            samples,
            normals: normals.to_vec(),
            indices,
            grid_resolution: None,
        })
    }

    #[inline]
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// `Some(n)` for domains laid out as a row-major `n × n` grid.
    #[inline]
    pub fn grid_resolution(&self) -> Option<usize> {
        self.grid_resolution
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Maps every domain sample through the tricubic volume of `grid`.
///
/// Samples are independent and evaluated in parallel.
pub fn evaluate_volume_surface(
    grid: &[Vec3; LATTICE_POINT_COUNT],
    domain: &VolumeDomain,
    mode: VolumeNormals,
) -> JellyResult<SurfaceMesh> {
    let volume = TricubicVolume::from_lattice(grid);

    let (positions, normals): (Vec<Vec3>, Vec<Vec3>) = match mode {
        VolumeNormals::OffsetDerivative => domain
            .samples
            .par_iter()
            .zip(domain.normals.par_iter())
            .map(|(&p, &n)| {
                let point = volume.evaluate(p);
                let inner = volume.evaluate(p - NORMAL_OFFSET * n);
                (point, (point - inner).normalize_or_zero())
            })
            .unzip(),
        VolumeNormals::GridDifference => {
            let Some(n) = domain.grid_resolution else {
                return Err(JellyError::InvalidSurface(
                    "Grid-difference normals need a grid domain".into(),
                ));
            };
            let positions: Vec<Vec3> = domain.samples.par_iter().map(|&p| volume.evaluate(p)).collect();
            let normals = grid_normals(&positions, n, GridTopology::Wrapped)
                .into_iter()
                .zip(&domain.normals)
                .map(|(normal, reference)| {
                    if normal.dot(*reference) < 0.0 {
                        -normal
                    } else {
                        normal
                    }
                })
                .collect();
            (positions, normals)
        }
    };

    tracing::trace!(samples = domain.len(), ?mode, "volume surface evaluated");

    Ok(SurfaceMesh {
        positions,
        normals,
        indices: domain.indices.clone(),
    })
}
