//! Triangle index buffers for tessellated grids.

use crate::face::{CubeFace, Orientation};

/// Two triangles per grid cell of an `n × n` patch whose first vertex is `base`.
///
/// Vertex `(u, v)` sits at `base + u·n + v`. Empty when `n < 2`.
pub fn patch_indices(resolution: usize, orientation: Orientation, base: u32) -> Vec<u32> {
    let cells = resolution.saturating_sub(1);
    let n = resolution as u32;
    let mut indices = Vec::with_capacity(cells * cells * 6);

    for u in 0..cells as u32 {
        for v in 0..cells as u32 {
            let ind = base + u * n + v;
            let (ind2, ind3) = match orientation {
                Orientation::Forward => (ind + 1, ind + n),
                Orientation::Reversed => (ind + n, ind + 1),
            };
            let ind4 = ind + n + 1;
            indices.extend_from_slice(&[ind, ind2, ind3, ind2, ind4, ind3]);
        }
    }
    indices
}

/// Indices for the six faces laid out back to back in [`CubeFace::ALL`] order.
pub fn cube_indices(resolution: usize) -> Vec<u32> {
    let per_face = (resolution * resolution) as u32;
    CubeFace::ALL
        .iter()
        .flat_map(|face| patch_indices(resolution, face.orientation(), per_face * face.ordinal() as u32))
        .collect()
}

/// Indices for a closed `n × n` grid: every vertex starts a cell.
///
/// `u` and `v` wrap modulo `n` independently, the same neighbourhood
/// [`grid_normals`](crate::grid::grid_normals) uses with `GridTopology::Wrapped`,
/// so the cell at `(u, n-1)` closes onto column 0 of rows `u` and `u+1`.
pub fn wrapped_indices(resolution: usize) -> Vec<u32> {
    let n = resolution as u32;
    let mut indices = Vec::with_capacity(resolution * resolution * 6);

    for u in 0..n {
        for v in 0..n {
            let at = |du: u32, dv: u32| ((u + du) % n) * n + (v + dv) % n;
            let (ind, ind2, ind3, ind4) = (at(0, 0), at(0, 1), at(1, 0), at(1, 1));
            indices.extend_from_slice(&[ind, ind2, ind3, ind2, ind4, ind3]);
        }
    }
    indices
}
