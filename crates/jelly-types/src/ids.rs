//! Strongly-typed identifiers for lattice entities.
//!
//! The lattice is a dense arena: lattice points occupy slots `0..64` in
//! flat `(i, j, k)` order and the eight anchors occupy slots `64..72`.
//! Newtypes keep arena slots, anchor numbers and grid coordinates apart.

use serde::{Deserialize, Serialize};

use crate::constants::{ANCHOR_COUNT, LATTICE_DIM, LATTICE_POINT_COUNT};

/// Slot in the lattice point arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u16);

/// One of the eight external anchor points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(pub u8);

/// Grid coordinate `(i, j, k) ∈ [0, 3]³` of a lattice point.
///
/// `i` runs along X, `j` along Y and `k` along Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticeIndex {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl PointId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this slot holds an anchor rather than a lattice point.
    #[inline]
    pub fn is_anchor(self) -> bool {
        self.index() >= LATTICE_POINT_COUNT
    }
}

impl AnchorId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Arena slot occupied by this anchor.
    #[inline]
    pub fn point_id(self) -> PointId {
        PointId((LATTICE_POINT_COUNT + self.index()) as u16)
    }

    /// Iterates all eight anchors in order.
    pub fn all() -> impl Iterator<Item = AnchorId> {
        (0..ANCHOR_COUNT as u8).map(AnchorId)
    }
}

impl LatticeIndex {
    /// Creates a grid coordinate. Components must lie in `0..4`.
    #[inline]
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        debug_assert!(i < LATTICE_DIM && j < LATTICE_DIM && k < LATTICE_DIM);
        Self { i, j, k }
    }

    /// Flat index `16·i + 4·j + k`.
    #[inline]
    pub fn flat(self) -> usize {
        self.i * LATTICE_DIM * LATTICE_DIM + self.j * LATTICE_DIM + self.k
    }

    /// Inverse of [`flat`](Self::flat).
    #[inline]
    pub fn from_flat(flat: usize) -> Self {
        debug_assert!(flat < LATTICE_POINT_COUNT);
        Self {
            i: flat / (LATTICE_DIM * LATTICE_DIM),
            j: (flat / LATTICE_DIM) % LATTICE_DIM,
            k: flat % LATTICE_DIM,
        }
    }

    /// Arena slot of the lattice point at this coordinate.
    #[inline]
    pub fn point_id(self) -> PointId {
        PointId(self.flat() as u16)
    }

    /// True when every component is 0 or 3.
    pub fn is_corner(self) -> bool {
        let last = LATTICE_DIM - 1;
        [self.i, self.j, self.k].iter().all(|&c| c == 0 || c == last)
    }

    /// Anchor attached to this corner: bit 2 ← i, bit 1 ← j, bit 0 ← k.
    ///
    /// Returns `None` for non-corner coordinates.
    pub fn corner_anchor(self) -> Option<AnchorId> {
        if !self.is_corner() {
            return None;
        }
        let last = LATTICE_DIM - 1;
        let bits = (self.i / last) << 2 | (self.j / last) << 1 | (self.k / last);
        Some(AnchorId(bits as u8))
    }

    /// Iterates every coordinate in flat order.
    pub fn all() -> impl Iterator<Item = LatticeIndex> {
        (0..LATTICE_POINT_COUNT).map(LatticeIndex::from_flat)
    }
}

impl From<u16> for PointId {
    fn from(val: u16) -> Self {
        Self(val)
    }
}

impl From<LatticeIndex> for PointId {
    fn from(val: LatticeIndex) -> Self {
        val.point_id()
    }
}

impl From<AnchorId> for PointId {
    fn from(val: AnchorId) -> Self {
        val.point_id()
    }
}
