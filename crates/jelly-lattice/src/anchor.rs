//! Anchor controllers.
//!
//! The eight anchors are the only way the outside world pushes on the body.
//! A controller produces their positions once per frame; the body copies
//! them in before stepping.

use jelly_math::{Mat4, Vec3};
use jelly_types::constants::ANCHOR_COUNT;

/// Reference control cube corners with half-extent `half`.
///
/// Corner `n` has bit 2 → x, bit 1 → y, bit 0 → z (set bit = `+half`), so
/// corner 0 is the minimum and corner 7 the maximum. This is the order
/// [`SoftBody::new`](crate::SoftBody::new) expects.
pub fn control_cube_corners(half: f32) -> [Vec3; ANCHOR_COUNT] {
    let mut corners = [Vec3::ZERO; ANCHOR_COUNT];
    for (n, c) in corners.iter_mut().enumerate() {
        let sign = |bit: usize| if n & (1 << bit) != 0 { half } else { -half };
        *c = Vec3::new(sign(2), sign(1), sign(0));
    }
    corners
}

/// Source of anchor positions.
pub trait AnchorController: Send {
    /// Anchor positions for the frame about to be simulated.
    fn anchor_positions(&mut self, dt: f32) -> [Vec3; ANCHOR_COUNT];

    /// Returns the controller's name.
    fn name(&self) -> &str;
}

/// Anchors that never move.
#[derive(Debug, Clone)]
pub struct FixedAnchors {
    positions: [Vec3; ANCHOR_COUNT],
}

impl FixedAnchors {
    pub fn new(positions: [Vec3; ANCHOR_COUNT]) -> Self {
        Self { positions }
    }
}

impl AnchorController for FixedAnchors {
    fn anchor_positions(&mut self, _dt: f32) -> [Vec3; ANCHOR_COUNT] {
        self.positions
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Base corners carried through an affine transform.
///
/// Whoever owns the controller (camera input, a scripted scenario) updates
/// `transform`; each frame the anchors are the base corners mapped through it.
/// An optional motion increment is composed onto the transform every frame.
#[derive(Debug, Clone)]
pub struct TransformedAnchors {
    base: [Vec3; ANCHOR_COUNT],
    pub transform: Mat4,
    motion: Option<MotionFn>,
}

/// Per-frame transform increment as a function of `dt`.
pub type MotionFn = fn(f32) -> Mat4;

impl TransformedAnchors {
    pub fn new(base: [Vec3; ANCHOR_COUNT]) -> Self {
        Self {
            base,
            transform: Mat4::IDENTITY,
            motion: None,
        }
    }

    /// Composes `motion(dt)` onto the transform before each frame.
    pub fn with_motion(mut self, motion: MotionFn) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Replaces the transform.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Base corners mapped through the current transform.
    pub fn current(&self) -> [Vec3; ANCHOR_COUNT] {
        self.base.map(|c| self.transform.transform_point3(c))
    }
}

impl AnchorController for TransformedAnchors {
    fn anchor_positions(&mut self, dt: f32) -> [Vec3; ANCHOR_COUNT] {
        if let Some(motion) = self.motion {
            self.transform = motion(dt) * self.transform;
        }
        self.current()
    }

    fn name(&self) -> &str {
        "transformed"
    }
}
