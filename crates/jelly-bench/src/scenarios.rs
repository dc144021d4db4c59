//! Benchmark scenarios: initial cube, anchor script and run length.
//!
//! 1. **Rest**: untouched cube with fixed anchors; must stay put
//! 2. **Disturbed**: seeded random deformation, then relax
//! 3. **Squeeze**: anchors pulled toward the centre
//! 4. **Spin**: anchors rotated about Y every frame
//! 5. **WallPush**: anchors moved past the bounding box

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use jelly_lattice::{control_cube_corners, AnchorController, FixedAnchors, PhysicsConfig, TransformedAnchors};
use jelly_math::{Mat4, Vec3};
use jelly_types::constants::{ANCHOR_COUNT, DEFAULT_DT};
use jelly_types::JellyError;

/// Angular speed of the spin scenario (rad/s).
pub const SPIN_RATE: f32 = 1.5;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Rest,
    Disturbed,
    Squeeze,
    Spin,
    WallPush,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::Rest,
            ScenarioKind::Disturbed,
            ScenarioKind::Squeeze,
            ScenarioKind::Spin,
            ScenarioKind::WallPush,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Rest => "rest",
            ScenarioKind::Disturbed => "disturbed",
            ScenarioKind::Squeeze => "squeeze",
            ScenarioKind::Spin => "spin",
            ScenarioKind::WallPush => "wall_push",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = JellyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::all()
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                JellyError::InvalidConfig(format!("Unknown scenario '{s}', expected one of: {}", names.join(", ")))
            })
    }
}

/// How the anchors move during a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorMotion {
    /// Anchors stay at the initial corners.
    Fixed,
    /// Corners mapped once through a fixed transform.
    Static(Mat4),
    /// Corners rotated about Y by `SPIN_RATE · dt` every frame.
    Spin,
}

fn spin_increment(dt: f32) -> Mat4 {
    Mat4::from_rotation_y(SPIN_RATE * dt)
}

/// A fully specified scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    /// Initial control cube, also the base anchor positions.
    pub corners: [Vec3; ANCHOR_COUNT],
    pub config: PhysicsConfig,
    pub motion: AnchorMotion,
    /// Seed for a single `disturb` before the first step.
    pub disturb_seed: Option<u64>,
    pub timesteps: u32,
    pub dt: f32,
}

impl Scenario {
    fn base(kind: ScenarioKind) -> Self {
        Self {
            kind,
            corners: control_cube_corners(5.0),
            config: PhysicsConfig::default(),
            motion: AnchorMotion::Fixed,
            disturb_seed: None,
            timesteps: 240,
            dt: DEFAULT_DT,
        }
    }

    /// Undisturbed reference cube; four seconds at 60 fps.
    pub fn rest() -> Self {
        Self::base(ScenarioKind::Rest)
    }

    /// Seeded deformation of strength 3, left to relax.
    pub fn disturbed() -> Self {
        Self {
            config: PhysicsConfig {
                deformation_constant: 3.0,
                ..Default::default()
            },
            disturb_seed: Some(0x5eed),
            timesteps: 600,
            ..Self::base(ScenarioKind::Disturbed)
        }
    }

    /// Anchors scaled to 60% about the origin.
    pub fn squeeze() -> Self {
        Self {
            motion: AnchorMotion::Static(Mat4::from_scale(Vec3::splat(0.6))),
            ..Self::base(ScenarioKind::Squeeze)
        }
    }

    /// Anchors spinning about Y.
    pub fn spin() -> Self {
        Self {
            motion: AnchorMotion::Spin,
            config: PhysicsConfig::wobbly(),
            ..Self::base(ScenarioKind::Spin)
        }
    }

    /// Anchors shifted 8 units along +X so the cube presses into the wall.
    pub fn wall_push() -> Self {
        Self {
            motion: AnchorMotion::Static(Mat4::from_translation(Vec3::new(8.0, 0.0, 0.0))),
            config: PhysicsConfig {
                collision_elasticity: 0.5,
                ..Default::default()
            },
            ..Self::base(ScenarioKind::WallPush)
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Rest => Self::rest(),
            ScenarioKind::Disturbed => Self::disturbed(),
            ScenarioKind::Squeeze => Self::squeeze(),
            ScenarioKind::Spin => Self::spin(),
            ScenarioKind::WallPush => Self::wall_push(),
        }
    }

    pub fn with_timesteps(mut self, timesteps: u32) -> Self {
        self.timesteps = timesteps;
        self
    }

    /// Builds the anchor controller for this scenario.
    pub fn controller(&self) -> Box<dyn AnchorController> {
        match self.motion {
            AnchorMotion::Fixed => Box::new(FixedAnchors::new(self.corners)),
            AnchorMotion::Static(transform) => {
                let mut anchors = TransformedAnchors::new(self.corners);
                anchors.set_transform(transform);
                Box::new(anchors)
            }
            AnchorMotion::Spin => Box::new(TransformedAnchors::new(self.corners).with_motion(spin_increment)),
        }
    }
}
