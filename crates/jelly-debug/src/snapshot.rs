//! Lattice snapshots for replay and debugging.
//!
//! A snapshot holds everything needed to resume a run bit for bit: step
//! counters, the 64 lattice positions and velocities, the 8 anchor positions
//! and the physics configuration in effect.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use jelly_lattice::{PhysicsConfig, SoftBody};
use jelly_math::Vec3;
use jelly_types::constants::{ANCHOR_COUNT, LATTICE_POINT_COUNT};
use jelly_types::{JellyError, JellyResult};

/// Full soft-body state at one step. Serialized with `bincode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeSnapshot {
    pub timestep: u32,
    pub sim_time: f64,
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub anchors: Vec<Vec3>,
    pub config: PhysicsConfig,
}

/// Largest per-point differences between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotDiff {
    pub max_position_delta: f32,
    pub max_velocity_delta: f32,
    /// Lattice point with the largest position delta.
    pub worst_point: usize,
}

impl LatticeSnapshot {
    pub fn capture(body: &SoftBody) -> Self {
        let lattice = body.lattice();
        Self {
            timestep: body.timestep(),
            sim_time: body.sim_time(),
            positions: lattice.positions().to_vec(),
            velocities: lattice.velocities().to_vec(),
            anchors: lattice.anchor_positions().to_vec(),
            config: body.config().clone(),
        }
    }

    /// Restores this state into `body`.
    ///
    /// Every check runs before anything is written; on error `body` is untouched.
    pub fn apply(&self, body: &mut SoftBody) -> JellyResult<()> {
        let anchors: [Vec3; ANCHOR_COUNT] = self.anchors.as_slice().try_into().map_err(|_| {
            JellyError::InvalidLattice(format!(
                "Snapshot has {} anchors, expected {}",
                self.anchors.len(),
                ANCHOR_COUNT
            ))
        })?;
        self.check_point_counts()?;
        body.set_config(self.config.clone())?;
        body.restore_state(self.timestep, self.sim_time, &self.positions, &self.velocities, anchors)
    }

    /// Point-wise comparison against `other`.
    pub fn diff(&self, other: &LatticeSnapshot) -> JellyResult<SnapshotDiff> {
        if self.positions.len() != other.positions.len() || self.velocities.len() != other.velocities.len() {
            return Err(JellyError::InvalidLattice("Snapshots have different point counts".into()));
        }
        let mut diff = SnapshotDiff {
            max_position_delta: 0.0,
            max_velocity_delta: 0.0,
            worst_point: 0,
        };
        for (n, (a, b)) in self.positions.iter().zip(&other.positions).enumerate() {
            let d = a.distance(*b);
            if d > diff.max_position_delta {
                diff.max_position_delta = d;
                diff.worst_point = n;
            }
        }
        for (a, b) in self.velocities.iter().zip(&other.velocities) {
            diff.max_velocity_delta = diff.max_velocity_delta.max(a.distance(*b));
        }
        Ok(diff)
    }

    pub fn to_bytes(&self) -> JellyResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| JellyError::Serialization(format!("Snapshot serialization failed: {e}")))
    }

    /// Decodes and checks point counts.
    pub fn from_bytes(data: &[u8]) -> JellyResult<Self> {
        let snapshot: Self = bincode::deserialize(data)
            .map_err(|e| JellyError::Serialization(format!("Snapshot deserialization failed: {e}")))?;
        snapshot.check_point_counts()?;
        Ok(snapshot)
    }

    fn check_point_counts(&self) -> JellyResult<()> {
        if self.positions.len() != LATTICE_POINT_COUNT || self.velocities.len() != LATTICE_POINT_COUNT {
            return Err(JellyError::InvalidLattice(format!(
                "Snapshot holds {} positions and {} velocities",
                self.positions.len(),
                self.velocities.len()
            )));
        }
        Ok(())
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> JellyResult<()> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), &bytes)?;
        tracing::debug!(path = %path.as_ref().display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> JellyResult<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}
