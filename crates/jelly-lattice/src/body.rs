//! The soft body: lattice, spring network, configuration and integrator.

use rand::Rng;

use jelly_math::Vec3;
use jelly_types::constants::{ANCHOR_COUNT, LATTICE_POINT_COUNT};
use jelly_types::{JellyError, JellyResult};

use crate::anchor::AnchorController;
use crate::config::{PhysicsConfig, Tunable};
use crate::integrator::{IntegrationStrategy, SymplecticEuler};
use crate::lattice::Lattice;
use crate::network::SpringNetwork;

/// Result of one `update` call.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Step number just completed (1-based).
    pub timestep: u32,
    /// Simulated time after the step (seconds).
    pub sim_time: f64,
    /// Kinetic energy of the lattice after the step.
    pub kinetic_energy: f64,
    /// Velocity components reflected off the bounding box.
    pub bounces: u32,
    /// Position components clamped onto the bounding box.
    pub clamps: u32,
    /// Wall-clock time for this step (seconds). `update` leaves it at zero;
    /// drivers that time the step fill it in.
    pub wall_time: f64,
}

/// A deformable cube simulated as a 4×4×4 mass-spring lattice.
///
/// The body exclusively owns its lattice. Readers take snapshots through
/// [`positions`](Self::positions) between steps.
pub struct SoftBody {
    lattice: Lattice,
    network: SpringNetwork,
    config: PhysicsConfig,
    integrator: Box<dyn IntegrationStrategy>,
    timestep: u32,
    sim_time: f64,
}

impl SoftBody {
    /// Builds a body inside the control cube `corners`.
    ///
    /// The lattice spans the box from `corners[0]` (minimum) to `corners[7]`
    /// (maximum); all eight corners become the initial anchor positions.
    /// Corner order is the one produced by
    /// [`control_cube_corners`](crate::anchor::control_cube_corners).
    pub fn new(corners: [Vec3; ANCHOR_COUNT], config: PhysicsConfig) -> JellyResult<Self> {
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejected physics configuration");
            return Err(e);
        }
        if let Some(bad) = corners.iter().position(|c| !c.is_finite()) {
            return Err(JellyError::InvalidLattice(format!(
                "Control cube corner {bad} is not finite: {:?}",
                corners[bad]
            )));
        }

        let min = corners[0];
        let max = corners[ANCHOR_COUNT - 1];
        let lattice = Lattice::from_corners(min, max, corners);
        let network = SpringNetwork::build(&lattice, max - min);

        tracing::debug!(
            points = LATTICE_POINT_COUNT,
            springs = network.len(),
            edge_unit = network.structural_rest_length(),
            "soft body constructed"
        );

        Ok(Self {
            lattice,
            network,
            config,
            integrator: Box::new(SymplecticEuler),
            timestep: 0,
            sim_time: 0.0,
        })
    }

    /// Replaces the integrator.
    pub fn with_integrator(mut self, integrator: Box<dyn IntegrationStrategy>) -> Self {
        self.integrator = integrator;
        self
    }

    /// Offsets every lattice point by a random vector in
    /// `[-0.5, 0.5)³ · deformation_constant`.
    pub fn disturb<R: Rng>(&mut self, rng: &mut R) {
        let scale = self.config.deformation_constant;
        for p in self.lattice.points_mut()[..LATTICE_POINT_COUNT].iter_mut() {
            let offset = Vec3::new(
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
            );
            p.position += offset * scale;
        }
        tracing::trace!(timestep = self.timestep, scale, "lattice disturbed");
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Zeroes accelerations, accumulates spring forces, then integrates.
    /// Parameter changes made since the previous call take effect here.
    pub fn update(&mut self, dt: f32) -> StepReport {
        self.lattice.reset_accelerations();
        self.network.accumulate_forces(&mut self.lattice, &self.config);
        let integration = self.integrator.step(&mut self.lattice, dt, &self.config);

        self.timestep += 1;
        self.sim_time += dt as f64;

        StepReport {
            timestep: self.timestep,
            sim_time: self.sim_time,
            kinetic_energy: self.kinetic_energy(),
            bounces: integration.bounces,
            clamps: integration.clamps,
            wall_time: 0.0,
        }
    }

    /// Pulls anchor positions from `controller`, then updates.
    pub fn drive(&mut self, controller: &mut dyn AnchorController, dt: f32) -> StepReport {
        let anchors = controller.anchor_positions(dt);
        self.lattice.set_anchor_positions(anchors);
        self.update(dt)
    }

    /// The 64 lattice positions in flat `(i, j, k)` order.
    pub fn positions(&self) -> [Vec3; LATTICE_POINT_COUNT] {
        self.lattice.positions()
    }

    /// Overwrites the eight anchor positions.
    pub fn set_anchor_positions(&mut self, anchors: [Vec3; ANCHOR_COUNT]) {
        self.lattice.set_anchor_positions(anchors);
    }

    /// Restores lattice state captured earlier (e.g. from a snapshot).
    pub fn restore_state(
        &mut self,
        timestep: u32,
        sim_time: f64,
        positions: &[Vec3],
        velocities: &[Vec3],
        anchors: [Vec3; ANCHOR_COUNT],
    ) -> JellyResult<()> {
        self.lattice.restore(positions, velocities)?;
        self.lattice.set_anchor_positions(anchors);
        self.timestep = timestep;
        self.sim_time = sim_time;
        Ok(())
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn network(&self) -> &SpringNetwork {
        &self.network
    }

    #[inline]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replaces the configuration after validating it.
    pub fn set_config(&mut self, config: PhysicsConfig) -> JellyResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Validates and sets one tunable parameter.
    pub fn set_parameter(&mut self, param: Tunable, value: f32) -> JellyResult<()> {
        self.config.set(param, value)?;
        tracing::debug!(%param, value, "parameter updated");
        Ok(())
    }

    /// Integrator name.
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// Steps taken since construction.
    #[inline]
    pub fn timestep(&self) -> u32 {
        self.timestep
    }

    /// Simulated seconds since construction.
    #[inline]
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.lattice.kinetic_energy(self.config.mass)
    }

    pub fn elastic_energy(&self) -> f64 {
        self.network.elastic_energy(&self.lattice, &self.config)
    }

    pub fn centroid(&self) -> Vec3 {
        self.lattice.centroid()
    }
}
