//! Physics configuration.
//!
//! Every tunable parameter of the force model and integrator lives here.
//! A body holds its own copy, so several bodies with different tunings can
//! coexist. Mutation goes through [`PhysicsConfig::set`] or
//! [`PhysicsConfig::validate`], which reject out-of-range values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use jelly_types::constants::BOUNDING_BOX_SIZE;
use jelly_types::{JellyError, JellyResult};

/// How spring contributions are summed into point accelerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceAccumulation {
    /// Walk the springs once, adding into both endpoints.
    #[default]
    Sequential,
    /// Compute every spring in parallel into a side buffer, then reduce in
    /// spring order. Bit-identical to `Sequential`.
    Parallel,
}

/// Tunable parameters of the soft body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Mass of every lattice point. Must be positive.
    pub mass: f32,

    /// Spring constant for springs between two lattice points.
    pub elasticity: f32,

    /// Spring constant for springs with an anchor endpoint.
    pub elasticity_control: f32,

    /// Damping coefficient along each spring.
    pub viscosity: f32,

    /// Fraction of velocity kept (and reversed) when a point hits the box.
    /// Typically in `[0, 1]`; not clamped.
    pub collision_elasticity: f32,

    /// Scale of the random offset applied by `disturb`.
    pub deformation_constant: f32,

    /// Half-extent of the bounding box `[-size, size]³`.
    pub bounding_box_size: f32,

    /// Force accumulation mode.
    pub force_accumulation: ForceAccumulation,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            elasticity: 3.0,
            elasticity_control: 130.0,
            viscosity: 1.0,
            collision_elasticity: 1.0,
            deformation_constant: 1.0,
            bounding_box_size: BOUNDING_BOX_SIZE,
            force_accumulation: ForceAccumulation::Sequential,
        }
    }
}

impl PhysicsConfig {
    /// A firm body that barely deforms between its anchors.
    pub fn stiff() -> Self {
        Self {
            elasticity: 40.0,
            elasticity_control: 400.0,
            viscosity: 4.0,
            ..Default::default()
        }
    }

    /// A loose, slowly settling body.
    pub fn wobbly() -> Self {
        Self {
            elasticity: 1.0,
            elasticity_control: 40.0,
            viscosity: 0.2,
            collision_elasticity: 0.8,
            ..Default::default()
        }
    }

    /// Parses a TOML document. Missing keys take their default values.
    pub fn from_toml_str(source: &str) -> JellyResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| JellyError::Serialization(format!("Config parse failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> JellyResult<String> {
        toml::to_string(self)
            .map_err(|e| JellyError::Serialization(format!("Config encode failed: {e}")))
    }

    /// Checks every parameter against its valid range.
    pub fn validate(&self) -> JellyResult<()> {
        for param in Tunable::ALL {
            param.check(self.get(param))?;
        }
        if !(self.bounding_box_size.is_finite() && self.bounding_box_size > 0.0) {
            return Err(JellyError::InvalidConfig(format!(
                "bounding_box_size must be positive and finite (got {})",
                self.bounding_box_size
            )));
        }
        Ok(())
    }

    /// Reads one tunable parameter.
    pub fn get(&self, param: Tunable) -> f32 {
        match param {
            Tunable::Mass => self.mass,
            Tunable::Elasticity => self.elasticity,
            Tunable::ElasticityControl => self.elasticity_control,
            Tunable::Viscosity => self.viscosity,
            Tunable::CollisionElasticity => self.collision_elasticity,
            Tunable::DeformationConstant => self.deformation_constant,
        }
    }

    /// Validates and writes one tunable parameter.
    ///
    /// On error the configuration is left unchanged.
    pub fn set(&mut self, param: Tunable, value: f32) -> JellyResult<()> {
        param.check(value)?;
        let slot = match param {
            Tunable::Mass => &mut self.mass,
            Tunable::Elasticity => &mut self.elasticity,
            Tunable::ElasticityControl => &mut self.elasticity_control,
            Tunable::Viscosity => &mut self.viscosity,
            Tunable::CollisionElasticity => &mut self.collision_elasticity,
            Tunable::DeformationConstant => &mut self.deformation_constant,
        };
        *slot = value;
        Ok(())
    }

    /// Spring constant for a spring, chosen by whether it touches an anchor.
    #[inline]
    pub fn spring_constant(&self, involves_static: bool) -> f32 {
        if involves_static {
            self.elasticity_control
        } else {
            self.elasticity
        }
    }
}

/// Names of the externally tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tunable {
    Mass,
    Elasticity,
    ElasticityControl,
    Viscosity,
    CollisionElasticity,
    DeformationConstant,
}

impl Tunable {
    /// Every tunable, in display order.
    pub const ALL: [Tunable; 6] = [
        Tunable::Mass,
        Tunable::Elasticity,
        Tunable::ElasticityControl,
        Tunable::Viscosity,
        Tunable::CollisionElasticity,
        Tunable::DeformationConstant,
    ];

    /// Snake-case key used in TOML files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Tunable::Mass => "mass",
            Tunable::Elasticity => "elasticity",
            Tunable::ElasticityControl => "elasticity_control",
            Tunable::Viscosity => "viscosity",
            Tunable::CollisionElasticity => "collision_elasticity",
            Tunable::DeformationConstant => "deformation_constant",
        }
    }

    fn check(&self, value: f32) -> JellyResult<()> {
        if !value.is_finite() {
            return Err(JellyError::InvalidConfig(format!(
                "{} must be finite (got {value})",
                self.name()
            )));
        }
        let ok = match self {
            Tunable::Mass => value > 0.0,
            Tunable::Elasticity | Tunable::ElasticityControl | Tunable::Viscosity => value >= 0.0,
            Tunable::CollisionElasticity | Tunable::DeformationConstant => true,
        };
        if ok {
            Ok(())
        } else {
            let bound = if *self == Tunable::Mass { "> 0" } else { ">= 0" };
            Err(JellyError::InvalidConfig(format!(
                "{} must be {bound} (got {value})",
                self.name()
            )))
        }
    }
}

impl fmt::Display for Tunable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tunable {
    type Err = JellyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tunable::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Tunable::ALL.iter().map(|t| t.name()).collect();
                JellyError::InvalidConfig(format!(
                    "Unknown parameter '{s}'. Available: {}",
                    names.join(", ")
                ))
            })
    }
}
