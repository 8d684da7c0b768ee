//! Simulation settings - the driver-facing configuration layer.
//!
//! Everything is JSON-loadable (camelCase keys, every field optional) so the
//! JS side can ship a partial document and inherit the defaults below. The
//! defaults are the classic demo tuning: dt 0.005, g = -9.81, floor at -1.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::SettingsError;

/// Explicit integration scheme for spring points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationMode {
    #[default]
    Euler,
    Midpoint,
    LeapFrog,
}

impl IntegrationMode {
    /// Mode from the numeric id used by the JS UI (0 Euler, 1 Midpoint, 2 Leap-Frog).
    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            0 => Some(IntegrationMode::Euler),
            1 => Some(IntegrationMode::Midpoint),
            2 => Some(IntegrationMode::LeapFrog),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            IntegrationMode::Euler => 0,
            IntegrationMode::Midpoint => 1,
            IntegrationMode::LeapFrog => 2,
        }
    }
}

/// Which inverse inertia tensor feeds the second term of the impulse denominator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InertiaTermMode {
    /// Each body's own world inverse inertia for its own lever arm.
    #[default]
    PerBody,
    /// Body A's tensor for both lever arms (reproduces recorded legacy fixtures).
    BodyAForBoth,
}

/// Optional force terms for a spring-network step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpringStepFlags {
    pub gravity: bool,
    pub damping: bool,
    /// Side walls and ceiling in addition to the floor.
    pub walls: bool,
}

impl Default for SpringStepFlags {
    fn default() -> Self {
        Self { gravity: true, damping: true, walls: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RigidStepFlags {
    pub gravity: bool,
    pub damping: bool,
}

impl Default for RigidStepFlags {
    fn default() -> Self {
        Self { gravity: true, damping: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FluidStepFlags {
    pub gravity: bool,
    pub walls: bool,
    /// XSPH viscous smoothing driven by the fluid's viscosity.
    pub damping: bool,
}

impl Default for FluidStepFlags {
    fn default() -> Self {
        Self { gravity: true, walls: true, damping: true }
    }
}

/// Contact resolution tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSettings {
    /// 0 = fully plastic, 1 = fully elastic.
    pub restitution: f32,
    pub inertia_term: InertiaTermMode,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self { restitution: 0.5, inertia_term: InertiaTermMode::PerBody }
    }
}

/// Static room the spring points live in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoundarySettings {
    pub floor: f32,
    /// Walls sit at `±x_wall` and `±z_wall`.
    pub x_wall: f32,
    pub z_wall: f32,
    pub ceiling: f32,
    /// Fraction of normal velocity kept (and reversed) on impact.
    pub bounciness: f32,
    /// Tangential velocity multiplier on impact; 1.0 means no friction.
    pub friction: f32,
}

impl Default for BoundarySettings {
    fn default() -> Self {
        Self {
            floor: -1.0,
            x_wall: 1.0,
            z_wall: 1.0,
            ceiling: 1.0,
            bounciness: 0.75,
            friction: 0.98,
        }
    }
}

/// Neighbor lookup strategy for the SPH passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NeighborSearch {
    /// Every particle against every particle.
    AllPairs,
    /// Uniform grid with cells sized to the smoothing radius.
    #[default]
    UniformGrid,
}

/// SPH fluid parameters and the block the preset scene spawns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FluidSettings {
    /// Smoothing radius `h`; the kernel has support `2h`.
    pub kernel_radius: f32,
    /// Tait equation-of-state stiffness.
    pub stiffness: f32,
    pub rest_density: f32,
    /// Tait exponent.
    pub exponent: i32,
    pub viscosity: f32,
    /// Lattice spacing of the initial block.
    pub spacing: f32,
    pub counts: [u32; 3],
    pub origin: Vec3,
    pub lower_bound: Vec3,
    pub upper_bound: Vec3,
    pub timestep: f32,
    pub neighbor_search: NeighborSearch,
}

impl Default for FluidSettings {
    fn default() -> Self {
        Self {
            kernel_radius: 0.05,
            stiffness: 200.0,
            rest_density: 1000.0,
            exponent: 7,
            viscosity: 0.05,
            spacing: 0.05,
            counts: [6, 6, 6],
            origin: Vec3::new(-0.15, -0.5, -0.15),
            lower_bound: Vec3::new(-0.5, -1.0, -0.5),
            upper_bound: Vec3::new(0.5, 1.0, 0.5),
            timestep: 0.001,
            neighbor_search: NeighborSearch::UniformGrid,
        }
    }
}

/// Largest fluid block a settings document may ask for (64³ particles).
pub const MAX_FLUID_PARTICLES: usize = 64 * 64 * 64;

/// Top-level settings for a `WorldCore`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationSettings {
    /// Used when the driver asks for a fixed step instead of wall-clock time.
    pub timestep: f32,
    pub gravity: Vec3,
    pub integration_mode: IntegrationMode,
    pub spring_flags: SpringStepFlags,
    pub rigid_flags: RigidStepFlags,
    pub fluid_flags: FluidStepFlags,
    /// Collision radius of a spring point.
    pub point_radius: f32,
    pub point_mass: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    /// Springs whose force exceeds this tear; `None` = unbreakable.
    pub tear_threshold: Option<f32>,
    pub boundary: BoundarySettings,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub contact: ContactSettings,
    pub explosion_strength: f32,
    pub fluid: FluidSettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            timestep: 0.005,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            integration_mode: IntegrationMode::Euler,
            spring_flags: SpringStepFlags::default(),
            rigid_flags: RigidStepFlags::default(),
            fluid_flags: FluidStepFlags::default(),
            point_radius: 0.05,
            point_mass: 10.0,
            spring_stiffness: 40.0,
            spring_damping: 0.0,
            tear_threshold: None,
            boundary: BoundarySettings::default(),
            linear_damping: 0.3,
            angular_damping: 0.3,
            contact: ContactSettings::default(),
            explosion_strength: 1.0,
            fluid: FluidSettings::default(),
        }
    }
}

impl SimulationSettings {
    /// Parse and validate a (possibly partial) settings document.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: SimulationSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Current settings as JSON (for the driver's settings panel).
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> SettingsError {
            SettingsError::Invalid { field, reason }
        }

        if !(self.timestep > 0.0) || !self.timestep.is_finite() {
            return Err(invalid("timestep", "must be a positive finite number"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity", "must be finite"));
        }
        if self.point_radius < 0.0 {
            return Err(invalid("pointRadius", "must not be negative"));
        }
        if !(self.point_mass > 0.0) {
            return Err(invalid("pointMass", "must be positive"));
        }
        if self.spring_stiffness < 0.0 || self.spring_damping < 0.0 {
            return Err(invalid("springStiffness", "spring coefficients must not be negative"));
        }
        if let Some(threshold) = self.tear_threshold {
            if !(threshold > 0.0) {
                return Err(invalid("tearThreshold", "must be positive when set"));
            }
        }
        if !(0.0..=1.0).contains(&self.boundary.bounciness) {
            return Err(invalid("boundary.bounciness", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.boundary.friction) {
            return Err(invalid("boundary.friction", "must be within [0, 1]"));
        }
        if self.boundary.ceiling <= self.boundary.floor {
            return Err(invalid("boundary.ceiling", "must lie above the floor"));
        }
        if self.linear_damping < 0.0 || self.angular_damping < 0.0 {
            return Err(invalid("linearDamping", "damping must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.contact.restitution) {
            return Err(invalid("contact.restitution", "must be within [0, 1]"));
        }

        let fluid = &self.fluid;
        if !(fluid.kernel_radius > 0.0) {
            return Err(invalid("fluid.kernelRadius", "must be positive"));
        }
        if !(fluid.rest_density > 0.0) {
            return Err(invalid("fluid.restDensity", "must be positive"));
        }
        if !(fluid.spacing > 0.0) {
            return Err(invalid("fluid.spacing", "must be positive"));
        }
        if !(fluid.timestep > 0.0) {
            return Err(invalid("fluid.timestep", "must be positive"));
        }
        if fluid.exponent < 1 {
            return Err(invalid("fluid.exponent", "must be at least 1"));
        }
        if !fluid.lower_bound.is_finite() || !fluid.upper_bound.is_finite() {
            return Err(invalid("fluid.lowerBound", "fluid bounds must be finite"));
        }
        if !fluid.origin.is_finite() {
            return Err(invalid("fluid.origin", "must be finite"));
        }
        let within_limit = fluid.counts.iter().all(|&c| c as usize <= MAX_FLUID_PARTICLES)
            && fluid
                .counts
                .iter()
                .try_fold(1usize, |total, &count| {
                    total.checked_mul(count.max(1) as usize).filter(|&t| t <= MAX_FLUID_PARTICLES)
                })
                .is_some();
        if !within_limit {
            return Err(invalid("fluid.counts", "fluid block is too large"));
        }
        if fluid.lower_bound.cmpge(fluid.upper_bound).any() {
            return Err(invalid("fluid.upperBound", "must exceed lowerBound on every axis"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = SimulationSettings::from_json("{}").unwrap();
        assert_eq!(settings, SimulationSettings::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let json = r#"{
            "integrationMode": "midpoint",
            "gravity": [0.0, -1.0, 0.0],
            "contact": { "inertiaTerm": "bodyAForBoth" },
            "springFlags": { "walls": true }
        }"#;
        let settings = SimulationSettings::from_json(json).unwrap();
        assert_eq!(settings.integration_mode, IntegrationMode::Midpoint);
        assert_eq!(settings.gravity, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(settings.contact.inertia_term, InertiaTermMode::BodyAForBoth);
        assert_eq!(settings.contact.restitution, 0.5);
        assert!(settings.spring_flags.walls);
        assert!(settings.spring_flags.gravity);
    }

    #[test]
    fn rejects_bad_restitution() {
        let err = SimulationSettings::from_json(r#"{ "contact": { "restitution": 1.5 } }"#).unwrap_err();
        match err {
            SettingsError::Invalid { field, .. } => assert_eq!(field, "contact.restitution"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SimulationSettings::from_json("{ timestep: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn round_trips_through_json() {
        let mut settings = SimulationSettings::default();
        settings.tear_threshold = Some(120.0);
        settings.fluid.neighbor_search = NeighborSearch::AllPairs;
        let back = SimulationSettings::from_json(&settings.to_json()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn integration_mode_ids() {
        for id in 0..3 {
            assert_eq!(IntegrationMode::from_u8(id).unwrap().as_u8(), id);
        }
        assert_eq!(IntegrationMode::from_u8(3), None);
    }

    #[test]
    fn rejects_oversized_fluid_blocks() {
        for json in [
            r#"{ "fluid": { "counts": [70000, 70000, 0] } }"#,
            r#"{ "fluid": { "counts": [65, 64, 64] } }"#,
            r#"{ "fluid": { "counts": [4294967295, 4294967295, 4294967295] } }"#,
        ] {
            match SimulationSettings::from_json(json).unwrap_err() {
                SettingsError::Invalid { field, .. } => assert_eq!(field, "fluid.counts", "{json}"),
                other => panic!("unexpected error: {other}"),
            }
        }
        assert!(SimulationSettings::from_json(r#"{ "fluid": { "counts": [64, 64, 64] } }"#).is_ok());
    }

    #[test]
    fn rejects_non_finite_fluid_bounds() {
        let mut settings = SimulationSettings::default();
        settings.fluid.upper_bound = Vec3::new(f32::INFINITY, 1.0, 1.0);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "fluid.lowerBound", .. })
        ));

        let mut settings = SimulationSettings::default();
        settings.fluid.origin = Vec3::splat(f32::NAN);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "fluid.origin", .. })
        ));
    }
}
