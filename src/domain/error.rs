//! Error types for configuration and scene construction.
//!
//! Per-frame stepping never fails; these only cover inputs the driver hands
//! over before a simulation starts.

use thiserror::Error;

/// Settings JSON could not be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The document is not valid JSON for `SimulationSettings`.
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// camelCase JSON field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// A rigid body could not be built from its mass points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    #[error("rigid body needs at least one mass point")]
    NoMassPoints,

    #[error("mass point {index} has non-positive mass {mass}")]
    NonPositiveMass { index: usize, mass: f32 },

    /// Points are coplanar/collinear around the center, inertia cannot be inverted.
    #[error("inertia tensor is singular (determinant {determinant})")]
    SingularInertia { determinant: f32 },
}

/// A scene preset could not be assembled.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unknown scene preset id {0}")]
    UnknownPreset(u8),

    #[error(transparent)]
    Body(#[from] BodyError),

    #[error("spring endpoints coincide (point {0})")]
    DegenerateSpring(usize),

    #[error("point {index} does not exist ({count} points in scene)")]
    PointOutOfRange { index: usize, count: usize },
}
