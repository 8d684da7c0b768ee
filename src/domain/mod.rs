//! Domain - configuration and error vocabulary shared by systems and the driver.

pub mod error;
pub mod settings;

pub use error::{BodyError, SceneError, SettingsError};
pub use settings::{
    BoundarySettings, ContactSettings, FluidSettings, FluidStepFlags, InertiaTermMode,
    IntegrationMode, NeighborSearch, RigidStepFlags, SimulationSettings, SpringStepFlags,
};
