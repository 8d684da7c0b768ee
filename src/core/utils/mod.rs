#[macro_use]
mod safety;
#[macro_use]
pub mod log;

pub use log::console_enabled;
