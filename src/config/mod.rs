//! Configuration module for finboard
//!
//! Base-directory resolution and the persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::FinboardPaths;
pub use settings::Settings;
