//! Core front-end plumbing: errors, logging and persisted settings

pub mod error;
pub mod logging;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use settings_persistence::{load_settings, save_settings, settings_path};
