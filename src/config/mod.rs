//! Configuration
//!
//! Store connection and UI settings, loaded from a RON file with environment
//! and command-line overrides.

pub mod settings;

pub use settings::{
    Backend, ConfigError, Settings,
    config_path, data_directory, load_settings, save_settings,
};
