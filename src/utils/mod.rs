//! Utility modules: build info, logging, persistence, settings.

pub mod build_info;
pub mod logging;
pub mod persistence;
pub mod settings;

pub use settings::{SessionOverrides, Settings};
