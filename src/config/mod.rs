//! Configuration module for homebox
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::HomeboxPaths;
pub use settings::Settings;
