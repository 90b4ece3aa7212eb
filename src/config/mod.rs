//! Configuration module for the metadata service
//!
//! Supports loading configuration from TOML files and environment variables.

mod settings;

pub use settings::*;
