//! Settings management for Splitconf.
//!
//! This crate holds configuration values in memory and decodes them into
//! typed structures through the decode hook pipeline.

mod error;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::{KEY_DELIMITER, Settings, default_decoder};
