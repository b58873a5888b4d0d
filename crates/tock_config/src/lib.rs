//! Parsing and validation of `tock.toml` configuration files.
//!
//! Every section of the file is optional; missing values fall back to the
//! defaults of the counter bench (10 reset cycles, 16 checked steps, a 3-bit
//! counter, tracing off).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_file, load_config_from_str, load_config_or_default, CONFIG_FILE_NAME,
};
pub use types::*;
