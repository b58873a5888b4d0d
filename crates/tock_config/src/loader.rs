//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::TockConfig;
use std::path::Path;

/// File name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "tock.toml";

/// Widest counter the bench can build.
const MAX_COUNTER_WIDTH: u32 = 32;

/// Loads and validates `<dir>/tock.toml`.
pub fn load_config(dir: &Path) -> Result<TockConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<TockConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Loads `<dir>/tock.toml`, or returns the defaults when the file is absent.
pub fn load_config_or_default(dir: &Path) -> Result<TockConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        load_config_file(&path)
    } else {
        Ok(TockConfig::default())
    }
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<TockConfig, ConfigError> {
    let config: TockConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TockConfig) -> Result<(), ConfigError> {
    let counts = [
        ("bench.reset_cycles", u64::from(config.bench.reset_cycles)),
        ("bench.steps", u64::from(config.bench.steps)),
        ("sim.time_step", config.sim.time_step),
        ("trace.depth", u64::from(config.trace.depth)),
    ];
    if let Some((key, _)) = counts.into_iter().find(|(_, value)| *value == 0) {
        return Err(ConfigError::bad_value(key, "must be at least 1"));
    }
    if !(1..=MAX_COUNTER_WIDTH).contains(&config.counter.width) {
        return Err(ConfigError::bad_value(
            "counter.width",
            format!("{} is not between 1 and {MAX_COUNTER_WIDTH}", config.counter.width),
        ));
    }
    if config.trace.path.is_empty() {
        return Err(ConfigError::bad_value("trace.path", "must not be empty"));
    }
    if !is_valid_timescale(&config.trace.timescale) {
        return Err(ConfigError::bad_value(
            "trace.timescale",
            format!(
                "'{}' is not 1, 10 or 100 followed by s, ms, us, ns, ps or fs",
                config.trace.timescale
            ),
        ));
    }
    Ok(())
}

/// VCD timescales are a magnitude of 1, 10 or 100 followed by a unit.
fn is_valid_timescale(text: &str) -> bool {
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (magnitude, unit) = text.split_at(split);
    matches!(magnitude, "1" | "10" | "100")
        && matches!(unit.trim(), "s" | "ms" | "us" | "ns" | "ps" | "fs")
}
