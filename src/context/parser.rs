//! Configuration Loading
//!
//! Reads a [`FlowConfig`] from YAML and checks it before any flow runs.

use std::fs;

use log::{debug, info};

use crate::error::{FlowError, Result};

use super::model::FlowConfig;

/// Longest pause a countdown may request between numbers.
pub const MAX_INTERVAL_MS: u64 = 60_000;

/// Loads and validates a configuration file.
///
/// # Example
///
/// ```rust,no_run
/// use flowrunner::context::load_config;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_config("flows.yaml")?;
///     println!("countdown starts at {}", config.countdown.start);
///     Ok(())
/// }
/// ```
pub fn load_config(path: &str) -> Result<FlowConfig> {
    info!("Loading config from: {}", path);

    let yaml_content = fs::read_to_string(path).map_err(|source| FlowError::ConfigRead {
        path: path.to_string(),
        source,
    })?;

    debug!("YAML content loaded ({} bytes)", yaml_content.len());

    parse_config(&yaml_content)
}

/// Parses and validates configuration from a YAML string.
///
/// An empty document yields the defaults.
pub fn parse_config(yaml: &str) -> Result<FlowConfig> {
    let config = if yaml.trim().is_empty() {
        FlowConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    validate_config(&config)?;
    Ok(config)
}

/// Rejects values the flows cannot work with.
pub fn validate_config(config: &FlowConfig) -> Result<()> {
    let colour = &config.my_colour;
    for (channel, value) in [
        ("red", colour.red),
        ("green", colour.green),
        ("blue", colour.blue),
    ] {
        if !value.is_finite() {
            return Err(FlowError::InvalidConfig(format!(
                "colour channel '{}' must be a finite number",
                channel
            )));
        }
    }

    if config.countdown.interval_ms > MAX_INTERVAL_MS {
        return Err(FlowError::InvalidConfig(format!(
            "countdown interval {} ms exceeds {} ms",
            config.countdown.interval_ms, MAX_INTERVAL_MS
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::model::Colour;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "my_colour:\n  red: 4\n  green: 5\n  blue: 6\ncountdown:\n  start: 2\n  interval_ms: 5").unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.my_colour, Colour::new(4.0, 5.0, 6.0));
        assert_eq!(config.countdown.start, 2);
        assert_eq!(config.countdown.interval_ms, 5);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/flows.yaml").unwrap_err();
        assert!(matches!(err, FlowError::ConfigRead { .. }));
        assert!(err.to_string().contains("/nonexistent/flows.yaml"));
    }

    #[test]
    fn test_parse_empty_yields_defaults() {
        assert_eq!(parse_config("  \n").unwrap(), FlowConfig::default());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_config("countdown: [not, a, map]").unwrap_err();
        assert!(matches!(err, FlowError::ConfigParse(_)));
    }

    #[test]
    fn test_interval_limit() {
        let err = parse_config("countdown:\n  interval_ms: 600000\n").unwrap_err();
        assert!(matches!(err, FlowError::InvalidConfig(_)));
    }

    #[test]
    fn test_non_finite_channel_rejected() {
        let config = FlowConfig::default().with_colour(Colour::new(f64::NAN, 0.0, 0.0));
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("red"));
    }
}
