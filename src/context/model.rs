//! Flow Configuration Model
//!
//! Process-scoped configuration, built once at startup and shared by
//! reference with every flow invocation.
//!
//! # Example YAML Format
//!
//! ```yaml
//! my_colour:
//!   red: 1
//!   green: 2
//!   blue: 3
//!
//! countdown:
//!   start: 10
//!   interval_ms: 100
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};

/// A colour with three numeric channels.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Colour {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Colour {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

/// Settings for the countdown flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CountdownConfig {
    /// First number written; the countdown stops before zero
    pub start: u32,

    /// Pause after each number, in milliseconds
    pub interval_ms: u64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            start: 10,
            interval_ms: 100,
        }
    }
}

/// Configuration shared by all flows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FlowConfig {
    /// Colour record read by the test suite
    pub my_colour: Colour,

    /// Countdown behaviour
    pub countdown: CountdownConfig,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            my_colour: Colour::new(1.0, 2.0, 3.0),
            countdown: CountdownConfig::default(),
        }
    }
}

impl FlowConfig {
    /// Returns a copy with a different countdown.
    pub fn with_countdown(mut self, start: u32, interval_ms: u64) -> Self {
        self.countdown = CountdownConfig { start, interval_ms };
        self
    }

    /// Returns a copy with a different colour.
    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.my_colour = colour;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colour() {
        let config = FlowConfig::default();
        assert_eq!(config.my_colour, Colour::new(1.0, 2.0, 3.0));
        assert_eq!(config.my_colour.red, 1.0);
    }

    #[test]
    fn test_default_countdown() {
        let countdown = CountdownConfig::default();
        assert_eq!(countdown.start, 10);
        assert_eq!(countdown.interval_ms, 100);
    }

    #[test]
    fn test_builders() {
        let config = FlowConfig::default()
            .with_countdown(3, 1)
            .with_colour(Colour::new(9.0, 8.0, 7.0));

        assert_eq!(config.countdown.start, 3);
        assert_eq!(config.countdown.interval_ms, 1);
        assert_eq!(config.my_colour.blue, 7.0);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: FlowConfig = serde_yaml::from_str("countdown:\n  start: 4\n").unwrap();
        assert_eq!(config.countdown.start, 4);
        assert_eq!(config.countdown.interval_ms, 100);
        assert_eq!(config.my_colour, Colour::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_colour_missing_channels_default_to_zero() {
        let colour: Colour = serde_yaml::from_str("red: 5").unwrap();
        assert_eq!(colour, Colour::new(5.0, 0.0, 0.0));
    }
}
