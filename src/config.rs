//! Configuration for the airlink daemon
//!
//! Loaded from a TOML file. Link settings are runtime-mutable and
//! re-applied on the next `connect`, never on an already-open channel.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Safe fallback for a non-positive cycle interval, seconds
pub const DEFAULT_CYCLE_INTERVAL: f64 = 1.0;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub link: LinkConfig,
    pub vehicle: VehicleConfig,
    pub pipeline: PipelineConfig,
    pub logging: LoggingConfig,
}

/// Vehicle link configuration
///
/// Applied on the next connect; changing a field does not touch an open
/// channel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    /// Peer IP address (parsed at connect time; a bad address fails the
    /// connect and nothing else)
    pub address: String,
    /// Peer UDP port
    pub port: u16,
    /// Send cycle interval, seconds
    pub cycle_interval: f64,
}

impl LinkConfig {
    /// Cycle interval validated for scheduling
    ///
    /// A non-positive or non-finite interval would busy-loop the send
    /// thread, so it is coerced to [`DEFAULT_CYCLE_INTERVAL`] with one
    /// warning per attempt.
    pub fn validated_cycle_interval(&self) -> Duration {
        if self.cycle_interval > 0.0 && self.cycle_interval.is_finite() {
            Duration::from_secs_f64(self.cycle_interval)
        } else {
            log::warn!(
                "invalid cycle interval {}, using default {}s",
                self.cycle_interval,
                DEFAULT_CYCLE_INTERVAL
            );
            Duration::from_secs_f64(DEFAULT_CYCLE_INTERVAL)
        }
    }
}

/// Vehicle layout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleConfig {
    /// Mixer strategy name ("airboat", "direct")
    pub mixer: String,
    /// Drive simulated actuators/sensors instead of expecting scene wiring
    pub simulate: bool,
}

/// Pipeline scheduling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Module tick interval, seconds
    pub tick_interval: f64,
}

impl PipelineConfig {
    /// Tick interval validated the same way as the link cycle interval
    pub fn validated_tick_interval(&self) -> Duration {
        if self.tick_interval > 0.0 && self.tick_interval.is_finite() {
            Duration::from_secs_f64(self.tick_interval)
        } else {
            log::warn!(
                "invalid tick interval {}, using default {}s",
                self.tick_interval,
                DEFAULT_CYCLE_INTERVAL
            );
            Duration::from_secs_f64(DEFAULT_CYCLE_INTERVAL)
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Development defaults: simulated airboat, 10 Hz link, 50 Hz pipeline
    pub fn airboat_defaults() -> Self {
        Self {
            link: LinkConfig {
                address: "192.168.0.39".to_string(),
                port: 4210,
                cycle_interval: 0.1,
            },
            vehicle: VehicleConfig {
                mixer: "airboat".to_string(),
                simulate: true,
            },
            pipeline: PipelineConfig {
                tick_interval: 0.02,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::airboat_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::airboat_defaults();
        assert_eq!(config.link.port, 4210);
        assert_eq!(config.link.cycle_interval, 0.1);
        assert_eq!(config.vehicle.mixer, "airboat");
        assert!(config.vehicle.simulate);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::airboat_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[link]"));
        assert!(toml_string.contains("[vehicle]"));
        assert!(toml_string.contains("[pipeline]"));
        assert!(toml_string.contains("[logging]"));

        let parsed: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.link.address, config.link.address);
        assert_eq!(parsed.pipeline.tick_interval, config.pipeline.tick_interval);
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[link]
address = "10.0.0.7"
port = 4211
cycle_interval = 0.05

[vehicle]
mixer = "direct"
simulate = false

[pipeline]
tick_interval = 0.01

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.link.address, "10.0.0.7");
        assert_eq!(config.link.port, 4211);
        assert_eq!(config.vehicle.mixer, "direct");
        assert!(!config.vehicle.simulate);
    }

    #[test]
    fn test_cycle_interval_coercion() {
        let mut link = Config::airboat_defaults().link;

        link.cycle_interval = 0.0;
        assert_eq!(
            link.validated_cycle_interval(),
            Duration::from_secs_f64(DEFAULT_CYCLE_INTERVAL)
        );

        link.cycle_interval = -0.5;
        assert_eq!(
            link.validated_cycle_interval(),
            Duration::from_secs_f64(DEFAULT_CYCLE_INTERVAL)
        );

        link.cycle_interval = 0.25;
        assert_eq!(
            link.validated_cycle_interval(),
            Duration::from_secs_f64(0.25)
        );
    }
}
