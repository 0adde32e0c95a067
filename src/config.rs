/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ConfigError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub bank: BankConfig,
    pub timing: TimingConfig,
    pub generator: GeneratorConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BankConfig {
    pub n_cars: usize,
    pub initial_floor: i32,
    pub min_floor: i32,
    pub max_floor: i32,
}

impl Default for BankConfig {
    fn default() -> Self {
        BankConfig {
            n_cars: 4,
            initial_floor: 1,
            min_floor: 1,
            max_floor: 10,
        }
    }
}

/// All durations are in simulation time units.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub unit_travel_time: u64,
    pub loading_time: u64,
    pub broadcast_period: u64,
    pub time_unit_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            unit_travel_time: 2,
            loading_time: 10,
            broadcast_period: 1,
            time_unit_ms: 1000,
        }
    }
}

impl TimingConfig {
    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub interval: u64,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            interval: 10,
            seed: None,
        }
    }
}

impl Config {
    /// Wall-clock time between two generated requests.
    pub fn generator_period(&self) -> Duration {
        Duration::from_millis(
            self.timing
                .time_unit_ms
                .saturating_mul(self.generator.interval),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bank.n_cars == 0 {
            return Err(ConfigError::Invalid("n_cars must be at least 1".into()));
        }
        if self.bank.min_floor > self.bank.max_floor {
            return Err(ConfigError::Invalid(format!(
                "min_floor {} is above max_floor {}",
                self.bank.min_floor, self.bank.max_floor
            )));
        }
        if !(self.bank.min_floor..=self.bank.max_floor).contains(&self.bank.initial_floor) {
            return Err(ConfigError::Invalid(format!(
                "initial_floor {} is outside {}..={}",
                self.bank.initial_floor, self.bank.min_floor, self.bank.max_floor
            )));
        }
        if self.timing.broadcast_period == 0 {
            return Err(ConfigError::Invalid("broadcast_period must be at least 1".into()));
        }
        if self.timing.time_unit_ms == 0 {
            return Err(ConfigError::Invalid("time_unit_ms must be at least 1".into()));
        }
        if self.generator.interval == 0 {
            return Err(ConfigError::Invalid("generator interval must be at least 1".into()));
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

/// Loads `path`, falling back to the defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    match fs::read_to_string(path) {
        Ok(config_str) => parse_config(&config_str),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("{} not found, using default configuration", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}
