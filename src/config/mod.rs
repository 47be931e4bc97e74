/*!
 * Configuration
 *
 * Simulation settings come from, in increasing precedence:
 * 1. Built-in defaults (reference partition layout, FCFS, no tick limit)
 * 2. A JSON file named by `SIM_CONFIG`
 * 3. Individual environment overrides (`SIM_PARTITIONS`, `SIM_POLICY`, `SIM_MAX_TICKS`)
 */

use crate::core::limits::{DEFAULT_PARTITION_SIZES, PARTITION_LIMIT};
use crate::core::types::{MemSize, Tick};
use crate::scheduler::SchedulingPolicy;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_CONFIG: &str = "SIM_CONFIG";
pub const ENV_PARTITIONS: &str = "SIM_PARTITIONS";
pub const ENV_POLICY: &str = "SIM_POLICY";
pub const ENV_MAX_TICKS: &str = "SIM_MAX_TICKS";
pub const ENV_TRACE_FILE: &str = "SIM_TRACE_FILE";
pub const ENV_OUTPUT_DIR: &str = "SIM_OUTPUT_DIR";
pub const ENV_JSON_OUTPUT: &str = "SIM_JSON_OUTPUT";

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Partition table is empty")]
    #[diagnostic(
        code(config::empty_partitions),
        help("Configure at least one partition, e.g. SIM_PARTITIONS=40,25,15,10,8,2")
    )]
    EmptyPartitionTable,

    #[error("Partition {number} has zero capacity")]
    #[diagnostic(code(config::zero_capacity))]
    ZeroCapacity { number: usize },

    #[error("Too many partitions: {count} (limit {limit})")]
    #[diagnostic(code(config::too_many_partitions))]
    TooManyPartitions { count: usize, limit: usize },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file {}: {}", .path.display(), .reason)]
    #[diagnostic(code(config::read_failed))]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config: {0}")]
    #[diagnostic(
        code(config::parse_failed),
        help("Expected JSON like {{\"partitions\": [40, 25], \"policy\": \"fcfs\", \"max_ticks\": 1000}}")
    )]
    Parse(String),
}

/// Engine settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    partitions: Vec<MemSize>,
    policy: SchedulingPolicy,
    max_ticks: Option<Tick>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            partitions: DEFAULT_PARTITION_SIZES.to_vec(),
            policy: SchedulingPolicy::Fcfs,
            max_ticks: None,
        }
    }
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }

    /// Partition capacities in partition order
    pub fn partitions(&self) -> &[MemSize] {
        &self.partitions
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    pub fn max_ticks(&self) -> Option<Tick> {
        self.max_ticks
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.partitions.is_empty() {
            return Err(ConfigError::EmptyPartitionTable);
        }
        if self.partitions.len() > PARTITION_LIMIT {
            return Err(ConfigError::TooManyPartitions {
                count: self.partitions.len(),
                limit: PARTITION_LIMIT,
            });
        }
        if let Some(position) = self.partitions.iter().position(|&c| c == 0) {
            return Err(ConfigError::ZeroCapacity {
                number: position + 1,
            });
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Load from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the environment
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(raw) = lookup(ENV_PARTITIONS) {
            config.partitions = parse_partitions(&raw)?;
        }
        if let Some(raw) = lookup(ENV_POLICY) {
            config.policy = raw
                .parse()
                .map_err(|reason| invalid_value(ENV_POLICY, &raw, reason))?;
        }
        if let Some(raw) = lookup(ENV_MAX_TICKS) {
            let limit = raw
                .trim()
                .parse::<Tick>()
                .map_err(|e| invalid_value(ENV_MAX_TICKS, &raw, e.to_string()))?;
            config.max_ticks = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }
}

fn invalid_value(key: &str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason,
    }
}

/// Parse a comma-separated list of capacities such as `40, 25, 15`
pub fn parse_partitions(raw: &str) -> ConfigResult<Vec<MemSize>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<MemSize>()
                .map_err(|e| invalid_value(ENV_PARTITIONS, raw, format!("'{}': {}", part, e)))
        })
        .collect()
}

/// Builder for SimulationConfig
#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    partitions: Option<Vec<MemSize>>,
    policy: Option<SchedulingPolicy>,
    max_ticks: Option<Tick>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition capacities, in the order partitions are numbered
    pub fn with_partitions(mut self, partitions: impl Into<Vec<MemSize>>) -> Self {
        self.partitions = Some(partitions.into());
        self
    }

    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Abort with an error once this many ticks have run
    pub fn with_max_ticks(mut self, limit: Tick) -> Self {
        self.max_ticks = Some(limit);
        self
    }

    pub fn build(self) -> ConfigResult<SimulationConfig> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            partitions: self.partitions.unwrap_or(defaults.partitions),
            policy: self.policy.unwrap_or(defaults.policy),
            max_ticks: self.max_ticks.or(defaults.max_ticks),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Where and how the binary writes its reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// Also write a JSON report
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            json: false,
        }
    }
}

impl OutputConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_JSON_OUTPUT) {
            config.json = match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(invalid_value(
                        ENV_JSON_OUTPUT,
                        &raw,
                        "expected true or false".to_string(),
                    ))
                }
            };
        }
        Ok(config)
    }
}
