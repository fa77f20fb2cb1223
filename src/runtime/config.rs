use miette::Diagnostic;
use serde::Deserialize;
use std::env;
use thiserror::Error;

pub const MAX_CALL_DEPTH_VAR: &str = "MYTHON_MAX_CALL_DEPTH";
pub const TRACE_CALLS_VAR: &str = "MYTHON_TRACE_CALLS";

const DEFAULT_MAX_CALL_DEPTH: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub max_call_depth: usize,
    pub trace_calls: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            trace_calls: false,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid runtime config: {message}")]
    #[diagnostic(code(mython::config::parse))]
    Parse { message: String },
    #[error("environment variable {name} has invalid value `{value}`")]
    #[diagnostic(
        code(mython::config::invalid_var),
        help("depths are non-negative integers; flags accept 1/0, true/false, yes/no, on/off")
    )]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Deserialize)]
struct RawConfigFile {
    #[serde(default)]
    runtime: RuntimeConfig,
}

impl RuntimeConfig {
    /// Reads the `[runtime]` table of a TOML document. Missing keys keep
    /// their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfigFile = toml::from_str(content).map_err(|error| ConfigError::Parse {
            message: error.to_string(),
        })?;
        Ok(raw.runtime)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(value) = env::var(MAX_CALL_DEPTH_VAR) {
            self.max_call_depth = value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: MAX_CALL_DEPTH_VAR,
                value: value.clone(),
            })?;
        }
        if let Ok(value) = env::var(TRACE_CALLS_VAR) {
            self.trace_calls = parse_flag(&value).ok_or(ConfigError::InvalidVar {
                name: TRACE_CALLS_VAR,
                value,
            })?;
        }
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
