use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::algorithms::Strategy;
use crate::algorithms::access::ORIGIN;
use crate::models::{Coordinate, DiagonalMovement, DEFAULT_GRID_SIZE};
use crate::utils::distance::Heuristic;

/// Errors raised while loading or validating a [`PlannerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid planner config: {0}")]
    Invalid(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What to do when a shopping list has more stops than `max_stops`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopLimitPolicy {
    /// Fail the request with `TooManyStops`
    #[default]
    Reject,
    /// Route the first `max_stops` products and report the rest as skipped
    Truncate,
}

/// How the visit order is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Try every permutation and keep the cheapest
    #[default]
    Exhaustive,
    /// Visit products in shopping-list order
    AsListed,
}

/// Route planner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub strategy: Strategy,
    pub diagonal_movement: DiagonalMovement,
    pub heuristic: Heuristic,
    pub heuristic_weight: f64,
    pub include_return_trip: bool,
    /// Permutation search is O(n!): keep this in single digits
    pub max_stops: usize,
    pub stop_limit_policy: StopLimitPolicy,
    pub order_policy: OrderPolicy,
    pub timeout_ms: Option<u64>,
    pub grid_width: i32,
    pub grid_height: i32,
    /// Point a blocked shelf's walkable neighbours are ranked against; the origin by default
    pub access_reference: Coordinate,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::AStar,
            diagonal_movement: DiagonalMovement::OnlyWhenNoObstacles,
            heuristic: Heuristic::Euclidean,
            heuristic_weight: 1.0,
            include_return_trip: true,
            max_stops: 8,
            stop_limit_policy: StopLimitPolicy::Reject,
            order_policy: OrderPolicy::Exhaustive,
            timeout_ms: None,
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            access_reference: ORIGIN,
        }
    }
}

impl PlannerConfig {
    /// Parses and validates a JSON config; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or its content is invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Loads the config from `ROUTE_PLANNER_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        build_planner_config(|key| std::env::var(key))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stops == 0 {
            return Err(ConfigError::Invalid("max_stops must be at least 1".into()));
        }
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if !(self.heuristic_weight.is_finite() && self.heuristic_weight > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "heuristic_weight must be a positive number, got {}",
                self.heuristic_weight
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Builds a config from an env-var lookup, so parsing can be tested without
/// touching the process environment.
fn build_planner_config<F>(lookup: F) -> Result<PlannerConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let defaults = PlannerConfig::default();

    let timeout_ms = lookup("ROUTE_PLANNER_TIMEOUT_MS")
        .ok()
        .map(|raw| parse_value::<u64>("ROUTE_PLANNER_TIMEOUT_MS", &raw))
        .transpose()?
        .or(defaults.timeout_ms);

    let config = PlannerConfig {
        strategy: env_enum(&lookup, "ROUTE_PLANNER_STRATEGY", defaults.strategy)?,
        diagonal_movement: env_enum(
            &lookup,
            "ROUTE_PLANNER_DIAGONAL_MOVEMENT",
            defaults.diagonal_movement,
        )?,
        heuristic: env_enum(&lookup, "ROUTE_PLANNER_HEURISTIC", defaults.heuristic)?,
        heuristic_weight: env_value(
            &lookup,
            "ROUTE_PLANNER_HEURISTIC_WEIGHT",
            defaults.heuristic_weight,
        )?,
        include_return_trip: env_value(
            &lookup,
            "ROUTE_PLANNER_INCLUDE_RETURN_TRIP",
            defaults.include_return_trip,
        )?,
        max_stops: env_value(&lookup, "ROUTE_PLANNER_MAX_STOPS", defaults.max_stops)?,
        stop_limit_policy: env_enum(
            &lookup,
            "ROUTE_PLANNER_STOP_LIMIT_POLICY",
            defaults.stop_limit_policy,
        )?,
        order_policy: env_enum(&lookup, "ROUTE_PLANNER_ORDER_POLICY", defaults.order_policy)?,
        timeout_ms,
        grid_width: env_value(&lookup, "ROUTE_PLANNER_GRID_WIDTH", defaults.grid_width)?,
        grid_height: env_value(&lookup, "ROUTE_PLANNER_GRID_HEIGHT", defaults.grid_height)?,
        access_reference: env_value(
            &lookup,
            "ROUTE_PLANNER_ACCESS_REFERENCE",
            defaults.access_reference,
        )?,
    };
    config.validate()?;
    Ok(config)
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

fn env_value<T, F>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(var) {
        Ok(raw) => parse_value(var, &raw),
        Err(_) => Ok(default),
    }
}

/// Enum settings use their serde names, case-insensitively.
fn env_enum<T, F>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(var) {
        Ok(raw) => serde_json::from_value(serde_json::Value::String(raw.trim().to_lowercase()))
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}
