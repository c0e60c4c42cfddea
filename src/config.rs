//! Reading a [`CapacityPolicy`] from configuration.
//!
//! Sources are layered with the `config` crate: an optional file first, then
//! `EVALUATORS_*` environment variables (`EVALUATORS_DEFAULT_CAPACITY`,
//! `EVALUATORS_MAX_CAPACITY`). Keys that are absent keep their defaults.

use std::path::Path;

use ::config::{Config, Environment, File};
use tracing::debug;

use crate::capacity::{CapacityPolicy, MAX_CAPACITY};
use crate::error::{EvaluatorError, Result};

pub const ENV_PREFIX: &str = "EVALUATORS";

/// Loads the policy from `path` (when given) and the environment.
pub fn load(path: Option<&Path>) -> Result<CapacityPolicy> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    let config = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;
    from_config(config)
}

/// Deserializes and validates a policy out of an already built configuration.
pub fn from_config(config: Config) -> Result<CapacityPolicy> {
    let policy: CapacityPolicy = config.try_deserialize()?;
    validate(&policy)?;
    debug!(
        default_capacity = policy.default_capacity,
        max_capacity = policy.max_capacity,
        "capacity policy loaded"
    );
    Ok(policy)
}

pub fn validate(policy: &CapacityPolicy) -> Result<()> {
    if policy.max_capacity == 0 || policy.max_capacity > MAX_CAPACITY {
        return Err(EvaluatorError::Config(format!(
            "max_capacity must be within 1..={MAX_CAPACITY}, got {}",
            policy.max_capacity
        )));
    }
    if policy.default_capacity > policy.max_capacity {
        return Err(EvaluatorError::Config(format!(
            "default_capacity {} exceeds max_capacity {}",
            policy.default_capacity, policy.max_capacity
        )));
    }
    Ok(())
}
