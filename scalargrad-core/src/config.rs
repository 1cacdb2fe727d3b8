//! # Graph configuration
//!
//! [`GraphConfig`] controls how a [`Graph`](crate::Graph) treats invalid numeric
//! arguments and how repeated backward passes combine their gradients.
//!
//! Build one with [`GraphConfig::builder`], or read overrides from the environment
//! with [`GraphConfig::from_env`]:
//!
//! | variable | values |
//! |---|---|
//! | `SCALARGRAD_DOMAIN_POLICY` | `strict`, `propagate` |
//! | `SCALARGRAD_ACCUMULATION` | `reset`, `accumulate` |
//! | `SCALARGRAD_CAPACITY` | node count to preallocate |

use crate::error::ScalarGradError;
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every environment variable read by [`GraphConfig::from_env`].
pub const ENV_PREFIX: &str = "SCALARGRAD_";
pub const ENV_DOMAIN_POLICY: &str = "DOMAIN_POLICY";
pub const ENV_ACCUMULATION: &str = "ACCUMULATION";
pub const ENV_CAPACITY: &str = "CAPACITY";

pub const DEFAULT_CAPACITY: usize = 64;
/// Upper bound on the preallocated arena size.
pub const MAX_CAPACITY: usize = 1 << 24;

/// How operators react to arguments outside their mathematical domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainPolicy {
    /// Fail with [`ScalarGradError::DomainError`] / [`ScalarGradError::DivisionByZero`]
    /// at the offending operator call.
    #[default]
    Strict,
    /// Let IEEE-754 NaN and infinities flow through values and gradients.
    Propagate,
}

/// How a backward pass combines its result with gradients already stored in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccumulationMode {
    /// Every node visited by a pass gets exactly the gradient of that pass.
    /// Running `backward` twice from the same root yields the same gradients.
    #[default]
    Reset,
    /// Each pass is added onto the stored gradients. Callers reset with
    /// [`Graph::zero_grad`](crate::Graph::zero_grad) between unrelated passes.
    Accumulate,
}

impl FromStr for DomainPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(DomainPolicy::Strict),
            "propagate" | "ieee" => Ok(DomainPolicy::Propagate),
            other => Err(format!("expected `strict` or `propagate`, got `{other}`")),
        }
    }
}

impl FromStr for AccumulationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(AccumulationMode::Reset),
            "accumulate" => Ok(AccumulationMode::Accumulate),
            other => Err(format!("expected `reset` or `accumulate`, got `{other}`")),
        }
    }
}

impl fmt::Display for DomainPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainPolicy::Strict => write!(f, "strict"),
            DomainPolicy::Propagate => write!(f, "propagate"),
        }
    }
}

impl fmt::Display for AccumulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccumulationMode::Reset => write!(f, "reset"),
            AccumulationMode::Accumulate => write!(f, "accumulate"),
        }
    }
}

/// Settings of a single computation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    pub domain_policy: DomainPolicy,
    pub accumulation: AccumulationMode,
    /// Number of node slots reserved up front.
    pub capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            domain_policy: DomainPolicy::default(),
            accumulation: AccumulationMode::default(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl GraphConfig {
    #[must_use]
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::default()
    }

    /// Checks that the configuration values are in range.
    pub fn validate(&self) -> Result<(), ScalarGradError> {
        if self.capacity > MAX_CAPACITY {
            return Err(ScalarGradError::InvalidConfig(format!(
                "capacity {} exceeds the maximum of {}",
                self.capacity, MAX_CAPACITY
            )));
        }
        Ok(())
    }

    /// Builds a configuration from `SCALARGRAD_*` environment variables, falling back to
    /// [`GraphConfig::default`] for unset ones.
    pub fn from_env() -> Result<Self, ScalarGradError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GraphConfig::from_env`] but reads values through `lookup`, which receives the
    /// full variable name (e.g. `SCALARGRAD_CAPACITY`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScalarGradError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let config = Self {
            domain_policy: parsed(&lookup, ENV_DOMAIN_POLICY)?.unwrap_or(default.domain_policy),
            accumulation: parsed(&lookup, ENV_ACCUMULATION)?.unwrap_or(default.accumulation),
            capacity: parsed(&lookup, ENV_CAPACITY)?.unwrap_or(default.capacity),
        };
        config.validate()?;
        Ok(config)
    }
}

fn parsed<T, F>(lookup: &F, suffix: &str) -> Result<Option<T>, ScalarGradError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let key = format!("{ENV_PREFIX}{suffix}");
    let Some(raw) = lookup(&key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ScalarGradError::ConfigParse {
            key,
            value: raw.clone(),
            message: e.to_string(),
        })
}

/// Builder for [`GraphConfig`]; [`GraphConfigBuilder::build`] validates the result.
#[derive(Debug, Clone, Default)]
pub struct GraphConfigBuilder {
    config: GraphConfig,
}

impl GraphConfigBuilder {
    #[must_use]
    pub fn domain_policy(mut self, policy: DomainPolicy) -> Self {
        self.config.domain_policy = policy;
        self
    }

    #[must_use]
    pub fn accumulation(mut self, mode: AccumulationMode) -> Self {
        self.config.accumulation = mode;
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn build(self) -> Result<GraphConfig, ScalarGradError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
