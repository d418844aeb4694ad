//! SampleDelegate - a small random generator used by the `ug` binary

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::delegate::Delegate;

/// Argument accepted by [`SampleDelegate`] operations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SampleArg {
    Text(String),
    Int(i64),
}

impl fmt::Display for SampleArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleArg::Text(s) => write!(f, "{}", s),
            SampleArg::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Errors raised by [`SampleDelegate`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("Unknown operation: {operation}")]
    UnknownOperation { operation: String },

    #[error("Invalid arguments for {operation}: {reason}")]
    InvalidArguments { operation: String, reason: String },
}

/// Random value generator with two operations
///
/// - `pick`: one of the text arguments
/// - `number`: an integer in `[min, max]` given as two integer arguments
pub struct SampleDelegate {
    rng: StdRng,
}

impl SampleDelegate {
    /// Create a generator seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible generator
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "SampleDelegate::seeded: called");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, args: &[SampleArg]) -> Result<String, SampleError> {
        let candidates = args
            .iter()
            .map(|arg| match arg {
                SampleArg::Text(s) => Ok(s.as_str()),
                SampleArg::Int(_) => Err(invalid("pick", "candidates must be text")),
            })
            .collect::<Result<Vec<_>, _>>()?;

        candidates
            .choose(&mut self.rng)
            .map(|s| s.to_string())
            .ok_or_else(|| invalid("pick", "at least one candidate is required"))
    }

    fn number(&mut self, args: &[SampleArg]) -> Result<String, SampleError> {
        let (min, max) = match args {
            [SampleArg::Int(min), SampleArg::Int(max)] => (*min, *max),
            _ => return Err(invalid("number", "expected two integers: min and max")),
        };
        if min > max {
            return Err(invalid("number", &format!("min {} is greater than max {}", min, max)));
        }
        Ok(self.rng.random_range(min..=max).to_string())
    }
}

impl Default for SampleDelegate {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(operation: &str, reason: &str) -> SampleError {
    SampleError::InvalidArguments {
        operation: operation.to_string(),
        reason: reason.to_string(),
    }
}

impl Delegate for SampleDelegate {
    type Arg = SampleArg;
    type Value = String;
    type Error = SampleError;

    fn invoke(&mut self, operation: &str, args: &[SampleArg]) -> Result<String, SampleError> {
        match operation {
            "pick" => self.pick(args),
            "number" => self.number(args),
            _ => Err(SampleError::UnknownOperation {
                operation: operation.to_string(),
            }),
        }
    }
}
