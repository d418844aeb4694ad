//! What a tracker does once its retry budget is spent

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exhaustion policy selected when the tracker is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Return `RetryLimitExceeded` and leave the history untouched
    #[default]
    Fail,
    /// Wipe the tracker's whole history and return one more delegate value
    Repeat,
}

impl fmt::Display for ExhaustionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExhaustionPolicy::Fail => write!(f, "fail"),
            ExhaustionPolicy::Repeat => write!(f, "repeat"),
        }
    }
}
