//! uniquegen - uniqueness-enforcing wrapper for value generators
//!
//! Wraps any [`Delegate`] that produces values through named operations so
//! that repeated calls with the same operation and arguments never hand back
//! a value already returned for that pair, until the history is reset or the
//! retry budget runs out.
//!
//! # Architecture
//!
//! ```text
//! caller ── call(op, args) ──> UniquenessTracker ── invoke(op, args) ──> Delegate
//!                                   │
//!                                   ├── History: (op, args) -> {seen values}
//!                                   └── Registry (process-wide, for reset_all)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use uniquegen::{SampleArg, SampleDelegate, UniquenessTracker};
//!
//! let mut tracker = UniquenessTracker::new(SampleDelegate::new(), 100);
//! let args = [SampleArg::Int(1), SampleArg::Int(10)];
//! let first = tracker.call("number", &args)?;
//! let second = tracker.call("number", &args)?;
//! assert_ne!(first, second);
//!
//! uniquegen::reset_all();
//! ```

pub mod cli;
pub mod config;
mod delegate;
mod error;
mod history;
mod policy;
mod registry;
mod sample;
mod tracker;

pub use delegate::{Delegate, RESERVED_OPERATIONS, is_reserved};
pub use error::TrackerError;
pub use history::{History, HistoryKey};
pub use policy::ExhaustionPolicy;
pub use registry::{ClearHistory, Registry, TrackerId};
pub use sample::{SampleArg, SampleDelegate, SampleError};
pub use tracker::UniquenessTracker;

/// Default retry budget for a tracker
pub const DEFAULT_MAX_RETRIES: u32 = 10_000;

/// Clear every tracker in the process-wide registry and empty it
pub fn reset_all() {
    Registry::global().reset_all();
}
