//! UniquenessTracker - forwards named calls and refuses to repeat values

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::delegate::{Delegate, is_reserved};
use crate::error::TrackerError;
use crate::history::{History, HistoryKey};
use crate::policy::ExhaustionPolicy;
use crate::registry::{ClearHistory, Registry, TrackerId};

type SharedHistory<D> = Arc<Mutex<History<<D as Delegate>::Arg, <D as Delegate>::Value>>>;

/// Wraps a [`Delegate`] so that each (operation, arguments) pair never yields
/// the same value twice until the history is cleared
///
/// Any operation name is forwarded except the reserved control names
/// (see [`crate::RESERVED_OPERATIONS`]). Each call asks the delegate for up to
/// `max_retries` candidates and returns the first one not seen before for that
/// key. What happens when every candidate was already seen is decided by the
/// tracker's [`ExhaustionPolicy`].
pub struct UniquenessTracker<D: Delegate> {
    id: TrackerId,
    delegate: D,
    max_retries: u32,
    policy: ExhaustionPolicy,
    history: SharedHistory<D>,
    registry: Arc<Registry>,
}

impl<D: Delegate> UniquenessTracker<D> {
    /// Create a tracker that fails on exhaustion
    pub fn new(delegate: D, max_retries: u32) -> Self {
        Self::with_policy(delegate, max_retries, ExhaustionPolicy::Fail)
    }

    /// Create a tracker that resets its history and repeats on exhaustion
    pub fn repeating(delegate: D, max_retries: u32) -> Self {
        Self::with_policy(delegate, max_retries, ExhaustionPolicy::Repeat)
    }

    /// Create a tracker with an explicit policy, joined to the global registry
    pub fn with_policy(delegate: D, max_retries: u32, policy: ExhaustionPolicy) -> Self {
        Self::with_registry(delegate, max_retries, policy, Registry::global())
    }

    /// Create a tracker from loaded configuration
    pub fn from_config(delegate: D, config: &Config) -> Self {
        Self::with_policy(delegate, config.max_retries, config.policy)
    }

    /// Create a tracker that joins `registry` instead of the global one
    pub fn with_registry(delegate: D, max_retries: u32, policy: ExhaustionPolicy, registry: Arc<Registry>) -> Self {
        let id = Uuid::now_v7();
        debug!(%id, max_retries, %policy, "UniquenessTracker::with_registry: called");
        Self {
            id,
            delegate,
            max_retries,
            policy,
            history: Arc::new(Mutex::new(History::new())),
            registry,
        }
    }

    pub fn id(&self) -> TrackerId {
        self.id
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn policy(&self) -> ExhaustionPolicy {
        self.policy
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// Switch this tracker to the repeat policy in place
    pub fn repeatable(&mut self) -> &mut Self {
        debug!(id = %self.id, "UniquenessTracker::repeatable: called");
        self.policy = ExhaustionPolicy::Repeat;
        self
    }

    /// Whether `operation` would be forwarded to the delegate
    ///
    /// True for every name except the reserved control operations; whether the
    /// delegate actually accepts the name is only known by calling it.
    pub fn forwards(&self, operation: &str) -> bool {
        !is_reserved(operation)
    }

    /// Whether this tracker is currently a member of its registry
    pub fn is_registered(&self) -> bool {
        self.registry.contains(&self.id)
    }

    /// Number of values recorded for `operation` with `args`
    pub fn seen(&self, operation: &str, args: &[D::Arg]) -> usize {
        self.lock_history().len_for(&HistoryKey::new(operation, args))
    }

    /// Invoke `operation` on the delegate and return a value not yet returned
    /// for this operation and argument list
    pub fn call(&mut self, operation: &str, args: &[D::Arg]) -> Result<D::Value, TrackerError<D::Error>> {
        debug!(id = %self.id, %operation, ?args, "UniquenessTracker::call: called");
        if is_reserved(operation) {
            debug!(%operation, "UniquenessTracker::call: reserved operation, not forwarding");
            return Err(TrackerError::ReservedOperation {
                operation: operation.to_string(),
            });
        }

        self.register();

        let key = HistoryKey::new(operation, args);
        for attempt in 1..=self.max_retries {
            let value = self.delegate.invoke(operation, args).map_err(TrackerError::Delegate)?;
            let mut history = self.lock_history();
            if history.record(&key, value.clone()) {
                // A reset_all between the first register and this record drops membership
                self.register();
                drop(history);
                debug!(%operation, attempt, "UniquenessTracker::call: unique value found");
                return Ok(value);
            }
        }

        self.handle_exhausted(operation, args)
    }

    fn handle_exhausted(&mut self, operation: &str, args: &[D::Arg]) -> Result<D::Value, TrackerError<D::Error>> {
        match self.policy {
            ExhaustionPolicy::Fail => {
                warn!(id = %self.id, %operation, max_retries = self.max_retries, "Retry limit exceeded");
                Err(TrackerError::RetryLimitExceeded {
                    operation: operation.to_string(),
                    attempts: self.max_retries,
                })
            }
            ExhaustionPolicy::Repeat => {
                warn!(id = %self.id, %operation, "Retry limit exceeded, clearing history and repeating");
                self.clear();
                self.delegate.invoke(operation, args).map_err(TrackerError::Delegate)
            }
        }
    }

    /// Forget every value recorded for every key; the tracker stays usable
    pub fn clear(&self) {
        debug!(id = %self.id, "UniquenessTracker::clear: called");
        self.lock_history().clear();
    }

    /// Treat `values` as already returned for `operation` with `args`
    ///
    /// The delegate is not invoked and the tracker does not join the registry.
    pub fn exclude<I>(&self, operation: &str, args: &[D::Arg], values: I)
    where
        I: IntoIterator<Item = D::Value>,
    {
        debug!(id = %self.id, %operation, ?args, "UniquenessTracker::exclude: called");
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }
        self.lock_history().entry(HistoryKey::new(operation, args)).extend(values);
    }

    fn register(&self) {
        let member: Weak<dyn ClearHistory> = Arc::downgrade(&self.history) as Weak<dyn ClearHistory>;
        self.registry.register(self.id, member);
    }

    fn lock_history(&self) -> MutexGuard<'_, History<D::Arg, D::Value>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<D: Delegate> fmt::Debug for UniquenessTracker<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniquenessTracker")
            .field("id", &self.id)
            .field("max_retries", &self.max_retries)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
