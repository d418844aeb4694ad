//! Registry of trackers that have been used, for bulk reset
//!
//! Lifecycle: empty at process start, a tracker joins on its first tracked
//! call, and [`Registry::reset_all`] clears every member and empties the set.
//! Members are held weakly so a dropped tracker never keeps its history alive.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;
use uuid::Uuid;

use crate::history::History;

/// Identity of a tracker within a registry
pub type TrackerId = Uuid;

/// Something whose history the registry can wipe
pub trait ClearHistory: Send + Sync {
    fn clear_history(&self);
}

impl<A, V> ClearHistory for Mutex<History<A, V>>
where
    A: Eq + Hash + Send,
    V: Eq + Hash + Send,
{
    fn clear_history(&self) {
        self.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

static GLOBAL: LazyLock<Arc<Registry>> = LazyLock::new(|| Arc::new(Registry::new()));

/// Set of trackers that have attempted at least one tracked call
#[derive(Default)]
pub struct Registry {
    members: Mutex<HashMap<TrackerId, Weak<dyn ClearHistory>>>,
}

impl Registry {
    /// Create an empty registry, independent of the global one
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry trackers join unless given another
    pub fn global() -> Arc<Registry> {
        Arc::clone(&GLOBAL)
    }

    // Poisoning is recovered: every operation leaves the map consistent
    fn lock(&self) -> MutexGuard<'_, HashMap<TrackerId, Weak<dyn ClearHistory>>> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a member; registering the same id again is a no-op
    pub fn register(&self, id: TrackerId, member: Weak<dyn ClearHistory>) {
        let mut members = self.lock();
        if !members.contains_key(&id) {
            debug!(%id, "Registry::register: new member");
            members.insert(id, member);
        }
    }

    pub fn contains(&self, id: &TrackerId) -> bool {
        self.lock().get(id).is_some_and(|m| m.strong_count() > 0)
    }

    /// Number of live members; entries for dropped trackers are pruned
    pub fn len(&self) -> usize {
        let mut members = self.lock();
        members.retain(|_, m| m.strong_count() > 0);
        members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear every live member's history, then empty the registry
    ///
    /// Returns the number of trackers that were cleared. The registry lock is
    /// released before any member is cleared.
    pub fn reset_all(&self) -> usize {
        let drained: Vec<_> = self.lock().drain().collect();
        debug!(count = drained.len(), "Registry::reset_all: called");

        let mut cleared = 0;
        for (id, member) in drained {
            if let Some(member) = member.upgrade() {
                debug!(%id, "Registry::reset_all: clearing member");
                member.clear_history();
                cleared += 1;
            }
        }
        cleared
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("members", &self.lock().len()).finish()
    }
}
