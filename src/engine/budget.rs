//! Search budgets.
//!
//! Backtracking can blow up on pathological inputs, so callers may bound
//! a search by node count, by wall-clock deadline, or both. The budget is
//! consulted at every search-tree expansion; once it is exceeded the
//! search aborts and the caller sees a `Timeout` outcome, which is kept
//! distinct from `Infeasible` because an aborted search proves nothing.

use std::time::{Duration, Instant};

/// Limits on a single search run. The default is unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Budget {
    max_nodes: Option<u64>,
    max_time: Option<Duration>,
}

impl Budget {
    /// A budget with no limits.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_nodes: None,
            max_time: None,
        }
    }

    /// Caps the number of search-tree nodes that may be expanded.
    #[must_use]
    pub const fn with_node_limit(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Caps the wall-clock time a search may run for.
    #[must_use]
    pub const fn with_deadline(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Whether neither limit is set.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        self.max_nodes.is_none() && self.max_time.is_none()
    }

    /// Whether a search that has expanded `nodes` nodes since `started`
    /// has used up this budget.
    #[must_use]
    pub fn exceeded(&self, nodes: u64, started: Instant) -> bool {
        self.max_nodes.is_some_and(|max| nodes > max)
            || self.max_time.is_some_and(|max| started.elapsed() > max)
    }
}
