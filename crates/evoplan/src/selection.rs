//! Last-selection-wins bookkeeping for callers that plan asynchronously.
//!
//! The planner itself is synchronous. A UI that plans on a worker thread
//! takes a ticket when the user selects a unit and hands the finished result
//! back through [`SelectionTracker::accept`], which drops it if another
//! selection happened in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issued by [`SelectionTracker::select`]. Tickets from later selections
/// always carry a higher generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    unit_id: String,
}

impl SelectionTicket {
    pub fn unit_id(&self) -> &str {
        &self.unit_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct SelectionTracker {
    current: AtomicU64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new selection. Every earlier ticket becomes stale.
    pub fn select(&self, unit_id: impl Into<String>) -> SelectionTicket {
        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        SelectionTicket {
            generation,
            unit_id: unit_id.into(),
        }
    }

    pub fn is_current(&self, ticket: &SelectionTicket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.generation
    }

    /// Returns `value` if `ticket` is still the latest selection, otherwise
    /// drops it.
    pub fn accept<T>(&self, ticket: &SelectionTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}
