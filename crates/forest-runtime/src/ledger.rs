#![forbid(unsafe_code)]

//! The forest: an append-only record of completed focus sessions.
//!
//! Reading goes through [`ForestLedger`], which anyone may hold. Appending
//! goes through the single [`LedgerWriter`], which is created together with
//! the ledger and handed to the focus session.
//!
//! Entries are ordered by `sequence_id`. Completion times never decrease
//! along that order: if the wall clock steps backwards, a new entry takes the
//! previous entry's time.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::clock::Clock;
use crate::reactive::{Observable, ReadSignal};

/// One grown tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletedEntry {
    task_label: String,
    completed_at: u64,
    sequence_id: u64,
}

impl CompletedEntry {
    #[must_use]
    pub fn task_label(&self) -> &str {
        &self.task_label
    }

    /// Completion time in milliseconds since the Unix epoch, never earlier
    /// than the entry before it.
    #[must_use]
    pub fn completed_at(&self) -> u64 {
        self.completed_at
    }

    /// Position in completion order, starting at 1.
    #[must_use]
    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }
}

struct Shared {
    entries: RefCell<Vec<CompletedEntry>>,
    next_sequence: Cell<u64>,
    clock: Rc<dyn Clock>,
    count: Observable<usize>,
}

/// Read access to the forest.
#[derive(Clone)]
pub struct ForestLedger {
    shared: Rc<Shared>,
}

impl ForestLedger {
    /// Create an empty ledger and its only writer.
    pub(crate) fn new(clock: Rc<dyn Clock>) -> (Self, LedgerWriter) {
        let shared = Rc::new(Shared {
            entries: RefCell::new(Vec::new()),
            next_sequence: Cell::new(1),
            clock,
            count: Observable::new(0),
        });
        (
            Self {
                shared: Rc::clone(&shared),
            },
            LedgerWriter { shared },
        )
    }

    /// Snapshot of every entry in completion order. Tracked.
    #[must_use]
    pub fn all(&self) -> Vec<CompletedEntry> {
        let _ = self.shared.count.get();
        self.shared.entries.borrow().clone()
    }

    /// Number of entries. Tracked.
    #[must_use]
    pub fn count(&self) -> usize {
        self.shared.count.get()
    }

    #[must_use]
    pub fn count_signal(&self) -> ReadSignal<usize> {
        self.shared.count.read_only()
    }

    /// The most recent entry. Tracked.
    #[must_use]
    pub fn last(&self) -> Option<CompletedEntry> {
        let _ = self.shared.count.get();
        self.shared.entries.borrow().last().cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl fmt::Debug for ForestLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForestLedger")
            .field("entries", &self.shared.entries.borrow().len())
            .finish()
    }
}

/// Append access to the forest.
pub struct LedgerWriter {
    shared: Rc<Shared>,
}

impl LedgerWriter {
    /// Record a completed session.
    pub(crate) fn append(&self, task_label: String) -> CompletedEntry {
        let sequence_id = self.shared.next_sequence.get();
        self.shared.next_sequence.set(sequence_id + 1);
        let (entry, len) = {
            let mut entries = self.shared.entries.borrow_mut();
            let now = self.shared.clock.now_unix_ms();
            let floor = entries.last().map_or(0, CompletedEntry::completed_at);
            if now < floor {
                tracing::warn!(target: "forest::ledger", now, floor, "clock went backwards");
            }
            let entry = CompletedEntry {
                task_label,
                completed_at: now.max(floor),
                sequence_id,
            };
            entries.push(entry.clone());
            (entry, entries.len())
        };
        tracing::debug!(
            target: "forest::ledger",
            sequence_id,
            task = %entry.task_label,
            "tree planted"
        );
        self.shared.count.set(len);
        entry
    }
}

impl fmt::Debug for LedgerWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerWriter").finish_non_exhaustive()
    }
}
