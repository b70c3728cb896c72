//! Bounded, linear undo/redo history over project snapshots.
//!
//! The history owns an ordered sequence of immutable snapshots plus a cursor.
//! Recording a checkpoint while the cursor sits before the tail first drops
//! everything after it (history is a line, not a tree). The sequence is
//! capped: once full, the oldest snapshot is evicted from the front and the
//! cursor keeps pointing at the entry that was just pushed. Snapshots are
//! deep copies and never alias the live working document.

use sitesmith_core::Project;
use tracing::{debug, trace};

/// Maximum number of snapshots retained before the oldest is evicted.
pub const MAX_HISTORY: usize = 200;

/// One recorded point in edit history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub state: Project,
    pub timestamp: i64,
    pub description: String,
}

impl HistoryEntry {
    pub fn new(state: Project, description: impl Into<String>) -> Self {
        Self {
            state,
            timestamp: unix_now(),
            description: description.into(),
        }
    }
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Snapshot sequence + cursor. `cursor == None` exactly while no document
/// has been seeded; otherwise it indexes the entry the editor is sitting on.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl History {
    /// Create an empty history. `capacity` must be at least 1; the entry
    /// being pushed is never evicted by its own push.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Throw away everything and seed with a single entry (project
    /// created/loaded). The cursor lands on it.
    pub fn reset(&mut self, entry: HistoryEntry) {
        debug!(description = %entry.description, "seeding history");
        self.entries.clear();
        self.entries.push(entry);
        self.cursor = Some(0);
    }

    /// Record a checkpoint: drop the redo branch, append, evict the oldest
    /// entry if over capacity. The cursor ends on the new entry.
    pub fn push(&mut self, entry: HistoryEntry) {
        if let Some(cursor) = self.cursor {
            let discarded = self.entries.len() - cursor - 1;
            if discarded > 0 {
                trace!(discarded, "dropping redo branch");
                self.entries.truncate(cursor + 1);
            }
        }

        self.entries.push(entry);

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            debug!(capacity = self.capacity, "history full, evicted oldest snapshot");
        }

        self.cursor = Some(self.entries.len() - 1);
    }

    /// Move the cursor back one entry and return the snapshot to restore.
    /// `None` at the oldest entry (or while empty); nothing changes then.
    pub fn step_back(&mut self) -> Option<&HistoryEntry> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        trace!(cursor = cursor - 1, "history cursor moved back");
        self.entries.get(cursor - 1)
    }

    /// Move the cursor forward one entry and return the snapshot to restore.
    /// `None` at the tail; nothing changes then.
    pub fn step_forward(&mut self) -> Option<&HistoryEntry> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        trace!(cursor = cursor + 1, "history cursor moved forward");
        self.entries.get(cursor + 1)
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    /// Drop all entries (project discarded).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Recorded snapshots, oldest first. For display; snapshots are restored
    /// through [`step_back`](Self::step_back)/[`step_forward`](Self::step_forward).
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
