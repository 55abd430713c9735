use std::collections::VecDeque;

use crate::error::StoreError;
use crate::model::{ProjectPatch, ProjectStatus};
use crate::store::ProjectStore;

/// A reversible change, recorded as the value to restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEntry {
    StatusChange {
        id: String,
        previous: ProjectStatus,
    },
    FieldEdit {
        id: String,
        previous: ProjectPatch,
    },
}

impl UndoEntry {
    pub fn project_id(&self) -> &str {
        match self {
            UndoEntry::StatusChange { id, .. } | UndoEntry::FieldEdit { id, .. } => id,
        }
    }

    /// Short description for the status bar.
    pub fn describe(&self) -> String {
        match self {
            UndoEntry::StatusChange { previous, .. } => format!("status back to {previous}"),
            UndoEntry::FieldEdit { .. } => "edit".to_string(),
        }
    }
}

/// Bounded undo stack. Capacity 1 keeps only the most recent change.
#[derive(Debug)]
pub struct UndoHistory {
    entries: VecDeque<UndoEntry>,
    capacity: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn peek(&self) -> Option<&UndoEntry> {
        self.entries.back()
    }

    /// Record a change; the oldest entry is evicted once full.
    pub fn push(&mut self, entry: UndoEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Revert the most recent change. `None` when there is nothing to undo.
    ///
    /// The entry is consumed even if its project has since been deleted.
    pub fn undo(&mut self, store: &mut ProjectStore) -> Option<Result<UndoEntry, StoreError>> {
        let entry = self.entries.pop_back()?;
        let result = match &entry {
            UndoEntry::StatusChange { id, previous } => {
                store.change_status(id, *previous).map(|_| ())
            }
            UndoEntry::FieldEdit { id, previous } => {
                store.restore(id, previous.clone()).map(|_| ())
            }
        };
        Some(result.map(|()| entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_entry(id: &str, previous: ProjectStatus) -> UndoEntry {
        UndoEntry::StatusChange {
            id: id.to_string(),
            previous,
        }
    }

    #[test]
    fn default_keeps_only_latest() {
        let mut history = UndoHistory::new();
        history.push(status_entry("1", ProjectStatus::Paused));
        history.push(status_entry("2", ProjectStatus::Active));
        assert_eq!(history.peek(), Some(&status_entry("2", ProjectStatus::Active)));

        let mut store = ProjectStore::new();
        let _ = history.undo(&mut store);
        assert!(!history.can_undo());
    }

    #[test]
    fn bounded_stack_evicts_oldest() {
        let mut history = UndoHistory::with_capacity(2);
        history.push(status_entry("1", ProjectStatus::Paused));
        history.push(status_entry("2", ProjectStatus::Paused));
        history.push(status_entry("3", ProjectStatus::Paused));
        let ids: Vec<_> = history.entries.iter().map(|e| e.project_id()).collect();
        assert_eq!(ids, ["2", "3"]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        assert_eq!(UndoHistory::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn undo_on_deleted_project_reports_not_found() {
        let mut history = UndoHistory::new();
        history.push(status_entry("gone", ProjectStatus::Paused));
        let mut store = ProjectStore::new();
        assert_eq!(
            history.undo(&mut store),
            Some(Err(StoreError::NotFound("gone".into())))
        );
        assert_eq!(history.undo(&mut store), None);
    }
}
