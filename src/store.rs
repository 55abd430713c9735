//! The project store, single owner of the project collection.
//!
//! Every mutation goes through [`ProjectStore`], so all views observe the same
//! state. Readers get shared slices; nothing outside the store holds a mutable
//! alias to a stored project.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{self, NewProject, Project, ProjectPatch, ProjectStatus};

/// Outcome of [`ProjectStore::change_status`], kept for undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: ProjectStatus,
    pub current: ProjectStatus,
}

#[derive(Debug)]
pub struct ProjectStore {
    projects: Vec<Project>,
    loading: bool,
    error: Option<String>,
    revision: u64,
    clock: fn() -> NaiveDate,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::with_clock(model::today)
    }

    /// A store that stamps mutations with dates from `clock`.
    pub fn with_clock(clock: fn() -> NaiveDate) -> Self {
        Self {
            projects: Vec::new(),
            loading: false,
            error: None,
            revision: 0,
            clock,
        }
    }

    // ── Reads ───────────────────────────────────────────────────

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped by every mutation, including flag changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Replace the whole collection and clear the loading and error flags.
    ///
    /// Entries repeating an earlier id are dropped; returns how many were dropped.
    pub fn set_all(&mut self, projects: Vec<Project>) -> usize {
        let incoming = projects.len();
        let mut seen = HashSet::with_capacity(incoming);
        let unique: Vec<Project> = projects
            .into_iter()
            .filter(|p| {
                let fresh = seen.insert(p.id.clone());
                if !fresh {
                    tracing::warn!(id = %p.id, "dropping project with duplicate id");
                }
                fresh
            })
            .collect();
        let dropped = incoming - unique.len();

        self.projects = unique;
        self.loading = false;
        self.error = None;
        self.bump();
        dropped
    }

    /// Append a fully formed project. Its id must not already be present.
    pub fn add(&mut self, project: Project) -> Result<(), StoreError> {
        project.validate()?;
        if self.position(&project.id).is_some() {
            return Err(StoreError::DuplicateId(project.id));
        }
        self.projects.push(project);
        self.bump();
        Ok(())
    }

    /// Create a project with a fresh id, stamping both dates with today.
    pub fn create(&mut self, new: NewProject) -> Result<&Project, StoreError> {
        let project = new.into_project(Uuid::new_v4().to_string(), (self.clock)());
        let index = self.projects.len();
        self.add(project)?;
        Ok(&self.projects[index])
    }

    /// Merge `patch` into the matching project and refresh its last-updated date.
    pub fn update_by_id(&mut self, id: &str, patch: ProjectPatch) -> Result<&Project, StoreError> {
        patch.validate()?;
        self.restore(id, patch)
    }

    /// Write back previously stored values without validating them.
    ///
    /// Records loaded through [`set_all`](Self::set_all) may hold values `update_by_id`
    /// rejects; undo must still be able to put them back.
    pub fn restore(&mut self, id: &str, patch: ProjectPatch) -> Result<&Project, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let today = (self.clock)();
        let project = &mut self.projects[index];
        project.apply(patch);
        project.touch(today);
        self.bump();
        Ok(&self.projects[index])
    }

    pub fn delete_by_id(&mut self, id: &str) -> Result<Project, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.projects.remove(index);
        self.bump();
        Ok(removed)
    }

    /// Move a project to `status`, reporting the status it had before.
    pub fn change_status(
        &mut self,
        id: &str,
        status: ProjectStatus,
    ) -> Result<StatusChange, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let previous = self.projects[index].status;
        let updated =
            model::status::change_status_on(&self.projects[index], status, (self.clock)());
        self.projects[index] = updated;
        self.bump();
        Ok(StatusChange {
            previous,
            current: status,
        })
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.bump();
    }

    /// Record (or clear) a refresh failure. Recording one ends the loading phase.
    pub fn set_error(&mut self, error: Option<String>) {
        if error.is_some() {
            self.loading = false;
        }
        self.error = error;
        self.bump();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Department;

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    fn project(id: &str) -> Project {
        NewProject::new(format!("Project {id}"), Department::Finance)
            .into_project(id.into(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn store_with(ids: &[&str]) -> ProjectStore {
        let mut store = ProjectStore::with_clock(fixed_day);
        for id in ids {
            store.add(project(id)).unwrap();
        }
        store
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let mut store = store_with(&["1"]);
        assert_eq!(store.add(project("1")), Err(StoreError::DuplicateId("1".into())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_assigns_id_and_dates() {
        let mut store = ProjectStore::with_clock(fixed_day);
        let created = store
            .create(NewProject::new("Claims Intake", Department::Healthcare))
            .unwrap()
            .clone();
        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(created.created_at, Some(fixed_day()));
        assert_eq!(created.last_updated, fixed_day());
        assert_eq!(store.get(&created.id), Some(&created));
    }

    #[test]
    fn create_validates_name() {
        let mut store = ProjectStore::new();
        let err = store.create(NewProject::new(" ", Department::Finance)).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn update_touches_only_the_target() {
        let mut store = store_with(&["1", "2", "3"]);
        let untouched = store.get("3").cloned();

        let updated = store
            .update_by_id(
                "2",
                ProjectPatch {
                    automations: Some(9),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.automations, 9);
        assert_eq!(updated.last_updated, fixed_day());
        assert_eq!(store.get("1").unwrap().automations, 0);
        assert_eq!(store.get("3").cloned(), untouched);
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let mut store = store_with(&["1"]);
        let before = store.revision();
        assert_eq!(
            store.update_by_id("nope", ProjectPatch::default()).unwrap_err(),
            StoreError::NotFound("nope".into())
        );
        assert_eq!(
            store.delete_by_id("nope").unwrap_err(),
            StoreError::NotFound("nope".into())
        );
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = store_with(&["1", "2"]);
        let removed = store.delete_by_id("1").unwrap();
        assert_eq!(removed.id, "1");
        let ids: Vec<_> = store.projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2"]);
    }

    #[test]
    fn set_all_replaces_and_clears_flags() {
        let mut store = store_with(&["old-1", "old-2"]);
        store.set_loading(true);
        store.set_error(Some("boom".into()));
        store.set_loading(true);

        let dropped = store.set_all(vec![project("new-1"), project("new-2")]);

        assert_eq!(dropped, 0);
        let ids: Vec<_> = store.projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["new-1", "new-2"]);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn set_all_drops_repeated_ids() {
        let mut store = ProjectStore::new();
        let mut second = project("a");
        second.name = "Second copy".into();
        let dropped = store.set_all(vec![project("a"), second, project("b")]);
        assert_eq!(dropped, 1);
        assert_eq!(store.get("a").unwrap().name, "Project a");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn change_status_reports_previous() {
        let mut store = store_with(&["1"]);
        let change = store.change_status("1", ProjectStatus::Completed).unwrap();
        assert_eq!(change.previous, ProjectStatus::Active);
        assert_eq!(change.current, ProjectStatus::Completed);
        assert_eq!(store.get("1").unwrap().status, ProjectStatus::Completed);
        assert_eq!(store.get("1").unwrap().last_updated, fixed_day());
    }

    #[test]
    fn error_ends_loading() {
        let mut store = ProjectStore::new();
        store.set_loading(true);
        store.set_error(Some("offline".into()));
        assert!(!store.is_loading());
        assert_eq!(store.error(), Some("offline"));
    }

    #[test]
    fn restore_skips_validation_but_still_needs_the_id() {
        let mut store = ProjectStore::with_clock(fixed_day);
        store.add(project("1")).unwrap();
        let patch = ProjectPatch {
            progress: Some(Some(150)),
            ..Default::default()
        };

        assert!(store.update_by_id("1", patch.clone()).is_err());
        assert_eq!(store.restore("1", patch.clone()).unwrap().progress, Some(150));
        assert_eq!(
            store.restore("nope", patch).unwrap_err(),
            StoreError::NotFound("nope".into())
        );
    }
}
