use crate::model::filter::{self, FilterCriteria};
use crate::model::sort::{self, SortConfig};
use crate::model::Project;
use crate::store::ProjectStore;

/// Filter then stable-sort a snapshot. The input is never mutated.
pub fn compose(
    projects: &[Project],
    criteria: &FilterCriteria,
    config: SortConfig,
) -> Vec<Project> {
    let mut rows: Vec<Project> = projects
        .iter()
        .filter(|p| filter::matches(p, criteria))
        .cloned()
        .collect();
    sort::sort_projects(&mut rows, config);
    rows
}

/// What the project list should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState<'a> {
    Loading,
    Failed(&'a str),
    /// Nothing matches the active criteria.
    Empty,
    Ready(&'a [Project]),
}

/// Memoised projection of the store, recomputed only when its inputs change.
#[derive(Debug, Default)]
pub struct ProjectView {
    key: Option<(u64, FilterCriteria, SortConfig)>,
    rows: Vec<Project>,
}

impl ProjectView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cached rows up to date. Returns `true` if they were recomputed.
    pub fn sync(
        &mut self,
        store: &ProjectStore,
        criteria: &FilterCriteria,
        config: SortConfig,
    ) -> bool {
        let fresh = match &self.key {
            Some((revision, cached_criteria, cached_config)) => {
                *revision == store.revision()
                    && cached_criteria == criteria
                    && *cached_config == config
            }
            None => false,
        };
        if fresh {
            return false;
        }

        self.rows = compose(store.projects(), criteria, config);
        self.key = Some((store.revision(), criteria.clone(), config));
        tracing::debug!(rows = self.rows.len(), total = store.len(), "project view recomputed");
        true
    }

    pub fn rows(&self) -> &[Project] {
        &self.rows
    }

    /// Loading and error states take precedence over the (possibly stale) rows.
    pub fn state<'a>(&'a self, store: &'a ProjectStore) -> ViewState<'a> {
        if store.is_loading() {
            ViewState::Loading
        } else if let Some(message) = store.error() {
            ViewState::Failed(message)
        } else if self.rows.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready(&self.rows)
        }
    }
}
