use std::collections::BTreeSet;

use super::project::{Department, Project, ProjectStatus};

/// User-controlled narrowing rules. An empty field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: BTreeSet<ProjectStatus>,
    pub department: BTreeSet<Department>,
    pub search: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.department.is_empty() && self.search.trim().is_empty()
    }

    pub fn toggle_status(&mut self, status: ProjectStatus) {
        if !self.status.remove(&status) {
            self.status.insert(status);
        }
    }

    pub fn toggle_department(&mut self, department: Department) {
        if !self.department.remove(&department) {
            self.department.insert(department);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Whether `project` passes every non-empty clause of `criteria`.
pub fn matches(project: &Project, criteria: &FilterCriteria) -> bool {
    if !criteria.status.is_empty() && !criteria.status.contains(&project.status) {
        return false;
    }
    if !criteria.department.is_empty() && !criteria.department.contains(&project.department) {
        return false;
    }

    let needle = criteria.search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    project.name.to_lowercase().contains(&needle)
        || project.description.to_lowercase().contains(&needle)
        || project.department.label().to_lowercase().contains(&needle)
}
