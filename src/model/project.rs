use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Lifecycle state of an automation project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Paused,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Active,
        ProjectStatus::Paused,
        ProjectStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Completed => "Completed",
        }
    }

    /// Parse a loosely formatted status string (used by CSV import).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" | "running" | "in progress" | "in-progress" | "live" => Some(Self::Active),
            "paused" | "on hold" | "on-hold" | "stopped" => Some(Self::Paused),
            "completed" | "complete" | "done" | "finished" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Business unit that owns a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Finance,
    Healthcare,
    Logistics,
    #[serde(rename = "Customer Support")]
    CustomerSupport,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Finance,
        Department::Healthcare,
        Department::Logistics,
        Department::CustomerSupport,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Department::Finance => "Finance",
            Department::Healthcare => "Healthcare",
            Department::Logistics => "Logistics",
            Department::CustomerSupport => "Customer Support",
        }
    }

    /// Parse a department label, ignoring case, spaces, hyphens and underscores.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "finance" => Some(Self::Finance),
            "healthcare" => Some(Self::Healthcare),
            "logistics" => Some(Self::Logistics),
            "customersupport" | "support" => Some(Self::CustomerSupport),
            _ => None,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One automation initiative tracked by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub automations: u32,
    pub department: Department,
    /// Refreshed on every mutation; never set by readers.
    pub last_updated: NaiveDate,
    /// Set once at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team_members: Vec<String>,
    /// Percent complete, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl Project {
    /// Progress clamped into the displayable range.
    pub fn progress_clamped(&self) -> Option<u8> {
        self.progress.map(|p| p.min(100))
    }

    /// Initials of each team member, in stored order.
    pub fn team_initials(&self) -> Vec<String> {
        self.team_members
            .iter()
            .map(|name| {
                name.split_whitespace()
                    .filter_map(|part| part.chars().next())
                    .flat_map(char::to_uppercase)
                    .take(2)
                    .collect()
            })
            .collect()
    }

    /// Touch the last-updated date.
    pub fn touch(&mut self, today: NaiveDate) {
        self.last_updated = today;
    }

    /// Shallow-merge a patch into this record. Identity and dates are not patchable.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(automations) = patch.automations {
            self.automations = automations;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(team_members) = patch.team_members {
            self.team_members = team_members;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
    }

    /// A patch that would restore the fields `patch` touches to their current values.
    pub fn inverse_of(&self, patch: &ProjectPatch) -> ProjectPatch {
        ProjectPatch {
            name: patch.name.as_ref().map(|_| self.name.clone()),
            description: patch.description.as_ref().map(|_| self.description.clone()),
            status: patch.status.map(|_| self.status),
            automations: patch.automations.map(|_| self.automations),
            department: patch.department.map(|_| self.department),
            owner: patch.owner.as_ref().map(|_| self.owner.clone()),
            team_members: patch.team_members.as_ref().map(|_| self.team_members.clone()),
            progress: patch.progress.map(|_| self.progress),
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        validate_name(&self.name)?;
        validate_progress(self.progress)
    }
}

/// Creation payload: a project without identity or dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub automations: u32,
    pub department: Department,
    pub owner: Option<String>,
    pub team_members: Vec<String>,
    pub progress: Option<u8>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, department: Department) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: ProjectStatus::Active,
            automations: 0,
            department,
            owner: None,
            team_members: Vec::new(),
            progress: None,
        }
    }

    pub fn into_project(self, id: String, today: NaiveDate) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            automations: self.automations,
            department: self.department,
            last_updated: today,
            created_at: Some(today),
            owner: self.owner,
            team_members: self.team_members,
            progress: self.progress,
        }
    }
}

/// Partial update; `None` leaves the field unchanged.
///
/// Optional fields of [`Project`] use a nested `Option` so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub automations: Option<u32>,
    pub department: Option<Department>,
    pub owner: Option<Option<String>>,
    pub team_members: Option<Vec<String>>,
    pub progress: Option<Option<u8>>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(progress) = self.progress {
            validate_progress(progress)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("project name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_progress(progress: Option<u8>) -> Result<(), StoreError> {
    match progress {
        Some(p) if p > 100 => Err(StoreError::Validation(format!(
            "progress {p} is outside 0-100"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        NewProject::new("Invoice Bot", Department::Finance)
            .into_project("1".into(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn serializes_with_camel_case_and_labels() {
        let mut p = sample();
        p.department = Department::CustomerSupport;
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["lastUpdated"], "2024-01-01");
        assert_eq!(json["createdAt"], "2024-01-01");
        assert_eq!(json["status"], "active");
        assert_eq!(json["department"], "Customer Support");
        assert!(json.get("owner").is_none());
    }

    #[test]
    fn deserializes_minimal_record() {
        let json = r#"{"id":"7","name":"Claims","status":"paused",
            "department":"Healthcare","lastUpdated":"2024-05-02"}"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, ProjectStatus::Paused);
        assert_eq!(p.automations, 0);
        assert!(p.created_at.is_none());
        assert!(p.team_members.is_empty());
    }

    #[test]
    fn apply_merges_only_given_fields() {
        let mut p = sample();
        p.apply(ProjectPatch {
            automations: Some(4),
            owner: Some(Some("Dana Reyes".into())),
            ..Default::default()
        });
        assert_eq!(p.automations, 4);
        assert_eq!(p.owner.as_deref(), Some("Dana Reyes"));
        assert_eq!(p.name, "Invoice Bot");
    }

    #[test]
    fn inverse_restores_previous_values() {
        let mut p = sample();
        let patch = ProjectPatch {
            name: Some("Renamed".into()),
            progress: Some(Some(40)),
            ..Default::default()
        };
        let inverse = p.inverse_of(&patch);
        p.apply(patch);
        p.apply(inverse);
        assert_eq!(p, sample());
    }

    #[test]
    fn validation_rejects_blank_name_and_large_progress() {
        let mut p = sample();
        p.name = "   ".into();
        assert!(matches!(p.validate(), Err(StoreError::Validation(_))));

        let patch = ProjectPatch {
            progress: Some(Some(101)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn initials_and_clamped_progress() {
        let mut p = sample();
        p.team_members = vec!["Ana Lima".into(), "bo".into()];
        p.progress = Some(180);
        assert_eq!(p.team_initials(), vec!["AL".to_string(), "B".to_string()]);
        assert_eq!(p.progress_clamped(), Some(100));
    }

    #[test]
    fn parses_loose_labels() {
        assert_eq!(Department::parse("customer-support"), Some(Department::CustomerSupport));
        assert_eq!(ProjectStatus::parse(" Done "), Some(ProjectStatus::Completed));
        assert_eq!(ProjectStatus::parse("archived"), None);
    }
}
