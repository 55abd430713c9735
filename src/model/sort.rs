use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::project::Project;

/// Column a project list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    LastUpdated,
    CreatedAt,
    Department,
    Automations,
    Progress,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Name,
        SortField::LastUpdated,
        SortField::CreatedAt,
        SortField::Department,
        SortField::Automations,
        SortField::Progress,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::LastUpdated => "Last Updated",
            SortField::CreatedAt => "Created",
            SortField::Department => "Department",
            SortField::Automations => "Automations",
            SortField::Progress => "Progress",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::LastUpdated,
            order: SortOrder::Desc,
        }
    }
}

impl SortConfig {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Clicking the active column flips direction; a new column starts ascending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.order = self.order.toggled();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }
}

/// Missing values rank after every present value.
fn cmp_optional<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order two projects by `field`; `Desc` reverses the ascending result.
pub fn compare(a: &Project, b: &Project, field: SortField, order: SortOrder) -> Ordering {
    let ascending = match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::LastUpdated => a.last_updated.cmp(&b.last_updated),
        SortField::CreatedAt => cmp_optional(a.created_at, b.created_at),
        SortField::Department => a.department.label().cmp(b.department.label()),
        SortField::Automations => a.automations.cmp(&b.automations),
        SortField::Progress => cmp_optional(a.progress, b.progress),
    };
    match order {
        SortOrder::Asc => ascending,
        SortOrder::Desc => ascending.reverse(),
    }
}

/// Stable in-place sort; ties keep their existing relative order.
pub fn sort_projects(projects: &mut [Project], config: SortConfig) {
    projects.sort_by(|a, b| compare(a, b, config.field, config.order));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{Department, NewProject};
    use chrono::NaiveDate;

    fn dated(id: &str, date: &str) -> Project {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        NewProject::new(format!("P{id}"), Department::Finance).into_project(id.into(), date)
    }

    fn ids(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn last_updated_ascending_then_descending() {
        let mut list = vec![
            dated("jan", "2024-01-01"),
            dated("mar", "2024-03-01"),
            dated("feb", "2024-02-01"),
        ];
        sort_projects(&mut list, SortConfig::new(SortField::LastUpdated, SortOrder::Asc));
        assert_eq!(ids(&list), ["jan", "feb", "mar"]);

        sort_projects(&mut list, SortConfig::new(SortField::LastUpdated, SortOrder::Desc));
        assert_eq!(ids(&list), ["mar", "feb", "jan"]);
    }

    #[test]
    fn missing_created_at_sorts_last_ascending_and_first_descending() {
        let mut undated = dated("none", "2024-01-01");
        undated.created_at = None;
        let mut list = vec![undated, dated("a", "2024-02-01"), dated("b", "2024-01-15")];

        sort_projects(&mut list, SortConfig::new(SortField::CreatedAt, SortOrder::Asc));
        assert_eq!(ids(&list), ["b", "a", "none"]);

        sort_projects(&mut list, SortConfig::new(SortField::CreatedAt, SortOrder::Desc));
        assert_eq!(ids(&list), ["none", "a", "b"]);
    }

    #[test]
    fn department_orders_by_label() {
        let mut support = dated("cs", "2024-01-01");
        support.department = Department::CustomerSupport;
        let mut logistics = dated("lo", "2024-01-01");
        logistics.department = Department::Logistics;
        let mut list = vec![logistics, support, dated("fi", "2024-01-01")];

        sort_projects(&mut list, SortConfig::new(SortField::Department, SortOrder::Asc));
        assert_eq!(ids(&list), ["cs", "fi", "lo"]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let mut list = vec![
            dated("first", "2024-01-01"),
            dated("second", "2024-01-01"),
            dated("third", "2024-01-01"),
        ];
        for p in &mut list {
            p.automations = 3;
        }
        sort_projects(&mut list, SortConfig::new(SortField::Automations, SortOrder::Desc));
        assert_eq!(ids(&list), ["first", "second", "third"]);
    }

    #[test]
    fn select_toggles_or_switches_field() {
        let mut config = SortConfig::new(SortField::Name, SortOrder::Asc);
        config.select(SortField::Name);
        assert_eq!(config.order, SortOrder::Desc);
        config.select(SortField::Automations);
        assert_eq!(config, SortConfig::new(SortField::Automations, SortOrder::Asc));
    }
}
