pub mod filter;
pub mod project;
pub mod sort;
pub mod status;

pub use filter::FilterCriteria;
pub use project::{Department, NewProject, Project, ProjectPatch, ProjectStatus};
pub use sort::{SortConfig, SortField, SortOrder};

use chrono::NaiveDate;

/// The local calendar date used to stamp mutations.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
