use std::path::Path;

use crate::error::IoError;
use crate::model::Project;

const HEADER: [&str; 11] = [
    "Id",
    "Name",
    "Description",
    "Status",
    "Department",
    "Automations",
    "Owner",
    "Team",
    "Progress",
    "Last Updated",
    "Created",
];

/// Export projects to a semicolon-delimited CSV file readable by the importer.
///
/// Dates are written as YYYY-MM-DD. Returns the number of projects written.
pub fn export_csv(projects: &[Project], path: &Path) -> Result<usize, IoError> {
    let wtr = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    write_projects(projects, wtr)
}

pub fn write_projects<W: std::io::Write>(
    projects: &[Project],
    mut wtr: csv::Writer<W>,
) -> Result<usize, IoError> {
    wtr.write_record(HEADER)?;

    for project in projects {
        wtr.write_record([
            project.id.clone(),
            project.name.clone(),
            project.description.clone(),
            project.status.label().to_string(),
            project.department.label().to_string(),
            project.automations.to_string(),
            project.owner.clone().unwrap_or_default(),
            project.team_members.join(", "),
            project.progress.map(|p| p.to_string()).unwrap_or_default(),
            project.last_updated.format("%Y-%m-%d").to_string(),
            project
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(projects.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_import::parse_csv;
    use crate::sample::sample_projects;
    use chrono::NaiveDate;

    #[test]
    fn exported_file_is_importable() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let projects = sample_projects(today);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");

        assert_eq!(export_csv(&projects, &path).unwrap(), projects.len());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(
            "Id;Name;Description;Status;Department;Automations;Owner;Team;Progress"
        ));
        let (imported, skipped) = parse_csv(&content, today).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(imported, projects);
    }

    #[test]
    fn optional_fields_export_as_empty_cells() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut project = sample_projects(today).remove(0);
        project.owner = None;
        project.progress = None;
        project.team_members.clear();

        let mut buf = Vec::new();
        let wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(&mut buf);
        write_projects(&[project], wtr).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(";Finance;12;;;;"));
    }
}
