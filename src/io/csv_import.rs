use std::path::Path;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::IoError;
use crate::model::{Department, Project, ProjectStatus};

/// Columns the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Name,
    Description,
    Status,
    Department,
    Automations,
    Owner,
    Team,
    Progress,
    LastUpdated,
    Created,
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "id" | "projectid" | "key" => Some(Column::Id),
        "name" | "project" | "projectname" | "title" | "automation" => Some(Column::Name),
        "description" | "notes" | "details" | "summary" => Some(Column::Description),
        "status" | "state" => Some(Column::Status),
        "department" | "dept" | "businessunit" | "unit" => Some(Column::Department),
        "automations" | "automationcount" | "bots" => Some(Column::Automations),
        "owner" | "lead" | "responsible" => Some(Column::Owner),
        "team" | "members" | "teammembers" | "people" => Some(Column::Team),
        "progress" | "complete" | "percentcomplete" | "done" => Some(Column::Progress),
        "lastupdated" | "updated" | "updatedat" | "modified" => Some(Column::LastUpdated),
        "created" | "createdat" | "createddate" => Some(Column::Created),
        _ => None,
    }
}

fn parse_progress(s: &str) -> Option<u8> {
    let value: u8 = s.trim().trim_end_matches('%').trim().parse().ok()?;
    (value <= 100).then_some(value)
}

fn split_members(s: &str) -> Vec<String> {
    s.split([',', '|', '/'])
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Import projects from a CSV file.
///
/// Auto-detects the delimiter and matches headers flexibly. Name and department
/// columns are required. Returns `(projects, skipped_count)`.
pub fn import_csv(path: &Path, today: NaiveDate) -> Result<(Vec<Project>, usize), IoError> {
    let content = std::fs::read_to_string(path)?;
    parse_csv(&content, today)
}

pub fn parse_csv(content: &str, today: NaiveDate) -> Result<(Vec<Project>, usize), IoError> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let has = |col: Column| columns.contains(&Some(col));
    if !has(Column::Name) || !has(Column::Department) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(IoError::MissingColumns(found.join(", ")));
    }

    let mut projects = Vec::new();
    let mut skipped = 0;

    for (i, record) in reader.records().enumerate() {
        let row = i + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let field = |col: Column| {
            columns
                .iter()
                .position(|c| *c == Some(col))
                .and_then(|idx| record.get(idx))
                .filter(|v| !v.is_empty())
        };

        let Some(name) = field(Column::Name) else {
            skipped += 1;
            continue;
        };

        let department = match field(Column::Department).and_then(Department::parse) {
            Some(d) => d,
            None => {
                tracing::warn!(
                    row,
                    value = field(Column::Department).unwrap_or(""),
                    "skipping row: unknown department"
                );
                skipped += 1;
                continue;
            }
        };

        let status = match field(Column::Status) {
            None => ProjectStatus::Active,
            Some(raw) => match ProjectStatus::parse(raw) {
                Some(s) => s,
                None => {
                    tracing::warn!(row, value = raw, "skipping row: unknown status");
                    skipped += 1;
                    continue;
                }
            },
        };

        let progress = field(Column::Progress).and_then(|raw| {
            let parsed = parse_progress(raw);
            if parsed.is_none() {
                tracing::warn!(row, value = raw, "ignoring invalid progress");
            }
            parsed
        });

        projects.push(Project {
            id: field(Column::Id)
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: name.to_string(),
            description: field(Column::Description).unwrap_or_default().to_string(),
            status,
            automations: field(Column::Automations)
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            department,
            last_updated: field(Column::LastUpdated).and_then(parse_date).unwrap_or(today),
            created_at: Some(field(Column::Created).and_then(parse_date).unwrap_or(today)),
            owner: field(Column::Owner).map(str::to_string),
            team_members: field(Column::Team).map(split_members).unwrap_or_default(),
            progress,
        });
    }

    if projects.is_empty() && skipped > 0 {
        return Err(IoError::Empty(format!(
            "No valid projects found in CSV ({skipped} rows skipped)"
        )));
    }
    if projects.is_empty() {
        return Err(IoError::Empty("CSV file is empty or has no data rows".to_string()));
    }

    Ok((projects, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn parses_semicolon_file_with_loose_headers() {
        let csv = "Project Name;Dept;Status;Automations;Members;Progress;Last-Updated\n\
                   Invoice Bot;Finance;Active;4;Ana Lima, Bo Ek;45%;15/03/2024\n\
                   Ticket Triage;customer support;done;2;;;";
        let (projects, skipped) = parse_csv(csv, today()).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(projects.len(), 2);

        let bot = &projects[0];
        assert_eq!(bot.department, Department::Finance);
        assert_eq!(bot.automations, 4);
        assert_eq!(bot.team_members, ["Ana Lima", "Bo Ek"]);
        assert_eq!(bot.progress, Some(45));
        assert_eq!(bot.last_updated, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let triage = &projects[1];
        assert_eq!(triage.status, ProjectStatus::Completed);
        assert_eq!(triage.department, Department::CustomerSupport);
        assert_eq!(triage.last_updated, today());
        assert!(triage.team_members.is_empty());
    }

    #[test]
    fn team_header_maps_to_members() {
        let csv = "Name;Department;Team\nInvoice Bot;Finance;Ana Lima | Bo Ek";
        let (projects, _) = parse_csv(csv, today()).unwrap();
        assert_eq!(projects[0].team_members, ["Ana Lima", "Bo Ek"]);
    }

    #[test]
    fn skips_rows_with_unknown_values() {
        let csv = "name,department,status\n\
                   Good,Logistics,paused\n\
                   Bad Dept,Marketing,active\n\
                   Bad Status,Finance,archived\n\
                   ,Finance,active";
        let (projects, skipped) = parse_csv(csv, today()).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].status, ProjectStatus::Paused);
        assert_eq!(skipped, 3);
    }

    #[test]
    fn requires_name_and_department_columns() {
        let err = parse_csv("title,status\nA,active", today()).unwrap_err();
        assert!(matches!(err, IoError::MissingColumns(_)));
    }

    #[test]
    fn all_rows_invalid_is_an_error() {
        let err = parse_csv("name;department\nA;Nowhere", today()).unwrap_err();
        assert!(matches!(err, IoError::Empty(_)));
    }

    #[test]
    fn progress_over_hundred_is_dropped() {
        assert_eq!(parse_progress("140"), None);
        assert_eq!(parse_progress(" 100 % "), Some(100));
    }
}
