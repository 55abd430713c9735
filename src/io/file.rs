use std::path::Path;

use crate::error::IoError;
use crate::model::Project;

/// Save a project collection to a JSON file.
pub fn save_projects(projects: &[Project], path: &Path) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(projects)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a project collection from a JSON file.
pub fn load_projects(path: &Path) -> Result<Vec<Project>, IoError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_projects;
    use chrono::NaiveDate;

    #[test]
    fn saved_collection_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let projects = sample_projects(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        save_projects(&projects, &path).unwrap();
        assert_eq!(load_projects(&path).unwrap(), projects);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{\"id\": 1").unwrap();
        assert!(matches!(load_projects(&path), Err(IoError::Json(_))));
    }
}
