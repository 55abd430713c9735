use chrono::NaiveDate;

use super::project::{Project, ProjectStatus};

/// Apply a status change, stamping today's date.
///
/// Every status is reachable from every other status.
pub fn change_status(project: &Project, status: ProjectStatus) -> Project {
    change_status_on(project, status, super::today())
}

pub fn change_status_on(project: &Project, status: ProjectStatus, today: NaiveDate) -> Project {
    let mut updated = project.clone();
    updated.status = status;
    updated.touch(today);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{Department, NewProject};

    #[test]
    fn only_status_and_date_change() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut new = NewProject::new("Invoice Bot", Department::Finance);
        new.status = ProjectStatus::Paused;
        new.automations = 3;
        let before = new.into_project("1".into(), jan);

        let after = change_status(&before, ProjectStatus::Active);

        assert_eq!(after.status, ProjectStatus::Active);
        assert_eq!(after.last_updated, crate::model::today());
        assert_eq!(after.id, "1");
        assert_eq!(after.automations, 3);
        assert_eq!(after.created_at, Some(jan));
        assert_eq!(before.status, ProjectStatus::Paused);
    }

    #[test]
    fn any_status_reaches_any_other() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let base = NewProject::new("Router", Department::Logistics).into_project("r".into(), day);
        for from in ProjectStatus::ALL {
            for to in ProjectStatus::ALL {
                let mut p = base.clone();
                p.status = from;
                assert_eq!(change_status_on(&p, to, day).status, to);
            }
        }
    }
}
