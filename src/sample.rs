use chrono::NaiveDate;

use crate::model::{Department, Project, ProjectStatus};

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    status: ProjectStatus,
    automations: u32,
    department: Department,
    updated_days_ago: i64,
    created_days_ago: i64,
    owner: &'static str,
    team: &'static [&'static str],
    progress: u8,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        name: "Invoice Processing",
        description: "Extracts line items from supplier invoices and posts them to the ledger",
        status: ProjectStatus::Active,
        automations: 12,
        department: Department::Finance,
        updated_days_ago: 1,
        created_days_ago: 120,
        owner: "Sarah Chen",
        team: &["Sarah Chen", "Marcus Webb", "Priya Nair"],
        progress: 78,
    },
    Seed {
        id: "2",
        name: "Patient Intake Forms",
        description: "Digitizes intake paperwork and routes records to the right clinic",
        status: ProjectStatus::Active,
        automations: 8,
        department: Department::Healthcare,
        updated_days_ago: 3,
        created_days_ago: 95,
        owner: "James Okafor",
        team: &["James Okafor", "Lena Fischer"],
        progress: 64,
    },
    Seed {
        id: "3",
        name: "Shipment Tracking",
        description: "Reconciles carrier status feeds and flags delayed deliveries",
        status: ProjectStatus::Paused,
        automations: 5,
        department: Department::Logistics,
        updated_days_ago: 14,
        created_days_ago: 200,
        owner: "Diego Alvarez",
        team: &["Diego Alvarez", "Hana Sato", "Tom Brennan", "Ava Moss"],
        progress: 41,
    },
    Seed {
        id: "4",
        name: "Ticket Triage",
        description: "Classifies inbound support tickets and drafts first responses",
        status: ProjectStatus::Active,
        automations: 15,
        department: Department::CustomerSupport,
        updated_days_ago: 0,
        created_days_ago: 60,
        owner: "Emily Park",
        team: &["Emily Park", "Noah Grant"],
        progress: 52,
    },
    Seed {
        id: "5",
        name: "RFP Response Drafting",
        description: "Assembles answers to RFP questionnaires from the approved content library",
        status: ProjectStatus::Active,
        automations: 6,
        department: Department::Finance,
        updated_days_ago: 2,
        created_days_ago: 30,
        owner: "Marcus Webb",
        team: &["Marcus Webb", "Sarah Chen"],
        progress: 35,
    },
    Seed {
        id: "6",
        name: "Claims Adjudication",
        description: "Validates insurance claims against policy rules before human review",
        status: ProjectStatus::Completed,
        automations: 10,
        department: Department::Healthcare,
        updated_days_ago: 40,
        created_days_ago: 310,
        owner: "Lena Fischer",
        team: &["Lena Fischer", "James Okafor", "Ravi Kumar"],
        progress: 100,
    },
    Seed {
        id: "7",
        name: "Warehouse Replenishment",
        description: "Forecasts stock levels and raises purchase orders automatically",
        status: ProjectStatus::Active,
        automations: 7,
        department: Department::Logistics,
        updated_days_ago: 5,
        created_days_ago: 150,
        owner: "Hana Sato",
        team: &["Hana Sato", "Diego Alvarez"],
        progress: 69,
    },
    Seed {
        id: "8",
        name: "Refund Approvals",
        description: "Auto-approves low-risk refund requests within policy limits",
        status: ProjectStatus::Paused,
        automations: 3,
        department: Department::CustomerSupport,
        updated_days_ago: 21,
        created_days_ago: 80,
        owner: "Noah Grant",
        team: &["Noah Grant"],
        progress: 20,
    },
];

/// The demonstration data set, dated relative to `today`.
pub fn sample_projects(today: NaiveDate) -> Vec<Project> {
    SEEDS
        .iter()
        .map(|seed| Project {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            status: seed.status,
            automations: seed.automations,
            department: seed.department,
            last_updated: today - chrono::Duration::days(seed.updated_days_ago),
            created_at: Some(today - chrono::Duration::days(seed.created_days_ago)),
            owner: Some(seed.owner.to_string()),
            team_members: seed.team.iter().map(|m| m.to_string()).collect(),
            progress: Some(seed.progress),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique_and_records_valid() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let projects = sample_projects(today);
        let ids: HashSet<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), projects.len());
        assert!(projects.iter().all(|p| p.validate().is_ok()));
        assert!(projects.iter().all(|p| p.last_updated <= today));
    }

    #[test]
    fn covers_every_department_and_status() {
        let projects = sample_projects(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        for dept in Department::ALL {
            assert!(projects.iter().any(|p| p.department == dept));
        }
        for status in ProjectStatus::ALL {
            assert!(projects.iter().any(|p| p.status == status));
        }
    }
}
