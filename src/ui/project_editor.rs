use automation_dashboard::{Department, Project, ProjectPatch, ProjectStatus};
use egui::{RichText, Ui};

use crate::ui::theme;

/// Actions the editor can request.
pub enum EditorAction {
    None,
    Save,
    Revert,
    Close,
}

/// Editable copy of the selected project. Changes reach the store only on save.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub department: Department,
    pub automations: u32,
    pub owner: String,
    /// Comma-separated team member names.
    pub team: String,
    pub has_progress: bool,
    pub progress: u8,
    pub last_updated: String,
    pub created_at: String,
}

impl EditorDraft {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            department: project.department,
            automations: project.automations,
            owner: project.owner.clone().unwrap_or_default(),
            team: project.team_members.join(", "),
            has_progress: project.progress.is_some(),
            progress: project.progress_clamped().unwrap_or(0),
            last_updated: project.last_updated.format("%Y-%m-%d").to_string(),
            created_at: project
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "n/a".to_string()),
        }
    }

    fn owner(&self) -> Option<String> {
        let owner = self.owner.trim();
        (!owner.is_empty()).then(|| owner.to_string())
    }

    fn team_members(&self) -> Vec<String> {
        self.team
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// A patch containing only the fields that differ from `original`.
    pub fn to_patch(&self, original: &Project) -> ProjectPatch {
        // Compare against what the editor displayed, so an out-of-range stored value
        // is only rewritten when the user moves the slider or toggles progress.
        let progress = self.has_progress.then_some(self.progress.min(100));
        let progress_changed = progress != original.progress_clamped();
        let owner = self.owner();
        let team = self.team_members();
        ProjectPatch {
            name: (self.name.trim() != original.name).then(|| self.name.trim().to_string()),
            description: (self.description != original.description)
                .then(|| self.description.clone()),
            status: (self.status != original.status).then_some(self.status),
            automations: (self.automations != original.automations).then_some(self.automations),
            department: (self.department != original.department).then_some(self.department),
            owner: (owner != original.owner).then_some(owner),
            team_members: (team != original.team_members).then_some(team),
            progress: progress_changed.then_some(progress),
        }
    }
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Render the editor for the selected project.
pub fn show_project_editor(draft: &mut EditorDraft, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Edit Project").strong().size(13.0).color(theme::TEXT_PRIMARY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(egui::Button::new(egui_phosphor::regular::X).frame(false))
                .on_hover_text("Close")
                .clicked()
            {
                action = EditorAction::Close;
            }
        });
    });
    ui.add_space(6.0);

    egui::ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;

        field_label(ui, "NAME");
        ui.add(egui::TextEdit::singleline(&mut draft.name).desired_width(f32::INFINITY));

        field_label(ui, "DESCRIPTION");
        ui.add(
            egui::TextEdit::multiline(&mut draft.description)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );

        field_label(ui, "STATUS");
        ui.horizontal(|ui| {
            for status in ProjectStatus::ALL {
                ui.selectable_value(
                    &mut draft.status,
                    status,
                    RichText::new(status.label()).color(theme::status_color(status)),
                );
            }
        });

        field_label(ui, "DEPARTMENT");
        egui::ComboBox::from_id_salt("editor_department")
            .selected_text(draft.department.label())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for department in Department::ALL {
                    ui.selectable_value(&mut draft.department, department, department.label());
                }
            });

        field_label(ui, "AUTOMATIONS");
        ui.add(egui::DragValue::new(&mut draft.automations).range(0..=10_000));

        field_label(ui, "PROGRESS");
        ui.horizontal(|ui| {
            ui.checkbox(&mut draft.has_progress, "");
            ui.add_enabled(
                draft.has_progress,
                egui::Slider::new(&mut draft.progress, 0..=100).suffix("%"),
            );
        });

        field_label(ui, "OWNER");
        ui.add(
            egui::TextEdit::singleline(&mut draft.owner)
                .hint_text("Unassigned")
                .desired_width(f32::INFINITY),
        );

        field_label(ui, "TEAM");
        ui.add(
            egui::TextEdit::singleline(&mut draft.team)
                .hint_text("Comma-separated names")
                .desired_width(f32::INFINITY),
        );

        ui.add_space(4.0);
        ui.label(
            RichText::new(format!(
                "Updated {}  ·  Created {}",
                draft.last_updated, draft.created_at
            ))
            .size(10.0)
            .color(theme::TEXT_DIM),
        );

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let save = egui::Button::new(RichText::new("Save").color(egui::Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([80.0, 26.0], save).clicked() {
                action = EditorAction::Save;
            }
            if ui.add_sized([80.0, 26.0], egui::Button::new("Revert")).clicked() {
                action = EditorAction::Revert;
            }
        });
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use automation_dashboard::NewProject;
    use chrono::NaiveDate;

    fn project() -> Project {
        let mut new = NewProject::new("Invoice Bot", Department::Finance);
        new.owner = Some("Ana Lima".into());
        new.team_members = vec!["Ana Lima".into(), "Bo Ek".into()];
        new.progress = Some(40);
        new.into_project("1".into(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn unchanged_draft_yields_empty_patch() {
        let p = project();
        assert!(EditorDraft::from_project(&p).to_patch(&p).is_empty());
    }

    #[test]
    fn patch_carries_only_edited_fields() {
        let p = project();
        let mut draft = EditorDraft::from_project(&p);
        draft.name = "  Invoice Robot ".into();
        draft.owner = "   ".into();
        draft.has_progress = false;
        draft.team = "Ana Lima,  Bo Ek ,".into();

        let patch = draft.to_patch(&p);
        assert_eq!(patch.name.as_deref(), Some("Invoice Robot"));
        assert_eq!(patch.owner, Some(None));
        assert_eq!(patch.progress, Some(None));
        assert_eq!(patch.team_members, None);
        assert_eq!(patch.status, None);
    }

    #[test]
    fn rename_leaves_out_of_range_progress_alone() {
        let mut p = project();
        p.progress = Some(150);
        let mut draft = EditorDraft::from_project(&p);
        assert_eq!(draft.progress, 100);
        draft.name = "Invoice Robot".into();

        let patch = draft.to_patch(&p);
        assert_eq!(patch.name.as_deref(), Some("Invoice Robot"));
        assert_eq!(patch.progress, None);
        assert!(patch.validate().is_ok());
    }
}
