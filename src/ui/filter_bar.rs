use automation_dashboard::{Department, FilterCriteria, Project, ProjectStatus};
use egui::{RichText, Ui};

use crate::ui::theme;

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(title).size(10.0).color(theme::TEXT_DIM).strong());
    ui.add_space(2.0);
}

fn dot(ui: &mut Ui, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 4.0, color);
}

/// Render the search box and status/department toggles.
pub fn show_filter_bar(criteria: &mut FilterCriteria, projects: &[Project], ui: &mut Ui) {
    ui.label(RichText::new("Filters").strong().size(15.0).color(theme::TEXT_PRIMARY));

    section(ui, "SEARCH");
    ui.horizontal(|ui| {
        ui.label(egui_phosphor::regular::MAGNIFYING_GLASS);
        ui.add(
            egui::TextEdit::singleline(&mut criteria.search)
                .hint_text("Name, description, department")
                .desired_width(f32::INFINITY),
        );
    });

    section(ui, "STATUS");
    for status in ProjectStatus::ALL {
        let count = projects.iter().filter(|p| p.status == status).count();
        let mut checked = criteria.status.contains(&status);
        ui.horizontal(|ui| {
            dot(ui, theme::status_color(status));
            if ui.checkbox(&mut checked, format!("{status} ({count})")).changed() {
                criteria.toggle_status(status);
            }
        });
    }

    section(ui, "DEPARTMENT");
    for department in Department::ALL {
        let count = projects.iter().filter(|p| p.department == department).count();
        let mut checked = criteria.department.contains(&department);
        ui.horizontal(|ui| {
            dot(ui, theme::department_color(department));
            if ui.checkbox(&mut checked, format!("{department} ({count})")).changed() {
                criteria.toggle_department(department);
            }
        });
    }

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(4.0);
    if ui
        .add_enabled(!criteria.is_empty(), egui::Button::new("Clear filters"))
        .clicked()
    {
        criteria.clear();
    }
}
