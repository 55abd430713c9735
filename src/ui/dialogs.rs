use automation_dashboard::Department;
use egui::{Color32, Context, RichText, Window};

use crate::app::DashboardApp;
use crate::ui::theme;

/// Render the "Add Project" dialog.
pub fn show_add_project_dialog(app: &mut DashboardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Project").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);

            let form = &mut app.new_project;
            egui::Grid::new("add_project_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut form.name).hint_text("Project name..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Description").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 48.0],
                        egui::TextEdit::multiline(&mut form.description).desired_rows(2),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Department").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_department")
                        .selected_text(form.department.label())
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            for department in Department::ALL {
                                ui.selectable_value(
                                    &mut form.department,
                                    department,
                                    department.label(),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Owner").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut form.owner).hint_text("Optional"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Automations").color(theme::TEXT_SECONDARY));
                    ui.add(egui::DragValue::new(&mut form.automations).range(0..=10_000));
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let can_create = !app.new_project.name.trim().is_empty();
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui
                    .add_enabled_ui(can_create, |ui| ui.add_sized([80.0, 28.0], create_btn))
                    .inner
                    .clicked()
                    && app.create_project_from_dialog()
                {
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_project = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut DashboardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Automation Dashboard").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Track automation projects across departments.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
