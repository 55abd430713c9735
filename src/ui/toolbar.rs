use automation_dashboard::{SortConfig, SortField, SortOrder};
use egui::{menu, RichText, Ui};

use crate::app::DashboardApp;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut DashboardApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Refresh              F5").clicked() {
                app.refresh();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Collection...").clicked() {
                app.open_json();
                ui.close_menu();
            }
            if ui.button("  Save Collection As...").clicked() {
                app.save_json();
                ui.close_menu();
            }
            if ui.button("  Use Sample Data").clicked() {
                app.use_sample_data();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Settings Folder").clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Edit  ").font(theme::font_menu()), |ui| {
            if ui
                .add_enabled(app.history.can_undo(), egui::Button::new("  Undo          Ctrl+Z"))
                .clicked()
            {
                app.undo();
                ui.close_menu();
            }
            if ui.button("  Add Project...").clicked() {
                app.show_add_project = true;
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Sort by").small().weak());
            let mut sort = app.sort;
            for field in SortField::ALL {
                ui.radio_value(&mut sort.field, field, field.label());
            }
            ui.separator();
            ui.radio_value(&mut sort.order, SortOrder::Asc, "Ascending");
            ui.radio_value(&mut sort.order, SortOrder::Desc, "Descending");
            ui.separator();
            if ui.button("  Reset Sort").clicked() {
                sort = SortConfig::default();
                ui.close_menu();
            }
            if ui.button("  Clear Filters").clicked() {
                app.criteria.clear();
                ui.close_menu();
            }
            app.set_sort(sort);
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned loading indicator
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if app.refresher.is_pending() {
                ui.spinner();
                ui.label(RichText::new("Refreshing").size(11.0).weak());
            }
        });
    });
}
