use automation_dashboard::model::sort::SortOrder;
use automation_dashboard::{Project, ProjectStatus, SortConfig, SortField, ViewState};
use egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::ui::theme;

/// Actions that the project list can request.
pub enum TableAction {
    None,
    Select(String),
    ChangeStatus(String, ProjectStatus),
    Delete(String),
    Sort(SortField),
    Add,
    Retry,
}

/// Render the central panel: a placeholder while loading or on error, otherwise the table.
pub fn show_project_list(
    state: ViewState<'_>,
    selected: Option<&str>,
    sort: SortConfig,
    ui: &mut Ui,
) -> TableAction {
    let mut action = TableAction::None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Projects").strong().size(17.0).color(theme::TEXT_PRIMARY));
        if let ViewState::Ready(rows) = state {
            ui.label(RichText::new(format!("({})", rows.len())).size(11.0).color(theme::TEXT_DIM));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let btn = egui::Button::new(
                RichText::new(format!("{}  New Project", egui_phosphor::regular::PLUS))
                    .color(Color32::WHITE)
                    .size(12.0),
            )
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(5.0));
            if ui.add(btn).clicked() {
                action = TableAction::Add;
            }
        });
    });
    ui.add_space(6.0);

    match state {
        ViewState::Loading => placeholder(ui, |ui| {
            ui.spinner();
            ui.label(RichText::new("Loading projects...").color(theme::TEXT_SECONDARY));
        }),
        ViewState::Failed(message) => placeholder(ui, |ui| {
            ui.label(RichText::new("Could not load projects").strong().color(theme::DANGER));
            ui.label(RichText::new(message).color(theme::TEXT_SECONDARY));
            ui.add_space(6.0);
            let label = format!("{}  Retry", egui_phosphor::regular::ARROW_CLOCKWISE);
            if ui.button(label).clicked() {
                action = TableAction::Retry;
            }
        }),
        ViewState::Empty => placeholder(ui, |ui| {
            ui.label(RichText::new("No projects match").color(theme::TEXT_SECONDARY));
            ui.label(
                RichText::new("Adjust the filters or add a new project")
                    .size(11.0)
                    .color(theme::TEXT_DIM),
            );
        }),
        ViewState::Ready(rows) => {
            let table_action = show_table(rows, selected, sort, ui);
            if !matches!(table_action, TableAction::None) {
                action = table_action;
            }
        }
    }

    action
}

fn placeholder(ui: &mut Ui, contents: impl FnOnce(&mut Ui)) {
    ui.add_space(60.0);
    ui.vertical_centered(contents);
}

fn sort_header(ui: &mut Ui, label: &str, field: SortField, sort: SortConfig) -> bool {
    let arrow = if sort.field != field {
        ""
    } else if sort.order == SortOrder::Asc {
        egui_phosphor::regular::CARET_UP
    } else {
        egui_phosphor::regular::CARET_DOWN
    };
    let text = RichText::new(format!("{label} {arrow}"))
        .size(10.0)
        .strong()
        .color(if sort.field == field {
            theme::TEXT_PRIMARY
        } else {
            theme::TEXT_DIM
        });
    ui.add(egui::Label::new(text).sense(egui::Sense::click()))
        .on_hover_text("Sort")
        .clicked()
}

fn plain_header(ui: &mut Ui, label: &str) {
    ui.label(RichText::new(label).size(10.0).strong().color(theme::TEXT_DIM));
}

fn status_picker(ui: &mut Ui, project: &Project) -> Option<ProjectStatus> {
    let mut chosen = project.status;
    egui::ComboBox::from_id_salt(("status", project.id.as_str()))
        .width(100.0)
        .selected_text(
            RichText::new(project.status.label()).color(theme::status_color(project.status)),
        )
        .show_ui(ui, |ui| {
            for status in ProjectStatus::ALL {
                ui.selectable_value(
                    &mut chosen,
                    status,
                    RichText::new(status.label()).color(theme::status_color(status)),
                );
            }
        });
    (chosen != project.status).then_some(chosen)
}

fn avatars(ui: &mut Ui, project: &Project) {
    const SHOWN: usize = 3;
    for (name, initials) in project
        .team_members
        .iter()
        .zip(project.team_initials())
        .take(SHOWN)
    {
        let (rect, resp) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 10.0, theme::avatar_color(name));
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            initials,
            theme::font_small(),
            Color32::WHITE,
        );
        resp.on_hover_text(name.as_str());
    }
    if project.team_members.len() > SHOWN {
        ui.label(
            RichText::new(format!("+{}", project.team_members.len() - SHOWN))
                .size(10.0)
                .color(theme::TEXT_DIM),
        );
    }
}

fn show_table(
    rows: &[Project],
    selected: Option<&str>,
    sort: SortConfig,
    ui: &mut Ui,
) -> TableAction {
    let mut action = TableAction::None;

    TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(180.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::exact(28.0))
        .header(theme::HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                if sort_header(ui, "PROJECT", SortField::Name, sort) {
                    action = TableAction::Sort(SortField::Name);
                }
            });
            header.col(|ui| plain_header(ui, "STATUS"));
            header.col(|ui| {
                if sort_header(ui, "DEPARTMENT", SortField::Department, sort) {
                    action = TableAction::Sort(SortField::Department);
                }
            });
            header.col(|ui| {
                if sort_header(ui, "AUTOMATIONS", SortField::Automations, sort) {
                    action = TableAction::Sort(SortField::Automations);
                }
            });
            header.col(|ui| {
                if sort_header(ui, "PROGRESS", SortField::Progress, sort) {
                    action = TableAction::Sort(SortField::Progress);
                }
            });
            header.col(|ui| plain_header(ui, "TEAM"));
            header.col(|ui| {
                if sort_header(ui, "UPDATED", SortField::LastUpdated, sort) {
                    action = TableAction::Sort(SortField::LastUpdated);
                }
            });
            header.col(|ui| {
                if sort_header(ui, "CREATED", SortField::CreatedAt, sort) {
                    action = TableAction::Sort(SortField::CreatedAt);
                }
            });
            header.col(|_| {});
        })
        .body(|mut body| {
            for project in rows {
                let is_selected = selected == Some(project.id.as_str());
                body.row(theme::ROW_HEIGHT, |mut row| {
                    row.set_selected(is_selected);

                    row.col(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&project.name).size(12.5).strong());
                            if let Some(owner) = &project.owner {
                                ui.label(RichText::new(owner).size(10.0).color(theme::TEXT_DIM));
                            }
                        });
                    });
                    row.col(|ui| {
                        if let Some(status) = status_picker(ui, project) {
                            action = TableAction::ChangeStatus(project.id.clone(), status);
                        }
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(project.department.label())
                                .size(11.5)
                                .color(theme::department_color(project.department)),
                        );
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(project.automations.to_string()).size(11.5));
                    });
                    row.col(|ui| match project.progress_clamped() {
                        Some(p) => {
                            ui.add(
                                egui::ProgressBar::new(f32::from(p) / 100.0)
                                    .desired_width(90.0)
                                    .text(format!("{p}%"))
                                    .fill(theme::status_color(project.status)),
                            );
                        }
                        None => {
                            ui.label(RichText::new("n/a").size(10.0).color(theme::TEXT_DIM));
                        }
                    });
                    row.col(|ui| avatars(ui, project));
                    row.col(|ui| {
                        ui.label(
                            RichText::new(project.last_updated.format("%Y-%m-%d").to_string())
                                .size(11.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                    });
                    row.col(|ui| {
                        let created = project
                            .created_at
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_else(|| "n/a".to_string());
                        ui.label(RichText::new(created).size(11.0).color(theme::TEXT_DIM));
                    });
                    row.col(|ui| {
                        let del = ui
                            .add(egui::Button::new(
                                RichText::new(egui_phosphor::regular::TRASH)
                                    .size(12.0)
                                    .color(theme::TEXT_DIM),
                            )
                            .frame(false))
                            .on_hover_text("Delete project");
                        if del.clicked() {
                            action = TableAction::Delete(project.id.clone());
                        }
                    });

                    if row.response().clicked() && matches!(action, TableAction::None) {
                        action = TableAction::Select(project.id.clone());
                    }
                });
            }
        });

    action
}
