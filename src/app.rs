use std::path::PathBuf;
use std::sync::Arc;

use automation_dashboard::history::UndoEntry;
use automation_dashboard::io;
use automation_dashboard::model::today;
use automation_dashboard::settings::{self, AppSettings};
use automation_dashboard::{
    Department, FilterCriteria, JsonFileSource, NewProject, ProjectPatch, ProjectSource,
    ProjectStatus, ProjectStore, ProjectView, RefreshStatus, Refresher, SampleSource, SortConfig,
    UndoHistory,
};

use crate::ui;
use crate::ui::project_editor::EditorDraft;

/// Fields of the "Add Project" dialog.
pub struct NewProjectForm {
    pub name: String,
    pub description: String,
    pub department: Department,
    pub owner: String,
    pub automations: u32,
}

impl Default for NewProjectForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            department: Department::Finance,
            owner: String::new(),
            automations: 0,
        }
    }
}

/// Main application state.
pub struct DashboardApp {
    pub store: ProjectStore,
    pub criteria: FilterCriteria,
    pub sort: SortConfig,
    pub view: ProjectView,
    pub history: UndoHistory,
    pub refresher: Refresher,
    pub settings: AppSettings,
    settings_path: PathBuf,

    pub selected: Option<String>,
    pub editor: Option<EditorDraft>,

    // Dialog state
    pub show_add_project: bool,
    pub show_about: bool,
    pub new_project: NewProjectForm,

    pub status_message: String,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: tokio::runtime::Handle) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = settings::settings_path();
        let settings = AppSettings::load(&settings_path);
        let source = source_for(&settings);

        let repaint_ctx = cc.egui_ctx.clone();
        let refresher = Refresher::new(runtime, source, settings.refresh_latency())
            .with_notifier(move || repaint_ctx.request_repaint());

        let mut app = Self {
            store: ProjectStore::new(),
            criteria: FilterCriteria::default(),
            sort: settings.sort,
            view: ProjectView::new(),
            history: UndoHistory::with_capacity(settings.undo_depth),
            refresher,
            settings,
            settings_path,
            selected: None,
            editor: None,
            show_add_project: false,
            show_about: false,
            new_project: NewProjectForm::default(),
            status_message: "Ready".to_string(),
        };
        app.refresh();
        app
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }

    // --- Data source operations ---

    pub fn refresh(&mut self) {
        self.refresher.trigger(&mut self.store);
        self.status_message = format!("Loading {}...", self.refresher.source_label());
    }

    pub fn open_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Project Collection", &["json"])
            .pick_file()
        {
            self.refresher
                .set_source(Arc::new(JsonFileSource::new(path.clone())));
            self.settings.data_file = Some(path);
            self.persist_settings();
            self.history.clear();
            self.refresh();
        }
    }

    pub fn use_sample_data(&mut self) {
        self.refresher.set_source(Arc::new(SampleSource));
        self.settings.data_file = None;
        self.persist_settings();
        self.history.clear();
        self.refresh();
    }

    pub fn save_json(&mut self) {
        let default_name = self
            .settings
            .data_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("projects.json")
            .to_string();
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Project Collection", &["json"])
            .set_file_name(&default_name)
            .save_file()
        {
            match io::save_projects(self.store.projects(), &path) {
                Ok(()) => {
                    self.status_message = format!("Saved {} projects", self.store.len());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "save failed");
                    self.status_message = format!("Error saving: {e}");
                }
            }
        }
    }

    pub fn import_csv(&mut self) {
        // Guard: importing replaces the whole collection
        if !self.store.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current projects. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match io::csv_import::import_csv(&path, today()) {
                Ok((projects, skipped)) => {
                    self.cancel_refresh();
                    let dropped = self.store.set_all(projects);
                    self.history.clear();
                    self.select(None);
                    let count = self.store.len();
                    self.status_message = if skipped + dropped > 0 {
                        format!("Imported {count} projects ({} rows skipped)", skipped + dropped)
                    } else {
                        format!("Imported {count} projects")
                    };
                }
                Err(e) => {
                    tracing::warn!(error = %e, "CSV import failed");
                    self.status_message = format!("CSV import failed: {e}");
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.store.is_empty() {
            self.status_message = "Nothing to export, there are no projects".to_string();
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("projects.csv")
            .save_file()
        {
            match io::csv_export::export_csv(self.store.projects(), &path) {
                Ok(count) => self.status_message = format!("Exported {count} projects to CSV"),
                Err(e) => {
                    tracing::warn!(error = %e, "CSV export failed");
                    self.status_message = format!("CSV export failed: {e}");
                }
            }
        }
    }

    pub fn open_settings_folder(&mut self) {
        let dir = settings::config_dir();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|()| open::that(&dir)) {
            self.status_message = format!("Could not open {}: {e}", dir.display());
        }
    }

    /// Stop a pending refresh before writing to the store directly, otherwise its
    /// result would replace the write when it lands.
    fn cancel_refresh(&mut self) {
        if self.refresher.cancel(&mut self.store) {
            tracing::info!("pending refresh cancelled by a local change");
        }
    }

    // --- Project operations ---

    pub fn select(&mut self, id: Option<String>) {
        self.editor = id
            .as_deref()
            .and_then(|id| self.store.get(id))
            .map(EditorDraft::from_project);
        self.selected = id;
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        if self.sort != sort {
            self.sort = sort;
            self.settings.sort = sort;
            self.persist_settings();
        }
    }

    pub fn change_status(&mut self, id: &str, status: ProjectStatus) {
        self.cancel_refresh();
        match self.store.change_status(id, status) {
            Ok(change) if change.previous == change.current => {}
            Ok(change) => {
                self.history.push(UndoEntry::StatusChange {
                    id: id.to_string(),
                    previous: change.previous,
                });
                let name = self.store.get(id).map(|p| p.name.clone()).unwrap_or_default();
                self.status_message = format!(
                    "'{name}' {} → {}  (Ctrl+Z to undo)",
                    change.previous, change.current
                );
                self.resync_editor();
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn save_edit(&mut self) {
        let (Some(id), Some(draft)) = (self.selected.clone(), self.editor.as_ref()) else {
            return;
        };
        let Some(original) = self.store.get(&id) else {
            self.select(None);
            return;
        };
        let patch: ProjectPatch = draft.to_patch(original);
        if patch.is_empty() {
            return;
        }
        let previous = original.inverse_of(&patch);
        self.cancel_refresh();
        match self.store.update_by_id(&id, patch) {
            Ok(project) => {
                self.status_message = format!("Updated '{}'", project.name);
                self.history.push(UndoEntry::FieldEdit { id, previous });
                self.resync_editor();
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn delete_project(&mut self, id: &str) {
        self.cancel_refresh();
        match self.store.delete_by_id(id) {
            Ok(removed) => {
                if self.selected.as_deref() == Some(id) {
                    self.select(None);
                }
                self.status_message = format!("Deleted '{}'", removed.name);
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn create_project_from_dialog(&mut self) -> bool {
        let form = &self.new_project;
        let mut new = NewProject::new(form.name.trim(), form.department);
        new.description = form.description.trim().to_string();
        new.automations = form.automations;
        let owner = form.owner.trim();
        if !owner.is_empty() {
            new.owner = Some(owner.to_string());
            new.team_members = vec![owner.to_string()];
        }

        self.cancel_refresh();
        match self.store.create(new) {
            Ok(project) => {
                let id = project.id.clone();
                self.status_message = format!("Added '{}'", project.name);
                self.new_project = NewProjectForm::default();
                self.select(Some(id));
                true
            }
            Err(e) => {
                self.status_message = e.to_string();
                false
            }
        }
    }

    pub fn undo(&mut self) {
        if !self.history.can_undo() {
            return;
        }
        self.cancel_refresh();
        match self.history.undo(&mut self.store) {
            Some(Ok(entry)) => {
                self.status_message = format!("Undo: {}", entry.describe());
                self.resync_editor();
            }
            Some(Err(e)) => self.status_message = format!("Nothing to undo: {e}"),
            None => {}
        }
    }

    fn resync_editor(&mut self) {
        let selected = self.selected.clone();
        self.select(selected);
    }

    fn handle_refresh_status(&mut self, status: RefreshStatus) {
        self.status_message = match status {
            RefreshStatus::Loaded { count, dropped } => {
                // Undo entries refer to the old snapshot
                self.history.clear();
                if dropped > 0 {
                    format!("Loaded {count} projects ({dropped} duplicate ids dropped)")
                } else {
                    format!("Loaded {count} projects")
                }
            }
            RefreshStatus::Failed(message) => format!("Refresh failed: {message}"),
        };
        if let Some(id) = self.selected.clone() {
            if self.store.get(&id).is_none() {
                self.select(None);
            } else {
                self.resync_editor();
            }
        }
    }
}

fn source_for(settings: &AppSettings) -> Arc<dyn ProjectSource> {
    match &settings.data_file {
        Some(path) => Arc::new(JsonFileSource::new(path.clone())),
        None => Arc::new(SampleSource),
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if let Some(status) = self.refresher.poll(&mut self.store) {
            self.handle_refresh_status(status);
        }

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let typing = ctx.wants_keyboard_input();
        let should_undo = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z));
        let should_refresh = ctx.input(|i| i.key_pressed(egui::Key::F5));
        if should_undo && !typing {
            self.undo();
        }
        if should_refresh {
            self.refresh();
        }

        self.view.sync(&self.store, &self.criteria, self.sort);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        let mut undo_clicked = false;
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS_BAR)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    if self.history.can_undo() {
                        let label =
                            format!("{} Undo", egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE);
                        if ui.small_button(label).clicked() {
                            undo_clicked = true;
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Showing {} of {}",
                                self.view.rows().len(),
                                self.store.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(self.refresher.source_label())
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });
        if undo_clicked {
            self.undo();
        }

        // Left panel: filters
        egui::SidePanel::left("filter_panel")
            .default_width(ui::theme::FILTER_PANEL_WIDTH)
            .resizable(false)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(10.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui::filter_bar::show_filter_bar(&mut self.criteria, self.store.projects(), ui);
            });

        // Right panel: editor for the selected project
        let mut editor_action = ui::project_editor::EditorAction::None;
        if let Some(draft) = self.editor.as_mut() {
            egui::SidePanel::right("editor_panel")
                .default_width(ui::theme::EDITOR_PANEL_WIDTH)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(10.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    editor_action = ui::project_editor::show_project_editor(draft, ui);
                });
        }
        match editor_action {
            ui::project_editor::EditorAction::Save => self.save_edit(),
            ui::project_editor::EditorAction::Revert => self.resync_editor(),
            ui::project_editor::EditorAction::Close => self.select(None),
            ui::project_editor::EditorAction::None => {}
        }

        // Central panel: project list
        let mut table_action = ui::project_table::TableAction::None;
        let list_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::same(10.0));
        egui::CentralPanel::default().frame(list_frame).show(ctx, |ui| {
            table_action = ui::project_table::show_project_list(
                self.view.state(&self.store),
                self.selected.as_deref(),
                self.sort,
                ui,
            );
        });

        match table_action {
            ui::project_table::TableAction::Select(id) => self.select(Some(id)),
            ui::project_table::TableAction::ChangeStatus(id, status) => {
                self.change_status(&id, status)
            }
            ui::project_table::TableAction::Delete(id) => self.delete_project(&id),
            ui::project_table::TableAction::Sort(field) => {
                let mut sort = self.sort;
                sort.select(field);
                self.set_sort(sort);
            }
            ui::project_table::TableAction::Add => self.show_add_project = true,
            ui::project_table::TableAction::Retry => self.refresh(),
            ui::project_table::TableAction::None => {}
        }

        // Dialogs
        if self.show_add_project {
            ui::dialogs::show_add_project_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
