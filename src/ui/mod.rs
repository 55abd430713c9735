pub mod dialogs;
pub mod filter_bar;
pub mod project_editor;
pub mod project_table;
pub mod theme;
pub mod toolbar;
