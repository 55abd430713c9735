//! Core of the automation dashboard: the project store, its filter/sort
//! pipeline, undo history and the asynchronous refresh cycle.
//!
//! Nothing here depends on the UI; the desktop shell in `main.rs` drives it.

pub mod error;
pub mod history;
pub mod io;
pub mod model;
pub mod refresh;
pub mod sample;
pub mod settings;
pub mod store;
pub mod view;

pub use error::{IoError, RefreshError, StoreError};
pub use history::{UndoEntry, UndoHistory};
pub use model::{
    Department, FilterCriteria, NewProject, Project, ProjectPatch, ProjectStatus, SortConfig,
    SortField, SortOrder,
};
pub use refresh::{JsonFileSource, ProjectSource, RefreshStatus, Refresher, SampleSource};
pub use store::ProjectStore;
pub use view::{ProjectView, ViewState};
