// Editor state for SITESMITH: snapshot history, the project store, autosave.

pub mod autosave;
pub mod content;
pub mod history;
pub mod store;

pub use autosave::Autosave;
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use store::{EditError, ProjectEditor, SectionPatch, ThemePatch};
