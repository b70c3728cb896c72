//! Interval-gated persistence of the working document.
//!
//! The editor itself only tracks a dirty flag; writing the project to disk
//! is this collaborator's job. Call [`Autosave::tick`] from the host's event
//! loop; it writes when the document is dirty and the interval has elapsed,
//! then clears the flag through [`ProjectEditor::mark_saved`]. History is
//! never written, only the document.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, trace};

use sitesmith_core::project::save_project;

use crate::store::ProjectEditor;

pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct Autosave {
    interval: Duration,
    last_saved: Option<Instant>,
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_INTERVAL)
    }
}

impl Autosave {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_saved: None,
        }
    }

    /// Save if the document is dirty and the interval has elapsed since the
    /// last write. Returns whether a write happened.
    pub fn tick(
        &mut self,
        editor: &mut ProjectEditor,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<bool> {
        if !editor.is_dirty() {
            return Ok(false);
        }

        if let Some(last) = self.last_saved {
            if last.elapsed() < self.interval {
                trace!("autosave interval not elapsed yet");
                return Ok(false);
            }
        }

        self.save(editor, path)
    }

    /// Save immediately regardless of the interval (the explicit-save path).
    /// A clean document is still skipped.
    pub fn save_now(
        &mut self,
        editor: &mut ProjectEditor,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<bool> {
        if !editor.is_dirty() {
            return Ok(false);
        }
        self.save(editor, path)
    }

    fn save(&mut self, editor: &mut ProjectEditor, path: impl AsRef<Path>) -> anyhow::Result<bool> {
        let Some(project) = editor.project() else {
            return Ok(false);
        };

        save_project(&path, project)?;
        editor.mark_saved();
        self.last_saved = Some(Instant::now());

        info!(path = %path.as_ref().display(), "project autosaved");
        Ok(true)
    }
}
