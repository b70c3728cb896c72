//! The project store: working document, dirty flag, snapshot history and
//! section selection, with every mutation funneled through
//! [`ProjectEditor::record_change`].
//!
//! Mutations are atomic: the mutator runs against a clone of the working
//! document, and only a successful run commits the clone, records a
//! checkpoint and sets the dirty flag. A failing mutator leaves the editor
//! exactly as it was.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, trace};
use uuid::Uuid;

use sitesmith_core::{
    ColorRole, DocumentError, Project, Section, SectionSettings, SectionType, Spacing, Theme,
    ThemeColors, ThemeFonts,
};

use crate::content::{default_content, set_deep};
use crate::history::{History, HistoryEntry};

/// Sparse update for a section. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPatch {
    pub enabled: Option<bool>,
    pub content: Option<Value>,
    pub settings: Option<SectionSettings>,
}

impl SectionPatch {
    fn apply(self, section: &mut Section) {
        if let Some(enabled) = self.enabled {
            section.enabled = enabled;
        }
        if let Some(content) = self.content {
            section.content = content;
        }
        if let Some(settings) = self.settings {
            section.settings = settings;
        }
    }
}

/// Sparse update for the theme. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemePatch {
    pub colors: Option<ThemeColors>,
    pub fonts: Option<ThemeFonts>,
    pub border_radius: Option<Spacing>,
}

impl ThemePatch {
    fn apply(self, theme: &mut Theme) {
        if let Some(colors) = self.colors {
            theme.colors = colors;
        }
        if let Some(fonts) = self.fonts {
            theme.fonts = fonts;
        }
        if let Some(border_radius) = self.border_radius {
            theme.border_radius = border_radius;
        }
    }
}

/// Editing errors. By the atomicity rule, any `Err` from an operation means
/// the document, history and dirty flag are untouched.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("unknown section id: {section_id}")]
    UnknownSection { section_id: Uuid },

    #[error("section index {index} out of range (len {len})")]
    SectionIndexOutOfRange { index: usize, len: usize },

    #[error("invalid content path {path:?}: {reason}")]
    InvalidContentPath { path: String, reason: String },

    #[error("invalid document: {0}")]
    Document(#[from] DocumentError),
}

/// Owns the working document and its edit history.
///
/// Callers only ever see `&Project`; all mutation goes through the recorded
/// operations below (or [`record_change`](Self::record_change) directly), so
/// every accepted edit is one undoable checkpoint.
#[derive(Debug, Default)]
pub struct ProjectEditor {
    project: Option<Project>,
    dirty: bool,
    history: History,
    selected_section: Option<Uuid>,
}

impl ProjectEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The working document, if a project is open.
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// True while the working document has changes not yet persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the persistence layer after a successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected_section(&self) -> Option<Uuid> {
        self.selected_section
    }

    /// Selection is UI state: no checkpoint, no dirty flag.
    pub fn select_section(&mut self, section_id: Option<Uuid>) {
        self.selected_section = section_id;
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Open a freshly created project. History restarts with this document
    /// as its only entry.
    pub fn create_project(&mut self, project: Project) {
        info!(project_id = %project.id, name = %project.name, "project created");
        self.open(project, "project created");
    }

    /// Open a project loaded from storage.
    pub fn load_project(&mut self, project: Project) {
        info!(project_id = %project.id, name = %project.name, "project loaded");
        self.open(project, "project loaded");
    }

    fn open(&mut self, project: Project, description: &str) {
        self.history.reset(HistoryEntry::new(project.clone(), description));
        self.project = Some(project);
        self.dirty = false;
        self.selected_section = None;
    }

    /// Discard the document and all history (user starts over).
    pub fn clear_project(&mut self) {
        info!("project cleared");
        self.project = None;
        self.dirty = false;
        self.history.clear();
        self.selected_section = None;
    }

    // ------------------------------------------------------------------
    // The checkpoint protocol
    // ------------------------------------------------------------------

    /// Apply `mutate` to a clone of the working document and, if it
    /// succeeds, commit the clone as the new working document with one
    /// history checkpoint. Returns `Ok(false)` as a silent no-op when no
    /// project is open, and propagates the mutator's error unmodified (with
    /// no state change) when it fails.
    pub fn record_change<E, F>(&mut self, description: &str, mutate: F) -> Result<bool, E>
    where
        F: FnOnce(&mut Project) -> Result<(), E>,
    {
        let Some(current) = self.project.as_ref() else {
            trace!(description, "no open project, change ignored");
            return Ok(false);
        };

        let mut draft = current.clone();
        mutate(&mut draft)?;

        self.history
            .push(HistoryEntry::new(draft.clone(), description));
        self.project = Some(draft);
        self.dirty = true;

        debug!(
            description,
            entries = self.history.len(),
            "checkpoint recorded"
        );
        Ok(true)
    }

    /// Step back one checkpoint. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let restored = match self.history.step_back() {
            Some(entry) => entry.state.clone(),
            None => {
                trace!("nothing to undo");
                return false;
            }
        };

        self.project = Some(restored);
        // The working document now differs from whatever was last saved.
        self.dirty = true;
        self.reconcile_selection();
        true
    }

    /// Step forward one checkpoint. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let restored = match self.history.step_forward() {
            Some(entry) => entry.state.clone(),
            None => {
                trace!("nothing to redo");
                return false;
            }
        };

        self.project = Some(restored);
        self.dirty = true;
        self.reconcile_selection();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo/redo can restore a document that predates the selected section.
    fn reconcile_selection(&mut self) {
        let still_present = match (self.selected_section, self.project.as_ref()) {
            (Some(id), Some(project)) => project.section(id).is_some(),
            _ => false,
        };
        if !still_present {
            self.selected_section = None;
        }
    }

    // ------------------------------------------------------------------
    // Section operations
    // ------------------------------------------------------------------

    /// Apply a sparse patch to a section.
    pub fn update_section(
        &mut self,
        section_id: Uuid,
        patch: SectionPatch,
    ) -> Result<bool, EditError> {
        self.record_change("section updated", |project| {
            let section = project
                .section_mut(section_id)
                .ok_or(EditError::UnknownSection { section_id })?;
            patch.apply(section);
            section.settings.validate()?;
            Ok(())
        })
    }

    /// Set one field inside a section's content by dotted path.
    // TODO: rapid per-keystroke text edits land here one checkpoint each;
    // form panels should debounce before calling in.
    pub fn update_section_content(
        &mut self,
        section_id: Uuid,
        path: &str,
        value: Value,
    ) -> Result<bool, EditError> {
        self.record_change(&format!("content edited: {path}"), |project| {
            let section = project
                .section_mut(section_id)
                .ok_or(EditError::UnknownSection { section_id })?;
            set_deep(&mut section.content, path, value)
        })
    }

    /// Insert a new section with default content after `after_index`
    /// (append when `None`) and select it.
    pub fn add_section(
        &mut self,
        kind: SectionType,
        after_index: Option<usize>,
    ) -> Result<bool, EditError> {
        let mut new_id = None;
        let recorded = self.record_change(&format!("section added: {kind:?}"), |project| {
            let insert_at = match after_index {
                Some(index) if index < project.sections.len() => index + 1,
                Some(index) => {
                    return Err(EditError::SectionIndexOutOfRange {
                        index,
                        len: project.sections.len(),
                    })
                }
                None => project.sections.len(),
            };

            let section = Section::new(kind, default_content(kind));
            new_id = Some(section.id);
            project.sections.insert(insert_at, section);
            project.renumber_sections();
            Ok(())
        })?;

        if recorded {
            self.selected_section = new_id;
        }
        Ok(recorded)
    }

    /// Remove a section; drops the selection if it pointed there.
    pub fn remove_section(&mut self, section_id: Uuid) -> Result<bool, EditError> {
        let recorded = self.record_change("section removed", |project| {
            let index = project
                .section_index(section_id)
                .ok_or(EditError::UnknownSection { section_id })?;
            project.sections.remove(index);
            project.renumber_sections();
            Ok::<(), EditError>(())
        })?;

        if recorded && self.selected_section == Some(section_id) {
            self.selected_section = None;
        }
        Ok(recorded)
    }

    /// Move a section from one position to another.
    pub fn reorder_sections(&mut self, from: usize, to: usize) -> Result<bool, EditError> {
        self.record_change("sections reordered", |project| {
            let len = project.sections.len();
            for index in [from, to] {
                if index >= len {
                    return Err(EditError::SectionIndexOutOfRange { index, len });
                }
            }

            let section = project.sections.remove(from);
            project.sections.insert(to, section);
            project.renumber_sections();
            Ok(())
        })
    }

    /// Flip a section's enabled flag.
    pub fn toggle_section(&mut self, section_id: Uuid) -> Result<bool, EditError> {
        self.record_change("section toggled", |project| {
            let section = project
                .section_mut(section_id)
                .ok_or(EditError::UnknownSection { section_id })?;
            section.enabled = !section.enabled;
            Ok(())
        })
    }

    /// Deep-copy a section under a fresh id, insert it right after the
    /// original, and select the copy.
    pub fn duplicate_section(&mut self, section_id: Uuid) -> Result<bool, EditError> {
        let mut new_id = None;
        let recorded = self.record_change("section duplicated", |project| {
            let index = project
                .section_index(section_id)
                .ok_or(EditError::UnknownSection { section_id })?;

            let mut duplicate = project.sections[index].clone();
            duplicate.id = Uuid::new_v4();
            new_id = Some(duplicate.id);
            project.sections.insert(index + 1, duplicate);
            project.renumber_sections();
            Ok::<(), EditError>(())
        })?;

        if recorded {
            self.selected_section = new_id;
        }
        Ok(recorded)
    }

    // ------------------------------------------------------------------
    // Theme operations
    // ------------------------------------------------------------------

    /// Apply a sparse patch to the theme.
    pub fn update_theme(&mut self, patch: ThemePatch) -> Result<bool, EditError> {
        self.record_change("theme updated", |project| {
            patch.apply(&mut project.theme);
            project.theme.validate()?;
            Ok(())
        })
    }

    /// Change a single theme color.
    pub fn update_theme_color(
        &mut self,
        role: ColorRole,
        value: &str,
    ) -> Result<bool, EditError> {
        self.record_change(&format!("color changed: {role:?}"), |project| {
            project.theme.colors.set(role, value)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project::new("Test Site", "blank", Theme::default()).unwrap()
    }

    fn editor_with_project() -> ProjectEditor {
        let mut editor = ProjectEditor::new();
        editor.create_project(sample_project());
        editor
    }

    #[test]
    fn test_ops_before_open_are_noops() {
        let mut editor = ProjectEditor::new();

        assert!(!editor.add_section(SectionType::Hero, None).unwrap());
        assert!(!editor.update_theme(ThemePatch::default()).unwrap());
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert!(!editor.is_dirty());
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_dirty_lifecycle() {
        let mut editor = editor_with_project();
        assert!(!editor.is_dirty());

        editor.add_section(SectionType::Hero, None).unwrap();
        assert!(editor.is_dirty());

        editor.mark_saved();
        assert!(!editor.is_dirty());

        assert!(editor.undo());
        assert!(editor.is_dirty());

        editor.mark_saved();
        assert!(editor.redo());
        assert!(editor.is_dirty());

        editor.clear_project();
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_add_remove_select() {
        let mut editor = editor_with_project();

        editor.add_section(SectionType::Header, None).unwrap();
        editor.add_section(SectionType::Hero, None).unwrap();
        let hero_id = editor.selected_section().unwrap();
        assert_eq!(editor.project().unwrap().sections.len(), 2);
        assert_eq!(editor.project().unwrap().section(hero_id).unwrap().order, 1);

        editor.remove_section(hero_id).unwrap();
        assert_eq!(editor.selected_section(), None);
        assert_eq!(editor.project().unwrap().sections.len(), 1);

        let missing = editor.remove_section(hero_id);
        assert!(matches!(missing, Err(EditError::UnknownSection { .. })));
    }

    #[test]
    fn test_add_section_bad_index() {
        let mut editor = editor_with_project();
        let result = editor.add_section(SectionType::Hero, Some(3));
        assert!(matches!(
            result,
            Err(EditError::SectionIndexOutOfRange { index: 3, len: 0 })
        ));
        // Rejected edits record nothing.
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_reorder_and_duplicate() {
        let mut editor = editor_with_project();
        editor.add_section(SectionType::Header, None).unwrap();
        editor.add_section(SectionType::Hero, None).unwrap();
        editor.add_section(SectionType::Footer, None).unwrap();

        editor.reorder_sections(2, 0).unwrap();
        let kinds: Vec<SectionType> = editor
            .project()
            .unwrap()
            .sections
            .iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![SectionType::Footer, SectionType::Header, SectionType::Hero]
        );
        let orders: Vec<u32> = editor
            .project()
            .unwrap()
            .sections
            .iter()
            .map(|s| s.order)
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);

        let hero_id = editor.project().unwrap().sections[2].id;
        editor.duplicate_section(hero_id).unwrap();
        let project = editor.project().unwrap();
        assert_eq!(project.sections.len(), 4);
        assert_eq!(project.sections[3].kind, SectionType::Hero);
        assert_ne!(project.sections[3].id, hero_id);
        assert_eq!(editor.selected_section(), Some(project.sections[3].id));

        assert!(matches!(
            editor.reorder_sections(0, 9),
            Err(EditError::SectionIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_update_section_patch_validates() {
        let mut editor = editor_with_project();
        editor.add_section(SectionType::About, None).unwrap();
        let id = editor.selected_section().unwrap();

        editor
            .update_section(
                id,
                SectionPatch {
                    enabled: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!editor.project().unwrap().section(id).unwrap().enabled);

        let before = editor.project().unwrap().clone();
        let bad = editor.update_section(
            id,
            SectionPatch {
                settings: Some(SectionSettings {
                    background_color: Some("nope".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        assert!(bad.is_err());
        assert_eq!(editor.project().unwrap(), &before);
    }

    #[test]
    fn test_theme_color_checkpoint() {
        let mut editor = editor_with_project();

        editor.update_theme_color(ColorRole::Primary, "#aa1122").unwrap();
        assert_eq!(
            editor.project().unwrap().theme.colors.primary,
            "#aa1122"
        );

        assert!(editor
            .update_theme_color(ColorRole::Primary, "bad")
            .is_err());
        assert_eq!(
            editor.project().unwrap().theme.colors.primary,
            "#aa1122"
        );

        editor.undo();
        assert_eq!(
            editor.project().unwrap().theme.colors.primary,
            ThemeColors::default().primary
        );
    }

    #[test]
    fn test_selection_survives_only_while_section_exists() {
        let mut editor = editor_with_project();
        editor.add_section(SectionType::Hero, None).unwrap();
        let id = editor.selected_section().unwrap();

        // Undo back past the add: selected section is gone from the document.
        assert!(editor.undo());
        assert_eq!(editor.selected_section(), None);

        // Redo brings it back but selection stays cleared.
        assert!(editor.redo());
        assert!(editor.project().unwrap().section(id).is_some());
        assert_eq!(editor.selected_section(), None);
    }
}
