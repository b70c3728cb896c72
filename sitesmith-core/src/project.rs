//! Project model for SITESMITH (v1).
//!
//! A project is the complete user-editable document: theme, ordered content
//! sections, site settings and SEO metadata. Save/load this as JSON; edit
//! history is in-memory state of the editor and is never persisted.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::{DocumentError, Section, Theme, PROJECT_SCHEMA_VERSION};

/// File extension recommended for saved projects.
pub const PROJECT_FILE_EXT: &str = "site.json";

/// Site-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub language: String,
    pub timezone: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            language: "en".into(),
            timezone: "UTC".into(),
        }
    }
}

/// Page-level SEO metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoSettings {
    pub title: String,
    pub description: String,
}

/// v1 project document. The editor treats this as an opaque cloneable value:
/// every history snapshot is an independent deep copy of one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Id of the template this project was created from.
    pub template: String,
    pub schema_version: String,

    pub theme: Theme,
    pub sections: Vec<Section>,

    pub settings: SiteSettings,
    pub seo: SeoSettings,
}

impl Project {
    /// Create an empty project with defaults.
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        theme: Theme,
    ) -> Result<Self, DocumentError> {
        let name = name.into();

        if name.trim().is_empty() {
            tracing::error!("project name cannot be empty");
            return Err(DocumentError::EmptyName);
        }

        theme.validate()?;

        let id = Uuid::new_v4();
        tracing::info!(project_id = %id, name = %name, "creating new project");

        Ok(Self {
            id,
            seo: SeoSettings {
                title: name.clone(),
                description: String::new(),
            },
            name,
            template: template.into(),
            schema_version: PROJECT_SCHEMA_VERSION.to_string(),
            theme,
            sections: Vec::new(),
            settings: SiteSettings::default(),
        })
    }

    /// Look up a section by id.
    pub fn section(&self, id: Uuid) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Look up a section by id, mutably.
    pub fn section_mut(&mut self, id: Uuid) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Position of a section in the ordered list.
    pub fn section_index(&self, id: Uuid) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Reassign `order` to match list position. Call after any insert,
    /// remove or move.
    pub fn renumber_sections(&mut self) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.order = i as u32;
        }
    }

    /// Validate the document.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.name.trim().is_empty() {
            return Err(DocumentError::EmptyName);
        }

        self.theme.validate()?;

        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id) {
                tracing::error!(section_id = %section.id, "duplicate section id");
                return Err(DocumentError::DuplicateSectionId { id: section.id });
            }
            section.settings.validate()?;
        }

        Ok(())
    }
}

/// Save a project to disk as pretty JSON.
pub fn save_project(path: impl AsRef<Path>, project: &Project) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        // fs::write does NOT create directories; autosave targets may not exist yet
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(project).context("serialize project to json")?;
    fs::write(path, json).with_context(|| format!("write project file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "project saved");
    Ok(())
}

/// Load and validate a project from disk.
pub fn load_project(path: impl AsRef<Path>) -> anyhow::Result<Project> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read project file: {}", path.display()))?;
    let project: Project = serde_json::from_str(&data).context("parse project json")?;
    project
        .validate()
        .with_context(|| format!("validate project file: {}", path.display()))?;
    Ok(project)
}
