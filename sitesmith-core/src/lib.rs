//! sitesmith-core: document model for SITESMITH sites.
//!
//! Design rules:
//! - The document is a plain value; cloning it yields a fully independent copy.
//! - Section content is schemaless JSON, addressed by the editor via dotted paths.
//! - All structs are serializable for project save/load.
//! - Deserialized documents are not trusted; validation is explicit.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Schema version for forward compatibility.
pub const PROJECT_SCHEMA_VERSION: &str = "1.0";

/// Named color slots in a site theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
    TextMuted,
}

impl ColorRole {
    fn field_name(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Background => "background",
            ColorRole::Text => "text",
            ColorRole::TextMuted => "text_muted",
        }
    }
}

/// Theme colors, one `#rrggbb` string per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub text_muted: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#2563eb".into(),
            secondary: "#1e40af".into(),
            accent: "#f59e0b".into(),
            background: "#ffffff".into(),
            text: "#111827".into(),
            text_muted: "#6b7280".into(),
        }
    }
}

impl ThemeColors {
    pub fn get(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Accent => &self.accent,
            ColorRole::Background => &self.background,
            ColorRole::Text => &self.text,
            ColorRole::TextMuted => &self.text_muted,
        }
    }

    /// Set a color by role. Rejects anything that is not `#rrggbb`.
    pub fn set(&mut self, role: ColorRole, value: impl Into<String>) -> Result<(), DocumentError> {
        let value = value.into();
        if !is_hex_color(&value) {
            tracing::error!(
                field = role.field_name(),
                value = %value,
                "invalid theme color"
            );
            return Err(DocumentError::InvalidColor {
                field: role.field_name().to_string(),
                value,
            });
        }

        let slot = match role {
            ColorRole::Primary => &mut self.primary,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::Accent => &mut self.accent,
            ColorRole::Background => &mut self.background,
            ColorRole::Text => &mut self.text,
            ColorRole::TextMuted => &mut self.text_muted,
        };
        *slot = value;
        Ok(())
    }

    /// Validate every color slot.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let fields = [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("background", &self.background),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
        ];

        for (name, value) in fields {
            if !is_hex_color(value) {
                tracing::error!(field = name, value = %value, "invalid theme color");
                return Err(DocumentError::InvalidColor {
                    field: name.to_string(),
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Heading/body font family names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            heading: "Inter".into(),
            body: "Inter".into(),
        }
    }
}

/// Shared 5-step scale used for border radius and section padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    None,
    Sm,
    Md,
    Lg,
    Xl,
}

/// Visual theme applied to the whole site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub border_radius: Spacing,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: ThemeColors::default(),
            fonts: ThemeFonts::default(),
            border_radius: Spacing::Md,
        }
    }
}

impl Theme {
    pub fn validate(&self) -> Result<(), DocumentError> {
        self.colors.validate()
    }
}

/// The kinds of page sections a site can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Header,
    Hero,
    TrustBar,
    Services,
    About,
    Team,
    Testimonials,
    Faq,
    Contact,
    Cta,
    StickyCta,
    Footer,
    CookieBanner,
}

/// Per-section presentation overrides. All optional; `None` inherits the theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionSettings {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub padding_top: Option<Spacing>,
    pub padding_bottom: Option<Spacing>,
}

impl SectionSettings {
    pub fn validate(&self) -> Result<(), DocumentError> {
        let overrides = [
            ("background_color", &self.background_color),
            ("text_color", &self.text_color),
        ];

        for (name, value) in overrides {
            if let Some(value) = value {
                if !is_hex_color(value) {
                    tracing::error!(field = name, value = %value, "invalid section color");
                    return Err(DocumentError::InvalidColor {
                        field: name.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// One ordered page section. `content` is schemaless JSON whose shape depends
/// on `kind`; the editor addresses individual fields by dotted path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: SectionType,
    pub enabled: bool,
    pub order: u32,
    pub content: serde_json::Value,
    pub settings: SectionSettings,
}

impl Section {
    pub fn new(kind: SectionType, content: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            enabled: true,
            order: 0,
            content,
            settings: SectionSettings::default(),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Document-level errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("project name cannot be empty")]
    EmptyName,

    #[error("invalid color for '{field}': {value:?} (expected #rrggbb)")]
    InvalidColor { field: String, value: String },

    #[error("duplicate section id: {id}")]
    DuplicateSectionId { id: Uuid },
}

pub mod project;

pub use project::{
    load_project, save_project, Project, SeoSettings, SiteSettings, PROJECT_FILE_EXT,
};
