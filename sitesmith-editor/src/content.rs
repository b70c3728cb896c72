//! Starter content per section kind, and dotted-path edits into section JSON.

use serde_json::{json, Map, Value};
use sitesmith_core::SectionType;

use crate::store::EditError;

/// Default content for a freshly added section. Shapes here are what the
/// form panels for each kind expect to find.
pub fn default_content(kind: SectionType) -> Value {
    match kind {
        SectionType::Header => json!({
            "logo_text": "Logo",
            "navigation": [
                { "label": "Home", "href": "#" },
                { "label": "Services", "href": "#services" },
                { "label": "Contact", "href": "#contact" },
            ],
            "cta": { "label": "Contact", "href": "#contact" },
        }),
        SectionType::Hero => json!({
            "headline": "Welcome",
            "subline": "Your description here",
            "primary_cta": { "label": "Get started", "href": "#contact" },
            "secondary_cta": { "label": "Learn more", "href": "#about" },
        }),
        SectionType::TrustBar => json!({
            "items": [
                { "value": "10+", "label": "Years of experience" },
                { "value": "500+", "label": "Happy customers" },
                { "value": "100%", "label": "Quality" },
            ],
        }),
        SectionType::Services => json!({
            "headline": "Our services",
            "subline": "What we can do for you",
            "items": [
                { "icon": "clipboard", "title": "Consulting", "description": "Individual consulting" },
                { "icon": "wrench", "title": "Implementation", "description": "Professional implementation" },
                { "icon": "check", "title": "Support", "description": "Reliable support" },
            ],
        }),
        SectionType::About => json!({
            "headline": "About us",
            "text": "Tell your story...",
            "image": "",
            "layout": "image-right",
        }),
        SectionType::Team => json!({
            "headline": "Our team",
            "members": [],
        }),
        SectionType::Testimonials => json!({
            "headline": "What our customers say",
            "items": [
                { "quote": "Outstanding work!", "author": "M. Miller", "company": "Example Inc." },
            ],
        }),
        SectionType::Faq => json!({
            "headline": "Frequently asked questions",
            "items": [
                { "question": "How can I reach you?", "answer": "By phone or email." },
            ],
        }),
        SectionType::Contact => json!({
            "headline": "Contact us",
            "email": "info@example.com",
            "phone": "+1 555 0100",
            "address": "1 Main Street",
            "show_form": true,
        }),
        SectionType::Cta => json!({
            "headline": "Ready to start?",
            "subline": "Contact us today",
            "button": { "label": "Get started", "href": "#contact" },
        }),
        SectionType::StickyCta => json!({
            "text": "Book a consultation now!",
            "button": { "label": "Contact", "href": "#contact" },
        }),
        SectionType::Footer => json!({
            "company_name": "Company name",
            "description": "Your description",
            "copyright": "© Company name",
            "links": [
                { "label": "Imprint", "href": "/imprint" },
                { "label": "Privacy", "href": "/privacy" },
            ],
        }),
        SectionType::CookieBanner => json!({
            "headline": "Cookie settings",
            "text": "We use cookies for the best experience.",
            "accept_label": "Accept all",
            "decline_label": "Essential only",
        }),
    }
}

/// Set a value inside a JSON tree by dotted path (`"items.0.title"`).
///
/// Missing intermediate object keys are created; array segments must parse
/// as an in-range index. A scalar in the middle of the path is an error
/// rather than something to silently overwrite.
pub fn set_deep(target: &mut Value, path: &str, value: Value) -> Result<(), EditError> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(bad_path(path, "empty path segment"));
    }

    let Some((last, parents)) = segments.split_last() else {
        return Err(bad_path(path, "empty path"));
    };

    let mut current = target;
    for segment in parents {
        current = match current {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(items) => {
                let len = items.len();
                let index = parse_index(segment, path)?;
                items
                    .get_mut(index)
                    .ok_or_else(|| bad_path(path, &format!("index {index} out of bounds (len {len})")))?
            }
            _ => {
                return Err(bad_path(
                    path,
                    &format!("segment '{segment}' is not an object or array"),
                ))
            }
        };
    }

    match current {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let len = items.len();
            let index = parse_index(last, path)?;
            let slot = items
                .get_mut(index)
                .ok_or_else(|| bad_path(path, &format!("index {index} out of bounds (len {len})")))?;
            *slot = value;
            Ok(())
        }
        _ => Err(bad_path(
            path,
            &format!("segment '{last}' is not an object or array"),
        )),
    }
}

fn parse_index(segment: &str, path: &str) -> Result<usize, EditError> {
    segment
        .parse()
        .map_err(|_| bad_path(path, &format!("'{segment}' is not an array index")))
}

fn bad_path(path: &str, reason: &str) -> EditError {
    tracing::error!(path, reason, "invalid content path");
    EditError::InvalidContentPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
