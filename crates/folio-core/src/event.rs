#![forbid(unsafe_code)]

//! Host-pushed page events and the measured layout they refer to.
//!
//! Events are plain data so a session can be recorded as JSON lines and
//! replayed through a fresh controller (see [`parse_encoded_event`]).

use serde::{Deserialize, Serialize};

/// One of the four contact form controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    /// Validation order; also the order errors are rendered in.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Element id of the control.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.id() == id)
    }
}

/// Field values read at submit time. `None` means the control is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Submit button label before the controller rewrites it.
    pub button_label: Option<String>,
}

impl FormSubmission {
    /// Submission with all four fields present.
    #[must_use]
    pub fn filled(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
            subject: Some(subject.to_owned()),
            message: Some(message.to_owned()),
            button_label: Some("Send Message".to_owned()),
        }
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => self.name.as_deref(),
            FormField::Email => self.email.as_deref(),
            FormField::Subject => self.subject.as_deref(),
            FormField::Message => self.message.as_deref(),
        }
    }
}

/// Normalized keyboard key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Window scroll position and viewport size at the time of a scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

/// Document-relative geometry of one `.section`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub id: String,
    pub top: f64,
    pub height: f64,
    /// Number of descendants matching the reveal selector.
    #[serde(default)]
    pub reveal_children: usize,
}

/// Layout measured by the host: header height and sections in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub header_height: f64,
    pub sections: Vec<SectionLayout>,
}

impl PageLayout {
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&SectionLayout> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Canonical page event pushed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    /// Fresh layout measurement (load, resize, or before a scroll tick).
    Layout(PageLayout),
    Scroll(ScrollSnapshot),
    NavToggleClick,
    NavCloseClick,
    /// Click on a `.nav__link` targeting `#section`.
    NavLinkClick { section: String },
    /// Click on the "view my work" shortcut.
    ViewWorkClick,
    KeyDown { key: Key },
    Submit(FormSubmission),
    FieldInput { field: FormField },
    /// Intersection observer entry for a `.section`.
    SectionIntersect { section: String, is_intersecting: bool },
}

/// Parse one JSON-encoded event, as written by a session recorder.
pub fn parse_encoded_event(json: &str) -> Result<PageEvent, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn form_field_ids_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_id(field.id()), Some(field));
        }
        assert_eq!(FormField::from_id("phone"), None);
    }

    #[test]
    fn key_from_dom_normalizes_escape() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("Enter"), Key::Other("Enter".into()));
    }

    #[test]
    fn parses_encoded_events() {
        assert_eq!(
            parse_encoded_event(r#"{"kind":"nav_toggle_click"}"#).unwrap(),
            PageEvent::NavToggleClick
        );
        assert_eq!(
            parse_encoded_event(r#"{"kind":"nav_link_click","section":"about"}"#).unwrap(),
            PageEvent::NavLinkClick {
                section: "about".into()
            }
        );
        assert_eq!(
            parse_encoded_event(
                r#"{"kind":"scroll","scroll_y":120.0,"viewport_width":1280.0,"viewport_height":800.0}"#
            )
            .unwrap(),
            PageEvent::Scroll(ScrollSnapshot {
                scroll_y: 120.0,
                viewport_width: 1280.0,
                viewport_height: 800.0,
            })
        );
        assert_eq!(
            parse_encoded_event(r#"{"kind":"key_down","key":"escape"}"#).unwrap(),
            PageEvent::KeyDown { key: Key::Escape }
        );
    }

    #[test]
    fn malformed_event_is_an_error() {
        assert!(parse_encoded_event("not json").is_err());
        assert!(parse_encoded_event(r#"{"kind":"accessibility"}"#).is_err());
    }
}
