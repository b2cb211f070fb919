#![forbid(unsafe_code)]

//! DOM contract of the portfolio page.
//!
//! Maps the controller's logical [`Element`]s onto CSS selectors. Kept free of
//! `web-sys` so the mapping is testable natively.

use folio_core::Element;
use folio_core::event::FormField;
use folio_core::reveal::REVEAL_CHILD_SELECTOR;

pub const NAV_MENU_ID: &str = "nav-menu";
pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_CLOSE_ID: &str = "nav-close";
pub const HEADER_ID: &str = "header";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const DOWNLOAD_RESUME_ID: &str = "download-resume";
pub const CONFIG_SCRIPT_ID: &str = "folio-config";

pub const NAV_LINK_SELECTOR: &str = ".nav__link";
pub const SECTION_SELECTOR: &str = ".section";
pub const FORM_CONTROL_SELECTOR: &str = ".form-control";
pub const SUBMIT_BUTTON_SELECTOR: &str = "#contact-form button[type=\"submit\"]";
pub const HERO_BLOB_SELECTOR: &str = ".home__blob";
pub const TYPING_TEXT_SELECTOR: &str = ".typing-text";

/// Inline field error span.
pub const FORM_ERROR_CLASS: &str = "form-error";
pub const FORM_ERROR_SELECTOR: &str = ".form-error";
/// Any status banner inside the contact form.
pub const STATUS_SELECTOR: &str = ".status";
pub const BANNER_MARGIN_TOP: &str = "var(--space-16)";

/// How a logical element is found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every match of the selector.
    All(String),
    /// The `index`-th match of `selector` inside the first match of `scope`.
    Nth {
        scope: String,
        selector: &'static str,
        index: usize,
    },
}

fn id_selector(id: &str) -> String {
    format!("[id=\"{}\"]", css_string(id))
}

/// Escape a value for use inside a double-quoted CSS attribute selector.
fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Selector of the nav link pointing at `#section`.
#[must_use]
pub fn nav_link_selector(section: &str) -> String {
    format!("{NAV_LINK_SELECTOR}[href=\"#{}\"]", css_string(section))
}

/// Shortcut anchors to `#section` outside the nav menu.
#[must_use]
pub fn shortcut_selector(section: &str) -> String {
    format!("a[href=\"#{}\"]:not({NAV_LINK_SELECTOR})", css_string(section))
}

#[must_use]
pub fn field_selector(field: FormField) -> String {
    format!("#{}", field.id())
}

#[must_use]
pub fn target(element: &Element) -> Target {
    let all = |s: &str| Target::All(s.to_owned());
    match element {
        Element::NavMenu => Target::All(format!("#{NAV_MENU_ID}")),
        Element::NavToggle => Target::All(format!("#{NAV_TOGGLE_ID}")),
        Element::NavClose => Target::All(format!("#{NAV_CLOSE_ID}")),
        Element::NavLinks => all(NAV_LINK_SELECTOR),
        Element::NavLink(section) => Target::All(nav_link_selector(section)),
        Element::Header => Target::All(format!("#{HEADER_ID}")),
        Element::Section(id) => Target::All(format!("{SECTION_SELECTOR}{}", id_selector(id))),
        Element::RevealChild { section, index } => Target::Nth {
            scope: format!("{SECTION_SELECTOR}{}", id_selector(section)),
            selector: REVEAL_CHILD_SELECTOR,
            index: *index,
        },
        Element::Field(field) => Target::All(field_selector(*field)),
        Element::FormControls => all(FORM_CONTROL_SELECTOR),
        Element::SubmitButton => all(SUBMIT_BUTTON_SELECTOR),
        Element::ContactForm => Target::All(format!("#{CONTACT_FORM_ID}")),
        Element::HeroBlob => all(HERO_BLOB_SELECTOR),
        Element::TypingText => all(TYPING_TEXT_SELECTOR),
    }
}

/// Sections are addressed by id; those without one are neither measured nor
/// observed.
#[must_use]
pub fn is_tracked_section(id: &str) -> bool {
    !id.is_empty()
}

/// Section id targeted by an in-page `href`, e.g. `#about` -> `about`.
#[must_use]
pub fn section_from_href(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nav_link_targets_href() {
        assert_eq!(
            target(&Element::NavLink("about".into())),
            Target::All(".nav__link[href=\"#about\"]".into())
        );
    }

    #[test]
    fn reveal_child_is_scoped_to_its_section() {
        assert_eq!(
            target(&Element::RevealChild {
                section: "skills".into(),
                index: 2,
            }),
            Target::Nth {
                scope: ".section[id=\"skills\"]".into(),
                selector: REVEAL_CHILD_SELECTOR,
                index: 2,
            }
        );
    }

    #[test]
    fn quotes_in_ids_are_escaped() {
        assert_eq!(nav_link_selector("a\"b"), ".nav__link[href=\"#a\\\"b\"]");
    }

    #[test]
    fn view_work_shortcut_excludes_nav_links() {
        assert_eq!(
            shortcut_selector("projects"),
            "a[href=\"#projects\"]:not(.nav__link)"
        );
    }

    #[test]
    fn hrefs_resolve_to_sections() {
        assert_eq!(section_from_href("#contact"), Some("contact"));
        assert_eq!(section_from_href("#"), None);
        assert_eq!(section_from_href("https://example.com/#x"), None);
    }

    #[test]
    fn only_sections_with_ids_are_tracked() {
        assert!(is_tracked_section("about"));
        assert!(!is_tracked_section(""));
    }

    #[test]
    fn fields_use_their_ids() {
        assert_eq!(field_selector(FormField::Message), "#message");
        assert_eq!(
            target(&Element::Field(FormField::Email)),
            Target::All("#email".into())
        );
    }
}
