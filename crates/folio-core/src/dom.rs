#![forbid(unsafe_code)]

//! Abstract DOM vocabulary shared by the controller and the wasm host.
//!
//! The controller never touches a document. It names elements with
//! [`Element`], describes mutations with [`DomCommand`], and the host resolves
//! both against the page (see `folio-web`'s DOM binding).

use crate::event::FormField;

/// CSS classes the stylesheet reacts to.
pub mod class {
    pub const SHOW_MENU: &str = "show-menu";
    pub const ACTIVE: &str = "active";
    pub const SCROLLED: &str = "scrolled";
    pub const ACTIVE_LINK: &str = "active-link";
    pub const VISIBLE: &str = "visible";
    pub const ERROR: &str = "error";
    pub const SUCCESS: &str = "success";
}

/// Logical page element. Variants that name a group resolve to every match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    NavMenu,
    NavToggle,
    NavClose,
    /// Every `.nav__link`.
    NavLinks,
    /// The `.nav__link` whose href is `#<section id>`.
    NavLink(String),
    Header,
    Section(String),
    /// `index`-th reveal descendant of a section, in document order.
    RevealChild { section: String, index: usize },
    Field(FormField),
    /// Every `.form-control`.
    FormControls,
    SubmitButton,
    ContactForm,
    HeroBlob,
    TypingText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    /// Full class attribute of the banner element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Success => "status status--success",
            Self::Error => "status status--error",
        }
    }
}

/// One DOM mutation for the host to apply, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DomCommand {
    AddClass { target: Element, class: &'static str },
    RemoveClass { target: Element, class: &'static str },
    ToggleClass { target: Element, class: &'static str },
    SetText { target: Element, text: String },
    SetTransform { target: Element, transform: String },
    SetDisabled { target: Element, disabled: bool },
    /// Native smooth scroll of the window to a document offset.
    ScrollTo { top: f64 },
    /// Replace the field's inline `.form-error` message.
    ShowFieldError { field: FormField, message: &'static str },
    ClearFieldError { field: FormField },
    /// Remove every `.form-error` in the document.
    ClearAllFieldErrors,
    /// Replace any `.status` banner in the contact form with this one.
    ShowBanner { id: u64, kind: BannerKind, message: String },
    /// Remove the banner with `id` if it is still attached.
    RemoveBanner { id: u64 },
    ResetForm,
    InjectStyle { css: &'static str },
    RevokeObjectUrl { url: String },
}

impl DomCommand {
    /// Element that must exist for the command to be meaningful.
    #[must_use]
    pub fn required_element(&self) -> Option<Element> {
        match self {
            Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::ToggleClass { target, .. }
            | Self::SetText { target, .. }
            | Self::SetTransform { target, .. }
            | Self::SetDisabled { target, .. } => Some(target.clone()),
            Self::ShowFieldError { field, .. } | Self::ClearFieldError { field } => {
                Some(Element::Field(*field))
            }
            Self::ShowBanner { .. } | Self::RemoveBanner { .. } | Self::ResetForm => {
                Some(Element::ContactForm)
            }
            Self::ScrollTo { .. }
            | Self::ClearAllFieldErrors
            | Self::InjectStyle { .. }
            | Self::RevokeObjectUrl { .. } => None,
        }
    }
}

/// Which parts of the DOM contract the host found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageElements {
    pub nav_menu: bool,
    pub nav_toggle: bool,
    pub nav_close: bool,
    pub header: bool,
    pub contact_form: bool,
    pub submit_button: bool,
    pub hero_blob: bool,
    pub typing_text: bool,
    pub download_resume: bool,
    pub view_work: bool,
    /// Section ids targeted by `.nav__link` hrefs.
    pub nav_links: Vec<String>,
    /// Ids of `.section` elements, in document order.
    pub sections: Vec<String>,
    pub fields: Vec<FormField>,
}

impl PageElements {
    /// Every element of the contract present, with the usual section ids.
    #[must_use]
    pub fn full_page() -> Self {
        let sections: Vec<String> = ["home", "about", "skills", "projects", "contact"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        Self {
            nav_menu: true,
            nav_toggle: true,
            nav_close: true,
            header: true,
            contact_form: true,
            submit_button: true,
            hero_blob: true,
            typing_text: true,
            download_resume: true,
            view_work: true,
            nav_links: sections.clone(),
            sections,
            fields: FormField::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn contains(&self, element: &Element) -> bool {
        match element {
            Element::NavMenu => self.nav_menu,
            Element::NavToggle => self.nav_toggle,
            Element::NavClose => self.nav_close,
            Element::NavLinks => !self.nav_links.is_empty(),
            Element::NavLink(id) => self.nav_links.iter().any(|link| link == id),
            Element::Header => self.header,
            Element::Section(id) | Element::RevealChild { section: id, .. } => {
                self.sections.iter().any(|section| section == id)
            }
            Element::Field(field) => self.fields.contains(field),
            Element::FormControls => !self.fields.is_empty(),
            Element::SubmitButton => self.submit_button,
            Element::ContactForm => self.contact_form,
            Element::HeroBlob => self.hero_blob,
            Element::TypingText => self.typing_text,
        }
    }
}

/// Captured controller outputs for host consumption.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageOutputs {
    pub commands: Vec<DomCommand>,
    /// Short structured log lines (`key=value` pairs) for the host console.
    pub logs: Vec<String>,
}

impl PageOutputs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.logs.is_empty()
    }
}

/// Keyframes and helper rules injected once at start.
pub const ANIMATION_CSS: &str = r"
@keyframes slideInUp {
    from {
        opacity: 0;
        transform: translateY(30px);
    }
    to {
        opacity: 1;
        transform: translateY(0);
    }
}

@keyframes fadeInScale {
    from {
        opacity: 0;
        transform: scale(0.8);
    }
    to {
        opacity: 1;
        transform: scale(1);
    }
}

.btn--success {
    background-color: var(--color-success) !important;
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_contains_nothing() {
        let elements = PageElements::default();
        assert!(!elements.contains(&Element::NavMenu));
        assert!(!elements.contains(&Element::NavLinks));
        assert!(!elements.contains(&Element::Field(FormField::Email)));
        assert!(!elements.contains(&Element::Section("about".into())));
    }

    #[test]
    fn reveal_children_follow_their_section() {
        let elements = PageElements::full_page();
        assert!(elements.contains(&Element::RevealChild {
            section: "skills".into(),
            index: 7,
        }));
        assert!(!elements.contains(&Element::RevealChild {
            section: "blog".into(),
            index: 0,
        }));
    }

    #[test]
    fn banner_commands_require_the_form() {
        let cmd = DomCommand::RemoveBanner { id: 3 };
        assert_eq!(cmd.required_element(), Some(Element::ContactForm));
        assert_eq!(DomCommand::ScrollTo { top: 0.0 }.required_element(), None);
    }
}
