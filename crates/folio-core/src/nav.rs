#![forbid(unsafe_code)]

//! Mobile navigation menu.

use crate::dom::{DomCommand, Element, class};

/// Open/closed state of the mobile menu, mirrored by `show-menu`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    open: bool,
}

impl NavState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Flip the menu and the toggle button's `active` marker.
    pub fn toggle(&mut self, out: &mut Vec<DomCommand>) {
        self.open = !self.open;
        out.push(DomCommand::ToggleClass {
            target: Element::NavMenu,
            class: class::SHOW_MENU,
        });
        out.push(DomCommand::ToggleClass {
            target: Element::NavToggle,
            class: class::ACTIVE,
        });
    }

    /// Force the menu closed. Safe to call when already closed.
    pub fn close(&mut self, out: &mut Vec<DomCommand>) {
        self.open = false;
        out.push(DomCommand::RemoveClass {
            target: Element::NavMenu,
            class: class::SHOW_MENU,
        });
        out.push(DomCommand::RemoveClass {
            target: Element::NavToggle,
            class: class::ACTIVE,
        });
    }
}
