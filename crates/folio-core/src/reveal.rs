#![forbid(unsafe_code)]

//! One-shot reveal of sections as they scroll into view.

use core::time::Duration;
use std::collections::HashSet;

use crate::dom::{DomCommand, Element, class};

/// Descendants revealed with a stagger once their section is visible.
pub const REVEAL_CHILD_SELECTOR: &str =
    ".skill__item, .highlight, .project__card, .contact__card, .project__content";

/// Child reveal to run `delay` after its section became visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaggeredReveal {
    pub section: String,
    pub index: usize,
    pub delay: Duration,
}

/// Tracks which sections have already been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealObserver {
    revealed: HashSet<String>,
    stagger: Duration,
}

impl RevealObserver {
    #[must_use]
    pub fn new(stagger: Duration) -> Self {
        Self {
            revealed: HashSet::new(),
            stagger,
        }
    }

    #[must_use]
    pub fn is_revealed(&self, section: &str) -> bool {
        self.revealed.contains(section)
    }

    /// Handle one observer entry.
    ///
    /// The first intersecting entry for a section marks it `visible` and
    /// returns one staggered reveal per child (`index * stagger`). Later
    /// entries for the same section do nothing.
    pub fn on_intersect(
        &mut self,
        section: &str,
        is_intersecting: bool,
        child_count: usize,
        out: &mut Vec<DomCommand>,
    ) -> Vec<StaggeredReveal> {
        if !is_intersecting || !self.revealed.insert(section.to_owned()) {
            return Vec::new();
        }
        out.push(DomCommand::AddClass {
            target: Element::Section(section.to_owned()),
            class: class::VISIBLE,
        });
        (0..child_count)
            .map(|index| StaggeredReveal {
                section: section.to_owned(),
                index,
                delay: self.stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX)),
            })
            .collect()
    }
}

/// Command that reveals one staggered child.
#[must_use]
pub fn reveal_child(section: String, index: usize) -> DomCommand {
    DomCommand::AddClass {
        target: Element::RevealChild { section, index },
        class: class::VISIBLE,
    }
}
