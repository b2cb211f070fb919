#![forbid(unsafe_code)]

//! Scroll-linked header styling, active-link highlighting and the smooth
//! scroll target computation.

use crate::dom::{DomCommand, Element, class};
use crate::event::{PageLayout, SectionLayout};

/// Mark the header `scrolled` once the page has moved `threshold` px.
pub fn update_header(scroll_y: f64, threshold: f64, out: &mut Vec<DomCommand>) {
    let cmd = if scroll_y >= threshold {
        DomCommand::AddClass {
            target: Element::Header,
            class: class::SCROLLED,
        }
    } else {
        DomCommand::RemoveClass {
            target: Element::Header,
            class: class::SCROLLED,
        }
    };
    out.push(cmd);
}

/// Section the reader is currently in.
///
/// A section spans `(top, top + height]` with `top = offset_top -
/// header_height - offset`. Sections are scanned in document order and the
/// last match wins when ranges overlap.
#[must_use]
pub fn current_section(layout: &PageLayout, scroll_y: f64, offset: f64) -> Option<&SectionLayout> {
    layout
        .sections
        .iter()
        .filter(|section| {
            let top = section.top - layout.header_height - offset;
            top < scroll_y && scroll_y <= top + section.height
        })
        .last()
}

/// Move `active-link` to the link targeting `section_id`.
pub fn highlight_link(section_id: &str, out: &mut Vec<DomCommand>) {
    out.push(DomCommand::RemoveClass {
        target: Element::NavLinks,
        class: class::ACTIVE_LINK,
    });
    out.push(DomCommand::AddClass {
        target: Element::NavLink(section_id.to_owned()),
        class: class::ACTIVE_LINK,
    });
}

/// Window offset that lands `element_top` just below the fixed header.
#[must_use]
pub fn scroll_target(element_top: f64, header_height: f64, margin: f64) -> f64 {
    element_top - header_height - margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(id: &str, top: f64, height: f64) -> SectionLayout {
        SectionLayout {
            id: id.to_owned(),
            top,
            height,
            reveal_children: 0,
        }
    }

    fn layout() -> PageLayout {
        PageLayout {
            header_height: 70.0,
            sections: vec![
                section("home", 0.0, 800.0),
                section("about", 800.0, 600.0),
                section("projects", 1400.0, 1000.0),
            ],
        }
    }

    #[test]
    fn header_threshold_is_inclusive() {
        let mut out = Vec::new();
        update_header(80.0, 80.0, &mut out);
        update_header(79.5, 80.0, &mut out);
        assert_eq!(
            out,
            vec![
                DomCommand::AddClass {
                    target: Element::Header,
                    class: class::SCROLLED,
                },
                DomCommand::RemoveClass {
                    target: Element::Header,
                    class: class::SCROLLED,
                },
            ]
        );
    }

    #[test]
    fn current_section_uses_header_and_offset() {
        let layout = layout();
        // about spans (800 - 70 - 50, 680 + 600] = (680, 1280].
        assert_eq!(current_section(&layout, 680.0, 50.0).unwrap().id, "home");
        assert_eq!(current_section(&layout, 681.0, 50.0).unwrap().id, "about");
        assert_eq!(current_section(&layout, 1280.0, 50.0).unwrap().id, "about");
        assert_eq!(current_section(&layout, 1281.0, 50.0).unwrap().id, "projects");
    }

    #[test]
    fn nothing_matches_past_the_last_section() {
        assert!(current_section(&layout(), 5000.0, 50.0).is_none());
    }

    #[test]
    fn overlapping_sections_last_match_wins() {
        let layout = PageLayout {
            header_height: 0.0,
            sections: vec![section("a", 0.0, 500.0), section("b", 100.0, 500.0)],
        };
        assert_eq!(current_section(&layout, 200.0, 0.0).unwrap().id, "b");
    }

    #[test]
    fn highlight_clears_then_marks() {
        let mut out = Vec::new();
        highlight_link("about", &mut out);
        assert_eq!(
            out,
            vec![
                DomCommand::RemoveClass {
                    target: Element::NavLinks,
                    class: class::ACTIVE_LINK,
                },
                DomCommand::AddClass {
                    target: Element::NavLink("about".into()),
                    class: class::ACTIVE_LINK,
                },
            ]
        );
    }

    #[test]
    fn scroll_target_subtracts_header_and_margin() {
        assert_eq!(scroll_target(1400.0, 70.0, 20.0), 1310.0);
    }
}
