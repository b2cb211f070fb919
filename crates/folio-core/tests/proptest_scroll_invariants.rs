//! Property-based invariant tests for the scroll-linked handlers.
//!
//! 1. A burst of calls inside one throttle interval runs exactly once
//! 2. Throttled runs are at least one interval apart
//! 3. Adjacent sections yield exactly one current section inside the page
//! 4. The header is `scrolled` iff the offset reaches the threshold

use core::time::Duration;

use folio_core::dom::{DomCommand, Element, class};
use folio_core::event::{PageLayout, SectionLayout};
use folio_core::scroll::{current_section, update_header};
use folio_core::throttle::Throttle;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Contiguous sections starting at 0. Offsets are whole CSS pixels, as
/// `offsetTop`/`offsetHeight` report them.
fn stacked_layout() -> impl Strategy<Value = (PageLayout, f64)> {
    (proptest::collection::vec(50u32..1500, 1..8), 0u32..120)
        .prop_map(|(heights, header_height)| {
            let header_height = f64::from(header_height);
            let mut top = 0.0;
            let sections = heights
                .into_iter()
                .map(f64::from)
                .enumerate()
                .map(|(i, height)| {
                    let section = SectionLayout {
                        id: format!("s{i}"),
                        top,
                        height,
                        reveal_children: 0,
                    };
                    top += height;
                    section
                })
                .collect();
            (
                PageLayout {
                    header_height,
                    sections,
                },
                top,
            )
        })
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn burst_inside_interval_runs_once(
        interval_ms in 1u64..500,
        offsets in proptest::collection::vec(0u64..1000, 1..50),
    ) {
        let mut throttle = Throttle::new(Duration::from_millis(interval_ms));
        let start = Duration::from_secs(5);
        let mut offsets: Vec<u64> = offsets.into_iter().map(|o| o % interval_ms).collect();
        offsets.sort_unstable();
        let runs = offsets
            .into_iter()
            .filter(|&o| throttle.try_fire(start + Duration::from_millis(o)))
            .count();
        prop_assert_eq!(runs, 1);
    }

    #[test]
    fn runs_are_spaced_by_interval(
        interval_ms in 1u64..200,
        mut times in proptest::collection::vec(0u64..5000, 1..80),
    ) {
        times.sort_unstable();
        let mut throttle = Throttle::new(Duration::from_millis(interval_ms));
        let fired: Vec<u64> = times
            .into_iter()
            .filter(|&t| throttle.try_fire(Duration::from_millis(t)))
            .collect();
        for pair in fired.windows(2) {
            prop_assert!(pair[1] - pair[0] >= interval_ms);
        }
    }

    #[test]
    fn adjacent_sections_have_one_current(
        (layout, total) in stacked_layout(),
        frac in 0.0f64..1.0,
        offset in (0u32..100).prop_map(f64::from),
    ) {
        let first_top = -layout.header_height - offset;
        let last_bottom = total - layout.header_height - offset;
        // Strictly inside the covered range.
        let scroll_y = (first_top + (last_bottom - first_top) * frac).min(last_bottom);
        prop_assume!(scroll_y > first_top);

        let current = current_section(&layout, scroll_y, offset);
        prop_assert!(current.is_some());
        let matching = layout
            .sections
            .iter()
            .filter(|s| {
                let top = s.top - layout.header_height - offset;
                top < scroll_y && scroll_y <= top + s.height
            })
            .count();
        prop_assert_eq!(matching, 1);
    }

    #[test]
    fn header_state_tracks_threshold(scroll_y in 0.0f64..500.0, threshold in 0.0f64..200.0) {
        let mut out = Vec::new();
        update_header(scroll_y, threshold, &mut out);
        let expected = if scroll_y >= threshold {
            DomCommand::AddClass { target: Element::Header, class: class::SCROLLED }
        } else {
            DomCommand::RemoveClass { target: Element::Header, class: class::SCROLLED }
        };
        prop_assert_eq!(out, vec![expected]);
    }
}
