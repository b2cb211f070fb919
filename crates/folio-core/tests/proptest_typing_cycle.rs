//! Property-based invariant tests for the typing animation.
//!
//! 1. Every rendered frame is a prefix of the active phrase
//! 2. Consecutive frames differ by exactly one character
//! 3. A full phrase is followed by the full pause, an empty one by the empty pause
//! 4. After typing and deleting every phrase the cycle returns to phrase 0

use core::time::Duration;

use folio_core::typing::{TypingAnimation, TypingPhase, TypingTimings};
use proptest::prelude::*;

fn timings() -> TypingTimings {
    TypingTimings {
        type_delay: Duration::from_millis(100),
        delete_delay: Duration::from_millis(50),
        full_pause: Duration::from_millis(2000),
        empty_pause: Duration::from_millis(500),
    }
}

fn phrases() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zé ]{1,8}", 1..5)
}

/// Frames needed to type and delete each phrase once.
fn cycle_len(phrases: &[String]) -> usize {
    phrases.iter().map(|p| 2 * p.chars().count()).sum()
}

proptest! {
    #[test]
    fn frames_are_prefixes_one_char_apart(phrases in phrases()) {
        let mut anim = TypingAnimation::new(&phrases, timings()).expect("non-empty phrases");
        let mut prev_len = 0usize;
        for _ in 0..cycle_len(&phrases) {
            let active = phrases[anim.text_index()].clone();
            let frame = anim.step();
            prop_assert!(active.starts_with(&frame.text));
            let len = frame.text.chars().count();
            prop_assert_eq!(len.abs_diff(prev_len), 1);
            prev_len = len;
        }
    }

    #[test]
    fn pauses_follow_full_and_empty_frames(phrases in phrases()) {
        let t = timings();
        let mut anim = TypingAnimation::new(&phrases, t).expect("non-empty phrases");
        for _ in 0..cycle_len(&phrases) {
            let active_len = phrases[anim.text_index()].chars().count();
            let frame = anim.step();
            let len = frame.text.chars().count();
            if len == active_len && anim.phase() == TypingPhase::PausedFull {
                prop_assert_eq!(frame.delay, t.full_pause);
            }
            if frame.text.is_empty() {
                prop_assert_eq!(frame.delay, t.empty_pause);
                prop_assert_eq!(anim.phase(), TypingPhase::PausedEmpty);
            }
        }
    }

    #[test]
    fn full_cycle_returns_to_first_phrase(phrases in phrases()) {
        let mut anim = TypingAnimation::new(&phrases, timings()).expect("non-empty phrases");
        for _ in 0..cycle_len(&phrases) {
            anim.step();
        }
        prop_assert_eq!(anim.text_index(), 0);
        prop_assert_eq!(anim.text(), "");
    }
}
