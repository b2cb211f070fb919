#![forbid(unsafe_code)]

//! Looping typewriter effect as an explicit state machine.
//!
//! ```text
//!            +1 char                      -1 char
//!   Typing ----------> PausedFull ----------> Deleting
//!     ^    (full text)               (empty)     |
//!     |                                          v
//!     +------------------------------------ PausedEmpty
//!            +1 char of next phrase
//! ```
//!
//! Each [`TypingAnimation::step`] renders one frame and returns how long the
//! controller should wait before the next one. Lengths are counted in
//! Unicode scalar values.

use core::time::Duration;

use crate::config::{TypingConfig, ms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    /// Adding characters to the current phrase.
    Typing,
    /// Full phrase shown; the next step starts deleting.
    PausedFull,
    /// Removing characters.
    Deleting,
    /// Text is empty and the next phrase is selected; the next step types.
    PausedEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub full_pause: Duration,
    pub empty_pause: Duration,
}

impl From<&TypingConfig> for TypingTimings {
    fn from(config: &TypingConfig) -> Self {
        Self {
            type_delay: ms(config.type_delay_ms),
            delete_delay: ms(config.delete_delay_ms),
            full_pause: ms(config.full_pause_ms),
            empty_pause: ms(config.empty_pause_ms),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypingAnimation {
    phrases: Vec<Vec<char>>,
    timings: TypingTimings,
    text_index: usize,
    char_index: usize,
    phase: TypingPhase,
}

impl TypingAnimation {
    /// Build the animation. Returns `None` for an empty phrase list.
    #[must_use]
    pub fn new<S: AsRef<str>>(phrases: &[S], timings: TypingTimings) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases: phrases
                .iter()
                .map(|phrase| phrase.as_ref().chars().collect())
                .collect(),
            timings,
            text_index: 0,
            char_index: 0,
            phase: TypingPhase::Typing,
        })
    }

    #[must_use]
    pub const fn phase(&self) -> TypingPhase {
        self.phase
    }

    #[must_use]
    pub const fn text_index(&self) -> usize {
        self.text_index
    }

    /// Currently rendered text.
    #[must_use]
    pub fn text(&self) -> String {
        self.phrases[self.text_index][..self.char_index].iter().collect()
    }

    /// Advance one frame.
    pub fn step(&mut self) -> TypingFrame {
        let len = self.phrases[self.text_index].len();
        let delay = match self.phase {
            TypingPhase::Typing | TypingPhase::PausedEmpty => {
                self.char_index = (self.char_index + 1).min(len);
                if self.char_index == len {
                    self.phase = TypingPhase::PausedFull;
                    self.timings.full_pause
                } else {
                    self.phase = TypingPhase::Typing;
                    self.timings.type_delay
                }
            }
            TypingPhase::Deleting | TypingPhase::PausedFull => {
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.phase = TypingPhase::PausedEmpty;
                    // Render the cleared text of the finished phrase before
                    // moving on; the index change is invisible while empty.
                    let frame = TypingFrame {
                        text: String::new(),
                        delay: self.timings.empty_pause,
                    };
                    self.text_index = (self.text_index + 1) % self.phrases.len();
                    return frame;
                }
                self.phase = TypingPhase::Deleting;
                self.timings.delete_delay
            }
        };
        TypingFrame {
            text: self.text(),
            delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn timings() -> TypingTimings {
        TypingTimings::from(&TypingConfig::default())
    }

    fn frames(anim: &mut TypingAnimation, n: usize) -> Vec<(String, u64)> {
        (0..n)
            .map(|_| {
                let frame = anim.step();
                (frame.text, frame.delay.as_millis() as u64)
            })
            .collect()
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        assert!(TypingAnimation::new::<&str>(&[], timings()).is_none());
    }

    #[test]
    fn types_pauses_deletes_and_advances() {
        let mut anim = TypingAnimation::new(&["Hi", "Yo"], timings()).unwrap();
        let expected: Vec<(String, u64)> = [
            ("H", 100),
            ("Hi", 2000),
            ("H", 50),
            ("", 500),
            ("Y", 100),
            ("Yo", 2000),
            ("Y", 50),
            ("", 500),
            ("H", 100),
        ]
        .into_iter()
        .map(|(text, delay)| (text.to_owned(), delay))
        .collect();
        assert_eq!(frames(&mut anim, 9), expected);
    }

    #[test]
    fn single_character_phrases_cycle() {
        let mut anim = TypingAnimation::new(&["A", "BB"], timings()).unwrap();
        let texts: Vec<String> = frames(&mut anim, 8).into_iter().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["A", "", "B", "BB", "B", "", "A", ""]);
    }

    #[test]
    fn phases_follow_the_state_diagram() {
        let mut anim = TypingAnimation::new(&["ab"], timings()).unwrap();
        assert_eq!(anim.phase(), TypingPhase::Typing);
        anim.step();
        assert_eq!(anim.phase(), TypingPhase::Typing);
        anim.step();
        assert_eq!(anim.phase(), TypingPhase::PausedFull);
        anim.step();
        assert_eq!(anim.phase(), TypingPhase::Deleting);
        anim.step();
        assert_eq!(anim.phase(), TypingPhase::PausedEmpty);
        assert_eq!(anim.text_index(), 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut anim = TypingAnimation::new(&["héé"], timings()).unwrap();
        assert_eq!(anim.step().text, "h");
        assert_eq!(anim.step().text, "hé");
        let full = anim.step();
        assert_eq!(full.text, "héé");
        assert_eq!(full.delay, Duration::from_millis(2000));
    }
}
