#![forbid(unsafe_code)]

//! Subtle hero parallax.

use crate::config::ParallaxConfig;
use crate::dom::{DomCommand, Element};
use crate::event::ScrollSnapshot;

/// Vertical hero offset for this scroll position, if parallax applies.
///
/// Outside the active range the hero keeps whatever transform it last had.
#[must_use]
pub fn hero_offset(snapshot: &ScrollSnapshot, config: &ParallaxConfig) -> Option<f64> {
    let active = snapshot.scroll_y < snapshot.viewport_height
        && snapshot.viewport_width > config.min_viewport_width;
    active.then(|| snapshot.scroll_y * config.factor)
}

pub fn update_hero(snapshot: &ScrollSnapshot, config: &ParallaxConfig, out: &mut Vec<DomCommand>) {
    if let Some(offset) = hero_offset(snapshot, config) {
        out.push(DomCommand::SetTransform {
            target: Element::HeroBlob,
            transform: format!("translateY({offset}px)"),
        });
    }
}
