#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every tunable of the page lives here with the values the site ships with
//! as defaults. The wasm shim reads an optional JSON override from a
//! `<script type="application/json" id="folio-config">` block; fields that are
//! absent keep their defaults.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Scroll offset (CSS px) at which the header gains `scrolled`.
    pub header_threshold: f64,
    /// Extra slack subtracted from a section's top when picking the active link.
    pub active_link_offset: f64,
    /// Gap left between the header and a smooth-scroll target.
    pub smooth_scroll_margin: f64,
    /// Section id targeted by the "view my work" shortcut.
    pub view_work_target: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold: 80.0,
            active_link_offset: 50.0,
            smooth_scroll_margin: 20.0,
            view_work_target: "projects".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub start_delay_ms: u64,
    pub type_delay_ms: u64,
    pub delete_delay_ms: u64,
    pub full_pause_ms: u64,
    pub empty_pause_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: [
                "Computer Science Student",
                "Aspiring Software Developer",
                "Problem Solver",
                "Tech Enthusiast",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            start_delay_ms: 1000,
            type_delay_ms: 100,
            delete_delay_ms: 50,
            full_pause_ms: 2000,
            empty_pause_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Intersection ratio at which a section counts as visible.
    pub threshold: f64,
    /// Bottom root margin in CSS px (negative shrinks the viewport).
    pub bottom_margin_px: f64,
    pub stagger_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin_px: -50.0,
            stagger_ms: 100,
        }
    }
}

impl RevealConfig {
    /// Root margin string in `IntersectionObserverInit` syntax.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.bottom_margin_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub submit_latency_ms: u64,
    pub banner_lifetime_ms: u64,
    pub sending_label: String,
    pub success_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_latency_ms: 1200,
            banner_lifetime_ms: 5000,
            sending_label: "Sending...".to_owned(),
            success_message: "Thank you for your message! I'll get back to you soon.".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResumeConfig {
    /// Asset path relative to the page; URI-encoded by the host before use.
    pub asset_path: String,
    pub download_filename: String,
    pub object_url_lifetime_ms: u64,
    pub failure_message: String,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            asset_path: "../vishweshwari_resume.pdf".to_owned(),
            download_filename: "Vishweshwari_Resume.pdf".to_owned(),
            object_url_lifetime_ms: 60_000,
            failure_message: "Could not open the resume automatically. \
                              Please download it from the file manager or contact me."
                .to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallaxConfig {
    /// Viewport width (CSS px) the viewport must exceed for parallax to run.
    pub min_viewport_width: f64,
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            factor: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThrottleConfig {
    pub header_ms: u64,
    pub active_link_ms: u64,
    pub parallax_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            header_ms: 16,
            active_link_ms: 100,
            parallax_ms: 16,
        }
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub scroll: ScrollConfig,
    pub typing: TypingConfig,
    pub reveal: RevealConfig,
    pub form: FormConfig,
    pub resume: ResumeConfig,
    pub parallax: ParallaxConfig,
    pub throttle: ThrottleConfig,
}

impl PageConfig {
    /// Parse a (possibly sparse) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing.phrases.is_empty() {
            return Err(ConfigError::Invalid("typing.phrases is empty".into()));
        }
        if let Some(idx) = self.typing.phrases.iter().position(String::is_empty) {
            return Err(ConfigError::Invalid(format!(
                "typing.phrases[{idx}] is an empty string"
            )));
        }
        let nonzero = [
            ("typing.type_delay_ms", self.typing.type_delay_ms),
            ("typing.delete_delay_ms", self.typing.delete_delay_ms),
            ("typing.full_pause_ms", self.typing.full_pause_ms),
            ("typing.empty_pause_ms", self.typing.empty_pause_ms),
            ("throttle.header_ms", self.throttle.header_ms),
            ("throttle.active_link_ms", self.throttle.active_link_ms),
            ("throttle.parallax_ms", self.throttle.parallax_ms),
        ];
        if let Some((name, _)) = nonzero.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be non-zero")));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid(format!(
                "reveal.threshold {} outside 0..=1",
                self.reveal.threshold
            )));
        }
        let finite = [
            ("scroll.header_threshold", self.scroll.header_threshold),
            ("scroll.active_link_offset", self.scroll.active_link_offset),
            ("scroll.smooth_scroll_margin", self.scroll.smooth_scroll_margin),
            ("reveal.bottom_margin_px", self.reveal.bottom_margin_px),
            ("parallax.min_viewport_width", self.parallax.min_viewport_width),
            ("parallax.factor", self.parallax.factor),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} is not finite: {value}")));
        }
        Ok(())
    }
}

#[must_use]
pub(crate) const fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}
