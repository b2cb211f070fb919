#![forbid(unsafe_code)]

//! Contact form validation and simulated submission.
//!
//! All four rules run on every submit attempt so each failing field gets its
//! own inline message. A valid form flips the submit button to its sending
//! label; the controller then completes the submission after a fixed latency
//! (no request is made) and shows a singleton, self-dismissing status banner.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::config::FormConfig;
use crate::dom::{BannerKind, DomCommand, Element, class};
use crate::event::{FormField, FormSubmission};

/// Characters JavaScript's `\s` matches. `regex_lite`'s `\s` is ASCII only.
const WHITESPACE: &str = "\t\n\u{b}\u{c}\r \u{a0}\u{1680}\u{2000}-\u{200a}\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}\u{feff}";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^{WHITESPACE}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("email regex")
});

/// `local@domain.tld` with no whitespace or `@` inside the parts.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Check one field. Lengths are counted in characters after trimming.
pub fn check_field(field: FormField, value: Option<&str>) -> Result<(), &'static str> {
    let (ok, message) = match field {
        FormField::Name => (
            min_chars(value, 2),
            "Name must be at least 2 characters long",
        ),
        FormField::Email => (
            value.is_some_and(|v| validate_email(v.trim())),
            "Please enter a valid email address",
        ),
        FormField::Subject => (
            min_chars(value, 3),
            "Subject must be at least 3 characters long",
        ),
        FormField::Message => (
            min_chars(value, 10),
            "Message must be at least 10 characters long",
        ),
    };
    if ok { Ok(()) } else { Err(message) }
}

fn min_chars(value: Option<&str>, min: usize) -> bool {
    value.is_some_and(|v| v.trim().chars().count() >= min)
}

/// Per-field outcome of one validation pass, in [`FormField::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    results: Vec<(FormField, Result<(), &'static str>)>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    /// Error message for `field`, if it failed.
    #[must_use]
    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.results
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, result)| result.err())
    }

    pub fn failing_fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.results
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(field, _)| *field)
    }
}

/// Run every rule; never short-circuits.
#[must_use]
pub fn validate(submission: &FormSubmission) -> ValidationReport {
    ValidationReport {
        results: FormField::ALL
            .into_iter()
            .map(|field| (field, check_field(field, submission.value(field))))
            .collect(),
    }
}

/// `true` iff all four rules pass.
#[must_use]
pub fn validate_form(submission: &FormSubmission) -> bool {
    validate(submission).is_valid()
}

fn clear_styling(out: &mut Vec<DomCommand>) {
    for class in [class::ERROR, class::SUCCESS] {
        out.push(DomCommand::RemoveClass {
            target: Element::FormControls,
            class,
        });
    }
}

/// Reset previous feedback, then style each field from `report`.
pub fn render_report(report: &ValidationReport, out: &mut Vec<DomCommand>) {
    out.push(DomCommand::ClearAllFieldErrors);
    clear_styling(out);
    for (field, result) in &report.results {
        match result {
            Err(message) => {
                out.push(DomCommand::AddClass {
                    target: Element::Field(*field),
                    class: class::ERROR,
                });
                out.push(DomCommand::ShowFieldError {
                    field: *field,
                    message: *message,
                });
            }
            Ok(()) => out.push(DomCommand::AddClass {
                target: Element::Field(*field),
                class: class::SUCCESS,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum SubmitState {
    #[default]
    Idle,
    Sending {
        restore_label: Option<String>,
    },
}

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Busy,
    Rejected(ValidationReport),
    Sending,
}

/// Submission lifecycle and the status banner.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    state: SubmitState,
    banner: Option<u64>,
    next_banner_id: u64,
}

impl ContactForm {
    #[must_use]
    pub fn is_sending(&self) -> bool {
        matches!(self.state, SubmitState::Sending { .. })
    }

    /// Id of the banner currently shown.
    #[must_use]
    pub const fn banner(&self) -> Option<u64> {
        self.banner
    }

    pub fn submit(
        &mut self,
        submission: &FormSubmission,
        config: &FormConfig,
        out: &mut Vec<DomCommand>,
    ) -> SubmitOutcome {
        if self.is_sending() {
            return SubmitOutcome::Busy;
        }
        let report = validate(submission);
        render_report(&report, out);
        if !report.is_valid() {
            return SubmitOutcome::Rejected(report);
        }
        out.push(DomCommand::SetText {
            target: Element::SubmitButton,
            text: config.sending_label.clone(),
        });
        out.push(DomCommand::SetDisabled {
            target: Element::SubmitButton,
            disabled: true,
        });
        self.state = SubmitState::Sending {
            restore_label: submission.button_label.clone(),
        };
        SubmitOutcome::Sending
    }

    /// Finish the simulated send. Returns the id of the banner shown.
    pub fn complete(&mut self, config: &FormConfig, out: &mut Vec<DomCommand>) -> Option<u64> {
        let SubmitState::Sending { restore_label } = std::mem::take(&mut self.state) else {
            return None;
        };
        let id = self.show_banner(BannerKind::Success, config.success_message.clone(), out);
        out.push(DomCommand::ResetForm);
        clear_styling(out);
        if let Some(label) = restore_label {
            out.push(DomCommand::SetText {
                target: Element::SubmitButton,
                text: label,
            });
        }
        out.push(DomCommand::SetDisabled {
            target: Element::SubmitButton,
            disabled: false,
        });
        Some(id)
    }

    /// Replace any current banner with a new one.
    pub fn show_banner(
        &mut self,
        kind: BannerKind,
        message: String,
        out: &mut Vec<DomCommand>,
    ) -> u64 {
        if let Some(old) = self.banner.take() {
            out.push(DomCommand::RemoveBanner { id: old });
        }
        self.next_banner_id += 1;
        let id = self.next_banner_id;
        out.push(DomCommand::ShowBanner { id, kind, message });
        self.banner = Some(id);
        id
    }

    /// Auto-dismiss timer for banner `id`; stale ids are ignored.
    pub fn dismiss_banner(&mut self, id: u64, out: &mut Vec<DomCommand>) {
        if self.banner == Some(id) {
            self.banner = None;
            out.push(DomCommand::RemoveBanner { id });
        }
    }

    /// The user edited `field`: drop its error feedback only.
    pub fn on_input(&self, field: FormField, out: &mut Vec<DomCommand>) {
        out.push(DomCommand::RemoveClass {
            target: Element::Field(field),
            class: class::ERROR,
        });
        out.push(DomCommand::ClearFieldError { field });
    }
}
