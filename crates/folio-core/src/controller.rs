#![forbid(unsafe_code)]

//! Host-driven page controller.
//!
//! [`PageController`] owns every piece of transient page state and a single
//! timer queue. The host loop is:
//!
//! 1. sync the clock ([`PageController::set_time`] / [`PageController::advance_time`]),
//! 2. push DOM events ([`PageController::push_event`]),
//! 3. [`PageController::step`],
//! 4. apply [`PageController::take_outputs`] to the document,
//! 5. arm one host timer for [`PageController::next_deadline`].
//!
//! Handlers for one scroll event run in registration order: direct header
//! state and active link, then throttled header state, active link and
//! parallax, each behind its own [`Throttle`].

use core::time::Duration;
use std::collections::VecDeque;

use tracing::{debug, info};

use crate::clock::{DeterministicClock, duration_from_ms};
use crate::config::{PageConfig, ms};
use crate::dom::{ANIMATION_CSS, DomCommand, Element, PageElements, PageOutputs};
use crate::error::{ConfigError, FolioError};
use crate::event::{FormSubmission, Key, PageEvent, PageLayout, ScrollSnapshot};
use crate::form::{ContactForm, SubmitOutcome};
use crate::nav::NavState;
use crate::resume::{ResumeHost, ResumeOutcome, run_fallback_chain};
use crate::reveal::{RevealObserver, reveal_child};
use crate::throttle::Throttle;
use crate::timer::TimerQueue;
use crate::typing::{TypingAnimation, TypingTimings};
use crate::{parallax, scroll};

/// Deferred work on the controller's timer queue.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TimerTask {
    TypingTick,
    RevealChild { section: String, index: usize },
    SubmitComplete,
    DismissBanner { id: u64 },
    RevokeObjectUrl { url: String },
}

/// Result of one [`PageController::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    pub events_processed: u32,
    pub timers_fired: u32,
}

#[derive(Debug, Clone, Copy)]
struct ScrollThrottles {
    header: Throttle,
    active_link: Throttle,
    parallax: Throttle,
}

/// Platform-independent page controller.
pub struct PageController {
    config: PageConfig,
    elements: PageElements,
    clock: DeterministicClock,
    timers: TimerQueue<TimerTask>,
    events: VecDeque<PageEvent>,
    outputs: PageOutputs,
    /// Scratch buffer handlers emit into before element guarding.
    pending: Vec<DomCommand>,
    initialized: bool,
    layout: PageLayout,
    nav: NavState,
    throttles: ScrollThrottles,
    typing: Option<TypingAnimation>,
    typing_text: Option<String>,
    reveal: RevealObserver,
    form: ContactForm,
}

impl PageController {
    /// Create a controller for a page exposing `elements`.
    pub fn new(config: PageConfig, elements: PageElements) -> Result<Self, ConfigError> {
        config.validate()?;
        let throttles = ScrollThrottles {
            header: Throttle::new(ms(config.throttle.header_ms)),
            active_link: Throttle::new(ms(config.throttle.active_link_ms)),
            parallax: Throttle::new(ms(config.throttle.parallax_ms)),
        };
        let typing = if elements.typing_text {
            TypingAnimation::new(
                &config.typing.phrases,
                TypingTimings::from(&config.typing),
            )
        } else {
            None
        };
        Ok(Self {
            reveal: RevealObserver::new(ms(config.reveal.stagger_ms)),
            config,
            elements,
            clock: DeterministicClock::new(),
            timers: TimerQueue::new(),
            events: VecDeque::new(),
            outputs: PageOutputs::default(),
            pending: Vec::new(),
            initialized: false,
            layout: PageLayout::default(),
            nav: NavState::default(),
            throttles,
            typing,
            typing_text: None,
            form: ContactForm::default(),
        })
    }

    /// Inject the animation stylesheet and schedule the typing effect.
    /// Further calls are ignored.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.pending.push(DomCommand::InjectStyle { css: ANIMATION_CSS });
        if self.typing.is_some() {
            self.schedule(ms(self.config.typing.start_delay_ms), TimerTask::TypingTick);
        } else {
            debug!("typing target absent, animation disabled");
        }
        self.flush();
        self.log("page init".to_owned());
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub const fn elements(&self) -> &PageElements {
        &self.elements
    }

    #[must_use]
    pub const fn nav(&self) -> NavState {
        self.nav
    }

    #[must_use]
    pub const fn form(&self) -> &ContactForm {
        &self.form
    }

    #[must_use]
    pub const fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }

    /// Text last rendered by the typing animation.
    #[must_use]
    pub fn typing_text(&self) -> Option<&str> {
        self.typing_text.as_deref()
    }

    // -- clock -------------------------------------------------------------

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Advance by host milliseconds; non-finite or non-positive values are ignored.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        if let Some(dt) = duration_from_ms(dt_ms) {
            self.clock.advance(dt);
        }
    }

    /// Sync to an absolute host time. Never moves backwards.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Earliest pending timer deadline, for the host to arm a timeout.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    // -- events ------------------------------------------------------------

    pub fn push_event(&mut self, event: PageEvent) {
        self.events.push_back(event);
    }

    /// Process queued events in push order, then every due timer.
    pub fn step(&mut self) -> StepResult {
        let mut result = StepResult::default();
        while let Some(event) = self.events.pop_front() {
            self.handle_event(event);
            self.flush();
            result.events_processed += 1;
        }
        let now = self.clock.now();
        while let Some(task) = self.timers.pop_due(now) {
            self.fire(task);
            self.flush();
            result.timers_fired += 1;
        }
        result
    }

    /// Take captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> PageOutputs {
        std::mem::take(&mut self.outputs)
    }

    fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Layout(layout) => self.layout = layout,
            PageEvent::Scroll(snapshot) => self.on_scroll(&snapshot),
            PageEvent::NavToggleClick => {
                self.nav.toggle(&mut self.pending);
                self.log(format!("nav toggle open={}", self.nav.is_open()));
            }
            PageEvent::NavCloseClick => self.nav.close(&mut self.pending),
            PageEvent::NavLinkClick { section } => self.on_nav_link(&section),
            PageEvent::ViewWorkClick => {
                if !self.elements.view_work {
                    debug!("view work shortcut absent, click ignored");
                    return;
                }
                let target = self.config.scroll.view_work_target.clone();
                self.scroll_to_section(&target);
            }
            PageEvent::KeyDown { key: Key::Escape } => self.nav.close(&mut self.pending),
            PageEvent::KeyDown { key: Key::Other(_) } => {}
            PageEvent::Submit(submission) => self.on_submit(&submission),
            PageEvent::FieldInput { field } => self.form.on_input(field, &mut self.pending),
            PageEvent::SectionIntersect {
                section,
                is_intersecting,
            } => self.on_intersect(&section, is_intersecting),
        }
    }

    /// Direct header and active-link updates run on every event so the final
    /// scroll position always wins; the throttled set follows.
    fn on_scroll(&mut self, snapshot: &ScrollSnapshot) {
        self.update_header(snapshot);
        self.update_active_link(snapshot);

        let now = self.clock.now();
        if self.throttles.header.try_fire(now) {
            self.update_header(snapshot);
        }
        if self.throttles.active_link.try_fire(now) {
            self.update_active_link(snapshot);
        }
        if self.throttles.parallax.try_fire(now) {
            parallax::update_hero(snapshot, &self.config.parallax, &mut self.pending);
        }
    }

    fn update_header(&mut self, snapshot: &ScrollSnapshot) {
        scroll::update_header(
            snapshot.scroll_y,
            self.config.scroll.header_threshold,
            &mut self.pending,
        );
    }

    fn update_active_link(&mut self, snapshot: &ScrollSnapshot) {
        let current = scroll::current_section(
            &self.layout,
            snapshot.scroll_y,
            self.config.scroll.active_link_offset,
        );
        if let Some(section) = current {
            scroll::highlight_link(&section.id, &mut self.pending);
        }
    }

    /// Smooth-scroll to `section`. Returns `false` if it is not on the page.
    fn scroll_to_section(&mut self, section: &str) -> bool {
        let Some(target) = self.layout.section(section) else {
            debug!(section, "scroll target not found");
            return false;
        };
        let top = scroll::scroll_target(
            target.top,
            self.layout.header_height,
            self.config.scroll.smooth_scroll_margin,
        );
        self.pending.push(DomCommand::ScrollTo { top });
        true
    }

    fn on_nav_link(&mut self, section: &str) {
        if !self.scroll_to_section(section) {
            return;
        }
        self.nav.close(&mut self.pending);
        scroll::highlight_link(section, &mut self.pending);
        self.log(format!("nav link section={section}"));
    }

    fn on_submit(&mut self, submission: &FormSubmission) {
        if !self.elements.contact_form {
            debug!("submit without contact form ignored");
            return;
        }
        match self
            .form
            .submit(submission, &self.config.form, &mut self.pending)
        {
            SubmitOutcome::Busy => debug!("submit ignored while sending"),
            SubmitOutcome::Rejected(report) => {
                let failing: Vec<&str> = report.failing_fields().map(|f| f.id()).collect();
                self.log(format!("form rejected fields={}", failing.join(",")));
            }
            SubmitOutcome::Sending => {
                info!("contact form accepted, simulating send");
                self.schedule(
                    ms(self.config.form.submit_latency_ms),
                    TimerTask::SubmitComplete,
                );
                self.log("form sending".to_owned());
            }
        }
    }

    fn on_intersect(&mut self, section: &str, is_intersecting: bool) {
        let child_count = self
            .layout
            .section(section)
            .map_or(0, |layout| layout.reveal_children);
        let plan = self
            .reveal
            .on_intersect(section, is_intersecting, child_count, &mut self.pending);
        for child in plan {
            self.schedule(
                child.delay,
                TimerTask::RevealChild {
                    section: child.section,
                    index: child.index,
                },
            );
        }
    }

    // -- timers ------------------------------------------------------------

    fn schedule(&mut self, delay: Duration, task: TimerTask) {
        self.timers.schedule(self.clock.now(), delay, task);
    }

    fn fire(&mut self, task: TimerTask) {
        match task {
            TimerTask::TypingTick => {
                let Some(typing) = self.typing.as_mut() else {
                    return;
                };
                let frame = typing.step();
                self.pending.push(DomCommand::SetText {
                    target: Element::TypingText,
                    text: frame.text.clone(),
                });
                self.typing_text = Some(frame.text);
                self.schedule(frame.delay, TimerTask::TypingTick);
            }
            TimerTask::RevealChild { section, index } => {
                self.pending.push(reveal_child(section, index));
            }
            TimerTask::SubmitComplete => {
                if let Some(id) = self.form.complete(&self.config.form, &mut self.pending) {
                    info!(banner = id, "contact form sent");
                    self.schedule(
                        ms(self.config.form.banner_lifetime_ms),
                        TimerTask::DismissBanner { id },
                    );
                    self.log(format!("form sent banner={id}"));
                }
            }
            TimerTask::DismissBanner { id } => self.form.dismiss_banner(id, &mut self.pending),
            TimerTask::RevokeObjectUrl { url } => {
                self.pending.push(DomCommand::RevokeObjectUrl { url });
            }
        }
    }

    // -- resume ------------------------------------------------------------

    /// Asset path the host should fetch, or `None` when the page has no
    /// resume control.
    #[must_use]
    pub fn resume_asset_path(&self) -> Option<&str> {
        self.elements
            .download_resume
            .then_some(self.config.resume.asset_path.as_str())
    }

    /// Finish a resume request once the host's fetch settled.
    ///
    /// `asset_url` is the encoded asset path the host fetched; `fetched` is
    /// the object URL made from the response blob. A created object URL is
    /// always released after the configured lifetime.
    pub fn finish_resume<H: ResumeHost>(
        &mut self,
        host: &mut H,
        asset_url: &str,
        fetched: Result<String, FolioError>,
    ) -> ResumeOutcome {
        let outcome = run_fallback_chain(
            host,
            &self.config.resume,
            asset_url,
            fetched.as_deref(),
        );
        if let Ok(url) = fetched {
            self.schedule(
                ms(self.config.resume.object_url_lifetime_ms),
                TimerTask::RevokeObjectUrl { url },
            );
        }
        info!(outcome = outcome.label(), "resume request finished");
        self.log(format!("resume outcome={}", outcome.label()));
        outcome
    }

    // -- outputs -----------------------------------------------------------

    /// Move pending commands to the outputs, dropping those whose element the
    /// page does not have.
    fn flush(&mut self) {
        for cmd in self.pending.drain(..) {
            match cmd.required_element() {
                Some(element) if !self.elements.contains(&element) => {
                    debug!(?element, "element absent, command dropped");
                }
                _ => self.outputs.commands.push(cmd),
            }
        }
    }

    fn log(&mut self, line: String) {
        self.outputs.logs.push(line);
    }
}
