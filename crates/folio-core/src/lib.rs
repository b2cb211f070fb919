#![forbid(unsafe_code)]

//! `folio-core` is the platform-independent controller behind the Folio
//! portfolio page.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (the wasm shim in
//!   `folio-web`) pushes [`PageEvent`]s and measured layout.
//! - **Deterministic time**: the host advances a monotonic clock explicitly;
//!   every delay (typing, reveal stagger, simulated submit, banner dismissal,
//!   object URL release) lives on one [`TimerQueue`].
//! - **No DOM types**: behavior is expressed as [`DomCommand`]s which the
//!   host drains from [`PageOutputs`] and applies to the real document.
//!
//! A native test can therefore drive a whole page session with a fake clock:
//!
//! ```
//! use core::time::Duration;
//! use folio_core::{PageConfig, PageController, PageElements, PageEvent};
//!
//! let mut page = PageController::new(PageConfig::default(), PageElements::full_page())?;
//! page.init();
//! page.push_event(PageEvent::NavToggleClick);
//! page.step();
//! assert!(page.nav().is_open());
//!
//! page.advance_time(Duration::from_millis(1000));
//! page.step();
//! assert_eq!(page.typing_text(), Some("C"));
//! # Ok::<(), folio_core::ConfigError>(())
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod event;
pub mod form;
pub mod nav;
pub mod parallax;
pub mod resume;
pub mod reveal;
pub mod scroll;
pub mod throttle;
pub mod timer;
pub mod typing;

pub use clock::DeterministicClock;
pub use config::PageConfig;
pub use controller::{PageController, StepResult};
pub use dom::{BannerKind, DomCommand, Element, PageElements, PageOutputs};
pub use error::{ConfigError, FolioError};
pub use event::{FormField, FormSubmission, Key, PageEvent, PageLayout, ScrollSnapshot, SectionLayout};
pub use resume::{ResumeHost, ResumeOutcome};
pub use throttle::Throttle;
pub use timer::TimerQueue;
pub use typing::{TypingAnimation, TypingPhase};
