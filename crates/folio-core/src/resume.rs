#![forbid(unsafe_code)]

//! Best-effort resume open/download chain.
//!
//! The host performs the asynchronous fetch and reports either an object URL
//! for the fetched blob or the failure. From there the chain is synchronous:
//!
//! 1. object URL: open in a new context, else force a download;
//! 2. on any failure above: open the asset path directly, else force a
//!    download of the path;
//! 3. if that fails too: alert the user.
//!
//! Every branch ends in either a retrieved file or a visible message.

use core::fmt;

use tracing::{error, info, warn};

use crate::config::ResumeConfig;
use crate::error::FolioError;

/// Browser capabilities the chain needs.
pub trait ResumeHost {
    type Error: fmt::Display;

    /// Open `url` in a new browsing context. `Ok(false)` means the popup was
    /// blocked.
    fn open(&mut self, url: &str) -> Result<bool, Self::Error>;

    /// Trigger a download of `url` through a synthetic anchor click.
    fn download(&mut self, url: &str, filename: &str) -> Result<(), Self::Error>;

    /// Blocking user-facing message.
    fn alert(&mut self, message: &str);
}

/// Which layer of the chain delivered the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOutcome {
    OpenedObjectUrl,
    DownloadedObjectUrl,
    OpenedAsset,
    DownloadedAsset,
    Alerted,
}

impl ResumeOutcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenedObjectUrl => "opened_object_url",
            Self::DownloadedObjectUrl => "downloaded_object_url",
            Self::OpenedAsset => "opened_asset",
            Self::DownloadedAsset => "downloaded_asset",
            Self::Alerted => "alerted",
        }
    }
}

fn open_or_download<H: ResumeHost>(
    host: &mut H,
    url: &str,
    filename: &str,
) -> Result<bool, H::Error> {
    if host.open(url)? {
        return Ok(true);
    }
    info!(url, "popup blocked, forcing download");
    host.download(url, filename)?;
    Ok(false)
}

/// Run the chain once the fetch has settled.
///
/// `asset_url` is the URI-encoded asset path; `fetched` is the object URL
/// created from the fetched blob.
pub fn run_fallback_chain<H: ResumeHost>(
    host: &mut H,
    config: &ResumeConfig,
    asset_url: &str,
    fetched: Result<&str, &FolioError>,
) -> ResumeOutcome {
    let first = match fetched {
        Ok(object_url) => open_or_download(host, object_url, &config.download_filename)
            .map(|opened| {
                if opened {
                    ResumeOutcome::OpenedObjectUrl
                } else {
                    ResumeOutcome::DownloadedObjectUrl
                }
            })
            .map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    };
    let reason = match first {
        Ok(outcome) => return outcome,
        Err(reason) => reason,
    };

    warn!(%reason, asset_url, "fetch failed, attempting direct open or encoded download");
    match open_or_download(host, asset_url, &config.download_filename) {
        Ok(true) => ResumeOutcome::OpenedAsset,
        Ok(false) => ResumeOutcome::DownloadedAsset,
        Err(err) => {
            error!(%err, "final resume fallback failed");
            host.alert(&config.failure_message);
            ResumeOutcome::Alerted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Open(String),
        Download(String, String),
        Alert(String),
    }

    /// Scripted host: `open` answers pop from `opens`, `download` from `downloads`.
    #[derive(Default)]
    struct ScriptedHost {
        opens: Vec<Result<bool, &'static str>>,
        downloads: Vec<Result<(), &'static str>>,
        calls: Vec<Call>,
    }

    impl ScriptedHost {
        fn new(
            opens: Vec<Result<bool, &'static str>>,
            downloads: Vec<Result<(), &'static str>>,
        ) -> Self {
            Self {
                opens: opens.into_iter().rev().collect(),
                downloads: downloads.into_iter().rev().collect(),
                calls: Vec::new(),
            }
        }
    }

    impl ResumeHost for ScriptedHost {
        type Error = &'static str;

        fn open(&mut self, url: &str) -> Result<bool, Self::Error> {
            self.calls.push(Call::Open(url.to_owned()));
            self.opens.pop().unwrap_or(Ok(true))
        }

        fn download(&mut self, url: &str, filename: &str) -> Result<(), Self::Error> {
            self.calls
                .push(Call::Download(url.to_owned(), filename.to_owned()));
            self.downloads.pop().unwrap_or(Ok(()))
        }

        fn alert(&mut self, message: &str) {
            self.calls.push(Call::Alert(message.to_owned()));
        }
    }

    const ASSET: &str = "../vishweshwari_resume.pdf";
    const BLOB: &str = "blob:https://example.test/1234";
    const FILE: &str = "Vishweshwari_Resume.pdf";

    fn not_found() -> FolioError {
        FolioError::Fetch("status 404".into())
    }

    #[test]
    fn fetched_blob_is_opened_first() {
        let mut host = ScriptedHost::new(vec![Ok(true)], vec![]);
        let outcome = run_fallback_chain(&mut host, &ResumeConfig::default(), ASSET, Ok(BLOB));
        assert_eq!(outcome, ResumeOutcome::OpenedObjectUrl);
        assert_eq!(host.calls, vec![Call::Open(BLOB.into())]);
    }

    #[test]
    fn blocked_blob_popup_forces_download() {
        let mut host = ScriptedHost::new(vec![Ok(false)], vec![]);
        let outcome = run_fallback_chain(&mut host, &ResumeConfig::default(), ASSET, Ok(BLOB));
        assert_eq!(outcome, ResumeOutcome::DownloadedObjectUrl);
        assert_eq!(
            host.calls,
            vec![
                Call::Open(BLOB.into()),
                Call::Download(BLOB.into(), FILE.into())
            ]
        );
    }

    #[test]
    fn failed_fetch_opens_asset_directly() {
        let mut host = ScriptedHost::new(vec![Ok(true)], vec![]);
        let err = not_found();
        let outcome = run_fallback_chain(&mut host, &ResumeConfig::default(), ASSET, Err(&err));
        assert_eq!(outcome, ResumeOutcome::OpenedAsset);
        assert_eq!(host.calls, vec![Call::Open(ASSET.into())]);
    }

    #[test]
    fn failed_fetch_and_blocked_popup_downloads_asset() {
        let mut host = ScriptedHost::new(vec![Ok(false)], vec![]);
        let err = not_found();
        let outcome = run_fallback_chain(&mut host, &ResumeConfig::default(), ASSET, Err(&err));
        assert_eq!(outcome, ResumeOutcome::DownloadedAsset);
        assert_eq!(
            host.calls,
            vec![
                Call::Open(ASSET.into()),
                Call::Download(ASSET.into(), FILE.into())
            ]
        );
    }

    #[test]
    fn exhausted_chain_alerts() {
        let mut host = ScriptedHost::new(vec![Ok(false)], vec![Err("anchor click threw")]);
        let config = ResumeConfig::default();
        let err = not_found();
        let outcome = run_fallback_chain(&mut host, &config, ASSET, Err(&err));
        assert_eq!(outcome, ResumeOutcome::Alerted);
        assert_eq!(host.calls.last(), Some(&Call::Alert(config.failure_message)));
    }

    #[test]
    fn error_while_opening_blob_falls_back_to_asset() {
        let mut host = ScriptedHost::new(vec![Err("open threw"), Ok(true)], vec![]);
        let outcome = run_fallback_chain(&mut host, &ResumeConfig::default(), ASSET, Ok(BLOB));
        assert_eq!(outcome, ResumeOutcome::OpenedAsset);
        assert_eq!(
            host.calls,
            vec![Call::Open(BLOB.into()), Call::Open(ASSET.into())]
        );
    }
}
