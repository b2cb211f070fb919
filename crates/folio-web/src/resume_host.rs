#![forbid(unsafe_code)]

//! Browser side of the resume request: fetch into an object URL, then the
//! open/download/alert primitives the fallback chain runs on.

use folio_core::{FolioError, ResumeHost};
use tracing::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, Document, HtmlAnchorElement, Response, Url, Window};

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

pub(crate) fn host_err(value: JsValue) -> FolioError {
    FolioError::Host(describe(&value))
}

/// Fetch `url` and wrap the body in an object URL.
pub(crate) async fn fetch_object_url(window: &Window, url: &str) -> Result<String, FolioError> {
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| FolioError::Fetch(describe(&err)))?;
    let response: Response = response.dyn_into().map_err(host_err)?;
    if !response.ok() {
        return Err(FolioError::Fetch(format!("status {}", response.status())));
    }
    let blob = JsFuture::from(response.blob().map_err(host_err)?)
        .await
        .map_err(|err| FolioError::Fetch(describe(&err)))?;
    let blob: Blob = blob.dyn_into().map_err(host_err)?;
    Url::create_object_url_with_blob(&blob).map_err(host_err)
}

pub(crate) struct BrowserResumeHost<'a> {
    window: &'a Window,
    document: &'a Document,
}

impl<'a> BrowserResumeHost<'a> {
    pub(crate) const fn new(window: &'a Window, document: &'a Document) -> Self {
        Self { window, document }
    }
}

impl ResumeHost for BrowserResumeHost<'_> {
    type Error = FolioError;

    fn open(&mut self, url: &str) -> Result<bool, FolioError> {
        let tab = self
            .window
            .open_with_url_and_target(url, "_blank")
            .map_err(host_err)?;
        Ok(tab.is_some())
    }

    fn download(&mut self, url: &str, filename: &str) -> Result<(), FolioError> {
        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")
            .map_err(host_err)?
            .dyn_into()
            .map_err(|_| FolioError::Host("created element is not an anchor".into()))?;
        anchor.set_href(url);
        anchor.set_download(filename);
        let body = self
            .document
            .body()
            .ok_or_else(|| FolioError::MissingElement("body".into()))?;
        body.append_child(&anchor).map_err(host_err)?;
        anchor.click();
        anchor.remove();
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            error!(err = %describe(&err), "alert failed");
        }
    }
}
