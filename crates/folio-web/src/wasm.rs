#![forbid(unsafe_code)]

//! `wasm-bindgen` entry point.
//!
//! Wires DOM listeners to a shared [`PageController`] and pumps it: every
//! browser callback syncs the controller clock, steps it, applies the
//! resulting commands, then re-arms a single `setTimeout` for the next
//! controller deadline. Only compiled on `wasm32` targets.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::{Rc, Weak};

use folio_core::event::{
    FormField, FormSubmission, Key, PageLayout, ScrollSnapshot, SectionLayout,
};
use folio_core::reveal::REVEAL_CHILD_SELECTOR;
use folio_core::{FolioError, PageConfig, PageController, PageElements, PageEvent};
use js_sys::Reflect;
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};
use web_time::Instant;

use crate::apply::DomApplier;
use crate::{binding, logs};
use crate::resume_host::{BrowserResumeHost, describe, fetch_object_url, host_err};

// ---------------------------------------------------------------------------
// Console plumbing
// ---------------------------------------------------------------------------

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// Buffers one formatted event and prints it to `console.log` on drop.
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
    }
}

fn install_tracing() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(ConsoleWriter::default)
            .with_max_level(logs::CONSOLE_MAX_LEVEL)
            .with_target(false)
            .without_time()
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            console_error("folio: a tracing subscriber was already installed");
        }
    });
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// Wire the page once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    install_panic_hook();
    install_tracing();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = boot(window, document) {
                error!(%err, "page wiring failed");
            }
        });
        target.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }
    boot(window, document).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn load_config(document: &Document) -> PageConfig {
    let Some(json) = document
        .get_element_by_id(binding::CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "ignoring page config override");
            PageConfig::default()
        }
    }
}

fn discover(document: &Document, config: &PageConfig) -> Result<PageElements, FolioError> {
    let has_id = |id: &str| document.get_element_by_id(id).is_some();
    let has = |selector: &str| -> Result<bool, FolioError> {
        Ok(document.query_selector(selector).map_err(host_err)?.is_some())
    };
    let nav_links = collect(document, binding::NAV_LINK_SELECTOR)?
        .iter()
        .filter_map(|link| link.get_attribute("href"))
        .filter_map(|href| binding::section_from_href(&href).map(str::to_owned))
        .collect();
    let sections = collect(document, binding::SECTION_SELECTOR)?
        .iter()
        .map(web_sys::Element::id)
        .filter(|id| binding::is_tracked_section(id))
        .collect();
    Ok(PageElements {
        nav_menu: has_id(binding::NAV_MENU_ID),
        nav_toggle: has_id(binding::NAV_TOGGLE_ID),
        nav_close: has_id(binding::NAV_CLOSE_ID),
        header: has_id(binding::HEADER_ID),
        contact_form: has_id(binding::CONTACT_FORM_ID),
        submit_button: has(binding::SUBMIT_BUTTON_SELECTOR)?,
        hero_blob: has(binding::HERO_BLOB_SELECTOR)?,
        typing_text: has(binding::TYPING_TEXT_SELECTOR)?,
        download_resume: has_id(binding::DOWNLOAD_RESUME_ID),
        view_work: has(&binding::shortcut_selector(&config.scroll.view_work_target))?,
        nav_links,
        sections,
        fields: FormField::ALL
            .into_iter()
            .filter(|field| has_id(field.id()))
            .collect(),
    })
}

fn collect(root: &Document, selector: &str) -> Result<Vec<web_sys::Element>, FolioError> {
    let list = root.query_selector_all(selector).map_err(host_err)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect())
}

fn boot(window: Window, document: Document) -> Result<(), FolioError> {
    let config = load_config(&document);
    let elements = discover(&document, &config)?;
    debug!(?elements, "page elements discovered");
    let mut page = PageController::new(config, elements)?;
    page.init();

    let runtime = Rc::new_cyclic(|weak: &Weak<Runtime>| {
        let weak = weak.clone();
        let on_timer = Closure::wrap(Box::new(move || {
            if let Some(runtime) = weak.upgrade() {
                runtime.timer.set(None);
                runtime.pump();
            }
        }) as Box<dyn FnMut()>);
        Runtime {
            applier: RefCell::new(DomApplier::new(window.clone(), document.clone())),
            window,
            document,
            page: RefCell::new(page),
            epoch: Instant::now(),
            timer: Cell::new(None),
            on_timer,
        }
    });
    runtime.wire()?;
    runtime.dispatch(PageEvent::Layout(runtime.measure()));
    info!("page wired");
    // Lives as long as the page.
    std::mem::forget(runtime);
    Ok(())
}

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

struct Runtime {
    window: Window,
    document: Document,
    page: RefCell<PageController>,
    applier: RefCell<DomApplier>,
    epoch: Instant,
    timer: Cell<Option<i32>>,
    on_timer: Closure<dyn FnMut()>,
}

impl Runtime {
    fn dispatch(&self, event: PageEvent) {
        self.dispatch_all([event]);
    }

    /// Queue `events` in order and pump once.
    fn dispatch_all(&self, events: impl IntoIterator<Item = PageEvent>) {
        match self.page.try_borrow_mut() {
            Ok(mut page) => events.into_iter().for_each(|event| page.push_event(event)),
            Err(_) => {
                warn!("controller busy, events dropped");
                return;
            }
        }
        self.pump();
    }

    /// Step the controller and apply what it produced.
    fn pump(&self) {
        let Ok(mut page) = self.page.try_borrow_mut() else {
            return;
        };
        page.set_time(self.epoch.elapsed());
        page.step();
        let outputs = page.take_outputs();
        let next = page.next_deadline().map(|at| at.saturating_sub(page.now()));
        drop(page);

        logs::forward(&outputs.logs);
        let mut applier = self.applier.borrow_mut();
        for command in outputs.commands {
            if let Err(err) = applier.apply(command) {
                warn!(err = %describe(&err), "dom command failed");
            }
        }
        drop(applier);
        self.arm_timer(next);
    }

    fn arm_timer(&self, delay: Option<core::time::Duration>) {
        if let Some(handle) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let Some(delay) = delay else {
            return;
        };
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.on_timer.as_ref().unchecked_ref(),
                delay_ms,
            ) {
            Ok(handle) => self.timer.set(Some(handle)),
            Err(err) => error!(err = %describe(&err), "setTimeout failed"),
        }
    }

    // -- measurement -------------------------------------------------------

    fn measure(&self) -> PageLayout {
        let header_height = self
            .document
            .get_element_by_id(binding::HEADER_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map_or(0.0, |el| f64::from(el.offset_height()));
        let sections = collect(&self.document, binding::SECTION_SELECTOR)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .filter(|el| binding::is_tracked_section(&el.id()))
            .map(|el| SectionLayout {
                id: el.id(),
                top: f64::from(el.offset_top()),
                height: f64::from(el.offset_height()),
                reveal_children: el
                    .query_selector_all(REVEAL_CHILD_SELECTOR)
                    .map_or(0, |list| list.length() as usize),
            })
            .collect();
        PageLayout {
            header_height,
            sections,
        }
    }

    fn snapshot(&self) -> ScrollSnapshot {
        let number = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        ScrollSnapshot {
            scroll_y: self.window.page_y_offset().unwrap_or(0.0),
            viewport_width: number(self.window.inner_width()),
            viewport_height: number(self.window.inner_height()),
        }
    }

    fn submission(&self) -> FormSubmission {
        let value = |field: FormField| {
            let el = self.document.get_element_by_id(field.id())?;
            if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                return Some(input.value());
            }
            if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
                return Some(area.value());
            }
            el.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
        };
        let button_label = self
            .document
            .query_selector(binding::SUBMIT_BUTTON_SELECTOR)
            .ok()
            .flatten()
            .and_then(|button| button.text_content());
        FormSubmission {
            name: value(FormField::Name),
            email: value(FormField::Email),
            subject: value(FormField::Subject),
            message: value(FormField::Message),
            button_label,
        }
    }

    // -- listeners ---------------------------------------------------------

    fn listen<F>(
        self: &Rc<Self>,
        target: &EventTarget,
        kind: &str,
        mut handler: F,
    ) -> Result<(), FolioError>
    where
        F: FnMut(&Rc<Self>, Event) + 'static,
    {
        let runtime = Rc::clone(self);
        let callback = Closure::wrap(Box::new(move |event: Event| handler(&runtime, event))
            as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(host_err)?;
        callback.forget();
        Ok(())
    }

    fn listen_by_id<F>(self: &Rc<Self>, id: &str, kind: &str, handler: F) -> Result<(), FolioError>
    where
        F: FnMut(&Rc<Self>, Event) + 'static,
    {
        match self.document.get_element_by_id(id) {
            Some(el) => self.listen(&el, kind, handler),
            None => {
                debug!(id, "element absent, listener skipped");
                Ok(())
            }
        }
    }

    fn wire(self: &Rc<Self>) -> Result<(), FolioError> {
        self.listen_by_id(binding::NAV_TOGGLE_ID, "click", |rt, _| {
            rt.dispatch(PageEvent::NavToggleClick);
        })?;
        self.listen_by_id(binding::NAV_CLOSE_ID, "click", |rt, _| {
            rt.dispatch(PageEvent::NavCloseClick);
        })?;

        for link in collect(&self.document, binding::NAV_LINK_SELECTOR)? {
            let Some(section) = link
                .get_attribute("href")
                .and_then(|href| binding::section_from_href(&href).map(str::to_owned))
            else {
                continue;
            };
            self.listen(&link, "click", move |rt, event| {
                event.prevent_default();
                rt.dispatch(PageEvent::NavLinkClick {
                    section: section.clone(),
                });
            })?;
        }

        let shortcut = {
            let page = self.page.borrow();
            binding::shortcut_selector(&page.config().scroll.view_work_target)
        };
        if let Some(button) = self.document.query_selector(&shortcut).map_err(host_err)? {
            self.listen(&button, "click", |rt, event| {
                event.prevent_default();
                rt.dispatch(PageEvent::ViewWorkClick);
            })?;
        }

        self.listen(&self.document, "keydown", |rt, event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                rt.dispatch(PageEvent::KeyDown {
                    key: Key::from_dom(&event.key()),
                });
            }
        })?;

        self.listen(&self.window, "scroll", |rt, _| {
            rt.dispatch_all([
                PageEvent::Layout(rt.measure()),
                PageEvent::Scroll(rt.snapshot()),
            ]);
        })?;
        self.listen(&self.window, "resize", |rt, _| {
            rt.dispatch(PageEvent::Layout(rt.measure()));
        })?;
        self.listen(&self.window, "load", |rt, _| {
            rt.dispatch(PageEvent::Layout(rt.measure()));
        })?;

        self.listen_by_id(binding::CONTACT_FORM_ID, "submit", |rt, event| {
            event.prevent_default();
            rt.dispatch(PageEvent::Submit(rt.submission()));
        })?;
        for field in FormField::ALL {
            self.listen_by_id(field.id(), "input", move |rt, _| {
                rt.dispatch(PageEvent::FieldInput { field });
            })?;
        }

        self.listen_by_id(binding::DOWNLOAD_RESUME_ID, "click", |rt, event| {
            event.prevent_default();
            rt.request_resume();
        })?;

        self.observe_sections()
    }

    fn observe_sections(self: &Rc<Self>) -> Result<(), FolioError> {
        let runtime = Rc::clone(self);
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: JsValue| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                runtime.dispatch(PageEvent::SectionIntersect {
                    section: entry.target().id(),
                    is_intersecting: entry.is_intersecting(),
                });
            }
        }) as Box<dyn FnMut(js_sys::Array, JsValue)>);

        let options = IntersectionObserverInit::new();
        {
            let page = self.page.borrow();
            let reveal = &page.config().reveal;
            options.set_threshold(&JsValue::from_f64(reveal.threshold));
            options.set_root_margin(&reveal.root_margin());
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(host_err)?;
        callback.forget();
        for section in collect(&self.document, binding::SECTION_SELECTOR)? {
            if binding::is_tracked_section(&section.id()) {
                observer.observe(&section);
            } else {
                debug!("section without id, reveal skipped");
            }
        }
        Ok(())
    }

    // -- resume ------------------------------------------------------------

    fn request_resume(self: &Rc<Self>) {
        let Some(path) = self.page.borrow().resume_asset_path().map(str::to_owned) else {
            return;
        };
        let asset_url = String::from(js_sys::encode_uri(&path));
        let runtime = Rc::clone(self);
        spawn_local(async move {
            let fetched = fetch_object_url(&runtime.window, &asset_url).await;
            {
                let mut host = BrowserResumeHost::new(&runtime.window, &runtime.document);
                let Ok(mut page) = runtime.page.try_borrow_mut() else {
                    warn!("controller busy, resume request dropped");
                    return;
                };
                page.finish_resume(&mut host, &asset_url, fetched);
            }
            runtime.pump();
        });
    }
}
