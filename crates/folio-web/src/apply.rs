#![forbid(unsafe_code)]

//! Applies controller commands to the live document.

use std::collections::HashMap;

use folio_core::{DomCommand, Element, FormField};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlButtonElement, HtmlElement, HtmlFormElement, NodeList, ScrollBehavior,
    ScrollToOptions, Url, Window,
};

use crate::binding::{self, Target};

fn elements(list: &NodeList) -> Vec<web_sys::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

/// Document side of the command stream.
pub(crate) struct DomApplier {
    window: Window,
    document: Document,
    /// Status banners still owned by the controller, by id.
    banners: HashMap<u64, web_sys::Element>,
}

impl DomApplier {
    pub(crate) fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            banners: HashMap::new(),
        }
    }

    fn resolve(&self, element: &Element) -> Result<Vec<web_sys::Element>, JsValue> {
        match binding::target(element) {
            Target::All(selector) => Ok(elements(&self.document.query_selector_all(&selector)?)),
            Target::Nth {
                scope,
                selector,
                index,
            } => {
                let Some(scope) = self.document.query_selector(&scope)? else {
                    return Ok(Vec::new());
                };
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                let child = scope.query_selector_all(selector)?.item(index);
                Ok(child
                    .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
                    .into_iter()
                    .collect())
            }
        }
    }

    fn field(&self, field: FormField) -> Option<web_sys::Element> {
        self.document.get_element_by_id(field.id())
    }

    fn clear_field_error(&self, field: FormField) -> Result<(), JsValue> {
        let Some(parent) = self.field(field).and_then(|el| el.parent_element()) else {
            return Ok(());
        };
        if let Some(existing) = parent.query_selector(binding::FORM_ERROR_SELECTOR)? {
            existing.remove();
        }
        Ok(())
    }

    pub(crate) fn apply(&mut self, command: DomCommand) -> Result<(), JsValue> {
        match command {
            DomCommand::AddClass { target, class } => {
                for el in self.resolve(&target)? {
                    el.class_list().add_1(class)?;
                }
            }
            DomCommand::RemoveClass { target, class } => {
                for el in self.resolve(&target)? {
                    el.class_list().remove_1(class)?;
                }
            }
            DomCommand::ToggleClass { target, class } => {
                for el in self.resolve(&target)? {
                    el.class_list().toggle(class)?;
                }
            }
            DomCommand::SetText { target, text } => {
                for el in self.resolve(&target)? {
                    el.set_text_content(Some(&text));
                }
            }
            DomCommand::SetTransform { target, transform } => {
                for el in self.resolve(&target)? {
                    if let Some(el) = el.dyn_ref::<HtmlElement>() {
                        el.style().set_property("transform", &transform)?;
                    }
                }
            }
            DomCommand::SetDisabled { target, disabled } => {
                for el in self.resolve(&target)? {
                    match el.dyn_ref::<HtmlButtonElement>() {
                        Some(button) => button.set_disabled(disabled),
                        None if disabled => el.set_attribute("disabled", "")?,
                        None => el.remove_attribute("disabled")?,
                    }
                }
            }
            DomCommand::ScrollTo { top } => {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            DomCommand::ShowFieldError { field, message } => {
                self.clear_field_error(field)?;
                let Some(parent) = self.field(field).and_then(|el| el.parent_element()) else {
                    return Ok(());
                };
                let span = self.document.create_element("span")?;
                span.set_class_name(binding::FORM_ERROR_CLASS);
                span.set_text_content(Some(message));
                parent.append_child(&span)?;
            }
            DomCommand::ClearFieldError { field } => self.clear_field_error(field)?,
            DomCommand::ClearAllFieldErrors => {
                let errors = self
                    .document
                    .query_selector_all(binding::FORM_ERROR_SELECTOR)?;
                for el in elements(&errors) {
                    el.remove();
                }
            }
            DomCommand::ShowBanner { id, kind, message } => {
                let Some(form) = self.document.get_element_by_id(binding::CONTACT_FORM_ID) else {
                    return Ok(());
                };
                if let Some(existing) = form.query_selector(binding::STATUS_SELECTOR)? {
                    existing.remove();
                }
                let banner = self.document.create_element("div")?;
                banner.set_class_name(kind.class_name());
                banner.set_text_content(Some(&message));
                if let Some(html) = banner.dyn_ref::<HtmlElement>() {
                    html.style()
                        .set_property("margin-top", binding::BANNER_MARGIN_TOP)?;
                }
                form.append_child(&banner)?;
                self.banners.insert(id, banner);
            }
            DomCommand::RemoveBanner { id } => {
                if let Some(banner) = self.banners.remove(&id) {
                    banner.remove();
                }
            }
            DomCommand::ResetForm => {
                if let Some(form) = self
                    .document
                    .get_element_by_id(binding::CONTACT_FORM_ID)
                    .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
                {
                    form.reset();
                }
            }
            DomCommand::InjectStyle { css } => {
                let Some(head) = self.document.head() else {
                    debug!("document has no head, styles skipped");
                    return Ok(());
                };
                let style = self.document.create_element("style")?;
                style.set_text_content(Some(css));
                head.append_child(&style)?;
            }
            DomCommand::RevokeObjectUrl { url } => Url::revoke_object_url(&url)?,
        }
        Ok(())
    }
}
