//! WASM bindings - runs the page behaviors against the live browser document
//!
//! The host page loads the module and calls `enhance("{}")` (or passes a JSON
//! configuration). Wiring waits for `DOMContentLoaded` when the document is
//! still loading.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlCollection, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, NodeList,
};

use crate::config::PageConfig;
use crate::dom::Dom;
use crate::error::{UiError, UiResult};
use crate::page::{Event, EventKind, Page};

thread_local! {
    /// Set once the page has been wired; a second `enhance` is ignored
    static ENHANCED: Cell<bool> = const { Cell::new(false) };
}

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Wire the current document.
///
/// `config_json` is a (possibly partial) `PageConfig`; `"{}"` uses every
/// default. Returns an error string when the configuration is rejected.
/// Only the first successful call wires anything.
#[wasm_bindgen]
pub fn enhance(config_json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(config_json).map_err(to_js)?;
    let dom = WebDom::from_window().map_err(to_js)?;
    if ENHANCED.with(|flag| flag.replace(true)) {
        log::warn!("enhance() already ran on this page, ignoring");
        return Ok(());
    }

    if dom.document.ready_state() == "loading" {
        let document = dom.document.clone();
        let on_ready = Closure::once(move |_: web_sys::Event| install(Page::new(dom, config)));
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .map_err(|e| to_js(UiError::Dom(format!("{:?}", e))))?;
        on_ready.forget();
    } else {
        install(Page::new(dom, config));
    }
    Ok(())
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(error: UiError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Run `ready()` and subscribe one listener per element the page asks for.
/// The page lives as long as the listeners, i.e. the whole page view.
fn install(mut page: Page<WebDom>) {
    let start = js_sys::Date::now();
    page.ready();
    log::info!("wired in {:.1} ms", js_sys::Date::now() - start);
    let listeners = page.listeners();
    let page = Rc::new(RefCell::new(page));

    for (node, kind) in listeners {
        let page_for_event = page.clone();
        let target = node.clone();
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let event = match kind {
                EventKind::Click => Event::Click(target.clone()),
                EventKind::Change => Event::Change(target.clone()),
            };
            match page_for_event.try_borrow_mut() {
                Ok(mut page) => {
                    page.deliver(event);
                }
                Err(_) => log::warn!("event re-entered while the page was busy, dropped"),
            }
        }) as Box<dyn FnMut(_)>);

        let name = match kind {
            EventKind::Click => "click",
            EventKind::Change => "change",
        };
        if let Err(e) = node.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
            log::warn!("could not listen for {} on <{}>: {:?}", name, node.tag_name(), e);
        }
        closure.forget();
    }
}

// ========================
// Browser DOM backend
// ========================

/// [`Dom`] over the live `web_sys::Document`
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the current window
    pub fn from_window() -> UiResult<Self> {
        let window = web_sys::window().ok_or_else(|| UiError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::Dom("window has no document".to_string()))?;
        Ok(Self::new(document))
    }
}

fn collection(list: HtmlCollection) -> Vec<Element> {
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

fn node_list(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_class(&self, class: &str) -> Vec<Element> {
        collection(self.document.get_elements_by_class_name(class))
    }

    fn all_elements(&self) -> Vec<Element> {
        self.document
            .query_selector_all("*")
            .map(node_list)
            .unwrap_or_default()
    }

    fn descendants_by_tag(&self, node: &Element, tag: &str) -> Vec<Element> {
        collection(node.get_elements_by_tag_name(tag))
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        collection(node.children())
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::checked)
            .unwrap_or(false)
    }

    fn set_checked(&mut self, node: &Element, checked: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn is_disabled(&self, node: &Element) -> bool {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            return input.disabled();
        }
        if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            return select.disabled();
        }
        node.has_attribute("disabled")
    }

    fn set_disabled(&mut self, node: &Element, disabled: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_disabled(disabled);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_disabled(disabled);
        } else if disabled {
            let _ = node.set_attribute("disabled", "");
        } else {
            let _ = node.remove_attribute("disabled");
        }
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            return select.value();
        }
        if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            return area.value();
        }
        node.get_attribute("value").unwrap_or_default()
    }

    fn create_element(&mut self, tag: &str) -> Element {
        // Only called with fixed, valid tag names
        self.document
            .create_element(tag)
            .expect("valid tag name")
    }

    fn append_text(&mut self, parent: &Element, text: &str) {
        let text = self.document.create_text_node(text);
        let _ = parent.append_child(&text);
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        let _ = parent.append_child(child);
    }

    fn clear_children(&mut self, node: &Element) {
        node.set_text_content(None);
    }
}

// ========================
// Console logger
// ========================

struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[redpot-ui] {}", record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}
