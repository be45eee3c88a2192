//! DOM rendering and control wiring (wasm32 only)
//!
//! Each widget builds its own subtree at mount time, then re-renders from
//! its `sim` state after every transition. Lookups after mounting are
//! best-effort: a missing element just skips that update.

pub mod contest;
pub mod gallery;
pub mod sequencer;
pub mod tutorial;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::SetupError;

pub fn window() -> Result<Window, SetupError> {
    web_sys::window().ok_or(SetupError::NoWindow)
}

pub fn document() -> Result<Document, SetupError> {
    window()?.document().ok_or(SetupError::NoDocument)
}

/// First match for `selector`, falling back to `<body>`
pub fn mount_point(document: &Document, selector: &str) -> Result<Element, SetupError> {
    if let Some(el) = document.query_selector(selector).ok().flatten() {
        return Ok(el);
    }
    document
        .body()
        .map(Element::from)
        .ok_or_else(|| SetupError::MissingContainer(selector.to_string()))
}

/// Create a `<div>` with the given class and markup
pub fn create_div(document: &Document, class: &str, html: &str) -> Result<Element, SetupError> {
    let el = document
        .create_element("div")
        .map_err(|_| SetupError::Dom("div"))?;
    el.set_class_name(class);
    el.set_inner_html(html);
    Ok(el)
}

pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

pub fn set_style_by_id(document: &Document, id: &str, property: &str, value: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        set_style(&el, property, value);
    }
}

pub fn set_disabled(document: &Document, id: &str, disabled: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        if disabled {
            let _ = el.set_attribute("disabled", "");
        } else {
            let _ = el.remove_attribute("disabled");
        }
    }
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

/// Remove `class` from every element matching `selector`
pub fn clear_class(document: &Document, selector: &str, class: &str) {
    if let Ok(nodes) = document.query_selector_all(selector) {
        for i in 0..nodes.length() {
            if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                toggle_class(&el, class, false);
            }
        }
    }
}

/// Remove an element by id if present
pub fn remove_by_id(document: &Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.remove();
    }
}

/// Attach a click handler by element id
pub fn on_click_id(document: &Document, id: &str, handler: impl FnMut() + 'static) {
    if let Some(el) = document.get_element_by_id(id) {
        on_click(&el, handler);
    } else {
        log::warn!("No #{} to wire", id);
    }
}

pub fn on_click(el: &Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
    let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Run `callback` once after `delay_ms`
pub fn set_timeout(delay_ms: u32, callback: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(callback);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms.min(i32::MAX as u32) as i32,
    );
    closure.forget();
}

/// Wall-clock milliseconds
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Local `HH:MM:SS` for log lines
pub fn clock_stamp() -> String {
    let date = js_sys::Date::new_0();
    format!(
        "{:02}:{:02}:{:02}",
        date.get_hours(),
        date.get_minutes(),
        date.get_seconds()
    )
}
