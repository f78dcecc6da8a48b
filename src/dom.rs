//! Thin helpers over `web_sys` shared by the widgets.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Node, NodeList,
};

use crate::error::SetupError;

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// Like [`query`], but a miss becomes the error that skips the widget.
pub fn require(document: &Document, selector: &'static str) -> Result<Element, SetupError> {
    query(document, selector).ok_or(SetupError::MissingElement(selector))
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attaches a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SetupError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Runs `init` once the document has been parsed.
pub fn on_ready<F>(document: &Document, init: F) -> Result<(), SetupError>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        init();
        return Ok(());
    }
    let mut init = Some(init);
    listen(document, "DOMContentLoaded", move |_| {
        if let Some(init) = init.take() {
            init();
        }
    })
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let class_list = element.class_list();
    let _ = if on {
        class_list.add_1(class)
    } else {
        class_list.remove_1(class)
    };
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

/// Trimmed text content, empty when the node has none.
pub fn text(element: &Element) -> String {
    element
        .text_content()
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Current value of an `<input>` or `<textarea>`.
pub fn field_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else {
        element
            .dyn_ref::<HtmlTextAreaElement>()
            .map(HtmlTextAreaElement::value)
    }
}

/// Whether an event target sits inside `container` (or is the container).
pub fn contains_target(container: &Element, target: Option<&EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_ref::<Node>())
        .map_or(false, |node| container.contains(Some(node)))
}

/// Whether an observer entry counts as the element having crossed
/// `threshold`. Browsers also deliver an entry on first observation and
/// whenever `isIntersecting` flips, at any ratio above zero.
pub fn crossed(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio >= threshold
}

/// Builds an observer that calls `on_visible` the first time each observed
/// element is at least `threshold` visible, then stops watching that element.
pub fn one_shot_observer<F>(
    threshold: f64,
    root_margin: Option<&str>,
    mut on_visible: F,
) -> Result<IntersectionObserver, SetupError>
where
    F: FnMut(&Element) + 'static,
{
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if crossed(entry.is_intersecting(), entry.intersection_ratio(), threshold) {
                    let target = entry.target();
                    on_visible(&target);
                    observer.unobserve(&target);
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}
