//! Tiện ích truy vấn DOM dùng chung giữa các controller con.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

/// Gom mọi phần tử khớp selector thành vector; selector hỏng coi như
/// không khớp gì.
pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    let mut elements = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        if let Some(node) = list.get(index) {
            if let Ok(element) = node.dyn_into::<HtmlElement>() {
                elements.push(element);
            }
        }
    }
    elements
}

/// Phần tử đầu tiên khớp selector, nếu có.
pub(crate) fn query_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// Phần tử nguồn của một event, nếu nguồn là element.
pub(crate) fn event_target_element(event: &Event) -> Option<Element> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
}
