//! Lọc khối kỹ năng theo nhóm và bật tắt phần chi tiết của từng khối.

use cv_core::{filter_matches, ALL_FILTER};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event};

use crate::dom;

const FILTER_SELECTOR: &str = ".skill-filter";
const BLOCK_SELECTOR: &str = ".skill-block";
const MORE_SELECTOR: &str = ".more-skill";
const ACTIVE_CLASS: &str = "active";
const EXPANDED_CLASS: &str = "expanded";

pub(crate) fn mount(document: &Document) -> Result<(), JsValue> {
    for control in dom::query_all(document, FILTER_SELECTOR) {
        let handler = {
            let document = document.clone();
            let control = control.clone();
            Closure::<dyn FnMut()>::new(move || {
                if let Some(tag) = control.get_attribute("data-filter") {
                    set_active_filter(&document, &tag);
                }
            })
        };
        control.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    // Trạng thái khởi đầu xác định: mọi khối đều hiển thị.
    set_active_filter(document, ALL_FILTER);

    mount_details(document)
}

/// Đúng một nút lọc mang class active; khối không khớp tag thì ẩn.
/// Hàm thuần theo tag hiện tại và category tĩnh của từng khối.
fn set_active_filter(document: &Document, tag: &str) {
    for control in dom::query_all(document, FILTER_SELECTOR) {
        let is_active = control.get_attribute("data-filter").as_deref() == Some(tag);
        let _ = control.class_list().toggle_with_force(ACTIVE_CLASS, is_active);
    }
    for block in dom::query_all(document, BLOCK_SELECTOR) {
        let category = block.get_attribute("data-category");
        if filter_matches(tag, category.as_deref()) {
            let _ = block.style().remove_property("display");
        } else {
            let _ = block.style().set_property("display", "none");
        }
    }
}

/// Nút "xem thêm" chỉ tác động lên khối chứa nó, không khối nào khác.
fn mount_details(document: &Document) -> Result<(), JsValue> {
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = dom::event_target_element(&event) else {
            return;
        };
        let Ok(Some(control)) = target.closest(MORE_SELECTOR) else {
            return;
        };
        let Ok(Some(block)) = control.closest(BLOCK_SELECTOR) else {
            return;
        };
        let Ok(expanded) = block.class_list().toggle(EXPANDED_CLASS) else {
            return;
        };
        let _ = control.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
    });
    document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
