//! Timeline tương tác: mỗi lúc chỉ một mục active, bàn phím ngang hàng
//! với chuột.

use cv_core::{key_activates_timeline, PageConfig};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, KeyboardEvent, Window};

use crate::{dom, nav};

const ITEM_SELECTOR: &str = ".tl-item";
const ACTIVE_CLASS: &str = "active";

pub(crate) fn mount(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<(), JsValue> {
    let items = dom::query_all(document, ITEM_SELECTOR);

    for item in &items {
        let click_handler = {
            let window = window.clone();
            let items = items.clone();
            let item = item.clone();
            let offset = config.timeline_offset_px;
            Closure::<dyn FnMut()>::new(move || activate_item(&window, &items, &item, offset))
        };
        item.add_event_listener_with_callback("click", click_handler.as_ref().unchecked_ref())?;
        click_handler.forget();

        // Enter và Space đi qua đúng hàm kích hoạt của click.
        let key_handler = {
            let window = window.clone();
            let items = items.clone();
            let item = item.clone();
            let offset = config.timeline_offset_px;
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                if key_activates_timeline(&event.key()) {
                    activate_item(&window, &items, &item, offset);
                }
            })
        };
        item.add_event_listener_with_callback("keyup", key_handler.as_ref().unchecked_ref())?;
        key_handler.forget();
    }

    Ok(())
}

/// Mục được chọn là mục active duy nhất và được cuộn tới vị trí cách mép
/// trên viewport một khoảng cố định.
fn activate_item(window: &Window, items: &[HtmlElement], item: &HtmlElement, offset_px: i32) {
    for other in items {
        let _ = other.class_list().remove_1(ACTIVE_CLASS);
    }
    let _ = item.class_list().add_1(ACTIVE_CLASS);

    let top = item.get_bounding_client_rect().top() + window.page_y_offset().unwrap_or(0.0);
    nav::smooth_scroll_to(window, top - f64::from(offset_px));
}
