//! Cuộn mượt tới anchor trong trang, trừ hao chiều cao header cố định.

use cv_core::{parse_px, PageConfig};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;

/// Biến CSS cho phép lớp trình bày ghi đè khoảng trừ hao mặc định.
const HEADER_OFFSET_VAR: &str = "--header-offset";

/// Chờ layout ổn định trước khi cuộn theo hash lúc tải trang.
/// Heuristic, không phải cơ chế đồng bộ chính xác.
const INITIAL_HASH_DELAY_MS: i32 = 60;

pub(crate) fn mount(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<(), JsValue> {
    // Một listener ở mức document bắt click cho mọi anchor nội trang.
    let click_handler = {
        let window = window.clone();
        let document = document.clone();
        let config = config.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = dom::event_target_element(&event) else {
                return;
            };
            let Ok(Some(anchor)) = target.closest("a[href^=\"#\"]") else {
                return;
            };
            let Some(hash) = anchor.get_attribute("href") else {
                return;
            };
            if hash.len() <= 1 {
                return;
            }
            event.prevent_default();
            scroll_to_hash(&window, &document, &hash, &config);
            // Cập nhật hash hiển thị mà không thêm mục history mới.
            if let Ok(history) = window.history() {
                let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&hash));
            }
        })
    };
    document.add_event_listener_with_callback("click", click_handler.as_ref().unchecked_ref())?;
    click_handler.forget();

    schedule_initial_hash_scroll(window, document, config)
}

/// Cuộn tới phần tử mà hash trỏ đến; hash không trỏ tới đâu thì thôi.
pub(crate) fn scroll_to_hash(window: &Window, document: &Document, hash: &str, config: &PageConfig) {
    let Some(element) = document.query_selector(hash).ok().flatten() else {
        return;
    };
    let offset = header_offset(window, document, config);
    let rect = element.get_bounding_client_rect();
    let page_top = window.page_y_offset().unwrap_or(0.0);
    smooth_scroll_to(window, page_top + rect.top() - f64::from(offset));
}

pub(crate) fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn header_offset(window: &Window, document: &Document, config: &PageConfig) -> i32 {
    document
        .document_element()
        .and_then(|root| window.get_computed_style(&root).ok().flatten())
        .and_then(|style| style.get_property_value(HEADER_OFFSET_VAR).ok())
        .and_then(|value| parse_px(&value))
        .unwrap_or(config.header_offset_px)
}

fn schedule_initial_hash_scroll(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<(), JsValue> {
    let hash = window.location().hash().unwrap_or_default();
    if hash.len() <= 1 {
        return Ok(());
    }

    let window_for_scroll = window.clone();
    let document = document.clone();
    let config = config.clone();
    let callback = Closure::once_into_js(move || {
        scroll_to_hash(&window_for_scroll, &document, &hash, &config);
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        INITIAL_HASH_DELAY_MS,
    )?;
    Ok(())
}
