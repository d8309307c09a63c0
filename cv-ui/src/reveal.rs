//! Animation chạy đúng một lần khi phần tử đi vào viewport.

use cv_core::{clamp_skill_value, PageConfig};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::dom;

const SKILL_BAR_SELECTOR: &str = ".skill-bar";
const SKILL_FILL_SELECTOR: &str = ".skill-bar-fill";
const CARD_SELECTOR: &str = ".card";
const REVEALED_CLASS: &str = "in-view";

/// Kích hoạt sớm một chút trước khi thanh kỹ năng chạm mép dưới viewport.
const SKILL_BAR_ROOT_MARGIN: &str = "0px 0px -10% 0px";

pub(crate) fn mount(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<(), JsValue> {
    let bars = dom::query_all(document, SKILL_BAR_SELECTOR);
    let cards = dom::query_all(document, CARD_SELECTOR);

    if !observer_supported(window) {
        // Không có IntersectionObserver: áp trạng thái cuối ngay khi khởi động.
        for bar in &bars {
            apply_fill(bar, None);
        }
        for card in &cards {
            let _ = card.class_list().add_1(REVEALED_CLASS);
        }
        return Ok(());
    }

    if !bars.is_empty() {
        let window_for_fill = window.clone();
        let observer = one_shot_observer(
            move |element| apply_fill(element, Some(&window_for_fill)),
            Some(SKILL_BAR_ROOT_MARGIN),
            config.reveal_threshold,
        )?;
        for bar in &bars {
            observer.observe(bar);
        }
    }

    if !cards.is_empty() {
        let observer = one_shot_observer(
            |element| {
                let _ = element.class_list().add_1(REVEALED_CLASS);
            },
            None,
            config.reveal_threshold,
        )?;
        for card in &cards {
            observer.observe(card);
        }
    }

    Ok(())
}

/// Observer gỡ theo dõi phần tử ngay sau lần giao cắt đầu tiên, nên mỗi
/// phần tử chỉ được xử lý đúng một lần dù thông báo đến theo thứ tự nào.
fn one_shot_observer<F>(
    mut on_reveal: F,
    root_margin: Option<&str>,
    threshold: f64,
) -> Result<IntersectionObserver, JsValue>
where
    F: FnMut(&Element) + 'static,
{
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                on_reveal(&target);
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

/// Đổ thanh kỹ năng theo `data-value` đã kẹp và công bố giá trị qua
/// `aria-valuenow`. Có window thì đợi khung vẽ kế tiếp để transition CSS
/// chạy từ 0 lên giá trị đích; không có thì đặt thẳng.
fn apply_fill(bar: &Element, window: Option<&Window>) {
    let value = clamp_skill_value(bar.get_attribute("data-value").as_deref());
    let _ = bar.set_attribute("aria-valuenow", &value.to_string());

    let Some(fill) = bar.query_selector(SKILL_FILL_SELECTOR).ok().flatten() else {
        return;
    };
    let Ok(fill) = fill.dyn_into::<HtmlElement>() else {
        return;
    };
    let width = format!("{value}%");

    match window {
        Some(window) => {
            let set_width = Closure::once_into_js(move || {
                let _ = fill.style().set_property("width", &width);
            });
            let _ = window.request_animation_frame(set_width.unchecked_ref());
        }
        None => {
            let _ = fill.style().set_property("width", &width);
        }
    }
}

fn observer_supported(window: &Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}
