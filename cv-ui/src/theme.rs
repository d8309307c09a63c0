//! Giao diện sáng/tối: đọc ưu tiên đã lưu, phản ánh lên document,
//! lưu lại mỗi lần đổi.

use std::cell::Cell;
use std::rc::Rc;

use cv_core::{Theme, THEME_STORAGE_KEY};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

const TOGGLE_ID: &str = "themeToggle";

pub(crate) fn mount(window: &Window, document: &Document) -> Result<(), JsValue> {
    let initial = Theme::resolve(read_stored(window).as_deref(), system_prefers_dark(window));
    apply_theme(document, initial);

    let Some(toggle) = document.get_element_by_id(TOGGLE_ID) else {
        return Ok(());
    };

    // Theme hiện tại sống trong bộ nhớ để phiên vẫn đổi được giao diện
    // khi storage bị chặn.
    let current = Rc::new(Cell::new(initial));
    let handler = {
        let window = window.clone();
        let document = document.clone();
        let current = Rc::clone(&current);
        Closure::<dyn FnMut()>::new(move || {
            let next = current.get().toggled();
            current.set(next);
            persist(&window, next);
            apply_theme(&document, next);
        })
    };
    toggle.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();

    Ok(())
}

/// Gắn `data-theme` lên gốc document và đồng bộ `aria-pressed` của nút
/// bật tắt. Giao diện sáng gỡ hẳn attribute thay vì ghi "light".
fn apply_theme(document: &Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        if theme.is_dark() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        } else {
            let _ = root.remove_attribute("data-theme");
        }
    }
    if let Some(toggle) = document.get_element_by_id(TOGGLE_ID) {
        let pressed = if theme.is_dark() { "true" } else { "false" };
        let _ = toggle.set_attribute("aria-pressed", pressed);
    }
}

/// Storage có thể bị chặn; mọi lỗi coi như chưa lưu gì.
fn read_stored(window: &Window) -> Option<String> {
    let storage = window.local_storage().ok().flatten()?;
    storage.get_item(THEME_STORAGE_KEY).ok().flatten()
}

fn persist(window: &Window, theme: Theme) {
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

fn system_prefers_dark(window: &Window) -> bool {
    window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map_or(false, |query| query.matches())
}
