//! Bộ điều khiển tương tác cho trang CV tĩnh trên WebAssembly.
//!
//! Markup của trang đã có sẵn; crate này chỉ gắn hành vi lên các phần tử
//! được đánh dấu: nút đổi giao diện, anchor cuộn mượt, thanh kỹ năng,
//! bộ lọc, timeline và nút xuất PDF.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod export;
#[cfg(target_arch = "wasm32")]
mod nav;
#[cfg(target_arch = "wasm32")]
mod reveal;
#[cfg(target_arch = "wasm32")]
mod skills;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod theme;
#[cfg(target_arch = "wasm32")]
mod timeline;

#[cfg(target_arch = "wasm32")]
mod wasm_controller {
    use cv_core::PageConfig;
    use wasm_bindgen::JsValue;
    use web_sys::{console, Document, Window};

    use crate::{export, nav, reveal, skills, styles, theme, timeline};

    /// Gắn toàn bộ controller lên document hiện tại.
    ///
    /// Phần tử đánh dấu nào vắng mặt thì phần hành vi tương ứng đơn giản
    /// không được gắn; không coi là lỗi.
    pub fn mount_page_controller(config: PageConfig) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        if let Err(err) = styles::ensure_styles(&document) {
            console::error_1(&err);
        }

        theme::mount(&window, &document)?;
        nav::mount(&window, &document, &config)?;
        reveal::mount(&window, &document, &config)?;
        skills::mount(&document)?;
        timeline::mount(&window, &document, &config)?;
        export::mount(&window, &document, &config)?;

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_controller::mount_page_controller;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_page_controller(_: cv_core::PageConfig) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "cv-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
