//! Bridge WASM <-> JavaScript trung lập framework.

use cv_core::PageConfig;
use serde::Deserialize;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

/// Cấu hình tùy chọn nhận từ phía JavaScript; field vắng mặt dùng mặc định.
#[derive(Deserialize)]
struct JsPageConfig {
    #[serde(default)]
    header_offset_px: Option<i32>,
    #[serde(default)]
    timeline_offset_px: Option<i32>,
    #[serde(default)]
    reveal_threshold: Option<f64>,
    #[serde(default)]
    export_file_name: Option<String>,
    #[serde(default)]
    export_busy_label: Option<String>,
    #[serde(default)]
    pdf_margin_mm: Option<u32>,
    #[serde(default)]
    pdf_image_quality: Option<f64>,
    #[serde(default)]
    pdf_scale: Option<u32>,
}

impl From<JsPageConfig> for PageConfig {
    fn from(cfg: JsPageConfig) -> Self {
        let mut base = PageConfig::default();
        if let Some(offset) = cfg.header_offset_px {
            base.header_offset_px = offset;
        }
        if let Some(offset) = cfg.timeline_offset_px {
            base.timeline_offset_px = offset;
        }
        if let Some(threshold) = cfg.reveal_threshold {
            base.reveal_threshold = threshold;
        }
        if let Some(name) = cfg.export_file_name {
            base.export_file_name = name;
        }
        if let Some(label) = cfg.export_busy_label {
            base.export_busy_label = label;
        }
        if let Some(margin) = cfg.pdf_margin_mm {
            base.pdf_margin_mm = margin;
        }
        if let Some(quality) = cfg.pdf_image_quality {
            base.pdf_image_quality = quality;
        }
        if let Some(scale) = cfg.pdf_scale {
            base.pdf_scale = scale;
        }
        base
    }
}

/// Gắn controller lên trang hiện tại. Gọi đúng một lần khi markup sẵn sàng.
#[wasm_bindgen]
pub fn mount_cv_page(config: Option<JsValue>) -> Result<(), JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let config = match config {
        Some(js_cfg) => {
            let cfg: JsPageConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            PageConfig::from(cfg)
        }
        None => PageConfig::default(),
    };

    cv_ui::mount_page_controller(config)
}
