//! Xuất CV ra PDF qua html2pdf, rơi về hộp thoại in của trình duyệt
//! khi thiếu thư viện hoặc render lỗi.

use cv_core::PageConfig;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, Document, Element, HtmlButtonElement, Window};

use crate::dom;

const EXPORT_BUTTON_ID: &str = "exportPdfBtn";
const PRINT_BUTTON_ID: &str = "printBtn";
const CONTENT_SELECTOR: &str = ".cv-wrap";

/// Các phần tử điều khiển không được lọt vào bản PDF.
const CHROME_SELECTOR: &str = ".btn, .header-actions, .cv-nav";
const HIDDEN_CLASS: &str = "hide-on-export";

/// Tùy chọn truyền nguyên trạng cho chuỗi html2pdf.
#[derive(Serialize)]
struct ExportOptions {
    margin: u32,
    filename: String,
    image: ImageOptions,
    html2canvas: CanvasOptions,
    #[serde(rename = "jsPDF")]
    js_pdf: PdfOptions,
}

#[derive(Serialize)]
struct ImageOptions {
    #[serde(rename = "type")]
    format: String,
    quality: f64,
}

#[derive(Serialize)]
struct CanvasOptions {
    scale: u32,
    #[serde(rename = "useCORS")]
    use_cors: bool,
    logging: bool,
}

#[derive(Serialize)]
struct PdfOptions {
    unit: String,
    format: String,
    orientation: String,
}

impl ExportOptions {
    fn from_config(config: &PageConfig) -> Self {
        Self {
            margin: config.pdf_margin_mm,
            filename: config.export_file_name.clone(),
            image: ImageOptions {
                format: "jpeg".to_string(),
                quality: config.pdf_image_quality,
            },
            html2canvas: CanvasOptions {
                scale: config.pdf_scale,
                use_cors: true,
                logging: false,
            },
            js_pdf: PdfOptions {
                unit: "mm".to_string(),
                format: "a4".to_string(),
                orientation: "portrait".to_string(),
            },
        }
    }
}

#[wasm_bindgen]
extern "C" {
    type Html2Pdf;

    /// Hàm toàn cục do bundle html2pdf.js cung cấp, nếu trang có nạp.
    #[wasm_bindgen(catch, js_name = html2pdf)]
    fn html2pdf_chain() -> Result<Html2Pdf, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn set(this: &Html2Pdf, options: &JsValue) -> Result<Html2Pdf, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn from(this: &Html2Pdf, source: &Element) -> Result<Html2Pdf, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn save(this: &Html2Pdf) -> Result<js_sys::Promise, JsValue>;
}

pub(crate) fn mount(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<(), JsValue> {
    if let Some(print_button) = document.get_element_by_id(PRINT_BUTTON_ID) {
        let handler = {
            let window = window.clone();
            Closure::<dyn FnMut()>::new(move || {
                let _ = window.print();
            })
        };
        print_button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    let Some(export_button) = document.get_element_by_id(EXPORT_BUTTON_ID) else {
        return Ok(());
    };
    let Ok(export_button) = export_button.dyn_into::<HtmlButtonElement>() else {
        return Ok(());
    };

    let handler = {
        let window = window.clone();
        let document = document.clone();
        let config = config.clone();
        let button = export_button.clone();
        Closure::<dyn FnMut()>::new(move || {
            // disabled là chốt chống gọi chồng, bật trước mọi điểm await.
            if button.disabled() {
                return;
            }
            button.set_disabled(true);
            let original_label = button.inner_html();
            button.set_text_content(Some(&config.export_busy_label));
            toggle_chrome(&document, true);

            let window = window.clone();
            let document = document.clone();
            let config = config.clone();
            let button = button.clone();
            spawn_local(async move {
                let content = dom::query_one(&document, CONTENT_SELECTOR)
                    .or_else(|| document.body().map(Element::from));

                if let Some(content) = content {
                    if html2pdf_available(&window) {
                        if let Err(err) = render_pdf(&content, &config).await {
                            console::error_2(&JsValue::from_str("Xuất PDF thất bại:"), &err);
                            let _ = window.print();
                        }
                    } else {
                        let _ = window.print();
                    }
                }

                // Bước hoàn tất luôn chạy: gỡ đánh dấu ẩn, trả nút về
                // trạng thái và nhãn ban đầu.
                toggle_chrome(&document, false);
                button.set_disabled(false);
                button.set_inner_html(&original_label);
            });
        })
    };
    export_button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();

    Ok(())
}

fn html2pdf_available(window: &Window) -> bool {
    js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("html2pdf"))
        .map(|value| value.is_function())
        .unwrap_or(false)
}

async fn render_pdf(content: &Element, config: &PageConfig) -> Result<(), JsValue> {
    let options = serde_wasm_bindgen::to_value(&ExportOptions::from_config(config))
        .map_err(|err| JsValue::from_str(&format!("Không serialize tùy chọn xuất: {err}")))?;
    let chain = html2pdf_chain()?;
    let chain = chain.set(&options)?;
    let chain = chain.from(content)?;
    JsFuture::from(chain.save()?).await?;
    Ok(())
}

/// Gắn hoặc gỡ class ẩn trên các phần tử chrome tương tác.
fn toggle_chrome(document: &Document, hide: bool) {
    for element in dom::query_all(document, CHROME_SELECTOR) {
        if hide {
            let _ = element.class_list().add_1(HIDDEN_CLASS);
        } else {
            let _ = element.class_list().remove_1(HIDDEN_CLASS);
        }
    }
}
