//! Logic lõi của bộ điều khiển trang CV tương tác.

use serde::{Deserialize, Serialize};

/// Khóa lưu giao diện sáng/tối trong kho key-value của trình duyệt.
pub const THEME_STORAGE_KEY: &str = "cv_theme";

/// Nhãn bộ lọc khớp với mọi khối kỹ năng.
pub const ALL_FILTER: &str = "all";

/// Cấu hình điều chỉnh khoảng cách cuộn và tham số xuất PDF.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageConfig {
    /// Khoảng trừ hao (px) cho header cố định khi cuộn tới anchor.
    /// Lớp trình bày có thể ghi đè qua biến CSS `--header-offset`.
    pub header_offset_px: i32,
    /// Khoảng cách (px) từ mép trên viewport tới mục timeline được kích hoạt.
    pub timeline_offset_px: i32,
    /// Tỷ lệ hiển thị tối thiểu để kích hoạt animation xuất hiện.
    pub reveal_threshold: f64,
    /// Tên file PDF khi xuất.
    pub export_file_name: String,
    /// Nhãn tạm của nút xuất trong lúc render.
    pub export_busy_label: String,
    /// Lề trang PDF (mm).
    pub pdf_margin_mm: u32,
    /// Chất lượng ảnh raster nhúng trong PDF.
    pub pdf_image_quality: f64,
    /// Hệ số phóng đại canvas khi chụp trang.
    pub pdf_scale: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            header_offset_px: 24,
            timeline_offset_px: 80,
            reveal_threshold: 0.12,
            export_file_name: "cv.pdf".to_string(),
            export_busy_label: "Đang chuẩn bị PDF...".to_string(),
            pdf_margin_mm: 12,
            pdf_image_quality: 0.95,
            pdf_scale: 2,
        }
    }
}

/// Giao diện sáng/tối của trang.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Giá trị ghi vào storage và attribute `data-theme`.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Đọc lại giá trị đã lưu; chuỗi lạ coi như chưa lưu gì.
    pub fn from_stored(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Thứ tự ưu tiên: lựa chọn đã lưu > thiết lập hệ thống > sáng.
    pub fn resolve(stored: Option<&str>, system_dark: bool) -> Theme {
        stored.and_then(Theme::from_stored).unwrap_or(if system_dark {
            Theme::Dark
        } else {
            Theme::Light
        })
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Đọc số nguyên ở đầu chuỗi theo kiểu `parseInt`: bỏ khoảng trắng đầu,
/// nhận dấu, dừng ở ký tự đầu tiên không phải chữ số.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// Giá trị pixel từ một biến CSS, ví dụ `"24px"` thành `24`.
pub fn parse_px(raw: &str) -> Option<i32> {
    parse_leading_int(raw).map(|value| value as i32)
}

/// Phần trăm của thanh kỹ năng: thiếu hoặc không đọc được coi là 0,
/// kẹp về đoạn [0, 100].
pub fn clamp_skill_value(raw: Option<&str>) -> u32 {
    raw.and_then(parse_leading_int).unwrap_or(0).clamp(0, 100) as u32
}

/// Một khối hiển thị khi bộ lọc là [`ALL_FILTER`] hoặc trùng đúng category.
pub fn filter_matches(active: &str, category: Option<&str>) -> bool {
    active == ALL_FILTER || category == Some(active)
}

/// Phím kích hoạt mục timeline, tương đương click.
pub fn key_activates_timeline(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Pha của thao tác xuất PDF. Không có trạng thái hủy giữa chừng:
/// đã chạy là chạy tới khi xong hoặc lỗi.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    Idle,
    InProgress,
}

/// Trạng thái tường minh của controller, phục vụ mô phỏng và test
/// không cần document thật. Trên trang thật, attribute và class của
/// chính các phần tử mới là nguồn sự thật cho trạng thái từng phần tử.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageState {
    pub theme: Theme,
    pub active_filter: String,
    pub active_timeline: Option<usize>,
    pub export_phase: ExportPhase,
}

impl PageState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            active_filter: ALL_FILTER.to_string(),
            active_timeline: None,
            export_phase: ExportPhase::Idle,
        }
    }

    /// Đảo giao diện hiện tại và trả về giá trị mới.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Thay bộ lọc đang hoạt động; giá trị cũ bị thay thế trọn vẹn.
    pub fn set_filter(&mut self, tag: &str) {
        self.active_filter = tag.to_string();
    }

    /// Kích hoạt một mục timeline; mục trước đó (nếu có) mất active.
    pub fn activate_timeline(&mut self, index: usize) {
        self.active_timeline = Some(index);
    }

    /// Vào pha xuất; trả về `false` nếu đang có thao tác xuất chạy dở.
    pub fn begin_export(&mut self) -> bool {
        if self.export_phase == ExportPhase::InProgress {
            return false;
        }
        self.export_phase = ExportPhase::InProgress;
        true
    }

    /// Kết thúc thao tác xuất, bất kể thành công hay thất bại.
    pub fn finish_export(&mut self) {
        self.export_phase = ExportPhase::Idle;
    }
}

/// Lỗi chung khi đọc mô tả trang hoặc kịch bản tương tác.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Dữ liệu đầu vào thiếu thông tin tối thiểu")]
    MissingData,
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_theme_wins_over_system_preference() {
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Dark);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn toggle_parity_follows_invocation_count() {
        let mut state = PageState::new(Theme::Light);
        for round in 1..=6 {
            let theme = state.toggle_theme();
            let expected = if round % 2 == 1 {
                Theme::Dark
            } else {
                Theme::Light
            };
            assert_eq!(theme, expected);
        }
    }

    #[test]
    fn skill_values_are_clamped() {
        assert_eq!(clamp_skill_value(Some("137")), 100);
        assert_eq!(clamp_skill_value(Some("-5")), 0);
        assert_eq!(clamp_skill_value(None), 0);
        assert_eq!(clamp_skill_value(Some("abc")), 0);
        assert_eq!(clamp_skill_value(Some("85")), 85);
    }

    #[test]
    fn leading_int_matches_parse_int_semantics() {
        assert_eq!(parse_leading_int("24px"), Some(24));
        assert_eq!(parse_leading_int("  -12.5"), Some(-12));
        assert_eq!(parse_leading_int("px24"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_px("32px"), Some(32));
    }

    #[test]
    fn all_filter_matches_every_category() {
        assert!(filter_matches(ALL_FILTER, Some("design")));
        assert!(filter_matches(ALL_FILTER, None));
        assert!(filter_matches("design", Some("design")));
        assert!(!filter_matches("design", Some("dev")));
        assert!(!filter_matches("design", None));
    }

    #[test]
    fn export_guard_blocks_reentry() {
        let mut state = PageState::new(Theme::Light);
        assert!(state.begin_export());
        assert!(!state.begin_export());
        state.finish_export();
        assert!(state.begin_export());
    }

    #[test]
    fn enter_and_space_activate_timeline() {
        assert!(key_activates_timeline("Enter"));
        assert!(key_activates_timeline(" "));
        assert!(!key_activates_timeline("Escape"));
        assert!(!key_activates_timeline("a"));
    }
}
