use std::fs;

use cv_page::{replay_page_str, ReplayOptions};
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn session_script_matches_golden_snapshot() {
    let model =
        fs::read_to_string(fixture_path("cv_page_model.json")).expect("Không đọc được mô tả trang");
    let script = fs::read_to_string(fixture_path("cv_session_script.json"))
        .expect("Không đọc được kịch bản");

    let snapshot = replay_page_str(&model, &script, &ReplayOptions::default())
        .expect("Không chạy được kịch bản");

    let actual = serde_json::to_value(snapshot).expect("Không serialize snapshot");

    let expected = fs::read_to_string(fixture_path("cv_session_snapshot.json"))
        .expect("Không đọc được golden snapshot");
    let expected: Value = serde_json::from_str(&expected).expect("Golden không hợp lệ");

    assert_eq!(actual, expected);
}
