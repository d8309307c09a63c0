use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cv_core::Theme;
use cv_page::{replay_page_str, ReplayOptions};

#[derive(Parser, Debug)]
#[command(
    name = "cv-cli",
    about = "Chạy thử kịch bản tương tác trên mô tả trang CV dạng JSON."
)]
struct Args {
    /// Đường dẫn tới file JSON mô tả trang.
    #[arg(short, long)]
    model: PathBuf,
    /// Đường dẫn tới file JSON kịch bản tương tác.
    #[arg(short, long)]
    script: PathBuf,
    /// Giá trị theme đã lưu từ phiên trước, nếu muốn giả lập.
    #[arg(long)]
    stored_theme: Option<String>,
    /// Hệ thống đang ưu tiên giao diện tối.
    #[arg(long)]
    system_dark: bool,
    /// In snapshot đầy đủ dạng JSON thay vì bản tóm tắt.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let model = std::fs::read_to_string(&args.model)
        .with_context(|| format!("Không đọc được file {:?}", args.model))?;
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Không đọc được file {:?}", args.script))?;

    let options = ReplayOptions {
        stored_theme: args.stored_theme,
        system_dark: args.system_dark,
        storage_available: true,
    };
    let snapshot = replay_page_str(&model, &script, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let theme_label = match snapshot.theme {
        Theme::Light => "sáng",
        Theme::Dark => "tối",
    };
    println!(
        "Giao diện: {theme_label}\nBộ lọc: {}\nKhối hiển thị: {}/{}\nPDF đã lưu: {}, lần in: {}",
        snapshot.active_filter,
        snapshot.blocks_visible.iter().filter(|shown| **shown).count(),
        snapshot.blocks_visible.len(),
        snapshot.export.saved,
        snapshot.export.printed
    );

    Ok(())
}
