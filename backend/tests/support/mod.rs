#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use backend::fakes::{FakeAssets, FakeSheets, FakeUsers, StaticTemplate};
use backend::services::roster::compositor::FontSource;
use backend::OrderService;
use chrono::NaiveDate;
use common::model::user::User;
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

pub const CURRENT_SHEET: i64 = 3;
pub const PREVIOUS_SHEET: i64 = 2;

/// Monday 4 March 2024.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn col(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

pub fn names() -> Vec<String> {
    col(&["Họ tên", "Nguyễn Văn An", "Trần Bình 19", "Lê Chi", "Phạm Dũng 19"])
}

/// March sheet: names, then one column per day of the month. Only
/// Monday the 4th has registrations.
pub fn march_columns(monday_marks: &[&str]) -> Vec<Vec<String>> {
    let mut columns = vec![names()];
    for day in 1..=31 {
        let mut column = vec![format!("{day:02}/03/2024")];
        if day == 4 {
            column.extend(monday_marks.iter().map(|m| m.to_string()));
        }
        columns.push(column);
    }
    columns
}

/// February sheet: Trần Bình still owes money.
pub fn february_columns() -> Vec<Vec<String>> {
    vec![
        names(),
        col(&["Đã đóng", "v", "", "v", ""]),
        col(&["Còn lại", "0", "120000", "0", "0"]),
    ]
}

pub fn users() -> Vec<User> {
    let user = |full_name: &str, user_name: &str, is_blacklisted: bool| User {
        full_name: full_name.to_string(),
        user_name: user_name.to_string(),
        is_blacklisted,
    };
    vec![
        user("Nguyễn Văn An", "an.nv", false),
        user("Trần Bình 19", "binh.tran", false),
        user("Lê Chi", "chi.le", true),
        user("Phạm Dũng 19", "dung.pham", false),
    ]
}

pub fn template() -> RgbaImage {
    RgbaImage::from_pixel(600, 700, Rgba([255, 255, 255, 255]))
}

pub struct Harness {
    pub sheets: Arc<FakeSheets>,
    pub assets: Arc<FakeAssets>,
    pub service: OrderService,
    fonts: TempDir,
}

impl Harness {
    pub fn new(sheets: FakeSheets, assets: FakeAssets) -> Self {
        Self::build(sheets, assets, true)
    }

    /// Harness whose font directory stays empty, so rendering fails.
    pub fn without_fonts(sheets: FakeSheets, assets: FakeAssets) -> Self {
        Self::build(sheets, assets, false)
    }

    fn build(sheets: FakeSheets, assets: FakeAssets, with_fonts: bool) -> Self {
        init_logging();
        let fonts = TempDir::new().expect("create font dir");
        if with_fonts {
            install_system_font(fonts.path());
        }
        let sheets = Arc::new(sheets);
        let assets = Arc::new(assets);
        let service = OrderService::new(
            sheets.clone(),
            assets.clone(),
            Arc::new(FakeUsers::new(users())),
            Arc::new(StaticTemplate(template())),
            FontSource::new(fonts.path(), "Roster"),
            "list",
        );
        Self {
            sheets,
            assets,
            service,
            fonts,
        }
    }

    /// Fails the test when no system font could be installed.
    pub fn require_fonts(&self) {
        assert!(
            self.fonts.path().join("Roster-Regular.ttf").exists(),
            "rendering tests need DejaVu Sans or Liberation Sans installed"
        );
    }
}

/// Copies a font found on the host into `dir` as the `Roster` family.
fn install_system_font(dir: &Path) {
    const CANDIDATES: [(&str, &str); 3] = [
        (
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        ),
        (
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        ),
        (
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        ),
    ];
    for (regular, bold) in CANDIDATES {
        if Path::new(regular).exists() && Path::new(bold).exists() {
            fs::copy(regular, dir.join("Roster-Regular.ttf")).expect("copy regular font");
            fs::copy(bold, dir.join("Roster-Bold.ttf")).expect("copy bold font");
            return;
        }
    }
}
