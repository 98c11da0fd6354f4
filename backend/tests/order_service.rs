mod support;

use common::model::roster::DebtMap;
use common::requests::OrderRequest;
use backend::fakes::{FakeAssets, FakeSheets};
use backend::services::sheets::sheet_title;
use backend::OrderError;
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

use support::*;

fn roster_sheets() -> FakeSheets {
    FakeSheets::default()
        .with_sheet(PREVIOUS_SHEET, "T2/2024", february_columns())
        .with_sheet(CURRENT_SHEET, "T3/2024", march_columns(&["x", "x", "x", "x"]))
}

fn request(user_name: &str, date: NaiveDate, is_ordering: bool, whole_month: bool) -> OrderRequest {
    OrderRequest {
        user_name: user_name.to_string(),
        date,
        is_ordering,
        whole_month,
    }
}

#[tokio::test]
async fn order_marks_a_single_day() {
    let harness = Harness::new(roster_sheets(), FakeAssets::default());

    let accepted = harness
        .service
        .order_on(monday(), &request("an.nv", monday(), true, false))
        .await
        .unwrap();

    assert!(accepted);
    let updates = harness.sheets.updates();
    assert_eq!(updates.len(), 1);
    let update = &updates[0];
    assert_eq!(update.sheet_id, CURRENT_SHEET);
    assert_eq!((update.start_column, update.end_column), (5, 6));
    assert_eq!((update.start_row, update.end_row), (1, 2));
    assert_eq!(update.values, vec![vec!["x".to_string()]]);
}

#[tokio::test]
async fn whole_month_order_leaves_weekends_blank() {
    let harness = Harness::new(roster_sheets(), FakeAssets::default());
    let friday = NaiveDate::from_ymd_opt(2024, 3, 29).unwrap();

    harness
        .service
        .order_on(monday(), &request("dung.pham", friday, true, true))
        .await
        .unwrap();

    let update = &harness.sheets.updates()[0];
    assert_eq!((update.start_column, update.end_column), (30, 33));
    assert_eq!(update.start_row, 4);
    assert_eq!(update.values, vec![vec!["x".to_string(), String::new(), String::new()]]);
}

#[tokio::test]
async fn cancelling_writes_blanks() {
    let harness = Harness::new(roster_sheets(), FakeAssets::default());

    harness
        .service
        .order_on(monday(), &request("binh.tran", monday(), false, false))
        .await
        .unwrap();

    let update = &harness.sheets.updates()[0];
    assert_eq!(update.start_row, 2);
    assert_eq!(update.values, vec![vec![String::new()]]);
}

#[tokio::test]
async fn rejected_update_is_reported_as_false() {
    let harness = Harness::new(roster_sheets().rejecting_updates(), FakeAssets::default());

    let accepted = harness
        .service
        .order_on(monday(), &request("an.nv", monday(), true, false))
        .await
        .unwrap();

    assert!(!accepted);
    assert_eq!(harness.sheets.updates().len(), 1);
}

#[tokio::test]
async fn unknown_user_cannot_order() {
    let harness = Harness::new(roster_sheets(), FakeAssets::default());

    let result = harness
        .service
        .order_on(monday(), &request("ghost", monday(), true, false))
        .await;

    assert!(matches!(result, Err(OrderError::UserNotFound { user }) if user == "ghost"));
    assert!(harness.sheets.updates().is_empty());
    assert_eq!(harness.sheets.reads(), 0);
}

#[tokio::test]
async fn order_outside_the_sheet_fails() {
    let harness = Harness::new(roster_sheets(), FakeAssets::default());
    let april = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();

    let result = harness
        .service
        .order_on(monday(), &request("an.nv", april, true, false))
        .await;

    assert!(matches!(result, Err(OrderError::DateNotFound { date }) if date == "02/04/2024"));
    assert!(harness.sheets.updates().is_empty());
}

#[tokio::test]
async fn unpaid_list_reads_previous_period() {
    let harness = Harness::new(roster_sheets(), FakeAssets::default());

    let debts = harness.service.unpaid_list_on(monday()).await.unwrap();

    assert_eq!(debts.get(&2).map(String::as_str), Some("Trần Bình 19"));
    assert!(!debts.contains_key(&1));
    assert!(!debts.contains_key(&4));
}

#[tokio::test]
async fn unpaid_list_without_previous_sheet_fails() {
    let sheets = FakeSheets::default().with_sheet(CURRENT_SHEET, "T3/2024", march_columns(&[]));
    let harness = Harness::new(sheets, FakeAssets::default());

    let result = harness.service.unpaid_list_on(monday()).await;

    assert!(matches!(result, Err(OrderError::SheetNotFound { title }) if title == "T2/2024"));
}

#[tokio::test]
async fn get_menu_reads_the_current_period() {
    let today = Local::now().date_naive();
    let sheets = FakeSheets::default().with_sheet(
        9,
        &sheet_title(today),
        vec![
            col(&["Họ tên", "An"]),
            col(&["Thực đơn", "Thứ 2 - 04/03", "1. Cơm gà", "2. Bún bò", "3. Cá kho", "4. Canh chua"]),
        ],
    );
    let harness = Harness::new(sheets, FakeAssets::default());

    let menu = harness.service.get_menu(monday()).await.unwrap();

    let dishes: Vec<&str> = menu.keys().map(String::as_str).collect();
    assert_eq!(dishes, vec!["Bún bò", "Canh chua", "Cá kho", "Cơm gà"]);
}

#[tokio::test]
async fn roster_requires_the_period_sheet() {
    let harness = Harness::new(FakeSheets::default(), FakeAssets::default());
    let mut rng = StdRng::seed_from_u64(1);

    let result = harness.service.create_order_list_image_on(monday(), &mut rng).await;

    assert!(matches!(result, Err(OrderError::SheetNotFound { title }) if title == "T3/2024"));
    assert!(harness.assets.uploads().is_empty());
}

#[tokio::test]
async fn roster_requires_todays_column() {
    let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let sheets = FakeSheets::default().with_sheet(4, "T4/2024", vec![names()]);
    let harness = Harness::new(sheets, FakeAssets::default());
    let mut rng = StdRng::seed_from_u64(1);

    let result = harness.service.create_order_list_image_on(april, &mut rng).await;

    assert!(matches!(result, Err(OrderError::DateNotFound { date }) if date == "01/04/2024"));
    assert!(harness.assets.uploads().is_empty());
}

#[tokio::test]
async fn roster_is_published_with_floor_picks() {
    let harness = Harness::new(roster_sheets(), FakeAssets::default());
    harness.require_fonts();
    let mut rng = StdRng::seed_from_u64(42);

    let roster = harness
        .service
        .create_order_list_image_on(monday(), &mut rng)
        .await
        .unwrap();

    assert_eq!(roster.pages.len(), 1);
    assert_eq!(roster.pages[0].url, "https://assets.test/list/1.png");
    assert_eq!(roster.pages[0].label, "Page 1");
    // Lê Chi is blacklisted, leaving a single floor 16 candidate.
    assert_eq!(roster.floor16_pick, "Nguyễn Văn An");
    assert!(["Trần Bình 19", "Phạm Dũng 19"].contains(&roster.floor19_pick.as_str()));

    let uploads = harness.assets.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "list");
    assert!(!uploads[0].1.is_empty());
}

#[tokio::test]
async fn roster_survives_missing_debt_sheet() {
    let sheets =
        FakeSheets::default().with_sheet(CURRENT_SHEET, "T3/2024", march_columns(&["x", "", "", "x"]));
    let harness = Harness::new(sheets, FakeAssets::default());
    let mut rng = StdRng::seed_from_u64(3);

    harness.require_fonts();

    let roster = harness
        .service
        .create_order_list_image_on(monday(), &mut rng)
        .await
        .unwrap();

    assert_eq!(roster.pages.len(), 1);
    assert_eq!(roster.floor16_pick, "Nguyễn Văn An");
    assert_eq!(roster.floor19_pick, "Phạm Dũng 19");
}

#[tokio::test]
async fn debt_failure_does_not_stop_rendering() {
    let sheets =
        FakeSheets::default().with_sheet(CURRENT_SHEET, "T3/2024", march_columns(&["x", "", "", "x"]));
    let harness = Harness::without_fonts(sheets, FakeAssets::default());
    let mut rng = StdRng::seed_from_u64(3);

    let result = harness.service.create_order_list_image_on(monday(), &mut rng).await;

    // The missing February sheet was swallowed; the font lookup is what failed.
    assert!(matches!(result, Err(OrderError::Font(_))));
    assert!(harness.assets.uploads().is_empty());
}

#[tokio::test]
async fn failed_upload_names_the_page() {
    let mut names = vec!["Họ tên".to_string()];
    let mut marks = vec!["04/03/2024".to_string()];
    for i in 1..=24 {
        names.push(format!("Người {i}"));
        marks.push("x".to_string());
    }
    let sheets = FakeSheets::default().with_sheet(CURRENT_SHEET, "T3/2024", vec![names, marks]);
    let harness = Harness::new(sheets, FakeAssets::failing_at(2));
    harness.require_fonts();
    let mut rng = StdRng::seed_from_u64(5);

    let result = harness.service.create_order_list_image_on(monday(), &mut rng).await;

    assert!(matches!(result, Err(OrderError::ImagePublishFailed { page: 2, .. })));
    assert_eq!(harness.assets.uploads().len(), 1);
}

#[tokio::test]
async fn nobody_owes_when_every_row_is_settled() {
    let sheets = FakeSheets::default()
        .with_sheet(
            PREVIOUS_SHEET,
            "T2/2024",
            vec![names(), col(&["v", "v", "v", "v", "v"]), col(&["0", "0", "0", "0", "0"])],
        )
        .with_sheet(CURRENT_SHEET, "T3/2024", march_columns(&[]));
    let harness = Harness::new(sheets, FakeAssets::default());

    let debts = harness.service.unpaid_list_on(monday()).await.unwrap();

    assert_eq!(debts, DebtMap::new());
}
