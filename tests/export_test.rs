//! PDF/テキスト出力の統合テスト

use chrono::NaiveDate;
use trip_planner::cli::ExportFormat;
use trip_planner::export::{self, pdf, text};
use trip_planner::generator::sample_itinerary;
use trip_planner_common::export::document_core::DOCUMENT_TITLE;
use trip_planner_common::{ActivityType, ItineraryItem, TripData};
use tempfile::tempdir;

fn create_test_trip(days: u32) -> TripData {
    let start = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    TripData::new(
        vec!["Tokyo".to_string(), "Kyoto".to_string()],
        start,
        start + chrono::Days::new(days as u64 - 1),
        true,
        300.0,
        "USD",
    )
    .expect("旅行条件の作成に失敗")
}

fn create_test_item(index: u32, day: u32) -> ItineraryItem {
    ItineraryItem {
        id: index.to_string(),
        day,
        time: format!("{:02}:00", 8 + index % 12),
        activity: format!("Activity {}", index),
        location: "Shibuya, Tokyo".to_string(),
        estimated_cost: (index * 10) as f64,
        kind: ActivityType::Activity,
    }
}

#[test]
fn test_pdf_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("test_output.pdf");

    let result = pdf::generate_pdf(&create_test_trip(2), &sample_itinerary(), &output_path, DOCUMENT_TITLE);

    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());
    assert_eq!(result.unwrap(), 1);
    assert!(output_path.exists(), "PDFファイルが作成されていない");

    let bytes = std::fs::read(&output_path).expect("PDF読み込み失敗");
    assert!(bytes.starts_with(b"%PDF"), "PDFヘッダがない");
}

#[test]
fn test_pdf_generation_empty_itinerary() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("empty.pdf");

    // 旅程が空でも日ごとの見出しと合計は出力される
    let result = pdf::generate_pdf(&create_test_trip(2), &[], &output_path, DOCUMENT_TITLE);
    assert!(result.is_ok(), "空のPDF生成に失敗: {:?}", result.err());
}

#[test]
fn test_pdf_generation_multiple_pages() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("long.pdf");

    let items: Vec<ItineraryItem> = (1..=50).map(|i| create_test_item(i, (i % 5) + 1)).collect();
    let pages = pdf::generate_pdf(&create_test_trip(5), &items, &output_path, DOCUMENT_TITLE)
        .expect("PDF生成に失敗");

    assert!(pages > 1, "改ページされていない: {}ページ", pages);
}

#[test]
fn test_text_export_placeholder_for_empty_day() {
    let items = vec![create_test_item(1, 1), create_test_item(2, 2)];
    let rendered = text::render_text(&create_test_trip(3), &items);

    assert!(rendered.contains("Day 3"));
    assert!(rendered.contains("No activities planned"));
    assert!(rendered.contains("Total Estimated Cost: USD 30"));
}

#[test]
fn test_export_plan_both_formats() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_dir = dir.path().join("out");

    let written = export::export_plan(
        &create_test_trip(2),
        &sample_itinerary(),
        &ExportFormat::Both,
        &output_dir,
    )
    .expect("出力に失敗");

    assert_eq!(written.len(), 2);
    assert_eq!(written[0], output_dir.join("itinerary-tokyo-kyoto.pdf"));
    assert_eq!(written[1], output_dir.join("itinerary-tokyo-kyoto.txt"));
    for path in &written {
        assert!(path.exists(), "出力ファイルがない: {}", path.display());
    }

    // PDFの文書情報とテキストの見出しは同じタイトル
    let pdf_bytes = std::fs::read(&written[0]).unwrap();
    assert!(
        pdf_bytes.windows(DOCUMENT_TITLE.len()).any(|w| w == DOCUMENT_TITLE.as_bytes()),
        "PDFにタイトルがない"
    );
    let content = std::fs::read_to_string(&written[1]).unwrap();
    assert!(content.starts_with(DOCUMENT_TITLE));
}

#[test]
fn test_export_plan_to_explicit_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("plans").join("my-trip.txt");

    let written = export::export_plan(&create_test_trip(1), &[], &ExportFormat::Text, &output_path)
        .expect("出力に失敗");

    assert_eq!(written, vec![output_path.clone()]);
    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("Duration: 1 days"));
}
