pub mod pdf;
pub mod text;

use crate::cli::ExportFormat;
use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use trip_planner_common::export::document_core::DOCUMENT_TITLE;
use trip_planner_common::{ItineraryItem, TripData};

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// 出力ファイル名の stem（"itinerary-new-york-boston"）
pub fn file_stem(trip: &TripData) -> String {
    let joined = trip.destinations.join("-");
    format!("itinerary-{}", WHITESPACE_RE.replace_all(&joined, "-")).to_lowercase()
}

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.with_extension(extension)
    }
}

/// 旅程表を出力し、書き出したファイルのパスを返す
pub fn export_plan(
    trip: &TripData,
    items: &[ItineraryItem],
    format: &ExportFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let stem = file_stem(trip);
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    } else if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut written = Vec::new();

    if matches!(format, ExportFormat::Pdf | ExportFormat::Both) {
        let output_path = output_path_for_format(output, &stem, "pdf");
        println!("- PDFを生成中...");
        let pages = pdf::generate_pdf(trip, items, &output_path, DOCUMENT_TITLE)?;
        println!("✔ PDF出力: {} ({}ページ)", output_path.display(), pages);
        written.push(output_path);
    }

    if matches!(format, ExportFormat::Text | ExportFormat::Both) {
        let output_path = output_path_for_format(output, &stem, "txt");
        println!("- テキストを生成中...");
        text::generate_text(trip, items, &output_path)?;
        println!("✔ テキスト出力: {}", output_path.display());
        written.push(output_path);
    }

    Ok(written)
}
