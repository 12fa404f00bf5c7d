use crate::error::Result;
use std::path::Path;
use trip_planner_common::export::document_core::{build_document, LineStyle};
use trip_planner_common::{ItineraryItem, TripData};

/// 旅程表をプレーンテキストに整形
pub fn render_text(trip: &TripData, items: &[ItineraryItem]) -> String {
    let mut out = String::new();

    for block in build_document(trip, items) {
        for line in &block.lines {
            let indent = " ".repeat((line.style.indent_mm() / 5.0) as usize);
            out.push_str(&indent);
            out.push_str(&line.text);
            out.push('\n');

            match line.style {
                LineStyle::Title => {
                    out.push_str(&"=".repeat(line.text.chars().count()));
                    out.push('\n');
                }
                LineStyle::DayHeading => {
                    out.push_str(&"-".repeat(line.text.chars().count()));
                    out.push('\n');
                }
                _ => {}
            }
        }
        if block.spacing_after_mm > 0.0 {
            out.push('\n');
        }
    }

    out
}

pub fn generate_text(trip: &TripData, items: &[ItineraryItem], output_path: &Path) -> Result<()> {
    std::fs::write(output_path, render_text(trip, items))?;
    Ok(())
}
