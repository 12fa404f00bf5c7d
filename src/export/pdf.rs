use crate::error::{PlannerError, Result};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use trip_planner_common::export::document_core::{build_document, paginate, DocumentLayout};
use trip_planner_common::{ItineraryItem, TripData};

const LAYER_NAME: &str = "Layer 1";

/// 旅程表PDFを生成
pub fn generate_pdf(
    trip: &TripData,
    items: &[ItineraryItem],
    output_path: &Path,
    title: &str,
) -> Result<usize> {
    let layout = DocumentLayout::a4();
    let pages = paginate(&build_document(trip, items), &layout);

    let page_width = Mm(layout.page_width_mm);
    let page_height = Mm(layout.page_height_mm);
    let (doc, first_page, first_layer) = PdfDocument::new(title, page_width, page_height, LAYER_NAME);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PlannerError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PlannerError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(page_width, page_height, LAYER_NAME);
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for line in &page.lines {
            let font = if line.style.is_bold() { &bold } else { &regular };
            // PDF座標は下端基準
            layer.use_text(
                line.text.clone(),
                line.style.font_size_pt(),
                Mm(line.x_mm),
                Mm(layout.page_height_mm - line.y_mm),
                font,
            );
        }
    }

    // 保存
    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| PlannerError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))?;

    log::debug!("PDF出力: {}ページ {}", pages.len(), output_path.display());
    Ok(pages.len())
}
