//! Export document core shared by the PDF and text writers.
//!
//! 旅程から出力用ブロックを組み立て、A4ページに配置する（mm単位、上端基準）。

use crate::cost::{format_amount, format_cost, total_cost};
use crate::itinerary::{bucket_by_day, sorted_by_time};
use crate::types::{ItineraryItem, TripData};

pub const DOCUMENT_TITLE: &str = "Travel Itinerary";
pub const EMPTY_DAY_PLACEHOLDER: &str = "No activities planned";

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;

/// mm → pt変換
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// Helveticaの平均文字幅（フォントサイズ比）
const AVG_CHAR_WIDTH_RATIO: f32 = 0.5;

/// 行の種類ごとの書式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Summary,
    DayHeading,
    Entry,
    EntryCost,
    Placeholder,
    Total,
}

impl LineStyle {
    pub fn font_size_pt(&self) -> f32 {
        match self {
            LineStyle::Title => 20.0,
            LineStyle::DayHeading => 16.0,
            LineStyle::Summary | LineStyle::Total => 12.0,
            LineStyle::Entry | LineStyle::EntryCost | LineStyle::Placeholder => 10.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, LineStyle::Title | LineStyle::DayHeading | LineStyle::Total)
    }

    /// 次の行までの送り（mm）
    pub fn advance_mm(&self) -> f32 {
        match self {
            LineStyle::Title => 20.0,
            LineStyle::DayHeading => 15.0,
            LineStyle::Summary | LineStyle::Placeholder | LineStyle::Total => 10.0,
            LineStyle::Entry => 8.0,
            LineStyle::EntryCost => 12.0,
        }
    }

    pub fn indent_mm(&self) -> f32 {
        match self {
            LineStyle::Entry | LineStyle::Placeholder => 10.0,
            LineStyle::EntryCost => 20.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLine {
    pub style: LineStyle,
    pub text: String,
}

impl DocumentLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Header,
    Summary,
    Day(u32),
    Total,
}

/// 改ページ判定の単位
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBlock {
    pub kind: BlockKind,
    pub lines: Vec<DocumentLine>,
    /// ブロック後の余白（mm）
    pub spacing_after_mm: f32,
    /// ブロック先頭で同じページに収めたい行数
    pub keep_together: usize,
}

impl DocumentBlock {
    /// 改ページせずに始めるのに必要な高さ
    pub fn min_height_mm(&self) -> f32 {
        self.lines
            .iter()
            .take(self.keep_together.max(1))
            .map(|line| line.style.advance_mm())
            .sum()
    }
}

/// 出力ドキュメントのブロックを組み立てる
pub fn build_document(trip: &TripData, items: &[ItineraryItem]) -> Vec<DocumentBlock> {
    let mut blocks = Vec::with_capacity(trip.days as usize + 3);

    blocks.push(DocumentBlock {
        kind: BlockKind::Header,
        lines: vec![DocumentLine::new(LineStyle::Title, DOCUMENT_TITLE)],
        spacing_after_mm: 0.0,
        keep_together: 1,
    });

    // 組み込みフォントは "→" を描画できないため "->" を使う
    blocks.push(DocumentBlock {
        kind: BlockKind::Summary,
        lines: vec![
            DocumentLine::new(
                LineStyle::Summary,
                format!("Destinations: {}", trip.destinations.join(" -> ")),
            ),
            DocumentLine::new(LineStyle::Summary, format!("Duration: {} days", trip.days)),
            DocumentLine::new(
                LineStyle::Summary,
                format!(
                    "Dates: {} - {}",
                    trip.start_date.format("%Y-%m-%d"),
                    trip.end_date.format("%Y-%m-%d")
                ),
            ),
            DocumentLine::new(
                LineStyle::Summary,
                format!("Budget: {} {}", trip.currency, format_amount(trip.budget)),
            ),
        ],
        spacing_after_mm: 10.0,
        keep_together: 4,
    });

    for bucket in bucket_by_day(items, trip.days) {
        let mut lines = vec![DocumentLine::new(LineStyle::DayHeading, format!("Day {}", bucket.day))];

        if bucket.is_empty() {
            lines.push(DocumentLine::new(LineStyle::Placeholder, EMPTY_DAY_PLACEHOLDER));
        } else {
            for item in sorted_by_time(&bucket.items) {
                lines.push(DocumentLine::new(
                    LineStyle::Entry,
                    format!("{} - {} ({})", item.time, item.activity, item.location),
                ));
                lines.push(DocumentLine::new(
                    LineStyle::EntryCost,
                    format_cost(&trip.currency, item.estimated_cost),
                ));
            }
        }

        let keep_together = lines.len().min(3);
        blocks.push(DocumentBlock {
            kind: BlockKind::Day(bucket.day),
            lines,
            spacing_after_mm: 10.0,
            keep_together,
        });
    }

    blocks.push(DocumentBlock {
        kind: BlockKind::Total,
        lines: vec![DocumentLine::new(
            LineStyle::Total,
            format!(
                "Total Estimated Cost: {} {}",
                trip.currency,
                format_amount(total_cost(items))
            ),
        )],
        spacing_after_mm: 0.0,
        keep_together: 1,
    });

    blocks
}

/// ページ設定（mm）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
}

impl DocumentLayout {
    pub fn a4() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: MARGIN_MM,
        }
    }

    /// 本文を置ける下端（上端基準）
    pub fn bottom_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self::a4()
    }
}

/// ページ上に配置済みの行
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub style: LineStyle,
    pub text: String,
    pub x_mm: f32,
    /// 上端からの位置
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPage {
    pub lines: Vec<PositionedLine>,
}

/// 文字幅の概算（mm）
pub fn approx_text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.chars().count() as f32 * font_size_pt * AVG_CHAR_WIDTH_RATIO / MM_TO_PT
}

/// ブロックをページに割り付ける
///
/// ブロック先頭の keep_together 行が残りに収まらなければ改ページする。
/// 1ページに収まらないブロックは行単位で次ページへ続ける。
pub fn paginate(blocks: &[DocumentBlock], layout: &DocumentLayout) -> Vec<DocumentPage> {
    let mut pages = vec![DocumentPage::default()];
    let mut y = layout.margin_mm;

    for block in blocks {
        let page_has_content = pages.last().map_or(false, |p| !p.lines.is_empty());
        if page_has_content && y + block.min_height_mm() > layout.bottom_mm() {
            pages.push(DocumentPage::default());
            y = layout.margin_mm;
        }

        for line in &block.lines {
            let advance = line.style.advance_mm();
            let page_has_content = pages.last().map_or(false, |p| !p.lines.is_empty());
            if page_has_content && y + advance > layout.bottom_mm() {
                pages.push(DocumentPage::default());
                y = layout.margin_mm;
            }

            let x_mm = if line.style == LineStyle::Title {
                let width = approx_text_width_mm(&line.text, line.style.font_size_pt());
                ((layout.page_width_mm - width) / 2.0).max(layout.margin_mm)
            } else {
                layout.margin_mm + line.style.indent_mm()
            };

            if let Some(page) = pages.last_mut() {
                page.lines.push(PositionedLine {
                    style: line.style,
                    text: line.text.clone(),
                    x_mm,
                    y_mm: y,
                });
            }
            y += advance;
        }

        y += block.spacing_after_mm;
    }

    pages
}
