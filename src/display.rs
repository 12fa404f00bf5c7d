//! 旅程のターミナル表示

use crate::session::PlanningSession;
use trip_planner_common::{day_subtotal, format_amount, format_cost, BudgetStatus, ItineraryItem, TripData};

/// 1件分の表示行
pub fn format_item_line(item: &ItineraryItem, currency: &str) -> String {
    let style = item.kind.style();
    format!(
        "  {} [{}] {} {} @ {}  {}",
        item.time,
        item.id,
        style.icon,
        item.activity,
        if item.location.is_empty() { "-" } else { item.location.as_str() },
        format_cost(currency, item.estimated_cost),
    )
}

/// 旅行条件の見出し
pub fn format_trip_header(trip: &TripData) -> String {
    format!(
        "{} • {}日間 ({} - {}){}",
        trip.route(),
        trip.days,
        trip.start_date.format("%m/%d"),
        trip.end_date.format("%Y/%m/%d"),
        if trip.include_flights { " ✈ 航空券込み" } else { "" },
    )
}

/// セッションの旅程を日ごとに表示
pub fn print_itinerary(session: &PlanningSession) {
    let Some(trip) = session.trip() else {
        println!("旅行条件が未設定です");
        return;
    };

    if session.is_generating() {
        println!("⏳ 旅程を生成中です...");
        return;
    }

    println!("🧳 {}\n", format_trip_header(trip));

    for bucket in session.buckets() {
        println!(
            "📅 Day {} ({}件, {})",
            bucket.day,
            bucket.len(),
            format_cost(&trip.currency, day_subtotal(&bucket))
        );
        if bucket.is_empty() {
            println!("  (予定なし)");
        }
        for item in &bucket.items {
            println!("{}", format_item_line(item, &trip.currency));
        }
        println!();
    }

    if let Some(summary) = session.cost_summary() {
        let marker = match summary.status() {
            BudgetStatus::Within => "✔",
            BudgetStatus::Over => "⚠",
        };
        println!("💰 合計: {} {}", trip.currency, format_amount(summary.total));
        println!("   予算: {} {}", trip.currency, format_amount(summary.budget));
        println!("   {} 残り: {} {}", marker, trip.currency, format_amount(summary.remaining));
    }
}
