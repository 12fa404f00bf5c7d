//! サンプル旅程
//!
//! 実際の旅程生成エンジンの代わりに固定の6件を返す。

use trip_planner_common::{ActivityType, ItineraryItem};

fn sample_item(
    id: &str,
    day: u32,
    time: &str,
    activity: &str,
    location: &str,
    estimated_cost: f64,
    kind: ActivityType,
) -> ItineraryItem {
    ItineraryItem {
        id: id.into(),
        day,
        time: time.into(),
        activity: activity.into(),
        location: location.into(),
        estimated_cost,
        kind,
    }
}

pub fn sample_itinerary() -> Vec<ItineraryItem> {
    vec![
        sample_item("1", 1, "09:00", "Arrive at Tokyo Haneda Airport", "Tokyo", 0.0, ActivityType::Flight),
        sample_item("2", 1, "12:00", "Check-in at Hotel", "Shibuya, Tokyo", 150.0, ActivityType::Accommodation),
        sample_item("3", 1, "14:00", "Visit Senso-ji Temple", "Asakusa, Tokyo", 0.0, ActivityType::Activity),
        sample_item("4", 1, "18:00", "Dinner at Traditional Ramen Shop", "Shibuya, Tokyo", 25.0, ActivityType::Meal),
        sample_item("5", 2, "08:00", "Breakfast at Hotel", "Shibuya, Tokyo", 20.0, ActivityType::Meal),
        sample_item("6", 2, "10:00", "Visit Tokyo Skytree", "Sumida, Tokyo", 30.0, ActivityType::Activity),
    ]
}
