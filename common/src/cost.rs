//! 費用集計

use crate::itinerary::DayBucket;
use crate::types::{ItineraryItem, TripData};

/// 全項目の概算費用の合計（日に関係なく）
pub fn total_cost(items: &[ItineraryItem]) -> f64 {
    items.iter().map(|item| item.estimated_cost).sum()
}

/// 1日分の小計
pub fn day_subtotal(bucket: &DayBucket<'_>) -> f64 {
    bucket.items.iter().map(|item| item.estimated_cost).sum()
}

/// 予算に対する状態（表示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Within,
    Over,
}

/// 合計・予算・残額
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    pub total: f64,
    pub budget: f64,
    /// 負になりうる
    pub remaining: f64,
}

impl CostSummary {
    pub fn compute(trip: &TripData, items: &[ItineraryItem]) -> Self {
        let total = total_cost(items);
        Self {
            total,
            budget: trip.budget,
            remaining: trip.budget - total,
        }
    }

    pub fn status(&self) -> BudgetStatus {
        if self.remaining >= 0.0 {
            BudgetStatus::Within
        } else {
            BudgetStatus::Over
        }
    }
}

/// 金額表示: 整数ならそのまま、端数は小数2桁まで
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        let formatted = format!("{:.2}", amount);
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// 費用表示（0 は "Free"）
pub fn format_cost(currency: &str, cost: f64) -> String {
    if cost > 0.0 {
        format!("{} {}", currency, format_amount(cost))
    } else {
        "Free".to_string()
    }
}
