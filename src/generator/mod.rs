//! 旅程生成
//!
//! 旅行条件を受け取り、非同期に旅程を返す。現状はサンプル旅程のみ。

mod sample;

pub use sample::sample_itinerary;

use clap::ValueEnum;
use std::time::Duration;
use trip_planner_common::{ItineraryItem, TripData};

/// 旅程生成エンジン
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum GeneratorKind {
    /// 固定のサンプル旅程
    #[default]
    Sample,
}

impl GeneratorKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Sample => "sample",
        }
    }

    pub async fn generate(&self, trip: &TripData, delay: Duration) -> Vec<ItineraryItem> {
        match self {
            GeneratorKind::Sample => generate_itinerary(trip, delay).await,
        }
    }
}

/// 待ち時間の後にサンプル旅程を返す
///
/// 旅行日数を超える日の項目は除外する。
pub async fn generate_itinerary(trip: &TripData, delay: Duration) -> Vec<ItineraryItem> {
    log::debug!("旅程生成開始: {} ({}日)", trip.route(), trip.days);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let items: Vec<ItineraryItem> = sample_itinerary()
        .into_iter()
        .filter(|item| trip.contains_day(item.day))
        .collect();

    log::debug!("旅程生成完了: {}件", items.len());
    items
}
