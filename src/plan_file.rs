//! プランファイル
//!
//! 旅行条件と旅程をJSONで保存し、`show` / `add` / `move` / `export`
//! の各コマンドから読み直す。

use crate::error::{PlannerError, Result};
use crate::session::PlanningSession;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use trip_planner_common::{ItineraryItem, TripData};

pub const DEFAULT_PLAN_FILE: &str = "trip-plan.json";

/// プランファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    /// バージョン（互換性チェック用）
    pub version: u32,
    pub trip: TripData,
    #[serde(default)]
    pub itinerary: Vec<ItineraryItem>,
}

impl PlanFile {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(trip: TripData, itinerary: Vec<ItineraryItem>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            trip,
            itinerary,
        }
    }

    /// セッションの現在の状態から作成（旅行条件が未設定ならエラー）
    pub fn from_session(session: &PlanningSession) -> Result<Self> {
        let trip = session.trip().ok_or(PlannerError::NoTrip)?;
        Ok(Self::new(trip.clone(), session.itinerary().to_vec()))
    }

    /// プランファイルを読み込み
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let plan: PlanFile = serde_json::from_reader(reader)?;

        // バージョンチェック
        if plan.version != Self::CURRENT_VERSION {
            return Err(PlannerError::PlanFileVersion {
                found: plan.version,
                expected: Self::CURRENT_VERSION,
            });
        }
        Ok(plan)
    }

    /// プランファイルを保存
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        log::debug!("プランを保存: {}", path.display());
        Ok(())
    }

    pub fn into_session(self) -> Result<PlanningSession> {
        PlanningSession::restore(self.trip, self.itinerary)
    }
}
