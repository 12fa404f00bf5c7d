//! 旅程の型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - TripData: フォームで入力された旅行条件
//! - ItineraryItem: 旅程の1件（日・時刻・場所・費用・種別）
//! - ActivityType: 種別（未知の値は Other として保持）

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 旅行条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripData {
    pub destinations: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    #[serde(default)]
    pub include_flights: bool,
    pub budget: f64,
    pub currency: String,
}

impl TripData {
    /// 日付から日数を計算して旅行条件を作成（検証込み）
    pub fn new(
        destinations: Vec<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        include_flights: bool,
        budget: f64,
        currency: &str,
    ) -> Result<Self> {
        if end_date < start_date {
            return Err(Error::InvalidTrip(format!(
                "終了日 {} が開始日 {} より前です",
                end_date, start_date
            )));
        }
        let days = (end_date - start_date).num_days() + 1;
        let days = u32::try_from(days)
            .map_err(|_| Error::InvalidTrip(format!("日数が大きすぎます: {}", days)))?;

        let trip = Self {
            destinations: destinations
                .into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
            start_date,
            end_date,
            days,
            include_flights,
            budget,
            currency: currency.trim().to_uppercase(),
        };
        trip.validate()?;
        Ok(trip)
    }

    /// 旅行条件の整合性を検証
    pub fn validate(&self) -> Result<()> {
        if self.destinations.is_empty() {
            return Err(Error::InvalidTrip("目的地が空です".into()));
        }
        if self.start_date > self.end_date {
            return Err(Error::InvalidTrip(format!(
                "終了日 {} が開始日 {} より前です",
                self.end_date, self.start_date
            )));
        }
        if self.days == 0 {
            return Err(Error::InvalidTrip("日数は1以上が必要です".into()));
        }
        let span = (self.end_date - self.start_date).num_days() + 1;
        if i64::from(self.days) != span {
            return Err(Error::InvalidTrip(format!(
                "日数 {} が日付の範囲（{}日）と一致しません",
                self.days, span
            )));
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(Error::InvalidTrip(format!("予算が不正です: {}", self.budget)));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::InvalidTrip("通貨コードが空です".into()));
        }
        Ok(())
    }

    /// 表示用ルート（"Tokyo → Kyoto"）
    pub fn route(&self) -> String {
        self.destinations.join(" → ")
    }

    /// 日付の範囲内に収まる日番号か
    pub fn contains_day(&self, day: u32) -> bool {
        (1..=self.days).contains(&day)
    }
}

/// 旅程の1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    pub id: String,

    pub day: u32,

    /// "HH:MM"（表示と出力時のソートのみに使用）
    #[serde(default)]
    pub time: String,

    #[serde(default)]
    pub activity: String,

    #[serde(default)]
    pub location: String,

    /// 0 は無料
    #[serde(default)]
    pub estimated_cost: f64,

    #[serde(rename = "type", default)]
    pub kind: ActivityType,
}

/// 旅程の種別
///
/// 既知の5種類以外の文字列は `Other` にそのまま保持し、
/// 表示は既定スタイルに落とす。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    Flight,
    Accommodation,
    #[default]
    Activity,
    Meal,
    Transport,
    Other(String),
}

/// 種別ごとの表示属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStyle {
    pub icon: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

const FLIGHT_STYLE: TypeStyle = TypeStyle { icon: "✈", label: "Flight", color: "blue" };
const ACCOMMODATION_STYLE: TypeStyle = TypeStyle { icon: "🛏", label: "Accommodation", color: "purple" };
const MEAL_STYLE: TypeStyle = TypeStyle { icon: "🍴", label: "Meal", color: "orange" };
const TRANSPORT_STYLE: TypeStyle = TypeStyle { icon: "🚗", label: "Transport", color: "green" };
const DEFAULT_STYLE: TypeStyle = TypeStyle { icon: "📍", label: "Activity", color: "gray" };

impl ActivityType {
    /// 既知の種別一覧（入力候補用）
    pub const KNOWN: [ActivityType; 5] = [
        ActivityType::Flight,
        ActivityType::Accommodation,
        ActivityType::Activity,
        ActivityType::Meal,
        ActivityType::Transport,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Flight => "flight",
            ActivityType::Accommodation => "accommodation",
            ActivityType::Activity => "activity",
            ActivityType::Meal => "meal",
            ActivityType::Transport => "transport",
            ActivityType::Other(raw) => raw,
        }
    }

    /// 表示属性（Activity と未知の種別は既定スタイル）
    pub fn style(&self) -> TypeStyle {
        match self {
            ActivityType::Flight => FLIGHT_STYLE,
            ActivityType::Accommodation => ACCOMMODATION_STYLE,
            ActivityType::Meal => MEAL_STYLE,
            ActivityType::Transport => TRANSPORT_STYLE,
            ActivityType::Activity | ActivityType::Other(_) => DEFAULT_STYLE,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ActivityType::Other(_))
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "flight" => ActivityType::Flight,
            "accommodation" => ActivityType::Accommodation,
            "activity" => ActivityType::Activity,
            "meal" => ActivityType::Meal,
            "transport" => ActivityType::Transport,
            _ => ActivityType::Other(value),
        }
    }
}

impl From<&str> for ActivityType {
    fn from(value: &str) -> Self {
        ActivityType::from(value.to_string())
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_trip_days_inclusive_span() {
        let trip = TripData::new(
            vec!["Tokyo".into(), " Kyoto ".into()],
            date("2026-04-01"),
            date("2026-04-03"),
            true,
            300.0,
            "usd",
        )
        .unwrap();
        assert_eq!(trip.days, 3);
        assert_eq!(trip.currency, "USD");
        assert_eq!(trip.route(), "Tokyo → Kyoto");
        assert!(trip.contains_day(3));
        assert!(!trip.contains_day(0));
        assert!(!trip.contains_day(4));
    }

    #[test]
    fn test_trip_rejects_reversed_dates() {
        let result = TripData::new(
            vec!["Tokyo".into()],
            date("2026-04-03"),
            date("2026-04-01"),
            false,
            100.0,
            "JPY",
        );
        assert!(matches!(result, Err(Error::InvalidTrip(_))));
    }

    #[test]
    fn test_trip_rejects_blank_destinations_and_negative_budget() {
        let blank = TripData::new(vec!["  ".into()], date("2026-04-01"), date("2026-04-01"), false, 0.0, "JPY");
        assert!(blank.is_err());

        let negative = TripData::new(vec!["Osaka".into()], date("2026-04-01"), date("2026-04-01"), false, -1.0, "JPY");
        assert!(negative.is_err());
    }

    #[test]
    fn test_trip_rejects_days_not_matching_span() {
        let mut trip = TripData::new(vec!["Tokyo".into()], date("2026-04-01"), date("2026-04-01"), false, 0.0, "JPY").unwrap();
        trip.days = 500_000;
        assert!(matches!(trip.validate(), Err(Error::InvalidTrip(_))));

        trip.days = 1;
        trip.end_date = date("2026-04-02");
        assert!(matches!(trip.validate(), Err(Error::InvalidTrip(_))));

        trip.days = 2;
        assert!(trip.validate().is_ok());
    }

    #[test]
    fn test_unknown_type_degrades_to_other() {
        let json = r#"{"id":"9","day":1,"time":"10:00","activity":"Onsen","location":"Hakone","estimatedCost":0,"type":"spa"}"#;
        let item: ItineraryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ActivityType::Other("spa".into()));
        assert_eq!(item.kind.style(), DEFAULT_STYLE);

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["type"], "spa");
    }

    #[test]
    fn test_known_types_parse_case_insensitive() {
        assert_eq!(ActivityType::from("Meal"), ActivityType::Meal);
        assert_eq!(ActivityType::from("FLIGHT").style().icon, "✈");
        for kind in ActivityType::KNOWN {
            assert!(kind.is_known());
            assert_eq!(ActivityType::from(kind.as_str()), kind);
        }
    }
}
