//! 対話式の旅行プラン作成
//!
//! - 旅行条件フォーム（目的地・日付・予算・通貨・航空券）
//! - 旅程生成の進捗表示（Ctrl-Cで中止）
//! - 追加/編集/移動/出力の編集メニュー

use crate::config::Config;
use crate::display;
use crate::error::{PlannerError, Result};
use crate::cli::ExportFormat;
use crate::export;
use crate::plan_file::PlanFile;
use crate::session::PlanningSession;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use std::time::Duration;
use trip_planner_common::{format_amount, ActivityType, ItineraryItem, TripData, UpsertOutcome};

lazy_static! {
    static ref TIME_RE: Regex = Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap();
}

/// "9:05" → "09:05"（出力時の文字列ソートのためゼロ埋め）
pub fn parse_time(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let caps = TIME_RE
        .captures(trimmed)
        .ok_or_else(|| PlannerError::InvalidTime(trimmed.to_string()))?;

    let hour: u32 = caps[1].parse().map_err(|_| PlannerError::InvalidTime(trimmed.to_string()))?;
    let minute: u32 = caps[2].parse().map_err(|_| PlannerError::InvalidTime(trimmed.to_string()))?;
    if hour > 23 || minute > 59 {
        return Err(PlannerError::InvalidTime(trimmed.to_string()));
    }
    Ok(format!("{:02}:{:02}", hour, minute))
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| PlannerError::InvalidDate(input.trim().to_string()))
}

/// 日番号（1〜days）
pub fn parse_day(input: &str, days: u32) -> Result<u32> {
    let trimmed = input.trim();
    let day = trimmed
        .parse::<u32>()
        .map_err(|_| PlannerError::InvalidDay(trimmed.to_string()))?;
    if (1..=days).contains(&day) {
        Ok(day)
    } else {
        Err(PlannerError::DayOutOfRange { day, days })
    }
}

/// "Tokyo, Kyoto ,Osaka" → ["Tokyo", "Kyoto", "Osaka"]
pub fn split_destinations(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect()
}

/// 正しい値が入力されるまで繰り返す
fn prompt_until<T>(prompt: &str, default: Option<String>, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = &default {
            input = input.default(default.clone());
        }
        let raw = input.interact_text()?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => println!("  ⚠ {}", e),
        }
    }
}

/// 旅行条件フォーム
pub fn prompt_trip(config: &Config) -> Result<TripData> {
    loop {
        let destinations = prompt_until("目的地（カンマ区切り）", None, |s| {
            let list = split_destinations(s);
            if list.is_empty() {
                Err(PlannerError::InvalidTrip("目的地を1つ以上入力してください".into()))
            } else {
                Ok(list)
            }
        })?;
        let start = prompt_until("開始日 (YYYY-MM-DD)", None, parse_date)?;
        let end = prompt_until("終了日 (YYYY-MM-DD)", Some(start.format("%Y-%m-%d").to_string()), parse_date)?;
        let budget = prompt_until("予算", Some(format_amount(config.default_budget)), |s| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| PlannerError::InvalidTrip(format!("予算が数値ではありません: {}", s)))
        })?;
        let currency: String = Input::new()
            .with_prompt("通貨")
            .default(config.currency())
            .interact_text()?;
        let include_flights = Confirm::new()
            .with_prompt("航空券を含めますか？")
            .default(false)
            .interact()?;

        match TripData::new(destinations, start, end, include_flights, budget, &currency) {
            Ok(trip) => return Ok(trip),
            Err(e) => println!("  ⚠ {}\n  もう一度入力してください\n", e),
        }
    }
}

/// 旅程を生成し、完了まで進捗を表示（Ctrl-Cで中止）
pub async fn generate_with_progress(
    session: &mut PlanningSession,
    trip: TripData,
    delay: Duration,
) -> Result<usize> {
    session.start_generation(trip, delay)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("旅程を生成中... (Ctrl-Cで中止)");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = tokio::select! {
        result = session.finish_generation() => Some(result.map(|items| items.len())),
        _ = tokio::signal::ctrl_c() => None,
    };
    spinner.finish_and_clear();

    match outcome {
        Some(result) => result,
        None => {
            session.cancel_generation();
            Err(PlannerError::GenerationCancelled)
        }
    }
}

/// 編集メニューの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Show,
    Add,
    Edit,
    Move,
    Export,
    Save,
    NewTrip,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 8] = [
        MenuAction::Show,
        MenuAction::Add,
        MenuAction::Edit,
        MenuAction::Move,
        MenuAction::Export,
        MenuAction::Save,
        MenuAction::NewTrip,
        MenuAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Show => "旅程を表示",
            MenuAction::Add => "旅程を追加",
            MenuAction::Edit => "旅程を編集",
            MenuAction::Move => "旅程を別の日へ移動",
            MenuAction::Export => "PDF/テキスト出力",
            MenuAction::Save => "保存",
            MenuAction::NewTrip => "新しい旅行を計画（やり直し）",
            MenuAction::Quit => "保存して終了",
        }
    }
}

/// 生成後の編集メニュー
pub async fn run_edit_menu(session: &mut PlanningSession, config: &Config, plan_path: &Path) -> Result<()> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuAction::ALL[choice] {
            MenuAction::Show => display::print_itinerary(session),
            MenuAction::Add => {
                let item = prompt_item(session, None)?;
                report_upsert(session.upsert_item(item)?);
            }
            MenuAction::Edit => {
                if let Some(existing) = select_item(session, "編集する旅程")? {
                    let item = prompt_item(session, Some(&existing))?;
                    report_upsert(session.upsert_item(item)?);
                }
            }
            MenuAction::Move => {
                if let Some(existing) = select_item(session, "移動する旅程")? {
                    let days = session.trip().map(|t| t.days).unwrap_or(1);
                    let day = prompt_until(
                        &format!("移動先の日 (1〜{})", days),
                        Some(existing.day.to_string()),
                        |s| parse_day(s, days),
                    )?;
                    match session.move_to_day(&existing.id, day) {
                        Ok(true) => println!("✔ {} を {}日目へ移動しました", existing.activity, day),
                        Ok(false) => println!("変更はありません"),
                        Err(e) => println!("  ⚠ {}", e),
                    }
                }
            }
            MenuAction::Export => {
                let trip = session.trip().ok_or(PlannerError::NoTrip)?;
                let output = config.output_dir.clone().unwrap_or_else(|| std::path::PathBuf::from("."));
                export::export_plan(trip, session.itinerary(), &ExportFormat::Both, &output)?;
            }
            MenuAction::Save => save_session(session, plan_path)?,
            MenuAction::NewTrip => {
                session.reset();
                println!("\n🧭 新しい旅行条件を入力してください\n");
                let trip = prompt_trip(config)?;
                match generate_with_progress(session, trip, config.generation_delay()).await {
                    Ok(count) => println!("✔ {}件の旅程を生成しました", count),
                    Err(PlannerError::GenerationCancelled) => println!("旅程の生成を中止しました"),
                    Err(e) => return Err(e),
                }
            }
            MenuAction::Quit => {
                if session.trip().is_some() {
                    save_session(session, plan_path)?;
                }
                return Ok(());
            }
        }
    }
}

fn save_session(session: &PlanningSession, plan_path: &Path) -> Result<()> {
    PlanFile::from_session(session)?.save(plan_path)?;
    println!("✔ 保存しました: {}", plan_path.display());
    Ok(())
}

fn report_upsert(outcome: UpsertOutcome) {
    match outcome {
        UpsertOutcome::Added => println!("✔ 旅程を追加しました"),
        UpsertOutcome::Updated => println!("✔ 旅程を更新しました"),
    }
}

fn select_item(session: &PlanningSession, prompt: &str) -> Result<Option<ItineraryItem>> {
    let items = session.itinerary();
    if items.is_empty() {
        println!("旅程がありません");
        return Ok(None);
    }

    let currency = session.trip().map(|t| t.currency.as_str()).unwrap_or("");
    let labels: Vec<String> = items
        .iter()
        .map(|item| format!("Day {}{}", item.day, display::format_item_line(item, currency)))
        .collect();

    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(index.map(|i| items[i].clone()))
}

/// 旅程1件の入力（existing があれば既定値に使い、idを引き継ぐ）
fn prompt_item(session: &PlanningSession, existing: Option<&ItineraryItem>) -> Result<ItineraryItem> {
    let days = session.trip().ok_or(PlannerError::NoTrip)?.days;
    let id = existing
        .map(|item| item.id.clone())
        .unwrap_or_else(|| session.next_item_id());

    let day = prompt_until(
        &format!("日 (1〜{})", days),
        Some(existing.map_or(1, |item| item.day).to_string()),
        |s| parse_day(s, days),
    )?;
    let time = prompt_until(
        "時刻 (HH:MM)",
        Some(existing.map_or_else(|| "09:00".to_string(), |item| item.time.clone())),
        parse_time,
    )?;

    let mut activity_input = Input::<String>::new().with_prompt("内容");
    if let Some(item) = existing {
        activity_input = activity_input.default(item.activity.clone());
    }
    let activity = activity_input.interact_text()?;

    let location: String = Input::new()
        .with_prompt("場所")
        .default(existing.map(|item| item.location.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let estimated_cost = prompt_until(
        "概算費用（0は無料）",
        Some(format_amount(existing.map_or(0.0, |item| item.estimated_cost))),
        |s| match s.trim().parse::<f64>() {
            Ok(cost) if cost.is_finite() && cost >= 0.0 => Ok(cost),
            _ => Err(PlannerError::InvalidTrip(format!("費用が不正です: {}", s))),
        },
    )?;

    let kinds: Vec<String> = ActivityType::KNOWN.iter().map(|k| k.to_string()).collect();
    let default_kind = existing
        .and_then(|item| ActivityType::KNOWN.iter().position(|k| *k == item.kind))
        .unwrap_or(2);
    let kind_index = Select::new()
        .with_prompt("種別")
        .items(&kinds)
        .default(default_kind)
        .interact()?;

    Ok(ItineraryItem {
        id,
        day,
        time,
        activity,
        location,
        estimated_cost,
        kind: ActivityType::KNOWN[kind_index].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_pads_hour() {
        assert_eq!(parse_time("9:05").unwrap(), "09:05");
        assert_eq!(parse_time(" 18:30 ").unwrap(), "18:30");
    }

    #[test]
    fn test_parse_time_rejects_invalid() {
        for bad in ["24:00", "12:60", "noon", "1230", "12:3"] {
            assert!(matches!(parse_time(bad), Err(PlannerError::InvalidTime(_))), "{}", bad);
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-04-01").unwrap(), NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        assert!(matches!(parse_date("04/01/2026"), Err(PlannerError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day(" 2 ", 3).unwrap(), 2);
        assert!(matches!(parse_day("0", 3), Err(PlannerError::DayOutOfRange { day: 0, days: 3 })));
        assert!(matches!(parse_day("4", 3), Err(PlannerError::DayOutOfRange { day: 4, days: 3 })));

        let err = parse_day("abc", 3).unwrap_err();
        assert!(matches!(&err, PlannerError::InvalidDay(s) if s == "abc"));
        assert!(!err.to_string().contains("0日目"));
    }

    #[test]
    fn test_split_destinations() {
        assert_eq!(split_destinations("Tokyo, Kyoto ,,Osaka "), vec!["Tokyo", "Kyoto", "Osaka"]);
        assert!(split_destinations(" , ").is_empty());
    }

    #[test]
    fn test_menu_labels_unique() {
        let labels: std::collections::HashSet<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), MenuAction::ALL.len());
    }
}
