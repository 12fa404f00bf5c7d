//! 旅程リスト操作
//!
//! すべての操作は入力スライスを変更せず、新しいリストを返す。
//! 呼び出し側（セッション）がリストを丸ごと差し替える。

use crate::types::ItineraryItem;
use std::fmt;
use std::str::FromStr;

/// 1日分のバケット
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<'a> {
    pub day: u32,
    pub items: Vec<&'a ItineraryItem>,
}

impl DayBucket<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// 旅程を日ごとに振り分ける
///
/// 1..=days のバケットを必ず days 個返す。範囲外の日を持つ項目は無視する。
pub fn bucket_by_day(items: &[ItineraryItem], days: u32) -> Vec<DayBucket<'_>> {
    let mut buckets: Vec<DayBucket<'_>> = (1..=days)
        .map(|day| DayBucket { day, items: Vec::new() })
        .collect();

    for item in items {
        if item.day >= 1 && item.day <= days {
            buckets[(item.day - 1) as usize].items.push(item);
        }
    }

    buckets
}

/// 日番号が範囲外の項目
pub fn out_of_range_items(items: &[ItineraryItem], days: u32) -> Vec<&ItineraryItem> {
    items
        .iter()
        .filter(|item| item.day == 0 || item.day > days)
        .collect()
}

/// upsertの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Updated,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Added => write!(f, "added"),
            UpsertOutcome::Updated => write!(f, "updated"),
        }
    }
}

/// idが一致する項目を同じ位置で置換、なければ末尾に追加
pub fn upsert_item(items: &[ItineraryItem], item: ItineraryItem) -> (Vec<ItineraryItem>, UpsertOutcome) {
    match items.iter().position(|existing| existing.id == item.id) {
        Some(index) => {
            let mut next = items.to_vec();
            next[index] = item;
            (next, UpsertOutcome::Updated)
        }
        None => {
            let mut next = Vec::with_capacity(items.len() + 1);
            next.extend_from_slice(items);
            next.push(item);
            (next, UpsertOutcome::Added)
        }
    }
}

/// 日バケットの識別子（"day-3" 形式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayBucketId(pub u32);

impl DayBucketId {
    pub fn day(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DayBucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day-{}", self.0)
    }
}

impl FromStr for DayBucketId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_prefix("day-").unwrap_or(trimmed);
        number
            .parse::<u32>()
            .map(DayBucketId)
            .map_err(|_| format!("Unknown day bucket: {}. Use day-N or N", s))
    }
}

/// ドラッグ完了イベント
#[derive(Debug, Clone, PartialEq)]
pub struct DragEvent {
    pub item_id: String,
    pub source: DayBucketId,
    pub source_index: usize,
    /// None はドラッグのキャンセル
    pub destination: Option<DayBucketId>,
    pub destination_index: usize,
}

impl DragEvent {
    /// 日の付け替えだけを表すイベント（位置は末尾扱い）
    pub fn reassign(item_id: impl Into<String>, from_day: u32, to_day: u32) -> Self {
        Self {
            item_id: item_id.into(),
            source: DayBucketId(from_day),
            source_index: 0,
            destination: Some(DayBucketId(to_day)),
            destination_index: usize::MAX,
        }
    }

    /// 何も変わらないドロップか
    pub fn is_noop(&self) -> bool {
        match self.destination {
            None => true,
            Some(dest) => dest == self.source && self.destination_index == self.source_index,
        }
    }
}

/// ドラッグイベントに従って項目の日を付け替える
///
/// 変更がない場合（キャンセル・同位置・未知のid）は None。
/// 日内の並び順は保持しない。
pub fn move_item(items: &[ItineraryItem], event: &DragEvent) -> Option<Vec<ItineraryItem>> {
    if event.is_noop() {
        return None;
    }
    let destination = event.destination?;
    let index = items.iter().position(|item| item.id == event.item_id)?;

    let mut next = items.to_vec();
    next[index] = ItineraryItem {
        day: destination.day(),
        ..items[index].clone()
    };
    Some(next)
}

/// 出力用に時刻順（文字列比較、安定ソート）で並べる
pub fn sorted_by_time<'a>(items: &[&'a ItineraryItem]) -> Vec<&'a ItineraryItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.time.cmp(&b.time));
    sorted
}
