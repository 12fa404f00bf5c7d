//! 旅行プランのセッション
//!
//! 旅行条件・旅程・生成中フラグを1つの所有者にまとめる。
//! 旅程は upsert / move / reset でのみ丸ごと差し替えられる。

use crate::error::{PlannerError, Result};
use crate::generator::GeneratorKind;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use trip_planner_common::{
    bucket_by_day, move_item, out_of_range_items, upsert_item, CostSummary, DayBucket, DragEvent,
    ItineraryItem, TripData, UpsertOutcome,
};

pub struct PlanningSession {
    trip: Option<TripData>,
    itinerary: Vec<ItineraryItem>,
    pending: watch::Sender<bool>,
    generation: Option<JoinHandle<Vec<ItineraryItem>>>,
    generator: GeneratorKind,
}

impl PlanningSession {
    pub fn new() -> Self {
        Self::with_generator(GeneratorKind::default())
    }

    pub fn with_generator(generator: GeneratorKind) -> Self {
        let (pending, _) = watch::channel(false);
        Self {
            trip: None,
            itinerary: Vec::new(),
            pending,
            generation: None,
            generator,
        }
    }

    /// 保存済みの旅行条件と旅程からセッションを復元
    pub fn restore(trip: TripData, itinerary: Vec<ItineraryItem>) -> Result<Self> {
        trip.validate()?;

        let stray = out_of_range_items(&itinerary, trip.days);
        if !stray.is_empty() {
            log::warn!("日番号が範囲外の旅程が{}件あります（表示されません）", stray.len());
        }

        let mut session = Self::new();
        session.trip = Some(trip);
        session.itinerary = itinerary;
        Ok(session)
    }

    pub fn trip(&self) -> Option<&TripData> {
        self.trip.as_ref()
    }

    pub fn itinerary(&self) -> &[ItineraryItem] {
        &self.itinerary
    }

    pub fn generator(&self) -> GeneratorKind {
        self.generator
    }

    pub fn is_generating(&self) -> bool {
        *self.pending.borrow()
    }

    /// 生成中フラグの購読
    pub fn subscribe_pending(&self) -> watch::Receiver<bool> {
        self.pending.subscribe()
    }

    /// 旅程生成を開始（tokioランタイム上で呼ぶこと）
    ///
    /// 生成中のタスクがあればキャンセルしてから開始する。
    pub fn start_generation(&mut self, trip: TripData, delay: Duration) -> Result<()> {
        trip.validate()?;
        self.cancel_generation();

        let generator = self.generator;
        let task_trip = trip.clone();
        let handle = tokio::spawn(async move { generator.generate(&task_trip, delay).await });

        log::info!("旅程生成を開始: {} ({})", trip.route(), generator.name());
        self.generation = Some(handle);
        self.trip = Some(trip);
        self.replace_itinerary(Vec::new());
        self.pending.send_replace(true);
        Ok(())
    }

    /// 生成タスクの完了を待ち、結果を旅程に反映
    ///
    /// 待機中にこのFutureが破棄されてもタスクはセッションに残るため、
    /// 続けて `cancel_generation` で中止できる。
    pub async fn finish_generation(&mut self) -> Result<&[ItineraryItem]> {
        let Some(handle) = self.generation.as_mut() else {
            return match self.trip {
                Some(_) => Ok(&self.itinerary),
                None => Err(PlannerError::NoTrip),
            };
        };

        let result = handle.await;
        self.generation = None;
        self.pending.send_replace(false);

        match result {
            Ok(items) => {
                log::info!("旅程を生成: {}件", items.len());
                self.replace_itinerary(items);
                Ok(&self.itinerary)
            }
            Err(e) if e.is_cancelled() => Err(PlannerError::GenerationCancelled),
            Err(e) => Err(PlannerError::GenerationFailed(e.to_string())),
        }
    }

    /// 生成中のタスクを中止。中止した場合 true
    pub fn cancel_generation(&mut self) -> bool {
        match self.generation.take() {
            Some(handle) => {
                handle.abort();
                self.pending.send_replace(false);
                log::info!("旅程生成をキャンセル");
                true
            }
            None => false,
        }
    }

    /// 最初からやり直す（生成中のタスクも中止）
    pub fn reset(&mut self) {
        self.cancel_generation();
        self.trip = None;
        self.replace_itinerary(Vec::new());
        log::debug!("セッションをリセット");
    }

    /// 旅程を追加または更新
    pub fn upsert_item(&mut self, item: ItineraryItem) -> Result<UpsertOutcome> {
        let trip = self.trip.as_ref().ok_or(PlannerError::NoTrip)?;
        if !trip.contains_day(item.day) {
            return Err(PlannerError::DayOutOfRange { day: item.day, days: trip.days });
        }

        let id = item.id.clone();
        let (next, outcome) = upsert_item(&self.itinerary, item);
        self.replace_itinerary(next);
        log::info!("旅程を{}: id={}", outcome, id);
        Ok(outcome)
    }

    /// ドラッグ完了イベントを反映。変更があれば true
    pub fn apply_drag(&mut self, event: &DragEvent) -> bool {
        let Some(trip) = self.trip.as_ref() else {
            return false;
        };
        if let Some(dest) = event.destination {
            if !trip.contains_day(dest.day()) {
                log::warn!("範囲外の日へのドロップを無視: {}", dest);
                return false;
            }
        }

        match move_item(&self.itinerary, event) {
            Some(next) if next == self.itinerary => {
                log::debug!("ドラッグは変更なし（同じ日の並べ替え）: id={}", event.item_id);
                false
            }
            Some(next) => {
                let dest = event.destination.map(|d| d.to_string()).unwrap_or_default();
                log::info!("旅程を移動: id={} {} -> {}", event.item_id, event.source, dest);
                self.replace_itinerary(next);
                true
            }
            None => {
                log::debug!("ドラッグは変更なし: id={}", event.item_id);
                false
            }
        }
    }

    /// 項目を指定日に移動（CLI用）
    pub fn move_to_day(&mut self, item_id: &str, day: u32) -> Result<bool> {
        let trip = self.trip.as_ref().ok_or(PlannerError::NoTrip)?;
        if !trip.contains_day(day) {
            return Err(PlannerError::DayOutOfRange { day, days: trip.days });
        }

        let current_day = self
            .itinerary
            .iter()
            .find(|item| item.id == item_id)
            .map(|item| item.day)
            .ok_or_else(|| PlannerError::ItemNotFound(item_id.to_string()))?;

        if current_day == day {
            return Ok(false);
        }
        Ok(self.apply_drag(&DragEvent::reassign(item_id, current_day, day)))
    }

    pub fn buckets(&self) -> Vec<DayBucket<'_>> {
        match &self.trip {
            Some(trip) => bucket_by_day(&self.itinerary, trip.days),
            None => Vec::new(),
        }
    }

    pub fn cost_summary(&self) -> Option<CostSummary> {
        self.trip
            .as_ref()
            .map(|trip| CostSummary::compute(trip, &self.itinerary))
    }

    /// 次に使える数値id
    pub fn next_item_id(&self) -> String {
        let used: HashSet<u64> = self
            .itinerary
            .iter()
            .filter_map(|item| item.id.parse::<u64>().ok())
            .collect();
        let next = used
            .iter()
            .max()
            .map_or(Some(1), |max| max.checked_add(1))
            // 最大値が u64::MAX の場合は空いている最小の番号
            .unwrap_or_else(|| (1..=u64::MAX).find(|id| !used.contains(id)).unwrap_or(0));
        next.to_string()
    }

    fn replace_itinerary(&mut self, next: Vec<ItineraryItem>) {
        self.itinerary = next;
    }
}

impl Default for PlanningSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PlanningSession {
    fn drop(&mut self) {
        if let Some(handle) = self.generation.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trip_planner_common::{ActivityType, BudgetStatus, DayBucketId};

    fn trip(days: u32, budget: f64) -> TripData {
        let start = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        TripData::new(
            vec!["Tokyo".into()],
            start,
            start + chrono::Days::new(days as u64 - 1),
            false,
            budget,
            "USD",
        )
        .unwrap()
    }

    fn item(id: &str, day: u32, cost: f64) -> ItineraryItem {
        ItineraryItem {
            id: id.into(),
            day,
            time: "10:00".into(),
            activity: format!("Activity {}", id),
            location: "Tokyo".into(),
            estimated_cost: cost,
            kind: ActivityType::Activity,
        }
    }

    fn restored() -> PlanningSession {
        PlanningSession::restore(
            trip(3, 300.0),
            vec![item("1", 1, 150.0), item("2", 1, 25.0), item("3", 2, 30.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_cost_summary_scenario() {
        let session = restored();
        let summary = session.cost_summary().unwrap();
        assert_eq!(summary.total, 205.0);
        assert_eq!(summary.remaining, 95.0);
        assert_eq!(summary.status(), BudgetStatus::Within);
    }

    #[test]
    fn test_move_to_day_scenario() {
        let mut session = restored();
        let before = session.itinerary().to_vec();

        assert!(session.move_to_day("2", 2).unwrap());
        let after = session.itinerary();
        assert_eq!(after.len(), 3);
        assert_eq!(after[1].day, 2);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);

        // 同じ日への移動は変更なし
        assert!(!session.move_to_day("2", 2).unwrap());
    }

    #[test]
    fn test_move_to_day_errors() {
        let mut session = restored();
        assert!(matches!(
            session.move_to_day("2", 4),
            Err(PlannerError::DayOutOfRange { day: 4, days: 3 })
        ));
        assert!(matches!(session.move_to_day("99", 2), Err(PlannerError::ItemNotFound(_))));
    }

    #[test]
    fn test_apply_drag_ignores_out_of_range_destination() {
        let mut session = restored();
        let event = DragEvent {
            destination: Some(DayBucketId(9)),
            ..DragEvent::reassign("1", 1, 2)
        };
        assert!(!session.apply_drag(&event));
        assert_eq!(session.itinerary()[0].day, 1);
    }

    #[test]
    fn test_apply_drag_same_day_reorder_is_unchanged() {
        let mut session = restored();
        let before = session.itinerary().to_vec();
        let reorder = DragEvent {
            item_id: "2".into(),
            source: DayBucketId(1),
            source_index: 1,
            destination: Some(DayBucketId(1)),
            destination_index: 0,
        };
        assert!(!session.apply_drag(&reorder));
        assert_eq!(session.itinerary(), before.as_slice());

        assert!(session.apply_drag(&DragEvent::reassign("2", 1, 3)));
        assert_eq!(session.itinerary()[1].day, 3);
    }

    #[test]
    fn test_upsert_scenario() {
        let mut session = restored();
        let lunch = ItineraryItem { activity: "Lunch".into(), ..item("4", 1, 0.0) };

        assert_eq!(session.upsert_item(lunch).unwrap(), UpsertOutcome::Added);
        assert_eq!(session.itinerary().len(), 4);
        assert_eq!(session.itinerary()[3].activity, "Lunch");

        let edited = ItineraryItem { activity: "Late lunch".into(), ..item("4", 1, 12.0) };
        assert_eq!(session.upsert_item(edited).unwrap(), UpsertOutcome::Updated);
        assert_eq!(session.itinerary().len(), 4);
        assert_eq!(session.itinerary()[3].activity, "Late lunch");
    }

    #[test]
    fn test_upsert_requires_trip_and_valid_day() {
        let mut empty = PlanningSession::new();
        assert!(matches!(empty.upsert_item(item("1", 1, 0.0)), Err(PlannerError::NoTrip)));

        let mut session = restored();
        assert!(matches!(
            session.upsert_item(item("5", 0, 0.0)),
            Err(PlannerError::DayOutOfRange { .. })
        ));
    }

    #[test]
    fn test_buckets_cover_every_day() {
        let session = restored();
        let buckets = session.buckets();
        assert_eq!(buckets.len(), 3);
        assert!(buckets[2].is_empty());
    }

    #[test]
    fn test_next_item_id() {
        assert_eq!(restored().next_item_id(), "4");
        assert_eq!(PlanningSession::new().next_item_id(), "1");
    }

    #[test]
    fn test_next_item_id_at_u64_max() {
        let max_id = u64::MAX.to_string();
        let session = PlanningSession::restore(trip(1, 0.0), vec![item(&max_id, 1, 0.0), item("1", 1, 0.0)]).unwrap();

        let next = session.next_item_id();
        assert_eq!(next, "2");
        assert!(session.itinerary().iter().all(|i| i.id != next));
    }

    #[tokio::test]
    async fn test_generation_sets_and_clears_pending() {
        let mut session = PlanningSession::new();
        let pending = session.subscribe_pending();
        assert!(!*pending.borrow());

        session.start_generation(trip(2, 500.0), Duration::from_millis(20)).unwrap();
        assert!(session.is_generating());
        assert!(*pending.borrow());
        assert!(session.itinerary().is_empty());

        let items = session.finish_generation().await.unwrap();
        assert_eq!(items.len(), 6);
        assert!(!session.is_generating());
        assert!(!*pending.borrow());
    }

    #[tokio::test]
    async fn test_reset_cancels_pending_generation() {
        let mut session = PlanningSession::new();
        session.start_generation(trip(2, 500.0), Duration::from_millis(50)).unwrap();

        session.reset();
        assert!(!session.is_generating());
        assert!(session.trip().is_none());

        // 中止したタスクの完了が後から反映されないこと
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(session.itinerary().is_empty());
        assert!(matches!(session.finish_generation().await, Err(PlannerError::NoTrip)));
    }

    #[tokio::test]
    async fn test_restart_replaces_previous_generation() {
        let mut session = PlanningSession::new();
        session.start_generation(trip(2, 500.0), Duration::from_secs(30)).unwrap();
        session.start_generation(trip(1, 500.0), Duration::ZERO).unwrap();

        let items = session.finish_generation().await.unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(session.trip().unwrap().days, 1);
    }

    #[tokio::test]
    async fn test_start_generation_rejects_invalid_trip() {
        let mut session = PlanningSession::new();
        let mut bad = trip(2, 100.0);
        bad.destinations.clear();
        assert!(matches!(
            session.start_generation(bad, Duration::ZERO),
            Err(PlannerError::InvalidTrip(_))
        ));
        assert!(!session.is_generating());
    }
}
