//! Trip Planner Common Library
//!
//! CLIと他のフロントエンドで共有される型と旅程ロジック

pub mod types;
pub mod error;
pub mod itinerary;
pub mod cost;
pub mod export;

pub use types::{ActivityType, ItineraryItem, TripData, TypeStyle};
pub use error::{Error, Result};
pub use itinerary::{
    bucket_by_day, move_item, out_of_range_items, sorted_by_time, upsert_item, DayBucket,
    DayBucketId, DragEvent, UpsertOutcome,
};
pub use cost::{day_subtotal, format_amount, format_cost, total_cost, BudgetStatus, CostSummary};
pub use export::document_core::{build_document, paginate, DocumentBlock, DocumentLayout, DocumentPage};
