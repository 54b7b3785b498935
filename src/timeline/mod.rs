//! # Timeline Aggregator
//! Merges historical items and predictions into one chronologically ordered
//! event list, with conjunctive query filters and summary statistics.
//!
//! State-machine free: `build_timeline` is a pure transform whose output
//! replaces any previously built timeline in full; `query` and `statistics`
//! read a caller-owned snapshot.

pub mod event;
pub mod stats;

use chrono::Utc;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::model::{DataItem, Prediction};

pub use event::{
    event_relevance, EventIdSource, EventLink, EventType, LinkKind, SequentialIds, TimelineEvent,
};
pub use stats::{statistics, top_tags, TagCount, TimelineStatistics, TypeCounts};

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "timeline_events_built_total",
            "Events emitted by timeline rebuilds."
        );
        describe_gauge!(
            "timeline_last_build_ts",
            "Unix ts of the last timeline rebuild."
        );
    });
}

/// Build the merged timeline with the default deterministic ID sequence.
pub fn build_timeline(items: &[DataItem], predictions: &[Prediction]) -> Vec<TimelineEvent> {
    let mut ids = SequentialIds::default();
    build_timeline_with_ids(items, predictions, &mut ids)
}

/// Build the merged timeline, drawing event IDs from the given source.
/// Output is sorted by date ascending; the sort is stable, so equal dates
/// keep historical-before-prediction input order.
pub fn build_timeline_with_ids(
    items: &[DataItem],
    predictions: &[Prediction],
    ids: &mut dyn EventIdSource,
) -> Vec<TimelineEvent> {
    ensure_metrics_described();

    let mut events: Vec<TimelineEvent> = Vec::with_capacity(items.len() + predictions.len());
    events.extend(items.iter().map(|i| event::event_from_item(i, ids)));
    events.extend(
        predictions
            .iter()
            .map(|p| event::event_from_prediction(p, ids)),
    );
    events.sort_by_key(|e| e.date);

    counter!("timeline_events_built_total").increment(events.len() as u64);
    gauge!("timeline_last_build_ts").set(Utc::now().timestamp() as f64);

    events
}

/// Requested output order; a per-query parameter, not stored state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Independently optional, conjunctive filters. Within the tag filter an
/// event matches if ANY requested tag is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineFilters {
    /// Inclusive date range bounds.
    pub start_date: Option<chrono::DateTime<Utc>>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Applies to historical events only; predictions are exempt.
    pub min_relevance: Option<u32>,
    /// Applies to prediction events only; historical events always pass.
    pub min_confidence: Option<f64>,
    #[serde(default)]
    pub sort: SortOrder,
}

/// Filter and re-sort a timeline snapshot. Idempotent for any fixed filter
/// set: `query(query(e, f), f) == query(e, f)`.
pub fn query(events: &[TimelineEvent], filters: &TimelineFilters) -> Vec<TimelineEvent> {
    let mut out: Vec<TimelineEvent> = events
        .iter()
        .filter(|e| matches_filters(e, filters))
        .cloned()
        .collect();

    match filters.sort {
        SortOrder::Ascending => out.sort_by_key(|e| e.date),
        SortOrder::Descending => out.sort_by_key(|e| std::cmp::Reverse(e.date)),
    }

    out
}

fn matches_filters(event: &TimelineEvent, f: &TimelineFilters) -> bool {
    if let Some(start) = f.start_date {
        if event.date < start {
            return false;
        }
    }
    if let Some(end) = f.end_date {
        if event.date > end {
            return false;
        }
    }
    if let Some(t) = f.event_type {
        if event.event_type != t {
            return false;
        }
    }
    if !f.tags.is_empty() && !f.tags.iter().any(|t| event.tags.contains(t)) {
        return false;
    }
    if let Some(min) = f.min_relevance {
        if event.event_type == EventType::Historical
            && event.relevance.map_or(true, |r| r < min)
        {
            return false;
        }
    }
    if let Some(min) = f.min_confidence {
        if event.event_type == EventType::Prediction
            && event.confidence.map_or(true, |c| c < min)
        {
            return false;
        }
    }
    true
}
