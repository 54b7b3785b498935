//! Summary statistics over a timeline snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::event::{EventType, TimelineEvent};

pub const TOP_TAGS_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub historical: usize,
    pub prediction: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStatistics {
    pub total: usize,
    pub by_type: TypeCounts,
    /// Per-topic counts; only prediction events carry a topic.
    pub by_topic: BTreeMap<String, usize>,
    /// Mean confidence over prediction events only; 0 when there are none.
    pub average_confidence: f64,
    pub top_tags: Vec<TagCount>,
}

pub fn statistics(events: &[TimelineEvent]) -> TimelineStatistics {
    let mut by_type = TypeCounts::default();
    let mut by_topic: BTreeMap<String, usize> = BTreeMap::new();
    let mut confidence_sum = 0.0f64;

    for event in events {
        match event.event_type {
            EventType::Historical => by_type.historical += 1,
            EventType::Prediction => {
                by_type.prediction += 1;
                confidence_sum += event.confidence.unwrap_or(0.0);
            }
        }
        if let Some(topic) = event.topic {
            *by_topic.entry(topic.to_string()).or_insert(0) += 1;
        }
    }

    let average_confidence = if by_type.prediction > 0 {
        confidence_sum / by_type.prediction as f64
    } else {
        0.0
    };

    TimelineStatistics {
        total: events.len(),
        by_type,
        by_topic,
        average_confidence,
        top_tags: top_tags(events, TOP_TAGS_LIMIT),
    }
}

/// Tag occurrence counts across all events, top `limit` by count descending.
/// Ties keep first-seen order (the count sort is stable over an
/// insertion-ordered list).
pub fn top_tags(events: &[TimelineEvent], limit: usize) -> Vec<TagCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for event in events {
        for tag in &event.tags {
            if !counts.contains_key(tag) {
                order.push(tag.clone());
            }
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut out: Vec<TagCount> = order
        .into_iter()
        .map(|tag| {
            let count = counts[&tag];
            TagCount { tag, count }
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out.truncate(limit);
    out
}
