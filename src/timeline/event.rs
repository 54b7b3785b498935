//! Event conversion: one rule per input kind, producing the unified
//! `TimelineEvent` projection used for display, filtering and statistics.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{DataItem, Metrics, Prediction, PredictionMetadata, Source, TrendSnapshot};
use crate::sentiment::Sentiment;
use crate::topics::Topic;

/// Which conversion rule produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Historical,
    Prediction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// The item's own URL.
    Source,
    /// A URL found inside the item's text.
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLink {
    pub kind: LinkKind,
    pub url: String,
}

/// Supplies opaque unique event IDs at conversion time. Injectable so tests
/// can assert exact IDs; the default is a deterministic counter.
pub trait EventIdSource {
    fn next_id(&mut self) -> String;
}

/// Deterministic `evt_NNNNNNNNN` sequence starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EventIdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("evt_{:09}", self.next);
        self.next += 1;
        id
    }
}

/// Unified projection of either a historical item or a prediction.
/// Exactly one of the two type-specific field groups is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,

    // Historical fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<EventLink>,

    // Prediction fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PredictionMetadata>,
}

/// Tag-generation keyword table. Deliberately separate from the classifier's
/// table; the two closed lists differ in a few entries (e.g. "economic" here
/// vs "economy" there).
const TAG_TOPICS: [(Topic, &[&str]); 5] = [
    (Topic::Technology, &["tech", "digital", "software", "ai", "innovation"]),
    (Topic::Politics, &["government", "policy", "election", "political"]),
    (Topic::Economy, &["market", "economic", "financial", "trade"]),
    (Topic::Health, &["health", "medical", "healthcare", "disease"]),
    (Topic::Environment, &["climate", "environmental", "sustainable"]),
];

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("url regex"));

/// Convert one historical item.
pub fn event_from_item(item: &DataItem, ids: &mut dyn EventIdSource) -> TimelineEvent {
    TimelineEvent {
        id: ids.next_id(),
        event_type: EventType::Historical,
        date: item.timestamp,
        title: title_for(item),
        description: item
            .description
            .clone()
            .unwrap_or_else(|| item.content.clone()),
        tags: item_tags(item),
        source: Some(item.source),
        sentiment: Some(item.sentiment),
        metrics: item.metrics,
        relevance: Some(event_relevance(item)),
        links: extract_links(item),
        topic: None,
        confidence: None,
        trend: None,
        implications: Vec::new(),
        analysis: None,
        metadata: None,
    }
}

/// Convert one prediction.
pub fn event_from_prediction(p: &Prediction, ids: &mut dyn EventIdSource) -> TimelineEvent {
    TimelineEvent {
        id: ids.next_id(),
        event_type: EventType::Prediction,
        date: p.predicted_date,
        title: prediction_title(p),
        description: p.details.summary.clone(),
        tags: prediction_tags(p),
        source: None,
        sentiment: None,
        metrics: None,
        relevance: None,
        links: Vec::new(),
        topic: Some(p.topic),
        confidence: Some(p.confidence),
        trend: Some(p.trend),
        implications: p.details.implications.clone(),
        analysis: Some(p.details.analysis.clone()),
        metadata: Some(p.metadata),
    }
}

fn title_for(item: &DataItem) -> String {
    if !item.title.is_empty() {
        return item.title.clone();
    }
    match item.source {
        Source::Twitter => format!("Tweet: {}...", truncate_chars(&item.content, 50)),
        Source::Reddit => format!("Reddit Post: {}", item.title),
        Source::News => match &item.description {
            Some(d) => format!("News: {}...", truncate_chars(d, 50)),
            None => "News: No description".to_string(),
        },
    }
}

fn prediction_title(p: &Prediction) -> String {
    let strength = if p.trend.strength > 7.0 {
        "Strong"
    } else if p.trend.strength > 4.0 {
        "Moderate"
    } else {
        "Mild"
    };
    format!(
        "{} {} trend predicted in {}",
        strength, p.trend.direction, p.topic
    )
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Engagement-based relevance for historical events: likes/1000, shares/500
/// and comments/100 (each capped at 5) plus |sentiment|*2, scaled by 10,
/// rounded, capped at 100. A bespoke normalization, not a statistical scale;
/// the constants are load-bearing for stored relevance expectations.
pub fn event_relevance(item: &DataItem) -> u32 {
    let mut score = 0.0f64;

    if let Some(m) = &item.metrics {
        if let Some(likes) = m.likes {
            score += (likes as f64 / 1000.0).min(5.0);
        }
        if let Some(shares) = m.shares {
            score += (shares as f64 / 500.0).min(5.0);
        }
        if let Some(comments) = m.comments {
            score += (comments as f64 / 100.0).min(5.0);
        }
    }

    score += item.sentiment.score.abs() as f64 * 2.0;

    let scaled = (score * 10.0).round();
    if scaled >= 100.0 {
        100
    } else {
        scaled as u32
    }
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.iter().any(|t| *t == tag) {
        tags.push(tag);
    }
}

fn item_tags(item: &DataItem) -> Vec<String> {
    let mut tags = Vec::new();
    push_unique(&mut tags, item.source.as_str().to_string());
    push_unique(&mut tags, item.sentiment.label.as_str().to_string());

    let content = item.classification_text();
    for (topic, keywords) in TAG_TOPICS {
        if keywords.iter().any(|kw| content.contains(kw)) {
            push_unique(&mut tags, topic.as_str().to_string());
        }
    }
    tags
}

fn prediction_tags(p: &Prediction) -> Vec<String> {
    let mut tags = Vec::new();
    push_unique(&mut tags, "prediction".to_string());
    push_unique(&mut tags, p.topic.as_str().to_string());
    push_unique(&mut tags, p.trend.direction.as_str().to_string());
    push_unique(
        &mut tags,
        format!("confidence-{}", (p.confidence * 10.0).round() / 10.0),
    );
    tags
}

fn extract_links(item: &DataItem) -> Vec<EventLink> {
    let mut links = Vec::new();
    if let Some(url) = &item.url {
        links.push(EventLink {
            kind: LinkKind::Source,
            url: url.clone(),
        });
    }
    let text = item.description.as_deref().unwrap_or(&item.content);
    for m in RE_URL.find_iter(text) {
        if item.url.as_deref() != Some(m.as_str()) {
            links.push(EventLink {
                kind: LinkKind::Reference,
                url: m.as_str().to_string(),
            });
        }
    }
    links
}
