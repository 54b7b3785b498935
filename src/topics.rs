//! # Topic Classifier
//! Maps an item to zero or more topics from a fixed closed set by literal
//! keyword matching, with a normalized relevance score per hit. Keyword lists
//! are not mutually exclusive; one item can seed trends in several topic
//! streams at once.
//!
//! Patterns are compiled once into a static arena, never per call.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::DataItem;

/// Fixed closed topic set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Technology,
    Politics,
    Economy,
    Health,
    Environment,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Technology,
        Topic::Politics,
        Topic::Economy,
        Topic::Health,
        Topic::Environment,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::Technology => &["ai", "tech", "software", "digital", "innovation"],
            Topic::Politics => &["government", "policy", "election", "political"],
            Topic::Economy => &["market", "economy", "financial", "stock", "trade"],
            Topic::Health => &["medical", "health", "healthcare", "disease", "treatment"],
            Topic::Environment => &["climate", "environmental", "sustainable", "green"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Technology => "technology",
            Topic::Politics => "politics",
            Topic::Economy => "economy",
            Topic::Health => "health",
            Topic::Environment => "environment",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

struct TopicMatcher {
    topic: Topic,
    patterns: Vec<Regex>,
}

/// One compiled matcher per topic, built on first use.
static MATCHERS: Lazy<Vec<TopicMatcher>> = Lazy::new(|| {
    Topic::ALL
        .iter()
        .map(|&topic| TopicMatcher {
            topic,
            patterns: topic
                .keywords()
                .iter()
                .map(|kw| Regex::new(&regex::escape(kw)).expect("literal keyword pattern"))
                .collect(),
        })
        .collect()
});

/// A single topic hit for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMatch {
    pub topic: Topic,
    pub relevance: f64,
}

/// Relevance = keyword hits / content length (chars) * 100.
/// Empty content guards to 0 rather than faulting.
pub fn relevance_score(hits: usize, content_len: usize) -> f64 {
    if content_len == 0 {
        return 0.0;
    }
    hits as f64 / content_len as f64 * 100.0
}

/// Classify lower-cased text against every topic matcher.
pub fn classify_text(content: &str) -> Vec<TopicMatch> {
    let len = content.chars().count();
    let mut out = Vec::new();
    for m in MATCHERS.iter() {
        let hits: usize = m
            .patterns
            .iter()
            .map(|re| re.find_iter(content).count())
            .sum();
        if hits > 0 {
            out.push(TopicMatch {
                topic: m.topic,
                relevance: relevance_score(hits, len),
            });
        }
    }
    out
}

/// Classify one item over `title + " " + (description|content)`.
pub fn classify(item: &DataItem) -> Vec<TopicMatch> {
    classify_text(&item.classification_text())
}

/// Group a snapshot of items into per-topic streams, each entry carrying the
/// item and its relevance for that topic. BTreeMap keeps topic order stable.
pub fn group_by_topic(items: &[DataItem]) -> BTreeMap<Topic, Vec<(&DataItem, f64)>> {
    let mut grouped: BTreeMap<Topic, Vec<(&DataItem, f64)>> = BTreeMap::new();
    for item in items {
        for m in classify(item) {
            grouped.entry(m.topic).or_default().push((item, m.relevance));
        }
    }
    grouped
}
