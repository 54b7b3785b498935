//! Core data model: collected items, sentiment samples, trends and predictions.
//!
//! Ownership rule: each pipeline stage owns its output exclusively until it is
//! handed to the next stage. A `Trend` is an immutable finding once detection
//! closes it; a `Prediction` carries a `TrendSnapshot`, not a live reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::{Sentiment, SentimentAnalyzer};
use crate::topics::Topic;

/// Where a collected item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    News,
    Twitter,
    Reddit,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::News => "news",
            Source::Twitter => "twitter",
            Source::Reddit => "reddit",
        }
    }
}

/// Optional engagement counts; presence varies by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
}

/// A unit of collected content. Created by the external collector and
/// read-only to the engine thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    pub source: Source,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub sentiment: Sentiment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl DataItem {
    /// New item with neutral sentiment. Call `scored()` once all text fields
    /// are set to attach the lexicon sentiment.
    pub fn new(
        source: Source,
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            title: title.into(),
            content: content.into(),
            description: None,
            url: None,
            timestamp,
            sentiment: Sentiment::neutral(),
            metrics: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Attach the sentiment computed from `title + " " + (description|content)`.
    /// This happens once, at ingestion; the engine never re-scores an item.
    pub fn scored(mut self) -> Self {
        let text = self.classification_text();
        self.sentiment = SentimentAnalyzer::new().score_text(&text);
        self
    }

    /// Lower-cased text used for both sentiment scoring and topic matching.
    pub fn classification_text(&self) -> String {
        let body = self.description.as_deref().unwrap_or(&self.content);
        format!("{} {}", self.title, body).to_lowercase()
    }
}

/// Direction of a sentiment trend. Two-valued: there is no neutral trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Positive,
    Negative,
}

impl TrendDirection {
    /// Sign-to-direction fold. A score of zero maps to `Negative`; this is the
    /// single place where that fold happens.
    pub fn from_score(score: i32) -> Self {
        if score > 0 {
            TrendDirection::Positive
        } else {
            TrendDirection::Negative
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Positive => "positive",
            TrendDirection::Negative => "negative",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One topic-scoped sentiment observation. Ordered by timestamp ascending;
/// ties keep first-seen collection order (stable sort).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSample {
    pub timestamp: DateTime<Utc>,
    pub sentiment: i32,
    pub relevance: f64,
}

/// A maximal contiguous run of same-direction samples within one topic.
/// Immutable once detection closes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Accumulated absolute sentiment magnitude over the run.
    pub strength: f64,
    /// Number of samples in the run; always equals `data_points.len()`.
    pub duration: usize,
    pub data_points: Vec<SentimentSample>,
    pub average_strength: f64,
}

/// Frozen view of the trend a prediction was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub direction: TrendDirection,
    pub strength: f64,
}

/// Human-readable prediction texts; derived once, never re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionDetails {
    pub summary: String,
    pub analysis: String,
    pub implications: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionMetadata {
    pub data_points: usize,
    pub trend_duration: usize,
}

/// A dated, confidence-scored projection of one trend onto one horizon date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub topic: Topic,
    pub predicted_date: DateTime<Utc>,
    pub trend: TrendSnapshot,
    pub confidence: f64,
    pub details: PredictionDetails,
    pub created_at: DateTime<Utc>,
    pub metadata: PredictionMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_score_folds_into_negative() {
        assert_eq!(TrendDirection::from_score(0), TrendDirection::Negative);
        assert_eq!(TrendDirection::from_score(-3), TrendDirection::Negative);
        assert_eq!(TrendDirection::from_score(1), TrendDirection::Positive);
    }

    #[test]
    fn scored_uses_description_over_content_for_news() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        let item = DataItem::new(Source::News, "Markets", "bad bad bad", ts)
            .with_description("A good day for trade")
            .scored();
        // Description wins over content, so the score comes from "good".
        assert_eq!(item.sentiment.score, 1);
    }

    #[test]
    fn scored_falls_back_to_content() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        let item = DataItem::new(Source::Twitter, "", "terrible outage today", ts).scored();
        assert_eq!(item.sentiment.score, -1);
    }
}
