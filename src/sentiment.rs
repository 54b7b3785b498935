//! # Sentiment Scorer
//! Lexicon-based scoring of free text to a signed integer score plus a label.
//! Pure function, no failure modes: empty text scores 0 / neutral.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Label derived from the sign of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    fn from_score(score: i32) -> Self {
        match score {
            s if s > 0 => SentimentLabel::Positive,
            s if s < 0 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// Computed at ingestion and attached to the item; never recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: i32,
    pub label: SentimentLabel,
}

impl Sentiment {
    pub fn neutral() -> Self {
        Self {
            score: 0,
            label: SentimentLabel::Neutral,
        }
    }

    pub fn from_score(score: i32) -> Self {
        Self {
            score,
            label: SentimentLabel::from_score(score),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Lower-cases the text and counts literal substring occurrences of each
    /// lexicon word, weighted by the word's entry (+1 positive, -1 negative).
    pub fn score_text(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let mut score: i32 = 0;

        for (word, weight) in LEXICON.iter() {
            let hits = lowered.matches(word.as_str()).count() as i32;
            score += hits * weight;
        }

        Sentiment::from_score(score)
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral_zero() {
        let s = SentimentAnalyzer::new().score_text("");
        assert_eq!(s.score, 0);
        assert_eq!(s.label, SentimentLabel::Neutral);
    }

    #[test]
    fn counts_every_occurrence() {
        let s = SentimentAnalyzer::new().score_text("good good GOOD");
        assert_eq!(s.score, 3);
        assert_eq!(s.label, SentimentLabel::Positive);
    }

    #[test]
    fn mixed_words_sum_and_label_by_sign() {
        let s = SentimentAnalyzer::new().score_text("great launch, terrible rollout, awful press");
        assert_eq!(s.score, -1);
        assert_eq!(s.label, SentimentLabel::Negative);
    }

    #[test]
    fn balanced_text_is_neutral() {
        let s = SentimentAnalyzer::new().score_text("good but bad");
        assert_eq!(s.score, 0);
        assert_eq!(s.label, SentimentLabel::Neutral);
    }

    #[test]
    fn unknown_words_score_nothing() {
        let s = SentimentAnalyzer::new().score_text("quarterly figures were published today");
        assert_eq!(s.score, 0);
    }
}
