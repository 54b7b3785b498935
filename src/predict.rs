//! # Prediction Synthesizer
//! Cross-products surviving trends with the future date horizon, one candidate
//! per (trend, date) pair, annotated with table-driven summary, analysis and
//! implication texts. Candidates below the confidence threshold are discarded.
//!
//! Output ordering is trend-major, date-ascending within a trend; callers
//! needing a different order re-sort.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::confidence::trend_confidence;
use crate::config::AnalysisConfig;
use crate::error::EngineError;
use crate::model::{
    Prediction, PredictionDetails, PredictionMetadata, Trend, TrendDirection, TrendSnapshot,
};
use crate::topics::Topic;

/// Average strength above this reads as a "strong" trend.
const STRONG_STRENGTH_MIN: f64 = 7.0;
/// Above this (and not strong) reads as "moderate"; anything else is "mild".
const MODERATE_STRENGTH_MIN: f64 = 4.0;

/// Fixed per-topic, per-direction implication phrases.
static IMPLICATIONS: Lazy<HashMap<(Topic, TrendDirection), [&'static str; 3]>> =
    Lazy::new(|| {
        use Topic::*;
        use TrendDirection::*;
        HashMap::from([
            (
                (Technology, Positive),
                ["Increased innovation", "New product launches", "Market growth"],
            ),
            (
                (Technology, Negative),
                ["Technical challenges", "Security concerns", "Market saturation"],
            ),
            (
                (Politics, Positive),
                ["Policy reforms", "International cooperation", "Social progress"],
            ),
            (
                (Politics, Negative),
                ["Political tension", "Policy gridlock", "Social unrest"],
            ),
            (
                (Economy, Positive),
                ["Market growth", "Investment opportunities", "Economic stability"],
            ),
            (
                (Economy, Negative),
                ["Market volatility", "Economic uncertainty", "Investment risks"],
            ),
            (
                (Health, Positive),
                ["Medical breakthroughs", "Healthcare improvements", "Public health gains"],
            ),
            (
                (Health, Negative),
                ["Health challenges", "Healthcare issues", "Public health concerns"],
            ),
            (
                (Environment, Positive),
                ["Environmental progress", "Sustainable solutions", "Conservation success"],
            ),
            (
                (Environment, Negative),
                ["Environmental challenges", "Climate concerns", "Resource depletion"],
            ),
        ])
    });

/// Strength bucket used in summaries and titles.
pub fn strength_label(average_strength: f64) -> &'static str {
    if average_strength > STRONG_STRENGTH_MIN {
        "strong"
    } else if average_strength > MODERATE_STRENGTH_MIN {
        "moderate"
    } else {
        "mild"
    }
}

/// Defensive lookup into the closed implication table. The topic/direction set
/// is fixed, so a miss is an invariant violation, not a user error.
pub fn implications_for(
    topic: Topic,
    direction: TrendDirection,
) -> Result<Vec<String>, EngineError> {
    IMPLICATIONS
        .get(&(topic, direction))
        .map(|phrases| phrases.iter().map(|p| p.to_string()).collect())
        .ok_or(EngineError::MissingImplicationTable { topic, direction })
}

fn details_for(topic: Topic, trend: &Trend) -> Result<PredictionDetails, EngineError> {
    Ok(PredictionDetails {
        summary: format!(
            "{} {} trend in {}",
            strength_label(trend.average_strength),
            trend.direction,
            topic
        ),
        analysis: format!(
            "Based on analysis of {} data points over {} days",
            trend.data_points.len(),
            trend.duration
        ),
        implications: implications_for(topic, trend.direction)?,
    })
}

/// Project `trends` onto the next `future_horizon_days` calendar dates.
/// Confidence is identical across a trend's horizon dates, so it is computed
/// once per trend; trends below the threshold produce no candidates at all.
pub fn synthesize(
    topic: Topic,
    trends: &[Trend],
    now: DateTime<Utc>,
    config: &AnalysisConfig,
) -> Result<Vec<Prediction>, EngineError> {
    let mut predictions = Vec::new();

    for trend in trends {
        let confidence = trend_confidence(trend, config);
        if confidence < config.confidence_threshold {
            continue;
        }
        let details = details_for(topic, trend)?;
        for day in 1..=config.future_horizon_days {
            predictions.push(Prediction {
                topic,
                predicted_date: now + Duration::days(day),
                trend: TrendSnapshot {
                    direction: trend.direction,
                    strength: trend.average_strength,
                },
                confidence,
                details: details.clone(),
                created_at: now,
                metadata: PredictionMetadata {
                    data_points: trend.data_points.len(),
                    trend_duration: trend.duration,
                },
            });
        }
    }

    Ok(predictions)
}

/// Optional, conjunctive filters over a published prediction set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionFilters {
    pub topic: Option<Topic>,
    pub min_confidence: Option<f64>,
    /// Inclusive range over `predicted_date`.
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

pub fn filter_predictions(
    predictions: &[Prediction],
    filters: &PredictionFilters,
) -> Vec<Prediction> {
    predictions
        .iter()
        .filter(|p| {
            if let Some(topic) = filters.topic {
                if p.topic != topic {
                    return false;
                }
            }
            if let Some(min) = filters.min_confidence {
                if p.confidence < min {
                    return false;
                }
            }
            if let Some((start, end)) = filters.date_range {
                if p.predicted_date < start || p.predicted_date > end {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SentimentSample;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn trend_of(sentiments: &[i32]) -> Trend {
        let data_points: Vec<SentimentSample> = sentiments
            .iter()
            .enumerate()
            .map(|(i, &s)| SentimentSample {
                timestamp: now() - Duration::days(sentiments.len() as i64 - i as i64),
                sentiment: s,
                relevance: 1.0,
            })
            .collect();
        let strength: f64 = sentiments.iter().map(|s| s.abs() as f64).sum();
        let duration = data_points.len();
        Trend {
            direction: TrendDirection::from_score(sentiments[0]),
            strength,
            duration,
            average_strength: strength / duration as f64,
            data_points,
        }
    }

    #[test]
    fn strength_labels_bucket_on_thresholds() {
        assert_eq!(strength_label(7.1), "strong");
        assert_eq!(strength_label(7.0), "moderate");
        assert_eq!(strength_label(4.1), "moderate");
        assert_eq!(strength_label(4.0), "mild");
        assert_eq!(strength_label(0.5), "mild");
    }

    #[test]
    fn implication_table_covers_the_closed_set() {
        for topic in Topic::ALL {
            for direction in [TrendDirection::Positive, TrendDirection::Negative] {
                let phrases = implications_for(topic, direction).unwrap();
                assert_eq!(phrases.len(), 3);
            }
        }
    }

    #[test]
    fn one_prediction_per_horizon_date_in_order() {
        let cfg = AnalysisConfig {
            minimum_data_points: 3,
            confidence_threshold: 0.0,
            future_horizon_days: 5,
            past_window_days: 30,
        };
        let trends = vec![trend_of(&[3, 3, 3]), trend_of(&[-2, -2, -2, -2])];
        let preds = synthesize(Topic::Economy, &trends, now(), &cfg).unwrap();
        assert_eq!(preds.len(), 10);
        // Trend-major, date-ascending.
        for (i, p) in preds.iter().enumerate() {
            let expected_day = (i as i64 % 5) + 1;
            assert_eq!(p.predicted_date, now() + Duration::days(expected_day));
        }
        assert_eq!(preds[0].trend.direction, TrendDirection::Positive);
        assert_eq!(preds[5].trend.direction, TrendDirection::Negative);
        assert_eq!(preds[0].created_at, now());
        assert_eq!(preds[0].metadata.data_points, 3);
        assert_eq!(preds[5].metadata.trend_duration, 4);
    }

    #[test]
    fn low_confidence_trend_yields_no_candidates() {
        // 3 points against minimum 100 with average strength 1: the volume
        // term contributes 0.009 and the total stays far below 0.75.
        let cfg = AnalysisConfig::default();
        let preds = synthesize(Topic::Technology, &[trend_of(&[1, 1, 1])], now(), &cfg).unwrap();
        assert!(preds.is_empty());
    }

    #[test]
    fn details_text_is_table_driven() {
        let cfg = AnalysisConfig {
            minimum_data_points: 3,
            confidence_threshold: 0.0,
            future_horizon_days: 1,
            past_window_days: 30,
        };
        let preds = synthesize(Topic::Health, &[trend_of(&[-8, -9, -8])], now(), &cfg).unwrap();
        let d = &preds[0].details;
        assert_eq!(d.summary, "strong negative trend in health");
        assert_eq!(d.analysis, "Based on analysis of 3 data points over 3 days");
        assert_eq!(
            d.implications,
            vec!["Health challenges", "Healthcare issues", "Public health concerns"]
        );
    }

    #[test]
    fn filters_are_conjunctive_and_inclusive() {
        let cfg = AnalysisConfig {
            minimum_data_points: 3,
            confidence_threshold: 0.0,
            future_horizon_days: 3,
            past_window_days: 30,
        };
        let mut preds = synthesize(Topic::Economy, &[trend_of(&[2, 2, 2])], now(), &cfg).unwrap();
        preds.extend(synthesize(Topic::Health, &[trend_of(&[2, 2, 2])], now(), &cfg).unwrap());

        let by_topic = filter_predictions(
            &preds,
            &PredictionFilters {
                topic: Some(Topic::Health),
                ..Default::default()
            },
        );
        assert_eq!(by_topic.len(), 3);
        assert!(by_topic.iter().all(|p| p.topic == Topic::Health));

        let in_range = filter_predictions(
            &preds,
            &PredictionFilters {
                date_range: Some((now() + Duration::days(1), now() + Duration::days(2))),
                ..Default::default()
            },
        );
        assert_eq!(in_range.len(), 4);

        let none = filter_predictions(
            &preds,
            &PredictionFilters {
                min_confidence: Some(2.0),
                ..Default::default()
            },
        );
        assert!(none.is_empty());
    }
}
