//! # Confidence Estimator
//! Weighted composite of four normalized sub-scores for one trend:
//! data-point volume, duration, strength, and consistency.
//!
//! The strength sub-score is deliberately not clamped, so the final value can
//! exceed 1.0 for pathological average strengths above 100. Threshold
//! comparisons are unaffected; anything rendering percentages clamps
//! downstream, outside this crate.

use crate::config::AnalysisConfig;
use crate::model::Trend;

const W_DATA_POINTS: f64 = 0.30;
const W_DURATION: f64 = 0.25;
const W_STRENGTH: f64 = 0.25;
const W_CONSISTENCY: f64 = 0.20;

/// Duration saturates at 30 consecutive samples.
const DURATION_SATURATION: f64 = 30.0;

/// Score one trend in (nominally) [0, 1].
pub fn trend_confidence(trend: &Trend, config: &AnalysisConfig) -> f64 {
    let data_point_score = if config.minimum_data_points == 0 {
        1.0
    } else {
        (trend.data_points.len() as f64 / config.minimum_data_points as f64).min(1.0)
    };
    let duration_score = (trend.duration as f64 / DURATION_SATURATION).min(1.0);
    let strength_score = trend.average_strength / 100.0;

    let sentiments: Vec<f64> = trend
        .data_points
        .iter()
        .map(|p| p.sentiment as f64)
        .collect();
    let consistency_score = 1.0 - population_stddev(&sentiments).min(1.0);

    W_DATA_POINTS * data_point_score
        + W_DURATION * duration_score
        + W_STRENGTH * strength_score
        + W_CONSISTENCY * consistency_score
}

/// Population standard deviation (divide by N). Empty input degrades to 0;
/// a single sample has variance 0 and therefore perfect consistency.
pub fn population_stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
