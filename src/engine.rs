//! Pipeline entry point: classify, detect, estimate, synthesize.
//!
//! One call processes an immutable input snapshot to completion. The engine
//! holds no state between invocations; a run's output fully replaces the
//! caller's previously published set.

use chrono::{DateTime, Utc};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::EngineError;
use crate::model::{DataItem, Prediction};
use crate::{predict, topics, trend};

/// One-time metrics registration (so series show up on the service's exporter).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("predict_runs_total", "Completed prediction runs.");
        describe_counter!(
            "predict_trends_total",
            "Trends detected across all topics, before confidence filtering."
        );
        describe_counter!(
            "predict_candidates_total",
            "Candidate (trend, date) pairs considered."
        );
        describe_counter!(
            "predict_published_total",
            "Predictions that survived the confidence threshold."
        );
        describe_gauge!(
            "predict_last_run_ts",
            "Unix ts of the last prediction run."
        );
    });
}

/// Run the full pipeline over a snapshot of collected items.
///
/// Fails with `InsufficientData` when the snapshot is below
/// `config.minimum_data_points`; the caller retries later with more data.
pub fn generate_predictions(
    items: &[DataItem],
    now: DateTime<Utc>,
    config: &AnalysisConfig,
) -> Result<Vec<Prediction>, EngineError> {
    ensure_metrics_described();

    if items.len() < config.minimum_data_points {
        return Err(EngineError::InsufficientData {
            got: items.len(),
            need: config.minimum_data_points,
        });
    }

    let grouped = topics::group_by_topic(items);
    let mut predictions = Vec::new();
    let mut trend_count = 0usize;

    for (topic, scored) in grouped {
        let samples = trend::samples_from(&scored);
        let trends = trend::detect_trends(&samples);
        debug!(
            topic = %topic,
            samples = samples.len(),
            trends = trends.len(),
            "topic analyzed"
        );
        trend_count += trends.len();
        predictions.extend(predict::synthesize(topic, &trends, now, config)?);
    }

    counter!("predict_runs_total").increment(1);
    counter!("predict_trends_total").increment(trend_count as u64);
    counter!("predict_candidates_total")
        .increment((trend_count as u64) * config.future_horizon_days.max(0) as u64);
    counter!("predict_published_total").increment(predictions.len() as u64);
    gauge!("predict_last_run_ts").set(now.timestamp() as f64);

    info!(
        items = items.len(),
        trends = trend_count,
        predictions = predictions.len(),
        "prediction run complete"
    );

    Ok(predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn too_few_items_is_a_recoverable_error() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let cfg = AnalysisConfig::default();
        let err = generate_predictions(&[], now, &cfg).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientData {
                got: 0,
                need: 100
            }
        );
    }
}
