//! # Trend Detector
//! Greedy left-to-right segmentation of a time-ordered sample stream into
//! maximal contiguous same-direction runs. Runs shorter than
//! `MIN_TREND_DURATION` samples are discarded. This favors recency-local
//! simplicity over retrospective re-segmentation; it is not a global optimum
//! over all possible groupings.

use crate::model::{DataItem, SentimentSample, Trend, TrendDirection};

/// A run must span at least this many samples to be emitted as a trend.
pub const MIN_TREND_DURATION: usize = 3;

/// Project topic-grouped items into samples sorted by timestamp ascending.
/// The sort is stable, so equal timestamps keep collection order.
pub fn samples_from(scored: &[(&DataItem, f64)]) -> Vec<SentimentSample> {
    let mut samples: Vec<SentimentSample> = scored
        .iter()
        .map(|(item, relevance)| SentimentSample {
            timestamp: item.timestamp,
            sentiment: item.sentiment.score,
            relevance: *relevance,
        })
        .collect();
    samples.sort_by_key(|s| s.timestamp);
    samples
}

/// Partition `samples` (sorted by timestamp ascending) into trends.
///
/// Edge cases: empty input yields no trends; an all-same-direction input
/// yields exactly one; strictly alternating input yields none.
pub fn detect_trends(samples: &[SentimentSample]) -> Vec<Trend> {
    let mut trends = Vec::new();
    let mut iter = samples.iter();
    let Some(first) = iter.next() else {
        return trends;
    };

    let mut run = Run::seed(first.clone());
    for sample in iter {
        if TrendDirection::from_score(sample.sentiment) == run.direction {
            run.extend(sample.clone());
        } else {
            run.close_into(&mut trends);
            run = Run::seed(sample.clone());
        }
    }
    run.close_into(&mut trends);

    trends
}

/// The open run maintained during the scan.
struct Run {
    direction: TrendDirection,
    strength: f64,
    data_points: Vec<SentimentSample>,
}

impl Run {
    fn seed(sample: SentimentSample) -> Self {
        Self {
            direction: TrendDirection::from_score(sample.sentiment),
            strength: sample.sentiment.abs() as f64,
            data_points: vec![sample],
        }
    }

    fn extend(&mut self, sample: SentimentSample) {
        self.strength += sample.sentiment.abs() as f64;
        self.data_points.push(sample);
    }

    fn close_into(self, out: &mut Vec<Trend>) {
        let duration = self.data_points.len();
        if duration < MIN_TREND_DURATION {
            return;
        }
        out.push(Trend {
            direction: self.direction,
            strength: self.strength,
            duration,
            average_strength: self.strength / duration as f64,
            data_points: self.data_points,
        });
    }
}
