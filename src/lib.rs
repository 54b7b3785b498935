// src/lib.rs
// Public library surface for the sentiment trend engine.
//
// The crate is a pure, synchronous core: it consumes a snapshot of collected
// items and emits predictions and timeline events. Fetching, scheduling,
// transport and rendering belong to the surrounding service.

pub mod config;
pub mod confidence;
pub mod engine;
pub mod error;
pub mod model;
pub mod predict;
pub mod sentiment;
pub mod timeline;
pub mod topics;
pub mod trend;

// ---- Re-exports for a stable public API ----
pub use crate::config::AnalysisConfig;
pub use crate::engine::generate_predictions;
pub use crate::error::EngineError;
pub use crate::model::{
    DataItem, Metrics, Prediction, SentimentSample, Source, Trend, TrendDirection,
};
pub use crate::predict::{filter_predictions, PredictionFilters};
pub use crate::sentiment::{Sentiment, SentimentAnalyzer, SentimentLabel};
pub use crate::timeline::{
    build_timeline, build_timeline_with_ids, query, statistics, EventIdSource, EventType,
    SequentialIds, SortOrder, TimelineEvent, TimelineFilters, TimelineStatistics,
};
pub use crate::topics::Topic;
