//! Timeline query filters and statistics over a mixed snapshot.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sentiment_trend_engine::model::{
    Prediction, PredictionDetails, PredictionMetadata, TrendSnapshot,
};
use sentiment_trend_engine::timeline::SortOrder;
use sentiment_trend_engine::{
    build_timeline, query, statistics, DataItem, EventType, Source, TimelineEvent,
    TimelineFilters, Topic, TrendDirection,
};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap() + Duration::days(n)
}

fn items() -> Vec<DataItem> {
    vec![
        // relevance 20, tags [news, positive, economy]
        DataItem::new(Source::News, "Market rally", "a good day", day(10)).scored(),
        // relevance 40, tags [twitter, negative]
        DataItem::new(Source::Twitter, "", "terrible awful outage", day(12)).scored(),
        // relevance 20, tags [reddit, negative, environment]
        DataItem::new(Source::Reddit, "Climate report", "bad news for climate", day(14)).scored(),
    ]
}

fn prediction(topic: Topic, date: DateTime<Utc>, confidence: f64) -> Prediction {
    Prediction {
        topic,
        predicted_date: date,
        trend: TrendSnapshot {
            direction: TrendDirection::Positive,
            strength: 5.0,
        },
        confidence,
        details: PredictionDetails {
            summary: format!("moderate positive trend in {topic}"),
            analysis: "Based on analysis of 4 data points over 4 days".into(),
            implications: vec!["Market growth".into()],
        },
        created_at: day(15),
        metadata: PredictionMetadata {
            data_points: 4,
            trend_duration: 4,
        },
    }
}

fn snapshot() -> Vec<TimelineEvent> {
    let predictions = vec![
        prediction(Topic::Economy, day(20), 0.8),
        prediction(Topic::Health, day(22), 0.6),
    ];
    build_timeline(&items(), &predictions)
}

#[test]
fn build_merges_and_sorts_ascending() {
    let events = snapshot();
    assert_eq!(events.len(), 5);
    let dates: Vec<DateTime<Utc>> = events.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(10), day(12), day(14), day(20), day(22)]);
}

#[test]
fn empty_inputs_build_an_empty_timeline() {
    let events = build_timeline(&[], &[]);
    assert!(events.is_empty());
    let stats = statistics(&events);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.average_confidence, 0.0);
    assert!(stats.top_tags.is_empty());
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let events = snapshot();
    let out = query(
        &events,
        &TimelineFilters {
            start_date: Some(day(12)),
            end_date: Some(day(20)),
            ..Default::default()
        },
    );
    let dates: Vec<DateTime<Utc>> = out.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(12), day(14), day(20)]);
}

#[test]
fn type_filter_selects_one_kind() {
    let events = snapshot();
    let preds = query(
        &events,
        &TimelineFilters {
            event_type: Some(EventType::Prediction),
            ..Default::default()
        },
    );
    assert_eq!(preds.len(), 2);
    assert!(preds.iter().all(|e| e.event_type == EventType::Prediction));
}

#[test]
fn tag_filter_is_or_within_and_with_other_filters() {
    let events = snapshot();
    let out = query(
        &events,
        &TimelineFilters {
            tags: vec!["environment".into(), "prediction".into()],
            ..Default::default()
        },
    );
    // The reddit climate item plus both prediction events.
    assert_eq!(out.len(), 3);

    // Conjunction with the type filter narrows it to the historical match.
    let narrowed = query(
        &events,
        &TimelineFilters {
            tags: vec!["environment".into(), "prediction".into()],
            event_type: Some(EventType::Historical),
            ..Default::default()
        },
    );
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].date, day(14));
}

#[test]
fn min_relevance_exempts_predictions() {
    let events = snapshot();
    let out = query(
        &events,
        &TimelineFilters {
            min_relevance: Some(30),
            ..Default::default()
        },
    );
    // Only the twitter item (relevance 40) survives among historical events;
    // both predictions pass untouched.
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].date, day(12));
    assert!(out[1..].iter().all(|e| e.event_type == EventType::Prediction));
}

#[test]
fn min_confidence_exempts_historical_events() {
    let events = snapshot();
    let out = query(
        &events,
        &TimelineFilters {
            min_confidence: Some(0.7),
            ..Default::default()
        },
    );
    // All three historical events pass; only the 0.8 prediction survives.
    assert_eq!(out.len(), 4);
    assert!(out
        .iter()
        .filter(|e| e.event_type == EventType::Prediction)
        .all(|e| e.confidence.unwrap() >= 0.7));
}

#[test]
fn descending_sort_is_a_query_parameter() {
    let events = snapshot();
    let out = query(
        &events,
        &TimelineFilters {
            sort: SortOrder::Descending,
            ..Default::default()
        },
    );
    let dates: Vec<DateTime<Utc>> = out.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(22), day(20), day(14), day(12), day(10)]);
}

#[test]
fn filtering_is_idempotent() {
    let events = snapshot();
    let filters = TimelineFilters {
        start_date: Some(day(11)),
        tags: vec!["negative".into(), "prediction".into()],
        min_confidence: Some(0.7),
        sort: SortOrder::Descending,
        ..Default::default()
    };
    let once = query(&events, &filters);
    let twice = query(&once, &filters);
    assert_eq!(once, twice);
}

#[test]
fn statistics_aggregate_the_snapshot() {
    let events = snapshot();
    let stats = statistics(&events);

    assert_eq!(stats.total, 5);
    assert_eq!(stats.by_type.historical, 3);
    assert_eq!(stats.by_type.prediction, 2);
    assert_eq!(
        stats.by_type.historical + stats.by_type.prediction,
        stats.total
    );
    assert_eq!(stats.by_topic.get("economy"), Some(&1));
    assert_eq!(stats.by_topic.get("health"), Some(&1));
    assert!((stats.average_confidence - 0.7).abs() < 1e-9);

    // "negative" is tagged on two historical events.
    let negative = stats
        .top_tags
        .iter()
        .find(|t| t.tag == "negative")
        .expect("negative tag counted");
    assert_eq!(negative.count, 2);
}
