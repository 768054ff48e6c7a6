//! Tests for ranking and latency metrics.

use std::time::Duration;

use crate::metrics::*;

#[test]
fn test_precision_at_k() {
    let list = [true, false, true, false, false];
    assert!((precision_at_k(&list, 5) - 0.4).abs() < 1e-12);
    assert!((precision_at_k(&list, 1) - 1.0).abs() < 1e-12);
    assert!((precision_at_k(&list, 2) - 0.5).abs() < 1e-12);
}

#[test]
fn test_precision_short_list_judged_on_content() {
    assert!((precision_at_k(&[true, true], 5) - 1.0).abs() < 1e-12);
    assert_eq!(precision_at_k(&[], 5), 0.0);
    assert_eq!(precision_at_k(&[true], 0), 0.0);
}

#[test]
fn test_reciprocal_rank() {
    assert_eq!(reciprocal_rank(&[true, false]), 1.0);
    assert!((reciprocal_rank(&[false, false, true]) - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(reciprocal_rank(&[false, false]), 0.0);
}

#[test]
fn test_ndcg_perfect_ranking() {
    assert!((ndcg_at_k(&[1.0, 1.0, 0.0], 3) - 1.0).abs() < 1e-12);
}

#[test]
fn test_ndcg_penalizes_late_hits() {
    let late = ndcg_at_k(&[0.0, 0.0, 1.0], 3);
    assert!(late > 0.0 && late < 1.0);
    assert_eq!(ndcg_at_k(&[0.0, 0.0], 2), 0.0);
    assert_eq!(ndcg_at_k(&[], 2), 0.0);
}

#[test]
fn test_hit_rate() {
    let lists = vec![vec![false, true], vec![false, false], vec![true]];
    assert!((hit_rate(&lists, 2) - 2.0 / 3.0).abs() < 1e-12);
    assert!((hit_rate(&lists, 1) - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(hit_rate(&[], 5), 0.0);
}

#[test]
fn test_latency_stats_empty() {
    let stats = compute_latency_percentiles(&[]);
    assert_eq!(stats, LatencyStats::default());
}

#[test]
fn test_latency_stats_multiple() {
    let samples: Vec<Duration> = (1..=100).map(|i| Duration::from_micros(i * 10)).collect();
    let stats = compute_latency_percentiles(&samples);
    assert_eq!(stats.min, Duration::from_micros(10));
    assert_eq!(stats.max, Duration::from_micros(1000));
    assert!(stats.p50 > Duration::ZERO);
    assert!(stats.p99 > stats.p50);
    assert!(stats.p95 >= stats.p50);
}

#[test]
fn test_latency_millis_conversion() {
    let stats = compute_latency_percentiles(&[Duration::from_millis(2)]);
    let ms = stats.as_millis();
    assert!((ms.mean - 2.0).abs() < 1e-9);
    assert!((ms.max - 2.0).abs() < 1e-9);
}
