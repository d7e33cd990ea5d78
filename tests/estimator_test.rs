//! Integration tests for compressed size estimators
//!
//! These tests verify estimator selection, sample extrapolation and the
//! contracts between estimators, bitmap summaries and size models.

use pretty_assertions::assert_eq;
use prism_compress::storage::*;
use prism_compress::{CompressionConfig, CompressionError, CompressionResult};

fn low_cardinality_table(rows: usize) -> ColumnMatrix {
    ColumnMatrix::from_columns(vec![
        (0..rows).map(|i| (i % 4) as f64 + 1.0).collect(),
        (0..rows).map(|i| (i / 1000) as f64).collect(),
    ])
    .unwrap()
}

#[test]
fn test_config_selects_estimator() -> CompressionResult<()> {
    let table = low_cardinality_table(1000);

    let exact = estimator_from_config(&table, &CompressionConfig::exact())?;
    assert_eq!(exact.name(), "exact");

    let sample = estimator_from_config(&table, &CompressionConfig::sampled(0.25, 3))?;
    assert_eq!(sample.name(), "sample");
    assert_eq!(sample.num_rows(), 1000);
    assert_eq!(sample.num_cols(), 2);
    Ok(())
}

#[test]
fn test_config_from_json() -> CompressionResult<()> {
    let table = low_cardinality_table(500);
    let config = CompressionConfig::from_json(
        r#"{"sampling_ratio": 0.5, "seed": 11, "threads": 2, "sample_once": false}"#,
    )?;
    let estimator = estimator_from_config(&table, &config)?;
    let info = estimator.estimate(&[0])?;
    assert_eq!(info.est_cardinality(), 4);

    let bad = CompressionConfig::from_json(r#"{"sampling_ratio": 1.5}"#);
    assert!(matches!(bad, Err(CompressionError::InvalidConfig(_))));
    Ok(())
}

#[test]
fn test_sample_finds_every_value_of_low_cardinality_column() -> CompressionResult<()> {
    let rows = 20_000;
    let table = low_cardinality_table(rows);
    let estimator = size_estimator(EstimatorContext::new(&table, false), rows as u32, 9, 0.05)?;
    let exact = size_estimator(EstimatorContext::new(&table, false), rows as u32, 9, 1.0)?;

    let sampled = estimator.estimate(&[0])?;
    let full = exact.estimate(&[0])?;
    assert_eq!(sampled.est_cardinality(), full.est_cardinality());
    assert_eq!(sampled.est_non_default(), full.est_non_default());
    assert_eq!(sampled.best_type(), CompressionType::Dict1);
    Ok(())
}

#[test]
fn test_sampled_estimates_stay_within_table() -> CompressionResult<()> {
    let rows = 8000;
    let table = ColumnMatrix::from_columns(vec![(0..rows).map(|i| i as f64 + 0.5).collect()])?;
    for ratio in [0.01, 0.1, 0.5] {
        let estimator = size_estimator(EstimatorContext::new(&table, false), rows as u32, 5, ratio)?;
        let info = estimator.estimate(&[0])?;
        let f = info.factors();
        assert!(info.est_cardinality() >= 1);
        assert!(info.est_cardinality() as usize <= rows);
        assert!(f.num_vals() as u64 <= f.num_offs());
        assert!(f.num_single() <= f.num_vals());
    }
    Ok(())
}

#[test]
fn test_transposed_input_swaps_dimensions() -> CompressionResult<()> {
    // 3 physical rows, 2 physical columns
    let table = ColumnMatrix::from_columns(vec![vec![1.0, 2.0, 3.0], vec![4.0, 4.0, 4.0]])?;
    let config = CompressionConfig {
        transpose_input: true,
        ..CompressionConfig::exact()
    };
    let estimator = estimator_from_config(&table, &config)?;
    assert_eq!(estimator.num_rows(), 2);
    assert_eq!(estimator.num_cols(), 3);

    // logical column 1 holds physical row 1: [2.0, 4.0]
    let info = estimator.estimate(&[1])?;
    assert_eq!(info.est_cardinality(), 2);
    Ok(())
}

#[test]
fn test_estimate_from_prebuilt_bitmap() -> CompressionResult<()> {
    let table = ColumnMatrix::zeros(100, 1)?;
    let estimator = size_estimator(EstimatorContext::new(&table, false), 100, 1, 1.0)?;

    let ubm = BitmapSummary::new(
        1,
        vec![3.0, 5.0],
        vec![(0..50).collect(), (50..100).collect()],
    )?;
    let info = estimator.estimate_from_bitmap(&ubm)?;
    let f = info.factors();
    assert_eq!(f.num_vals(), 2);
    assert_eq!(f.num_offs(), 100);
    assert_eq!(f.num_runs(), 2);
    assert_eq!(f.num_segs(), 2);
    assert_eq!(info.best_type(), CompressionType::RunLength);
    Ok(())
}

#[test]
fn test_offset_list_needs_many_values() -> CompressionResult<()> {
    let rows = 1000;
    let table = ColumnMatrix::from_columns(vec![(0..rows).map(|i| i as f64 + 1.0).collect()])?;
    let ctx = EstimatorContext::new(&table, false).with_block_size(16);
    let estimator = size_estimator(ctx, rows as u32, 1, 1.0)?;
    let info = estimator.estimate(&[0])?;
    // 1000 distinct values exceed 2 * 16
    assert!(info.size_of(CompressionType::OffsetList) < u64::MAX);

    let estimator = size_estimator(EstimatorContext::new(&table, false), rows as u32, 1, 1.0)?;
    let info = estimator.estimate(&[0])?;
    assert_eq!(info.size_of(CompressionType::OffsetList), u64::MAX);
    Ok(())
}

#[test]
fn test_invalid_sampling_ratio() {
    let table = low_cardinality_table(10);
    for ratio in [0.0, -0.5, 1.01, f64::NAN] {
        let result = size_estimator(EstimatorContext::new(&table, false), 10, 1, ratio);
        assert!(matches!(result, Err(CompressionError::InvalidConfig(_))));
    }
}
