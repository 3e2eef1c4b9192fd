// Unit tests for the precision-at-1 evaluator.
//
// Covers the convergence window boundaries, the degenerate short-input
// path, and the invariant that `overall` is always the plain hit ratio.

use aspectrank::error::RankError;
use aspectrank::ranking::precision::{evaluate, MIN_CONVERGENCE_SAMPLES};

// ============================================================
// Convergence scan
// ============================================================

#[test]
fn all_hits_converge_at_index_100() {
    let report = evaluate(&[true; 150], 1e-3).unwrap();
    assert_eq!(report.estimate(), (1.0, true));
    assert_eq!(report.converged_at, Some(MIN_CONVERGENCE_SAMPLES));
}

#[test]
fn first_check_needs_101_samples() {
    assert!(!evaluate(&[true; 100], 1e-3).unwrap().converged());
    assert!(evaluate(&[true; 101], 1e-3).unwrap().converged());
}

#[test]
fn alternating_fifty_never_checks() {
    let indicators: Vec<bool> = (0..50).map(|i| i % 2 == 0).collect();
    let report = evaluate(&indicators, 1e-3).unwrap();
    assert_eq!(report.estimate(), (0.5, false));
}

#[test]
fn alternating_long_run_converges_with_loose_tolerance() {
    // Alternating hits starting with a hit. At i=100 the previous prefix
    // (50/99) is just over 1% above the current one (50/100); at i=101 both
    // neighbours (50/100 and 51/102) are within 1% of 51/101.
    let indicators: Vec<bool> = (0..400).map(|i| i % 2 == 0).collect();
    let report = evaluate(&indicators, 1e-2).unwrap();
    assert_eq!(report.converged_at, Some(101));
    assert_eq!(report.average, 51.0 / 101.0);
    assert_eq!(report.overall, 0.5);
}

#[test]
fn tight_tolerance_converges_later_than_loose() {
    let indicators: Vec<bool> = (0..5000).map(|i| i % 3 != 0).collect();
    let loose = evaluate(&indicators, 1e-2).unwrap();
    let tight = evaluate(&indicators, 1e-3).unwrap();
    let loose_at = loose.converged_at.expect("loose converges");
    let tight_at = tight.converged_at.expect("tight converges");
    assert!(tight_at > loose_at, "{tight_at} should be after {loose_at}");
}

#[test]
fn leading_misses_are_skipped_not_divided_by() {
    // 150 misses then hits: the scan must not blow up on a zero average
    let mut indicators = vec![false; 150];
    indicators.extend(vec![true; 50]);
    let report = evaluate(&indicators, 1e-3).unwrap();
    assert_eq!(report.estimate(), (0.25, false));
}

// ============================================================
// Reported values
// ============================================================

#[test]
fn overall_is_always_hit_ratio() {
    for len in [1usize, 7, 99, 101, 333] {
        let indicators: Vec<bool> = (0..len).map(|i| i % 4 == 1).collect();
        let hits = indicators.iter().filter(|&&h| h).count();
        let report = evaluate(&indicators, 1e-3).unwrap();
        assert_eq!(report.overall, hits as f64 / len as f64);
        assert_eq!(report.samples, len);
    }
}

#[test]
fn unconverged_reports_overall() {
    let report = evaluate(&[false, true, true], 1e-3).unwrap();
    assert_eq!(report.average, report.overall);
    assert!(!report.converged());
}

// ============================================================
// Errors
// ============================================================

#[test]
fn empty_input_is_explicit_error() {
    assert!(matches!(evaluate(&[], 1e-3), Err(RankError::EmptyInput)));
}

#[test]
fn non_positive_tolerance_is_configuration_error() {
    assert!(matches!(
        evaluate(&[true], 0.0),
        Err(RankError::Configuration(_))
    ));
}
