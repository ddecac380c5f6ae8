//! Benchmark matching: find the current run that is "the same benchmark".

use perfwatch_core::types::{BenchmarkRecord, KeyProperty};

/// Two records are the same benchmark when every key property present on
/// both sides is equal. A key absent from either side is a wildcard.
pub fn is_same_benchmark(baseline: &BenchmarkRecord, candidate: &BenchmarkRecord) -> bool {
    KeyProperty::all().iter().all(|&key| {
        match (baseline.key_property(key), candidate.key_property(key)) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    })
}

/// First candidate, in input order, that matches `baseline`.
///
/// Ties between equally valid candidates are not broken by any other
/// criterion; re-run duplicates resolve to whichever row came first.
pub fn match_benchmark<'c>(
    baseline: &BenchmarkRecord,
    candidates: &'c [BenchmarkRecord],
) -> Option<&'c BenchmarkRecord> {
    candidates.iter().find(|c| is_same_benchmark(baseline, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfwatch_core::types::FieldValue;

    fn record(model: &str, threads: i64) -> BenchmarkRecord {
        BenchmarkRecord::new()
            .with("model_type", model)
            .with("n_threads", threads)
    }

    #[test]
    fn first_matching_candidate_wins() {
        let baseline = record("A", 4);
        let candidates = vec![
            record("A", 4).with("avg_ts", 10.0),
            record("A", 4).with("avg_ts", 20.0),
        ];
        let matched = match_benchmark(&baseline, &candidates).unwrap();
        assert_eq!(matched.avg_ts(), Some(10.0));
    }

    #[test]
    fn differing_key_rejects() {
        let baseline = record("A", 4);
        let candidates = vec![record("A", 8), record("B", 4)];
        assert!(match_benchmark(&baseline, &candidates).is_none());
    }

    #[test]
    fn absent_keys_are_wildcards() {
        let baseline = BenchmarkRecord::new().with("model_type", "A");
        let candidate = record("A", 16).with("n_gpu_layers", 99);
        assert!(is_same_benchmark(&baseline, &candidate));
        assert!(is_same_benchmark(&candidate, &baseline));
    }

    #[test]
    fn non_key_columns_are_ignored() {
        let baseline = record("A", 4).with("build_commit", "aaa").with("avg_ts", 1.0);
        let candidate = record("A", 4).with("build_commit", "bbb").with("avg_ts", 2.0);
        assert!(is_same_benchmark(&baseline, &candidate));
    }

    #[test]
    fn null_only_matches_null() {
        let baseline = record("A", 4).with("backends", FieldValue::Null);
        assert!(is_same_benchmark(&baseline, &record("A", 4).with("backends", FieldValue::Null)));
        assert!(!is_same_benchmark(&baseline, &record("A", 4).with("backends", "cpu")));
    }

    #[test]
    fn integer_and_real_keys_compare_numerically() {
        let baseline = record("A", 4);
        let candidate = BenchmarkRecord::new()
            .with("model_type", "A")
            .with("n_threads", 4.0);
        assert!(is_same_benchmark(&baseline, &candidate));
    }

    #[test]
    fn empty_pool_has_no_match() {
        assert!(match_benchmark(&record("A", 4), &[]).is_none());
    }
}
