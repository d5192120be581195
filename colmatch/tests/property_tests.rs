//! Property-based tests for the scoring primitives and the pairwise matcher.
//!
//! Profiles are generated from small value pools so that duplicate and
//! mirrored pairs occur often enough to exercise deduplication.

use std::collections::HashSet;

use colmatch::matcher::{
    name_similarity, null_similarity, overlap_score, type_score, unique_similarity, ColumnMatcher,
};
use colmatch::profile::{ColumnProfile, ColumnProfileId, DeclaredType};
use proptest::prelude::*;

fn declared_type() -> impl Strategy<Value = Option<DeclaredType>> {
    prop::option::of(prop::sample::select(DeclaredType::ALL.to_vec()))
}

fn percentage() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

fn coarse_percentage() -> impl Strategy<Value = f64> {
    (0u8..=4).prop_map(|step| f64::from(step) * 25.0)
}

fn profile() -> impl Strategy<Value = ColumnProfile> {
    (
        prop::sample::select(vec!["id", "customer_id", "cust_id", "city", "Name"]),
        prop::option::of(prop::sample::select(vec![
            DeclaredType::Integer,
            DeclaredType::Varchar,
            DeclaredType::Date,
        ])),
        coarse_percentage(),
        coarse_percentage(),
        prop::collection::vec(prop::sample::select(vec!["a", "b", "Paris"]), 0..3),
    )
        .prop_map(|(name, ty, null_pct, unique_pct, samples)| {
            ColumnProfile::with_type(name, ty)
                .with_percentages(null_pct, Some(unique_pct))
                .with_samples(samples)
        })
}

fn unordered_key(left: &ColumnProfile, right: &ColumnProfile) -> (String, String) {
    let a = ColumnProfileId::of(left).to_hex();
    let b = ColumnProfileId::of(right).to_hex();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

proptest! {
    #[test]
    fn type_score_is_symmetric(a in declared_type(), b in declared_type()) {
        prop_assert_eq!(type_score(a, b), type_score(b, a));
        prop_assert!([0.0, 0.3, 0.8, 1.0].contains(&type_score(a, b)));
    }

    #[test]
    fn scalar_similarities_are_bounded(a in percentage(), b in percentage()) {
        let null = null_similarity(a, b);
        let unique = unique_similarity(a, b);
        prop_assert!((0.0..=1.0).contains(&null));
        prop_assert!((0.0..=1.0).contains(&unique));
        prop_assert_eq!(null_similarity(a, a), 1.0);
        prop_assert_eq!(unique_similarity(a, a), 1.0);
    }

    #[test]
    fn name_similarity_is_bounded_and_symmetric(a in "[a-zA-Z_ -]{0,16}", b in "[a-zA-Z_ -]{0,16}") {
        let score = name_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert!((score - name_similarity(&b, &a)).abs() < 1e-12);
        prop_assert_eq!(name_similarity(&a, &a), 1.0);
    }

    #[test]
    fn overlap_is_bounded(
        left in prop::collection::vec("[a-c ]{0,5}", 0..6),
        right in prop::collection::vec("[a-c ]{0,5}", 0..6),
        threshold in 0.05f64..=1.0,
    ) {
        let score = overlap_score(&left, &right, threshold);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn identical_sample_sets_fully_overlap(values in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        prop_assert_eq!(overlap_score(&values, &values, 0.8), 1.0);
    }

    #[test]
    fn matcher_scores_each_unordered_pair_once(
        left in prop::collection::vec(profile(), 0..5),
        extra in prop::collection::vec(profile(), 0..5),
    ) {
        // Reusing left profiles on the right produces mirrored pairs.
        let right: Vec<ColumnProfile> = left.iter().cloned().chain(extra).collect();
        let results = ColumnMatcher::default().match_profiles(&left, &right);

        let mut keys = HashSet::new();
        for result in &results {
            prop_assert!(keys.insert(unordered_key(&result.left, &result.right)));
        }

        let expected: HashSet<_> = left
            .iter()
            .flat_map(|l| right.iter().map(move |r| unordered_key(l, r)))
            .collect();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn matcher_results_are_sorted_and_bounded(
        left in prop::collection::vec(profile(), 0..5),
        right in prop::collection::vec(profile(), 0..5),
    ) {
        let results = ColumnMatcher::default().match_profiles(&left, &right);
        for result in &results {
            prop_assert!((0.0..=1.0).contains(&result.score));
        }
        for window in results.windows(2) {
            prop_assert!(window[0].score >= window[1].score);
        }
    }
}
