//! Reduction of transit candidates to one representative duration.
//!
//! A handful of transfer-heavy itineraries should not dominate the
//! estimate, so large candidate sets lose their slowest fifth before
//! averaging. Small sets are averaged as-is.

use super::TransitCandidates;

/// Candidate sets at or below this size are not trimmed.
const TRIM_THRESHOLD: usize = 5;

/// Fraction of the largest values dropped, as `1 / TRIM_DIVISOR`.
const TRIM_DIVISOR: usize = 5;

/// Average of `values` after dropping the `ceil(len / 5)` largest when
/// there are more than five. `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use trip_engine::routing::trimmed_average;
///
/// // 13 and 11 are dropped.
/// assert_eq!(trimmed_average(&[2.0, 3.0, 5.0, 7.0, 11.0, 13.0]), Some(4.25));
/// assert_eq!(trimmed_average(&[10.0, 20.0]), Some(15.0));
/// assert_eq!(trimmed_average(&[]), None);
/// ```
pub fn trimmed_average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let keep = if sorted.len() > TRIM_THRESHOLD {
        sorted.len() - sorted.len().div_ceil(TRIM_DIVISOR)
    } else {
        sorted.len()
    };

    let kept = &sorted[..keep];
    Some(kept.iter().sum::<f64>() / kept.len() as f64)
}

/// Representative duration in whole seconds.
///
/// Each group is trimmed and averaged on its own; the lower of the two
/// averages wins, and only that value is rounded up. `None` when both
/// groups are empty.
///
/// Candidates are expected to be finite and non-negative; the train
/// provider rejects anything else before reducing.
pub fn representative_duration(candidates: &TransitCandidates) -> Option<u64> {
    let best = match (
        trimmed_average(&candidates.itineraries),
        trimmed_average(&candidates.direct),
    ) {
        (Some(routed), Some(direct)) => routed.min(direct),
        (Some(avg), None) | (None, Some(avg)) => avg,
        (None, None) => return None,
    };

    Some(best.ceil() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidates(itineraries: &[f64], direct: &[f64]) -> TransitCandidates {
        TransitCandidates {
            itineraries: itineraries.to_vec(),
            direct: direct.to_vec(),
        }
    }

    #[test]
    fn trims_two_largest_of_six() {
        let c = candidates(&[2.0, 3.0, 5.0, 7.0, 11.0, 13.0], &[]);
        assert_eq!(representative_duration(&c), Some(5));
    }

    #[test]
    fn trimming_ignores_input_order() {
        let c = candidates(&[13.0, 2.0, 11.0, 7.0, 3.0, 5.0], &[]);
        assert_eq!(representative_duration(&c), Some(5));
    }

    #[test]
    fn five_or_fewer_are_not_trimmed() {
        assert_eq!(
            trimmed_average(&[100.0, 200.0, 300.0, 400.0, 5000.0]),
            Some(1200.0)
        );
    }

    #[test]
    fn ten_values_drop_two() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        // Keeps 1..=8.
        assert_eq!(trimmed_average(&values), Some(4.5));
    }

    #[test]
    fn eleven_values_drop_three() {
        let values: Vec<f64> = (1..=11).map(f64::from).collect();
        // ceil(2.2) = 3 dropped, keeps 1..=8.
        assert_eq!(trimmed_average(&values), Some(4.5));
    }

    #[test]
    fn lower_group_wins() {
        let c = candidates(&[1800.0, 2000.0], &[600.0]);
        assert_eq!(representative_duration(&c), Some(600));

        let c = candidates(&[900.0], &[3000.0, 3200.0]);
        assert_eq!(representative_duration(&c), Some(900));
    }

    #[test]
    fn groups_trimmed_independently_before_comparison() {
        // Itineraries trim to [10, 20, 30, 40] -> 25; direct is 26.
        let c = candidates(&[10.0, 20.0, 30.0, 40.0, 500.0, 600.0], &[26.0]);
        assert_eq!(representative_duration(&c), Some(25));
    }

    #[test]
    fn rounding_happens_once_after_comparison() {
        // 24.2 is chosen unrounded, then rounded up.
        let c = candidates(&[24.2], &[24.4]);
        assert_eq!(representative_duration(&c), Some(25));

        // Direct-only sets with short walks stay short.
        let c = candidates(&[], &[35.5, 40.5]);
        assert_eq!(representative_duration(&c), Some(38));
    }

    #[test]
    fn empty_groups_yield_none() {
        assert_eq!(representative_duration(&TransitCandidates::default()), None);
    }

    proptest! {
        /// The trimmed average always lies within the input range.
        #[test]
        fn average_within_bounds(values in prop::collection::vec(0.0f64..100_000.0, 1..50)) {
            let avg = trimmed_average(&values).unwrap();
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(avg >= min - 1e-6);
            prop_assert!(avg <= max + 1e-6);
        }

        /// Trimming never raises the average above the untrimmed mean.
        #[test]
        fn trimming_never_increases_average(values in prop::collection::vec(0.0f64..100_000.0, 1..50)) {
            let avg = trimmed_average(&values).unwrap();
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            prop_assert!(avg <= mean + 1e-6);
        }

        /// The representative duration never exceeds either group's own.
        #[test]
        fn representative_not_above_either_group(
            routed in prop::collection::vec(0.0f64..100_000.0, 1..20),
            direct in prop::collection::vec(0.0f64..100_000.0, 1..5),
        ) {
            let c = TransitCandidates { itineraries: routed.clone(), direct: direct.clone() };
            let rep = representative_duration(&c).unwrap();
            let only_routed = representative_duration(&TransitCandidates { itineraries: routed, direct: vec![] }).unwrap();
            let only_direct = representative_duration(&TransitCandidates { itineraries: vec![], direct }).unwrap();
            prop_assert!(rep <= only_routed);
            prop_assert!(rep <= only_direct);
        }
    }
}
