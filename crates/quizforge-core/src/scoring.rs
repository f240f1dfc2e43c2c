//! Answer evaluation and percentage scoring.

use std::collections::BTreeSet;

/// Exact-match comparison between a submitted selection and a question's
/// correct set.
///
/// There is no partial credit: a multi-select question only scores when the
/// solver picks precisely the correct options and no others. Subsets and
/// supersets both fail.
pub fn is_correct(selected: &BTreeSet<usize>, correct: &BTreeSet<usize>) -> bool {
    selected == correct
}

/// Score as a percentage of the question count.
///
/// A zero-question quiz is defined as 0%, never a division error.
pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn exact_match_only() {
        let correct = set(&[1, 3]);
        assert!(is_correct(&set(&[1, 3]), &correct));
        assert!(!is_correct(&set(&[1]), &correct));
        assert!(!is_correct(&set(&[1, 2, 3]), &correct));
        assert!(!is_correct(&set(&[]), &correct));
    }

    #[test]
    fn empty_correct_set_requires_empty_selection() {
        let correct = set(&[]);
        assert!(is_correct(&set(&[]), &correct));
        assert!(!is_correct(&set(&[0]), &correct));
    }

    #[test]
    fn percentage_of_full_and_partial_scores() {
        assert!((percentage(3, 3) - 100.0).abs() < f64::EPSILON);
        assert!((percentage(1, 4) - 25.0).abs() < f64::EPSILON);
        assert!((percentage(2, 3) - 66.666).abs() < 0.001);
    }

    #[test]
    fn percentage_zero_total_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
    }
}
