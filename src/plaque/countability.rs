//! Plate countability check (30–300 plaques).

use crate::domain::{COUNTABLE_MAX, COUNTABLE_MIN, Countability};

/// Classify a plaque (or positive) count. Bounds are inclusive.
pub fn classify_count(count: u32) -> Countability {
    if count < COUNTABLE_MIN {
        Countability::TooFew
    } else if count > COUNTABLE_MAX {
        Countability::TooMany
    } else {
        Countability::Acceptable
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Countability::TooFew)]
    #[case(29, Countability::TooFew)]
    #[case(30, Countability::Acceptable)]
    #[case(150, Countability::Acceptable)]
    #[case(300, Countability::Acceptable)]
    #[case(301, Countability::TooMany)]
    #[case(u32::MAX, Countability::TooMany)]
    fn classifies_against_bounds(#[case] count: u32, #[case] expected: Countability) {
        assert_eq!(classify_count(count), expected);
    }

    #[test]
    fn whole_acceptable_range() {
        assert!((30..=300).all(|c| classify_count(c) == Countability::Acceptable));
    }
}
