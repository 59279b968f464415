//! Property-based tests for the Check-out Minimum
//!
//! Tests invariants:
//! - The constrained check-out is never earlier than the day after check-in
//! - A valid check-out on or after the minimum is kept unchanged
//! - Anything that is not a date is replaced by the minimum

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use crate::core::stay::{apply_checkout_min, format_date};

fn date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~50 years.
    (0i64..18_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(days)
    })
}

proptest! {
    #[test]
    fn check_out_never_before_minimum(check_in in date(), offset in -400i64..400) {
        let check_out = check_in + Duration::days(offset);
        let constraint = apply_checkout_min(&format_date(check_in), &format_date(check_out))
            .unwrap();

        prop_assert_eq!(constraint.min, check_in + Duration::days(1));
        prop_assert!(constraint.check_out >= constraint.min);
        if offset >= 1 {
            prop_assert_eq!(constraint.check_out, check_out);
        } else {
            prop_assert_eq!(constraint.check_out, constraint.min);
        }
    }

    #[test]
    fn garbage_check_out_becomes_minimum(check_in in date(), junk in "[a-z ]{0,12}") {
        let constraint = apply_checkout_min(&format_date(check_in), &junk).unwrap();
        prop_assert_eq!(constraint.check_out, constraint.min);
    }

    #[test]
    fn garbage_check_in_changes_nothing(junk in "[a-z ]{0,12}", check_out in date()) {
        prop_assert!(apply_checkout_min(&junk, &format_date(check_out)).is_none());
    }
}
