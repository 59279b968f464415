//! Check-in / check-out date constraint.
//!
//! Check-out must be at least the day after check-in.

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Constraint derived from a committed check-in value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConstraint {
    /// Earliest allowed check-out.
    pub min: NaiveDate,
    /// Check-out value after the constraint was applied.
    pub check_out: NaiveDate,
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Apply the check-out minimum for `check_in`.
///
/// Returns `None` when check-in is empty or not a date; nothing changes in
/// that case. A missing, unparseable or too-early check-out is replaced by
/// the minimum.
pub fn apply_checkout_min(check_in: &str, check_out: &str) -> Option<CheckoutConstraint> {
    let min = parse_date(check_in)?.succ_opt()?;
    let check_out = match parse_date(check_out) {
        Some(date) if date >= min => date,
        _ => min,
    };
    Some(CheckoutConstraint { min, check_out })
}
