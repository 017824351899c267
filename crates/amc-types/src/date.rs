//! Day-count dates.
//!
//! `date_added` and `date_watched` are stored as whole days since
//! 1899-12-30, the epoch of the Delphi `TDateTime` type the catalog
//! format was written with. Zero therefore means "not set" in practice.

use chrono::{NaiveDate, TimeDelta};

/// Convert a stored day count into a calendar date.
///
/// Returns `None` when the result falls outside the range chrono can
/// represent.
#[must_use]
pub fn delphi_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(TimeDelta::days(days.into()))
}
