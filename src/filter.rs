// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::RangeError;
use crate::models::Transaction;

/// Anything with a point in time the dashboard can filter on.
pub trait Dated {
    fn date(&self) -> NaiveDateTime;
}

impl Dated for Transaction {
    fn date(&self) -> NaiveDateTime {
        self.date
    }
}

/// Inclusive calendar-day range. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, RangeError> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(RangeError { from: f, to: t });
            }
        }
        Ok(DateRange { from, to })
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.from.map(|d| d.and_time(NaiveTime::MIN))
    }

    /// `to` pushed to 23:59:59.999 so same-day records are included.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.to.and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let after_start = self.start().is_none_or(|s| at >= s);
        let before_end = self.end().is_none_or(|e| at <= e);
        after_start && before_end
    }
}

/// Keep the records dated inside `range`. With no range, everything is kept.
pub fn filter_by_range<T: Dated + Clone>(records: &[T], range: Option<&DateRange>) -> Vec<T> {
    match range {
        None => records.to_vec(),
        Some(r) => records
            .iter()
            .filter(|rec| r.contains(rec.date()))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_bound_covers_whole_day() {
        let r = DateRange::new(None, Some(day(2023, 6, 15))).unwrap();
        let late = day(2023, 6, 15).and_hms_opt(22, 0, 0).unwrap();
        let next = day(2023, 6, 16).and_hms_opt(0, 0, 0).unwrap();
        assert!(r.contains(late));
        assert!(!r.contains(next));
    }

    #[test]
    fn start_bound_is_inclusive() {
        let r = DateRange::new(Some(day(2023, 6, 1)), None).unwrap();
        assert!(r.contains(day(2023, 6, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(!r.contains(day(2023, 5, 31).and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = DateRange::new(Some(day(2023, 7, 1)), Some(day(2023, 6, 1))).unwrap_err();
        assert_eq!(err.from, day(2023, 7, 1));
    }
}
