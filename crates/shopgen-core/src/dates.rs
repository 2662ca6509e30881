use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Format used for every date written to CSV or SQLite.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Customers sign up at least this many days before the end of the range.
pub const SIGNUP_BUFFER_DAYS: i64 = 365;
/// Orders are placed strictly after `signup_date + ORDER_OFFSET_DAYS`.
pub const ORDER_OFFSET_DAYS: i64 = 1;
/// Reviews are written strictly after `signup_date + REVIEW_OFFSET_DAYS`.
pub const REVIEW_OFFSET_DAYS: i64 = 7;

/// Calendar range a dataset is generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Reject ranges that leave no room for a signup before the one-year buffer.
    pub fn validate(&self) -> Result<()> {
        let span = (self.end - self.start).num_days();
        if span <= SIGNUP_BUFFER_DAYS {
            return Err(Error::InvalidRange(format!(
                "range {} to {} spans {span} days; more than {SIGNUP_BUFFER_DAYS} are required",
                self.start.format(DATE_FORMAT),
                self.end.format(DATE_FORMAT),
            )));
        }
        Ok(())
    }

    /// Half-open window `[start, end - 365 days)` customers sign up in.
    pub fn signup_window(&self) -> Result<DayWindow> {
        self.validate()?;
        DayWindow::half_open(
            self.start,
            self.end - chrono::Duration::days(SIGNUP_BUFFER_DAYS),
        )
    }

    /// Window `(signup + 1 day, end]` a customer's orders fall in.
    pub fn order_window(&self, signup_date: NaiveDate) -> Result<DayWindow> {
        DayWindow::open_closed(signup_date + chrono::Duration::days(ORDER_OFFSET_DAYS), self.end)
    }

    /// Window `(signup + 7 days, end]` a customer's reviews fall in.
    pub fn review_window(&self, signup_date: NaiveDate) -> Result<DayWindow> {
        DayWindow::open_closed(signup_date + chrono::Duration::days(REVIEW_OFFSET_DAYS), self.end)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
        }
    }
}

/// A non-empty run of candidate days, addressed as `base + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    base: NaiveDate,
    first: i64,
    last: i64,
}

impl DayWindow {
    /// Days in `[from, to)`.
    pub fn half_open(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        let span = (to - from).num_days();
        if span <= 0 {
            return Err(empty_window("[", from, to, ")"));
        }
        Ok(Self {
            base: from,
            first: 0,
            last: span - 1,
        })
    }

    /// Days in `(from, to]`.
    pub fn open_closed(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        let span = (to - from).num_days();
        if span <= 0 {
            return Err(empty_window("(", from, to, "]"));
        }
        Ok(Self {
            base: from,
            first: 1,
            last: span,
        })
    }

    /// Offsets valid for [`DayWindow::date_at`].
    pub fn offsets(&self) -> std::ops::RangeInclusive<i64> {
        self.first..=self.last
    }

    pub fn date_at(&self, offset: i64) -> NaiveDate {
        self.base + chrono::Duration::days(offset)
    }

    pub fn first_date(&self) -> NaiveDate {
        self.date_at(self.first)
    }

    pub fn last_date(&self) -> NaiveDate {
        self.date_at(self.last)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_date() && date <= self.last_date()
    }

    pub fn day_count(&self) -> u64 {
        (self.last - self.first + 1) as u64
    }
}

fn empty_window(open: &str, from: NaiveDate, to: NaiveDate, close: &str) -> Error {
    Error::InvalidRange(format!(
        "window {open}{}, {}{close} contains no days",
        from.format(DATE_FORMAT),
        to.format(DATE_FORMAT),
    ))
}
