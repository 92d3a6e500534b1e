//! Calendar arithmetic for date mode.
//!
//! [`difference`] and [`age`] deliberately disagree. The difference is three
//! independent approximations of one day count (30.44 days per month,
//! 365.25 days per year) and the figures do not add up to a single span.
//! The age is an exact calendar breakdown with month and year borrows.

use crate::error;
use crate::lang::Error;
use chrono::{Datelike, NaiveDate};

type Result<T> = std::result::Result<T, Error>;

const DAYS_PER_MONTH: f64 = 30.44;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateDifference {
    pub days: i64,
    pub months: i64,
    pub years: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => Err(error!(InvalidExpression; "INVALID DATE")),
    }
}

pub fn difference(start: NaiveDate, end: NaiveDate) -> DateDifference {
    let days = end.signed_duration_since(start).num_days().abs();
    DateDifference {
        days,
        months: (days as f64 / DAYS_PER_MONTH).floor() as i64,
        years: (days as f64 / DAYS_PER_YEAR).floor() as i64,
    }
}

pub fn age(birth: NaiveDate, today: NaiveDate) -> Age {
    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;
    if days < 0 {
        months -= 1;
        days += days_in_previous_month(today);
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }
    Age {
        years,
        months,
        days,
    }
}

fn days_in_previous_month(date: NaiveDate) -> i32 {
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day() as i32)
        .unwrap_or(31)
}

impl std::fmt::Display for DateDifference {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}d | {}m | {}y", self.days, self.months, self.years)
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}y {}m {}d", self.years, self.months, self.days)
    }
}
