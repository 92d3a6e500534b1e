mod common;
use chrono::NaiveDate;
use common::*;
use multicalc::mach::{age, difference, parse_date, Event, Input, Mode, Runtime};

fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

#[test]
fn test_age_borrows() {
    let a = age(date("2000-06-15"), date("2024-06-14"));
    assert_eq!((a.years, a.months, a.days), (23, 11, 30));
    let a = age(date("2000-06-15"), date("2024-06-15"));
    assert_eq!(a.to_string(), "24y 0m 0d");
    let a = age(date("2000-01-15"), date("2024-03-10"));
    assert_eq!(a.to_string(), "24y 1m 24d");
}

#[test]
fn test_difference_approximations() {
    let diff = difference(date("2024-01-01"), date("2025-01-01"));
    assert_eq!(diff.to_string(), "366d | 12m | 1y");
    let diff = difference(date("2024-06-14"), date("2024-06-01"));
    assert_eq!((diff.days, diff.months, diff.years), (13, 0, 0));
}

#[test]
fn test_difference_in_date_mode() {
    let mut r = Runtime::default();
    r.enter(Input::SetMode(Mode::Date));
    press(&mut r, ":start=2024-01-01 :end=2024-12-31 :diff");
    assert_eq!(r.display(), "365d | 11m | 0y");
}

#[test]
fn test_missing_field_is_noop() {
    let mut r = Runtime::default();
    press(&mut r, ":date :start=2024-01-01");
    assert_eq!(press(&mut r, ":diff"), vec![Event::Ignored]);
    assert_eq!(press(&mut r, ":age"), vec![Event::Ignored]);
    assert_eq!(r.display(), "0");
}

#[test]
fn test_unparsable_field_is_error() {
    let mut r = Runtime::default();
    press(&mut r, ":date :birth=2000-13-01");
    let events = press(&mut r, ":age");
    assert!(matches!(events[0], Event::Failed(_)));
    assert_eq!(r.display(), "Error");
    assert!(r.history().is_empty());
}

#[test]
fn test_date_inputs_need_date_mode() {
    let mut r = Runtime::default();
    assert_eq!(press(&mut r, ":start=2024-01-01"), vec![Event::Ignored]);
    assert_eq!(r.dates(), ("", "", ""));
}
