// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::utils::*;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn currency_per_locale() {
    assert_eq!(format_currency(d("1234.5"), "en-US", "USD"), "$1,234.50");
    assert_eq!(format_currency(d("1234.5"), "en-GB", "GBP"), "£1,234.50");
    assert_eq!(
        format_currency(d("1234.5"), "de-DE", "EUR"),
        "1.234,50\u{a0}€"
    );
    assert_eq!(
        format_currency(d("1234567.891"), "en-IN", "INR"),
        "₹12,34,567.89"
    );
    // Spanish only groups from five integer digits.
    assert_eq!(format_currency(d("1234.5"), "es-ES", "EUR"), "1234,50\u{a0}€");
    assert_eq!(
        format_currency(d("12345"), "es-ES", "EUR"),
        "12.345,00\u{a0}€"
    );
}

#[test]
fn currency_edge_cases() {
    assert_eq!(format_currency(d("-5"), "en-US", "USD"), "-$5.00");
    assert_eq!(format_currency(d("0.005"), "en-US", "USD"), "$0.01");
    assert_eq!(format_currency(d("999"), "en-US", "USD"), "$999.00");
    // Unknown locales fall back to en-US, unknown codes print themselves.
    assert_eq!(format_currency(d("1000"), "xx-XX", "USD"), "$1,000.00");
    assert_eq!(format_currency(d("1"), "en-US", "XYZ"), "XYZ\u{a0}1.00");
    assert_eq!(SUPPORTED_LOCALES.len(), 7);
}

#[test]
fn lossy_currency_coerces_garbage_to_zero() {
    assert_eq!(format_currency_lossy("12.5abc", "en-US", "USD"), "$12.50");
    assert_eq!(format_currency_lossy("abc", "en-US", "USD"), "$0.00");
    assert_eq!(format_currency_lossy("", "en-US", "USD"), "$0.00");
}

#[test]
fn date_styles() {
    let day = date("2024-01-05");
    assert_eq!(format_date(day, DateStyle::default()), "Jan 5, 2024");
    assert_eq!(format_date(day, DateStyle::Long), "January 5, 2024");
    assert_eq!(format_date(day, DateStyle::Short), "1/5/2024");
    assert_eq!(format_date(day, DateStyle::Iso), "2024-01-05");
}

#[test]
fn relative_dates() {
    let today = date("2024-03-01");
    let ago = |days: i64| format_relative_date(today - chrono::Duration::days(days), today);
    assert_eq!(ago(0), "Today");
    assert_eq!(ago(1), "Yesterday");
    assert_eq!(ago(6), "6 days ago");
    assert_eq!(ago(7), "1 weeks ago");
    assert_eq!(ago(8), "2 weeks ago");
    assert_eq!(ago(29), "5 weeks ago");
    assert_eq!(ago(30), "1 months ago");
    assert_eq!(ago(364), "13 months ago");
    assert_eq!(ago(365), "1 years ago");
    // Future dates use the absolute distance.
    assert_eq!(ago(-3), "3 days ago");
}

#[test]
fn due_labels() {
    let today = date("2024-02-01");
    assert_eq!(days_until(date("2024-01-30"), today), -2);
    assert_eq!(format_days_until(date("2024-01-30"), today), "Overdue");
    assert_eq!(format_days_until(today, today), "Due today");
    assert_eq!(format_days_until(date("2024-02-02"), today), "Due tomorrow");
    assert_eq!(format_days_until(date("2024-02-05"), today), "Due in 4 days");
    assert_eq!(format_days_until(date("2024-02-11"), today), "Due in 2 weeks");
    assert_eq!(format_days_until(date("2024-04-01"), today), "Due in 2 months");
}

#[test]
fn validators() {
    assert!(is_valid_email("alex.morgan@example.com"));
    assert!(!is_valid_email("alex@example"));
    assert!(!is_valid_email("alex morgan@example.com"));

    assert!(is_valid_card_number("4587"));
    assert!(!is_valid_card_number("458"));
    assert!(!is_valid_card_number("45a7"));

    let today = date("2026-10-19");
    assert!(!is_valid_expiry_date("01/24", today));
    assert!(is_valid_expiry_date("12/99", today));
    assert!(!is_valid_expiry_date("10/26", today));
    assert!(is_valid_expiry_date("11/26", today));
    assert!(!is_valid_expiry_date("13/27", today));
    assert!(!is_valid_expiry_date("1/27", today));
}

#[test]
fn truncation() {
    assert_eq!(truncate_text("Netflix", 10), "Netflix");
    assert_eq!(truncate_text("Netflix Subscription", 7), "Netflix...");
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    name: &'static str,
    amount: Decimal,
}

impl SortKey for Row {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Text(self.name.to_string())),
            "amount" => Some(SortValue::Number(self.amount)),
            _ => None,
        }
    }
}

fn rows() -> Vec<Row> {
    vec![
        Row { name: "beta", amount: d("10") },
        Row { name: "Alpha", amount: d("20") },
        Row { name: "gamma", amount: d("10") },
        Row { name: "alpha", amount: d("5") },
    ]
}

#[test]
fn sort_by_is_stable_and_case_insensitive() {
    let mut v = rows();
    sort_by(&mut v, &[SortCriterion::asc("name")]);
    let names: Vec<_> = v.iter().map(|r| r.name).collect();
    assert_eq!(names, ["Alpha", "alpha", "beta", "gamma"]);

    let mut v = rows();
    let criteria: Vec<SortCriterion> = vec!["amount:desc".parse().unwrap(), "name".parse().unwrap()];
    sort_by(&mut v, &criteria);
    let names: Vec<_> = v.iter().map(|r| r.name).collect();
    assert_eq!(names, ["Alpha", "beta", "gamma", "alpha"]);

    // Unknown keys leave the order alone.
    let mut v = rows();
    sort_by(&mut v, &[SortCriterion::desc("nope")]);
    assert_eq!(v, rows());
}

#[test]
fn sort_criterion_parsing() {
    assert_eq!(
        "dueDate:DESC".parse::<SortCriterion>().unwrap(),
        SortCriterion::desc("dueDate")
    );
    assert_eq!(
        "balance".parse::<SortCriterion>().unwrap(),
        SortCriterion::asc("balance")
    );
    assert!("balance:sideways".parse::<SortCriterion>().is_err());
    assert!(":desc".parse::<SortCriterion>().is_err());
}

#[test]
fn group_by_keeps_order_inside_groups() {
    let groups = group_by(rows(), |r| r.amount);
    assert_eq!(groups.len(), 3);
    let tens: Vec<_> = groups[&d("10")].iter().map(|r| r.name).collect();
    assert_eq!(tens, ["beta", "gamma"]);
    assert_eq!(groups.keys().next(), Some(&d("5")));
}

#[test]
fn parsers_report_bad_input() {
    assert_eq!(parse_date("2024-02-29").unwrap(), date("2024-02-29"));
    assert!(parse_date("2023-02-29").is_err());
    assert_eq!(parse_decimal(" 12.50 ").unwrap(), d("12.5"));
    assert!(parse_decimal("twelve").is_err());
}
