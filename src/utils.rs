// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Grouping {
    /// Groups of three, only once the integer part has at least `min` digits.
    Thousands { min: usize },
    /// 12,34,567 style: last three digits, then pairs.
    Indian,
}

#[derive(Debug, Clone, Copy)]
struct LocaleFormat {
    group: &'static str,
    decimal: char,
    symbol_after: bool,
    grouping: Grouping,
}

/// Locales with their own number layout; anything else renders as en-US.
pub const SUPPORTED_LOCALES: [&str; 7] =
    ["en-US", "en-GB", "de-DE", "fr-FR", "es-ES", "en-IN", "ja-JP"];

fn locale_format(locale: &str) -> LocaleFormat {
    let thousands = Grouping::Thousands { min: 4 };
    match locale {
        "de-DE" => LocaleFormat {
            group: ".",
            decimal: ',',
            symbol_after: true,
            grouping: thousands,
        },
        "fr-FR" => LocaleFormat {
            group: "\u{202f}",
            decimal: ',',
            symbol_after: true,
            grouping: thousands,
        },
        "es-ES" => LocaleFormat {
            group: ".",
            decimal: ',',
            symbol_after: true,
            grouping: Grouping::Thousands { min: 5 },
        },
        "en-IN" => LocaleFormat {
            group: ",",
            decimal: '.',
            symbol_after: false,
            grouping: Grouping::Indian,
        },
        // en-US, en-GB, ja-JP and anything unrecognised
        _ => LocaleFormat {
            group: ",",
            decimal: '.',
            symbol_after: false,
            grouping: thousands,
        },
    }
}

fn currency_symbol(code: &str) -> String {
    match code.to_uppercase().as_str() {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "INR" => "₹".into(),
        "CAD" => "CA$".into(),
        "AUD" => "A$".into(),
        "CHF" => "CHF".into(),
        other => other.to_string(),
    }
}

fn group_digits(int_part: &str, sep: &str, grouping: Grouping) -> String {
    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::with_capacity(int_part.len() + 4);
    match grouping {
        Grouping::Thousands { min } if digits.len() >= min => {
            for (i, ch) in digits.iter().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push_str(sep);
                }
                out.push(*ch);
            }
        }
        Grouping::Indian if digits.len() > 3 => {
            let head_len = digits.len() - 3;
            for (i, ch) in digits[..head_len].iter().enumerate() {
                if i > 0 && (head_len - i) % 2 == 0 {
                    out.push_str(sep);
                }
                out.push(*ch);
            }
            out.push_str(sep);
            out.extend(&digits[head_len..]);
        }
        _ => out.push_str(int_part),
    }
    out
}

/// Locale-formatted currency string with exactly two fractional digits.
pub fn format_currency(amount: Decimal, locale: &str, currency_code: &str) -> String {
    let fmt = locale_format(locale);
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let number = format!(
        "{}{}{}",
        group_digits(int_part, fmt.group, fmt.grouping),
        fmt.decimal,
        frac_part
    );

    let symbol = currency_symbol(currency_code);
    let spaced = symbol.chars().all(|c| c.is_ascii_alphabetic());
    let body = if fmt.symbol_after {
        format!("{}\u{a0}{}", number, symbol)
    } else if spaced {
        format!("{}\u{a0}{}", symbol, number)
    } else {
        format!("{}{}", symbol, number)
    };
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))").expect("valid regex"));

/// Like [`format_currency`] but accepts raw text; anything non-numeric counts as zero.
pub fn format_currency_lossy(raw: &str, locale: &str, currency_code: &str) -> String {
    let amount = LEADING_NUMBER
        .captures(raw)
        .and_then(|c| c.get(1))
        .and_then(|m| Decimal::from_str(m.as_str().trim_end_matches('.')).ok())
        .unwrap_or(Decimal::ZERO);
    format_currency(amount, locale, currency_code)
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// Jan 5, 2024
    #[default]
    Medium,
    /// January 5, 2024
    Long,
    /// 1/5/2024
    Short,
    /// 2024-01-05
    Iso,
}

pub fn format_date(date: NaiveDate, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Medium => "%b %-d, %Y",
        DateStyle::Long => "%B %-d, %Y",
        DateStyle::Short => "%-m/%-d/%Y",
        DateStyle::Iso => "%Y-%m-%d",
    };
    date.format(pattern).to_string()
}

fn ceil_div(n: i64, d: i64) -> i64 {
    (n + d - 1) / d
}

/// "Today", "Yesterday", "N days ago", ... using the absolute day distance.
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 30 => format!("{} weeks ago", ceil_div(d, 7)),
        d if d < 365 => format!("{} months ago", ceil_div(d, 30)),
        d => format!("{} years ago", ceil_div(d, 365)),
    }
}

/// Signed day count until `date`; negative means the date has passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

pub fn format_days_until(date: NaiveDate, today: NaiveDate) -> String {
    match days_until(date, today) {
        d if d < 0 => "Overdue".to_string(),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d if d < 7 => format!("Due in {} days", d),
        d if d < 30 => format!("Due in {} weeks", ceil_div(d, 7)),
        d => format!("Due in {} months", ceil_div(d, 30)),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static LAST_FOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid regex"));
static EXPIRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Cards are identified by their last four digits only.
pub fn is_valid_card_number(number: &str) -> bool {
    LAST_FOUR.is_match(number)
}

/// MM/YY, strictly after the current month. A card expiring this month is rejected.
pub fn is_valid_expiry_date(expiry: &str, today: NaiveDate) -> bool {
    let Some(caps) = EXPIRY.captures(expiry) else {
        return false;
    };
    let month: u32 = caps[1].parse().unwrap_or(0);
    let year: i32 = 2000 + caps[2].parse::<i32>().unwrap_or(0);
    (year, month) > (today.year(), today.month())
}

pub fn truncate_text(text: &str, len: usize) -> String {
    if text.chars().count() <= len {
        return text.to_string();
    }
    let head: String = text.chars().take(len).collect();
    format!("{}...", head)
}

// ---------------------------------------------------------------------------
// Sorting and grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(Decimal),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

/// Records whose named fields can drive [`sort_by`].
pub trait SortKey {
    fn sort_value(&self, key: &str) -> Option<SortValue>;
}

impl<T: SortKey> SortKey for &T {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        (**self).sort_value(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCriterion {
    pub key: String,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn asc(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SortCriterion {
    type Err = anyhow::Error;

    /// `field` or `field:asc` / `field:desc`.
    fn from_str(s: &str) -> Result<Self> {
        let (key, dir) = match s.trim().split_once(':') {
            Some((k, d)) => (k.trim(), d.trim().to_lowercase()),
            None => (s.trim(), "asc".to_string()),
        };
        if key.is_empty() {
            anyhow::bail!("Empty sort key in '{}'", s);
        }
        let direction = match dir.as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => anyhow::bail!("Invalid sort direction '{}' (use asc|desc)", other),
        };
        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }
}

fn compare_values(a: Option<SortValue>, b: Option<SortValue>) -> Ordering {
    match (a, b) {
        (Some(SortValue::Text(x)), Some(SortValue::Text(y))) => {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        (Some(SortValue::Number(x)), Some(SortValue::Number(y))) => x.cmp(&y),
        (Some(SortValue::Date(x)), Some(SortValue::Date(y))) => x.cmp(&y),
        (Some(SortValue::Timestamp(x)), Some(SortValue::Timestamp(y))) => x.cmp(&y),
        // Missing or mismatched fields never reorder.
        _ => Ordering::Equal,
    }
}

/// Stable multi-key sort; later criteria only break ties of earlier ones.
pub fn sort_by<T: SortKey>(items: &mut [T], criteria: &[SortCriterion]) {
    items.sort_by(|a, b| {
        for c in criteria {
            let ord = compare_values(a.sort_value(&c.key), b.sort_value(&c.key));
            let ord = match c.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

/// Partition by key; members keep their relative order inside each group.
pub fn group_by<I, T, K, F>(items: I, key: F) -> BTreeMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}
