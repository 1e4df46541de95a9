// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bills;
pub mod budgets;
pub mod cards;
pub mod credit;
pub mod debts;
pub mod exporter;
pub mod investments;
pub mod prefs;
pub mod profile;
pub mod savings;
pub mod summary;
pub mod transactions;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ArgMatches;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::context::DataContext;
use crate::db::{Medium, Preferences};
use crate::error::StoreError;
use crate::utils::{
    format_currency, maybe_print_json, parse_date, parse_decimal, pretty_table, sort_by,
    SortCriterion, SortKey,
};

pub(crate) fn required<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing --{}", name))
}

pub(crate) fn opt_string(m: &ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name).cloned()
}

pub(crate) fn opt_decimal(m: &ArgMatches, name: &str) -> Result<Option<Decimal>> {
    m.get_one::<String>(name)
        .map(|s| parse_decimal(s))
        .transpose()
}

pub(crate) fn opt_date(m: &ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    m.get_one::<String>(name).map(|s| parse_date(s)).transpose()
}

/// Rejects input before it reaches the store.
pub(crate) fn ensure(ok: bool, msg: impl FnOnce() -> String) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(StoreError::Validation(msg()).into())
    }
}

pub(crate) fn ensure_positive(value: Decimal, what: &str) -> Result<()> {
    ensure(value > Decimal::ZERO, || format!("{} must be greater than 0", what))
}

pub(crate) fn ensure_non_negative(value: Decimal, what: &str) -> Result<()> {
    ensure(value >= Decimal::ZERO, || format!("{} cannot be negative", what))
}

/// Stored display preferences, or the defaults if they cannot be read.
pub(crate) fn preferences<M: Medium>(ctx: &DataContext<M>) -> Preferences {
    ctx.store().preferences().unwrap_or_else(|e| {
        warn!(error = %e, "could not read preferences, using defaults");
        Preferences::default()
    })
}

pub(crate) struct Money(Preferences);

impl Money {
    pub(crate) fn of<M: Medium>(ctx: &DataContext<M>) -> Self {
        Self(preferences(ctx))
    }

    pub(crate) fn fmt(&self, amount: Decimal) -> String {
        format_currency(amount, &self.0.locale, &self.0.currency)
    }
}

fn sort_criteria(m: &ArgMatches) -> Result<Vec<SortCriterion>> {
    match m.get_many::<String>("sort") {
        Some(vals) => vals.map(|s| s.parse()).collect(),
        None => Ok(Vec::new()),
    }
}

/// Shared tail of every `list` command: sort, then JSON or a table.
pub(crate) fn render_list<T, F>(
    m: &ArgMatches,
    mut items: Vec<T>,
    headers: &[&str],
    row: F,
) -> Result<()>
where
    T: Serialize + SortKey,
    F: Fn(&T) -> Vec<String>,
{
    let criteria = sort_criteria(m)?;
    if !criteria.is_empty() {
        sort_by(&mut items, &criteria);
    }
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &items)? {
        let rows: Vec<Vec<String>> = items.iter().map(row).collect();
        println!("{}", pretty_table(headers, rows));
    }
    Ok(())
}
