// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;
use rust_decimal::Decimal;

use super::{ensure, opt_string, preferences};
use crate::context::DataContext;
use crate::db::Medium;
use crate::utils::{format_currency, SUPPORTED_LOCALES};

pub fn handle<M: Medium>(ctx: &DataContext<M>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(ctx),
        Some(("set", sub)) => set(ctx, sub),
        _ => Ok(()),
    }
}

fn show<M: Medium>(ctx: &DataContext<M>) -> Result<()> {
    let p = preferences(ctx);
    println!("locale:   {}", p.locale);
    println!("currency: {}", p.currency);
    println!(
        "sample:   {}",
        format_currency(Decimal::new(123456789, 2), &p.locale, &p.currency)
    );
    Ok(())
}

fn set<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let mut p = preferences(ctx);
    if let Some(locale) = opt_string(sub, "locale") {
        ensure(SUPPORTED_LOCALES.iter().any(|l| *l == locale), || {
            format!(
                "Unsupported locale '{}' (use one of {})",
                locale,
                SUPPORTED_LOCALES.join(", ")
            )
        })?;
        p.locale = locale;
    }
    if let Some(currency) = opt_string(sub, "currency") {
        let code = currency.trim().to_uppercase();
        ensure(
            code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()),
            || format!("Currency '{}' must be a 3-letter code", currency),
        )?;
        p.currency = code;
    }
    ctx.store()
        .set_preferences(&p)
        .context("Failed to save preferences")?;
    println!("Preferences saved: {} / {}", p.locale, p.currency);
    Ok(())
}
