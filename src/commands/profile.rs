// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::{ensure, ensure_non_negative, opt_decimal, opt_string, Money};
use crate::context::DataContext;
use crate::db::Medium;
use crate::formulas::CreditScoreLevel;
use crate::models::ProfilePatch;
use crate::utils::{is_valid_email, maybe_print_json, pretty_table};

pub fn handle<M: Medium>(ctx: &mut DataContext<M>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("update", sub)) => update(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn show<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let Some(p) = ctx.user_profile() else {
        println!("No profile yet. Run `fintrack profile update` or `fintrack init`.");
        return Ok(());
    };
    if maybe_print_json(sub.get_flag("json"), false, p)? {
        return Ok(());
    }
    let money = Money::of(ctx);
    let rows = vec![
        vec!["Name".to_string(), p.name.clone()],
        vec!["Email".to_string(), p.email.clone()],
        vec!["Total balance".to_string(), money.fmt(p.total_balance)],
        vec!["Monthly income".to_string(), money.fmt(p.monthly_income)],
        vec!["Monthly expenses".to_string(), money.fmt(p.monthly_expenses)],
        vec![
            "Credit score".to_string(),
            format!(
                "{} ({})",
                p.credit_score,
                CreditScoreLevel::from_score(p.credit_score).label()
            ),
        ],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}

fn update<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let email = opt_string(sub, "email");
    if let Some(e) = &email {
        ensure(is_valid_email(e), || format!("Invalid email address '{}'", e))?;
    }
    let credit_score = sub.get_one::<u32>("credit-score").copied();
    if let Some(s) = credit_score {
        ensure((300..=850).contains(&s), || {
            format!("Credit score {} is outside 300-850", s)
        })?;
    }
    let monthly_income = opt_decimal(sub, "income")?;
    let monthly_expenses = opt_decimal(sub, "expenses")?;
    if let Some(v) = monthly_income {
        ensure_non_negative(v, "Monthly income")?;
    }
    if let Some(v) = monthly_expenses {
        ensure_non_negative(v, "Monthly expenses")?;
    }

    let patch = ProfilePatch {
        name: opt_string(sub, "name"),
        email,
        total_balance: opt_decimal(sub, "total-balance")?,
        monthly_income,
        monthly_expenses,
        credit_score,
    };
    let profile = ctx
        .update_profile(patch)
        .context("Failed to update profile")?;
    println!("Profile saved for '{}'", profile.name);
    Ok(())
}
