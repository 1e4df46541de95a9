// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::{
    ensure, ensure_non_negative, ensure_positive, opt_decimal, opt_string, render_list, required,
    Money,
};
use crate::context::DataContext;
use crate::db::Medium;
use crate::formulas::{budget_summary, budget_usage};
use crate::models::{BudgetPatch, NewBudget};
use crate::utils::parse_decimal;

pub fn handle<M: Medium>(ctx: &mut DataContext<M>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("update", sub)) => update(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let name = required(sub, "name")?.to_string();
    let amount = parse_decimal(required(sub, "amount")?)?;
    ensure(!name.trim().is_empty(), || "Budget name is required".into())?;
    ensure_positive(amount, "Budget amount")?;

    let budget = ctx
        .add_budget(NewBudget {
            name,
            amount,
            category: required(sub, "category")?.to_string(),
            period: required(sub, "period")?.to_string(),
        })
        .context("Failed to add budget")?;
    println!(
        "Budget '{}' set to {} {}",
        budget.name,
        Money::of(ctx).fmt(budget.amount),
        budget.period
    );
    Ok(())
}

fn list<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let budgets: Vec<_> = ctx.budgets().iter().collect();
    render_list(
        sub,
        budgets,
        &["ID", "Name", "Category", "Period", "Budget", "Spent", "Remaining", "Used"],
        |b| {
            vec![
                b.id.clone(),
                b.name.clone(),
                b.category.clone(),
                b.period.clone(),
                money.fmt(b.amount),
                money.fmt(b.spent),
                money.fmt(b.amount - b.spent),
                format!("{}%", budget_usage(b)),
            ]
        },
    )?;
    if !sub.get_flag("json") && !sub.get_flag("jsonl") {
        let s = budget_summary(ctx.budgets());
        println!(
            "Total: {} of {} spent ({}%)",
            money.fmt(s.total_spent),
            money.fmt(s.total_budget),
            s.percentage
        );
    }
    Ok(())
}

fn update<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let amount = opt_decimal(sub, "amount")?;
    let spent = opt_decimal(sub, "spent")?;
    if let Some(a) = amount {
        ensure_positive(a, "Budget amount")?;
    }
    if let Some(s) = spent {
        ensure_non_negative(s, "Spent")?;
    }
    let patch = BudgetPatch {
        name: opt_string(sub, "name"),
        amount,
        spent,
        category: opt_string(sub, "category"),
        period: opt_string(sub, "period"),
    };
    let budget = ctx
        .update_budget(id, patch)
        .with_context(|| format!("Failed to update budget {}", id))?;
    println!("Updated budget '{}' ({}% used)", budget.name, budget_usage(&budget));
    Ok(())
}
