// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::{
    ensure, ensure_non_negative, ensure_positive, opt_date, opt_decimal, opt_string, render_list,
    required, Money,
};
use crate::context::DataContext;
use crate::db::Medium;
use crate::formulas::{days_remaining, overall_savings_progress, savings_progress};
use crate::models::{NewSavingsGoal, SavingsGoalPatch};
use crate::utils::{format_date, parse_date, parse_decimal, today, DateStyle};

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
    let target_amount = parse_decimal(required(sub, "target")?)?;
    let current_amount = opt_decimal(sub, "current")?;
    ensure(!name.trim().is_empty(), || "Goal name is required".into())?;
    ensure_positive(target_amount, "Target amount")?;
    if let Some(c) = current_amount {
        ensure_non_negative(c, "Current amount")?;
    }

    let goal = ctx
        .add_savings_goal(NewSavingsGoal {
            name,
            target_amount,
            current_amount,
            target_date: parse_date(required(sub, "date")?)?,
        })
        .context("Failed to add savings goal")?;
    println!(
        "Added goal '{}' ({}% of {}) (id: {})",
        goal.name,
        savings_progress(&goal),
        Money::of(ctx).fmt(goal.target_amount),
        goal.id
    );
    Ok(())
}

fn list<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let now = today();
    let goals: Vec<_> = ctx.savings_goals().iter().collect();
    render_list(
        sub,
        goals,
        &["ID", "Name", "Saved", "Target", "Progress", "Target date", "Days left"],
        |g| {
            vec![
                g.id.clone(),
                g.name.clone(),
                money.fmt(g.current_amount),
                money.fmt(g.target_amount),
                format!("{}%", savings_progress(g)),
                format_date(g.target_date, DateStyle::Medium),
                days_remaining(g, now).to_string(),
            ]
        },
    )?;
    if !sub.get_flag("json") && !sub.get_flag("jsonl") {
        println!(
            "Overall progress: {:.1}%",
            overall_savings_progress(ctx.savings_goals())
        );
    }
    Ok(())
}

fn update<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let target_amount = opt_decimal(sub, "target")?;
    let current_amount = opt_decimal(sub, "current")?;
    if let Some(t) = target_amount {
        ensure_positive(t, "Target amount")?;
    }
    if let Some(c) = current_amount {
        ensure_non_negative(c, "Current amount")?;
    }
    let patch = SavingsGoalPatch {
        name: opt_string(sub, "name"),
        target_amount,
        current_amount,
        target_date: opt_date(sub, "date")?,
    };
    let goal = ctx
        .update_savings_goal(id, patch)
        .with_context(|| format!("Failed to update savings goal {}", id))?;
    println!("Updated goal '{}' ({}%)", goal.name, savings_progress(&goal));
    Ok(())
}
