// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;

use super::{
    ensure, ensure_non_negative, ensure_positive, opt_date, opt_decimal, opt_string, render_list,
    required, Money,
};
use crate::context::DataContext;
use crate::db::Medium;
use crate::formulas::{
    calculate_debt_payoff_time, debt_paid_off, debt_summary, order_debts, DebtStrategy, PayoffTime,
};
use crate::models::{Debt, DebtPatch, NewDebt};
use crate::utils::{
    format_date, maybe_print_json, parse_date, parse_decimal, pretty_table, DateStyle,
};

pub fn handle<M: Medium>(ctx: &mut DataContext<M>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("update", sub)) => update(ctx, sub)?,
        Some(("plan", sub)) => plan(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn payoff_label(p: Option<PayoffTime>) -> String {
    match p {
        None => "never at minimum".to_string(),
        Some(p) if p.years > 0 => format!("{}y {}m", p.years, p.remaining_months),
        Some(p) => format!("{} months", p.months),
    }
}

fn payoff(d: &Debt) -> Option<PayoffTime> {
    calculate_debt_payoff_time(d.balance, d.minimum_payment, d.interest_rate)
}

fn add<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let name = required(sub, "name")?.to_string();
    let balance = parse_decimal(required(sub, "balance")?)?;
    let original_balance = opt_decimal(sub, "original")?.unwrap_or(balance);
    let interest_rate = parse_decimal(required(sub, "rate")?)?;
    let minimum_payment = parse_decimal(required(sub, "min")?)?;
    ensure(!name.trim().is_empty(), || "Debt name is required".into())?;
    ensure_non_negative(balance, "Balance")?;
    ensure_non_negative(interest_rate, "Interest rate")?;
    ensure_positive(minimum_payment, "Minimum payment")?;

    let debt = ctx
        .add_debt(NewDebt {
            name,
            r#type: required(sub, "type")?.to_string(),
            balance,
            original_balance,
            interest_rate,
            minimum_payment,
            due_date: parse_date(required(sub, "due")?)?,
            lender: required(sub, "lender")?.to_string(),
            notes: required(sub, "notes")?.to_string(),
        })
        .context("Failed to add debt")?;
    println!(
        "Added debt '{}' (payoff: {}) (id: {})",
        debt.name,
        payoff_label(payoff(&debt)),
        debt.id
    );
    Ok(())
}

fn list<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let debts: Vec<_> = ctx.debts().iter().collect();
    render_list(
        sub,
        debts,
        &["ID", "Name", "Type", "Lender", "Balance", "Rate", "Minimum", "Due", "Paid off"],
        |d| {
            vec![
                d.id.clone(),
                d.name.clone(),
                d.r#type.clone(),
                d.lender.clone(),
                money.fmt(d.balance),
                format!("{}%", d.interest_rate),
                money.fmt(d.minimum_payment),
                format_date(d.due_date, DateStyle::Medium),
                format!("{:.0}%", debt_paid_off(d)),
            ]
        },
    )?;
    if !sub.get_flag("json") && !sub.get_flag("jsonl") {
        let s = debt_summary(ctx.debts());
        println!(
            "Total {} | minimum {}/month | average rate {:.2}% | {:.1}% paid off",
            money.fmt(s.total_balance),
            money.fmt(s.total_minimum_payment),
            s.average_interest_rate,
            s.progress
        );
    }
    Ok(())
}

fn update<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let balance = opt_decimal(sub, "balance")?;
    let interest_rate = opt_decimal(sub, "rate")?;
    let minimum_payment = opt_decimal(sub, "min")?;
    if let Some(b) = balance {
        ensure_non_negative(b, "Balance")?;
    }
    if let Some(r) = interest_rate {
        ensure_non_negative(r, "Interest rate")?;
    }
    if let Some(p) = minimum_payment {
        ensure_positive(p, "Minimum payment")?;
    }
    let patch = DebtPatch {
        name: opt_string(sub, "name"),
        r#type: opt_string(sub, "type"),
        balance,
        original_balance: opt_decimal(sub, "original")?,
        interest_rate,
        minimum_payment,
        due_date: opt_date(sub, "due")?,
        lender: opt_string(sub, "lender"),
        notes: opt_string(sub, "notes"),
    };
    let debt = ctx
        .update_debt(id, patch)
        .with_context(|| format!("Failed to update debt {}", id))?;
    println!("Updated debt '{}'", debt.name);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanRow<'a> {
    order: usize,
    #[serde(flatten)]
    debt: &'a Debt,
    payoff: Option<PayoffTime>,
}

fn plan<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let strategy = required(sub, "strategy")?
        .parse::<DebtStrategy>()
        .map_err(anyhow::Error::msg)?;
    let ordered = order_debts(ctx.debts(), strategy);
    let plan: Vec<PlanRow> = ordered
        .into_iter()
        .enumerate()
        .map(|(i, debt)| PlanRow {
            order: i + 1,
            debt,
            payoff: payoff(debt),
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &plan)? {
        return Ok(());
    }

    let money = Money::of(ctx);
    println!("{}: {}", strategy.title(), strategy.description());
    let rows: Vec<Vec<String>> = plan
        .iter()
        .map(|r| {
            vec![
                r.order.to_string(),
                r.debt.name.clone(),
                money.fmt(r.debt.balance),
                format!("{}%", r.debt.interest_rate),
                money.fmt(r.debt.minimum_payment),
                format_date(r.debt.due_date, DateStyle::Medium),
                payoff_label(r.payoff),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["#", "Debt", "Balance", "Rate", "Minimum", "Due", "Payoff"],
            rows
        )
    );
    Ok(())
}
