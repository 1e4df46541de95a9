// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::{
    ensure, ensure_positive, opt_date, opt_decimal, opt_string, render_list, required, Money,
};
use crate::context::DataContext;
use crate::db::Medium;
use crate::formulas::{bill_summary, is_overdue};
use crate::models::{BillPatch, BillStatus, NewBill};
use crate::utils::{format_date, format_days_until, parse_date, parse_decimal, today, DateStyle};

pub fn handle<M: Medium>(ctx: &mut DataContext<M>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("update", sub)) => update(ctx, sub)?,
        Some(("pay", sub)) => pay(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let name = required(sub, "name")?.to_string();
    let amount = parse_decimal(required(sub, "amount")?)?;
    ensure(!name.trim().is_empty(), || "Bill name is required".into())?;
    ensure_positive(amount, "Bill amount")?;

    let bill = ctx
        .add_bill(NewBill {
            name,
            amount,
            due_date: parse_date(required(sub, "due")?)?,
            category: required(sub, "category")?.to_string(),
            auto_pay: sub.get_flag("auto-pay"),
        })
        .context("Failed to add bill")?;
    println!(
        "Added bill '{}' due {} (id: {})",
        bill.name,
        format_date(bill.due_date, DateStyle::Medium),
        bill.id
    );
    Ok(())
}

fn list<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let now = today();
    let only_overdue = sub.get_flag("overdue");
    let mut bills: Vec<_> = ctx
        .bills()
        .iter()
        .filter(|b| !only_overdue || is_overdue(b, now))
        .collect();
    // Soonest first unless the caller sorts.
    bills.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    render_list(
        sub,
        bills,
        &["ID", "Name", "Category", "Amount", "Due", "When", "Status", "Auto"],
        |b| {
            let when = if b.status == BillStatus::Pending {
                format_days_until(b.due_date, now)
            } else {
                String::new()
            };
            vec![
                b.id.clone(),
                b.name.clone(),
                b.category.clone(),
                money.fmt(b.amount),
                format_date(b.due_date, DateStyle::Medium),
                when,
                b.status.as_str().to_string(),
                if b.auto_pay { "yes".into() } else { String::new() },
            ]
        },
    )?;
    if !sub.get_flag("json") && !sub.get_flag("jsonl") {
        let s = bill_summary(ctx.bills(), now);
        println!(
            "{} pending, {} paid, {} on autopay, {} overdue; total {}",
            s.pending,
            s.paid,
            s.autopay,
            s.overdue,
            money.fmt(s.total)
        );
    }
    Ok(())
}

fn update<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let amount = opt_decimal(sub, "amount")?;
    if let Some(a) = amount {
        ensure_positive(a, "Bill amount")?;
    }
    let patch = BillPatch {
        name: opt_string(sub, "name"),
        amount,
        due_date: opt_date(sub, "due")?,
        category: opt_string(sub, "category"),
        auto_pay: sub.get_one::<bool>("auto-pay").copied(),
    };
    let bill = ctx
        .update_bill(id, patch)
        .with_context(|| format!("Failed to update bill {}", id))?;
    println!("Updated bill '{}'", bill.name);
    Ok(())
}

fn pay<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let bill = ctx
        .pay_bill(id)
        .with_context(|| format!("Failed to pay bill {}", id))?;
    println!(
        "Bill '{}' marked {} ({})",
        bill.name,
        bill.status.as_str(),
        Money::of(ctx).fmt(bill.amount)
    );
    Ok(())
}
