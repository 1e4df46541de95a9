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
use crate::formulas::{calculate_percentage, portfolio_summary};
use crate::models::{InvestmentPatch, NewInvestment};
use crate::utils::{parse_decimal, pretty_table};

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
    let symbol = required(sub, "symbol")?.trim().to_uppercase();
    let shares = parse_decimal(required(sub, "shares")?)?;
    let current_value = parse_decimal(required(sub, "value")?)?;
    let purchase_price = parse_decimal(required(sub, "cost")?)?;
    ensure(!name.trim().is_empty(), || "Holding name is required".into())?;
    ensure(!symbol.is_empty(), || "Symbol is required".into())?;
    ensure_positive(shares, "Shares")?;
    ensure_non_negative(current_value, "Current value")?;
    ensure_non_negative(purchase_price, "Purchase price")?;

    let inv = ctx
        .add_investment(NewInvestment {
            name,
            symbol,
            shares,
            current_value,
            purchase_price,
            asset_type: required(sub, "asset-type")?.to_string(),
        })
        .context("Failed to add investment")?;
    println!("Added {} '{}' (id: {})", inv.symbol, inv.name, inv.id);
    Ok(())
}

fn list<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let holdings: Vec<_> = ctx.investments().iter().collect();
    render_list(
        sub,
        holdings,
        &["ID", "Symbol", "Name", "Type", "Shares", "Value", "Cost", "Return"],
        |i| {
            let gain = i.current_value - i.purchase_price;
            vec![
                i.id.clone(),
                i.symbol.clone(),
                i.name.clone(),
                i.asset_type.clone(),
                i.shares.normalize().to_string(),
                money.fmt(i.current_value),
                money.fmt(i.purchase_price),
                format!(
                    "{} ({}%)",
                    money.fmt(gain),
                    calculate_percentage(gain, i.purchase_price)
                ),
            ]
        },
    )?;
    if sub.get_flag("json") || sub.get_flag("jsonl") {
        return Ok(());
    }

    let s = portfolio_summary(ctx.investments());
    println!(
        "Portfolio: {} (cost {}, return {} / {:.2}%)",
        money.fmt(s.total_value),
        money.fmt(s.total_cost),
        money.fmt(s.total_return),
        s.return_percentage
    );
    let rows: Vec<Vec<String>> = s
        .allocation
        .iter()
        .map(|a| {
            vec![
                a.asset_type.clone(),
                money.fmt(a.value),
                format!("{}%", a.percentage),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Asset type", "Value", "Share"], rows));
    Ok(())
}

fn update<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let shares = opt_decimal(sub, "shares")?;
    if let Some(s) = shares {
        ensure_positive(s, "Shares")?;
    }
    let patch = InvestmentPatch {
        name: opt_string(sub, "name"),
        symbol: opt_string(sub, "symbol").map(|s| s.trim().to_uppercase()),
        shares,
        current_value: opt_decimal(sub, "value")?,
        purchase_price: opt_decimal(sub, "cost")?,
        asset_type: opt_string(sub, "asset-type"),
    };
    let inv = ctx
        .update_investment(id, patch)
        .with_context(|| format!("Failed to update investment {}", id))?;
    println!("Updated {} '{}'", inv.symbol, inv.name);
    Ok(())
}
