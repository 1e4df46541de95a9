// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::{ensure, ensure_positive, opt_date, opt_string, render_list, required, Money};
use crate::context::DataContext;
use crate::db::Medium;
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::utils::{format_relative_date, parse_decimal, today};

pub fn handle<M: Medium>(ctx: &mut DataContext<M>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let card_id = required(sub, "card")?.to_string();
    let description = required(sub, "description")?.to_string();
    let amount = parse_decimal(required(sub, "amount")?)?;
    let category = required(sub, "category")?.to_string();
    let r#type = required(sub, "type")?
        .parse::<TransactionType>()
        .map_err(anyhow::Error::msg)?;
    let date = opt_date(sub, "date")?.unwrap_or_else(today);

    ensure(!description.trim().is_empty(), || {
        "Description is required".into()
    })?;
    ensure_positive(amount, "Amount")?;

    let tx = ctx
        .add_transaction(NewTransaction {
            card_id,
            description,
            amount,
            category,
            r#type,
            date,
            notes: opt_string(sub, "notes").unwrap_or_default(),
        })
        .context("Failed to record transaction")?;
    println!(
        "Recorded {} {} on {} (id: {})",
        tx.r#type.as_str(),
        Money::of(ctx).fmt(tx.amount),
        tx.date,
        tx.id
    );
    Ok(())
}

/// Mirror rows after the card/category filters, newest first, capped at `limit`.
pub fn query_rows<'a>(txs: &'a [Transaction], sub: &ArgMatches) -> Vec<&'a Transaction> {
    let card = sub.get_one::<String>("card");
    let category = sub.get_one::<String>("category");
    let mut rows: Vec<&Transaction> = txs
        .iter()
        .filter(|t| card.is_none_or(|c| &t.card_id == c))
        .filter(|t| category.is_none_or(|c| t.category.eq_ignore_ascii_case(c)))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    rows
}

fn list<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let now = today();
    let rows = query_rows(ctx.transactions(), sub);
    render_list(
        sub,
        rows,
        &["Date", "When", "Card", "Description", "Category", "Type", "Amount"],
        |t| {
            let card = ctx
                .card(&t.card_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|_| t.card_id.clone());
            let signed = match t.r#type {
                TransactionType::Payment => format!("+{}", money.fmt(t.amount)),
                TransactionType::Purchase => format!("-{}", money.fmt(t.amount)),
            };
            vec![
                t.date.to_string(),
                format_relative_date(t.date, now),
                card,
                t.description.clone(),
                t.category.clone(),
                t.r#type.as_str().to_string(),
                signed,
            ]
        },
    )
}
