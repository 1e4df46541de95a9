// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;
use rust_decimal::Decimal;

use super::{ensure, opt_decimal, opt_string, render_list, required, Money};
use crate::context::DataContext;
use crate::db::Medium;
use crate::formulas::{available_credit, card_utilization};
use crate::models::{CardPatch, CardType, NewCard};
use crate::utils::{is_valid_card_number, is_valid_expiry_date, parse_decimal, today};

pub fn handle<M: Medium>(ctx: &mut DataContext<M>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("update", sub)) => update(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn card_type(s: &str) -> Result<CardType> {
    s.parse::<CardType>().map_err(anyhow::Error::msg)
}

fn check_last_four(v: &str) -> Result<()> {
    ensure(is_valid_card_number(v), || {
        format!("Last four '{}' must be exactly 4 digits", v)
    })
}

fn check_expiry(v: &str) -> Result<()> {
    ensure(is_valid_expiry_date(v, today()), || {
        format!("Expiry '{}' must be MM/YY and in the future", v)
    })
}

/// Credit cards need a non-negative limit; other cards take none.
fn check_limit(r#type: CardType, limit: Option<Decimal>) -> Result<()> {
    match (r#type, limit) {
        (CardType::Credit, None) => ensure(false, || {
            "Credit limit is required for credit cards".into()
        }),
        (CardType::Credit, Some(l)) => {
            ensure(l >= Decimal::ZERO, || "Credit limit cannot be negative".into())
        }
        (other, Some(_)) => ensure(false, || {
            format!("A {} card has no credit limit", other.as_str())
        }),
        (_, None) => Ok(()),
    }
}

fn add<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let name = required(sub, "name")?.to_string();
    let r#type = card_type(required(sub, "type")?)?;
    let last_four = required(sub, "last-four")?.to_string();
    let expiry = required(sub, "expiry")?.to_string();
    let balance = parse_decimal(required(sub, "balance")?)?;
    let credit_limit = opt_decimal(sub, "limit")?;

    ensure(!name.trim().is_empty(), || "Card name is required".into())?;
    check_last_four(&last_four)?;
    check_expiry(&expiry)?;
    check_limit(r#type, credit_limit)?;

    let card = ctx
        .add_card(NewCard {
            name,
            r#type,
            last_four,
            expiry,
            balance,
            credit_limit,
            issuer: required(sub, "issuer")?.to_string(),
            color: required(sub, "color")?.to_string(),
        })
        .context("Failed to add card")?;
    println!("Added card '{}' (id: {})", card.name, card.id);
    Ok(())
}

fn list<M: Medium>(ctx: &DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let cards: Vec<_> = ctx.cards().iter().collect();
    render_list(
        sub,
        cards,
        &["ID", "Name", "Type", "Card", "Expiry", "Balance", "Available", "Used"],
        |c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                c.r#type.as_str().to_string(),
                format!("•••• {}", c.last_four),
                c.expiry.clone(),
                money.fmt(c.balance),
                available_credit(c).map(|a| money.fmt(a)).unwrap_or_default(),
                card_utilization(c)
                    .map(|p| format!("{}%", p))
                    .unwrap_or_default(),
            ]
        },
    )
}

fn update<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let last_four = opt_string(sub, "last-four");
    let expiry = opt_string(sub, "expiry");
    if let Some(v) = &last_four {
        check_last_four(v)?;
    }
    if let Some(v) = &expiry {
        check_expiry(v)?;
    }
    let r#type = sub
        .get_one::<String>("type")
        .map(|s| card_type(s))
        .transpose()?;
    let limit = opt_decimal(sub, "limit")?;

    let current = ctx.card(id)?;
    let merged_type = r#type.unwrap_or(current.r#type);
    // Leaving the credit type drops the old limit.
    let merged_limit = match (limit, merged_type) {
        (Some(l), _) => Some(l),
        (None, CardType::Credit) => current.credit_limit,
        (None, _) => None,
    };
    check_limit(merged_type, merged_limit)?;
    let credit_limit = if merged_limit != current.credit_limit {
        Some(merged_limit)
    } else {
        None
    };

    let patch = CardPatch {
        name: opt_string(sub, "name"),
        r#type,
        last_four,
        expiry,
        balance: opt_decimal(sub, "balance")?,
        credit_limit,
        issuer: opt_string(sub, "issuer"),
        color: opt_string(sub, "color"),
    };
    let card = ctx
        .update_card(id, patch)
        .with_context(|| format!("Failed to update card {}", id))?;
    println!("Updated card '{}'", card.name);
    Ok(())
}

fn remove<M: Medium>(ctx: &mut DataContext<M>, sub: &ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let owned = ctx.transactions().iter().filter(|t| t.card_id == id).count();
    ctx.delete_card(id)
        .with_context(|| format!("Failed to delete card {}", id))?;
    println!("Deleted card {} and {} transaction(s)", id, owned);
    Ok(())
}
