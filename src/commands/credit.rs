// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::Money;
use crate::context::DataContext;
use crate::db::Medium;
use crate::formulas::{
    available_credit, card_utilization, credit_score_position, credit_utilization_rate,
    utilization_status, CreditScoreLevel,
};
use crate::models::CardType;
use crate::utils::pretty_table;

/// Shown until the profile carries a real score.
const FALLBACK_SCORE: u32 = 725;

pub fn handle<M: Medium>(ctx: &DataContext<M>, _m: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let score = ctx
        .user_profile()
        .map(|p| p.credit_score)
        .filter(|s| *s > 0)
        .unwrap_or(FALLBACK_SCORE);
    let level = CreditScoreLevel::from_score(score);
    println!(
        "Credit score: {} ({}), {:.0}% along the 300-850 range",
        score,
        level.label(),
        credit_score_position(score)
    );

    let rate = credit_utilization_rate(ctx.cards());
    println!(
        "Utilization: {:.1}% ({}), keep it below 30%",
        rate,
        utilization_status(rate)
    );

    let rows: Vec<Vec<String>> = ctx
        .cards()
        .iter()
        .filter(|c| c.r#type == CardType::Credit)
        .map(|c| {
            vec![
                c.name.clone(),
                money.fmt(c.balance),
                c.credit_limit.map(|l| money.fmt(l)).unwrap_or_default(),
                available_credit(c).map(|a| money.fmt(a)).unwrap_or_default(),
                card_utilization(c)
                    .map(|p| format!("{}%", p))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    if !rows.is_empty() {
        println!(
            "{}",
            pretty_table(&["Card", "Balance", "Limit", "Available", "Used"], rows)
        );
    }
    Ok(())
}
