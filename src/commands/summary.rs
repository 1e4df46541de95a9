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
    bill_summary, budget_summary, budget_usage, cash_flow, debt_summary, net_balance,
    overall_savings_progress, portfolio_summary,
};
use crate::utils::{format_relative_date, pretty_table, today, truncate_text};

const RECENT: usize = 5;

/// Home screen: balances, cash flow, budgets and the latest activity.
pub fn handle<M: Medium>(ctx: &DataContext<M>, _m: &ArgMatches) -> Result<()> {
    let money = Money::of(ctx);
    let now = today();

    if let Some(p) = ctx.user_profile() {
        if !p.name.is_empty() {
            println!("Hello, {}", p.name);
        }
    }

    let flow = cash_flow(ctx.transactions());
    let budgets = budget_summary(ctx.budgets());
    let bills = bill_summary(ctx.bills(), now);
    let debts = debt_summary(ctx.debts());
    let portfolio = portfolio_summary(ctx.investments());

    let rows = vec![
        vec!["Net balance".to_string(), money.fmt(net_balance(ctx.cards()))],
        vec!["Income".to_string(), money.fmt(flow.income)],
        vec!["Expenses".to_string(), money.fmt(flow.expenses)],
        vec![
            "Budgets".to_string(),
            format!(
                "{} of {} ({}%)",
                money.fmt(budgets.total_spent),
                money.fmt(budgets.total_budget),
                budgets.percentage
            ),
        ],
        vec![
            "Bills".to_string(),
            format!("{} pending, {} overdue", bills.pending, bills.overdue),
        ],
        vec![
            "Savings".to_string(),
            format!("{:.1}% of goals", overall_savings_progress(ctx.savings_goals())),
        ],
        vec!["Investments".to_string(), money.fmt(portfolio.total_value)],
        vec!["Debt".to_string(), money.fmt(debts.total_balance)],
    ];
    println!("{}", pretty_table(&["", ""], rows));

    if !ctx.budgets().is_empty() {
        let rows: Vec<Vec<String>> = ctx
            .budgets()
            .iter()
            .map(|b| vec![b.name.clone(), format!("{}%", budget_usage(b))])
            .collect();
        println!("{}", pretty_table(&["Budget", "Used"], rows));
    }

    let mut recent: Vec<_> = ctx.transactions().iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    let rows: Vec<Vec<String>> = recent
        .into_iter()
        .take(RECENT)
        .map(|t| {
            let card = ctx
                .card(&t.card_id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            vec![
                format_relative_date(t.date, now),
                truncate_text(&t.description, 24),
                card,
                money.fmt(-t.balance_delta()),
            ]
        })
        .collect();
    if !rows.is_empty() {
        println!(
            "{}",
            pretty_table(&["When", "Description", "Card", "Amount"], rows)
        );
    }
    Ok(())
}
