// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Finance formulas and the derived metrics each screen displays.
//!
//! Everything here is pure: callers pass records and, where relevant, the
//! current date.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    Bill, BillStatus, Budget, Card, CardType, Debt, Investment, SavingsGoal, Transaction,
    TransactionType,
};
use crate::utils::{days_until, group_by};

pub const DEFAULT_COMPOUNDS_PER_YEAR: u32 = 12;

/// `round(value / total * 100)`, rounding halves up. Zero when `total` is zero.
pub fn calculate_percentage(value: Decimal, total: Decimal) -> i64 {
    if total.is_zero() {
        return 0;
    }
    let Some(ratio) = value.checked_div(total) else {
        return 0;
    };
    let Some(scaled) = ratio.checked_mul(Decimal::ONE_HUNDRED) else {
        return 0;
    };
    (scaled + Decimal::new(5, 1)).floor().to_i64().unwrap_or(0)
}

/// Interest earned on top of `principal`: `P(1 + r/n)^(n*t) - P`.
pub fn calculate_compound_interest(
    principal: f64,
    annual_rate: f64,
    years: f64,
    compounds_per_year: u32,
) -> f64 {
    let n = f64::from(compounds_per_year.max(1));
    principal * (1.0 + annual_rate / n).powf(n * years) - principal
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffTime {
    pub months: i64,
    pub years: i64,
    pub remaining_months: i64,
}

/// Closed-form months to clear `balance` paying `payment` monthly.
///
/// `None` means the payment never amortizes the debt: non-positive payment,
/// negative rate, or a payment no larger than the first month's interest.
/// `months` and `remaining_months` are both ceilings of the raw value, so
/// `years * 12 + remaining_months` can differ from `months`.
pub fn calculate_debt_payoff_time(
    balance: Decimal,
    payment: Decimal,
    annual_rate_percent: Decimal,
) -> Option<PayoffTime> {
    if payment <= Decimal::ZERO || annual_rate_percent < Decimal::ZERO {
        return None;
    }
    // payment <= balance * rate / 1200, kept exact by moving the divisor across.
    let scaled_payment = payment.checked_mul(Decimal::from(1200))?;
    let first_interest = balance.checked_mul(annual_rate_percent)?;
    if scaled_payment <= first_interest {
        return None;
    }

    let balance = balance.to_f64()?;
    let payment = payment.to_f64()?;
    let r = annual_rate_percent.to_f64()? / 100.0 / 12.0;

    let months = if r == 0.0 {
        balance / payment
    } else {
        -(1.0 - balance * r / payment).ln() / (1.0 + r).ln()
    };
    if !months.is_finite() {
        return None;
    }
    let months = months.max(0.0);

    Some(PayoffTime {
        months: months.ceil() as i64,
        years: (months / 12.0).floor() as i64,
        remaining_months: (months % 12.0).ceil() as i64,
    })
}

// ---------------------------------------------------------------------------
// Cards and credit
// ---------------------------------------------------------------------------

/// Limit minus balance, for credit cards carrying a limit.
pub fn available_credit(card: &Card) -> Option<Decimal> {
    match (card.r#type, card.credit_limit) {
        (CardType::Credit, Some(limit)) => Some(limit - card.balance),
        _ => None,
    }
}

pub fn card_utilization(card: &Card) -> Option<i64> {
    match (card.r#type, card.credit_limit) {
        (CardType::Credit, Some(limit)) if !limit.is_zero() => {
            Some(calculate_percentage(card.balance, limit))
        }
        _ => None,
    }
}

/// Aggregate utilization over every credit card, as an unrounded percent.
pub fn credit_utilization_rate(cards: &[Card]) -> f64 {
    let (used, limit) = cards
        .iter()
        .filter(|c| c.r#type == CardType::Credit)
        .fold((Decimal::ZERO, Decimal::ZERO), |(u, l), c| {
            (u + c.balance, l + c.credit_limit.unwrap_or(Decimal::ZERO))
        });
    if limit <= Decimal::ZERO {
        return 0.0;
    }
    (used / limit * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

pub fn utilization_status(rate: f64) -> &'static str {
    if rate < 30.0 { "Good" } else { "Needs Improvement" }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreditScoreLevel {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl CreditScoreLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 800 => CreditScoreLevel::Excellent,
            s if s >= 740 => CreditScoreLevel::VeryGood,
            s if s >= 670 => CreditScoreLevel::Good,
            s if s >= 580 => CreditScoreLevel::Fair,
            _ => CreditScoreLevel::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CreditScoreLevel::Excellent => "Excellent",
            CreditScoreLevel::VeryGood => "Very Good",
            CreditScoreLevel::Good => "Good",
            CreditScoreLevel::Fair => "Fair",
            CreditScoreLevel::Poor => "Poor",
        }
    }
}

/// Position of `score` on the 300-850 scale, in percent.
pub fn credit_score_position(score: u32) -> f64 {
    (f64::from(score) - 300.0) / (850.0 - 300.0) * 100.0
}

/// Credit cards count their unused credit, other cards their balance.
pub fn net_balance(cards: &[Card]) -> Decimal {
    cards.iter().fold(Decimal::ZERO, |sum, card| match card.r#type {
        CardType::Credit => sum + card.credit_limit.unwrap_or(Decimal::ZERO) - card.balance,
        _ => sum + card.balance,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CashFlow {
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Payments count as income, purchases as expenses.
pub fn cash_flow(transactions: &[Transaction]) -> CashFlow {
    transactions
        .iter()
        .fold(CashFlow::default(), |mut acc, t| {
            match t.r#type {
                TransactionType::Payment => acc.income += t.amount,
                TransactionType::Purchase => acc.expenses += t.amount,
            }
            acc
        })
}

// ---------------------------------------------------------------------------
// Budgets, bills, savings
// ---------------------------------------------------------------------------

pub fn budget_usage(budget: &Budget) -> i64 {
    calculate_percentage(budget.spent, budget.amount)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub percentage: i64,
}

pub fn budget_summary(budgets: &[Budget]) -> BudgetSummary {
    let total_budget: Decimal = budgets.iter().map(|b| b.amount).sum();
    let total_spent: Decimal = budgets.iter().map(|b| b.spent).sum();
    BudgetSummary {
        total_budget,
        total_spent,
        percentage: calculate_percentage(total_spent, total_budget),
    }
}

/// Pending bills past their due date. Never persisted.
pub fn is_overdue(bill: &Bill, today: NaiveDate) -> bool {
    bill.status == BillStatus::Pending && days_until(bill.due_date, today) < 0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BillSummary {
    pub pending: usize,
    pub paid: usize,
    pub autopay: usize,
    pub overdue: usize,
    pub total: Decimal,
}

pub fn bill_summary(bills: &[Bill], today: NaiveDate) -> BillSummary {
    BillSummary {
        pending: bills.iter().filter(|b| b.status == BillStatus::Pending).count(),
        paid: bills.iter().filter(|b| b.status == BillStatus::Paid).count(),
        autopay: bills.iter().filter(|b| b.auto_pay).count(),
        overdue: bills.iter().filter(|b| is_overdue(b, today)).count(),
        total: bills.iter().map(|b| b.amount).sum(),
    }
}

pub fn savings_progress(goal: &SavingsGoal) -> i64 {
    calculate_percentage(goal.current_amount, goal.target_amount)
}

/// Unrounded overall progress across all goals, zero without targets.
pub fn overall_savings_progress(goals: &[SavingsGoal]) -> f64 {
    let target: Decimal = goals.iter().map(|g| g.target_amount).sum();
    let current: Decimal = goals.iter().map(|g| g.current_amount).sum();
    if target <= Decimal::ZERO {
        return 0.0;
    }
    (current / target * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

pub fn days_remaining(goal: &SavingsGoal, today: NaiveDate) -> i64 {
    days_until(goal.target_date, today)
}

// ---------------------------------------------------------------------------
// Debt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStrategy {
    /// Smallest balance first.
    #[default]
    Snowball,
    /// Highest interest rate first.
    Avalanche,
    /// Earliest due date first.
    Standard,
}

impl DebtStrategy {
    pub fn title(self) -> &'static str {
        match self {
            DebtStrategy::Snowball => "Debt Snowball",
            DebtStrategy::Avalanche => "Debt Avalanche",
            DebtStrategy::Standard => "Standard Payments",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DebtStrategy::Snowball => "Pay off smallest debts first to build momentum",
            DebtStrategy::Avalanche => {
                "Pay off highest interest rate debts first to minimize interest"
            }
            DebtStrategy::Standard => "Pay minimum amounts on all debts",
        }
    }
}

impl std::str::FromStr for DebtStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snowball" => Ok(DebtStrategy::Snowball),
            "avalanche" => Ok(DebtStrategy::Avalanche),
            "standard" => Ok(DebtStrategy::Standard),
            other => Err(format!(
                "Unknown strategy '{}' (use snowball|avalanche|standard)",
                other
            )),
        }
    }
}

/// Payoff order for `strategy`; ties keep their stored order.
pub fn order_debts(debts: &[Debt], strategy: DebtStrategy) -> Vec<&Debt> {
    let mut ordered: Vec<&Debt> = debts.iter().collect();
    match strategy {
        DebtStrategy::Snowball => ordered.sort_by(|a, b| a.balance.cmp(&b.balance)),
        DebtStrategy::Avalanche => ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate)),
        DebtStrategy::Standard => ordered.sort_by(|a, b| a.due_date.cmp(&b.due_date)),
    }
    ordered
}

/// Share of the original balance already repaid, unrounded.
pub fn debt_paid_off(debt: &Debt) -> f64 {
    if debt.original_balance.is_zero() {
        return 0.0;
    }
    ((debt.original_balance - debt.balance) / debt.original_balance * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebtSummary {
    pub total_balance: Decimal,
    pub total_minimum_payment: Decimal,
    pub average_interest_rate: Decimal,
    pub progress: f64,
}

pub fn debt_summary(debts: &[Debt]) -> DebtSummary {
    let total_balance: Decimal = debts.iter().map(|d| d.balance).sum();
    let total_minimum_payment: Decimal = debts.iter().map(|d| d.minimum_payment).sum();
    let total_original: Decimal = debts.iter().map(|d| d.original_balance).sum();
    let average_interest_rate = if debts.is_empty() {
        Decimal::ZERO
    } else {
        debts.iter().map(|d| d.interest_rate).sum::<Decimal>() / Decimal::from(debts.len())
    };
    let progress = if total_original > Decimal::ZERO {
        ((total_original - total_balance) / total_original * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    };
    DebtSummary {
        total_balance,
        total_minimum_payment,
        average_interest_rate,
        progress,
    }
}

// ---------------------------------------------------------------------------
// Investments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub asset_type: String,
    pub value: Decimal,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_return: Decimal,
    pub return_percentage: f64,
    pub allocation: Vec<AllocationSlice>,
}

pub fn portfolio_summary(investments: &[Investment]) -> PortfolioSummary {
    let total_value: Decimal = investments.iter().map(|i| i.current_value).sum();
    let total_cost: Decimal = investments.iter().map(|i| i.purchase_price).sum();
    let total_return = total_value - total_cost;
    let return_percentage = if total_cost > Decimal::ZERO {
        (total_return / total_cost * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    };

    let groups: BTreeMap<String, Vec<&Investment>> =
        group_by(investments.iter(), |i| i.asset_type.clone());
    let allocation = groups
        .into_iter()
        .map(|(asset_type, members)| {
            let value: Decimal = members.iter().map(|i| i.current_value).sum();
            AllocationSlice {
                asset_type,
                value,
                percentage: calculate_percentage(value, total_value),
            }
        })
        .collect();

    PortfolioSummary {
        total_value,
        total_cost,
        total_return,
        return_percentage,
        allocation,
    }
}
