// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use fintrack::formulas::*;
use fintrack::models::{
    Bill, CardType, Debt, Investment, MarkPaid, NewBill, NewCard, NewDebt, NewInvestment,
    NewRecord, NewTransaction, Patch, Transaction, TransactionType,
};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn card(id: &str, r#type: CardType, balance: &str, limit: Option<&str>) -> fintrack::models::Card {
    NewCard {
        name: id.into(),
        r#type,
        last_four: "1234".into(),
        expiry: "12/99".into(),
        balance: d(balance),
        credit_limit: limit.map(d),
        issuer: String::new(),
        color: String::new(),
    }
    .into_record(id.into(), Utc::now())
}

fn debt(id: &str, balance: &str, rate: &str, due: &str) -> Debt {
    NewDebt {
        name: id.into(),
        r#type: "other".into(),
        balance: d(balance),
        original_balance: d(balance),
        interest_rate: d(rate),
        minimum_payment: d("50"),
        due_date: date(due),
        lender: String::new(),
        notes: String::new(),
    }
    .into_record(id.into(), Utc::now())
}

#[test]
fn percentage_rounds_half_up_and_guards_zero_total() {
    assert_eq!(calculate_percentage(d("50"), Decimal::ZERO), 0);
    assert_eq!(calculate_percentage(d("1"), d("3")), 33);
    assert_eq!(calculate_percentage(d("2"), d("3")), 67);
    assert_eq!(calculate_percentage(d("1"), d("8")), 13);
    assert_eq!(calculate_percentage(d("850"), d("1000")), 85);
    // Over budget is reported as is.
    assert_eq!(calculate_percentage(d("150"), d("100")), 150);
}

#[test]
fn compound_interest_matches_closed_form() {
    let yearly = calculate_compound_interest(1000.0, 0.05, 1.0, 1);
    assert!((yearly - 50.0).abs() < 1e-9);
    let monthly = calculate_compound_interest(1000.0, 0.05, 1.0, DEFAULT_COMPOUNDS_PER_YEAR);
    assert!((monthly - 51.1619).abs() < 1e-3, "got {}", monthly);
}

#[test]
fn payoff_is_none_at_or_below_first_month_interest() {
    // 1000 at 12% accrues exactly 10 in the first month.
    assert_eq!(calculate_debt_payoff_time(d("1000"), d("10"), d("12")), None);
    assert_eq!(calculate_debt_payoff_time(d("1000"), d("9.99"), d("12")), None);
    assert!(calculate_debt_payoff_time(d("1000"), d("10.01"), d("12")).is_some());
}

#[test]
fn payoff_rejects_non_positive_payment_and_negative_rate() {
    assert_eq!(calculate_debt_payoff_time(d("1000"), Decimal::ZERO, d("5")), None);
    assert_eq!(calculate_debt_payoff_time(d("1000"), d("-5"), d("5")), None);
    assert_eq!(calculate_debt_payoff_time(d("1000"), d("100"), d("-1")), None);
}

#[test]
fn payoff_with_interest() {
    // -ln(1 - 0.1) / ln(1.01) = 10.59 months
    let p = calculate_debt_payoff_time(d("1000"), d("100"), d("12")).unwrap();
    assert_eq!(p.months, 11);
    assert_eq!(p.years, 0);
    assert_eq!(p.remaining_months, 11);
}

#[test]
fn payoff_without_interest_is_linear_and_keeps_double_rounding() {
    let p = calculate_debt_payoff_time(d("1000"), d("100"), Decimal::ZERO).unwrap();
    assert_eq!((p.months, p.years, p.remaining_months), (10, 0, 10));

    // 12.5 months: both the total and the remainder round up.
    let p = calculate_debt_payoff_time(d("1250"), d("100"), Decimal::ZERO).unwrap();
    assert_eq!((p.months, p.years, p.remaining_months), (13, 1, 1));

    let p = calculate_debt_payoff_time(d("2400"), d("100"), Decimal::ZERO).unwrap();
    assert_eq!((p.months, p.years, p.remaining_months), (24, 2, 0));
}

#[test]
fn payoff_of_cleared_debt_is_zero() {
    let p = calculate_debt_payoff_time(Decimal::ZERO, d("100"), d("18.99")).unwrap();
    assert_eq!((p.months, p.years, p.remaining_months), (0, 0, 0));
}

#[test]
fn credit_utilization_only_counts_credit_cards() {
    let cards = vec![
        card("a", CardType::Credit, "250", Some("1000")),
        card("b", CardType::Credit, "350", Some("1000")),
        card("c", CardType::Debit, "5000", None),
    ];
    let rate = credit_utilization_rate(&cards);
    assert!((rate - 30.0).abs() < 1e-9);
    assert_eq!(utilization_status(rate), "Needs Improvement");
    assert_eq!(utilization_status(29.9), "Good");
    assert_eq!(credit_utilization_rate(&cards[2..]), 0.0);

    assert_eq!(card_utilization(&cards[0]), Some(25));
    assert_eq!(available_credit(&cards[0]), Some(d("750")));
    assert_eq!(available_credit(&cards[2]), None);
}

#[test]
fn net_balance_uses_available_credit_for_credit_cards() {
    let cards = vec![
        card("a", CardType::Credit, "2450.75", Some("10000")),
        card("b", CardType::Debit, "3945.35", None),
    ];
    assert_eq!(net_balance(&cards), d("11494.60"));
}

#[test]
fn credit_score_levels() {
    assert_eq!(CreditScoreLevel::from_score(800), CreditScoreLevel::Excellent);
    assert_eq!(CreditScoreLevel::from_score(799), CreditScoreLevel::VeryGood);
    assert_eq!(CreditScoreLevel::from_score(740), CreditScoreLevel::VeryGood);
    assert_eq!(CreditScoreLevel::from_score(739), CreditScoreLevel::Good);
    assert_eq!(CreditScoreLevel::from_score(670), CreditScoreLevel::Good);
    assert_eq!(CreditScoreLevel::from_score(669), CreditScoreLevel::Fair);
    assert_eq!(CreditScoreLevel::from_score(580), CreditScoreLevel::Fair);
    assert_eq!(CreditScoreLevel::from_score(579), CreditScoreLevel::Poor);
    assert_eq!(CreditScoreLevel::from_score(725).label(), "Good");
    assert!((credit_score_position(575) - 50.0).abs() < 1e-9);
}

#[test]
fn cash_flow_splits_payments_and_purchases() {
    let tx = |amount: &str, r#type| -> Transaction {
        NewTransaction {
            card_id: "c".into(),
            description: "x".into(),
            amount: d(amount),
            category: "misc".into(),
            r#type,
            date: date("2024-01-01"),
            notes: String::new(),
        }
        .into_record(amount.into(), Utc::now())
    };
    let txs = vec![
        tx("3520.00", TransactionType::Payment),
        tx("128.35", TransactionType::Purchase),
        tx("65.20", TransactionType::Purchase),
    ];
    let flow = cash_flow(&txs);
    assert_eq!(flow.income, d("3520.00"));
    assert_eq!(flow.expenses, d("193.55"));
}

#[test]
fn debt_strategies_order_stably() {
    let debts = vec![
        debt("student", "21750.45", "4.5", "2024-02-15"),
        debt("card", "7250.30", "18.99", "2024-02-20"),
        debt("auto", "4850.00", "5.25", "2024-02-10"),
        debt("medical", "4850.00", "0", "2024-02-10"),
    ];
    let ids = |v: Vec<&Debt>| v.into_iter().map(|d| d.id.clone()).collect::<Vec<_>>();

    assert_eq!(
        ids(order_debts(&debts, DebtStrategy::Snowball)),
        ["auto", "medical", "card", "student"]
    );
    assert_eq!(
        ids(order_debts(&debts, DebtStrategy::Avalanche)),
        ["card", "auto", "student", "medical"]
    );
    assert_eq!(
        ids(order_debts(&debts, DebtStrategy::Standard)),
        ["auto", "medical", "student", "card"]
    );
    assert_eq!("AVALANCHE".parse::<DebtStrategy>(), Ok(DebtStrategy::Avalanche));
    assert!("payday".parse::<DebtStrategy>().is_err());
}

#[test]
fn debt_summary_progress() {
    let mut a = debt("a", "500", "10", "2024-01-01");
    a.original_balance = d("1000");
    let b = debt("b", "500", "20", "2024-01-01");
    let s = debt_summary(&[a.clone(), b]);
    assert_eq!(s.total_balance, d("1000"));
    assert_eq!(s.total_minimum_payment, d("100"));
    assert_eq!(s.average_interest_rate, d("15"));
    assert!((s.progress - 33.333).abs() < 1e-2);
    assert!((debt_paid_off(&a) - 50.0).abs() < 1e-9);
    assert_eq!(debt_summary(&[]).average_interest_rate, Decimal::ZERO);
}

#[test]
fn portfolio_allocation_groups_by_asset_type() {
    let inv = |id: &str, value: &str, cost: &str, asset: &str| -> Investment {
        NewInvestment {
            name: id.into(),
            symbol: id.to_uppercase(),
            shares: d("1"),
            current_value: d(value),
            purchase_price: d(cost),
            asset_type: asset.into(),
        }
        .into_record(id.into(), Utc::now())
    };
    let holdings = vec![
        inv("voo", "600", "500", "etf"),
        inv("bnd", "250", "300", "bonds"),
        inv("qqq", "150", "100", "etf"),
    ];
    let s = portfolio_summary(&holdings);
    assert_eq!(s.total_value, d("1000"));
    assert_eq!(s.total_cost, d("900"));
    assert_eq!(s.total_return, d("100"));
    assert_eq!(s.allocation.len(), 2);
    assert_eq!(s.allocation[0].asset_type, "bonds");
    assert_eq!(s.allocation[0].percentage, 25);
    assert_eq!(s.allocation[1].asset_type, "etf");
    assert_eq!(s.allocation[1].value, d("750"));
    assert_eq!(s.allocation[1].percentage, 75);
}

#[test]
fn overdue_is_pending_and_past_due() {
    let today = date("2024-02-05");
    let bill = |due: &str| -> Bill {
        NewBill {
            name: "Power".into(),
            amount: d("85"),
            due_date: date(due),
            category: "utilities".into(),
            auto_pay: false,
        }
        .into_record("b".into(), Utc::now())
    };
    assert!(is_overdue(&bill("2024-02-04"), today));
    assert!(!is_overdue(&bill("2024-02-05"), today));

    let mut paid = bill("2024-02-01");
    MarkPaid.apply(&mut paid);
    assert!(!is_overdue(&paid, today));

    let s = bill_summary(&[bill("2024-02-01"), paid], today);
    assert_eq!((s.pending, s.paid, s.overdue), (1, 1, 1));
    assert_eq!(s.total, d("170"));
}
