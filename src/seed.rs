// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Demonstration dataset installed on first run.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::db::new_id;
use crate::models::{
    Bill, BillStatus, Budget, Card, CardType, Debt, Investment, SavingsGoal, Transaction,
    TransactionType, UserProfile,
};

pub struct DemoData {
    pub profile: UserProfile,
    pub cards: Vec<Card>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub bills: Vec<Bill>,
    pub savings_goals: Vec<SavingsGoal>,
    pub investments: Vec<Investment>,
    pub debts: Vec<Debt>,
}

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn card(
    name: &str,
    r#type: CardType,
    last_four: &str,
    expiry: &str,
    balance: i64,
    credit_limit: Option<i64>,
    issuer: &str,
    color: &str,
    now: DateTime<Utc>,
) -> Card {
    Card {
        id: new_id(),
        name: name.into(),
        r#type,
        last_four: last_four.into(),
        expiry: expiry.into(),
        balance: money(balance),
        credit_limit: credit_limit.map(money),
        issuer: issuer.into(),
        color: color.into(),
        created_at: now,
        updated_at: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn transaction(
    card_id: &str,
    description: &str,
    amount: i64,
    category: &str,
    r#type: TransactionType,
    date: NaiveDate,
    notes: &str,
    now: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: new_id(),
        card_id: card_id.into(),
        description: description.into(),
        amount: money(amount),
        category: category.into(),
        r#type,
        date,
        notes: notes.into(),
        created_at: now,
        updated_at: None,
    }
}

fn budget(name: &str, amount: i64, spent: i64, category: &str, now: DateTime<Utc>) -> Budget {
    Budget {
        id: new_id(),
        name: name.into(),
        amount: money(amount),
        spent: money(spent),
        category: category.into(),
        period: "monthly".into(),
        created_at: now,
        updated_at: Some(now),
    }
}

fn bill(name: &str, amount: i64, due: NaiveDate, auto_pay: bool, now: DateTime<Utc>) -> Bill {
    Bill {
        id: new_id(),
        name: name.into(),
        amount: money(amount),
        due_date: due,
        category: "utilities".into(),
        auto_pay,
        status: BillStatus::Pending,
        created_at: now,
        updated_at: None,
    }
}

fn goal(name: &str, target: i64, current: i64, date: NaiveDate, now: DateTime<Utc>) -> SavingsGoal {
    SavingsGoal {
        id: new_id(),
        name: name.into(),
        target_amount: money(target),
        current_amount: money(current),
        target_date: date,
        created_at: now,
        updated_at: None,
    }
}

fn investment(
    name: &str,
    symbol: &str,
    shares: i64,
    current_value: i64,
    purchase_price: i64,
    asset_type: &str,
    now: DateTime<Utc>,
) -> Investment {
    Investment {
        id: new_id(),
        name: name.into(),
        symbol: symbol.into(),
        shares: Decimal::from(shares),
        current_value: money(current_value),
        purchase_price: money(purchase_price),
        asset_type: asset_type.into(),
        created_at: now,
        updated_at: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn debt(
    name: &str,
    r#type: &str,
    balance: i64,
    original: i64,
    rate: Decimal,
    minimum: i64,
    due: NaiveDate,
    lender: &str,
    notes: &str,
    now: DateTime<Utc>,
) -> Debt {
    Debt {
        id: new_id(),
        name: name.into(),
        r#type: r#type.into(),
        balance: money(balance),
        original_balance: money(original),
        interest_rate: rate,
        minimum_payment: money(minimum),
        due_date: due,
        lender: lender.into(),
        notes: notes.into(),
        created_at: now,
        updated_at: None,
    }
}

pub fn demo_dataset(now: DateTime<Utc>) -> DemoData {
    let profile = UserProfile {
        id: new_id(),
        name: "Alex Morgan".into(),
        email: "alex.morgan@example.com".into(),
        total_balance: money(824635),
        monthly_income: money(352000),
        monthly_expenses: money(198275),
        credit_score: 725,
        created_at: now,
        updated_at: Some(now),
    };

    let cards = vec![
        card(
            "Chase Sapphire Preferred",
            CardType::Credit,
            "4587",
            "12/25",
            245075,
            Some(1000000),
            "Chase",
            "blue",
            now,
        ),
        card(
            "Capital One Venture",
            CardType::Credit,
            "7891",
            "09/24",
            185025,
            Some(800000),
            "Capital One",
            "purple",
            now,
        ),
        card(
            "Wells Fargo Checking",
            CardType::Debit,
            "3456",
            "06/26",
            394535,
            None,
            "Wells Fargo",
            "green",
            now,
        ),
    ];

    let (chase, capital_one) = (cards[0].id.clone(), cards[1].id.clone());
    let transactions = vec![
        transaction(
            &chase,
            "Salary Deposit",
            352000,
            "income",
            TransactionType::Payment,
            day(2024, 1, 15),
            "Monthly salary",
            now,
        ),
        transaction(
            &chase,
            "Grocery Shopping",
            12835,
            "food",
            TransactionType::Purchase,
            day(2024, 1, 14),
            "Whole Foods",
            now,
        ),
        transaction(
            &capital_one,
            "Gas Station",
            6520,
            "transportation",
            TransactionType::Purchase,
            day(2024, 1, 13),
            "Shell Gas",
            now,
        ),
        transaction(
            &chase,
            "Netflix Subscription",
            1599,
            "entertainment",
            TransactionType::Purchase,
            day(2024, 1, 12),
            "Monthly subscription",
            now,
        ),
    ];

    let budgets = vec![
        budget("Food & Dining", 100000, 85000, "food", now),
        budget("Transportation", 60000, 45000, "transportation", now),
        budget("Entertainment", 40000, 32000, "entertainment", now),
    ];

    let bills = vec![
        bill("Electricity Bill", 8500, day(2024, 2, 3), false, now),
        bill("Internet Service", 6599, day(2024, 2, 5), true, now),
        bill("Water Bill", 4250, day(2024, 2, 7), false, now),
    ];

    let savings_goals = vec![
        goal("Emergency Fund", 1500000, 900000, day(2024, 12, 31), now),
        goal("Home Down Payment", 3500000, 875000, day(2024, 12, 31), now),
        goal("Vacation Fund", 300000, 210000, day(2024, 8, 31), now),
    ];

    let investments = vec![
        investment("S&P 500 ETF", "VOO", 25, 1025075, 982525, "etf", now),
        investment("Tech Growth Fund", "QQQ", 18, 785025, 689950, "etf", now),
        investment("Bond Fund", "BND", 50, 532550, 545075, "bonds", now),
    ];

    let debts = vec![
        debt(
            "Student Loan",
            "student_loan",
            2175045,
            2900000,
            Decimal::new(45, 1),
            24532,
            day(2024, 2, 15),
            "Federal Student Aid",
            "Consolidated federal student loans",
            now,
        ),
        debt(
            "Credit Card Debt",
            "credit_card",
            725030,
            850000,
            Decimal::new(1899, 2),
            15000,
            day(2024, 2, 20),
            "Chase",
            "High interest - prioritize payoff",
            now,
        ),
        debt(
            "Auto Loan",
            "auto_loan",
            485000,
            1200000,
            Decimal::new(525, 2),
            10000,
            day(2024, 2, 10),
            "Toyota Financial",
            "2019 Toyota Camry",
            now,
        ),
    ];

    DemoData {
        profile,
        cards,
        transactions,
        budgets,
        bills,
        savings_goals,
        investments,
        debts,
    }
}
