// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::utils::{SortKey, SortValue};

/// Named collections persisted by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Cards,
    Transactions,
    Budgets,
    Bills,
    SavingsGoals,
    Investments,
    Debts,
    UserProfile,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Cards => "fintrack_cards",
            Collection::Transactions => "fintrack_transactions",
            Collection::Budgets => "fintrack_budgets",
            Collection::Bills => "fintrack_bills",
            Collection::SavingsGoals => "fintrack_savings_goals",
            Collection::Investments => "fintrack_investments",
            Collection::Debts => "fintrack_debts",
            Collection::UserProfile => "fintrack_user_profile",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Collection::Cards => "card",
            Collection::Transactions => "transaction",
            Collection::Budgets => "budget",
            Collection::Bills => "bill",
            Collection::SavingsGoals => "savings goal",
            Collection::Investments => "investment",
            Collection::Debts => "debt",
            Collection::UserProfile => "user profile",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored entity living in one list-valued collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Stamp the update timestamp after a merge.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// Caller-supplied fields of a record that does not exist yet.
pub trait NewRecord {
    type Output: Record;

    fn into_record(self, id: String, created_at: DateTime<Utc>) -> Self::Output;
}

/// Fields legally mutable after creation.
pub trait Patch<R> {
    fn apply(self, record: &mut R);
}

macro_rules! merge_fields {
    ($patch:expr, $record:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $patch.$field {
                $record.$field = v;
            }
        )+
    };
}

macro_rules! impl_record {
    ($ty:ty, $collection:expr) => {
        impl Record for $ty {
            const COLLECTION: Collection = $collection;

            fn id(&self) -> &str {
                &self.id
            }

            fn touch(&mut self, at: DateTime<Utc>) {
                self.updated_at = Some(at);
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub total_balance: Decimal,
    #[serde(default)]
    pub monthly_income: Decimal,
    #[serde(default)]
    pub monthly_expenses: Decimal,
    #[serde(default)]
    pub credit_score: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Blank profile used when an update arrives before any profile exists.
    pub fn blank(id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: String::new(),
            email: String::new(),
            total_balance: Decimal::ZERO,
            monthly_income: Decimal::ZERO,
            monthly_expenses: Decimal::ZERO,
            credit_score: 0,
            created_at,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub total_balance: Option<Decimal>,
    pub monthly_income: Option<Decimal>,
    pub monthly_expenses: Option<Decimal>,
    pub credit_score: Option<u32>,
}

impl Patch<UserProfile> for ProfilePatch {
    fn apply(self, record: &mut UserProfile) {
        merge_fields!(
            self,
            record,
            name,
            email,
            total_balance,
            monthly_income,
            monthly_expenses,
            credit_score
        );
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Credit,
    Debit,
    Prepaid,
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Credit => "credit",
            CardType::Debit => "debit",
            CardType::Prepaid => "prepaid",
        }
    }
}

impl std::str::FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(CardType::Credit),
            "debit" => Ok(CardType::Debit),
            "prepaid" => Ok(CardType::Prepaid),
            other => Err(format!("Unknown card type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub r#type: CardType,
    pub last_four: String,
    pub expiry: String,
    pub balance: Decimal,
    #[serde(default)]
    pub credit_limit: Option<Decimal>,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub color: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(Card, Collection::Cards);

#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub name: String,
    pub r#type: CardType,
    pub last_four: String,
    pub expiry: String,
    pub balance: Decimal,
    pub credit_limit: Option<Decimal>,
    pub issuer: String,
    pub color: String,
}

impl NewRecord for NewCard {
    type Output = Card;

    fn into_record(self, id: String, created_at: DateTime<Utc>) -> Card {
        Card {
            id,
            name: self.name,
            r#type: self.r#type,
            last_four: self.last_four,
            expiry: self.expiry,
            balance: self.balance,
            credit_limit: self.credit_limit,
            issuer: self.issuer,
            color: self.color,
            created_at,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub name: Option<String>,
    pub r#type: Option<CardType>,
    pub last_four: Option<String>,
    pub expiry: Option<String>,
    pub balance: Option<Decimal>,
    /// `Some(None)` clears the limit, e.g. when a card stops being credit.
    pub credit_limit: Option<Option<Decimal>>,
    pub issuer: Option<String>,
    pub color: Option<String>,
}

impl CardPatch {
    pub fn balance(balance: Decimal) -> Self {
        Self {
            balance: Some(balance),
            ..Self::default()
        }
    }
}

impl Patch<Card> for CardPatch {
    fn apply(self, record: &mut Card) {
        merge_fields!(
            self,
            record,
            name,
            r#type,
            last_four,
            expiry,
            balance,
            credit_limit,
            issuer,
            color
        );
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Purchase,
    Payment,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Purchase => "purchase",
            TransactionType::Payment => "payment",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "purchase" => Ok(TransactionType::Purchase),
            "payment" => Ok(TransactionType::Payment),
            other => Err(format!("Unknown transaction type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub card_id: String,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub r#type: TransactionType,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(Transaction, Collection::Transactions);

impl Transaction {
    /// Signed effect on the owning card's balance.
    pub fn balance_delta(&self) -> Decimal {
        match self.r#type {
            TransactionType::Purchase => self.amount,
            TransactionType::Payment => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub card_id: String,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub r#type: TransactionType,
    pub date: NaiveDate,
    pub notes: String,
}

impl NewRecord for NewTransaction {
    type Output = Transaction;

    fn into_record(self, id: String, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            card_id: self.card_id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            r#type: self.r#type,
            date: self.date,
            notes: self.notes,
            created_at,
            updated_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    pub category: String,
    pub period: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(Budget, Collection::Budgets);

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub period: String,
}

impl NewRecord for NewBudget {
    type Output = Budget;

    // Budgets always start unspent.
    fn into_record(self, id: String, created_at: DateTime<Utc>) -> Budget {
        Budget {
            id,
            name: self.name,
            amount: self.amount,
            spent: Decimal::ZERO,
            category: self.category,
            period: self.period,
            created_at,
            updated_at: Some(created_at),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub spent: Option<Decimal>,
    pub category: Option<String>,
    pub period: Option<String>,
}

impl Patch<Budget> for BudgetPatch {
    fn apply(self, record: &mut Budget) {
        merge_fields!(self, record, name, amount, spent, category, period);
    }
}

// ---------------------------------------------------------------------------
// Bills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
}

impl BillStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub auto_pay: bool,
    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(Bill, Collection::Bills);

#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: String,
    pub auto_pay: bool,
}

impl NewRecord for NewBill {
    type Output = Bill;

    fn into_record(self, id: String, created_at: DateTime<Utc>) -> Bill {
        Bill {
            id,
            name: self.name,
            amount: self.amount,
            due_date: self.due_date,
            category: self.category,
            auto_pay: self.auto_pay,
            status: BillStatus::Pending,
            created_at,
            updated_at: None,
        }
    }
}

/// Status is deliberately absent: paying a bill is its own operation.
#[derive(Debug, Clone, Default)]
pub struct BillPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub auto_pay: Option<bool>,
}

impl Patch<Bill> for BillPatch {
    fn apply(self, record: &mut Bill) {
        merge_fields!(self, record, name, amount, due_date, category, auto_pay);
    }
}

/// Moves a bill from pending to paid. There is no way back.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkPaid;

impl Patch<Bill> for MarkPaid {
    fn apply(self, record: &mut Bill) {
        record.status = BillStatus::Paid;
    }
}

// ---------------------------------------------------------------------------
// Savings goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(SavingsGoal, Collection::SavingsGoals);

#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Option<Decimal>,
    pub target_date: NaiveDate,
}

impl NewRecord for NewSavingsGoal {
    type Output = SavingsGoal;

    fn into_record(self, id: String, created_at: DateTime<Utc>) -> SavingsGoal {
        SavingsGoal {
            id,
            name: self.name,
            target_amount: self.target_amount,
            current_amount: self.current_amount.unwrap_or(Decimal::ZERO),
            target_date: self.target_date,
            created_at,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SavingsGoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
}

impl Patch<SavingsGoal> for SavingsGoalPatch {
    fn apply(self, record: &mut SavingsGoal) {
        merge_fields!(self, record, name, target_amount, current_amount, target_date);
    }
}

// ---------------------------------------------------------------------------
// Investments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub shares: Decimal,
    pub current_value: Decimal,
    pub purchase_price: Decimal,
    pub asset_type: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(Investment, Collection::Investments);

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvestment {
    pub name: String,
    pub symbol: String,
    pub shares: Decimal,
    pub current_value: Decimal,
    pub purchase_price: Decimal,
    pub asset_type: String,
}

impl NewRecord for NewInvestment {
    type Output = Investment;

    fn into_record(self, id: String, created_at: DateTime<Utc>) -> Investment {
        Investment {
            id,
            name: self.name,
            symbol: self.symbol,
            shares: self.shares,
            current_value: self.current_value,
            purchase_price: self.purchase_price,
            asset_type: self.asset_type,
            created_at,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InvestmentPatch {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub shares: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub purchase_price: Option<Decimal>,
    pub asset_type: Option<String>,
}

impl Patch<Investment> for InvestmentPatch {
    fn apply(self, record: &mut Investment) {
        merge_fields!(
            self,
            record,
            name,
            symbol,
            shares,
            current_value,
            purchase_price,
            asset_type
        );
    }
}

// ---------------------------------------------------------------------------
// Debts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub r#type: String,
    pub balance: Decimal,
    pub original_balance: Decimal,
    pub interest_rate: Decimal, // annual percent
    pub minimum_payment: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub lender: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(Debt, Collection::Debts);

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub r#type: String,
    pub balance: Decimal,
    pub original_balance: Decimal,
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,
    pub due_date: NaiveDate,
    pub lender: String,
    pub notes: String,
}

impl NewRecord for NewDebt {
    type Output = Debt;

    fn into_record(self, id: String, created_at: DateTime<Utc>) -> Debt {
        Debt {
            id,
            name: self.name,
            r#type: self.r#type,
            balance: self.balance,
            original_balance: self.original_balance,
            interest_rate: self.interest_rate,
            minimum_payment: self.minimum_payment,
            due_date: self.due_date,
            lender: self.lender,
            notes: self.notes,
            created_at,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DebtPatch {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub balance: Option<Decimal>,
    pub original_balance: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub minimum_payment: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub lender: Option<String>,
    pub notes: Option<String>,
}

impl Patch<Debt> for DebtPatch {
    fn apply(self, record: &mut Debt) {
        merge_fields!(
            self,
            record,
            name,
            r#type,
            balance,
            original_balance,
            interest_rate,
            minimum_payment,
            due_date,
            lender,
            notes
        );
    }
}

// ---------------------------------------------------------------------------
// Sort keys
// ---------------------------------------------------------------------------

impl SortKey for Card {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Text(self.name.clone())),
            "type" => Some(SortValue::Text(self.r#type.as_str().to_string())),
            "issuer" => Some(SortValue::Text(self.issuer.clone())),
            "balance" => Some(SortValue::Number(self.balance)),
            "creditLimit" | "credit_limit" => self.credit_limit.map(SortValue::Number),
            "createdAt" | "created_at" => Some(SortValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}

impl SortKey for Transaction {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "description" => Some(SortValue::Text(self.description.clone())),
            "category" => Some(SortValue::Text(self.category.clone())),
            "type" => Some(SortValue::Text(self.r#type.as_str().to_string())),
            "amount" => Some(SortValue::Number(self.amount)),
            "date" => Some(SortValue::Date(self.date)),
            "createdAt" | "created_at" => Some(SortValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}

impl SortKey for Budget {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Text(self.name.clone())),
            "category" => Some(SortValue::Text(self.category.clone())),
            "amount" => Some(SortValue::Number(self.amount)),
            "spent" => Some(SortValue::Number(self.spent)),
            _ => None,
        }
    }
}

impl SortKey for Bill {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Text(self.name.clone())),
            "category" => Some(SortValue::Text(self.category.clone())),
            "status" => Some(SortValue::Text(self.status.as_str().to_string())),
            "amount" => Some(SortValue::Number(self.amount)),
            "dueDate" | "due_date" => Some(SortValue::Date(self.due_date)),
            _ => None,
        }
    }
}

impl SortKey for SavingsGoal {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Text(self.name.clone())),
            "targetAmount" | "target_amount" => Some(SortValue::Number(self.target_amount)),
            "currentAmount" | "current_amount" => Some(SortValue::Number(self.current_amount)),
            "targetDate" | "target_date" => Some(SortValue::Date(self.target_date)),
            _ => None,
        }
    }
}

impl SortKey for Investment {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Text(self.name.clone())),
            "symbol" => Some(SortValue::Text(self.symbol.clone())),
            "assetType" | "asset_type" => Some(SortValue::Text(self.asset_type.clone())),
            "shares" => Some(SortValue::Number(self.shares)),
            "currentValue" | "current_value" => Some(SortValue::Number(self.current_value)),
            "purchasePrice" | "purchase_price" => Some(SortValue::Number(self.purchase_price)),
            _ => None,
        }
    }
}

impl SortKey for Debt {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Text(self.name.clone())),
            "type" => Some(SortValue::Text(self.r#type.clone())),
            "lender" => Some(SortValue::Text(self.lender.clone())),
            "balance" => Some(SortValue::Number(self.balance)),
            "interestRate" | "interest_rate" => Some(SortValue::Number(self.interest_rate)),
            "minimumPayment" | "minimum_payment" => Some(SortValue::Number(self.minimum_payment)),
            "dueDate" | "due_date" => Some(SortValue::Date(self.due_date)),
            _ => None,
        }
    }
}
