// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory mirror of every collection, kept in step with the record store.
//!
//! All mutations go through [`DataContext`], which writes to the store first
//! and only then updates the mirror with the value the store returned. A
//! failed write leaves the mirror exactly as it was.

use tracing::{debug, error, info, warn};

use crate::db::{Medium, RecordStore};
use crate::error::{Result, StoreError};
use crate::models::{
    Bill, BillPatch, BillStatus, Budget, BudgetPatch, Card, CardPatch, Collection, Debt,
    DebtPatch, Investment, InvestmentPatch, MarkPaid, NewBill, NewBudget, NewCard, NewDebt,
    NewInvestment, NewRecord, NewSavingsGoal, NewTransaction, Patch, ProfilePatch, Record,
    SavingsGoal, SavingsGoalPatch, Transaction, UserProfile,
};

#[derive(Debug, Clone, Default)]
pub struct Mirror {
    pub cards: Vec<Card>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub bills: Vec<Bill>,
    pub savings_goals: Vec<SavingsGoal>,
    pub investments: Vec<Investment>,
    pub debts: Vec<Debt>,
    pub user_profile: Option<UserProfile>,
    pub loading: bool,
}

/// Outcome of a startup load. Collections listed in `failed` were left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub failed: Vec<Collection>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct DataContext<M> {
    store: RecordStore<M>,
    mirror: Mirror,
}

fn upsert<R: Record>(records: &mut [R], updated: &R) {
    if let Some(slot) = records.iter_mut().find(|r| r.id() == updated.id()) {
        *slot = updated.clone();
    }
}

fn logged<T>(op: &'static str, res: Result<T>) -> Result<T> {
    if let Err(e) = &res {
        error!(op, error = %e, "operation failed");
    }
    res
}

impl<M: Medium> DataContext<M> {
    /// Wraps `store` with an empty mirror. Call [`DataContext::load_all`]
    /// before reading.
    pub fn new(store: RecordStore<M>) -> Self {
        Self {
            store,
            mirror: Mirror::default(),
        }
    }

    pub fn store(&self) -> &RecordStore<M> {
        &self.store
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    pub fn cards(&self) -> &[Card] {
        &self.mirror.cards
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.mirror.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.mirror.budgets
    }

    pub fn bills(&self) -> &[Bill] {
        &self.mirror.bills
    }

    pub fn savings_goals(&self) -> &[SavingsGoal] {
        &self.mirror.savings_goals
    }

    pub fn investments(&self) -> &[Investment] {
        &self.mirror.investments
    }

    pub fn debts(&self) -> &[Debt] {
        &self.mirror.debts
    }

    pub fn user_profile(&self) -> Option<&UserProfile> {
        self.mirror.user_profile.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.mirror.loading
    }

    fn load<R: Record>(&self, failed: &mut Vec<Collection>) -> Vec<R> {
        match self.store.get::<R>() {
            Ok(records) => records,
            Err(e) => {
                let collection = R::COLLECTION.name();
                warn!(collection, error = %e, "load failed, continuing with empty collection");
                failed.push(R::COLLECTION);
                Vec::new()
            }
        }
    }

    /// Rebuilds the mirror from the store. Each collection loads on its own;
    /// one that fails is left empty and the rest still load.
    pub fn load_all(&mut self) -> LoadReport {
        self.mirror.loading = true;
        let mut failed = Vec::new();

        let cards = self.load(&mut failed);
        let transactions = self.load(&mut failed);
        let budgets = self.load(&mut failed);
        let bills = self.load(&mut failed);
        let savings_goals = self.load(&mut failed);
        let investments = self.load(&mut failed);
        let debts = self.load(&mut failed);
        let user_profile = match self.store.get_profile() {
            Ok(p) => p,
            Err(e) => {
                warn!(collection = "user profile", error = %e, "load failed, continuing without profile");
                failed.push(Collection::UserProfile);
                None
            }
        };

        self.mirror = Mirror {
            cards,
            transactions,
            budgets,
            bills,
            savings_goals,
            investments,
            debts,
            user_profile,
            loading: false,
        };
        info!(
            cards = self.mirror.cards.len(),
            transactions = self.mirror.transactions.len(),
            failed = failed.len(),
            "data loaded"
        );
        LoadReport { failed }
    }

    fn create<N: NewRecord>(&self, op: &'static str, new: N) -> Result<N::Output> {
        let record = logged(op, self.store.create(new))?;
        debug!(op, id = record.id(), "created");
        Ok(record)
    }

    fn update<R: Record, P: Patch<R>>(&self, op: &'static str, id: &str, patch: P) -> Result<R> {
        let record = logged(op, self.store.update::<R, P>(id, patch))?;
        debug!(op, id, "updated");
        Ok(record)
    }

    // --- cards --------------------------------------------------------------

    pub fn add_card(&mut self, new: NewCard) -> Result<Card> {
        let card = self.create("add_card", new)?;
        self.mirror.cards.push(card.clone());
        Ok(card)
    }

    pub fn update_card(&mut self, id: &str, patch: CardPatch) -> Result<Card> {
        let card = self.update("update_card", id, patch)?;
        upsert(&mut self.mirror.cards, &card);
        Ok(card)
    }

    /// Removes the card and every transaction it owns, in the store and in
    /// the mirror. Unknown ids are not an error.
    pub fn delete_card(&mut self, id: &str) -> Result<()> {
        logged("delete_card", self.store.delete::<Card>(id))?;
        self.mirror.cards.retain(|c| c.id != id);
        let removed = logged("delete_card", self.store.delete_transactions_for_card(id))?;
        self.mirror.transactions.retain(|t| t.card_id != id);
        debug!(id, transactions = removed, "card deleted");
        Ok(())
    }

    // --- transactions -------------------------------------------------------

    /// Records a transaction and moves its card's balance: purchases add,
    /// payments subtract. When the card is not in the mirror the transaction
    /// is still kept and the balance update is skipped. If the balance update
    /// itself fails the transaction stays recorded and the error is returned.
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        let tx = self.create("add_transaction", new)?;
        self.mirror.transactions.push(tx.clone());

        let balance = self
            .mirror
            .cards
            .iter()
            .find(|c| c.id == tx.card_id)
            .map(|c| c.balance + tx.balance_delta());
        match balance {
            Some(balance) => {
                self.update_card(&tx.card_id, CardPatch::balance(balance))?;
            }
            None => {
                warn!(card_id = %tx.card_id, tx_id = %tx.id, "card not found, balance not updated");
            }
        }
        Ok(tx)
    }

    // --- budgets ------------------------------------------------------------

    pub fn add_budget(&mut self, new: NewBudget) -> Result<Budget> {
        let budget = self.create("add_budget", new)?;
        self.mirror.budgets.push(budget.clone());
        Ok(budget)
    }

    pub fn update_budget(&mut self, id: &str, patch: BudgetPatch) -> Result<Budget> {
        let budget = self.update("update_budget", id, patch)?;
        upsert(&mut self.mirror.budgets, &budget);
        Ok(budget)
    }

    // --- bills --------------------------------------------------------------

    pub fn add_bill(&mut self, new: NewBill) -> Result<Bill> {
        let bill = self.create("add_bill", new)?;
        self.mirror.bills.push(bill.clone());
        Ok(bill)
    }

    pub fn update_bill(&mut self, id: &str, patch: BillPatch) -> Result<Bill> {
        let bill = self.update("update_bill", id, patch)?;
        upsert(&mut self.mirror.bills, &bill);
        Ok(bill)
    }

    /// Marks a pending bill paid. A bill that is already paid comes back
    /// unchanged without a write.
    pub fn pay_bill(&mut self, id: &str) -> Result<Bill> {
        if let Some(bill) = self.mirror.bills.iter().find(|b| b.id == id) {
            if bill.status == BillStatus::Paid {
                return Ok(bill.clone());
            }
        }
        let bill = self.update("pay_bill", id, MarkPaid)?;
        upsert(&mut self.mirror.bills, &bill);
        Ok(bill)
    }

    // --- savings goals ------------------------------------------------------

    pub fn add_savings_goal(&mut self, new: NewSavingsGoal) -> Result<SavingsGoal> {
        let goal = self.create("add_savings_goal", new)?;
        self.mirror.savings_goals.push(goal.clone());
        Ok(goal)
    }

    pub fn update_savings_goal(
        &mut self,
        id: &str,
        patch: SavingsGoalPatch,
    ) -> Result<SavingsGoal> {
        let goal = self.update("update_savings_goal", id, patch)?;
        upsert(&mut self.mirror.savings_goals, &goal);
        Ok(goal)
    }

    // --- investments --------------------------------------------------------

    pub fn add_investment(&mut self, new: NewInvestment) -> Result<Investment> {
        let inv = self.create("add_investment", new)?;
        self.mirror.investments.push(inv.clone());
        Ok(inv)
    }

    pub fn update_investment(&mut self, id: &str, patch: InvestmentPatch) -> Result<Investment> {
        let inv = self.update("update_investment", id, patch)?;
        upsert(&mut self.mirror.investments, &inv);
        Ok(inv)
    }

    // --- debts --------------------------------------------------------------

    pub fn add_debt(&mut self, new: NewDebt) -> Result<Debt> {
        let debt = self.create("add_debt", new)?;
        self.mirror.debts.push(debt.clone());
        Ok(debt)
    }

    pub fn update_debt(&mut self, id: &str, patch: DebtPatch) -> Result<Debt> {
        let debt = self.update("update_debt", id, patch)?;
        upsert(&mut self.mirror.debts, &debt);
        Ok(debt)
    }

    // --- profile ------------------------------------------------------------

    pub fn update_profile(&mut self, patch: ProfilePatch) -> Result<UserProfile> {
        let profile = logged("update_profile", self.store.update_profile(patch))?;
        self.mirror.user_profile = Some(profile.clone());
        Ok(profile)
    }

    /// Looks up a card in the mirror, as [`StoreError::NotFound`] if absent.
    pub fn card(&self, id: &str) -> Result<&Card> {
        self.mirror
            .cards
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found(Collection::Cards.name(), id))
    }
}
