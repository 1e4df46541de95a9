// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::db::{self, Medium, Preferences, RecordStore, SqliteMedium, INITIALIZED_KEY};
use fintrack::error::StoreError;
use fintrack::models::*;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn store() -> RecordStore<SqliteMedium> {
    RecordStore::new(SqliteMedium::open_in_memory().unwrap())
}

fn new_budget(name: &str) -> NewBudget {
    NewBudget {
        name: name.into(),
        amount: Decimal::new(100000, 2),
        category: "food".into(),
        period: "monthly".into(),
    }
}

#[test]
fn empty_collections_read_as_empty() {
    let s = store();
    assert!(s.get::<Card>().unwrap().is_empty());
    assert!(s.get::<Debt>().unwrap().is_empty());
    assert!(s.get_profile().unwrap().is_none());
    assert!(!s.is_initialized().unwrap());
}

#[test]
fn create_assigns_id_and_preserves_order() {
    let s = store();
    let a = s.create(new_budget("Food")).unwrap();
    let b = s.create(new_budget("Fun")).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.spent, Decimal::ZERO);

    let all = s.get::<Budget>().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], a);
    assert_eq!(all[1].name, "Fun");
}

#[test]
fn update_merges_and_stamps() {
    let s = store();
    let goal = s
        .create(NewSavingsGoal {
            name: "Vacation Fund".into(),
            target_amount: Decimal::new(3000, 0),
            current_amount: None,
            target_date: NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
        })
        .unwrap();
    assert_eq!(goal.current_amount, Decimal::ZERO);
    assert!(goal.updated_at.is_none());

    let updated = s
        .update::<SavingsGoal, _>(
            &goal.id,
            SavingsGoalPatch {
                current_amount: Some(Decimal::new(2100, 0)),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.current_amount, Decimal::new(2100, 0));
    assert_eq!(updated.name, "Vacation Fund");
    assert_eq!(updated.created_at, goal.created_at);
    assert!(updated.updated_at.is_some());
    assert_eq!(s.get::<SavingsGoal>().unwrap()[0], updated);
}

#[test]
fn update_of_missing_id_is_not_found() {
    let s = store();
    s.create(new_budget("Food")).unwrap();
    let err = s
        .update::<Budget, _>("missing", BudgetPatch::default())
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_storage_fault());
    assert_eq!(s.get::<Budget>().unwrap().len(), 1);
}

#[test]
fn delete_is_tolerant() {
    let s = store();
    let a = s.create(new_budget("Food")).unwrap();
    s.delete::<Budget>("missing").unwrap();
    assert_eq!(s.get::<Budget>().unwrap().len(), 1);
    s.delete::<Budget>(&a.id).unwrap();
    assert!(s.get::<Budget>().unwrap().is_empty());
    s.delete::<Budget>(&a.id).unwrap();
}

#[test]
fn corrupt_content_is_reported_not_swallowed() {
    let s = store();
    s.medium().write(Collection::Cards.key(), "{not json").unwrap();
    let err = s.get::<Card>().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "fintrack_cards"));
    assert!(err.is_storage_fault());
    // Other collections are unaffected.
    assert!(s.get::<Bill>().unwrap().is_empty());
}

#[test]
fn legacy_records_with_numeric_fields_load() {
    let s = store();
    let raw = r#"[{"id":"1700000000000","name":"Chase","type":"credit","lastFour":"4587",
        "expiry":"12/25","balance":2450.75,"creditLimit":10000,"issuer":"Chase",
        "color":"blue","createdAt":"2024-01-01T00:00:00.000Z"}]"#;
    s.medium().write(Collection::Cards.key(), raw).unwrap();
    let cards = s.get::<Card>().unwrap();
    assert_eq!(cards[0].id, "1700000000000");
    assert_eq!(cards[0].balance, Decimal::new(245075, 2));
    assert_eq!(cards[0].credit_limit, Some(Decimal::new(10000, 0)));
}

#[test]
fn profile_update_creates_blank_profile() {
    let s = store();
    let p = s
        .update_profile(ProfilePatch {
            name: Some("Sam".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(p.name, "Sam");
    assert_eq!(p.email, "");
    assert_eq!(p.credit_score, 0);

    let again = s
        .update_profile(ProfilePatch {
            credit_score: Some(700),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(again.id, p.id);
    assert_eq!(again.name, "Sam");
    assert_eq!(s.get_profile().unwrap(), Some(again));
}

#[test]
fn seed_installs_demo_data_once() {
    let s = store();
    assert!(s.seed_demo_data().unwrap());
    assert!(s.is_initialized().unwrap());
    assert!(s.medium().read(INITIALIZED_KEY).unwrap().is_some());

    let cards = s.get::<Card>().unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(s.get::<Transaction>().unwrap().len(), 4);
    assert_eq!(s.get::<Budget>().unwrap().len(), 3);
    assert_eq!(s.get::<Bill>().unwrap().len(), 3);
    assert_eq!(s.get::<SavingsGoal>().unwrap().len(), 3);
    assert_eq!(s.get::<Investment>().unwrap().len(), 3);
    assert_eq!(s.get::<Debt>().unwrap().len(), 3);
    let profile = s.get_profile().unwrap().unwrap();
    assert_eq!(profile.name, "Alex Morgan");
    assert_eq!(profile.credit_score, 725);

    // Every seeded transaction points at a seeded card.
    for t in s.get::<Transaction>().unwrap() {
        assert!(cards.iter().any(|c| c.id == t.card_id));
    }

    assert!(!s.seed_demo_data().unwrap());
    assert_eq!(s.get::<Card>().unwrap(), cards);
}

#[test]
fn seed_never_overwrites_user_data() {
    let s = store();
    s.medium().write(INITIALIZED_KEY, "true").unwrap();
    s.create(new_budget("Mine")).unwrap();
    assert!(!s.seed_demo_data().unwrap());
    let budgets = s.get::<Budget>().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].name, "Mine");
}

#[test]
fn preferences_round_trip() {
    let s = store();
    assert_eq!(s.preferences().unwrap(), Preferences::default());
    let prefs = Preferences {
        locale: "de-DE".into(),
        currency: "EUR".into(),
    };
    s.set_preferences(&prefs).unwrap();
    assert_eq!(s.preferences().unwrap(), prefs);
}

#[test]
fn file_store_persists_across_opens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fintrack.sqlite");
    {
        let s = db::open_or_init(Some(path.as_path())).unwrap();
        s.create(new_budget("Food")).unwrap();
    }
    let s = db::open_or_init(Some(path.as_path())).unwrap();
    let budgets = s.get::<Budget>().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].name, "Food");
}

#[test]
fn cascade_removes_only_the_cards_transactions() {
    let s = store();
    let tx = |card: &str| NewTransaction {
        card_id: card.into(),
        description: "Coffee".into(),
        amount: Decimal::new(450, 2),
        category: "food".into(),
        r#type: TransactionType::Purchase,
        date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        notes: String::new(),
    };
    s.create(tx("a")).unwrap();
    s.create(tx("b")).unwrap();
    s.create(tx("a")).unwrap();
    assert_eq!(s.delete_transactions_for_card("a").unwrap(), 2);
    assert_eq!(s.delete_transactions_for_card("zzz").unwrap(), 0);
    let left = s.get::<Transaction>().unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].card_id, "b");
}
