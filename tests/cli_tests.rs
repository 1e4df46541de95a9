// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::context::DataContext;
use fintrack::db::{RecordStore, SqliteMedium};
use fintrack::error::StoreError;
use fintrack::models::{BillStatus, CardType};
use fintrack::{cli, commands};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::tempdir;

fn context(seeded: bool) -> DataContext<SqliteMedium> {
    let store = RecordStore::new(SqliteMedium::open_in_memory().unwrap());
    if seeded {
        store.seed_demo_data().unwrap();
    }
    let mut ctx = DataContext::new(store);
    ctx.load_all();
    ctx
}

fn matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["fintrack"];
    argv.extend_from_slice(args);
    cli::build_cli().get_matches_from(argv)
}

fn validation_message(err: anyhow::Error) -> String {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Validation(msg)) => msg.clone(),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn card_add_and_transaction_flow() {
    let mut ctx = context(false);
    let m = matches(&[
        "card",
        "add",
        "--name",
        "Travel",
        "--type",
        "credit",
        "--last-four",
        "9876",
        "--expiry",
        "12/99",
        "--balance",
        "100.00",
        "--limit",
        "5000",
    ]);
    let (_, sub) = m.subcommand().unwrap();
    commands::cards::handle(&mut ctx, sub).unwrap();

    let card = ctx.cards()[0].clone();
    assert_eq!(card.r#type, CardType::Credit);
    assert_eq!(card.credit_limit, Some(Decimal::new(5000, 0)));
    assert_eq!(card.color, "blue");

    let m = matches(&[
        "tx",
        "add",
        "--card",
        &card.id,
        "--description",
        "Groceries",
        "--amount",
        "25.50",
        "--category",
        "food",
        "--date",
        "2024-01-14",
    ]);
    let (_, sub) = m.subcommand().unwrap();
    commands::transactions::handle(&mut ctx, sub).unwrap();
    assert_eq!(ctx.card(&card.id).unwrap().balance, Decimal::new(12550, 2));
}

fn add_card(ctx: &mut DataContext<SqliteMedium>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["card", "add", "--name", "Card", "--last-four", "3456", "--expiry", "06/99"];
    argv.extend_from_slice(args);
    let m = matches(&argv);
    let (_, sub) = m.subcommand().unwrap();
    commands::cards::handle(ctx, sub)
}

fn update_card(ctx: &mut DataContext<SqliteMedium>, id: &str, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["card", "update", id];
    argv.extend_from_slice(args);
    let m = matches(&argv);
    let (_, sub) = m.subcommand().unwrap();
    commands::cards::handle(ctx, sub)
}

#[test]
fn credit_cards_require_a_limit_on_add() {
    let mut ctx = context(false);
    let msg = validation_message(add_card(&mut ctx, &["--type", "credit"]).unwrap_err());
    assert!(msg.contains("required"), "{}", msg);
    validation_message(add_card(&mut ctx, &["--type", "credit", "--limit", "-1"]).unwrap_err());
    validation_message(add_card(&mut ctx, &["--type", "debit", "--limit", "100"]).unwrap_err());
    assert!(ctx.cards().is_empty());

    add_card(&mut ctx, &["--type", "debit"]).unwrap();
    assert_eq!(ctx.cards()[0].credit_limit, None);
}

#[test]
fn card_update_checks_the_merged_limit() {
    let mut ctx = context(false);
    add_card(&mut ctx, &["--type", "debit"]).unwrap();
    let debit = ctx.cards()[0].id.clone();
    add_card(&mut ctx, &["--type", "credit", "--limit", "500"]).unwrap();
    let credit = ctx.cards()[1].id.clone();

    // Debit to credit needs a limit.
    validation_message(update_card(&mut ctx, &debit, &["--type", "credit"]).unwrap_err());
    assert_eq!(ctx.card(&debit).unwrap().r#type, CardType::Debit);
    update_card(&mut ctx, &debit, &["--type", "credit", "--limit", "800"]).unwrap();
    assert_eq!(ctx.card(&debit).unwrap().credit_limit, Some(Decimal::new(800, 0)));

    validation_message(update_card(&mut ctx, &credit, &["--limit", "-50"]).unwrap_err());
    assert_eq!(ctx.card(&credit).unwrap().credit_limit, Some(Decimal::new(500, 0)));

    // Leaving credit clears the limit; a limit on a prepaid card is refused.
    update_card(&mut ctx, &credit, &["--type", "prepaid"]).unwrap();
    assert_eq!(ctx.card(&credit).unwrap().credit_limit, None);
    validation_message(update_card(&mut ctx, &credit, &["--limit", "10"]).unwrap_err());
    assert_eq!(ctx.store().get::<fintrack::models::Card>().unwrap()[1].credit_limit, None);
}

#[test]
fn card_balances_accept_negative_values() {
    let mut ctx = context(false);
    add_card(&mut ctx, &["--type", "prepaid", "--balance", "-20"]).unwrap();
    let id = ctx.cards()[0].id.clone();
    assert_eq!(ctx.cards()[0].balance, Decimal::new(-20, 0));
    update_card(&mut ctx, &id, &["--balance", "-35.50"]).unwrap();
    assert_eq!(ctx.card(&id).unwrap().balance, Decimal::new(-3550, 2));
}

#[test]
fn invalid_card_input_never_reaches_the_store() {
    let mut ctx = context(false);
    let m = matches(&[
        "card", "add", "--name", "Old", "--type", "credit", "--last-four", "12a4",
        "--expiry", "12/99", "--limit", "100",
    ]);
    let (_, sub) = m.subcommand().unwrap();
    let msg = validation_message(commands::cards::handle(&mut ctx, sub).unwrap_err());
    assert!(msg.contains("4 digits"), "{}", msg);

    let m = matches(&[
        "card", "add", "--name", "Old", "--type", "credit", "--last-four", "1234",
        "--expiry", "01/24", "--limit", "100",
    ]);
    let (_, sub) = m.subcommand().unwrap();
    validation_message(commands::cards::handle(&mut ctx, sub).unwrap_err());

    assert!(ctx.cards().is_empty());
    assert!(ctx.store().get::<fintrack::models::Card>().unwrap().is_empty());
}

#[test]
fn non_positive_amounts_are_rejected() {
    let mut ctx = context(true);
    let card_id = ctx.cards()[0].id.clone();
    let m = matches(&[
        "tx", "add", "--card", &card_id, "--description", "Refund", "--amount", "0",
        "--category", "misc",
    ]);
    let (_, sub) = m.subcommand().unwrap();
    validation_message(commands::transactions::handle(&mut ctx, sub).unwrap_err());
    assert_eq!(ctx.transactions().len(), 4);
}

#[test]
fn bill_pay_and_profile_update() {
    let mut ctx = context(true);
    let bill_id = ctx.bills()[0].id.clone();
    let m = matches(&["bill", "pay", &bill_id]);
    let (_, sub) = m.subcommand().unwrap();
    commands::bills::handle(&mut ctx, sub).unwrap();
    assert_eq!(ctx.bills()[0].status, BillStatus::Paid);

    let m = matches(&["profile", "update", "--email", "not-an-email"]);
    let (_, sub) = m.subcommand().unwrap();
    validation_message(commands::profile::handle(&mut ctx, sub).unwrap_err());

    let m = matches(&["profile", "update", "--credit-score", "790"]);
    let (_, sub) = m.subcommand().unwrap();
    commands::profile::handle(&mut ctx, sub).unwrap();
    assert_eq!(ctx.user_profile().unwrap().credit_score, 790);
    assert_eq!(ctx.user_profile().unwrap().name, "Alex Morgan");
}

#[test]
fn unknown_card_update_reports_not_found() {
    let mut ctx = context(true);
    let m = matches(&["card", "update", "missing", "--name", "X"]);
    let (_, sub) = m.subcommand().unwrap();
    let err = commands::cards::handle(&mut ctx, sub).unwrap_err();
    let store_err = err.downcast_ref::<StoreError>().unwrap();
    assert!(store_err.is_not_found());
}

#[test]
fn prefs_set_validates_and_persists() {
    let ctx = context(false);
    let m = matches(&["prefs", "set", "--locale", "de-DE", "--currency", "eur"]);
    let (_, sub) = m.subcommand().unwrap();
    commands::prefs::handle(&ctx, sub).unwrap();
    let prefs = ctx.store().preferences().unwrap();
    assert_eq!(prefs.locale, "de-DE");
    assert_eq!(prefs.currency, "EUR");

    let m = matches(&["prefs", "set", "--locale", "tlh-KL"]);
    let (_, sub) = m.subcommand().unwrap();
    validation_message(commands::prefs::handle(&ctx, sub).unwrap_err());
    assert_eq!(ctx.store().preferences().unwrap().locale, "de-DE");
}

#[test]
fn export_cards_as_json() {
    let ctx = context(true);
    let dir = tempdir().unwrap();
    let out = dir.path().join("cards.json");
    let out_str = out.to_string_lossy().to_string();

    let m = matches(&["export", "cards", "--format", "json", "--out", &out_str]);
    let (_, sub) = m.subcommand().unwrap();
    commands::exporter::handle(&ctx, sub).unwrap();

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let arr = written.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["name"], "Chase Sapphire Preferred");
    assert_eq!(arr[0]["lastFour"], "4587");
    assert_eq!(arr[2]["creditLimit"], Value::Null);
}

#[test]
fn export_transactions_as_csv() {
    let ctx = context(true);
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    let out_str = out.to_string_lossy().to_string();

    let m = matches(&["export", "transactions", "--format", "CSV", "--out", &out_str]);
    let (_, sub) = m.subcommand().unwrap();
    commands::exporter::handle(&ctx, sub).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let desc_col = headers.iter().position(|h| h == "description").unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[0][desc_col], "Salary Deposit");
    assert!(headers.iter().any(|h| h == "cardId"));
}

#[test]
fn export_rejects_unknown_format() {
    let ctx = context(true);
    let dir = tempdir().unwrap();
    let out = dir.path().join("cards.xml");
    let out_str = out.to_string_lossy().to_string();

    let m = matches(&["export", "cards", "--format", "xml", "--out", &out_str]);
    let (_, sub) = m.subcommand().unwrap();
    let msg = validation_message(commands::exporter::handle(&ctx, sub).unwrap_err());
    assert!(msg.contains("xml"));
    assert!(!out.exists());
}

#[test]
fn list_sort_flag_parses() {
    let m = matches(&["debt", "list", "--sort", "balance:desc", "--sort", "name", "--json"]);
    let (_, debt) = m.subcommand().unwrap();
    let (_, list) = debt.subcommand().unwrap();
    let sorts: Vec<&String> = list.get_many::<String>("sort").unwrap().collect();
    assert_eq!(sorts, ["balance:desc", "name"]);
    assert!(list.get_flag("json"));
}
