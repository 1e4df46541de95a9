// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn list_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
    .arg(
        Arg::new("sort")
            .long("sort")
            .action(ArgAction::Append)
            .value_name("FIELD[:asc|desc]")
            .help("Sort key; repeat for tie-breakers"),
    )
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id")
}

fn card_cmd() -> Command {
    Command::new("card")
        .about("Manage payment cards")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a card")
                .allow_negative_numbers(true)
                .arg(req("name", "Display name"))
                .arg(
                    req("type", "Card type")
                        .value_parser(["credit", "debit", "prepaid"]),
                )
                .arg(req("last-four", "Last four digits"))
                .arg(req("expiry", "Expiry as MM/YY"))
                .arg(opt("balance", "Current balance").default_value("0"))
                .arg(opt("limit", "Credit limit"))
                .arg(opt("issuer", "Issuing bank").default_value(""))
                .arg(opt("color", "Display color").default_value("blue")),
        )
        .subcommand(list_flags(Command::new("list").about("List cards")))
        .subcommand(
            Command::new("update")
                .about("Update a card")
                .allow_negative_numbers(true)
                .arg(id_arg())
                .arg(opt("name", "Display name"))
                .arg(opt("type", "Card type").value_parser(["credit", "debit", "prepaid"]))
                .arg(opt("last-four", "Last four digits"))
                .arg(opt("expiry", "Expiry as MM/YY"))
                .arg(opt("balance", "Current balance"))
                .arg(opt("limit", "Credit limit"))
                .arg(opt("issuer", "Issuing bank"))
                .arg(opt("color", "Display color")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a card and its transactions")
                .arg(id_arg()),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a transaction and adjust its card's balance")
                .arg(req("card", "Card id"))
                .arg(req("description", "What it was"))
                .arg(req("amount", "Positive amount"))
                .arg(req("category", "Category"))
                .arg(
                    opt("type", "purchase or payment")
                        .value_parser(["purchase", "payment"])
                        .default_value("purchase"),
                )
                .arg(opt("date", "YYYY-MM-DD, defaults to today"))
                .arg(opt("notes", "Free-form notes").default_value("")),
        )
        .subcommand(list_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(opt("card", "Only this card"))
                .arg(opt("category", "Only this category"))
                .arg(opt("limit", "Max rows").value_parser(value_parser!(usize))),
        ))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Manage budgets")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a budget")
                .arg(req("name", "Budget name"))
                .arg(req("amount", "Budgeted amount"))
                .arg(req("category", "Category"))
                .arg(opt("period", "monthly, weekly or yearly").default_value("monthly")),
        )
        .subcommand(list_flags(Command::new("list").about("List budgets with usage")))
        .subcommand(
            Command::new("update")
                .about("Update a budget")
                .arg(id_arg())
                .arg(opt("name", "Budget name"))
                .arg(opt("amount", "Budgeted amount"))
                .arg(opt("spent", "Amount spent so far"))
                .arg(opt("category", "Category"))
                .arg(opt("period", "monthly, weekly or yearly")),
        )
}

fn bill_cmd() -> Command {
    Command::new("bill")
        .about("Manage bills")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a pending bill")
                .arg(req("name", "Bill name"))
                .arg(req("amount", "Amount due"))
                .arg(req("due", "Due date YYYY-MM-DD"))
                .arg(opt("category", "Category").default_value("utilities"))
                .arg(
                    Arg::new("auto-pay")
                        .long("auto-pay")
                        .action(ArgAction::SetTrue)
                        .help("Paid automatically"),
                ),
        )
        .subcommand(list_flags(
            Command::new("list").about("List bills").arg(
                Arg::new("overdue")
                    .long("overdue")
                    .action(ArgAction::SetTrue)
                    .help("Only pending bills past due"),
            ),
        ))
        .subcommand(
            Command::new("update")
                .about("Update a bill")
                .arg(id_arg())
                .arg(opt("name", "Bill name"))
                .arg(opt("amount", "Amount due"))
                .arg(opt("due", "Due date YYYY-MM-DD"))
                .arg(opt("category", "Category"))
                .arg(
                    opt("auto-pay", "true or false")
                        .value_parser(value_parser!(bool)),
                ),
        )
        .subcommand(Command::new("pay").about("Mark a bill paid").arg(id_arg()))
}

fn savings_cmd() -> Command {
    Command::new("savings")
        .about("Manage savings goals")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a savings goal")
                .arg(req("name", "Goal name"))
                .arg(req("target", "Target amount"))
                .arg(opt("current", "Amount saved so far"))
                .arg(req("date", "Target date YYYY-MM-DD")),
        )
        .subcommand(list_flags(Command::new("list").about("List goals with progress")))
        .subcommand(
            Command::new("update")
                .about("Update a savings goal")
                .arg(id_arg())
                .arg(opt("name", "Goal name"))
                .arg(opt("target", "Target amount"))
                .arg(opt("current", "Amount saved so far"))
                .arg(opt("date", "Target date YYYY-MM-DD")),
        )
}

fn invest_cmd() -> Command {
    Command::new("invest")
        .about("Manage investments")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a holding")
                .arg(req("name", "Holding name"))
                .arg(req("symbol", "Ticker"))
                .arg(req("shares", "Number of shares"))
                .arg(req("value", "Current value"))
                .arg(req("cost", "Purchase price"))
                .arg(req("asset-type", "stocks, bonds, etf, crypto, real-estate, ...")),
        )
        .subcommand(list_flags(
            Command::new("list").about("List holdings and allocation"),
        ))
        .subcommand(
            Command::new("update")
                .about("Update a holding")
                .arg(id_arg())
                .arg(opt("name", "Holding name"))
                .arg(opt("symbol", "Ticker"))
                .arg(opt("shares", "Number of shares"))
                .arg(opt("value", "Current value"))
                .arg(opt("cost", "Purchase price"))
                .arg(opt("asset-type", "Asset type")),
        )
}

fn debt_cmd() -> Command {
    Command::new("debt")
        .about("Manage debts and payoff plans")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a debt")
                .arg(req("name", "Debt name"))
                .arg(req("type", "credit_card, student_loan, mortgage, auto_loan, ..."))
                .arg(req("balance", "Outstanding balance"))
                .arg(opt("original", "Original balance, defaults to the balance"))
                .arg(req("rate", "Annual interest rate in percent"))
                .arg(req("min", "Minimum monthly payment"))
                .arg(req("due", "Next due date YYYY-MM-DD"))
                .arg(opt("lender", "Lender").default_value(""))
                .arg(opt("notes", "Free-form notes").default_value("")),
        )
        .subcommand(list_flags(Command::new("list").about("List debts")))
        .subcommand(
            Command::new("update")
                .about("Update a debt")
                .arg(id_arg())
                .arg(opt("name", "Debt name"))
                .arg(opt("type", "Debt type"))
                .arg(opt("balance", "Outstanding balance"))
                .arg(opt("original", "Original balance"))
                .arg(opt("rate", "Annual interest rate in percent"))
                .arg(opt("min", "Minimum monthly payment"))
                .arg(opt("due", "Next due date YYYY-MM-DD"))
                .arg(opt("lender", "Lender"))
                .arg(opt("notes", "Free-form notes")),
        )
        .subcommand(list_flags(
            Command::new("plan")
                .about("Order debts by a payoff strategy")
                .arg(
                    opt("strategy", "Payoff strategy")
                        .value_parser(["snowball", "avalanche", "standard"])
                        .default_value("snowball"),
                ),
        ))
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("Show or edit the user profile")
        .subcommand_required(true)
        .subcommand(
            Command::new("show").about("Show the profile").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Print as JSON"),
            ),
        )
        .subcommand(
            Command::new("update")
                .about("Update profile fields")
                .arg(opt("name", "Full name"))
                .arg(opt("email", "Email address"))
                .arg(opt("total-balance", "Total balance"))
                .arg(opt("income", "Monthly income"))
                .arg(opt("expenses", "Monthly expenses"))
                .arg(
                    opt("credit-score", "Credit score, 300-850")
                        .value_parser(value_parser!(u32)),
                ),
        )
}

fn prefs_cmd() -> Command {
    Command::new("prefs")
        .about("Display preferences")
        .subcommand_required(true)
        .subcommand(Command::new("show").about("Show locale and currency"))
        .subcommand(
            Command::new("set")
                .about("Change locale and/or currency")
                .arg(opt("locale", "e.g. en-US, de-DE, en-IN"))
                .arg(opt("currency", "ISO code, e.g. USD, EUR")),
        )
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal finance tracker: cards, budgets, bills, savings, investments, debts")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("FINTRACK_DB")
                .value_name("PATH")
                .help("Database file, defaults to the platform data dir"),
        )
        .subcommand(Command::new("init").about("Install sample data on a fresh database"))
        .subcommand(Command::new("summary").about("Overview across all collections"))
        .subcommand(card_cmd())
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(bill_cmd())
        .subcommand(savings_cmd())
        .subcommand(invest_cmd())
        .subcommand(debt_cmd())
        .subcommand(Command::new("credit").about("Credit score and utilization"))
        .subcommand(profile_cmd())
        .subcommand(prefs_cmd())
        .subcommand(
            Command::new("export")
                .about("Export a collection")
                .arg(
                    Arg::new("collection")
                        .required(true)
                        .value_parser([
                            "cards",
                            "transactions",
                            "budgets",
                            "bills",
                            "savings",
                            "investments",
                            "debts",
                        ]),
                )
                .arg(req("format", "csv or json"))
                .arg(req("out", "Output file")),
        )
}
