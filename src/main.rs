// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fintrack::context::DataContext;
use fintrack::{cli, commands, db};

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("FINTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = matches.get_one::<String>("db").map(PathBuf::from);
    let store = db::open_or_init(path.as_deref())?;

    if let Some(("init", _)) = matches.subcommand() {
        if store.seed_demo_data()? {
            println!("Sample data installed");
        } else {
            println!("Database already initialized");
        }
        match path {
            Some(p) => println!("Database at {}", p.display()),
            None => println!("Database at {}", db::db_path()?.display()),
        }
        return Ok(());
    }

    let mut ctx = DataContext::new(store);
    let report = ctx.load_all();
    if !report.is_complete() {
        eprintln!(
            "warning: could not load {}; showing them as empty",
            report
                .failed
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    match matches.subcommand() {
        Some(("summary", sub)) => commands::summary::handle(&ctx, sub)?,
        Some(("card", sub)) => commands::cards::handle(&mut ctx, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ctx, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ctx, sub)?,
        Some(("bill", sub)) => commands::bills::handle(&mut ctx, sub)?,
        Some(("savings", sub)) => commands::savings::handle(&mut ctx, sub)?,
        Some(("invest", sub)) => commands::investments::handle(&mut ctx, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&mut ctx, sub)?,
        Some(("credit", sub)) => commands::credit::handle(&ctx, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut ctx, sub)?,
        Some(("prefs", sub)) => commands::prefs::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
