// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use super::{ensure, required};
use crate::context::DataContext;
use crate::db::Medium;

pub fn handle<M: Medium>(ctx: &DataContext<M>, m: &ArgMatches) -> Result<()> {
    let collection = required(m, "collection")?;
    let fmt = required(m, "format")?.to_lowercase();
    let out = required(m, "out")?;
    ensure(fmt == "csv" || fmt == "json", || {
        format!("Unknown format: {} (use csv|json)", fmt)
    })?;

    let count = match collection {
        "cards" => export(ctx.cards(), &fmt, out)?,
        "transactions" => export(ctx.transactions(), &fmt, out)?,
        "budgets" => export(ctx.budgets(), &fmt, out)?,
        "bills" => export(ctx.bills(), &fmt, out)?,
        "savings" => export(ctx.savings_goals(), &fmt, out)?,
        "investments" => export(ctx.investments(), &fmt, out)?,
        "debts" => export(ctx.debts(), &fmt, out)?,
        other => anyhow::bail!("Unknown collection '{}'", other),
    };
    println!("Exported {} {} to {}", count, collection, out);
    Ok(())
}

fn export<T: Serialize>(items: &[T], fmt: &str, out: &str) -> Result<usize> {
    match fmt {
        "csv" => write_csv(items, Path::new(out))?,
        _ => std::fs::write(out, serde_json::to_string_pretty(items)?)
            .with_context(|| format!("Write {}", out))?,
    }
    Ok(items.len())
}

fn cell(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Columns are the union of every record's field names, so records missing
/// an optional field still line up.
fn write_csv<T: Serialize>(items: &[T], out: &Path) -> Result<()> {
    let objects: Vec<serde_json::Map<String, Value>> = items
        .iter()
        .map(|i| match serde_json::to_value(i) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => anyhow::bail!("Record did not serialize to an object"),
            Err(e) => Err(e.into()),
        })
        .collect::<Result<_>>()?;

    let mut headers: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let mut wtr =
        csv::Writer::from_path(out).with_context(|| format!("Create {}", out.display()))?;
    wtr.write_record(&headers)?;
    for obj in &objects {
        wtr.write_record(
            headers
                .iter()
                .map(|h| obj.get(h).map(cell).unwrap_or_default()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
