// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::io::{self, Write};

use spendlog::config::Settings;
use spendlog::session::Session;
use spendlog::tracker::{ExpenseTracker, Origin};
use spendlog::{cli, commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli::build_cli().get_matches();
    let settings = Settings::from_matches(&matches)?;

    if let Some(("path", _)) = matches.subcommand() {
        println!("{}", settings.file.display());
        return Ok(());
    }

    let mut tracker = ExpenseTracker::open(settings.file.clone())?;
    let mut out = io::stdout();
    match tracker.origin() {
        Origin::Loaded => writeln!(out, "Loaded data from {}", settings.file.display())?,
        Origin::Created => writeln!(
            out,
            "{} not found. Creating a new one.",
            settings.file.display()
        )?,
    }
    commands::data::report_ragged(&tracker, &mut out)?;

    match matches.subcommand() {
        Some(("add", sub)) => commands::expenses::add(&mut tracker, sub, &mut out)?,
        Some(("filter", sub)) => commands::expenses::filter(&tracker, sub, &mut out)?,
        Some(("summary", sub)) => {
            commands::summary::handle(&tracker, &settings.currency, sub, &mut out)?
        }
        Some(("clean", _)) => commands::data::clean(&mut tracker, &mut out)?,
        Some(("reload", _)) => commands::data::reload(&mut tracker, &mut out)?,
        Some(("chart", sub)) => {
            commands::charts::handle(&tracker, &settings.charts_dir, sub, &mut out)?
        }
        Some(("batch", sub)) => {
            let count = sub.get_one::<usize>("count").copied();
            let stdin = io::stdin();
            Session::new(&mut tracker, &settings, stdin.lock(), out).batch_entry(count)?;
        }
        _ => {
            let stdin = io::stdin();
            Session::new(&mut tracker, &settings, stdin.lock(), out).run_menu()?;
        }
    }
    Ok(())
}
