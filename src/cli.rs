// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, crate_version};

fn json_args(cmd: Command) -> Command {
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
            .help("Print as JSON lines"),
    )
    .group(ArgGroup::new("format").args(["json", "jsonl"]))
}

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .version(crate_version!())
        .about("Log, clean, summarise and chart personal expenses kept in a CSV file")
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .global(true)
                .env("SPENDLOG_FILE")
                .value_name("PATH")
                .help("Expense CSV file (default: expenses.csv in the data dir)"),
        )
        .arg(
            Arg::new("charts_dir")
                .long("charts-dir")
                .global(true)
                .env("SPENDLOG_CHARTS_DIR")
                .value_name("DIR")
                .help("Where charts are written (default: charts/ next to the CSV file)"),
        )
        .arg(
            Arg::new("currency")
                .long("currency")
                .global(true)
                .env("SPENDLOG_CURRENCY")
                .value_name("SYMBOL")
                .help("Currency symbol used in printed totals"),
        )
        .subcommand(Command::new("menu").about("Interactive menu (the default)"))
        .subcommand(
            Command::new("add")
                .about("Log a new expense")
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Food, Transport, Shopping, Bills or Other"),
                )
                .arg(Arg::new("description").long("description").default_value("")),
        )
        .subcommand(
            Command::new("batch")
                .about("Enter several expenses in a row, re-prompting on bad input")
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('n')
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(json_args(
            Command::new("summary").about("Total, average and per-category spending"),
        ))
        .subcommand(Command::new("clean").about("Drop rows with an invalid date, amount or category"))
        .subcommand(json_args(
            Command::new("filter")
                .about("List expenses by category and/or date range")
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("from").long("from").help("Start date, inclusive"))
                .arg(Arg::new("to").long("to").help("End date, inclusive")),
        ))
        .subcommand(
            Command::new("chart")
                .about("Render bar, line, pie and histogram charts as SVG")
                .arg(Arg::new("out").long("out").value_name("DIR")),
        )
        .subcommand(Command::new("reload").about("Re-read the CSV file and report its size"))
        .subcommand(Command::new("path").about("Print the resolved data file path"))
}
