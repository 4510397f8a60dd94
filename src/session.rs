// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Prompt-driven front end: the numbered menu and the batch entry loop.
//! Operation failures are printed and the loop carries on; only I/O
//! errors on the terminal itself end a session.

use anyhow::Result;
use log::debug;
use std::io::{BufRead, Write};

use crate::commands::{charts, data, expenses, summary};
use crate::config::Settings;
use crate::models::{Category, NewExpense};
use crate::tracker::ExpenseTracker;
use crate::utils::{fmt_money, parse_amount};

const MENU: &str = "\n===== Smart Expense Tracker =====\n\
1. Log New Expense\n\
2. View Summary\n\
3. Clean Data\n\
4. Filter Expenses\n\
5. Visualize Data\n\
6. Exit";

pub struct Session<'a, R, W> {
    tracker: &'a mut ExpenseTracker,
    settings: &'a Settings,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(tracker: &'a mut ExpenseTracker, settings: &'a Settings, input: R, out: W) -> Self {
        Self {
            tracker,
            settings,
            input,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the menu until "6" or end of input.
    pub fn run_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };
            debug!("menu choice '{}'", choice);
            let outcome = match choice.as_str() {
                "1" => self.log_expense(),
                "2" => summary::print_summary(self.tracker, &self.settings.currency, &mut self.out),
                "3" => data::clean(self.tracker, &mut self.out),
                "4" => self.filter(),
                "5" => charts::visualize(self.tracker, &self.settings.charts_dir, &mut self.out),
                "6" => {
                    writeln!(self.out, "Exiting... Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.out, "Invalid choice! Please try again.")?;
                    Ok(())
                }
            };
            if let Err(err) = outcome {
                writeln!(self.out, "Error: {:#}", err)?;
            }
        }
        Ok(())
    }

    fn log_expense(&mut self) -> Result<()> {
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(());
        };
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(());
        };
        let description = self.prompt("Enter description: ")?.unwrap_or_default();
        expenses::log_interactive(self.tracker, &date, &amount, &category, &description, &mut self.out)
    }

    fn filter(&mut self) -> Result<()> {
        let category = self
            .prompt("Enter category (or press Enter to skip): ")?
            .unwrap_or_default();
        let start = self
            .prompt("Enter start date (or press Enter to skip): ")?
            .unwrap_or_default();
        let end = self
            .prompt("Enter end date (or press Enter to skip): ")?
            .unwrap_or_default();
        let filter = expenses::build_filter(&category, &start, &end)?;
        let rows = self.tracker.filter_expenses(&filter);
        expenses::print_filtered(self.tracker, &rows, &mut self.out)
    }

    /// Front-loaded entry: asks how many expenses to record, re-prompts
    /// each amount and category until valid, saves every accepted entry
    /// and prints them back. Returns how many were recorded.
    pub fn batch_entry(&mut self, count: Option<usize>) -> Result<usize> {
        let n = match count {
            Some(n) => n,
            None => loop {
                let Some(raw) = self.prompt("Enter number of expenses to record: ")? else {
                    return Ok(0);
                };
                match raw.parse::<usize>() {
                    Ok(n) => break n,
                    Err(_) => writeln!(self.out, " Invalid input. Please enter a whole number.")?,
                }
            },
        };

        let mut accepted: Vec<NewExpense> = Vec::new();
        for i in 0..n {
            writeln!(self.out, "\n--- Expense {} ---", i + 1)?;
            let Some(entry) = self.read_entry()? else {
                break;
            };
            match self.tracker.append(entry.clone()) {
                Ok(_) => accepted.push(entry),
                Err(err) => writeln!(self.out, "Error: {:#}", err)?,
            }
        }

        writeln!(self.out, "\n=== Expense Summary ===")?;
        for e in &accepted {
            writeln!(
                self.out,
                "{} | {} | {} | {}",
                e.date,
                fmt_money(&e.amount, &self.settings.currency),
                e.category,
                e.description
            )?;
        }
        Ok(accepted.len())
    }

    /// `None` once the input runs dry.
    fn read_entry(&mut self) -> Result<Option<NewExpense>> {
        let date = loop {
            let Some(raw) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
                return Ok(None);
            };
            match crate::utils::parse_date(&raw) {
                Ok(_) => break raw,
                Err(err) => writeln!(self.out, " {} Try again.", err)?,
            }
        };
        let amount = loop {
            let Some(raw) = self.prompt("Enter amount: ")? else {
                return Ok(None);
            };
            match parse_amount(&raw) {
                Ok(a) => break a,
                Err(crate::error::ExpenseError::NonPositiveAmount(_)) => {
                    writeln!(self.out, " Amount must be positive. Try again.")?
                }
                Err(_) => writeln!(self.out, " Invalid input. Please enter a numeric value.")?,
            }
        };
        let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        let category = loop {
            let Some(raw) = self.prompt(&format!("Enter category {:?}: ", names))? else {
                return Ok(None);
            };
            match raw.parse::<Category>() {
                Ok(c) => break c,
                Err(_) => writeln!(self.out, " Invalid category. Choose from the list.")?,
            }
        };
        let description = self.prompt("Enter description: ")?.unwrap_or_default();
        Ok(Some(NewExpense {
            date,
            amount,
            category,
            description,
        }))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
