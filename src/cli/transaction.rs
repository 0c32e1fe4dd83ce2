//! Transaction CLI commands
//!
//! Implements CLI commands for recording, editing and removing transactions.

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::transaction::format_transaction_details;
use crate::error::{FinanceError, FinanceResult};
use crate::models::TransactionId;
use crate::services::{TransactionInput, TransactionService, INPUT_DATE_FORMAT};
use crate::storage::Storage;

/// Transaction fields shared by add and edit; the date is given per command
#[derive(Args)]
pub struct TransactionFieldArgs {
    /// Short description (e.g. "Rent")
    pub description: String,
    /// Positive amount (e.g. "1500" or "85.40")
    pub amount: String,
    /// Income or Expense
    #[arg(short = 't', long = "type")]
    pub kind: String,
    /// Category (Food, Housing, Transport, Leisure, Health, Salary, Other)
    #[arg(short, long)]
    pub category: String,
}

impl TransactionFieldArgs {
    fn into_input(self, date: String) -> TransactionInput {
        TransactionInput {
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            date,
            category: self.category,
        }
    }
}

fn today() -> String {
    chrono::Local::now()
        .date_naive()
        .format(INPUT_DATE_FORMAT)
        .to_string()
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        #[command(flatten)]
        fields: TransactionFieldArgs,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Replace every field of a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[command(flatten)]
        fields: TransactionFieldArgs,
        /// Transaction date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn parse_id(raw: &str) -> FinanceResult<TransactionId> {
    raw.parse().map_err(|_| {
        FinanceError::Validation(format!(
            "Invalid transaction ID: '{}'. Use the number shown in the statement",
            raw
        ))
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add { fields, date } => {
            let date = date.unwrap_or_else(today);
            let txn = service.create(&fields.into_input(date))?;
            println!("Transaction added: #{}", txn.id);
        }

        TransactionCommands::Show { id } => {
            let txn = service.require(parse_id(&id)?)?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Edit { id, fields, date } => {
            let txn = service.update(parse_id(&id)?, &fields.into_input(date))?;
            println!("Transaction updated: #{}", txn.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(parse_id(&id)?)?;
            println!("Transaction deleted: #{} {}", txn.id, txn.description);
        }
    }

    Ok(())
}
