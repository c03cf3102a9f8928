pub mod accounts;
pub mod coverage;
pub mod demo;
pub mod import;
pub mod init;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lacuna", about = "Transaction-coverage auditing CLI for personal finance ledgers.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up lacuna: choose a data directory and initialize the database.
    Init {
        /// Path for lacuna data (default: ~/Documents/lacuna)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage accounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Import a CSV file of transactions into an account.
    Import {
        /// Path to CSV file (columns: date, description, amount)
        file: String,
        /// Account name to import into
        #[arg(long)]
        account: String,
    },
    /// Audit accounts for coverage gaps.
    Coverage {
        /// Limit to one account
        #[arg(long)]
        account: Option<String>,
        /// Analysis date: YYYY-MM-DD (default: today)
        #[arg(long = "as-of")]
        as_of: Option<String>,
    },
    /// Load sample data (account, gappy transactions) to explore lacuna.
    Demo,
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// Add a new account.
    Add {
        /// Account name, e.g. 'BofA Checking'
        name: String,
        /// Account type: checking, savings, credit_card, brokerage
        #[arg(long = "type")]
        account_type: String,
        /// Institution name
        #[arg(long)]
        institution: Option<String>,
        /// Expected activity frequency in days (omit to leave untracked)
        #[arg(long)]
        frequency: Option<u32>,
    },
    /// List all accounts.
    List,
    /// Set or clear an account's expected activity frequency.
    Frequency {
        /// Account name
        name: String,
        /// Maximum days of inactivity considered normal
        #[arg(long, conflicts_with = "opt_out")]
        days: Option<u32>,
        /// Exclude the account from coverage tracking
        #[arg(long = "opt-out")]
        opt_out: bool,
    },
}
