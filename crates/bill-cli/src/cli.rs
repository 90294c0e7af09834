//! # Command Line
//!
//! Argument definitions for the `qiwi-bill` binary.

use bill_core::{CustomFields, Customer};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "qiwi-bill", version, about = "Issue, inspect and reject QIWI bills")]
pub struct Cli {
    /// TOML config file; falls back to QIWI_* environment variables
    #[arg(long, global = true, env = "QIWI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print bills as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Issue a new bill
    Issue(IssueArgs),

    /// Show the current status of a bill
    Status {
        bill_id: String,
    },

    /// Reject an unpaid bill
    Cancel {
        bill_id: String,
    },

    /// Check the signature of a saved notification body
    VerifyNotification {
        /// File holding the raw notification body
        #[arg(long)]
        payload: PathBuf,

        /// Value of the X-Api-Signature-SHA256 header
        #[arg(long)]
        signature: String,
    },
}

#[derive(Debug, Args)]
pub struct IssueArgs {
    /// Amount in whole currency units
    #[arg(long, allow_negative_numbers = true)]
    pub amount: i64,

    #[arg(long, default_value = "RUB")]
    pub currency: String,

    /// Hours until the bill expires
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub hours: i64,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub account: Option<String>,

    /// Payment form theme
    #[arg(long)]
    pub theme_code: Option<String>,

    /// Comma-separated payment methods (e.g. "qw,card")
    #[arg(long)]
    pub pay_sources: Option<String>,
}

impl IssueArgs {
    pub fn customer(&self) -> Customer {
        Customer {
            phone: self.phone.clone(),
            email: self.email.clone(),
            account: self.account.clone(),
        }
    }

    pub fn custom_fields(&self) -> CustomFields {
        CustomFields {
            pay_sources_filter: self.pay_sources.clone(),
            theme_code: self.theme_code.clone(),
            ..Default::default()
        }
    }
}
