//! # Commands
//!
//! Executes parsed commands against a [`BillingProvider`] and renders
//! the result for the terminal.

use crate::cli::{Cli, Command, IssueArgs};
use anyhow::Context;
use bill_core::{Bill, BillingProvider, BoxedBillingProvider, ExpTime, InvoiceRequest};
use bill_qiwi::{
    dispatch_notification, verify_notification, LoggingNotificationHandler, QiwiClient, QiwiConfig,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Load config from a file when given, the environment otherwise
pub fn load_config(path: Option<&Path>) -> anyhow::Result<QiwiConfig> {
    let config = match path {
        Some(path) => QiwiConfig::from_file(path)?,
        None => QiwiConfig::from_env()?,
    };
    Ok(config)
}

/// Run a parsed command line and return what should be printed
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = load_config(cli.config.as_deref())?;

    if let Command::VerifyNotification { payload, signature } = &cli.command {
        return verify(&config, payload, signature);
    }

    let provider: BoxedBillingProvider = Arc::new(QiwiClient::new(config)?);
    info!("Using provider: {}", provider.provider_name());

    execute(provider.as_ref(), &cli.command, cli.json).await
}

/// Execute a bill command against `provider`
pub async fn execute(
    provider: &dyn BillingProvider,
    command: &Command,
    json: bool,
) -> anyhow::Result<String> {
    let bill = match command {
        Command::Issue(args) => {
            let request = build_request(args)?;
            provider.issue(&request).await?
        }
        Command::Status { bill_id } => provider.status(bill_id).await?,
        Command::Cancel { bill_id } => provider.cancel(bill_id).await?,
        Command::VerifyNotification { .. } => {
            anyhow::bail!("verify-notification does not talk to the API")
        }
    };

    render(&bill, json)
}

fn build_request(args: &IssueArgs) -> anyhow::Result<InvoiceRequest> {
    let mut request = InvoiceRequest::new(args.amount, &args.currency, &ExpTime::hours(args.hours))?
        .with_customer(args.customer())
        .with_custom_fields(args.custom_fields());

    if let Some(comment) = &args.comment {
        request = request.with_comment(comment);
    }

    Ok(request)
}

fn verify(config: &QiwiConfig, payload: &Path, signature: &str) -> anyhow::Result<String> {
    let body = std::fs::read(payload)
        .with_context(|| format!("cannot read {}", payload.display()))?;

    let notification = verify_notification(&config.api_key, &body, signature)?;
    dispatch_notification(&LoggingNotificationHandler, &notification)?;

    Ok(format!(
        "Signature OK: bill [{}] {}",
        notification.bill.bill_id, notification.bill.status.value
    ))
}

fn render(bill: &Bill, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(bill)?);
    }

    let mut out = format!(
        "Bill: {}\nStatus: {}\nAmount: {}",
        bill.bill_id, bill.status.value, bill.amount
    );
    if let Some(expires) = bill.expiration_date_time {
        out.push_str(&format!("\nExpires: {}", expires.to_rfc3339()));
    }
    if !bill.pay_url.is_empty() {
        out.push_str(&format!("\nPay URL: {}", bill.pay_url));
    }
    Ok(out)
}
