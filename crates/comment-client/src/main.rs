//! Comment form submission from the command line.
//!
//! Submits one comment form the way the page's submit handler does: the
//! `--field` arguments play the form controls, `--action` and `--method` play
//! the form's attributes, and alerts are printed to stdout.
//!
//! # Usage
//!
//! ```text
//! comment-client --page-url http://127.0.0.1:3000/ \
//!     --field name=Ada --field "text=Hello there"
//!
//! Options:
//!   --page-url   <URL>         Page the form lives on [default: http://127.0.0.1:3000/]
//!   --action     <ACTION>      Form action attribute [default: /create]
//!   --method     <METHOD>      Form method attribute [default: post]
//!   --field      <NAME=VALUE>  Form control value; repeat for each control
//!   --timeout-ms <MS>          Request timeout [default: 10000]
//! ```
//!
//! Exits non-zero when the submission fails.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use comment_client::application::{SubmitFormUseCase, SubmitOutcome};
use comment_client::domain::{FormTarget, SubmitConfig};
use comment_client::infrastructure::{HttpPayloadSender, TerminalFormView};
use comment_core::{parse_field, FormFields};

/// `tracing` filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Submits a comment form as JSON.
#[derive(Debug, Parser)]
#[command(
    name = "comment-client",
    about = "Serializes form fields to JSON and submits them like the comment form does",
    version
)]
struct Cli {
    /// URL of the page hosting the form; relative actions resolve against it.
    #[arg(long, default_value = "http://127.0.0.1:3000/", env = "COMMENT_PAGE_URL")]
    page_url: String,

    /// The form's `action` attribute.
    #[arg(long, default_value = "/create")]
    action: String,

    /// The form's `method` attribute.
    #[arg(long, default_value = "post")]
    method: String,

    /// One form control as `name=value`.  Repeat for every control.
    #[arg(long = "field", value_name = "NAME=VALUE")]
    fields: Vec<String>,

    /// Request timeout in milliseconds.
    #[arg(long, default_value_t = 10_000, env = "COMMENT_TIMEOUT_MS")]
    timeout_ms: u64,
}

impl Cli {
    /// Resolves the target, collects the fields, and builds the config.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable page URL, an invalid action or
    /// method, or a `--field` without `=`.
    fn into_parts(self) -> anyhow::Result<(FormTarget, FormFields, SubmitConfig)> {
        let page_url = Url::parse(&self.page_url)
            .with_context(|| format!("invalid page URL: '{}'", self.page_url))?;

        let target =
            FormTarget::from_attributes(&page_url, Some(&self.action), Some(&self.method))?;

        let mut fields = FormFields::new();
        for arg in &self.fields {
            let (name, value) = parse_field(arg)?;
            fields.push(name, value);
        }

        let config = SubmitConfig {
            timeout: Duration::from_millis(self.timeout_ms),
            ..SubmitConfig::default()
        };

        Ok((target, fields, config))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout carries only the alerts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let (target, fields, config) = Cli::parse().into_parts()?;

    info!(method = target.method(), url = %target.url(), "submitting form");

    let sender = HttpPayloadSender::from_config(&config)?;
    let view = Arc::new(TerminalFormView::new(fields));
    let use_case = SubmitFormUseCase::new(view, Arc::new(sender), target, config);

    match use_case.submit().await {
        SubmitOutcome::Submitted(response) => {
            info!("server response: {response}");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Failed(_) | SubmitOutcome::Busy => Ok(ExitCode::FAILURE),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_local_create_with_post() {
        // Arrange
        let cli = Cli::parse_from(["comment-client"]);

        // Act
        let (target, fields, config) = cli.into_parts().unwrap();

        // Assert
        assert_eq!(target.url().as_str(), "http://127.0.0.1:3000/create");
        assert_eq!(target.method(), "POST");
        assert!(fields.is_empty());
        assert_eq!(config.timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_fields_keep_command_line_order() {
        let cli = Cli::parse_from([
            "comment-client",
            "--field",
            "name=Ada",
            "--field",
            "text=a=b",
        ]);

        let (_, fields, _) = cli.into_parts().unwrap();

        let pairs: Vec<_> = fields.iter().collect();
        assert_eq!(pairs, [("name", "Ada"), ("text", "a=b")]);
    }

    #[test]
    fn test_timeout_override() {
        let cli = Cli::parse_from(["comment-client", "--timeout-ms", "250"]);
        let (_, _, config) = cli.into_parts().unwrap();
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_field_without_separator_is_error() {
        let cli = Cli::parse_from(["comment-client", "--field", "name"]);
        assert!(cli.into_parts().is_err());
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(DEFAULT_LOG_FILTER, "info");
        assert!(DEFAULT_LOG_FILTER.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_invalid_page_url_is_error() {
        let cli = Cli::parse_from(["comment-client", "--page-url", "not a url"]);
        assert!(cli.into_parts().is_err());
    }
}
