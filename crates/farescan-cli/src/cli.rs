//! Command-line arguments and the scan entry point.

use anyhow::{Context, Result};
use clap::Parser;
use farescan_amadeus::AmadeusClient;
use farescan_core::{run, Config};
use farescan_mail::SmtpNotifier;
use std::path::PathBuf;
use tracing::debug;

use crate::output::{self, ConsoleNotifier};

/// Scan round-trip fares and email the ones under your price threshold
#[derive(Parser, Debug)]
#[command(name = "farescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a TOML config file (defaults to ./farescan.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the alert instead of emailing it
    #[arg(long)]
    pub dry_run: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Flight API base URL
    #[arg(long, env = "AMADEUS_BASE_URL")]
    pub api_url: Option<String>,

    /// Flight API client id
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Flight API client secret
    #[arg(long, env = "API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Address alerts are sent from and to
    #[arg(long, env = "EMAIL_ADDRESS")]
    pub email_address: Option<String>,

    /// SMTP password (an app password for Gmail)
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    pub email_password: Option<String>,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.resolve_config()?;
        debug!(?config, "Configuration resolved");

        let client = AmadeusClient::new(&config.api).context("Failed to build HTTP client")?;

        let summary = if self.dry_run {
            run(&client, &client, &ConsoleNotifier, &config.search).await?
        } else {
            let notifier = SmtpNotifier::new(&config.smtp)?;
            run(&client, &client, &notifier, &config.search).await?
        };

        output::print_summary(&summary, self.dry_run);
        Ok(())
    }

    /// Load the config file, apply env/flag overrides and validate.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref()).context("Failed to load configuration")?;
        self.apply_overrides(&mut config);
        config
            .validate(!self.dry_run)
            .context("Invalid configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            config.api.client_id = key.clone();
        }
        if let Some(secret) = &self.api_secret {
            config.api.client_secret = secret.clone();
        }
        if let Some(address) = &self.email_address {
            config.smtp.address = address.clone();
        }
        if let Some(password) = &self.email_password {
            config.smtp.password = password.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["farescan"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "--api-key",
            "id-from-flag",
            "--api-secret",
            "secret-from-flag",
            "--email-address",
            "me@example.com",
            "--email-password",
            "pw",
            "--api-url",
            "https://api.amadeus.com",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.api.client_id, "id-from-flag");
        assert_eq!(config.api.client_secret, "secret-from-flag");
        assert_eq!(config.api.base_url, "https://api.amadeus.com");
        assert_eq!(config.smtp.address, "me@example.com");
        assert_eq!(config.smtp.password, "pw");
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn test_dry_run_flag() {
        let cli = parse(&["--dry-run", "-v"]);
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let cli = parse(&["--config", "/nonexistent/farescan.toml", "--api-key", "a", "--api-secret", "b"]);
        assert!(cli.resolve_config().is_err());
    }
}
