//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap and
//! the commands that report on session resolution.

use crate::auth::read_vault_keys;
use crate::cli::flags::ServerFlags;
use crate::cli::usage::general_options_usage;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::Session;
use crate::utils::format::{OutputFormat, TableFormatter};
use crate::utils::ui::ConsoleUi;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Version string with the git revision baked in at build time
fn get_version() -> &'static str {
    env!("VERSION_WITH_GIT")
}

#[derive(Parser)]
#[command(name = "vault-session")]
#[command(about = "Resolve Vault connection settings and credentials")]
#[command(version = get_version(), author)]
#[command(after_help = general_options_usage())]
#[command(args_override_self = true)]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerFlags,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the effective connection configuration
    Config {
        /// Address overriding the top-level --address and VAULT_ADDR
        #[arg(long, value_name = "ADDR")]
        address: Option<String>,
    },
    /// Resolve a client and report where its token came from
    Token {
        /// Address overriding the top-level --address and VAULT_ADDR
        #[arg(long, value_name = "ADDR")]
        address: Option<String>,
        /// Token overriding every other source
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
        /// Print the token itself
        #[arg(long)]
        show: bool,
    },
    /// Summarize the cached credential file without printing secrets
    Keys {
        /// Credential file to read
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Print help for the server options
    Usage,
}

#[derive(Debug, Tabled, Serialize)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    setting: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl SettingRow {
    fn new<S: Into<String>>(setting: &'static str, value: S) -> Self {
        Self {
            setting,
            value: value.into(),
        }
    }
}

fn presence(value: &str) -> &'static str {
    if value.is_empty() {
        "unset"
    } else {
        "set"
    }
}

fn config_rows(config: &ClientConfig) -> Vec<SettingRow> {
    let mut rows = vec![SettingRow::new("address", config.address.as_str())];

    match &config.tls {
        Some(tls) => {
            rows.push(SettingRow::new("ca_cert", tls.ca_cert.as_str()));
            rows.push(SettingRow::new("ca_path", tls.ca_path.as_str()));
            rows.push(SettingRow::new("client_cert", tls.client_cert.as_str()));
            rows.push(SettingRow::new("client_key", tls.client_key.as_str()));
            rows.push(SettingRow::new("tls_server_name", tls.tls_server_name.as_str()));
            rows.push(SettingRow::new("insecure", tls.insecure.to_string()));
        }
        None => rows.push(SettingRow::new("tls", "default")),
    }

    let token = config.token.as_deref().unwrap_or_default();
    rows.push(SettingRow::new("environment_token", presence(token)));
    rows
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let formatter = TableFormatter::new(self.format, self.no_color);
        let mut session = Session::new(Box::new(ConsoleUi::new(self.no_color)));
        session.bind_server_flags(self.server);

        match self.command {
            Commands::Config { address } => execute_config_command(&session, address, &formatter),
            Commands::Token {
                address,
                token,
                show,
            } => execute_token_command(&mut session, address, token, show, &formatter),
            Commands::Keys { path } => execute_keys_command(&session, path, &formatter),
            Commands::Usage => {
                session.ui().output(general_options_usage());
                Ok(())
            }
        }
    }
}

fn execute_config_command(
    session: &Session,
    address: Option<String>,
    formatter: &TableFormatter,
) -> Result<()> {
    let config = session.config(address.as_deref().unwrap_or_default())?;
    let rendered = formatter.format_table(&config_rows(&config))?;
    session.ui().output(&rendered);
    Ok(())
}

fn execute_token_command(
    session: &mut Session,
    address: Option<String>,
    token: Option<String>,
    show: bool,
    formatter: &TableFormatter,
) -> Result<()> {
    let client = session.client(
        address.as_deref().unwrap_or_default(),
        token.as_deref().unwrap_or_default(),
    )?;

    let value = if show {
        client.token().to_string()
    } else {
        presence(client.token()).to_string()
    };

    let rows = vec![
        SettingRow::new("address", client.address()),
        SettingRow::new("token_source", session.token_source().to_string()),
        SettingRow::new("token", value),
    ];

    if client.token().is_empty() {
        session
            .ui()
            .warn("No token found; requests will be unauthenticated");
    }

    let rendered = formatter.format_table(&rows)?;
    session.ui().output(&rendered);
    Ok(())
}

fn execute_keys_command(
    session: &Session,
    path: Option<PathBuf>,
    formatter: &TableFormatter,
) -> Result<()> {
    let path = path.unwrap_or_else(|| session.keys_path().to_path_buf());
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    let keys = read_vault_keys(&path)?;

    let rows = vec![
        SettingRow::new("path", path.display().to_string()),
        SettingRow::new("exists", path.exists().to_string()),
        SettingRow::new("root_token", presence(&keys.root_token)),
        SettingRow::new("master_keys", keys.master_keys.len().to_string()),
        SettingRow::new("token", presence(&keys.token)),
    ];

    let rendered = formatter.format_table(&rows)?;
    session.ui().output(&rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TlsConfig;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_server_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "vault-session",
            "--address",
            "https://vault:8200",
            "--tls-skip-verify",
            "token",
            "--token",
            "s.abc",
        ])
        .unwrap();

        assert_eq!(cli.server.address, "https://vault:8200");
        assert!(cli.server.insecure);
        match cli.command {
            Commands::Token { token, show, .. } => {
                assert_eq!(token.as_deref(), Some("s.abc"));
                assert!(!show);
            }
            _ => panic!("expected token command"),
        }
    }

    #[test]
    fn test_config_subcommand_address() {
        let cli =
            Cli::try_parse_from(["vault-session", "config", "--address", "https://x:8200"]).unwrap();

        assert!(cli.server.address.is_empty());
        match cli.command {
            Commands::Config { address } => {
                assert_eq!(address.as_deref(), Some("https://x:8200"));
            }
            _ => panic!("expected config command"),
        }
    }

    #[test]
    fn test_token_subcommand_address_and_token() {
        let cli = Cli::try_parse_from([
            "vault-session",
            "--address",
            "https://outer:8200",
            "token",
            "--address",
            "https://inner:8200",
            "--token",
            "s.abc",
        ])
        .unwrap();

        assert_eq!(cli.server.address, "https://outer:8200");
        match cli.command {
            Commands::Token { address, token, .. } => {
                assert_eq!(address.as_deref(), Some("https://inner:8200"));
                assert_eq!(token.as_deref(), Some("s.abc"));
            }
            _ => panic!("expected token command"),
        }
    }

    #[test]
    fn test_config_rows_hide_token() {
        let config = ClientConfig {
            token: Some("s.secret".to_string()),
            tls: Some(TlsConfig {
                insecure: true,
                ..Default::default()
            }),
            ..Default::default()
        };

        let rows = config_rows(&config);
        assert!(rows.iter().all(|row| row.value != "s.secret"));
        assert!(rows
            .iter()
            .any(|row| row.setting == "environment_token" && row.value == "set"));
        assert!(rows
            .iter()
            .any(|row| row.setting == "insecure" && row.value == "true"));
    }

    #[test]
    fn test_config_rows_default_tls() {
        let rows = config_rows(&ClientConfig::default());
        assert!(rows
            .iter()
            .any(|row| row.setting == "tls" && row.value == "default"));
    }
}
