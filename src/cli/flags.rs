//! Common command-line flags
//!
//! Commands that talk to a Vault server share a group of options selecting
//! the server and its TLS settings. The group can be flattened into a derive
//! based CLI or registered on a fresh [`Command`] with [`flag_set`].

use crate::error::Result;
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};

/// Positional arguments left over after flag parsing
const REMAINING_ARGS: &str = "args";

/// Named groups of options a command can register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagGroup {
    /// Server address and TLS options
    Server,
}

impl FlagGroup {
    /// Groups registered when a command does not choose
    pub const DEFAULT: &'static [FlagGroup] = &[FlagGroup::Server];
}

/// Server selection flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ServerFlags {
    /// The address of the Vault server
    #[arg(long, value_name = "ADDR", default_value = "", hide_default_value = true)]
    pub address: String,

    /// PEM encoded CA cert file used to verify the server certificate
    #[arg(long, value_name = "PATH", default_value = "", hide_default_value = true)]
    pub ca_cert: String,

    /// Directory of PEM encoded CA cert files
    #[arg(long, value_name = "PATH", default_value = "", hide_default_value = true)]
    pub ca_path: String,

    /// PEM encoded client certificate for TLS authentication
    #[arg(long, value_name = "PATH", default_value = "", hide_default_value = true)]
    pub client_cert: String,

    /// Unencrypted PEM encoded key matching the client certificate
    #[arg(long, value_name = "PATH", default_value = "", hide_default_value = true)]
    pub client_key: String,

    /// Do not verify the server TLS certificate
    #[arg(long, visible_alias = "tls-skip-verify")]
    pub insecure: bool,
}

impl ServerFlags {
    /// True when any TLS option was given
    pub fn has_tls(&self) -> bool {
        !self.ca_cert.is_empty()
            || !self.ca_path.is_empty()
            || !self.client_cert.is_empty()
            || !self.client_key.is_empty()
            || self.insecure
    }
}

/// Build a command named `name` carrying the options of each selected group.
///
/// Arguments are parsed without a leading binary name. Parsing stops at the
/// first positional argument; it and everything after it are collected as
/// remaining arguments.
pub fn flag_set(name: &'static str, groups: &[FlagGroup]) -> Command {
    let mut command = Command::new(name)
        .no_binary_name(true)
        .args_override_self(true)
        .arg(
            Arg::new(REMAINING_ARGS)
                .action(ArgAction::Append)
                .num_args(1..)
                .trailing_var_arg(true),
        );

    for group in groups {
        command = match group {
            FlagGroup::Server => ServerFlags::augment_args(command),
        };
    }

    command
}

/// Extract the server flags from parsed matches
pub fn server_flags(matches: &ArgMatches) -> Result<ServerFlags> {
    Ok(ServerFlags::from_arg_matches(matches)?)
}

/// Positional arguments that followed the flags
pub fn remaining_args(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>(REMAINING_ARGS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<ArgMatches, clap::Error> {
        flag_set("test", FlagGroup::DEFAULT).try_get_matches_from(args)
    }

    #[test]
    fn test_flag_set_registers_server_flags() {
        let command = flag_set("test", FlagGroup::DEFAULT);
        let names: Vec<_> = command
            .get_arguments()
            .filter_map(|arg| arg.get_long())
            .collect();

        for flag in ["address", "ca-cert", "ca-path", "client-cert", "client-key", "insecure"] {
            assert!(names.contains(&flag), "missing --{flag}");
        }
    }

    #[test]
    fn test_empty_selection_registers_nothing() {
        let command = flag_set("test", &[]);
        assert_eq!(
            command
                .get_arguments()
                .filter(|arg| arg.get_long().is_some())
                .count(),
            0
        );
    }

    #[test]
    fn test_parse_all_flags() {
        let matches = parse(&[
            "--address=https://vault:8200",
            "--ca-cert",
            "/tls/ca.pem",
            "--ca-path=/tls/cas",
            "--client-cert=/tls/client.pem",
            "--client-key=/tls/client-key.pem",
            "--insecure",
        ])
        .unwrap();

        let flags = server_flags(&matches).unwrap();
        assert_eq!(flags.address, "https://vault:8200");
        assert_eq!(flags.ca_cert, "/tls/ca.pem");
        assert_eq!(flags.ca_path, "/tls/cas");
        assert_eq!(flags.client_cert, "/tls/client.pem");
        assert_eq!(flags.client_key, "/tls/client-key.pem");
        assert!(flags.insecure);
        assert!(flags.has_tls());
    }

    #[test]
    fn test_tls_skip_verify_alias() {
        let matches = parse(&["--tls-skip-verify"]).unwrap();
        assert!(server_flags(&matches).unwrap().insecure);
    }

    #[test]
    fn test_defaults_are_empty() {
        let matches = parse(&[]).unwrap();
        let flags = server_flags(&matches).unwrap();
        assert_eq!(flags, ServerFlags::default());
        assert!(!flags.has_tls());
    }

    #[test]
    fn test_remaining_args_after_flags() {
        let matches =
            parse(&["--address", "http://127.0.0.1:8200", "secret/app", "extra"]).unwrap();
        assert_eq!(remaining_args(&matches), vec!["secret/app", "extra"]);
        assert_eq!(server_flags(&matches).unwrap().address, "http://127.0.0.1:8200");
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = parse(&["--no-such-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
