//! Help text shared by commands that accept the server flags

const GENERAL_OPTIONS_USAGE: &str = "
  --address=addr          The address of the Vault server.
                          Overrides the VAULT_ADDR environment variable if set.

  --ca-cert=path          Path to a PEM encoded CA cert file to use to
                          verify the Vault server SSL certificate.
                          Overrides the VAULT_CACERT environment variable if set.

  --ca-path=path          Path to a directory of PEM encoded CA cert files
                          to verify the Vault server SSL certificate. If both
                          --ca-cert and --ca-path are specified, --ca-cert is used.
                          Overrides the VAULT_CAPATH environment variable if set.

  --client-cert=path      Path to a PEM encoded client certificate for TLS
                          authentication to the Vault server. Must also specify
                          --client-key. Overrides the VAULT_CLIENT_CERT
                          environment variable if set.

  --client-key=path       Path to an unencrypted PEM encoded private key
                          matching the client certificate from --client-cert.
                          Overrides the VAULT_CLIENT_KEY environment variable
                          if set.

  --tls-skip-verify       Do not verify TLS certificate. This is highly
                          not recommended. Verification will also be skipped
                          if VAULT_SKIP_VERIFY is set. Alias: --insecure.
";

/// Usage documentation for the server flags, for inclusion in a command's help
pub fn general_options_usage() -> &'static str {
    GENERAL_OPTIONS_USAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_documents_every_flag() {
        let usage = general_options_usage();
        for flag in [
            "--address",
            "--ca-cert",
            "--ca-path",
            "--client-cert",
            "--client-key",
            "--tls-skip-verify",
            "--insecure",
        ] {
            assert!(usage.contains(flag), "usage is missing {flag}");
        }
    }

    #[test]
    fn test_usage_names_environment_overrides() {
        let usage = general_options_usage();
        for var in [
            "VAULT_ADDR",
            "VAULT_CACERT",
            "VAULT_CAPATH",
            "VAULT_CLIENT_CERT",
            "VAULT_CLIENT_KEY",
            "VAULT_SKIP_VERIFY",
        ] {
            assert!(usage.contains(var), "usage is missing {var}");
        }
    }
}
