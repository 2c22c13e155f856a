//! CLI Commands
//!
//! Argument and subcommand definitions.

use std::path::PathBuf;

use certseal_core::ResolutionMode;
use clap::{Parser, Subcommand};

/// Seal hierarchical configuration data with the node's RSA key pair
#[derive(Parser, Debug)]
#[command(name = "certseal")]
#[command(version)]
#[command(about = "Encrypt, decrypt and look up sealed configuration data")]
#[command(long_about = "Encrypts YAML data files with the public key of an SSL \
    certificate, decrypts them with the matching private key, and resolves keys \
    across a hierarchy of sealed data files.\n\n\
    Key locations and the hierarchy are read from hiera.yaml.")]
pub struct Cli {
    /// Settings file (defaults to /etc/puppetlabs/puppet/hiera.yaml)
    #[arg(short, long, global = true, env = "CERTSEAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for lookup answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt a file, writing <FILE>.sealed next to it
    Encrypt {
        /// Plaintext file to seal
        file: PathBuf,
    },

    /// Decrypt a sealed file to stdout or to a file
    Decrypt {
        /// Sealed file to open
        file: PathBuf,

        /// Decrypt even when the input is larger than 64KB
        #[arg(long, alias = "really")]
        confirm_large_file: bool,

        /// Write the plaintext here instead of stdout
        #[arg(long, value_name = "OUT")]
        writefile: Option<PathBuf>,
    },

    /// Resolve a key across the configured hierarchy
    Lookup {
        /// Key to resolve
        key: String,

        /// How values from several sources are combined
        #[arg(short, long, default_value = "first", value_parser = parse_mode)]
        resolution: ResolutionMode,

        /// Scope variable used to interpolate the hierarchy, as NAME=VALUE
        #[arg(short, long = "scope", value_name = "NAME=VALUE", value_parser = parse_scope_pair)]
        scope: Vec<(String, String)>,

        /// Source consulted before the hierarchy
        #[arg(long, value_name = "SOURCE")]
        order_override: Option<String>,

        /// Answer format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

fn parse_mode(s: &str) -> Result<ResolutionMode, String> {
    s.parse()
}

/// Split `name=value`; the value may itself contain `=`
pub fn parse_scope_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scope_pair() {
        assert_eq!(
            parse_scope_pair("hostname=web01").unwrap(),
            ("hostname".to_string(), "web01".to_string())
        );
        assert_eq!(
            parse_scope_pair("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_scope_pair("empty=").unwrap().1, "");
        assert!(parse_scope_pair("novalue").is_err());
        assert!(parse_scope_pair("=value").is_err());
    }

    #[test]
    fn test_really_is_an_alias() {
        let cli = Cli::parse_from(["certseal", "decrypt", "data.sealed", "--really"]);
        match cli.command {
            Commands::Decrypt { confirm_large_file, writefile, .. } => {
                assert!(confirm_large_file);
                assert!(writefile.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_lookup_arguments() {
        let cli = Cli::parse_from([
            "certseal",
            "lookup",
            "ntp_servers",
            "--resolution",
            "array",
            "--scope",
            "hostname=web01",
            "-s",
            "environment=production",
            "--format",
            "json",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Lookup { key, resolution, scope, order_override, format } => {
                assert_eq!(key, "ntp_servers");
                assert_eq!(resolution, ResolutionMode::Array);
                assert_eq!(scope.len(), 2);
                assert_eq!(scope[1], ("environment".to_string(), "production".to_string()));
                assert!(order_override.is_none());
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_lookup_defaults_to_first() {
        let cli = Cli::parse_from(["certseal", "lookup", "key"]);
        match cli.command {
            Commands::Lookup { resolution, format, .. } => {
                assert_eq!(resolution, ResolutionMode::First);
                assert_eq!(format, OutputFormat::Yaml);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["certseal", "lookup", "key", "-r", "merge"]).is_err());
    }
}
