use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::GlobalFlags;
pub use root_commands::{BootstrapArgs, Commands, SchemaArgs};

/// Top-level CLI parser for the `foxlog` binary.
#[derive(Debug, Parser)]
#[command(
    name = "foxlog",
    version,
    about = "foxlog - provision the MongoDB error-log collection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file read in addition to ./foxlog.toml and the user config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// MongoDB connection string (overrides config and environment)
    #[arg(long, global = true)]
    pub uri: Option<String>,

    /// Target database (overrides config and environment)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Quiet mode (only the final summary and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            config: self.config.clone(),
            uri: self.uri.clone(),
            database: self.database.clone(),
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bootstrap_defaults_to_seed_without_ttl_or_drop() {
        let cli = Cli::try_parse_from(["foxlog", "bootstrap"]).expect("cli should parse");
        let Commands::Bootstrap(args) = cli.command else {
            panic!("expected bootstrap command");
        };
        assert!(!args.no_seed);
        assert!(!args.ttl);
        assert!(!args.drop);
    }

    #[test]
    fn bootstrap_flags_parse() {
        let cli = Cli::try_parse_from(["foxlog", "bootstrap", "--no-seed", "--ttl", "--drop"])
            .expect("cli should parse");
        let Commands::Bootstrap(args) = cli.command else {
            panic!("expected bootstrap command");
        };
        assert!(args.no_seed);
        assert!(args.ttl);
        assert!(args.drop);
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "foxlog",
            "--uri",
            "mongodb://db.internal:27017",
            "--database",
            "staging_logs",
            "--verbose",
            "indexes",
        ])
        .expect("cli should parse");

        assert_eq!(cli.uri.as_deref(), Some("mongodb://db.internal:27017"));
        assert_eq!(cli.database.as_deref(), Some("staging_logs"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Indexes));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["foxlog", "schema", "--quiet", "--config", "ops.toml"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.config.as_deref(), Some(Path::new("ops.toml")));
        assert!(matches!(cli.command, Commands::Schema(_)));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["foxlog", "migrate"]).is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["foxlog", "--database", "audit", "-q", "indexes"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.database.as_deref(), Some("audit"));
        assert!(flags.quiet);
        assert!(flags.uri.is_none());
    }
}
