//! Command-line interface for recipebox.
//!
//! This module provides the CLI structure for the `rbox` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat, RenderCommand,
    ShowCommand, StatusCommand,
};

/// rbox - Keep your recipes in one place
///
/// Add, list, view and delete recipes stored in a local catalog, and render
/// the catalog as HTML.
#[derive(Debug, Parser)]
#[command(name = "rbox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a recipe
    Add(AddCommand),

    /// List all recipes
    List(ListCommand),

    /// Show one recipe
    Show(ShowCommand),

    /// Delete a recipe
    Delete(DeleteCommand),

    /// Render the catalog as an HTML page
    Render(RenderCommand),

    /// List the configured categories
    Categories,

    /// Show catalog and store status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Whether the command reads the active configuration.
    ///
    /// `config path` and `config validate` only inspect files, so they still
    /// run when the active configuration is invalid.
    #[must_use]
    pub fn needs_config(&self) -> bool {
        !matches!(
            self,
            Self::Config(ConfigCommand::Path | ConfigCommand::Validate { .. })
        )
    }
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Categories,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "rbox");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let args = vec![
            "rbox",
            "add",
            "--name",
            "Soup",
            "--category",
            "Dinner",
            "--ingredients",
            "water\nsalt",
            "--instructions",
            "boil",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.name, "Soup");
        assert_eq!(add.ingredients, "water\nsalt");
        assert!(add.description.is_empty());
    }

    #[test]
    fn test_parse_add_without_fields_is_allowed() {
        // Missing fields are reported by the validator, not by clap
        let cli = Cli::try_parse_from(["rbox", "add"]).unwrap();
        assert!(matches!(cli.command, Command::Add(_)));
    }

    #[test]
    fn test_parse_list_format() {
        let cli = Cli::try_parse_from(["rbox", "list", "--format", "json"]).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(list.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["rbox", "show", "1700000000000"]).unwrap();
        let Command::Show(show) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(show.id, 1_700_000_000_000);
        assert_eq!(show.format, OutputFormat::Plain);
    }

    #[test]
    fn test_parse_show_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["rbox", "show", "soup"]).is_err());
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = Cli::try_parse_from(["rbox", "delete", "5", "--yes"]).unwrap();
        let Command::Delete(delete) = cli.command else {
            panic!("expected delete command");
        };
        assert_eq!(delete.id, 5);
        assert!(delete.yes);
    }

    #[test]
    fn test_parse_render_output() {
        let cli = Cli::try_parse_from(["rbox", "render", "-o", "index.html"]).unwrap();
        let Command::Render(render) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(render.output, Some(PathBuf::from("index.html")));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["rbox", "-c", "/custom/config.toml", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_config_file_commands_skip_loading() {
        for args in [
            vec!["rbox", "config", "path"],
            vec!["rbox", "config", "validate", "--file", "other.toml"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(!cli.command.needs_config());
        }

        for args in [
            vec!["rbox", "config", "show"],
            vec!["rbox", "list"],
            vec!["rbox", "status"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(cli.command.needs_config());
        }
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = Cli::try_parse_from(["rbox", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: None })
        ));
    }
}
