//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::validate::RecipeForm;

/// Add command arguments, mirroring the add-recipe form.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Recipe name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Category (see `rbox categories`)
    #[arg(short = 'C', long, default_value = "")]
    pub category: String,

    /// Short description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Ingredients, one per line
    #[arg(short, long, default_value = "")]
    pub ingredients: String,

    /// Instructions, one step per line
    #[arg(short = 's', long, default_value = "")]
    pub instructions: String,

    /// Image URL
    #[arg(long, default_value = "")]
    pub image: String,
}

impl From<AddCommand> for RecipeForm {
    fn from(cmd: AddCommand) -> Self {
        Self {
            name: cmd.name,
            category: cmd.category,
            description: cmd.description,
            ingredients: cmd.ingredients,
            instructions: cmd.instructions,
            image: cmd.image,
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Recipe id
    pub id: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Recipe id
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Write the page to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
    /// HTML fragment
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_command_into_form() {
        let cmd = AddCommand {
            name: "Soup".to_string(),
            category: "Dinner".to_string(),
            description: String::new(),
            ingredients: "water\nsalt".to_string(),
            instructions: "boil".to_string(),
            image: String::new(),
        };

        let form = RecipeForm::from(cmd);
        assert_eq!(form.name, "Soup");
        assert_eq!(form.ingredients, "water\nsalt");
        assert!(form.image.is_empty());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
