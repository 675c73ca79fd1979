//! `rbox` - CLI for recipebox
//!
//! This binary provides the command-line interface for adding, listing,
//! viewing, deleting and rendering recipes in the local catalog.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use recipebox::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, ListCommand, OutputFormat,
    RenderCommand, ShowCommand,
};
use recipebox::{
    init_logging, Catalog, Config, RecipeForm, RecipeRepository, RecipeStore, Renderer,
    SqliteStore, Validator,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = if cli.command.needs_config() {
        Config::load_from(cli.config.clone()).context("loading configuration")?
    } else {
        Config::default()
    };

    match cli.command {
        Command::Add(cmd) => handle_add(&config, cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::Render(cmd) => handle_render(&config, &cmd),
        Command::Categories => {
            for category in &config.catalog.categories {
                println!("{category}");
            }
            Ok(())
        }
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cli.config, cmd),
    }
}

fn open_catalog(config: &Config) -> anyhow::Result<Catalog<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening recipe store at {}", path.display()))?;
    let repository = RecipeRepository::new(RecipeStore::with_key(store, &config.storage.key));
    let validator = Validator::new().with_categories(config.catalog.categories.iter().cloned());

    Ok(Catalog::new(
        repository,
        validator,
        Renderer::from_config(&config.catalog),
    ))
}

fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let form = RecipeForm::from(cmd);

    match catalog.submit(&form) {
        Ok((recipe, notice)) => {
            println!("{notice}");
            println!("id: {}", recipe.id);
            Ok(())
        }
        Err(err) => {
            if let Some(errors) = err.validation_errors() {
                for (field, message) in errors.iter() {
                    eprintln!("  {field}: {message}");
                }
                if errors.contains(recipebox::Field::Category) {
                    eprintln!(
                        "  categories: {}",
                        config.catalog.categories.join(", ")
                    );
                }
                bail!("recipe not saved");
            }
            Err(err).context("saving recipe")
        }
    }
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let recipes = catalog.recipes();

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recipes)?),
        OutputFormat::Html => println!("{}", catalog.renderer().render_grid(&recipes)),
        OutputFormat::Plain => {
            if recipes.is_empty() {
                println!("No recipes yet.");
            }
            for recipe in &recipes {
                println!("{}\t{}\t{}", recipe.id, recipe.category, recipe.name);
            }
        }
        OutputFormat::Table => {
            if recipes.is_empty() {
                println!("No recipes yet. Add one with `rbox add`.");
                return Ok(());
            }
            let category_width = recipes
                .iter()
                .map(|r| r.category.chars().count())
                .chain(std::iter::once("CATEGORY".len()))
                .max()
                .unwrap_or_default();
            println!("{:<15}  {:<category_width$}  NAME", "ID", "CATEGORY");
            for recipe in &recipes {
                println!(
                    "{:<15}  {:<category_width$}  {}",
                    recipe.id, recipe.category, recipe.name
                );
            }
            println!();
            println!("{} recipe(s)", recipes.len());
        }
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let Some(recipe) = catalog.repository().find_by_id(cmd.id) else {
        println!("No recipe with id {}.", cmd.id);
        return Ok(());
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recipe)?),
        OutputFormat::Html => println!("{}", catalog.renderer().render_detail(&recipe)),
        OutputFormat::Plain | OutputFormat::Table => {
            println!("{}", recipe.name);
            println!("{}", "=".repeat(recipe.name.chars().count()));
            println!("Category: {}", recipe.category);
            if let Some(image) = recipe.image() {
                println!("Image:    {image}");
            }
            if let Some(description) = recipe.description() {
                println!();
                println!("{description}");
            }
            println!();
            println!("Ingredients");
            for line in recipe.ingredient_lines() {
                println!("  - {}", line.trim());
            }
            println!();
            println!("Instructions");
            for (step, line) in recipe.instruction_lines().enumerate() {
                println!("  {}. {}", step + 1, line.trim());
            }
        }
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let Some(confirmation) = catalog.request_delete(cmd.id) else {
        println!("No recipe with id {}.", cmd.id);
        return Ok(());
    };

    if !cmd.yes && !confirm(&format!("Delete \"{}\"?", confirmation.name()))? {
        println!("Cancelled.");
        return Ok(());
    }

    let notice = catalog
        .confirm_delete(confirmation)
        .context("deleting recipe")?;
    println!("{notice}");
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn handle_render(config: &Config, cmd: &RenderCommand) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let page = catalog
        .renderer()
        .render_page(&config.catalog.title, &catalog.recipes());

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, page)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{page}"),
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let store = catalog.repository().store();
    let stats = store.store().stats()?;
    let recipe_count = catalog.recipes().len();
    let last_write = store.store().updated_at(store.key())?;

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "storage_key": store.key(),
            "recipes": recipe_count,
            "last_saved": last_write.map(|t| t.to_rfc3339()),
            "store": {
                "keys": stats.total_keys,
                "value_bytes": stats.value_bytes,
                "db_size_bytes": stats.db_size_bytes,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rbox status");
        println!("-----------");
        println!("Database:      {}", config.database_path().display());
        println!("Storage key:   {}", store.key());
        println!("Recipes:       {recipe_count}");
        match last_write {
            Some(t) => println!("Last saved:    {}", t.to_rfc3339()),
            None => println!("Last saved:    never"),
        }
        println!("Store keys:    {}", stats.total_keys);
        println!("Blob bytes:    {}", stats.value_bytes);
        println!("File size:     {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(
    config: &Config,
    config_path: Option<PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Key:                {}", config.storage.key);
                println!();
                println!("[Catalog]");
                println!("  Title:              {}", config.catalog.title);
                println!(
                    "  Categories:         {}",
                    config.catalog.categories.join(", ")
                );
                println!("  Placeholder image:  {}", config.catalog.placeholder_image);
                println!(
                    "  Description chars:  {}",
                    config.catalog.description_preview_chars
                );
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            if let Err(e) = Config::load_from(Some(path)) {
                eprintln!("Configuration error: {e}");
                bail!("configuration is invalid");
            }
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
