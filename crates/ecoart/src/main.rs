//! `ecoart` - CLI for the recycled-art project catalog
//!
//! This binary stands in for the site's project forms: it lists, adds, edits
//! and deletes projects and prints the collective impact statistics.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ecoart::cli::{
    AddCommand, Cli, Command, ConfigCommand, EditCommand, ListCommand, OutputFormat,
    ShowCommand,
};
use ecoart::{init_logging, Category, Config, ProjectCatalog, ProjectDraft, ProjectRecord, Storage};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Config commands report on the file themselves, so they run before the
    // eager load below.
    if let Command::Config(cmd) = cli.command {
        return handle_config(cli.config, cmd);
    }

    let config = load_config(cli.config)?;

    match cli.command {
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Add(cmd) => handle_add(&config, cmd),
        Command::Edit(cmd) => handle_edit(&config, cmd),
        Command::Delete(cmd) => handle_delete(&config, cmd.id),
        Command::Stats(cmd) => handle_stats(&config, cmd.json),
        Command::Categories => {
            for category in Category::ALL {
                println!("{category}");
            }
            Ok(())
        }
        Command::Reset(cmd) => handle_reset(&config, cmd.yes),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(_) => unreachable!("config commands are dispatched above"),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    Config::load_from(path).context("failed to load configuration")
}

fn open_catalog(config: &Config) -> Result<ProjectCatalog<Storage>> {
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open catalog database {}", path.display()))?;
    let catalog = ProjectCatalog::load(storage, config.storage.slot_key.as_str())
        .context("failed to load projects")?;
    Ok(catalog)
}

fn handle_list(config: &Config, cmd: &ListCommand) -> Result<()> {
    let catalog = open_catalog(config)?;
    let projects: Vec<&ProjectRecord> = catalog.filter(&cmd.category).collect();

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&projects)?),
        OutputFormat::Table => {
            println!(
                "{:>4}  {:<32}  {:<6}  {:<14}  MATERIALS",
                "ID", "TITLE", "YEAR", "CATEGORY"
            );
            for project in &projects {
                println!(
                    "{:>4}  {:<32}  {:<6}  {:<14}  {}",
                    project.id,
                    truncate(&project.title, 32),
                    truncate(&project.year, 6),
                    truncate(&project.category, 14),
                    project.materials
                );
            }
        }
        OutputFormat::Plain => {
            for project in &projects {
                println!("{}\t{}", project.id, project.title);
            }
        }
    }

    if projects.is_empty() && cmd.format != OutputFormat::Json {
        println!("No projects in category \"{}\".", cmd.category);
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> Result<()> {
    let catalog = open_catalog(config)?;
    let Some(project) = catalog.get(cmd.id) else {
        println!("No project with id {}.", cmd.id);
        return Ok(());
    };

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(project)?);
    } else {
        print_project(project);
    }
    Ok(())
}

fn handle_add(config: &Config, cmd: AddCommand) -> Result<()> {
    let mut catalog = open_catalog(config)?;

    let mut draft = ProjectDraft::new(cmd.title, cmd.description)
        .with_category(config.catalog.default_category.as_str());
    cmd.fields.apply(&mut draft);

    let created = catalog.add(draft)?;
    println!("Added project {}: {}", created.id, created.title);
    Ok(())
}

fn handle_edit(config: &Config, cmd: EditCommand) -> Result<()> {
    let mut catalog = open_catalog(config)?;

    let Some(existing) = catalog.get(cmd.id) else {
        println!("No project with id {}; nothing changed.", cmd.id);
        return Ok(());
    };

    let mut draft = existing.to_draft();
    if let Some(title) = cmd.title {
        draft.title = title;
    }
    if let Some(description) = cmd.description {
        draft.description = description;
    }
    cmd.fields.apply(&mut draft);

    match catalog.edit(cmd.id, draft)? {
        Some(updated) => println!("Updated project {}: {}", updated.id, updated.title),
        None => println!("No project with id {}; nothing changed.", cmd.id),
    }
    Ok(())
}

fn handle_delete(config: &Config, id: u64) -> Result<()> {
    let mut catalog = open_catalog(config)?;

    match catalog.delete(id)? {
        Some(removed) => println!("Deleted project {}: {}", removed.id, removed.title),
        None => println!("No project with id {id}; nothing changed."),
    }
    Ok(())
}

fn handle_stats(config: &Config, json: bool) -> Result<()> {
    let catalog = open_catalog(config)?;
    let stats = catalog.aggregate();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Collective Impact");
        println!("=================");
        println!("Projects:             {}", stats.total_projects);
        println!("Bottle caps:          {}", stats.bottle_caps);
        println!("Denim pieces:         {}", stats.denim_pieces);
        println!("Participants:         {}", stats.participants);
        println!("Upcoming projects:    {}", stats.upcoming_projects);
    }
    Ok(())
}

fn handle_reset(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        println!("This will replace every project with the default set.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let mut catalog = open_catalog(config)?;
    catalog.reset()?;
    println!("Catalog reset to {} default projects.", catalog.len());
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let catalog = open_catalog(config)?;
    let stats = catalog.store().stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": catalog.store().path(),
            "slot_key": catalog.slot_key(),
            "projects": catalog.len(),
            "next_id": catalog.next_id()?,
            "slots": stats.slot_count,
            "last_write": stats.last_write,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("ecoart status");
        println!("-------------");
        println!("Database:      {}", catalog.store().path().display());
        println!("Slot:          {}", catalog.slot_key());
        println!("Projects:      {}", catalog.len());
        println!("Next id:       {}", catalog.next_id()?);
        println!("Slots stored:  {}", stats.slot_count);
        match stats.last_write {
            Some(at) => println!("Last write:    {}", at.to_rfc3339()),
            None => println!("Last write:    never"),
        }
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Slot key:           {}", config.storage.slot_key);
                println!();
                println!("[Catalog]");
                println!("  Default category:   {}", config.catalog.default_category);
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
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration {} is invalid", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn print_project(project: &ProjectRecord) {
    println!("#{} {}", project.id, project.title);
    println!();
    println!("{}", project.description);
    println!();
    println!("  Year:          {}", project.year);
    println!("  Category:      {}", project.category);
    println!("  Materials:     {}", project.materials);
    println!("  Participants:  {}", project.participants);
    println!("  Image:         {}", project.image);
    if let Some(location) = &project.location {
        println!("  Location:      {location}");
    }
    if let Some(dimensions) = &project.dimensions {
        println!("  Dimensions:    {dimensions}");
    }
    if let Some(details) = &project.details {
        println!();
        println!("{details}");
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ecoart_{name}_{}.toml", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_validate_accepts_good_file() {
        let path = write_config("valid", "[storage]\nslot_key = \"draftProjects\"\n");

        let result = handle_config(None, ConfigCommand::Validate { file: Some(path.clone()) });

        let _ = std::fs::remove_file(&path);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_file() {
        let path = write_config("invalid", "[storage]\nslot_key = \"\"\n");

        let result = handle_config(None, ConfigCommand::Validate { file: Some(path.clone()) });

        let _ = std::fs::remove_file(&path);
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("slot_key must not be empty"));
    }

    #[test]
    fn test_validate_falls_back_to_global_config_path() {
        let path = write_config("global", "[catalog]\ndefault_category = \" \"\n");

        let result = handle_config(Some(path.clone()), ConfigCommand::Validate { file: None });

        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }
}
