use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use favorites_config::Config;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn show_config(ctx: &AppContext, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let config_file = &ctx.config_path;
    let file_exists = config_file.exists();
    let validation = config.validate().err().map(|e| e.to_string());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !file_exists {
                output.warn(format!("Configuration file not found at: {}", config_file.display()));
                output.info("Showing defaults. Run 'cineshelf config init' to write them to disk.");
            }

            let mut paths_table = Table::new();
            paths_table.set_header(vec![
                Cell::new("Locations").fg(Color::Cyan).add_attribute(Attribute::Bold),
            ]);
            paths_table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display())]);
            paths_table.add_row(vec![Cell::new("Favorites Store"), Cell::new(ctx.paths.store_file().display())]);
            paths_table.add_row(vec![Cell::new("Exports"), Cell::new(ctx.paths.export_dir().display())]);
            paths_table.add_row(vec![Cell::new("Logs"), Cell::new(ctx.paths.log_file().display())]);
            paths_table.load_preset(comfy_table::presets::UTF8_FULL);
            paths_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", paths_table);
            println!();

            let mut storage_table = Table::new();
            storage_table.set_header(vec![
                Cell::new("Storage").fg(Color::Cyan).add_attribute(Attribute::Bold),
            ]);
            storage_table.add_row(vec![Cell::new("Favorites Key"), Cell::new(&config.storage.favorites_key)]);
            storage_table.add_row(vec![Cell::new("Legacy Key"), Cell::new(&config.storage.legacy_key)]);
            storage_table.load_preset(comfy_table::presets::UTF8_FULL);
            storage_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", storage_table);
            println!();

            let mut export_table = Table::new();
            export_table.set_header(vec![
                Cell::new("Export").fg(Color::Cyan).add_attribute(Attribute::Bold),
            ]);
            export_table.add_row(vec![Cell::new("File Prefix"), Cell::new(&config.export.file_prefix)]);
            export_table.add_row(vec![Cell::new("App Tag"), Cell::new(&config.export.app_tag)]);
            export_table.add_row(vec![
                Cell::new("Overview Limit"),
                Cell::new(format!("{} characters", config.export.overview_limit)),
            ]);
            export_table.add_row(vec![Cell::new("Poster Base URL"), Cell::new(&config.images.poster_base_url)]);
            export_table.load_preset(comfy_table::presets::UTF8_FULL);
            export_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", export_table);

            if !file_exists {
                println!("{}", "(defaults)".bright_black());
            }
            if let Some(problem) = &validation {
                output.error(format!("Validation error: {}", problem));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "config_file_exists": file_exists,
                "validation_error": validation,
                "store_file": ctx.paths.store_file().display().to_string(),
                "export_dir": ctx.paths.export_dir().display().to_string(),
                "log_file": ctx.paths.log_file().display().to_string(),
                "config": config,
            }));
        }
    }

    Ok(())
}

pub fn init_config(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    let config_file = &ctx.config_path;

    if config_file.exists() && !force {
        output.warn(format!("Configuration already exists at: {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    Config::default()
        .save_to_file(config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(format!("Configuration written to {}", config_file.display()));
    Ok(())
}
