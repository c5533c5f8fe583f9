//! `spang` - CLI for spangapp
//!
//! This binary renders the sections of the Spacing Angels analytics
//! dashboard in the terminal. Each invocation loads the datasets once and
//! renders exactly one section.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;

use spangapp::cli::{Cli, Command, ConfigCommand, OutputFormat};
use spangapp::render::{self, text, RenderOptions};
use spangapp::{init_logging, Config, Datasets, Section, Selection, Store};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    // Execute the command
    match cli.command {
        Command::Home(cmd) => render_section(&config, Selection::new(Section::Home), cmd.format),
        Command::Dashboard(cmd) => render_section(
            &config,
            Selection::new(Section::Dashboard).with_dataset(cmd.table.into()),
            cmd.format,
        ),
        Command::Map(cmd) => render_section(
            &config,
            Selection::new(Section::Map).with_travel(cmd.travel),
            cmd.format,
        ),
        Command::Chart(cmd) => render_section(&config, Selection::new(Section::Chart), cmd.format),
        Command::Stats(cmd) => {
            render_section(&config, Selection::new(Section::Statistics), cmd.format)
        }
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

/// Open the database and load all four datasets.
///
/// A missing file or table is fatal here: no section renders without the
/// full set.
fn load_datasets(config: &Config) -> Result<(Store, Datasets)> {
    let store = Store::open(config.database_path())?;
    let data = store.load()?;
    Ok((store, data))
}

/// Render one section and print it in the requested format.
fn render_section(config: &Config, selection: Selection, format: OutputFormat) -> Result<()> {
    let (_store, data) = load_datasets(config)?;
    let options = RenderOptions::from(config);

    let view = render::render(&selection, &data, &options)
        .with_context(|| format!("rendering the {} section", selection.section))?;

    match format {
        OutputFormat::Text => print!("{}", text::to_text(&view)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let (store, data) = load_datasets(config)?;
    let stats = store.stats(&data);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("spang status");
        println!("------------");
        println!("Database:        {}", store.path().display());
        println!("Size:            {} bytes", stats.db_size_bytes);
        println!();
        println!("Iterations:      {}", stats.iteration_rows);
        println!("Plate boxes:     {}", stats.plate_box_rows);
        println!("Run parameters:  {}", stats.run_parameters_rows);
        println!(
            "Travels:         {} rows, {} referenced by iterations",
            stats.travel_rows, stats.distinct_travels
        );
        if let (Some(first), Some(last)) = (stats.first_sample, stats.last_sample) {
            println!("Samples:         {} .. {}", first.to_rfc3339(), last.to_rfc3339());
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!();
                println!("[Chart]");
                println!("  Width:           {}", config.chart.width);
                println!("  Height:          {}", config.chart.height);
                println!();
                println!("[Statistics]");
                println!("  Speed bins:      {}", config.statistics.speed_bins);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
