// CLI module - command-line argument parsing and handlers
//
// Provides subcommands next to the default TUI mode:
// - config --show/--reset/--edit/--path: configuration management
// - export: headless fetch-and-export (no TUI), for scripting

use crate::api::CatalogClient;
use crate::catalog::{export, ProductStore};
use crate::config::{Config, VERSION};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::Command;

/// stockpit - terminal admin dashboard for a remote product catalog
#[derive(Parser)]
#[command(name = "stockpit")]
#[command(version = VERSION)]
#[command(about = "Terminal admin dashboard for a remote product catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Fetch the catalog and write it as CSV without starting the TUI
    Export {
        /// Directory to write the CSV into (defaults to the configured export_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only export products whose title contains this term
        #[arg(long)]
        search: Option<String>,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub async fn handle_cli() -> Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else {
                // No flag provided, show help
                println!("Usage: stockpit config [--show|--reset|--edit|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        Some(Commands::Export { output, search }) => {
            handle_export(output, search).await?;
            Ok(true)
        }
        None => Ok(false), // No subcommand, run the TUI
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("api_url = {:?}", config.api_url);
    println!("export_dir = {:?}", config.export_dir.display().to_string());
    println!("page_size = {}", config.page_size);
    println!("theme = {:?}", config.theme);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);
    println!();
    println!("[audit]");
    println!("enabled = {}", config.audit.enabled);
    println!("dir = {:?}", config.audit.dir.display().to_string());
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error: Could not create config directory: {}", e);
            std::process::exit(1);
        }
    }

    match std::fs::write(&path, Config::default().to_toml()) {
        Ok(()) => println!("Config reset to defaults: {}", path.display()),
        Err(e) => {
            eprintln!("Error: Could not write config file: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Make sure there is something to edit
    Config::ensure_config_exists();

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor).arg(&path).status();

    match status {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Could not launch {:?}: {}", editor, e);
            std::process::exit(1);
        }
    }
}

/// Headless export: fetch, optionally filter, write CSV, print the path
async fn handle_export(output: Option<PathBuf>, search: Option<String>) -> Result<()> {
    // Headless mode: no alternate screen to protect, log straight to stdout
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockpit=info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();

    let products = if config.demo_mode {
        crate::demo::sample_products()
    } else {
        let client = CatalogClient::new(&config.api_url)?;
        client
            .list_products()
            .await
            .with_context(|| format!("Failed to fetch catalog from {}", config.api_url))?
    };

    let mut store = ProductStore::new();
    store.load(products);
    if let Some(term) = search.as_deref() {
        store.apply_filter(term);
    }

    if store.view().is_empty() {
        match search {
            Some(term) => bail!("No products match {:?} - nothing exported", term),
            None => bail!("The catalog is empty - nothing exported"),
        }
    }

    let dir = output.unwrap_or(config.export_dir);
    let session_id = crate::util::generate_session_id();
    let path = export::export_csv(store.view(), &dir, &session_id)?;

    println!("Exported {} products to {}", store.view().len(), path.display());
    Ok(())
}
