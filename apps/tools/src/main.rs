use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::config::{load_settings, prepare_database_url, DEFAULT_CONFIG_FILE};
use shared::domain::{duplicate_ids, Product};
use storage::{ProductStore, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Maintenance commands operating directly on the stored product list.
#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored text exactly as saved.
    Dump,
    /// Report whether the stored list can be read.
    Check,
    /// Delete the stored list.
    Clear,
    /// Replace the stored list with a JSON array read from a file.
    Import { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    let database_url = prepare_database_url(&settings.database_url)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_filter)
            .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = ProductStore::new(Storage::new(&database_url).await?);

    match cli.command {
        Command::Dump => match store.raw().await? {
            Some(raw) => println!("{raw}"),
            None => println!("no product list stored"),
        },
        Command::Check => {
            let products = store.load_strict().await?;
            let duplicates = duplicate_ids(&products);
            if duplicates.is_empty() {
                println!("ok: {} products", products.len());
            } else {
                println!(
                    "readable: {} products, duplicate ids: {}",
                    products.len(),
                    join_ids(&duplicates)
                );
            }
        }
        Command::Clear => {
            store.clear().await?;
            info!(%database_url, "cleared product list");
        }
        Command::Import { path } => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            let products = parse_import(&raw)
                .with_context(|| format!("cannot import '{}'", path.display()))?;
            store.save(&products).await?;
            info!(count = products.len(), %database_url, "imported product list");
        }
    }

    Ok(())
}

fn parse_import(raw: &str) -> Result<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(raw).context("not a product list")?;
    let duplicates = duplicate_ids(&products);
    if !duplicates.is_empty() {
        bail!("duplicate product ids: {}", join_ids(&duplicates));
    }
    Ok(products)
}

fn join_ids(ids: &[shared::domain::ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
