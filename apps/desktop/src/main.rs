use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, prepare_database_url, DEFAULT_CONFIG_FILE},
    ControllerError, ProductListController,
};
use shared::domain::{Priority, Product, ProductDraft, ProductId, Progress};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Personal product wishlist kept in a local database.
#[derive(Parser, Debug)]
#[command(name = "wishlist")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Overrides the database from the config file and environment.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a product to the end of the list.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        image: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value_t = Priority::Baixa)]
        priority: Priority,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Mark a product as purchased, or back to pending.
    Toggle { id: i64 },
    Remove { id: i64 },
    /// Permanently delete every product whose priority differs from the given one.
    Filter { priority: Priority },
    /// Show products, optionally only one priority (nothing is deleted).
    List {
        #[arg(long)]
        priority: Option<Priority>,
    },
    Progress,
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

    info!(%database_url, "opening wishlist");
    let storage = Storage::new(&database_url).await?;
    let mut controller = ProductListController::open(storage).await?;

    match cli.command {
        Command::Add {
            name,
            image,
            price,
            priority,
            description,
        } => {
            let draft = ProductDraft::new(name, image, price, priority, description);
            match controller.add_product(draft).await {
                Ok(product) => println!("added {}", render_product(&product)),
                Err(ControllerError::Validation(err)) => {
                    anyhow::bail!("product not added: {err}")
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Toggle { id } => {
            let id = ProductId(id);
            if controller.toggle_purchased(id).await? {
                if let Some(product) = controller.get(id) {
                    println!("{}", render_product(product));
                }
            } else {
                println!("no product with id {id}");
            }
        }
        Command::Remove { id } => {
            let id = ProductId(id);
            if controller.remove_product(id).await? {
                println!("removed {id}");
            } else {
                println!("no product with id {id}");
            }
        }
        Command::Filter { priority } => {
            let discarded = controller.filter_by_priority(priority).await?;
            println!("kept {priority} products, deleted {discarded}");
        }
        Command::List { priority } => {
            let products: Vec<&Product> = match priority {
                Some(level) => controller.view_by_priority(level),
                None => controller.products().iter().collect(),
            };
            println!("{}", render_progress(&controller.compute_progress()));
            for product in products {
                println!("{}", render_product(product));
            }
        }
        Command::Progress => {
            println!("{}", render_progress(&controller.compute_progress()));
        }
    }

    Ok(())
}

fn render_product(product: &Product) -> String {
    let mark = if product.comprado { 'x' } else { ' ' };
    let mut line = format!(
        "[{mark}] {} {} {} (Prioridade: {})",
        product.id,
        product.name,
        product.display_price(),
        product.prioridade
    );
    if !product.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&product.description);
    }
    line
}

fn render_progress(progress: &Progress) -> String {
    format!("{} ({:.0}%)", progress.label(), progress.percent)
}
