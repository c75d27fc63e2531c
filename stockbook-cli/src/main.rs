use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockbook_catalog::Inventory;
use stockbook_store::Config;

mod session;

#[derive(Debug, Parser)]
#[command(name = "stockbook", about = "Interactive inventory manager")]
struct Args {
    /// Inventory file to load and save (overrides the configuration)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Start with an empty inventory instead of loading the file
    #[arg(long)]
    no_load: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::load()?;
    let file = args
        .file
        .unwrap_or_else(|| PathBuf::from(&config.storage.inventory_file));

    let mut inventory = Inventory::new();
    if !args.no_load {
        match stockbook_store::load_inventory(&file, &mut inventory) {
            Ok(()) => tracing::info!(
                "loaded {} products from {}",
                inventory.len(),
                file.display()
            ),
            // A bad file should not kill the session; the load is atomic, so
            // the inventory is still empty here.
            Err(err) => tracing::warn!("starting with empty inventory: {err}"),
        }
    }

    session::run(&mut inventory, &file, config.storage.low_stock_threshold)
}
