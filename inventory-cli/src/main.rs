use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use inventory_cli::api_client::InventoryClient;
use inventory_cli::config::Config;
use inventory_cli::data::table_view::TableView;
use inventory_cli::inventory::{flatten_components, inventory_columns, ComponentRecord};
use inventory_cli::logging::init_tracing;
use inventory_cli::table_display::display_page;
use inventory_cli::ui::app::App;

struct Args {
    url: Option<String>,
    file: Option<String>,
    once: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        url: None,
        file: None,
        once: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--url" => {
                args.url = Some(iter.next().context("--url requires a value")?);
            }
            "--file" => {
                args.file = Some(iter.next().context("--file requires a value")?);
            }
            "--once" => args.once = true,
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => anyhow::bail!("unknown argument: {other} (try --help)"),
        }
    }
    Ok(Some(args))
}

fn print_help() {
    println!("inventory-cli - browse inventory components in a table");
    println!();
    println!("USAGE:");
    println!("  inventory-cli [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --url <base>    Base URL of the inventory proxy");
    println!("                  (default from config, usually http://localhost:8080)");
    println!("  --file <path>   Load a local JSON array of component records");
    println!("                  instead of fetching");
    println!("  --once          Print the first page and exit (no TUI)");
    println!("  -h, --help      Show this help");
}

/// Fetch records, or fall back to an empty inventory on failure. A failed
/// fetch is logged and the table simply starts empty.
fn load_records(args: &Args, config: &Config) -> Vec<ComponentRecord> {
    if let Some(path) = &args.file {
        match fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str(&text).map_err(anyhow::Error::from))
        {
            Ok(records) => return records,
            Err(err) => {
                error!(target: "api", "failed to load {path}: {err:#}");
                return Vec::new();
            }
        }
    }

    let base_url = args
        .url
        .clone()
        .unwrap_or_else(|| config.behavior.base_url.clone());
    let client = InventoryClient::new(&base_url);
    match client.fetch_inventory() {
        Ok(records) => records,
        Err(err) => {
            error!(target: "api", "inventory fetch failed: {err:#}");
            Vec::new()
        }
    }
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // The TUI owns the terminal, so interactive sessions log to a file
    init_tracing(!args.once)?;

    let config = Config::load().unwrap_or_default();

    let records = load_records(&args, &config);
    let table = flatten_components(&records);
    info!(
        target: "system",
        "flattened {} components into {} rows",
        records.len(),
        table.row_count()
    );

    let view = TableView::new(Arc::new(table), inventory_columns())
        .with_page_size_options(config.display.page_size_options.clone())
        .with_initial_page_size(config.display.initial_page_size);

    if args.once {
        display_page(&view);
        return Ok(());
    }

    App::new(view, config.display.show_row_numbers).run()
}
