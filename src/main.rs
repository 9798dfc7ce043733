use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use inventory_viewer::{
    config,
    document::{Document, InMemoryDocument},
    events::{process_events, EventSender, UiEvent},
    render,
    services::{
        dedup::{dedup_payload, product_records},
        product_form::PRODUCTS_PATH,
        ProductFormValues,
    },
    HttpInventoryClient, InventoryBackend, ListSyncView, ResourceKind,
};

#[derive(Parser)]
#[command(
    name = "inventory-viewer",
    about = "View and edit inventory tables served by the inventory backend",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render table output as pretty JSON"
    )]
    json: bool,
    #[arg(long, global = true, help = "Override the configured backend base URL")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the page and print its tables
    Show(ShowArgs),
    /// Submit the add-product form
    AddProduct(AddProductArgs),
    /// Remove duplicate products by item name
    RemoveDuplicates(RemoveDuplicatesArgs),
    /// Load the page and write it out as a standalone HTML file
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
struct ShowArgs {
    #[arg(
        long = "resource",
        value_parser = clap::value_parser!(ResourceKind),
        action = ArgAction::Append,
        help = "Table to show: products, vendors, purchase-orders or shipments (repeatable; default all)"
    )]
    resources: Vec<ResourceKind>,
    #[arg(long, action = ArgAction::SetTrue, help = "Print table markup instead of text")]
    html: bool,
}

#[derive(Args)]
struct AddProductArgs {
    #[arg(long, help = "Display name of the product")]
    item_name: String,
    #[arg(long, help = "Units on hand")]
    quantity: String,
    #[arg(long, help = "Price per unit")]
    unit_price: String,
    #[arg(long, default_value = "", help = "Storage location")]
    location: String,
    #[arg(long, default_value = "", help = "Manufacturer name")]
    manufacturer: String,
}

#[derive(Args)]
struct RemoveDuplicatesArgs {
    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Print the deduplicated list without sending it"
    )]
    dry_run: bool,
}

#[derive(Args)]
struct SnapshotArgs {
    #[arg(long, help = "Destination HTML file")]
    out: PathBuf,
}

#[derive(Serialize)]
struct TableOutput<'a> {
    resource: String,
    headers: &'a [&'static str],
    rows: &'a [Vec<String>],
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_config().context("failed to load configuration")?;
    if let Some(base_url) = cli.base_url.clone() {
        cfg = cfg
            .with_base_url(base_url)
            .context("invalid --base-url")?;
    }
    config::init_tracing(cfg.log_level(), cfg.log_json);
    debug!(base_url = %cfg.base_url, "starting");

    let client = Arc::new(HttpInventoryClient::new(&cfg)?);

    match cli.command {
        Commands::Show(args) => handle_show(client, args, cli.json).await,
        Commands::AddProduct(args) => handle_add_product(client, args, cli.json).await,
        Commands::RemoveDuplicates(args) => handle_remove_duplicates(client, args, cli.json).await,
        Commands::Snapshot(args) => handle_snapshot(client, args).await,
    }
}

/// Document left by an event run, with the number of operations that failed.
struct EventRun {
    document: InMemoryDocument,
    failed: usize,
    handled: usize,
}

impl EventRun {
    /// Errors if any operation failed. Call after printing what did succeed.
    fn finish(self) -> Result<()> {
        if self.failed > 0 {
            bail!("{} of {} operations failed", self.failed, self.handled);
        }
        Ok(())
    }
}

/// Feeds `events` through the event loop and reports alerts on stderr.
async fn run_events(client: Arc<HttpInventoryClient>, events: Vec<UiEvent>) -> Result<EventRun> {
    let mut view = ListSyncView::new(client, InMemoryDocument::inventory_page());
    let (tx, rx) = mpsc::channel(events.len().max(1));
    let sender = EventSender::new(tx);
    for event in events {
        sender.send(event).await.map_err(anyhow::Error::msg)?;
    }
    drop(sender);

    let summary = process_events(rx, &mut view).await;
    let mut document = view.into_document();
    for alert in document.take_alerts() {
        eprintln!("{}", alert);
    }
    Ok(EventRun {
        document,
        failed: summary.failed,
        handled: summary.handled,
    })
}

async fn handle_show(client: Arc<HttpInventoryClient>, args: ShowArgs, json: bool) -> Result<()> {
    let resources = if args.resources.is_empty() {
        ResourceKind::all()
    } else {
        args.resources
    };
    let events = resources
        .iter()
        .map(|kind| UiEvent::RefreshRequested(*kind))
        .collect();
    let run = run_events(client, events).await?;
    print_tables(&run.document, &resources, json, args.html)?;
    run.finish()
}

async fn handle_add_product(
    client: Arc<HttpInventoryClient>,
    args: AddProductArgs,
    json: bool,
) -> Result<()> {
    let values = ProductFormValues {
        item_name: args.item_name,
        quantity: args.quantity,
        unit_price: args.unit_price,
        location: args.location,
        manufacturer: args.manufacturer,
    };
    let run = run_events(client, vec![UiEvent::ProductFormSubmitted(values)]).await?;
    print_tables(&run.document, &[ResourceKind::Products], json, false)?;
    run.finish()
}

async fn handle_remove_duplicates(
    client: Arc<HttpInventoryClient>,
    args: RemoveDuplicatesArgs,
    json: bool,
) -> Result<()> {
    if args.dry_run {
        let records = client
            .get_json(PRODUCTS_PATH)
            .await
            .and_then(product_records)
            .context("failed to fetch products")?;
        return print_json(&dedup_payload(records));
    }

    let run = run_events(client, vec![UiEvent::RemoveDuplicatesClicked]).await?;
    print_tables(&run.document, &[ResourceKind::Products], json, false)?;
    run.finish()
}

async fn handle_snapshot(client: Arc<HttpInventoryClient>, args: SnapshotArgs) -> Result<()> {
    let run = run_events(client, vec![UiEvent::PageLoaded]).await?;
    fs::write(&args.out, render::page_html(&run.document))
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    println!("Snapshot written to: {}", args.out.display());
    run.finish()
}

fn print_tables(
    document: &InMemoryDocument,
    resources: &[ResourceKind],
    json: bool,
    html: bool,
) -> Result<()> {
    let mut tables = Vec::with_capacity(resources.len());
    for kind in resources {
        let body = document
            .table_body(kind.table_id())
            .with_context(|| format!("page has no {} table", kind))?;
        if json {
            tables.push(TableOutput {
                resource: kind.to_string(),
                headers: kind.headers(),
                rows: body.rows(),
            });
        } else if html {
            println!("{}", render::table_html(*kind, body));
        } else {
            println!("{}", render::text_table(*kind, body));
        }
    }
    if json {
        print_json(&tables)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(failed: usize) -> EventRun {
        let mut document = InMemoryDocument::inventory_page();
        if let Some(body) = document.table_body_mut(ResourceKind::Vendors.table_id()) {
            body.append(vec!["Acme".into(), "555-0100".into(), "a@acme.test".into()]);
        }
        EventRun {
            document,
            failed,
            handled: 4,
        }
    }

    #[test]
    fn synced_tables_print_even_when_another_failed() {
        let run = run(1);
        assert!(print_tables(&run.document, &[ResourceKind::Vendors], false, false).is_ok());
        let err = run.finish().unwrap_err();
        assert_eq!(err.to_string(), "1 of 4 operations failed");
    }

    #[test]
    fn clean_run_finishes_ok() {
        assert!(run(0).finish().is_ok());
    }
}
