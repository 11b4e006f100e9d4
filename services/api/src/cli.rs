use crate::server;
use clap::{Args, Parser, Subcommand};
use scrape_crm::error::AppError;
use scrape_crm::workflows::ingest::{
    ScrapeItemSeed, SpreadsheetImporter, PARTY_VARIATION_COUNT_FIELD,
};
use scrape_crm::workflows::variations;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Scrape CRM",
    about = "Run the county records scrape CRM service and its tooling from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate search variations for a single party name
    Variations(VariationsArgs),
    /// Preview spreadsheet ingestion without persisting anything
    Ingest(IngestArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
struct VariationsArgs {
    /// Raw party name to expand
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct IngestArgs {
    /// Spreadsheet export (CSV) to ingest
    #[arg(long)]
    csv: PathBuf,
    /// Print every seeded item with its per-column variation counts
    #[arg(long)]
    list_items: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Variations(args) => run_variations(args),
        Command::Ingest(args) => run_ingest(args),
    }
}

fn run_variations(args: VariationsArgs) -> Result<(), AppError> {
    let generated = variations::generate(&args.name);

    if generated.is_empty() {
        println!("No variations generated (blank name).");
        return Ok(());
    }

    println!("Variations for {:?}", args.name);
    for variation in &generated {
        println!("- {variation}");
    }

    Ok(())
}

fn run_ingest(args: IngestArgs) -> Result<(), AppError> {
    let items = SpreadsheetImporter::from_path(&args.csv)?;
    println!(
        "Seeded {} scrape item(s) from {}",
        items.len(),
        args.csv.display()
    );

    if args.list_items {
        for item in &items {
            render_item(item);
        }
    }

    Ok(())
}

fn render_item(item: &ScrapeItemSeed) {
    println!("- row {} | status {}", item.row_number, item.status.label());

    let Some(counts) = item
        .data
        .get(PARTY_VARIATION_COUNT_FIELD)
        .and_then(Value::as_object)
    else {
        return;
    };

    for (column, count) in counts {
        let count = count.as_u64().unwrap_or(0);
        println!("  {column}: {count} variation(s)");
    }
}
