//! Command-line front-end: search PubMed and list pharma-affiliated papers.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pharma_papers::{ClientConfig, CsvExporter, PubMedClient};

/// Fetch research papers from PubMed with pharmaceutical/biotech company
/// affiliations.
#[derive(Debug, Parser)]
#[command(name = "get-papers-list", version, about)]
struct Cli {
    /// PubMed search query (e.g. "cancer immunotherapy")
    query: String,

    /// Output file path for CSV results; prints to the console when absent
    #[arg(short = 'f', long = "file")]
    output_file: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of search results to process
    #[arg(short, long, default_value_t = 100)]
    max_results: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    debug!(?cli, "starting query");

    let mut config = ClientConfig::new();
    if let Ok(api_key) = std::env::var("NCBI_API_KEY") {
        config = config.with_api_key(api_key);
    }
    if let Ok(email) = std::env::var("NCBI_EMAIL") {
        config = config.with_email(email);
    }

    let client = PubMedClient::with_config(config);
    let papers = client
        .fetch_papers_with_pharma_authors(&cli.query, cli.max_results)
        .await
        .with_context(|| format!("failed to fetch papers for query {:?}", cli.query))?;

    if papers.is_empty() {
        println!("No papers found with pharmaceutical/biotech affiliations.");
        return Ok(());
    }

    let exporter = CsvExporter::new();
    match &cli.output_file {
        Some(path) => {
            exporter
                .write_csv_file(&papers, path)
                .with_context(|| format!("failed to write {path}"))?;
            println!("Results exported to {path}");
        }
        None => exporter.print_console(&papers)?,
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}
