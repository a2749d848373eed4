use adlib_export::{
    init_tracing_once, AdScraper, ExportFormat, FilterSet, Prompter, RunReport, DEFAULT_ENDPOINT,
    DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_DIR,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Xlsx,
    Jsonl,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Xlsx => ExportFormat::Xlsx,
            Format::Jsonl => ExportFormat::Jsonl,
        }
    }
}

/// Export trending ads from the TikTok Creative Center to a spreadsheet.
#[derive(Debug, Parser)]
#[command(name = "adlib-export", version, about)]
struct Cli {
    /// Comma-separated search keywords. Prompted for when omitted.
    #[arg(long)]
    keywords: Option<String>,
    /// Comma-separated country codes (case-insensitive).
    #[arg(long)]
    countries: Option<String>,
    /// Comma-separated industry names.
    #[arg(long)]
    industries: Option<String>,
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u32,
    /// Minimum pause between pages, in seconds.
    #[arg(long, default_value_t = 1.0)]
    min_delay: f64,
    /// Maximum pause between pages, in seconds.
    #[arg(long, default_value_t = 3.0)]
    max_delay: f64,
    #[arg(long, env = "ADLIB_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    #[arg(long, value_enum, default_value_t = Format::Xlsx)]
    format: Format,
    #[arg(long, env = "ADLIB_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Print plain progress lines instead of a spinner.
    #[arg(long)]
    no_progress: bool,
    /// Never prompt; fail if keywords are missing.
    #[arg(long)]
    non_interactive: bool,
}

fn main() -> Result<()> {
    init_tracing_once();
    let cli = Cli::parse();

    let base = FilterSet::builder().delay_range(cli.min_delay, cli.max_delay);
    let builder = match &cli.keywords {
        Some(kw) => base
            .keywords_csv(kw)
            .countries_csv(cli.countries.as_deref().unwrap_or(""))
            .industries_csv(cli.industries.as_deref().unwrap_or(""))
            .max_pages(cli.max_pages),
        None if !cli.non_interactive && io::stdin().is_terminal() => {
            Prompter::new(io::stdin().lock(), io::stdout()).collect(base)?
        }
        None => anyhow::bail!("--keywords is required in non-interactive mode"),
    };
    let filters = builder.build().context("invalid filters")?;
    if filters.keywords().is_none() {
        anyhow::bail!("at least one keyword is required");
    }

    let scraper = AdScraper::new()
        .endpoint(&cli.endpoint)
        .output_dir(&cli.output_dir)
        .format(cli.format.into())
        .progress(!cli.no_progress);

    println!("\nFetching ads...");
    match scraper.run(&filters)? {
        RunReport::NoAds => println!("No ads found!"),
        RunReport::Saved { path, total } => {
            println!("\nData saved to: {}", path.display());
            println!("Total ads collected: {total}");
        }
    }
    Ok(())
}
