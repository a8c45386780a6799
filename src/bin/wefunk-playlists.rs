use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use wefunk_playlists::config::default_output_path;
use wefunk_playlists::{CancellationState, HarvestConfig, Harvester, WefunkClient};

/// WEFUNK Radio playlist scraper
#[derive(Parser)]
#[command(
    name = "wefunk-playlists",
    about = "Scrape WEFUNK Radio show playlists into a JSON file",
    long_about = None
)]
struct Cli {
    /// First show number (asked interactively when omitted)
    #[arg(long)]
    start: Option<u32>,

    /// Last show number (asked interactively when omitted)
    #[arg(long)]
    end: Option<u32>,

    /// Output file (default: wefunk_shows_{start}_{end}.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show detailed debug information
    #[arg(long)]
    verbose: bool,
}

/// Ask until the operator types a number.
fn prompt_show_number(prompt: &str) -> io::Result<u32> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{prompt}");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no show number given",
            ));
        }
        match line.trim().parse::<u32>() {
            Ok(number) => return Ok(number),
            Err(_) => println!("Invalid input. Please enter a number."),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("--- WEFUNK Radio PL Scraper ---");
    let start = match args.start {
        Some(start) => start,
        None => prompt_show_number("Enter START show number: ")?,
    };
    let end = match args.end {
        Some(end) => end,
        None => prompt_show_number("Enter END show number: ")?,
    };
    let (start, end) = if start > end { (end, start) } else { (start, end) };

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(start, end));
    let config = HarvestConfig::new(output);

    let http_client = http_client::native::NativeClient::new();
    let client = WefunkClient::with_base_url(Box::new(http_client), config.base_url.clone())
        .with_timeout(config.request_timeout);

    let cancel = CancellationState::new();
    cancel.cancel_on_ctrl_c();

    let harvester = Harvester::new(client, config).with_cancellation(cancel);
    let report = harvester.run(start, end).await?;

    let stats = &report.stats;
    println!(
        "\nDone. Scraped {} shows ({} skipped, {} errors{}). Saved to {}",
        stats.accepted,
        stats.skipped,
        stats.errors,
        if stats.cancelled { ", interrupted" } else { "" },
        harvester.config().output_path.display()
    );

    Ok(())
}
