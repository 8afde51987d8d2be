//! `dork_parser`: runs a list of search dorks against the configured
//! providers and writes the unique result URLs to a timestamped file.

mod config;
mod console;
mod input;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use dork_engine::{Coordinator, EngineEvent, ReqwestFetcher, RunSummary};
use dork_logging::{dork_info, LogDestination};
use log::LevelFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "dork_parser")]
#[command(about = "Search dorks across several providers and collect result URLs")]
struct Cli {
    /// Text file with one dork per line
    dorks: PathBuf,

    /// RON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(long)]
    workers: Option<usize>,

    /// Comma separated provider ids, searched in the given order
    #[arg(long, value_delimiter = ',')]
    providers: Option<Vec<String>>,

    /// Directory for the results file
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_overrides(cli.workers, cli.providers, cli.output_dir);

    // The console already shows progress; the terminal logger only adds warnings.
    if config.log_to_file {
        dork_logging::initialize(LogDestination::File, LevelFilter::Info);
    } else {
        dork_logging::initialize(LogDestination::Terminal, LevelFilter::Warn);
    }

    let dorks = input::load_dorks(&cli.dorks)?;
    if dorks.is_empty() {
        bail!("{} contains no dorks", cli.dorks.display());
    }
    println!("Loaded {} dorks", dorks.len());

    let fetcher =
        ReqwestFetcher::new(config.fetch_settings()).context("failed to build HTTP client")?;
    let coordinator = Coordinator::new(
        config.registry()?,
        Arc::new(fetcher),
        config.engine_settings(),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    {
        let _guard = runtime.enter();
        coordinator.start(dorks, config.providers.as_slice(), config.workers)?;
    }
    dork_info!("Dork parser started with {} workers", config.workers);

    println!("Commands: p = pause, r = resume, s = stop");
    spawn_stdin_controls(coordinator.clone());

    let summary = follow_events(&coordinator);
    print_line(&console::counters(&summary.stats));
    println!("Total valid URLs found: {}", summary.urls.len());

    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}

/// Prints events until the run completes.
fn follow_events(coordinator: &Coordinator) -> RunSummary {
    loop {
        let Some(event) = coordinator.recv_timeout(Duration::from_millis(250)) else {
            continue;
        };
        for line in console::progress_lines(&event, || coordinator.stats()) {
            print_line(&line);
        }
        if let EngineEvent::RunCompleted(summary) = event {
            return summary;
        }
    }
}

fn spawn_stdin_controls(coordinator: Coordinator) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let accepted = match line.trim() {
                "p" | "pause" => coordinator.pause(),
                "r" | "resume" => coordinator.resume(),
                "s" | "stop" => coordinator.stop(),
                "" => continue,
                other => {
                    eprintln!("Unknown command '{other}' (use p, r or s)");
                    continue;
                }
            };
            if !accepted {
                eprintln!("Command ignored while {}", coordinator.state());
            }
        }
    });
}

fn print_line(message: &str) {
    println!("{}", console::stamped(Local::now().time(), message));
}
