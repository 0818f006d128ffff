mod cache;
mod fetch;
mod parser;
mod pipeline;
mod render;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};

use cache::{CacheStore, ProblemRecord};
use fetch::{HttpSource, PageSource};

#[derive(Parser)]
#[command(
    name = "atcoder_setup",
    about = "AtCoder contest scaffolding: scrape, cache, project samples"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a contest into cache, sample files, and render contexts
    Setup {
        /// Contest id (e.g. abc421)
        contest: String,
        /// Problem letters to process, in order
        #[arg(short, long, default_value = "A,B,C,D,E,F", value_delimiter = ',')]
        problems: Vec<String>,
        /// Session cookie file (JSON object); missing file means guest access
        #[arg(long, default_value = "cookies.json")]
        cookies: PathBuf,
    },
    /// Check whether the cookie file grants a logged-in session
    Login {
        #[arg(long, default_value = "cookies.json")]
        cookies: PathBuf,
    },
    /// Extract title and samples from a saved HTML file, no network
    Offline {
        /// Saved problem page
        html: PathBuf,
        /// Problem letter the page belongs to
        #[arg(short, long, default_value = "A")]
        problem: String,
        /// Output base directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Setup {
            contest,
            problems,
            cookies,
        } => run_setup(&contest, &problems, &cookies).await,
        Commands::Login { cookies } => run_login(&cookies).await,
        Commands::Offline { html, problem, out } => run_offline(&html, &problem, &out),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

async fn run_setup(contest: &str, problems: &[String], cookie_path: &Path) -> Result<()> {
    let contest = contest.to_lowercase();
    let problems: Vec<String> = problems
        .iter()
        .map(|p| p.trim().to_uppercase())
        .filter(|p| !p.is_empty())
        .collect();

    println!("Contest: {}", contest.to_uppercase());

    let cookies = fetch::load_cookies(cookie_path)?;
    let source = HttpSource::new(cookies)?;
    // Everything lands under the upper-cased contest directory.
    let store = CacheStore::new(contest.to_uppercase());

    let summary = pipeline::scrape_contest(&source, &store, &contest, &problems).await?;

    let problem_ctxs: Vec<_> = summary
        .problems
        .iter()
        .map(|record| render::problem_context(&contest, record))
        .collect();
    let contest_ctx = render::contest_context(&contest, &summary.contest, &summary.problems);
    render::write_contexts(store.base_dir(), &contest_ctx, &problem_ctxs)?;

    println!(
        "\nScrape finished: {} fetched, {} from cache. Contexts in {}/render",
        summary.fetched,
        summary.cache_hits,
        store.base_dir().display()
    );
    Ok(())
}

async fn run_login(cookie_path: &Path) -> Result<()> {
    let cookies = fetch::load_cookies(cookie_path)?;
    let source = HttpSource::new(cookies)?;

    let url = "https://atcoder.jp/";
    println!("fetching: {}", url);
    let html = source.fetch(url, Duration::ZERO).await?;

    match fetch::screen_name(&html) {
        Some(name) => println!("Screen name: {}", name),
        None => println!("Not logged in (check the cookie file)"),
    }
    Ok(())
}

/// Offline extractor check against a saved page: same extract, persist, and
/// projection path as a live run, minus the network.
fn run_offline(html_path: &Path, problem: &str, out: &Path) -> Result<()> {
    let html = std::fs::read_to_string(html_path)?;
    let problem = problem.to_uppercase();

    let record = ProblemRecord {
        problem,
        title: parser::title::extract_title(&html),
        url: None,
        examples: parser::samples::extract_samples(&html),
    };

    println!("title: {}", record.title.as_deref().unwrap_or("(none)"));
    println!("extracted {} example(s)", record.examples.len());
    for (i, pair) in record.examples.iter().enumerate() {
        println!("--- example {} ---", i + 1);
        println!("INPUT:\n{}", pair.input);
        println!("OUTPUT:\n{}", pair.output);
    }

    let store = CacheStore::new(out);
    store.save_problem(&record)?;
    pipeline::project_samples(store.base_dir(), &record)?;
    println!("saved to {}", store.base_dir().join("examples").display());
    Ok(())
}
