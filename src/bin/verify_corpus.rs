use anyhow::{Context, Result};
use clap::Parser;
use jcrew_product_scraper::{load_manifest, render_report, run_corpus, RunOptions};
use std::fs;
use std::path::PathBuf;

/// Verify product field extraction over a corpus of saved page snapshots.
#[derive(Parser, Debug)]
#[command(name = "verify_corpus")]
struct Args {
    /// Directory containing the snapshot files and the manifest
    corpus: PathBuf,

    /// Manifest file name inside the corpus directory
    #[arg(long, default_value = "manifest.json")]
    manifest: String,

    /// Number of fixtures per group
    #[arg(long, default_value_t = 50)]
    batch_size: usize,

    /// Suppress per-case progress output
    #[arg(long)]
    quiet: bool,

    /// Write the full report to a file as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let manifest_path = args.corpus.join(&args.manifest);
    let fixtures = load_manifest(&manifest_path)?;
    println!(
        "Verifying {} cases from {}",
        fixtures.len(),
        manifest_path.display()
    );

    let options = RunOptions {
        batch_size: args.batch_size,
        progress: !args.quiet,
    };
    let result = run_corpus(&args.corpus, fixtures, &options)?;

    println!("{}", render_report(&result));
    println!(
        "Completed at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(output_path) = &args.output {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize report")?;
        fs::write(output_path, json).context("Failed to write report file")?;
        println!("Report saved to {}", output_path.display());
    }

    if !result.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}
