use anyhow::Result;
use clap::Parser;
use parser::{run, DEFAULT_URL_PREFIX};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "parser")]
#[command(about = "Strip HTML pages into a line-record corpus (title, url, content)")]
struct Cli {
    /// Directory searched recursively for .html files
    #[arg(long, default_value = "./data/input")]
    input: PathBuf,
    /// Output corpus file
    #[arg(long, default_value = "./data/tmp/raw_input")]
    output: PathBuf,
    /// Prepended to each page's path relative to --input to form its URL
    #[arg(long, default_value = DEFAULT_URL_PREFIX)]
    url_prefix: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();
    let stats = run(&args.input, &args.output, &args.url_prefix)?;
    println!("wrote {} records ({} skipped)", stats.written, stats.skipped);
    Ok(())
}
