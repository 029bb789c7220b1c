use anyhow::Result;
use axum::Router;
use clap::Parser;
use docsearch_core::SearcherConfig;
use server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Line-record corpus to index at startup
    #[arg(long, default_value = "./data/raw_input")]
    corpus: String,
    /// Stop-word dictionary, one word per line
    #[arg(long)]
    stop_words: Option<String>,
    /// Drop a built-in list of common English words
    #[arg(long, default_value_t = false)]
    english_stop_words: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 9090)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let mut config = SearcherConfig::new(&args.corpus).with_english_stop_words(args.english_stop_words);
    if let Some(path) = &args.stop_words {
        config = config.with_stop_words(path);
    }
    let app: Router = build_app(&config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
