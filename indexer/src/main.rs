use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docsearch_core::{BuildStats, Searcher, SearcherConfig, WordSegmenter};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the in-memory index from a line-record corpus and inspect it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Line-record corpus (title, url, content separated by 0x03)
    #[arg(long)]
    corpus: String,
    /// Stop-word dictionary, one word per line
    #[arg(long)]
    stop_words: Option<String>,
    /// Drop a built-in list of common English words
    #[arg(long, default_value_t = false)]
    english_stop_words: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print document/term counts
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Print the posting list of one term
    Inspect {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long)]
        term: String,
    },
    /// Run a query and print the JSON result list
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long)]
        q: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { corpus } => {
            let (_, stats) = open(&corpus)?;
            println!("{}", stats_json(&stats));
        }
        Commands::Inspect { corpus, term } => {
            let (searcher, _) = open(&corpus)?;
            let index = searcher.index();
            match index.postings(&term) {
                Some(list) => {
                    for posting in list {
                        let (title, url) = index
                            .document(posting.doc_id)
                            .map(|d| (d.title.as_str(), d.url.as_str()))
                            .unwrap_or_default();
                        println!("doc_id={} weight={} title={title} url={url}", posting.doc_id, posting.weight);
                    }
                }
                None => println!("term {term:?} not in index"),
            }
        }
        Commands::Query { corpus, q } => {
            let (searcher, _) = open(&corpus)?;
            println!("{}", searcher.search_json(&q)?);
        }
    }
    Ok(())
}

fn open(args: &CorpusArgs) -> Result<(Searcher<WordSegmenter>, BuildStats)> {
    let mut config = SearcherConfig::new(&args.corpus).with_english_stop_words(args.english_stop_words);
    if let Some(path) = &args.stop_words {
        config = config.with_stop_words(path);
    }
    let (searcher, stats) = Searcher::open(&config).with_context(|| format!("building index from {}", args.corpus))?;
    tracing::info!(corpus = %args.corpus, documents = stats.documents, "index ready");
    Ok((searcher, stats))
}

fn stats_json(stats: &BuildStats) -> serde_json::Value {
    serde_json::json!({
        "documents": stats.documents,
        "skipped": stats.skipped,
        "terms": stats.terms,
        "postings": stats.postings,
    })
}
