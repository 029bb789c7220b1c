//! Turns a directory of HTML pages into the line-record corpus the index
//! builder reads.

use anyhow::{anyhow, Context, Result};
use docsearch_core::Record;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_URL_PREFIX: &str = "https://www.boost.org/doc/libs/1_53_0/doc/";

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub written: usize,
    pub skipped: usize,
}

/// All `.html` files under `root`, in a stable order.
pub fn enum_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(anyhow!("input path does not exist: {}", root.display()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let p = entry.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("html") {
            files.push(p.to_path_buf());
        }
    }
    Ok(files)
}

/// Text of the `<title>` element; `None` when the page has none.
pub fn parse_title(doc: &Html) -> Option<String> {
    doc.select(&TITLE).next().map(|n| n.text().collect::<String>())
}

/// Every text node of the page with the markup stripped.
pub fn parse_content(doc: &Html) -> String {
    doc.root_element().text().collect::<String>()
}

/// `prefix` followed by the file's path relative to `root`, `/`-separated.
pub fn parse_url(root: &Path, file: &Path, prefix: &str) -> Result<String> {
    let rel = file
        .strip_prefix(root)
        .with_context(|| format!("{} is not under {}", file.display(), root.display()))?;
    let tail: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
    Ok(format!("{}{}", prefix, tail.join("/")))
}

pub fn parse_file(root: &Path, file: &Path, prefix: &str) -> Result<Record> {
    let html = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let doc = Html::parse_document(&html);
    let title = parse_title(&doc).ok_or_else(|| anyhow!("<title> not found"))?;
    let content = parse_content(&doc);
    let url = parse_url(root, file, prefix)?;
    Ok(Record::new(title, url, content))
}

/// Parse every page under `input` and write one record per line to
/// `output`. Pages that fail to parse are logged and skipped; failing to
/// enumerate the input or write the output aborts the run.
pub fn run(input: &Path, output: &Path, prefix: &str) -> Result<ParseStats> {
    let files = enum_files(input)?;
    tracing::info!(input = %input.display(), files = files.len(), "parsing html files");
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut out = BufWriter::new(File::create(output).with_context(|| format!("creating {}", output.display()))?);
    let mut stats = ParseStats::default();
    for file in &files {
        match parse_file(input, file, prefix) {
            Ok(record) => {
                out.write_all(record.to_line().as_bytes())?;
                stats.written += 1;
            }
            Err(err) => {
                tracing::warn!(file = %file.display(), error = %err, "skipping file");
                stats.skipped += 1;
            }
        }
    }
    out.flush()?;
    tracing::info!(output = %output.display(), written = stats.written, skipped = stats.skipped, "parse complete");
    Ok(stats)
}
