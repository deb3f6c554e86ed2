//! Clap argument definitions for the `lfind` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use lfind_extract::MimeKind;

/// Top-level CLI options.
#[derive(Parser, Debug)]
#[command(name = "lfind", version)]
#[command(about = "Search file names, file contents, or piped lines through a throwaway index")]
pub struct Cli {
    /// Queries to run; starts an interactive prompt when omitted
    #[arg(value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Directory to search [default: current directory]
    #[arg(short, long, value_name = "DIR", value_parser = parse_root)]
    pub path: Option<PathBuf>,

    /// Search file contents instead of file names
    #[arg(short, long)]
    pub content: bool,

    /// Comma-separated content types to index in content mode: pdf, doc, text
    #[arg(short, long, value_name = "LIST", value_delimiter = ',')]
    pub mimetypes: Vec<MimeKind>,

    /// Treat each query as a raw index query expression
    #[arg(short, long)]
    pub expression: bool,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output results as JSON, one object per query
    #[arg(long)]
    pub json: bool,

    /// Configuration file to use instead of ~/.lfind.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Validates the crawl root before anything is indexed.
fn parse_root(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err("path does not exist".to_string());
    }
    if !path.is_dir() {
        return Err(format!("{value} is not a directory"));
    }
    Ok(path)
}
