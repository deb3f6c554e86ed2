//! Top-level run: resolve options, build the searcher, answer queries, clean up.

use std::{
    collections::BTreeSet,
    env,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use lfind_config::Config;
use lfind_extract::MimeKind;
use lfind_index::{SearchError, SearchMode, SearchOptions, Searcher, build_searcher};
use tracing::{debug, warn};

use crate::cli::{
    args::Cli,
    output::{QueryOutcome, write_outcome},
};

/// Interactive prompt.
pub const PROMPT: &str = "query> ";

/// Runs the CLI to completion.
pub fn run(cli: &Cli) -> ExitCode {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(source) = &config.source {
        debug!(path = %source.display(), "loaded configuration");
    }

    let options = match search_options(cli, &config) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let mode = SearchMode::detect(cli.content);
    if mode == SearchMode::PipedLines && cli.queries.is_empty() {
        eprintln!("error: piped input is indexed as data, so queries must be given as arguments");
        return ExitCode::FAILURE;
    }

    let mut searcher = match build_searcher(mode, &options, io::stdin().lock()) {
        Ok(searcher) => searcher,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = if cli.queries.is_empty() {
        interactive(&*searcher, cli, io::stdin().lock(), &mut out)
    } else {
        cli.queries
            .iter()
            .try_for_each(|query| answer(&*searcher, cli, query, &mut out))
    };
    searcher.close();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Downstream closed early, e.g. `lfind foo | head`.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves searcher options from config and flags. Flags win.
fn search_options(cli: &Cli, config: &Config) -> Result<SearchOptions, String> {
    let mut options = SearchOptions::from_config(config);
    options.root = match &cli.path {
        Some(path) => path.clone(),
        None => env::current_dir()
            .map_err(|e| format!("could not determine current directory: {e}"))?,
    };
    options.mime_types = if cli.mimetypes.is_empty() {
        allow_list_from_config(config)?
    } else {
        Some(cli.mimetypes.iter().copied().collect())
    };
    Ok(options)
}

/// Parses `[content] mime_types`. An empty list means every extractable kind.
fn allow_list_from_config(config: &Config) -> Result<Option<BTreeSet<MimeKind>>, String> {
    if config.content.mime_types.is_empty() {
        return Ok(None);
    }
    config
        .content
        .mime_types
        .iter()
        .map(|name| MimeKind::parse_allowed(name))
        .collect::<Result<BTreeSet<_>, _>>()
        .map(Some)
        .map_err(|e| format!("invalid [content] mime_types: {e}"))
}

/// Evaluates one query and prints its outcome.
fn answer<W: Write>(searcher: &dyn Searcher, cli: &Cli, query: &str, out: &mut W) -> io::Result<()> {
    let result = evaluate(searcher, query, cli.expression);
    if let Err(e) = &result {
        warn!(query, error = %e, "query failed");
    }
    write_outcome(out, &QueryOutcome::new(query, result), cli.json)
}

/// Runs a query in free-text or raw-expression form.
fn evaluate(searcher: &dyn Searcher, query: &str, expression: bool) -> Result<Vec<String>, SearchError> {
    if expression {
        searcher.query_expression(query)
    } else {
        searcher.query(query)
    }
}

/// True for the inputs that end an interactive session.
fn is_exit(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Reads queries line by line until end of input or an exit sentinel.
///
/// Blank lines are ignored. The prompt is suppressed in JSON mode so the output stays
/// one object per line.
fn interactive<R: BufRead, W: Write>(searcher: &dyn Searcher, cli: &Cli, mut input: R, out: &mut W) -> io::Result<()> {
    let mut line = String::new();
    loop {
        if !cli.json {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            if !cli.json {
                writeln!(out)?;
            }
            return Ok(());
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit(query) {
            return Ok(());
        }
        answer(searcher, cli, query, out)?;
        out.flush()?;
    }
}
