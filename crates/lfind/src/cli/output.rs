//! Result presentation.
//!
//! Text output per query:
//!
//! ```text
//! Query: 'report'
//! 2 Matches Found:
//! [1]    FILE  | report.pdf | "/home/me/report.pdf"
//! [2]    ...
//! ---
//! ```
//!
//! A failed query prints `Error Occurred.` and an empty result prints
//! `No matches found.`, so the two are never confused. JSON output is one object per
//! query per line.

use std::io::{self, Write};

use lfind_index::SearchError;
use serde::Serialize;

/// The outcome of one query, ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    /// The query as entered.
    pub query: String,
    /// Failure message, when the query could not be evaluated.
    pub error: Option<String>,
    /// Formatted matches, best first.
    pub matches: Vec<String>,
}

impl QueryOutcome {
    /// Wraps a searcher result.
    pub fn new(query: &str, result: Result<Vec<String>, SearchError>) -> Self {
        let (error, matches) = match result {
            Ok(matches) => (None, matches),
            Err(e) => (Some(e.to_string()), Vec::new()),
        };
        Self {
            query: query.to_string(),
            error,
            matches,
        }
    }

    /// Renders the human-readable block, including the trailing separator.
    pub fn to_text(&self) -> String {
        let mut out = format!("Query: '{}'\n", self.query);
        if self.error.is_some() {
            out.push_str("Error Occurred.\n");
        } else if self.matches.is_empty() {
            out.push_str("No matches found.\n");
        } else {
            let n = self.matches.len();
            let plural = if n == 1 { "" } else { "es" };
            out.push_str(&format!("{n} Match{plural} Found:\n"));
            for (i, line) in self.matches.iter().enumerate() {
                let rank = format!("[{}]", i + 1);
                out.push_str(&format!("{rank:<6} {line}\n"));
            }
        }
        out.push_str("---\n");
        out
    }
}

/// Writes one outcome as text or as a single JSON line.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &QueryOutcome, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, outcome)?;
        writeln!(out)
    } else {
        out.write_all(outcome.to_text().as_bytes())
    }
}
