//! Script-filter JSON output.
//!
//! Results and failures both go to stdout as a single `{"items": [...]}`
//! object so the launcher always receives well-formed JSON. Error detail
//! goes to stderr via [`report_error`].

use std::error::Error;
use std::io::Write;

use serde::Serialize;
use tracing::error;

use crate::errors::SearchError;
use crate::mapper::DisplayEntry;

pub const ERROR_TITLE: &str = "Error in Chronosphere search";

/// Top-level script-filter envelope.
#[derive(Debug, Serialize)]
pub struct ScriptFilter<'a, T: Serialize> {
    pub items: &'a [T],
}

/// The single non-actionable row shown on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub title: String,
    pub subtitle: String,
    pub valid: bool,
}

impl ErrorEntry {
    pub fn from_error(err: &SearchError) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            subtitle: format!("Details: {err}"),
            valid: false,
        }
    }
}

fn write_envelope<W: Write, T: Serialize>(writer: &mut W, items: &[T]) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, &ScriptFilter { items })?;
    writeln!(writer)?;
    writer.flush()
}

/// Write the result list.
pub fn write_items<W: Write>(writer: &mut W, entries: &[DisplayEntry]) -> std::io::Result<()> {
    write_envelope(writer, entries)
}

/// Write the single error entry for `err`.
pub fn write_error<W: Write>(writer: &mut W, err: &SearchError) -> std::io::Result<()> {
    write_envelope(writer, &[ErrorEntry::from_error(err)])
}

/// Log the full error, its source chain and any hint to stderr.
pub fn report_error(err: &SearchError) {
    error!("{err}");
    let mut source = err.source();
    while let Some(cause) = source {
        error!("caused by: {cause}");
        source = cause.source();
    }
    error!("{err:?}");
    if let Some(hint) = err.hint() {
        error!("hint: {hint}");
    }
}
