use std::io;

use anyhow::Result;
use chronosphere_search::{app, cli, errors::SearchError, output};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the stderr log filter.
const LOG_ENV: &str = "CHRONOSPHERE_SEARCH_LOG";

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let result = cli::try_parse()
        .map_err(|e| {
            let msg = e.to_string();
            SearchError::Usage(msg.lines().next().unwrap_or_default().to_string())
        })
        .and_then(|cli| app::run(&cli));

    let mut stdout = io::stdout().lock();
    match result {
        Ok(entries) => output::write_items(&mut stdout, &entries)?,
        Err(err) => {
            output::write_error(&mut stdout, &err)?;
            output::report_error(&err);
            std::process::exit(err.exit_code());
        }
    }
    Ok(())
}
