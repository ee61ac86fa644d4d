use clap::Parser;

/// chronosphere-search - launcher script filter for Chronosphere
///
/// Prefix the query with `d:`, `t:`, `c:`, `m:` or `s:` to restrict the
/// search to dashboards, teams, collections, monitors or services.
#[derive(Parser, Debug, Default)]
#[command(name = "chronosphere-search", version, about)]
pub struct Cli {
    /// Search text
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Chronosphere URL, e.g. https://custom.chronosphere.io
    #[arg(long = "url", value_name = "URL")]
    pub domain: Option<String>,

    /// API token (see the Chronosphere personal access token docs)
    #[arg(long)]
    pub token: Option<String>,
}

/// Parse `std::env::args`, leaving `--help`/`--version` handling to clap and
/// returning every other parse failure to the caller.
pub fn try_parse() -> Result<Cli, clap::Error> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            e.exit()
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_tokens_and_flags() {
        let cli = Cli::try_parse_from([
            "chronosphere-search",
            "d:",
            "cpu",
            "--url",
            "acme.chronosphere.io",
            "--token",
            "abc",
        ])
        .unwrap();
        assert_eq!(cli.text, vec!["d:", "cpu"]);
        assert_eq!(cli.domain.as_deref(), Some("acme.chronosphere.io"));
        assert_eq!(cli.token.as_deref(), Some("abc"));
    }

    #[test]
    fn no_arguments_is_valid() {
        let cli = Cli::try_parse_from(["chronosphere-search"]).unwrap();
        assert!(cli.text.is_empty());
        assert!(cli.domain.is_none());
        assert!(cli.token.is_none());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(Cli::try_parse_from(["chronosphere-search", "--bogus"]).is_err());
    }
}
