//! Configuration file parsing and input resolution.
//!
//! Domain and token are resolved in layers (first present wins):
//! 1. Environment (`CHRONOSPHERE_DOMAIN`, `CHRONOSPHERE_API_TOKEN`)
//! 2. Command-line flags (`--url`, `--token`)
//! 3. Config file at `~/.chronosphere-search/config.toml`
//!
//! A variable that is set but empty still counts as present, and then
//! fails validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::cli::Cli;
use crate::errors::SearchError;
use crate::types::{Kind, SearchRequest};

pub const DOMAIN_ENV: &str = "CHRONOSPHERE_DOMAIN";
pub const TOKEN_ENV: &str = "CHRONOSPHERE_API_TOKEN";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Settings read from the optional config file, defaults applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub chronosphere: ChronosphereConfig,
    pub output: OutputConfig,
}

/// Fallback connection settings, used only when neither env nor flags
/// provide a value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChronosphereConfig {
    pub domain: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Directory prefix for entry icons.
    pub icon_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            icon_dir: "./assets".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Option-based overlay types (for partial deserialization)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigOverlay {
    chronosphere: Option<ChronosphereOverlay>,
    output: Option<OutputOverlay>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ChronosphereOverlay {
    domain: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputOverlay {
    icon_dir: Option<String>,
}

impl Config {
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(c) = overlay.chronosphere {
            if c.domain.is_some() {
                self.chronosphere.domain = c.domain;
            }
            if c.token.is_some() {
                self.chronosphere.token = c.token;
            }
        }
        if let Some(out) = overlay.output
            && let Some(v) = out.icon_dir
        {
            self.output.icon_dir = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn home_dir() -> Option<PathBuf> {
    #[allow(deprecated)]
    std::env::home_dir()
}

fn parse_overlay(contents: &str, path: &Path) -> Result<ConfigOverlay> {
    toml::from_str(contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

/// Returns `Ok(None)` if the file does not exist.
fn load_overlay(path: &Path) -> Result<Option<ConfigOverlay>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(parse_overlay(&contents, path)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::anyhow!(
            "failed to read config file {}: {}",
            path.display(),
            e
        )),
    }
}

impl Config {
    /// Load `~/.chronosphere-search/config.toml` on top of defaults.
    pub fn load() -> Result<Config> {
        let dir = home_dir().map(|h| h.join(".chronosphere-search"));
        Self::load_from_dir(dir.as_deref())
    }

    /// Load from an explicit config directory so tests never touch `$HOME`.
    pub fn load_from_dir(dir: Option<&Path>) -> Result<Config> {
        let mut config = Config::default();
        if let Some(dir) = dir
            && let Some(overlay) = load_overlay(&dir.join("config.toml"))?
        {
            config.apply_overlay(overlay);
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Input resolution
// ---------------------------------------------------------------------------

/// Join positional tokens with single spaces and trim.
pub fn search_text(tokens: &[String]) -> String {
    tokens.join(" ").trim().to_string()
}

/// Split a two-character kind prefix (`d:`, `T:`, ...) off `text`.
///
/// Returns the narrowed kind list and the remaining text. Without a
/// recognised prefix the text is returned unchanged with every kind.
pub fn split_kind_prefix(text: &str) -> (Vec<Kind>, String) {
    let mut chars = text.chars();
    if let (Some(c), Some(':')) = (chars.next(), chars.next())
        && let Some(kind) = Kind::from_prefix(c)
    {
        return (vec![kind], text[2..].trim().to_string());
    }
    (Kind::ALL.to_vec(), text.to_string())
}

/// Add `https://` when no http scheme is present and drop one trailing `/`.
pub fn normalize_domain(domain: &str) -> String {
    let mut domain = if domain.starts_with("http") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };
    if domain.ends_with('/') {
        domain.pop();
    }
    domain
}

/// Read an environment variable, keeping a set-but-non-UTF-8 value
/// (lossily converted) rather than treating it as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
}

fn require(
    env: &impl Fn(&str) -> Option<String>,
    var: &str,
    flag: Option<&String>,
    file: impl FnOnce() -> Result<Option<String>, SearchError>,
) -> Result<String, SearchError> {
    let value = match env(var).or_else(|| flag.cloned()) {
        Some(v) => Some(v),
        None => file()?,
    };
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SearchError::Configuration(format!("{var} not specified."))),
    }
}

/// Pick a value out of the config file, surfacing a load failure only now
/// that the file is actually needed.
fn from_file(
    config: &Result<Config>,
    pick: fn(&ChronosphereConfig) -> Option<&String>,
) -> Result<Option<String>, SearchError> {
    match config {
        Ok(c) => Ok(pick(&c.chronosphere).cloned()),
        Err(e) => Err(SearchError::Configuration(format!("{e:#}"))),
    }
}

/// Resolve a [`SearchRequest`] from CLI arguments, the config file load
/// result, and an environment lookup.
///
/// `env` is injected so callers can pass [`process_env`] in production and
/// a fixed map in tests. A config file that failed to load is only an
/// error when env and flags leave a value unset.
pub fn resolve_request<F>(
    cli: &Cli,
    config: &Result<Config>,
    env: F,
) -> Result<SearchRequest, SearchError>
where
    F: Fn(&str) -> Option<String>,
{
    let (kinds, text) = split_kind_prefix(&search_text(&cli.text));
    info!("Query Text: {text}");
    let kind_names: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
    info!("Kind Filter: {kind_names:?}");

    let domain = require(&env, DOMAIN_ENV, cli.domain.as_ref(), || {
        from_file(config, |c| c.domain.as_ref())
    })?;
    let domain = normalize_domain(&domain);
    info!("{DOMAIN_ENV}: {domain}");

    let token = require(&env, TOKEN_ENV, cli.token.as_ref(), || {
        from_file(config, |c| c.token.as_ref())
    })?;
    info!("{TOKEN_ENV}: {token}");

    Ok(SearchRequest {
        text,
        kinds,
        domain,
        token,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
