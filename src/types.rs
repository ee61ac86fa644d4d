//! Shared types and data structures.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A category of searchable Chronosphere entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Dashboards,
    Teams,
    Collections,
    Monitors,
    Services,
}

impl Kind {
    /// Every kind, in the order shortcuts are listed and sent to the API.
    pub const ALL: [Kind; 5] = [
        Kind::Dashboards,
        Kind::Teams,
        Kind::Collections,
        Kind::Monitors,
        Kind::Services,
    ];

    /// Wire name, also used as the web UI path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Dashboards => "dashboards",
            Kind::Teams => "teams",
            Kind::Collections => "collections",
            Kind::Monitors => "monitors",
            Kind::Services => "services",
        }
    }

    /// Single-letter query prefix (without the colon).
    pub fn prefix(self) -> char {
        match self {
            Kind::Dashboards => 'd',
            Kind::Teams => 't',
            Kind::Collections => 'c',
            Kind::Monitors => 'm',
            Kind::Services => 's',
        }
    }

    /// Capitalized plural label for shortcut titles.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Dashboards => "Dashboards",
            Kind::Teams => "Teams",
            Kind::Collections => "Collections",
            Kind::Monitors => "Monitors",
            Kind::Services => "Services",
        }
    }

    /// Look up the kind whose prefix letter is `c` (case-insensitive).
    pub fn from_prefix(c: char) -> Option<Kind> {
        let c = c.to_ascii_lowercase();
        Kind::ALL.into_iter().find(|k| k.prefix() == c)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully resolved search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query text with any kind prefix stripped, trimmed.
    pub text: String,
    /// Either a single kind (prefix given) or all of [`Kind::ALL`].
    pub kinds: Vec<Kind>,
    /// Base URL with scheme and no trailing slash.
    pub domain: String,
    pub token: String,
}

impl SearchRequest {
    /// Lowercased query text used for shortcut matching.
    pub fn text_lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Item type tag as returned by `searchV2`.
///
/// Anything the mapper does not know how to render lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Dashboards,
    Teams,
    Collections,
    Monitors,
    Services,
    #[serde(other)]
    Other,
}

/// Read a string field that the service may send as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TeamRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CollectionRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slug: String,
}

/// One entry of `data.searchV2.items`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResultItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slug: String,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub collection: Option<CollectionRef>,
}
