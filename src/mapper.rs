//! Mapping of search results and kind shortcuts to launcher entries.
//!
//! Final order is always:
//! 1. shortcuts whose match hint contains the query text,
//! 2. remote items in service order,
//! 3. the remaining shortcuts.

use serde::Serialize;
use tracing::debug;

use crate::types::{ItemType, Kind, SearchRequest, SearchResultItem};

/// Icon reference in script-filter JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub path: String,
}

/// One row in the launcher result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    pub title: String,
    pub subtitle: String,
    pub arg: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_hint: Option<String>,
    pub icon: Icon,
}

/// Percent-encode like an HTML form: unreserved bytes kept, space as `+`.
fn quote_plus(text: &str) -> String {
    urlencoding::encode(text).replace("%20", "+")
}

fn shortcut(kind: Kind, request: &SearchRequest, icon_dir: &str) -> DisplayEntry {
    DisplayEntry {
        uid: None,
        entry_type: "default",
        title: format!("{} ({}:)", kind.label(), kind.prefix()),
        subtitle: format!("Search {kind} for \"{}\"", request.text),
        arg: format!(
            "{}/{kind}/?searchText={}",
            request.domain,
            quote_plus(&request.text)
        ),
        match_hint: Some(format!("{}: search {kind}", kind.prefix())),
        icon: Icon {
            path: format!("{icon_dir}/search.png"),
        },
    }
}

/// Build one shortcut per requested kind and split them into
/// `(leading, trailing)` by whether the query text matches the hint.
///
/// Empty text matches every hint.
pub fn shortcut_entries(
    request: &SearchRequest,
    icon_dir: &str,
) -> (Vec<DisplayEntry>, Vec<DisplayEntry>) {
    let needle = request.text_lower();
    Kind::ALL
        .into_iter()
        .filter(|k| request.kinds.contains(k))
        .map(|k| shortcut(k, request, icon_dir))
        .partition(|entry| {
            needle.is_empty()
                || entry
                    .match_hint
                    .as_deref()
                    .is_some_and(|hint| hint.contains(&needle))
        })
}

/// `"{team}"` or `"{team} - {collection}"`; an unnamed collection counts
/// as no collection.
fn team_and_collection(item: &SearchResultItem) -> String {
    let team = item.team.as_ref().map(|t| t.name.as_str()).unwrap_or_default();
    match &item.collection {
        Some(c) if !c.name.is_empty() => format!("{team} - {}", c.name),
        _ => team.to_string(),
    }
}

/// Render one remote item, or `None` for types without a display form.
pub fn item_entry(item: &SearchResultItem, domain: &str, icon_dir: &str) -> Option<DisplayEntry> {
    let (title, subtitle, kind) = match item.item_type {
        ItemType::Dashboards => (
            format!("Dashboard: {}", item.name),
            team_and_collection(item),
            Kind::Dashboards,
        ),
        ItemType::Teams => (format!("Team: {}", item.name), "Team".to_string(), Kind::Teams),
        ItemType::Collections => (
            format!("Collection: {}", item.name),
            item.team.as_ref().map(|t| t.name.clone()).unwrap_or_default(),
            Kind::Collections,
        ),
        ItemType::Monitors => (
            format!("Monitor: {}", item.name),
            team_and_collection(item),
            Kind::Monitors,
        ),
        // Services are searchable and get a shortcut, but have no
        // result rendering; they are dropped along with unknown types.
        ItemType::Services | ItemType::Other => {
            debug!(slug = %item.slug, item_type = ?item.item_type, "dropping result item");
            return None;
        }
    };
    Some(DisplayEntry {
        uid: Some(item.slug.clone()),
        entry_type: "default",
        title,
        subtitle,
        arg: format!("{domain}/{kind}/{}", item.slug),
        match_hint: None,
        icon: Icon {
            path: format!("{icon_dir}/{kind}.png"),
        },
    })
}

/// Assemble the full, ordered entry list for a request.
pub fn build_entries(
    items: &[SearchResultItem],
    request: &SearchRequest,
    icon_dir: &str,
) -> Vec<DisplayEntry> {
    let (leading, trailing) = shortcut_entries(request, icon_dir);
    let mut entries = leading;
    entries.extend(
        items
            .iter()
            .filter_map(|item| item_entry(item, &request.domain, icon_dir)),
    );
    entries.extend(trailing);
    entries
}
