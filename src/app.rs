//! The search pipeline: resolve, query, map.

use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::{self, Config, OutputConfig};
use crate::errors::SearchError;
use crate::mapper::{self, DisplayEntry};
use crate::query;
use crate::transport::{HttpBackend, SearchBackend};
use crate::types::SearchRequest;

/// Run a search for `cli` using the process environment, the user config
/// file, and the HTTP backend.
pub fn run(cli: &Cli) -> Result<Vec<DisplayEntry>, SearchError> {
    let config = Config::load();
    let request = config::resolve_request(cli, &config, config::process_env)?;
    let icon_dir = match &config {
        Ok(c) => c.output.icon_dir.clone(),
        Err(e) => {
            warn!("ignoring config file: {e:#}");
            OutputConfig::default().icon_dir
        }
    };
    let backend = HttpBackend::new(&request.domain, &request.token);
    search(&request, &backend, &icon_dir)
}

/// Issue one query through `backend` and map the results.
pub fn search<B: SearchBackend>(
    request: &SearchRequest,
    backend: &B,
    icon_dir: &str,
) -> Result<Vec<DisplayEntry>, SearchError> {
    let payload = query::build_payload(request);
    let items = backend.search(&payload)?;
    info!("Results: {}", items.len());
    Ok(mapper::build_entries(&items, request, icon_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::query::SearchPayload;
    use crate::types::{ItemType, Kind, SearchResultItem};

    /// Records payloads and replays a canned response.
    struct FakeBackend {
        response: fn() -> Result<Vec<SearchResultItem>, SearchError>,
        seen: RefCell<Vec<SearchPayload>>,
    }

    impl FakeBackend {
        fn new(response: fn() -> Result<Vec<SearchResultItem>, SearchError>) -> Self {
            Self {
                response,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl SearchBackend for FakeBackend {
        fn search(&self, payload: &SearchPayload) -> Result<Vec<SearchResultItem>, SearchError> {
            self.seen.borrow_mut().push(payload.clone());
            (self.response)()
        }
    }

    fn request(text: &str, kinds: Vec<Kind>) -> SearchRequest {
        SearchRequest {
            text: text.into(),
            kinds,
            domain: "https://acme.chronosphere.io".into(),
            token: "t".into(),
        }
    }

    #[test]
    fn sends_one_query_with_request_filter() {
        let backend = FakeBackend::new(|| Ok(Vec::new()));
        search(&request("cpu", vec![Kind::Dashboards]), &backend, "./assets").unwrap();
        let seen = backend.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].variables.input.kind_filter, vec![Kind::Dashboards]);
        assert_eq!(seen[0].variables.input.query, "cpu");
    }

    #[test]
    fn maps_items_between_shortcuts() {
        let backend = FakeBackend::new(|| {
            Ok(vec![SearchResultItem {
                item_type: ItemType::Dashboards,
                name: "CPU".into(),
                slug: "cpu-1".into(),
                team: None,
                collection: None,
            }])
        });
        let entries = search(&request("cpu", vec![Kind::Dashboards]), &backend, "./assets").unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Dashboard: CPU", "Dashboards (d:)"]);
    }

    #[test]
    fn backend_failure_is_not_partial() {
        let backend = FakeBackend::new(|| Err(SearchError::Remote("boom".into())));
        let err = search(&request("", Kind::ALL.to_vec()), &backend, "./assets").unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
