//! GraphQL request payload for the `searchV2` query.

use serde::Serialize;

use crate::types::{Kind, SearchRequest};

/// The search document. Field selection is part of the API contract.
pub const SEARCH_QUERY: &str = "query Search($input: SearchQuery!) { searchV2(input: $input) { items { type name slug isFavorite isMigratedDashboard team{name slug} collection{name type slug} } totalCount } }";

/// JSON body posted to `/api/v1/gql/query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPayload {
    pub query: &'static str,
    pub variables: Variables,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variables {
    pub input: SearchInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    pub kind_filter: Vec<Kind>,
    pub query: String,
}

/// Build the payload for `request`.
pub fn build_payload(request: &SearchRequest) -> SearchPayload {
    SearchPayload {
        query: SEARCH_QUERY,
        variables: Variables {
            input: SearchInput {
                kind_filter: request.kinds.clone(),
                query: request.text.clone(),
            },
        },
    }
}
