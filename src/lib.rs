//! Launcher script filter for Chronosphere search.
//!
//! One invocation resolves a [`types::SearchRequest`] from arguments and
//! environment, posts a single GraphQL `searchV2` query, and prints the
//! results as script-filter JSON.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod mapper;
pub mod output;
pub mod query;
pub mod transport;
pub mod types;
