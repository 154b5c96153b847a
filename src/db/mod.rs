//! Row operations over the PostgREST REST dialect
//!
//! [`TableClient`] binds the service URL, API key, and one table name, and
//! hands out one builder per verb. Only the query features the admin page
//! needs are covered: `eq` filtering, ordering, and a row limit.

mod query;

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

pub use query::{DeleteBuilder, InsertBuilder, SelectBuilder, SortOrder, UpdateBuilder};

/// Client for row operations on a single table or view
pub struct TableClient {
    /// The base URL for the project
    url: String,

    /// API key sent with every request
    key: String,

    /// The table or view name
    table: String,

    /// HTTP client
    client: Client,

    /// Optional per-request timeout
    timeout: Option<Duration>,
}

impl TableClient {
    /// Create a new TableClient
    pub fn new(
        url: &str,
        key: &str,
        table: &str,
        client: Client,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            table: table.to_string(),
            client,
            timeout,
        }
    }

    /// Get the base URL for REST API requests
    fn get_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(
            self.get_url(),
            self.key.clone(),
            columns,
            self.client.clone(),
            self.timeout,
        )
    }

    /// Insert a row into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(
            self.get_url(),
            self.key.clone(),
            values,
            self.client.clone(),
            self.timeout,
        )
    }

    /// Update rows in the table
    pub fn update<T: Serialize>(&self, values: T) -> UpdateBuilder<T> {
        UpdateBuilder::new(
            self.get_url(),
            self.key.clone(),
            values,
            self.client.clone(),
            self.timeout,
        )
    }

    /// Delete rows from the table
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(
            self.get_url(),
            self.key.clone(),
            self.client.clone(),
            self.timeout,
        )
    }
}
