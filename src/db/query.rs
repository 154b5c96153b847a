//! Query builders for [`TableClient`](super::TableClient)

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::fetch::{Fetch, FetchBuilder};

/// Client identification header sent with every request
const CLIENT_INFO: &str = concat!("portfolio-sample/", env!("CARGO_PKG_VERSION"));

/// Sort direction for ordered reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Base query parameter holder
#[derive(Debug, Clone, Default)]
struct QueryBuilder {
    params: HashMap<String, String>,
}

impl QueryBuilder {
    fn new() -> Self {
        Self {
            params: HashMap::new(),
        }
    }

    fn add_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    fn into_params(self) -> HashMap<String, String> {
        self.params
    }
}

fn common_headers<'a>(fetch: FetchBuilder<'a>, key: &str) -> FetchBuilder<'a> {
    fetch
        .header("apikey", key)
        .bearer_auth(key)
        .header("X-Client-Info", CLIENT_INFO)
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    url: String,
    key: String,
    client: Client,
    query: QueryBuilder,
    timeout: Option<Duration>,
}

impl SelectBuilder {
    pub(super) fn new(
        url: String,
        key: String,
        columns: &str,
        client: Client,
        timeout: Option<Duration>,
    ) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);

        Self {
            url,
            key,
            client,
            query,
            timeout,
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(mut self, column: &str, value: T) -> Self {
        self.query
            .add_param(column, &format!("eq.{}", value.to_string()));
        self
    }

    /// Order the results by a column
    pub fn order(mut self, column: &str, order: SortOrder) -> Self {
        self.query
            .add_param("order", &format!("{}.{}", column, order.as_str()));
        self
    }

    /// Limit the number of rows returned
    pub fn limit(mut self, count: i32) -> Self {
        self.query.add_param("limit", &count.to_string());
        self
    }

    /// Execute the query and return the matching rows
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let fetch = common_headers(Fetch::get(&self.client, &self.url), &self.key)
            .query(self.query.into_params())
            .timeout(self.timeout);

        fetch.execute::<Vec<T>>().await
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    url: String,
    key: String,
    values: T,
    client: Client,
    query: QueryBuilder,
    timeout: Option<Duration>,
}

impl<T: Serialize> InsertBuilder<T> {
    pub(super) fn new(
        url: String,
        key: String,
        values: T,
        client: Client,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            url,
            key,
            values,
            client,
            query: QueryBuilder::new(),
            timeout,
        }
    }

    /// Execute the query and return the inserted rows
    pub async fn execute<R: DeserializeOwned>(self) -> Result<Vec<R>> {
        let fetch = common_headers(Fetch::post(&self.client, &self.url), &self.key)
            .header("Prefer", "return=representation")
            .query(self.query.into_params())
            .timeout(self.timeout)
            .json(&self.values)?;

        fetch.execute::<Vec<R>>().await
    }

    /// Execute the query without returning the inserted data
    pub async fn execute_no_return(self) -> Result<()> {
        let fetch = common_headers(Fetch::post(&self.client, &self.url), &self.key)
            .header("Prefer", "return=minimal")
            .query(self.query.into_params())
            .timeout(self.timeout)
            .json(&self.values)?;

        fetch.execute_empty().await
    }
}

/// Builder for UPDATE queries
pub struct UpdateBuilder<T: Serialize> {
    url: String,
    key: String,
    values: T,
    client: Client,
    query: QueryBuilder,
    timeout: Option<Duration>,
}

impl<T: Serialize> UpdateBuilder<T> {
    pub(super) fn new(
        url: String,
        key: String,
        values: T,
        client: Client,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            url,
            key,
            values,
            client,
            query: QueryBuilder::new(),
            timeout,
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        self.query
            .add_param(column, &format!("eq.{}", value.to_string()));
        self
    }

    /// Execute the query and return the updated rows
    pub async fn execute<R: DeserializeOwned>(self) -> Result<Vec<R>> {
        let fetch = common_headers(Fetch::patch(&self.client, &self.url), &self.key)
            .header("Prefer", "return=representation")
            .query(self.query.into_params())
            .timeout(self.timeout)
            .json(&self.values)?;

        fetch.execute::<Vec<R>>().await
    }

    /// Execute the query without returning the updated data
    pub async fn execute_no_return(self) -> Result<()> {
        let fetch = common_headers(Fetch::patch(&self.client, &self.url), &self.key)
            .header("Prefer", "return=minimal")
            .query(self.query.into_params())
            .timeout(self.timeout)
            .json(&self.values)?;

        fetch.execute_empty().await
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    url: String,
    key: String,
    client: Client,
    query: QueryBuilder,
    timeout: Option<Duration>,
}

impl DeleteBuilder {
    pub(super) fn new(
        url: String,
        key: String,
        client: Client,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            url,
            key,
            client,
            query: QueryBuilder::new(),
            timeout,
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        self.query
            .add_param(column, &format!("eq.{}", value.to_string()));
        self
    }

    /// Execute the query without returning the deleted data
    pub async fn execute_no_return(self) -> Result<()> {
        let fetch = common_headers(Fetch::delete(&self.client, &self.url), &self.key)
            .header("Prefer", "return=minimal")
            .query(self.query.into_params())
            .timeout(self.timeout);

        fetch.execute_empty().await
    }
}
