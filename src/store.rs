//! The sample collection as seen by the rest of the crate.
//!
//! [`SampleStore`] is the seam between the controller and the network:
//! production code goes through [`RemoteSampleStore`], tests substitute
//! an in-memory implementation.

use reqwest::Client;
use tracing::debug;

use crate::config::StoreConfig;
use crate::db::{SortOrder, TableClient};
use crate::error::Result;
use crate::record::{SampleDraft, SampleId, SampleRecord};

/// Name of the backing table
const SAMPLE_TABLE: &str = "sample";

/// Operations on the sample collection
#[async_trait::async_trait]
pub trait SampleStore {
    /// Fetch every record, newest first
    async fn list(&self) -> Result<Vec<SampleRecord>>;

    /// Create a record from the draft; the database assigns `id` and
    /// `created_at`
    async fn insert(&self, draft: &SampleDraft) -> Result<()>;

    /// Overwrite the editable fields of the record with the given id
    async fn update(&self, id: SampleId, draft: &SampleDraft) -> Result<()>;

    /// Remove the record with the given id
    async fn delete(&self, id: SampleId) -> Result<()>;
}

/// [`SampleStore`] backed by the Supabase REST API
pub struct RemoteSampleStore {
    table: TableClient,
}

impl RemoteSampleStore {
    /// Create a store from explicit configuration
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a store reusing an existing HTTP client
    pub fn with_client(config: &StoreConfig, client: Client) -> Self {
        let table = TableClient::new(
            config.url.as_str(),
            &config.api_key,
            SAMPLE_TABLE,
            client,
            config.request_timeout,
        );

        RemoteSampleStore { table }
    }
}

#[async_trait::async_trait]
impl SampleStore for RemoteSampleStore {
    async fn list(&self) -> Result<Vec<SampleRecord>> {
        debug!("Listing records from '{}'", SAMPLE_TABLE);

        self.table
            .select("*")
            .order("created_at", SortOrder::Descending)
            .execute::<SampleRecord>()
            .await
    }

    async fn insert(&self, draft: &SampleDraft) -> Result<()> {
        debug!("Inserting record into '{}'", SAMPLE_TABLE);

        self.table.insert(draft).execute_no_return().await
    }

    async fn update(&self, id: SampleId, draft: &SampleDraft) -> Result<()> {
        debug!("Updating record {} in '{}'", id, SAMPLE_TABLE);

        self.table
            .update(draft)
            .eq("id", id)
            .execute_no_return()
            .await
    }

    async fn delete(&self, id: SampleId) -> Result<()> {
        debug!("Deleting record {} from '{}'", id, SAMPLE_TABLE);

        self.table.delete().eq("id", id).execute_no_return().await
    }
}
