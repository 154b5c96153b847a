//! Sample record administration for the portfolio site
//!
//! Client for the site's Supabase-hosted `sample` table and the
//! list-edit-submit flow of the admin page built on top of it: fetch the
//! records newest first, edit one of them or draft a new one in a single
//! form, submit, delete.
//!
//! # Example
//!
//! ```
//! use portfolio_sample::config::StoreConfig;
//! use portfolio_sample::controller::SampleController;
//! use portfolio_sample::store::RemoteSampleStore;
//!
//! let config = StoreConfig::new("https://your-project.supabase.co", "your-anon-key").unwrap();
//! let store = RemoteSampleStore::new(&config);
//! let controller = SampleController::new(store);
//! ```

pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod fetch;
pub mod record;
pub mod store;

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::controller::{FieldChange, SampleController};
    pub use crate::error::Error;
    pub use crate::record::{SampleDraft, SampleId, SampleRecord};
    pub use crate::store::{RemoteSampleStore, SampleStore};
}
