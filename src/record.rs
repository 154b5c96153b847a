//! Row and form types for the `sample` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a row in the `sample` table.
///
/// The database assigns this on insert; client code never invents one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(pub i64);

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for SampleId {
    fn from(id: i64) -> Self {
        SampleId(id)
    }
}

/// A persisted row of the `sample` table as returned by the REST API.
///
/// `phoneNumber` is the one column that is camelCase in the database;
/// the rename keeps the Rust field idiomatic without changing the wire
/// format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleRecord {
    pub id: SampleId,
    pub title: String,
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub is_auth: bool,
    pub created_at: DateTime<Utc>,
}

/// The editable fields of a sample record.
///
/// This is both the payload for inserts and updates and the state of
/// the entry form. `id` and `created_at` are absent on purpose: the
/// database owns them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SampleDraft {
    pub title: String,
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub is_auth: bool,
}

impl From<&SampleRecord> for SampleDraft {
    fn from(record: &SampleRecord) -> Self {
        SampleDraft {
            title: record.title.clone(),
            name: record.name.clone(),
            phone_number: record.phone_number.clone(),
            is_auth: record.is_auth,
        }
    }
}
