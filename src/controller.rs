//! List-edit-submit flow of the sample admin page.
//!
//! [`SampleController`] owns the page state: the record list, the entry
//! form draft, and which record (if any) is being edited. One submit
//! button serves both creation and update; which one it means depends on
//! whether an edit is in progress.

use crate::error::Result;
use crate::record::{SampleDraft, SampleId, SampleRecord};
use crate::store::SampleStore;

/// A single form field edit
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Title(String),
    Name(String),
    PhoneNumber(String),
    IsAuth(bool),
}

/// Page state and transitions for the sample collection
pub struct SampleController<S> {
    store: S,
    draft: SampleDraft,
    editing: Option<SampleId>,
    records: Vec<SampleRecord>,
}

impl<S: SampleStore> SampleController<S> {
    /// Create a controller with an empty form and an empty list
    pub fn new(store: S) -> Self {
        SampleController {
            store,
            draft: SampleDraft::default(),
            editing: None,
            records: Vec::new(),
        }
    }

    /// The records as of the last successful refresh, newest first
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Current state of the entry form
    pub fn draft(&self) -> &SampleDraft {
        &self.draft
    }

    /// Id of the record being edited, if the form is in update mode
    pub fn editing(&self) -> Option<SampleId> {
        self.editing
    }

    /// Re-fetch the record list.
    ///
    /// On failure the previous list is kept as-is and the error is
    /// returned to the caller.
    pub async fn refresh(&mut self) -> Result<()> {
        self.records = self.store.list().await?;
        Ok(())
    }

    /// Apply a single field edit to the draft
    pub fn set_field(&mut self, change: FieldChange) {
        match change {
            FieldChange::Title(value) => self.draft.title = value,
            FieldChange::Name(value) => self.draft.name = value,
            FieldChange::PhoneNumber(value) => self.draft.phone_number = value,
            FieldChange::IsAuth(value) => self.draft.is_auth = value,
        }
    }

    /// Load a listed record into the form and switch to update mode.
    ///
    /// Whatever was in the draft is overwritten. Returns `false` (and
    /// changes nothing) when no listed record has that id.
    pub fn begin_edit(&mut self, id: SampleId) -> bool {
        match self.records.iter().find(|record| record.id == id) {
            Some(record) => {
                self.draft = SampleDraft::from(record);
                self.editing = Some(id);
                true
            }
            None => false,
        }
    }

    /// Send the draft to the store: an update when a record is being
    /// edited, an insert otherwise.
    ///
    /// A successful write resets the form and re-fetches the list. A
    /// failed write leaves the draft and the edit mode untouched so the
    /// submission can be retried as-is.
    pub async fn submit(&mut self) -> Result<()> {
        match self.editing {
            Some(id) => self.store.update(id, &self.draft).await?,
            None => self.store.insert(&self.draft).await?,
        }

        self.editing = None;
        self.draft = SampleDraft::default();
        self.refresh().await
    }

    /// Delete a record by id and re-fetch the list.
    ///
    /// Deleting the record currently being edited also resets the form,
    /// since there is nothing left to update. A failed delete leaves all
    /// state untouched.
    pub async fn delete(&mut self, id: SampleId) -> Result<()> {
        self.store.delete(id).await?;

        if self.editing == Some(id) {
            self.editing = None;
            self.draft = SampleDraft::default();
        }

        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use reqwest::StatusCode;
    use std::sync::{Arc, Mutex, MutexGuard};

    #[derive(Default)]
    struct Inner {
        rows: Vec<SampleRecord>,
        next_id: i64,
        fail_list: bool,
        fail_insert: bool,
        fail_update: bool,
        fail_delete: bool,
    }

    /// In-memory stand-in for the remote table, with per-operation
    /// failure switches
    #[derive(Clone, Default)]
    struct FakeStore {
        inner: Arc<Mutex<Inner>>,
    }

    impl FakeStore {
        fn lock(&self) -> MutexGuard<'_, Inner> {
            self.inner.lock().unwrap()
        }

        fn seed(&self, title: &str, name: &str, phone: &str, is_auth: bool) -> SampleId {
            let mut inner = self.lock();
            inner.next_id += 1;
            let id = SampleId(inner.next_id);
            let created_at = timestamp(inner.next_id);
            inner.rows.push(SampleRecord {
                id,
                title: title.into(),
                name: name.into(),
                phone_number: phone.into(),
                is_auth,
                created_at,
            });
            id
        }

        fn rows(&self) -> Vec<SampleRecord> {
            self.lock().rows.clone()
        }
    }

    fn timestamp(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(n)
    }

    fn injected_failure() -> Error {
        Error::UnparsedApi {
            message: "injected failure".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[async_trait::async_trait]
    impl SampleStore for FakeStore {
        async fn list(&self) -> Result<Vec<SampleRecord>> {
            let inner = self.lock();
            if inner.fail_list {
                return Err(injected_failure());
            }
            let mut rows = inner.rows.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn insert(&self, draft: &SampleDraft) -> Result<()> {
            let mut inner = self.lock();
            if inner.fail_insert {
                return Err(injected_failure());
            }
            inner.next_id += 1;
            let id = SampleId(inner.next_id);
            let created_at = timestamp(inner.next_id);
            inner.rows.push(SampleRecord {
                id,
                title: draft.title.clone(),
                name: draft.name.clone(),
                phone_number: draft.phone_number.clone(),
                is_auth: draft.is_auth,
                created_at,
            });
            Ok(())
        }

        async fn update(&self, id: SampleId, draft: &SampleDraft) -> Result<()> {
            let mut inner = self.lock();
            if inner.fail_update {
                return Err(injected_failure());
            }
            let row = inner
                .rows
                .iter_mut()
                .find(|row| row.id == id)
                .expect("update targets an existing row");
            row.title = draft.title.clone();
            row.name = draft.name.clone();
            row.phone_number = draft.phone_number.clone();
            row.is_auth = draft.is_auth;
            Ok(())
        }

        async fn delete(&self, id: SampleId) -> Result<()> {
            let mut inner = self.lock();
            if inner.fail_delete {
                return Err(injected_failure());
            }
            inner.rows.retain(|row| row.id != id);
            Ok(())
        }
    }

    fn controller(store: &FakeStore) -> SampleController<FakeStore> {
        SampleController::new(store.clone())
    }

    #[tokio::test]
    async fn refresh_lists_newest_first() {
        let store = FakeStore::default();
        store.seed("first", "A", "1", false);
        store.seed("second", "B", "2", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();

        let titles: Vec<&str> = controller
            .records()
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["second", "first"]);
    }

    #[tokio::test]
    async fn submit_without_edit_inserts_and_resets_form() {
        let store = FakeStore::default();
        let mut controller = controller(&store);

        controller.set_field(FieldChange::Title("Greeting".into()));
        controller.set_field(FieldChange::Name("Alice".into()));
        controller.set_field(FieldChange::PhoneNumber("010-1234".into()));
        controller.set_field(FieldChange::IsAuth(true));
        controller.submit().await.unwrap();

        let rows = store.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Greeting");
        assert!(rows[0].is_auth);

        assert_eq!(*controller.draft(), SampleDraft::default());
        assert_eq!(controller.editing(), None);
        assert_eq!(controller.records().len(), 1);
    }

    #[tokio::test]
    async fn submit_while_editing_updates_in_place() {
        let store = FakeStore::default();
        let id = store.seed("Greeting", "Alice", "010-1234", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();

        assert!(controller.begin_edit(id));
        controller.set_field(FieldChange::Name("Carol".into()));
        controller.submit().await.unwrap();

        let rows = store.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].name, "Carol");
        assert_eq!(rows[0].title, "Greeting");

        assert_eq!(controller.editing(), None);
        assert_eq!(*controller.draft(), SampleDraft::default());
    }

    #[tokio::test]
    async fn begin_edit_overwrites_any_prior_draft() {
        let store = FakeStore::default();
        let id = store.seed("Greeting", "Alice", "010-1234", true);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();

        controller.set_field(FieldChange::Title("half-typed".into()));
        assert!(controller.begin_edit(id));

        assert_eq!(controller.draft().title, "Greeting");
        assert_eq!(controller.draft().name, "Alice");
        assert_eq!(controller.draft().phone_number, "010-1234");
        assert!(controller.draft().is_auth);
        assert_eq!(controller.editing(), Some(id));
    }

    #[tokio::test]
    async fn begin_edit_refuses_unknown_id() {
        let store = FakeStore::default();
        store.seed("Greeting", "Alice", "010-1234", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();
        controller.set_field(FieldChange::Title("typed".into()));

        assert!(!controller.begin_edit(SampleId(999)));
        assert_eq!(controller.editing(), None);
        assert_eq!(controller.draft().title, "typed");
    }

    #[tokio::test]
    async fn delete_removes_only_the_given_record() {
        let store = FakeStore::default();
        let first = store.seed("first", "A", "1", false);
        let second = store.seed("second", "B", "2", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();
        controller.delete(first).await.unwrap();

        let ids: Vec<SampleId> = controller.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, [second]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_records() {
        let store = FakeStore::default();
        store.seed("kept", "A", "1", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();
        assert_eq!(controller.records().len(), 1);

        store.lock().fail_list = true;
        assert!(controller.refresh().await.is_err());

        assert_eq!(controller.records().len(), 1);
        assert_eq!(controller.records()[0].title, "kept");
    }

    #[tokio::test]
    async fn failed_insert_keeps_draft_for_retry() {
        let store = FakeStore::default();
        let mut controller = controller(&store);

        controller.set_field(FieldChange::Title("Greeting".into()));
        store.lock().fail_insert = true;

        assert!(controller.submit().await.is_err());

        assert_eq!(controller.draft().title, "Greeting");
        assert_eq!(controller.editing(), None);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn failed_update_stays_in_edit_mode() {
        let store = FakeStore::default();
        let id = store.seed("Greeting", "Alice", "010-1234", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();
        controller.begin_edit(id);
        controller.set_field(FieldChange::Name("Carol".into()));

        store.lock().fail_update = true;
        assert!(controller.submit().await.is_err());

        assert_eq!(controller.editing(), Some(id));
        assert_eq!(controller.draft().name, "Carol");
        assert_eq!(store.rows()[0].name, "Alice");
    }

    #[tokio::test]
    async fn successful_write_with_failed_refresh_still_resets_form() {
        let store = FakeStore::default();
        let mut controller = controller(&store);

        controller.set_field(FieldChange::Title("Greeting".into()));
        store.lock().fail_list = true;

        assert!(controller.submit().await.is_err());

        // The insert landed; only the re-list failed.
        assert_eq!(store.rows().len(), 1);
        assert_eq!(*controller.draft(), SampleDraft::default());
        assert_eq!(controller.editing(), None);
        assert!(controller.records().is_empty());
    }

    #[tokio::test]
    async fn deleting_the_edited_record_resets_the_form() {
        let store = FakeStore::default();
        let id = store.seed("Greeting", "Alice", "010-1234", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();
        controller.begin_edit(id);

        controller.delete(id).await.unwrap();

        assert_eq!(controller.editing(), None);
        assert_eq!(*controller.draft(), SampleDraft::default());
        assert!(controller.records().is_empty());
    }

    #[tokio::test]
    async fn deleting_another_record_keeps_the_edit_in_progress() {
        let store = FakeStore::default();
        let edited = store.seed("edited", "A", "1", false);
        let other = store.seed("other", "B", "2", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();
        controller.begin_edit(edited);

        controller.delete(other).await.unwrap();

        assert_eq!(controller.editing(), Some(edited));
        assert_eq!(controller.draft().title, "edited");
        assert_eq!(controller.records().len(), 1);
    }

    #[tokio::test]
    async fn failed_delete_changes_nothing() {
        let store = FakeStore::default();
        let id = store.seed("Greeting", "Alice", "010-1234", false);

        let mut controller = controller(&store);
        controller.refresh().await.unwrap();
        controller.begin_edit(id);

        store.lock().fail_delete = true;
        assert!(controller.delete(id).await.is_err());

        assert_eq!(controller.editing(), Some(id));
        assert_eq!(controller.draft().title, "Greeting");
        assert_eq!(controller.records().len(), 1);
    }
}
