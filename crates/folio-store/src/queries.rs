use chrono::Utc;
use tracing::debug;

use folio_types::models::{RecordId, User};

use crate::records::Record;
use crate::{Result, Store, StoreError};

impl Store {
    // -- Progress records --

    /// Allocate the next id for `R`, stamp the creation time and store it.
    /// Stamps never go backwards within a kind, even if the clock does.
    pub fn create<R: Record>(&self, draft: R::Draft) -> Result<R> {
        let record = self.with_tables(|tables| {
            let table = R::table_mut(tables);
            let created_at = table.stamp(Utc::now());
            Ok(table.insert(draft, created_at))
        })?;
        debug!(kind = R::KIND, id = record.id(), "Record created");
        Ok(record)
    }

    pub fn get<R: Record>(&self, id: RecordId) -> Result<Option<R>> {
        self.with_tables(|tables| Ok(R::table(tables).get(id).cloned()))
    }

    /// Shallow merge of `patch` over the stored record.
    pub fn update<R: Record>(&self, id: RecordId, patch: R::Patch) -> Result<R> {
        let record = self.with_tables(|tables| {
            R::table_mut(tables)
                .update(id, patch)
                .ok_or(StoreError::NotFound { kind: R::KIND, id })
        })?;
        debug!(kind = R::KIND, id, "Record updated");
        Ok(record)
    }

    /// Returns `false` when there was nothing to delete.
    pub fn delete<R: Record>(&self, id: RecordId) -> Result<bool> {
        let removed = self.with_tables(|tables| Ok(R::table_mut(tables).remove(id)))?;
        debug!(kind = R::KIND, id, removed, "Record delete");
        Ok(removed)
    }

    /// All records of kind `R`, newest first.
    pub fn list<R: Record>(&self) -> Result<Vec<R>> {
        self.with_tables(|tables| Ok(R::table(tables).sorted()))
    }

    // -- Users --

    /// Register a user. Usernames are unique; the password is stored as given.
    pub fn create_user(&self, username: &str, password: &str) -> Result<User> {
        self.with_tables(|tables| {
            if tables.users.find_by_username(username).is_some() {
                return Err(StoreError::UsernameTaken(username.to_string()));
            }
            Ok(tables.users.insert(username, password))
        })
    }

    pub fn get_user(&self, id: RecordId) -> Result<Option<User>> {
        self.with_tables(|tables| Ok(tables.users.get(id).cloned()))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_tables(|tables| Ok(tables.users.find_by_username(username).cloned()))
    }
}
