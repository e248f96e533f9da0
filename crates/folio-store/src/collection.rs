use std::collections::HashMap;

use chrono::{DateTime, Utc};

use folio_types::models::{RecordId, User};

use crate::records::Record;

/// Monotonic id allocator. Ids start at 1 and are never handed out twice,
/// even after the record that held one is deleted.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: RecordId,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `allocate` will return.
    #[cfg(test)]
    fn peek(&self) -> RecordId {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyed records of one kind plus that kind's id sequence.
pub struct Collection<R> {
    rows: HashMap<RecordId, R>,
    ids: IdSequence,
    newest: Option<DateTime<Utc>>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            ids: IdSequence::new(),
            newest: None,
        }
    }
}

impl<R: Record> Collection<R> {
    pub fn insert(&mut self, draft: R::Draft, created_at: DateTime<Utc>) -> R {
        let id = self.ids.allocate();
        let record = R::build(id, created_at, draft);
        self.rows.insert(id, record.clone());
        self.newest = self.newest.max(Some(created_at));
        record
    }

    /// `now`, or the newest stamp ever inserted if the clock is behind it.
    pub fn stamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.newest.map_or(now, |newest| newest.max(now))
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.rows.get(&id)
    }

    /// Merge `patch` over the stored record. `None` when `id` is unknown.
    pub fn update(&mut self, id: RecordId, patch: R::Patch) -> Option<R> {
        let record = self.rows.get_mut(&id)?;
        record.apply(patch);
        Some(record.clone())
    }

    /// Returns whether a record was actually removed.
    pub fn remove(&mut self, id: RecordId) -> bool {
        self.rows.remove(&id).is_some()
    }

    /// Newest first. Records created in the same instant fall back to the
    /// later id first.
    pub fn sorted(&self) -> Vec<R> {
        let mut records: Vec<R> = self.rows.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        records
    }

    #[cfg(test)]
    fn next_id(&self) -> RecordId {
        self.ids.peek()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Default)]
pub struct UserTable {
    rows: HashMap<RecordId, User>,
    ids: IdSequence,
}

impl UserTable {
    pub fn insert(&mut self, username: &str, password: &str) -> User {
        let id = self.ids.allocate();
        let user = User {
            id,
            username: username.to_string(),
            password: password.to_string(),
        };
        self.rows.insert(id, user.clone());
        user
    }

    pub fn get(&self, id: RecordId) -> Option<&User> {
        self.rows.get(&id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.rows.values().find(|user| user.username == username)
    }
}
