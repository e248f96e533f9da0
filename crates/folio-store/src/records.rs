//! Mapping between the API payload types in folio-types and stored records.
//! Each kind names its own table so generic store code can reach it.

use chrono::{DateTime, Utc};

use folio_types::api::{NewProgressImage, NewProgressUpdate, ProgressImagePatch, ProgressUpdatePatch};
use folio_types::models::{ProgressImage, ProgressUpdate, RecordId};

use crate::Tables;
use crate::collection::Collection;

/// An identified, timestamped, partially updatable record.
pub trait Record: Clone + Sized {
    /// Everything a caller supplies on create.
    type Draft;
    /// A subset of mutable fields; absent fields are left alone.
    type Patch;

    /// Human-readable kind name used in logs and errors.
    const KIND: &'static str;

    fn build(id: RecordId, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;
    fn apply(&mut self, patch: Self::Patch);

    fn id(&self) -> RecordId;
    fn created_at(&self) -> DateTime<Utc>;

    fn table(tables: &Tables) -> &Collection<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Collection<Self>;
}

impl Record for ProgressUpdate {
    type Draft = NewProgressUpdate;
    type Patch = ProgressUpdatePatch;

    const KIND: &'static str = "progress update";

    fn build(id: RecordId, created_at: DateTime<Utc>, draft: NewProgressUpdate) -> Self {
        Self {
            id,
            week: draft.week,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            created_at,
        }
    }

    fn apply(&mut self, patch: ProgressUpdatePatch) {
        if let Some(week) = patch.week {
            self.week = week;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn table(tables: &Tables) -> &Collection<Self> {
        &tables.updates
    }

    fn table_mut(tables: &mut Tables) -> &mut Collection<Self> {
        &mut tables.updates
    }
}

impl Record for ProgressImage {
    type Draft = NewProgressImage;
    type Patch = ProgressImagePatch;

    const KIND: &'static str = "progress image";

    fn build(id: RecordId, created_at: DateTime<Utc>, draft: NewProgressImage) -> Self {
        Self {
            id,
            title: draft.title,
            url: draft.url,
            description: draft.description,
            created_at,
        }
    }

    fn apply(&mut self, patch: ProgressImagePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        // Outer `Some` means the field was sent, including an explicit null.
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn table(tables: &Tables) -> &Collection<Self> {
        &tables.images
    }

    fn table_mut(tables: &mut Tables) -> &mut Collection<Self> {
        &mut tables.images
    }
}
