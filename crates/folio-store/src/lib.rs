pub mod collection;
pub mod queries;
pub mod records;
pub mod seed;

use std::sync::Mutex;

use thiserror::Error;
use tracing::info;

use folio_types::models::{ProgressImage, ProgressUpdate, RecordId};

use crate::collection::{Collection, UserTable};

pub use crate::records::Record;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: RecordId },

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Every collection the store holds. Kinds never touch each other's table.
#[derive(Default)]
pub struct Tables {
    pub(crate) users: UserTable,
    pub(crate) updates: Collection<ProgressUpdate>,
    pub(crate) images: Collection<ProgressImage>,
}

/// Volatile in-process content store. Contents are lost on restart.
///
/// All access goes through one lock, so id allocation and insertion are a
/// single step as far as concurrent requests are concerned.
#[derive(Default)]
pub struct Store {
    tables: Mutex<Tables>,
}

impl Store {
    /// An empty store; every id sequence starts at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the sample progress updates.
    pub fn with_sample_data() -> Self {
        let mut tables = Tables::default();
        seed::run(&mut tables);

        info!(updates = tables.updates.len(), "Store seeded with sample data");
        Self {
            tables: Mutex::new(tables),
        }
    }

    pub fn with_tables<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Tables) -> Result<T>,
    {
        let mut tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut tables)
    }
}
