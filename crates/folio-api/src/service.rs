use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, warn};

use folio_store::{Record, Store, StoreError};
use folio_types::models::{ProgressImage, ProgressUpdate, RecordId};

use crate::error::ApiError;

/// A record kind exposed over the API: its input schema comes from the
/// `Draft`/`Patch` deserializers, plus the messages clients see.
pub trait Resource:
    Record<Draft: DeserializeOwned, Patch: DeserializeOwned> + Serialize + Send + Sync + 'static
{
    const INVALID: &'static str;
    const NOT_FOUND: &'static str;
    const FETCH_FAILED: &'static str;
}

impl Resource for ProgressUpdate {
    const INVALID: &'static str = "Invalid progress update data";
    const NOT_FOUND: &'static str = "Progress update not found";
    const FETCH_FAILED: &'static str = "Failed to fetch progress updates";
}

impl Resource for ProgressImage {
    const INVALID: &'static str = "Invalid progress image data";
    const NOT_FOUND: &'static str = "Progress image not found";
    const FETCH_FAILED: &'static str = "Failed to fetch progress images";
}

const INTERNAL: &str = "Internal server error";

/// Validates untrusted JSON for one resource kind and runs it against the
/// store. Nothing is written unless the input parsed.
pub struct CrudService<'a, R> {
    store: &'a Store,
    kind: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> CrudService<'a, R> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            kind: PhantomData,
        }
    }

    pub fn list(&self) -> Result<Vec<R>, ApiError> {
        self.store.list::<R>().map_err(|e| fault::<R>(e, R::FETCH_FAILED))
    }

    pub fn create(&self, body: Value) -> Result<R, ApiError> {
        let draft = parse::<R, R::Draft>(body)?;
        let record = self.store.create::<R>(draft).map_err(|e| fault::<R>(e, INTERNAL))?;
        info!(kind = R::KIND, id = record.id(), "Created");
        Ok(record)
    }

    pub fn update(&self, id: RecordId, body: Value) -> Result<R, ApiError> {
        let patch = parse::<R, R::Patch>(body)?;
        self.store.update::<R>(id, patch).map_err(|e| match e {
            StoreError::NotFound { .. } => ApiError::NotFound(R::NOT_FOUND.into()),
            other => fault::<R>(other, INTERNAL),
        })
    }

    /// Validates a patch body without touching the store.
    pub fn check_patch(&self, body: Value) -> Result<(), ApiError> {
        parse::<R, R::Patch>(body).map(drop)
    }

    pub fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        let removed = self.store.delete::<R>(id).map_err(|e| fault::<R>(e, INTERNAL))?;
        if !removed {
            return Err(ApiError::NotFound(R::NOT_FOUND.into()));
        }
        info!(kind = R::KIND, id, "Deleted");
        Ok(())
    }
}

fn parse<R: Resource, T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| {
        warn!(kind = R::KIND, "Rejected payload: {}", e);
        ApiError::InvalidInput(R::INVALID.into())
    })
}

fn fault<R: Resource>(err: StoreError, message: &str) -> ApiError {
    error!(kind = R::KIND, "Store fault: {}", err);
    ApiError::Fault(message.into())
}
