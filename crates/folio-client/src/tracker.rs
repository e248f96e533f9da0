use std::cell::Cell;
use std::rc::Rc;

use tracing::{info, warn};

use folio_types::api::{NewProgressImage, NewProgressUpdate, ProgressImagePatch, ProgressUpdatePatch};
use folio_types::models::{ProgressImage, ProgressUpdate, RecordId};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::notice::{Notice, Notices};

/// Whether mutating controls are shown. Cosmetic only: the API itself
/// accepts writes from anyone.
#[derive(Clone, Default)]
pub struct EditMode(Rc<Cell<bool>>);

impl EditMode {
    pub fn unlock(&self) {
        self.0.set(true);
    }

    pub fn is_unlocked(&self) -> bool {
        self.0.get()
    }
}

/// The form currently open in the tracker, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    NewUpdate,
    EditUpdate(RecordId),
    NewImage,
    EditImage(RecordId),
}

/// Which edit affordances are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub add: bool,
    pub edit: bool,
    pub delete: bool,
}

/// View model behind the progress tracker section.
pub struct ProgressTracker {
    api: ApiClient,
    edit_mode: EditMode,
    notices: Notices,
    updates: Vec<ProgressUpdate>,
    images: Vec<ProgressImage>,
    form: Option<Form>,
}

impl ProgressTracker {
    pub fn new(api: ApiClient, edit_mode: EditMode, notices: Notices) -> Self {
        Self {
            api,
            edit_mode,
            notices,
            updates: Vec::new(),
            images: Vec::new(),
            form: None,
        }
    }

    /// Load both lists. Reads are available whether or not edit mode is on.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.updates = self.api.list_updates().await?;
        self.images = self.api.list_images().await?;
        Ok(())
    }

    pub fn updates(&self) -> &[ProgressUpdate] {
        &self.updates
    }

    pub fn images(&self) -> &[ProgressImage] {
        &self.images
    }

    pub fn subtitle(&self) -> &'static str {
        if self.edit_mode.is_unlocked() {
            "Behind-the-scenes development progress - You can now edit and manage content"
        } else {
            "Behind-the-scenes look at Broadcast Error's development"
        }
    }

    pub fn controls(&self) -> Controls {
        let unlocked = self.edit_mode.is_unlocked();
        Controls {
            add: unlocked,
            edit: unlocked,
            delete: unlocked,
        }
    }

    pub fn form(&self) -> Option<Form> {
        self.form
    }

    pub fn open_form(&mut self, form: Form) -> Result<(), ClientError> {
        self.ensure_unlocked()?;
        self.form = Some(form);
        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    // -- Progress updates --

    pub async fn add_update(&mut self, draft: &NewProgressUpdate) -> Result<ProgressUpdate, ClientError> {
        self.ensure_unlocked()?;
        let result = self.api.create_update(draft).await;
        let created = self.report(result, "Update added successfully", "Failed to add update")?;
        self.form = None;
        self.reload_updates().await;
        Ok(created)
    }

    pub async fn save_update(
        &mut self,
        id: RecordId,
        patch: &ProgressUpdatePatch,
    ) -> Result<ProgressUpdate, ClientError> {
        self.ensure_unlocked()?;
        let result = self.api.patch_update(id, patch).await;
        let saved = self.report(result, "Update saved successfully", "Failed to save update")?;
        self.form = None;
        self.reload_updates().await;
        Ok(saved)
    }

    pub async fn delete_update(&mut self, id: RecordId) -> Result<(), ClientError> {
        self.ensure_unlocked()?;
        let result = self.api.delete_update(id).await;
        self.report(result, "Update deleted successfully", "Failed to delete update")?;
        self.reload_updates().await;
        Ok(())
    }

    // -- Progress images --

    pub async fn add_image(&mut self, draft: &NewProgressImage) -> Result<ProgressImage, ClientError> {
        self.ensure_unlocked()?;
        let result = self.api.create_image(draft).await;
        let created = self.report(result, "Image added successfully", "Failed to add image")?;
        self.form = None;
        self.reload_images().await;
        Ok(created)
    }

    pub async fn save_image(&mut self, id: RecordId, patch: &ProgressImagePatch) -> Result<ProgressImage, ClientError> {
        self.ensure_unlocked()?;
        let result = self.api.patch_image(id, patch).await;
        let saved = self.report(result, "Image saved successfully", "Failed to save image")?;
        self.form = None;
        self.reload_images().await;
        Ok(saved)
    }

    pub async fn delete_image(&mut self, id: RecordId) -> Result<(), ClientError> {
        self.ensure_unlocked()?;
        let result = self.api.delete_image(id).await;
        self.report(result, "Image deleted successfully", "Failed to delete image")?;
        self.reload_images().await;
        Ok(())
    }

    /// Refetch after a mutation that already went through. A failure here
    /// keeps the stale list; the mutation itself still succeeded.
    async fn reload_updates(&mut self) {
        match self.api.list_updates().await {
            Ok(updates) => self.updates = updates,
            Err(e) => warn!("Failed to refresh progress updates: {}", e),
        }
    }

    async fn reload_images(&mut self) {
        match self.api.list_images().await {
            Ok(images) => self.images = images,
            Err(e) => warn!("Failed to refresh progress images: {}", e),
        }
    }

    fn ensure_unlocked(&self) -> Result<(), ClientError> {
        if self.edit_mode.is_unlocked() {
            Ok(())
        } else {
            Err(ClientError::Locked)
        }
    }

    /// Post the success or failure notice. Failures leave the form open and
    /// never say which kind of error it was.
    fn report<T>(&self, result: Result<T, ClientError>, success: &str, failure: &str) -> Result<T, ClientError> {
        match result {
            Ok(value) => {
                info!("{}", success);
                self.notices.push(Notice::info(success));
                Ok(value)
            }
            Err(e) => {
                warn!("{}: {}", failure, e);
                self.notices.push(Notice::destructive(failure));
                Err(e)
            }
        }
    }
}
