use tracing::info;

use crate::api::ApiClient;
use crate::keyboard::{KeyListener, Keyboard};
use crate::notice::{Notice, Notices};
use crate::secret_code::{EDIT_MODE_CODE, SecretCode, SecretCodeError};
use crate::tracker::{EditMode, ProgressTracker};

/// The home page: static sections plus the progress tracker, with one
/// secret-code listener attached for as long as the page is mounted.
pub struct HomePage {
    pub tracker: ProgressTracker,
    edit_mode: EditMode,
    notices: Notices,
    _listener: KeyListener,
}

impl HomePage {
    pub fn mount(keyboard: &Keyboard, api: ApiClient) -> Result<Self, SecretCodeError> {
        Self::mount_with_code(keyboard, api, EDIT_MODE_CODE)
    }

    pub fn mount_with_code(keyboard: &Keyboard, api: ApiClient, code: &str) -> Result<Self, SecretCodeError> {
        let edit_mode = EditMode::default();
        let notices = Notices::default();

        let unlock = edit_mode.clone();
        let announce = notices.clone();
        let mut detector = SecretCode::new(code, move || {
            unlock.unlock();
            announce.push(Notice::info("Edit Mode Activated!"));
            info!("Edit mode unlocked");
        })?;
        let listener = keyboard.listen(move |key| {
            detector.feed_key(key);
        });

        Ok(Self {
            tracker: ProgressTracker::new(api, edit_mode.clone(), notices.clone()),
            edit_mode,
            notices,
            _listener: listener,
        })
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode.is_unlocked()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }
}
