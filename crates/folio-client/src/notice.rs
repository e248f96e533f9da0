use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Destructive,
}

/// A toast-style message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub tone: Tone,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tone: Tone::Info,
        }
    }

    pub fn destructive(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tone: Tone::Destructive,
        }
    }
}

/// Shared notice queue; clones push into the same queue.
#[derive(Clone, Default)]
pub struct Notices {
    queue: Rc<RefCell<Vec<Notice>>>,
}

impl Notices {
    pub fn push(&self, notice: Notice) {
        self.queue.borrow_mut().push(notice);
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    #[cfg(test)]
    pub(crate) fn latest(&self) -> Option<Notice> {
        self.queue.borrow().last().cloned()
    }
}
