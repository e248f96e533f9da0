use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler = Box<dyn FnMut(&str)>;

/// Single-threaded key-event dispatcher standing in for the document's
/// `keydown` listeners.
///
/// Handlers run in registration order. A handler may attach or detach
/// listeners: a detached handler is skipped for the rest of the press, an
/// attached one first hears the next press.
#[derive(Clone, Default)]
pub struct Keyboard {
    inner: Rc<RefCell<KeyboardInner>>,
}

#[derive(Default)]
struct KeyboardInner {
    next_id: u64,
    listeners: Vec<(u64, Handler)>,
    // Nonzero while handlers run outside the borrow.
    dispatching: u32,
    detached: Vec<u64>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a handler. It stays attached until the returned guard drops.
    pub fn listen(&self, handler: impl FnMut(&str) + 'static) -> KeyListener {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(handler)));

        KeyListener {
            id,
            keyboard: Rc::downgrade(&self.inner),
        }
    }

    /// Dispatch one key press to every attached handler.
    pub fn press(&self, key: &str) {
        let mut running = {
            let mut inner = self.inner.borrow_mut();
            inner.dispatching += 1;
            std::mem::take(&mut inner.listeners)
        };

        for (id, handler) in running.iter_mut() {
            if self.inner.borrow().detached.contains(id) {
                continue;
            }
            handler(key);
        }

        let mut inner = self.inner.borrow_mut();
        inner.dispatching -= 1;
        running.retain(|(id, _)| !inner.detached.contains(id));
        running.append(&mut inner.listeners);
        inner.listeners = running;
        if inner.dispatching == 0 {
            inner.detached.clear();
        }
    }

    /// Dispatch each character of `keys` as its own key press.
    pub fn type_str(&self, keys: &str) {
        let mut buf = [0u8; 4];
        for c in keys.chars() {
            self.press(c.encode_utf8(&mut buf));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Detaches its handler from the keyboard on drop.
pub struct KeyListener {
    id: u64,
    keyboard: Weak<RefCell<KeyboardInner>>,
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(inner) = self.keyboard.upgrade() {
            let mut inner = inner.borrow_mut();
            inner.listeners.retain(|(id, _)| *id != self.id);
            if inner.dispatching > 0 {
                inner.detached.push(self.id);
            }
        }
    }
}
