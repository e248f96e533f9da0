//! Rolling-window detector for a hidden digit sequence.
//!
//! Keeps the most recent digit presses, at most `code.len()` of them, and
//! fires the callback the first time the window equals the code. Non-digit
//! keys are dropped without touching the window.

use std::collections::VecDeque;

use thiserror::Error;

/// Sequence that unlocks edit mode on the home page.
pub const EDIT_MODE_CODE: &str = "9017598429";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretCodeError {
    #[error("secret code must not be empty")]
    Empty,

    #[error("secret code may only contain digits, found {0:?}")]
    NonDigit(char),
}

pub struct SecretCode<F> {
    code: Vec<char>,
    window: VecDeque<char>,
    triggered: bool,
    on_match: F,
}

impl<F: FnMut()> SecretCode<F> {
    pub fn new(code: &str, on_match: F) -> Result<Self, SecretCodeError> {
        if code.is_empty() {
            return Err(SecretCodeError::Empty);
        }
        if let Some(bad) = code.chars().find(|c| !c.is_ascii_digit()) {
            return Err(SecretCodeError::NonDigit(bad));
        }

        let code: Vec<char> = code.chars().collect();
        Ok(Self {
            window: VecDeque::with_capacity(code.len() + 1),
            code,
            triggered: false,
            on_match,
        })
    }

    /// Feed one key press. Returns true only on the call that fired.
    pub fn feed(&mut self, key: char) -> bool {
        if !key.is_ascii_digit() {
            return false;
        }

        self.window.push_back(key);
        while self.window.len() > self.code.len() {
            self.window.pop_front();
        }

        if self.triggered || !self.window.iter().eq(self.code.iter()) {
            return false;
        }

        self.triggered = true;
        (self.on_match)();
        true
    }

    /// Feed a DOM-style key name ("7", "a", "Enter"). Only single-character
    /// names are candidates.
    pub fn feed_key(&mut self, key: &str) -> bool {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.feed(c),
            _ => false,
        }
    }

    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Current window contents, oldest first.
    #[cfg(test)]
    fn window(&self) -> String {
        self.window.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn feed_all<F: FnMut()>(detector: &mut SecretCode<F>, keys: &str) {
        for c in keys.chars() {
            detector.feed(c);
        }
    }

    #[test]
    fn exact_sequence_fires_once() {
        let fired = Cell::new(0);
        let mut detector = SecretCode::new(EDIT_MODE_CODE, || fired.set(fired.get() + 1)).unwrap();

        feed_all(&mut detector, "9017598429");

        assert_eq!(fired.get(), 1);
        assert!(detector.triggered());
    }

    #[test]
    fn repeated_sequence_fires_only_first_time() {
        let fired = Cell::new(0);
        let mut detector = SecretCode::new(EDIT_MODE_CODE, || fired.set(fired.get() + 1)).unwrap();

        feed_all(&mut detector, "90175984299017598429");

        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn non_digits_are_skipped_not_inserted() {
        let fired = Cell::new(0);
        let mut detector = SecretCode::new(EDIT_MODE_CODE, || fired.set(fired.get() + 1)).unwrap();

        feed_all(&mut detector, "901");
        assert!(!detector.feed('a'));
        assert_eq!(detector.window(), "901");
        feed_all(&mut detector, "7598429");

        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn named_keys_are_ignored() {
        let fired = Cell::new(false);
        let mut detector = SecretCode::new("12", || fired.set(true)).unwrap();

        assert!(!detector.feed_key("1"));
        assert!(!detector.feed_key("Enter"));
        assert!(!detector.feed_key("Shift"));
        assert!(detector.feed_key("2"));
        assert!(fired.get());
    }

    #[test]
    fn window_slides_past_leading_noise() {
        let fired = Cell::new(false);
        let mut detector = SecretCode::new("4242", || fired.set(true)).unwrap();

        feed_all(&mut detector, "1234");
        assert_eq!(detector.window(), "1234");
        feed_all(&mut detector, "242");
        assert_eq!(detector.window(), "4242");
        assert!(fired.get());
    }

    #[test]
    fn repeated_digit_code_fires_once() {
        let fired = Cell::new(0);
        let mut detector = SecretCode::new("1111", || fired.set(fired.get() + 1)).unwrap();

        feed_all(&mut detector, "111");
        assert_eq!(fired.get(), 0);
        feed_all(&mut detector, "1111111");
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn partial_match_does_not_fire() {
        let fired = Cell::new(false);
        let mut detector = SecretCode::new(EDIT_MODE_CODE, || fired.set(true)).unwrap();

        feed_all(&mut detector, "901759842");
        feed_all(&mut detector, "8");

        assert!(!fired.get());
        assert!(!detector.triggered());
    }

    #[test]
    fn rejects_invalid_codes() {
        assert!(matches!(SecretCode::new("", || {}), Err(SecretCodeError::Empty)));
        assert!(matches!(SecretCode::new("12a4", || {}), Err(SecretCodeError::NonDigit('a'))));
    }
}
