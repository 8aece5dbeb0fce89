//! Seams to the host environment.
//!
//! The wizard never touches the terminal or the system clipboard directly;
//! front ends plug in their own implementations.

use paywiz_sdk::objects::Route;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("clipboard is not available: {0}")]
    Unavailable(String),
}

/// Write-only clipboard.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Switches the page shown by the front end.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: Route);
}

/// Clipboard that only remembers what was copied.
///
/// Used by headless front ends and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last copied text.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_string()))?;
        *guard = Some(text.to_owned());
        Ok(())
    }
}

impl<T: Clipboard + ?Sized> Clipboard for std::sync::Arc<T> {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).copy(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_keeps_last_copy() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);
        clipboard.copy("2200980205243667").unwrap();
        clipboard.copy("+79586841276").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("+79586841276"));
    }
}
