//! Platform clipboard access for the "copy content" actions

use arboard::Clipboard as ArboardClipboard;

use crate::{Error, Result};

/// Anything that can receive copied text
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`.
///
/// A fresh handle is opened per write; headless sessions fail here and the
/// caller surfaces the error as a notification.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = ArboardClipboard::new()
            .map_err(|e| Error::Clipboard(e.to_string()))?;

        clipboard.set_text(text)
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}
