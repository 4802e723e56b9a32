//! System clipboard access.
//!
//! Copied secrets are cleared again after [`CLIPBOARD_LIFETIME_SECS`] by a
//! short-lived background thread, unless the clipboard content changed in the
//! meantime. That thread does not outlive the process, so the application
//! calls [`ClipboardSink::clear_secret`] on exit.

use crate::domain::{PassTuiError, Result};
use arboard::Clipboard;
use std::thread;
use std::time::Duration;

/// Seconds a copied secret stays on the clipboard.
pub const CLIPBOARD_LIFETIME_SECS: u64 = 30;

/// Writes text to the clipboard.
///
/// Implemented by [`SystemClipboard`]; tests substitute a recorder.
pub trait ClipboardSink: Send {
    /// # Errors
    ///
    /// Returns [`PassTuiError::Clipboard`] if the clipboard is unavailable.
    fn copy_secret(&mut self, text: &str) -> Result<()>;

    /// Removes the last copied secret if it is still on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`PassTuiError::Clipboard`] if the clipboard is unavailable.
    fn clear_secret(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The platform clipboard via `arboard`.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    /// Last secret copied by this process.
    copied: Option<String>,
}

fn open() -> Result<Clipboard> {
    Clipboard::new().map_err(|e| PassTuiError::Clipboard(format!("clipboard unavailable: {e}")))
}

/// Empties `clipboard` if it still holds `secret`.
fn clear_if_unchanged(clipboard: &mut Clipboard, secret: &str) -> bool {
    if clipboard.get_text().is_ok_and(|current| current == secret) {
        return clipboard.set_text(String::new()).is_ok();
    }
    false
}

impl ClipboardSink for SystemClipboard {
    fn copy_secret(&mut self, text: &str) -> Result<()> {
        let mut clipboard = open()?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| PassTuiError::Clipboard(format!("failed to set clipboard: {e}")))?;
        self.copied = Some(text.to_string());

        let copied = text.to_string();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(CLIPBOARD_LIFETIME_SECS));
            if clear_if_unchanged(&mut clipboard, &copied) {
                tracing::debug!("cleared copied secret from clipboard");
            }
        });

        tracing::debug!("secret copied to clipboard");
        Ok(())
    }

    fn clear_secret(&mut self) -> Result<()> {
        let Some(copied) = self.copied.take() else {
            return Ok(());
        };
        if clear_if_unchanged(&mut open()?, &copied) {
            tracing::debug!("cleared copied secret from clipboard on exit");
        }
        Ok(())
    }
}
