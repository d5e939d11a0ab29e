use anyhow::{Context, Result};
use arboard::Clipboard;

/// Clipboard hand-off for generated passwords.
///
/// The handle is acquired up front, before any secret is requested, so
/// a missing clipboard provider aborts the run without wasting an
/// interactive salt entry.
pub struct ClipboardSink {
    inner: Clipboard,
}

impl ClipboardSink {
    pub fn new() -> Result<Self> {
        let inner = Clipboard::new().context(
            "Clipboard is unavailable; install a clipboard provider or drop --copy to print instead",
        )?;
        Ok(Self { inner })
    }

    pub fn copy(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .context("Failed to copy the password to the clipboard")
    }
}
