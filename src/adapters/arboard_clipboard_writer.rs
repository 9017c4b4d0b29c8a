use anyhow::{Context, Result};

use crate::core::interfaces::adapters::ClipboardWriter;

pub struct ArboardClipboardWriter;

impl ArboardClipboardWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardWriter for ArboardClipboardWriter {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to copy text to clipboard")?;

        log::info!("[CLIPBOARD] Copied {} characters", text.chars().count());
        Ok(())
    }
}
