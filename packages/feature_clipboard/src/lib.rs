use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to initialize clipboard: {0}")]
    Init(#[source] arboard::Error),
    #[error("Failed to set clipboard text: {0}")]
    Write(#[source] arboard::Error),
}

/// Copies `text` to the system clipboard.
/// Failures are logged as well as returned.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    Clipboard::new()
        .map_err(ClipboardError::Init)
        .and_then(|mut clipboard| clipboard.set_text(text).map_err(ClipboardError::Write))
        .inspect_err(|e| tracing::error!("{e}"))
}
