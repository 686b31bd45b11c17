//! Download and copy actions attached to results and cards

use std::path::{Path, PathBuf};

use crate::clipboard::ClipboardSink;
use crate::notify::{Notifications, Severity};
use crate::protocol::QrImage;
use crate::Result;

/// Save a code as `qr-code-<unix millis>.png` under `dir`.
pub async fn download(image: &QrImage, dir: &Path, notifications: &Notifications) -> Result<PathBuf> {
    let path = dir.join(format!("qr-code-{}.png", chrono::Utc::now().timestamp_millis()));

    match tokio::fs::write(&path, image.as_bytes()).await {
        Ok(()) => {
            tracing::info!("saved qr code to {}", path.display());
            notifications
                .show("QR Code downloaded successfully!", Severity::Success)
                .await;
            Ok(path)
        }
        Err(e) => {
            tracing::warn!("download failed: {}", e);
            notifications
                .show("Failed to download QR code", Severity::Error)
                .await;
            Err(e.into())
        }
    }
}

/// Copy a code's content to the clipboard. Failure is reported, not fatal.
pub async fn copy_content(
    content: &str,
    clipboard: &mut impl ClipboardSink,
    notifications: &Notifications,
) -> Result<()> {
    match clipboard.set_text(content) {
        Ok(()) => {
            notifications
                .show("Content copied to clipboard!", Severity::Success)
                .await;
            Ok(())
        }
        Err(e) => {
            tracing::warn!("copy failed: {}", e);
            notifications
                .show("Failed to copy content", Severity::Error)
                .await;
            Err(e)
        }
    }
}
