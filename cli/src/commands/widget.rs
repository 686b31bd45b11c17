//! Widget command implementation.

use std::path::{Path, PathBuf};

use qrpanel_core::{LogoImage, QrWidget};

/// Render a styled code and export it as PNG.
pub fn widget(text: &str, logo: Option<PathBuf>, dir: &Path) -> anyhow::Result<()> {
    let logo = logo.map(LogoImage::read).transpose()?;

    let mut widget = QrWidget::default();
    widget.generate(text, logo)?;
    let path = widget.download(dir)?;

    println!("\x1b[1;32m✓\x1b[0m Exported {}", path.display());
    Ok(())
}
