//! Terminal QR rendering.

use qrcode::{Color, QrCode};

/// Light modules around the symbol, in modules
const QUIET_ZONE: usize = 2;

/// Print a QR code to the terminal, or an error line if the data does not
/// fit in a symbol.
pub fn print_qr_code(data: &str) {
    match half_blocks(data) {
        Ok(text) => print!("{}", text),
        Err(e) => eprintln!("\x1b[1;31m✗\x1b[0m Failed to generate QR code: {}", e),
    }
}

/// Render with one character per two vertically stacked modules.
fn half_blocks(data: &str) -> Result<String, qrcode::types::QrError> {
    let code = QrCode::new(data.as_bytes())?;
    let colors = code.to_colors();
    let width = code.width();
    let side = width + 2 * QUIET_ZONE;

    let dark = |x: usize, y: usize| -> bool {
        if x < QUIET_ZONE || y < QUIET_ZONE {
            return false;
        }
        let (x, y) = (x - QUIET_ZONE, y - QUIET_ZONE);
        x < width && y < width && colors[y * width + x] == Color::Dark
    };

    let mut out = String::new();
    for y in (0..side).step_by(2) {
        out.push_str("  ");
        for x in 0..side {
            out.push(match (dark(x, y), dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }
    Ok(out)
}
