//! Direct QR widget: renders codes in-process, no backend involved
//!
//! Symbol encoding comes from the `qrcode` crate. This module only paints
//! the modules (square or rounded dots), clears the center for an optional
//! logo and exports the result as PNG.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{imageops, ImageFormat, Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};

use crate::protocol::constants::WIDGET_EXPORT_NAME;
use crate::protocol::LogoImage;
use crate::{Error, Result};

/// Largest fraction of the symbol side a logo may hide. At level H this
/// leaves enough intact codewords for a reader to recover the data.
const MAX_LOGO_SIDE: f32 = 0.4;

/// Shape of each dark module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotStyle {
    Square,
    /// Corners without a dark neighbor on either side are rounded off
    Rounded,
}

/// Canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasSize {
    /// Fixed pixel size; the symbol is scaled to fit and centered
    Fixed { width: u32, height: u32 },
    /// Derived from the symbol, each module spanning this many pixels
    PerModule(u32),
}

/// Visual parameters of a rendered code
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub size: CanvasSize,
    pub dot_color: Rgba<u8>,
    pub dot_style: DotStyle,
    pub background: Rgba<u8>,
    /// Light modules around the symbol
    pub quiet_zone: u32,
    /// Pixels kept clear between the logo and the surrounding dots
    pub image_margin: u32,
    /// Fraction of the symbol side the logo may cover, capped at 0.4
    pub image_size: f32,
    /// Used without a logo; a logo always forces level H
    pub ec_level: EcLevel,
}

impl Default for WidgetOptions {
    /// 220x220, white rounded dots on a transparent background
    fn default() -> Self {
        Self {
            size: CanvasSize::Fixed {
                width: 220,
                height: 220,
            },
            dot_color: Rgba([0xff, 0xff, 0xff, 0xff]),
            dot_style: DotStyle::Rounded,
            background: Rgba([0, 0, 0, 0]),
            quiet_zone: 0,
            image_margin: 6,
            image_size: 0.4,
            ec_level: EcLevel::Q,
        }
    }
}

impl WidgetOptions {
    /// Plain black-on-white code with a standard quiet zone, sized so each
    /// module spans `module_px` pixels.
    pub fn classic(module_px: u32) -> Self {
        Self {
            size: CanvasSize::PerModule(module_px),
            dot_color: Rgba([0, 0, 0, 0xff]),
            dot_style: DotStyle::Square,
            background: Rgba([0xff, 0xff, 0xff, 0xff]),
            quiet_zone: 4,
            image_margin: module_px,
            image_size: 0.3,
            ec_level: EcLevel::M,
        }
    }
}

/// Render `data` with an optional centered logo.
pub fn render(data: &str, logo: Option<&LogoImage>, options: &WidgetOptions) -> Result<RgbaImage> {
    let ec_level = match logo {
        Some(_) => EcLevel::H,
        None => options.ec_level,
    };
    let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level)
        .map_err(|e| Error::Render(format!("QR generation failed: {}", e)))?;

    let n = code.width() as u32;
    let colors = code.to_colors();
    let dark = |x: i64, y: i64| -> bool {
        if x < 0 || y < 0 || x >= n as i64 || y >= n as i64 {
            return false;
        }
        colors[(y as u32 * n + x as u32) as usize] == Color::Dark
    };

    let span = n + 2 * options.quiet_zone;
    let (width, height, dot) = match options.size {
        CanvasSize::PerModule(px) => {
            let px = px.max(1);
            (span * px, span * px, px)
        }
        CanvasSize::Fixed { width, height } => {
            (width, height, (width.min(height) / span).max(1))
        }
    };
    let margin = options.image_margin;
    let origin_x = (width.saturating_sub(dot * span)) / 2 + options.quiet_zone * dot;
    let origin_y = (height.saturating_sub(dot * span)) / 2 + options.quiet_zone * dot;

    let mut canvas = RgbaImage::from_pixel(width, height, options.background);

    // Center block of modules hidden behind the logo; same parity as the
    // symbol so it stays centered
    let hidden = match logo {
        Some(_) => {
            let fraction = options.image_size.clamp(0.0, MAX_LOGO_SIDE);
            let mut cover = ((n as f32 * fraction) as u32).min(n);
            if (n - cover) % 2 != 0 {
                cover = cover.saturating_sub(1);
            }
            let start = (n - cover) / 2;
            Some((start, start + cover))
        }
        None => None,
    };
    let is_hidden = |x: u32, y: u32| match hidden {
        Some((lo, hi)) => x >= lo && x < hi && y >= lo && y < hi,
        None => false,
    };

    for y in 0..n {
        for x in 0..n {
            if !dark(x as i64, y as i64) || is_hidden(x, y) {
                continue;
            }
            let (xi, yi) = (x as i64, y as i64);
            // top-left, top-right, bottom-left, bottom-right
            let rounded = match options.dot_style {
                DotStyle::Square => [false; 4],
                DotStyle::Rounded => [
                    !dark(xi - 1, yi) && !dark(xi, yi - 1),
                    !dark(xi + 1, yi) && !dark(xi, yi - 1),
                    !dark(xi - 1, yi) && !dark(xi, yi + 1),
                    !dark(xi + 1, yi) && !dark(xi, yi + 1),
                ],
            };
            paint_module(
                &mut canvas,
                origin_x + x * dot,
                origin_y + y * dot,
                dot,
                rounded,
                options.dot_color,
            );
        }
    }

    if let (Some(logo), Some((lo, hi))) = (logo, hidden) {
        let side = ((hi - lo) * dot).saturating_sub(2 * margin);
        if side > 0 {
            let decoded = image::load_from_memory(&logo.bytes)
                .map_err(|e| Error::Decode(format!("logo image: {}", e)))?;
            let scaled = decoded.resize(side, side, imageops::FilterType::Triangle).to_rgba8();
            let box_x = origin_x + lo * dot + margin;
            let box_y = origin_y + lo * dot + margin;
            let x = box_x + (side - scaled.width()) / 2;
            let y = box_y + (side - scaled.height()) / 2;
            imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
        }
    }

    Ok(canvas)
}

fn paint_module(
    canvas: &mut RgbaImage,
    left: u32,
    top: u32,
    dot: u32,
    rounded: [bool; 4],
    color: Rgba<u8>,
) {
    let r = dot as f32 / 2.0;
    for ly in 0..dot {
        for lx in 0..dot {
            let fx = lx as f32 + 0.5 - r;
            let fy = ly as f32 + 0.5 - r;
            let corner = match (fx < 0.0, fy < 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (true, false) => 2,
                (false, false) => 3,
            };
            if rounded[corner] && fx * fx + fy * fy > r * r {
                continue;
            }
            if let Some(px) = canvas.get_pixel_mut_checked(left + lx, top + ly) {
                *px = color;
            }
        }
    }
}

/// Encode a rendered code as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| Error::Render(format!("PNG encoding failed: {}", e)))?;
    Ok(buf)
}

/// Standalone QR widget page state
#[derive(Debug, Clone)]
pub struct QrWidget {
    options: WidgetOptions,
    data: String,
    /// Embedded logo as a data URL
    image: Option<String>,
    shown: bool,
}

impl QrWidget {
    pub fn new(options: WidgetOptions) -> Self {
        Self {
            options,
            data: String::new(),
            image: None,
            shown: false,
        }
    }

    /// Configure the widget with new text and optional logo, then reveal it.
    pub fn generate(&mut self, text: &str, logo: Option<LogoImage>) -> Result<()> {
        if text.is_empty() {
            return Err(Error::Validation("Please enter text or URL".to_string()));
        }

        self.data = text.to_string();
        self.image = logo.map(|l| l.data_url());
        self.shown = true;

        tracing::debug!(len = text.len(), logo = self.image.is_some(), "widget updated");
        Ok(())
    }

    /// Whether the result container is visible
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn render(&self) -> Result<RgbaImage> {
        if self.data.is_empty() {
            return Err(Error::Render("nothing to render yet".to_string()));
        }
        let logo = self
            .image
            .as_deref()
            .map(LogoImage::from_data_url)
            .transpose()?;
        render(&self.data, logo.as_ref(), &self.options)
    }

    /// Export the current code as `aesthetic-qr-code.png` under `dir`.
    pub fn download(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let image = self.render()?;
        let path = dir.as_ref().join(format!("{}.png", WIDGET_EXPORT_NAME));
        std::fs::write(&path, encode_png(&image)?)?;

        tracing::info!("exported qr code to {}", path.display());
        Ok(path)
    }
}

impl Default for QrWidget {
    fn default() -> Self {
        Self::new(WidgetOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_logo() -> LogoImage {
        let img = RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]));
        LogoImage::from_bytes(encode_png(&img).unwrap()).unwrap()
    }

    #[test]
    fn test_generate_requires_text() {
        let mut widget = QrWidget::default();
        assert!(matches!(widget.generate("", None), Err(Error::Validation(_))));
        assert!(!widget.is_shown());

        widget.generate("https://example.com", None).unwrap();
        assert!(widget.is_shown());
        assert_eq!(widget.data(), "https://example.com");
    }

    #[test]
    fn test_render_dimensions_and_background() {
        let mut widget = QrWidget::default();
        widget.generate("hello", None).unwrap();
        let image = widget.render().unwrap();

        assert_eq!(image.dimensions(), (220, 220));
        // corners outside the symbol stay transparent
        assert_eq!(image.get_pixel(219, 219)[3], 0);
        // at least one dot was painted
        assert!(image.pixels().any(|p| *p == Rgba([0xff, 0xff, 0xff, 0xff])));
    }

    #[test]
    fn test_rounded_corners_are_cleared() {
        let options = WidgetOptions::default();
        let image = render("hello", None, &options).unwrap();
        let square = render(
            "hello",
            None,
            &WidgetOptions {
                dot_style: DotStyle::Square,
                ..WidgetOptions::default()
            },
        )
        .unwrap();

        let painted = |img: &RgbaImage| img.pixels().filter(|p| p[3] != 0).count();
        assert!(painted(&image) < painted(&square));
    }

    #[test]
    fn test_logo_is_embedded() {
        let mut widget = QrWidget::default();
        widget.generate("https://example.com", Some(red_logo())).unwrap();
        let image = widget.render().unwrap();

        let (w, h) = image.dimensions();
        assert_eq!(*image.get_pixel(w / 2, h / 2), Rgba([255, 0, 0, 255]));
    }

    /// Flatten onto white with a quiet border and read the code back.
    fn decode(image: &RgbaImage) -> Option<String> {
        let pad = 32;
        let (w, h) = image.dimensions();
        let (pw, ph) = ((w + 2 * pad) as usize, (h + 2 * pad) as usize);
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(pw, ph, |x, y| {
            let (x, y) = (x as u32, y as u32);
            if x < pad || y < pad || x >= w + pad || y >= h + pad {
                return 255;
            }
            let p = image.get_pixel(x - pad, y - pad);
            let alpha = p[3] as u32;
            let luma = (p[0] as u32 * 299 + p[1] as u32 * 587 + p[2] as u32 * 114) / 1000;
            ((luma * alpha + 255 * (255 - alpha)) / 255) as u8
        });
        let grids = prepared.detect_grids();
        grids.first().and_then(|grid| grid.decode().ok()).map(|(_, content)| content)
    }

    fn white_logo() -> LogoImage {
        let img = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
        LogoImage::from_bytes(encode_png(&img).unwrap()).unwrap()
    }

    fn dark_on_light() -> WidgetOptions {
        WidgetOptions {
            dot_color: Rgba([0, 0, 0, 0xff]),
            background: Rgba([0xff, 0xff, 0xff, 0xff]),
            ..WidgetOptions::default()
        }
    }

    #[test]
    fn test_logo_codes_stay_readable() {
        let logo = white_logo();
        for data in ["hello", "https://example.com"] {
            for options in [WidgetOptions::classic(8), dark_on_light()] {
                assert_eq!(decode(&render(data, None, &options).unwrap()).as_deref(), Some(data));
                let with_logo = render(data, Some(&logo), &options).unwrap();
                assert_eq!(decode(&with_logo).as_deref(), Some(data));
            }
        }
    }

    #[test]
    fn test_oversized_logo_is_capped() {
        let options = WidgetOptions {
            image_size: 5.0,
            ..WidgetOptions::classic(8)
        };
        let image = render("https://example.com", Some(&white_logo()), &options).unwrap();
        assert_eq!(decode(&image).as_deref(), Some("https://example.com"));

        let options = WidgetOptions {
            image_size: -1.0,
            ..WidgetOptions::classic(8)
        };
        assert!(render("hello", Some(&white_logo()), &options).is_ok());
    }

    #[test]
    fn test_classic_is_sized_by_modules() {
        let image = render("hello", None, &WidgetOptions::classic(8)).unwrap();
        // version 1 symbol: 21 modules + 2 * 4 quiet zone
        assert_eq!(image.dimensions(), (29 * 8, 29 * 8));
        assert_eq!(*image.get_pixel(0, 0), Rgba([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(*image.get_pixel(4 * 8, 4 * 8), Rgba([0, 0, 0, 0xff]));
    }

    #[test]
    fn test_download_before_generate_fails() {
        let dir = tempfile::tempdir().unwrap();
        let widget = QrWidget::default();
        assert!(matches!(widget.download(dir.path()), Err(Error::Render(_))));
    }

    #[test]
    fn test_download_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut widget = QrWidget::default();
        widget.generate("hello", None).unwrap();

        let path = widget.download(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "aesthetic-qr-code.png");

        let bytes = std::fs::read(&path).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 220);
    }
}
