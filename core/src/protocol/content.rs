//! QR data model shared by the controllers

use std::fmt;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::protocol::constants::PNG_DATA_URL_PREFIX;
use crate::{Error, Result};

/// Server-assigned identifier of a stored QR code.
///
/// Opaque to this crate; it is only the join key between a card and the
/// backend's delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QrId(pub String);

impl QrId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backends sometimes send numeric ids; accept both.
pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> std::result::Result<Option<QrId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    let raw: Option<RawId> = Deserialize::deserialize(deserializer)?;
    Ok(raw.map(|r| match r {
        RawId::Text(s) => QrId(s),
        RawId::Number(n) => QrId(n.to_string()),
    }))
}

/// Encoded raster image of a rendered QR code (PNG bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage(Vec<u8>);

impl QrImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::Decode("empty image payload".to_string()));
        }
        Ok(Self(bytes))
    }

    /// Decode a base64 payload as sent by the backend.
    pub fn from_base64(payload: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| Error::Decode(format!("invalid base64 image: {}", e)))?;
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.0)
    }

    /// `data:image/png;base64,...` source for an `img` element
    pub fn data_url(&self) -> String {
        format!("{}{}", PNG_DATA_URL_PREFIX, self.to_base64())
    }
}

/// Logo image embedded in the middle of a rendered code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl LogoImage {
    /// Wrap raw image bytes, sniffing the mime type from the content.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| Error::Decode(format!("unrecognized logo image: {}", e)))?;
        Ok(Self {
            mime: format.to_mime_type().to_string(),
            bytes,
        })
    }

    /// Read an uploaded logo file into an embeddable payload.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| Error::Decode("not a data url".to_string()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::Decode("data url without payload".to_string()))?;
        let mime = meta
            .strip_suffix(";base64")
            .ok_or_else(|| Error::Decode("data url is not base64".to_string()))?;
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| Error::Decode(format!("invalid data url payload: {}", e)))?;

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

/// A request to render a QR code
#[derive(Debug, Clone)]
pub struct QrRequest {
    content: String,
    pub logo: Option<LogoImage>,
}

impl QrRequest {
    /// Build a request from raw input; the content is trimmed and must not
    /// be empty.
    pub fn new(content: &str) -> Result<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::Validation("QR content is empty".to_string()));
        }
        Ok(Self {
            content: content.to_string(),
            logo: None,
        })
    }

    pub fn with_logo(mut self, logo: LogoImage) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A rendered QR code returned by a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrResult {
    pub image: QrImage,
    pub content: String,
    pub id: Option<QrId>,
}

/// Dashboard entry for a previously generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCard {
    pub id: QrId,
    pub content: String,
    pub image: QrImage,
    /// Creation time as displayed, e.g. `Just now` or `2026-10-16 14:02`
    pub created: String,
}

impl QrCard {
    /// Build a card from a result. Results without an identifier have no
    /// join key and cannot become cards.
    pub fn from_result(result: &QrResult, created: impl Into<String>) -> Option<Self> {
        let id = result.id.clone()?;
        Some(Self {
            id,
            content: result.content.clone(),
            image: result.image.clone(),
            created: created.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_content() {
        let req = QrRequest::new("  https://example.com \n").unwrap();
        assert_eq!(req.content(), "https://example.com");
    }

    #[test]
    fn test_request_rejects_blank() {
        assert!(matches!(QrRequest::new("   "), Err(Error::Validation(_))));
        assert!(matches!(QrRequest::new(""), Err(Error::Validation(_))));
    }

    #[test]
    fn test_image_data_url() {
        let image = QrImage::from_base64("iVBORw0KGgo=").unwrap();
        assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_image_rejects_empty_and_invalid() {
        assert!(matches!(QrImage::from_base64(""), Err(Error::Decode(_))));
        assert!(matches!(QrImage::from_base64("not base64!"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_logo_data_url_parse() {
        let logo = LogoImage::from_data_url("data:image/png;base64,AQID").unwrap();
        assert_eq!(logo.mime, "image/png");
        assert_eq!(logo.bytes, vec![1, 2, 3]);
        assert_eq!(logo.data_url(), "data:image/png;base64,AQID");

        assert!(LogoImage::from_data_url("image/png;base64,AQID").is_err());
        assert!(LogoImage::from_data_url("data:image/png,AQID").is_err());
    }

    #[test]
    fn test_logo_sniffs_png() {
        let mut png = Vec::new();
        image::RgbaImage::new(2, 2)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let logo = LogoImage::from_bytes(png).unwrap();
        assert_eq!(logo.mime, "image/png");

        assert!(LogoImage::from_bytes(b"hello".to_vec()).is_err());
    }

    #[test]
    fn test_card_requires_id() {
        let image = QrImage::from_bytes(vec![1]).unwrap();
        let mut result = QrResult {
            image,
            content: "hi".to_string(),
            id: None,
        };
        assert!(QrCard::from_result(&result, "Just now").is_none());

        result.id = Some(QrId::new("7"));
        let card = QrCard::from_result(&result, "Just now").unwrap();
        assert_eq!(card.id.as_str(), "7");
        assert_eq!(card.created, "Just now");
    }
}
