//! Request/response bodies exchanged with the QR backend

use serde::{Deserialize, Serialize};

use crate::protocol::content::{deserialize_opt_id, QrId, QrImage, QrResult};
use crate::{Error, Result};

/// Body of `POST /generate-qr`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub content: String,
}

/// Response of `POST /generate-qr`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    /// PNG bytes, base64 on the wire, absent on failure
    #[serde(default, with = "crate::protocol::serde_utils::base64_opt")]
    pub qr_image: Option<Vec<u8>>,
    /// Assigned on dashboard pages
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<QrId>,
    /// Echo of the stored content
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Turn a response into a result, falling back to the submitted
    /// content when the backend does not echo it.
    pub fn into_result(self, submitted: &str) -> Result<QrResult> {
        if !self.success {
            return Err(Error::Backend(
                self.error.unwrap_or_else(|| "generate failed".to_string()),
            ));
        }

        let bytes = self
            .qr_image
            .ok_or_else(|| Error::Decode("response carries no image".to_string()))?;

        Ok(QrResult {
            image: QrImage::from_bytes(bytes)?,
            content: self.content.unwrap_or_else(|| submitted.to_string()),
            id: self.id,
        })
    }
}

/// Response of `POST /delete-qr/<id>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl DeleteResponse {
    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Backend(
                self.error.unwrap_or_else(|| "delete failed".to_string()),
            ))
        }
    }
}
