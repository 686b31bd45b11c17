//! Backend wire format and the QR data model

pub mod constants;
mod content;
mod messages;
pub mod serde_utils;

pub use content::{LogoImage, QrCard, QrId, QrImage, QrRequest, QrResult};
pub use messages::{DeleteResponse, GenerateRequest, GenerateResponse};
