//! QR backends: the remote HTTP service and an in-process renderer

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use uuid::Uuid;

use crate::protocol::constants::{DELETE_PATH, GENERATE_PATH, LOCAL_MODULE_PX};
use crate::protocol::{
    DeleteResponse, GenerateRequest, GenerateResponse, QrId, QrImage, QrRequest, QrResult,
};
use crate::widget::{self, WidgetOptions};
use crate::{Config, Result};

/// Collaborator that renders and stores QR codes
pub trait QrBackend {
    /// Render a code for the request. A backend-reported failure is an
    /// `Error::Backend`.
    fn generate(&self, request: &QrRequest) -> impl Future<Output = Result<QrResult>> + Send;

    /// Delete a stored code by identifier.
    fn delete(&self, id: &QrId) -> impl Future<Output = Result<()>> + Send;
}

/// Client for the QR web backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build from config, applying the request timeout at the transport too.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn generate_url(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    pub fn delete_url(&self, id: &QrId) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            DELETE_PATH,
            urlencoding::encode(id.as_str())
        )
    }
}

impl QrBackend for HttpBackend {
    async fn generate(&self, request: &QrRequest) -> Result<QrResult> {
        if request.logo.is_some() {
            tracing::debug!("http backend ignores the logo image");
        }

        let body = GenerateRequest {
            content: request.content().to_string(),
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        response.into_result(request.content())
    }

    async fn delete(&self, id: &QrId) -> Result<()> {
        let response = self
            .client
            .post(self.delete_url(id))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<DeleteResponse>()
            .await?;

        response.into_result()
    }
}

/// Renders codes in-process and hands out random identifiers.
///
/// Nothing is stored, so every delete succeeds.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    options: WidgetOptions,
}

impl LocalBackend {
    pub fn new(options: WidgetOptions) -> Self {
        Self { options }
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new(WidgetOptions::classic(LOCAL_MODULE_PX))
    }
}

impl QrBackend for LocalBackend {
    async fn generate(&self, request: &QrRequest) -> Result<QrResult> {
        let image = widget::render(request.content(), request.logo.as_ref(), &self.options)?;
        let png = widget::encode_png(&image)?;

        Ok(QrResult {
            image: QrImage::from_bytes(png)?,
            content: request.content().to_string(),
            id: Some(QrId::new(Uuid::new_v4().to_string())),
        })
    }

    async fn delete(&self, id: &QrId) -> Result<()> {
        tracing::debug!(%id, "local backend delete");
        Ok(())
    }
}
