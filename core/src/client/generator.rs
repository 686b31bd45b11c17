//! Generate-QR controller: input, loading state, result area

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};

use crate::client::backend::QrBackend;
use crate::dashboard::Dashboard;
use crate::notify::{Notifications, Severity};
use crate::protocol::{QrRequest, QrResult};
use crate::view::Node;
use crate::{Error, Result};

const IDLE_LABEL: &str = "Generate QR";
const LOADING_LABEL: &str = "Generating...";

/// Visible state of the generate button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub label: String,
    pub enabled: bool,
}

impl Trigger {
    /// Enter the loading state, returning the state to restore afterwards.
    fn begin_loading(&mut self) -> Trigger {
        let saved = self.clone();
        self.label = LOADING_LABEL.to_string();
        self.enabled = false;
        saved
    }

    pub fn render(&self) -> Node {
        let icon = if self.enabled { "bi-qr-code" } else { "bi-hourglass-split" };
        let mut button = Node::el("button")
            .attr("type", "button")
            .attr("id", "generateQRBtn")
            .class("btn btn-primary")
            .child(Node::icon(icon))
            .child(Node::text(format!(" {}", self.label)));
        if !self.enabled {
            button = button.attr("disabled", "disabled");
        }
        button
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            label: IDLE_LABEL.to_string(),
            enabled: true,
        }
    }
}

/// Area showing the most recent result
#[derive(Debug, Clone, Default)]
pub struct ResultArea {
    result: Option<QrResult>,
}

impl ResultArea {
    pub fn result(&self) -> Option<&QrResult> {
        self.result.as_ref()
    }

    pub fn is_shown(&self) -> bool {
        self.result.is_some()
    }

    fn show(&mut self, result: QrResult) {
        self.result = Some(result);
    }

    /// Result card with download and copy actions, `None` before the first
    /// successful generate.
    pub fn render(&self) -> Option<Node> {
        let result = self.result.as_ref()?;

        let actions = Node::el("div")
            .class("qr-actions mt-3")
            .child(
                Node::el("button")
                    .class("btn btn-primary btn-sm download-qr-btn")
                    .child(Node::icon("bi-download"))
                    .child(Node::text(" Download")),
            )
            .child(
                Node::el("button")
                    .class("btn btn-outline-secondary btn-sm copy-content-btn")
                    .attr("data-content", result.content.clone())
                    .child(Node::icon("bi-clipboard"))
                    .child(Node::text(" Copy Content")),
            );

        Some(
            Node::el("div")
                .attr("id", "qrResult")
                .class("show")
                .child(
                    Node::el("div")
                        .class("qr-result-card")
                        .child(
                            Node::el("img")
                                .attr("src", result.image.data_url())
                                .attr("alt", "QR Code")
                                .class("img-fluid"),
                        )
                        .child(actions),
                ),
        )
    }
}

/// Cancels the generate request in flight, if any.
///
/// Cancelling while idle has no effect on later requests.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<Notify>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.notify_waiters();
    }

    async fn cancelled(&self) {
        self.0.notified().await
    }
}

/// Controller of the generate form.
///
/// `generate` borrows the controller mutably for the whole request, so a
/// second submission cannot start until the first settles.
pub struct Generator<B> {
    backend: B,
    notifications: Notifications,
    trigger: Trigger,
    result: ResultArea,
    cancel: CancelHandle,
    timeout: Duration,
    trigger_tx: watch::Sender<Trigger>,
}

impl<B: QrBackend> Generator<B> {
    pub fn new(backend: B, notifications: Notifications, timeout: Duration) -> Self {
        Self {
            backend,
            notifications,
            trigger: Trigger::default(),
            result: ResultArea::default(),
            cancel: CancelHandle::default(),
            timeout,
            trigger_tx: watch::Sender::new(Trigger::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    /// Follow trigger changes while a request holds the controller.
    pub fn watch_trigger(&self) -> watch::Receiver<Trigger> {
        self.trigger_tx.subscribe()
    }

    pub fn result_area(&self) -> &ResultArea {
        &self.result
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Generate a code for the raw input field value.
    ///
    /// Blank input is rejected with a warning before any request. When a
    /// dashboard is given (dashboard page) the new code is also inserted as
    /// a card. Failures leave the dashboard untouched.
    pub async fn generate(
        &mut self,
        input: &str,
        dashboard: Option<&mut Dashboard>,
    ) -> Result<QrResult> {
        let request = match QrRequest::new(input) {
            Ok(request) => request,
            Err(e) => {
                self.notifications
                    .show("Please enter content for the QR code", Severity::Warning)
                    .await;
                return Err(e);
            }
        };
        self.submit(request, dashboard).await
    }

    /// Send an already validated request.
    pub async fn submit(
        &mut self,
        request: QrRequest,
        dashboard: Option<&mut Dashboard>,
    ) -> Result<QrResult> {
        let saved = self.trigger.begin_loading();
        self.trigger_tx.send_replace(self.trigger.clone());
        tracing::info!(len = request.content().len(), "generating qr code");

        let outcome = self.request(&request).await;
        self.trigger = saved;
        self.trigger_tx.send_replace(self.trigger.clone());

        match outcome {
            Ok(result) => {
                self.result.show(result.clone());
                self.notifications
                    .show("QR Code generated successfully!", Severity::Success)
                    .await;
                if let Some(dashboard) = dashboard {
                    dashboard.insert(&result);
                }
                tracing::info!(id = ?result.id, "qr code generated");
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("generate failed: {}", e);
                self.notifications
                    .show("Error generating QR code", Severity::Error)
                    .await;
                Err(e)
            }
        }
    }

    async fn request(&self, request: &QrRequest) -> Result<QrResult> {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            outcome = tokio::time::timeout(self.timeout, self.backend.generate(request)) => {
                outcome.map_err(|_| {
                    Error::Network(format!("request timed out after {:?}", self.timeout))
                })?
            }
        }
    }
}
