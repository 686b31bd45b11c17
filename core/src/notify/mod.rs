//! Transient notification banners
//!
//! Notifications stack without limit or de-duplication. Each one expires on
//! its own timer unless it is dismissed first; removal is idempotent so a
//! timer firing after a manual dismissal does nothing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::view::Node;

/// Severity of a notification, mapped to a Bootstrap alert class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Alert class suffix; Bootstrap spells errors `danger`
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Info => "alert-info",
            Severity::Warning => "alert-warning",
            Severity::Error => "alert-danger",
        }
    }
}

pub type NotificationId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Dismissible banner pinned to the top right corner
    pub fn render(&self) -> Node {
        Node::el("div")
            .class("alert")
            .class(self.severity.css_class())
            .class("alert-dismissible fade show position-fixed")
            .attr("role", "alert")
            .attr("data-notification-id", self.id.to_string())
            .attr("style", "top: 20px; right: 20px; z-index: 9999; min-width: 300px;")
            .child(Node::text(self.message.clone()))
            .child(
                Node::el("button")
                    .attr("type", "button")
                    .class("btn-close")
                    .attr("data-bs-dismiss", "alert"),
            )
    }
}

/// Handle to the notification stack of one view.
///
/// Cloning shares the stack; expiry timers hold a clone.
#[derive(Debug, Clone)]
pub struct Notifications {
    active: Arc<RwLock<Vec<Notification>>>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            active: Arc::new(RwLock::new(Vec::new())),
            ttl,
        }
    }

    /// Display a notification and schedule its expiry.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn show(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
        };
        let id = notification.id;

        match severity {
            Severity::Error => tracing::warn!(%id, "notify: {}", notification.message),
            Severity::Warning => tracing::info!(%id, "notify: {}", notification.message),
            Severity::Success | Severity::Info => {
                tracing::debug!(%id, "notify: {}", notification.message)
            }
        }

        self.active.write().await.push(notification);

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.ttl).await;
            if this.dismiss(id).await {
                tracing::debug!(%id, "notification expired");
            }
        });

        id
    }

    /// Remove a notification. Returns false if it was already gone.
    pub async fn dismiss(&self, id: NotificationId) -> bool {
        let mut active = self.active.write().await;
        match active.iter().position(|n| n.id == id) {
            Some(index) => {
                active.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the visible notifications, oldest first.
    pub async fn active(&self) -> Vec<Notification> {
        self.active.read().await.clone()
    }

    /// All visible banners, oldest first.
    pub async fn render(&self) -> Vec<Node> {
        self.active.read().await.iter().map(Notification::render).collect()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::protocol::constants::NOTIFICATION_TTL_MS,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_stack_without_dedup() {
        let notes = Notifications::default();
        notes.show("Saved", Severity::Success).await;
        notes.show("Saved", Severity::Success).await;
        notes.show("Oops", Severity::Error).await;

        let active = notes.active().await;
        assert_eq!(active.len(), 3);
        assert_eq!(active[0].message, "Saved");
        assert_eq!(active[2].severity, Severity::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_ttl() {
        let notes = Notifications::new(Duration::from_secs(5));
        notes.show("hello", Severity::Info).await;

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(notes.active().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(notes.active().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss_is_idempotent() {
        let notes = Notifications::new(Duration::from_secs(5));
        let first = notes.show("first", Severity::Info).await;
        notes.show("second", Severity::Info).await;

        assert!(notes.dismiss(first).await);
        assert!(!notes.dismiss(first).await);

        // the expiry timer of `first` must not touch `second`
        tokio::time::sleep(Duration::from_millis(4_000)).await;
        assert_eq!(notes.active().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        assert!(notes.active().await.is_empty());
    }

    #[test]
    fn test_render_banner() {
        let note = Notification {
            id: Uuid::nil(),
            message: "<b>done</b>".to_string(),
            severity: Severity::Error,
        };
        let html = note.render().to_html();

        assert!(html.contains("alert alert-danger alert-dismissible fade show position-fixed"));
        assert!(html.contains("&lt;b&gt;done&lt;/b&gt;"));
        assert!(html.contains(r#"class="btn-close""#));
    }
}
