//! One controller per view
//!
//! Each page owns its component state (generator, dashboard, notification
//! stack) and hands references to the handlers; nothing is looked up from
//! ambient globals.

use std::path::PathBuf;

use crate::client::{self, CancelHandle, Generator, QrBackend};
use crate::clipboard::ClipboardSink;
use crate::dashboard::{Confirm, Dashboard, DeleteOutcome};
use crate::notify::Notifications;
use crate::protocol::{QrCard, QrId, QrResult};
use crate::view::Node;
use crate::{Config, Error, Result};

/// Home page: generate form and result area
pub struct GeneratorPage<B> {
    generator: Generator<B>,
    notifications: Notifications,
    config: Config,
}

impl<B: QrBackend> GeneratorPage<B> {
    pub fn new(backend: B, config: Config) -> Self {
        let notifications = Notifications::new(config.notification_ttl);
        Self {
            generator: Generator::new(backend, notifications.clone(), config.request_timeout),
            notifications,
            config,
        }
    }

    pub fn generator(&self) -> &Generator<B> {
        &self.generator
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.generator.cancel_handle()
    }

    /// Click on the generate button or Enter in the content field.
    pub async fn generate(&mut self, input: &str) -> Result<QrResult> {
        self.generator.generate(input, None).await
    }

    /// Download action of the result card.
    pub async fn download(&self) -> Result<PathBuf> {
        let result = self
            .generator
            .result_area()
            .result()
            .ok_or_else(|| Error::Validation("no QR code generated yet".to_string()))?;
        client::download(&result.image, &self.config.download_dir, &self.notifications).await
    }

    /// Copy action of the result card.
    pub async fn copy_content(&self, clipboard: &mut impl ClipboardSink) -> Result<()> {
        let result = self
            .generator
            .result_area()
            .result()
            .ok_or_else(|| Error::Validation("no QR code generated yet".to_string()))?;
        client::copy_content(&result.content, clipboard, &self.notifications).await
    }

    pub async fn render(&self) -> Node {
        Node::el("main")
            .child(self.generator.trigger().render())
            .children(self.generator.result_area().render())
            .children(self.notifications.render().await)
    }
}

/// Dashboard page: generate form plus the card grid
pub struct DashboardPage<B> {
    generator: Generator<B>,
    dashboard: Dashboard,
    notifications: Notifications,
    config: Config,
}

impl<B: QrBackend> DashboardPage<B> {
    /// Build the page around the server-rendered cards.
    pub fn new(backend: B, cards: Vec<QrCard>, config: Config) -> Self {
        let notifications = Notifications::new(config.notification_ttl);
        Self {
            generator: Generator::new(backend, notifications.clone(), config.request_timeout),
            dashboard: Dashboard::new(cards, notifications.clone(), config.fade_out),
            notifications,
            config,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn generator(&self) -> &Generator<B> {
        &self.generator
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.generator.cancel_handle()
    }

    /// Generate and insert the new card at the front of the grid.
    pub async fn generate(&mut self, input: &str) -> Result<QrResult> {
        self.generator.generate(input, Some(&mut self.dashboard)).await
    }

    pub async fn delete(&mut self, id: &QrId, confirm: &mut impl Confirm) -> Result<DeleteOutcome> {
        self.dashboard
            .delete(id, confirm, self.generator.backend())
            .await
    }

    /// Keystroke in the search box.
    pub fn filter(&mut self, term: &str) {
        self.dashboard.filter(term);
    }

    /// Download action of a card.
    pub async fn download(&self, id: &QrId) -> Result<PathBuf> {
        let slot = self
            .dashboard
            .slot(id)
            .ok_or_else(|| Error::Validation(format!("no card with id {}", id)))?;
        client::download(&slot.card.image, &self.config.download_dir, &self.notifications).await
    }

    /// Copy action of a card.
    pub async fn copy_content(&self, id: &QrId, clipboard: &mut impl ClipboardSink) -> Result<()> {
        let slot = self
            .dashboard
            .slot(id)
            .ok_or_else(|| Error::Validation(format!("no card with id {}", id)))?;
        client::copy_content(&slot.card.content, clipboard, &self.notifications).await
    }

    pub async fn render(&self) -> Node {
        Node::el("main")
            .child(self.dashboard.render_total())
            .child(self.generator.trigger().render())
            .children(self.generator.result_area().render())
            .child(self.dashboard.render())
            .children(self.notifications.render().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LocalBackend;
    use crate::notify::Severity;
    use crate::protocol::QrImage;
    use std::time::Duration;

    fn config(dir: &std::path::Path) -> Config {
        Config {
            fade_out: Duration::ZERO,
            download_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    fn card(id: &str, content: &str) -> QrCard {
        QrCard {
            id: QrId::new(id),
            content: content.to_string(),
            image: QrImage::from_bytes(vec![1, 2, 3]).unwrap(),
            created: "Oct 01, 2026".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generator_page_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = GeneratorPage::new(LocalBackend::default(), config(dir.path()));

        assert!(matches!(page.download().await, Err(Error::Validation(_))));

        page.generate("https://example.com").await.unwrap();
        let path = page.download().await.unwrap();
        assert!(path.exists());

        let html = page.render().await.to_html();
        assert!(html.contains("qr-result-card"));
        assert!(html.contains("QR Code generated successfully!"));
        assert!(html.contains("QR Code downloaded successfully!"));
    }

    #[tokio::test]
    async fn test_dashboard_page_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = DashboardPage::new(
            LocalBackend::default(),
            vec![card("1", "first"), card("2", "second")],
            config(dir.path()),
        );

        let result = page.generate("third").await.unwrap();
        let new_id = result.id.unwrap();
        assert_eq!(page.dashboard().len(), 3);
        assert_eq!(page.dashboard().cards().next().unwrap().id, new_id);

        page.filter("SEC");
        assert_eq!(page.dashboard().visible_ids(), vec![&QrId::new("2")]);
        page.filter("");

        let outcome = page.delete(&QrId::new("1"), &mut |_: &str| true).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted { removed: true });
        assert_eq!(page.dashboard().total(), 2);

        let html = page.render().await.to_html();
        assert!(html.contains(r#"<span class="stat-number">2</span>"#));
        assert!(!html.contains(r#"data-qr-id="1""#));
    }

    #[tokio::test]
    async fn test_dashboard_card_actions() {
        let dir = tempfile::tempdir().unwrap();
        let page = DashboardPage::new(
            LocalBackend::default(),
            vec![card("1", "first")],
            config(dir.path()),
        );

        let path = page.download(&QrId::new("1")).await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);

        assert!(matches!(
            page.download(&QrId::new("9")).await,
            Err(Error::Validation(_))
        ));
        let active = page.notifications().active().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_generator_page_copy_content() {
        struct Memory(Option<String>);

        impl ClipboardSink for Memory {
            fn set_text(&mut self, text: &str) -> Result<()> {
                self.0 = Some(text.to_string());
                Ok(())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let mut page = GeneratorPage::new(LocalBackend::default(), config(dir.path()));
        let mut clipboard = Memory(None);

        assert!(page.copy_content(&mut clipboard).await.is_err());

        page.generate("  wifi:secret  ").await.unwrap();
        page.copy_content(&mut clipboard).await.unwrap();
        assert_eq!(clipboard.0.as_deref(), Some("wifi:secret"));
    }
}
