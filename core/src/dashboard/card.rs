//! Card view

use crate::animation::Transition;
use crate::protocol::QrCard;
use crate::view::Node;

/// A card as displayed in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSlot {
    pub card: QrCard,
    /// False when hidden by the search filter
    pub visible: bool,
    /// Animation currently applied to the card
    pub transition: Option<Transition>,
}

impl CardSlot {
    pub fn new(card: QrCard) -> Self {
        Self {
            card,
            visible: true,
            transition: None,
        }
    }

    /// Case-insensitive match of a lowercased term against the content and
    /// created text.
    pub(crate) fn matches(&self, term: &str) -> bool {
        self.card.content.to_lowercase().contains(term)
            || self.card.created.to_lowercase().contains(term)
    }

    pub fn render(&self) -> Node {
        let style = if !self.visible {
            Some("display: none".to_string())
        } else {
            self.transition.map(|t| format!("animation: {}", t.css()))
        };

        let node = render_card(&self.card);
        match style {
            Some(style) => node.attr("style", style),
            None => node,
        }
    }
}

/// Render a card; actions are wired by data attributes, never inline code.
pub fn render_card(card: &QrCard) -> Node {
    let id = card.id.to_string();

    let actions = Node::el("div")
        .class("qr-actions mt-3")
        .child(
            Node::el("button")
                .class("btn btn-outline-primary btn-sm copy-content-btn")
                .attr("data-content", card.content.clone())
                .child(Node::icon("bi-clipboard")),
        )
        .child(
            Node::el("button")
                .class("btn btn-outline-success btn-sm download-qr-btn")
                .attr("data-qr-id", id.clone())
                .child(Node::icon("bi-download")),
        )
        .child(
            Node::el("button")
                .class("btn btn-outline-danger btn-sm delete-qr-btn")
                .attr("data-qr-id", id.clone())
                .child(Node::icon("bi-trash")),
        );

    Node::el("div")
        .class("qr-card")
        .attr("data-qr-id", id)
        .child(
            Node::el("img")
                .attr("src", card.image.data_url())
                .attr("alt", "QR Code")
                .class("qr-image"),
        )
        .child(
            Node::el("div")
                .class("qr-content")
                .child(
                    Node::el("p")
                        .class("qr-text")
                        .child(Node::text(card.content.clone())),
                )
                .child(
                    Node::el("small")
                        .class("text-muted qr-created")
                        .child(Node::text(card.created.clone())),
                )
                .child(actions),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{QrId, QrImage};

    fn card(content: &str) -> QrCard {
        QrCard {
            id: QrId::new("9"),
            content: content.to_string(),
            image: QrImage::from_base64("AQID").unwrap(),
            created: "Just now".to_string(),
        }
    }

    #[test]
    fn test_card_structure() {
        let node = render_card(&card("https://example.com"));

        assert_eq!(node.get_attr("data-qr-id"), Some("9"));
        assert_eq!(
            node.find_class("qr-text").unwrap().text_content(),
            "https://example.com"
        );
        assert_eq!(node.find_class("qr-created").unwrap().text_content(), "Just now");
        assert_eq!(
            node.find_class("qr-image").unwrap().get_attr("src"),
            Some("data:image/png;base64,AQID")
        );
        assert_eq!(
            node.find_class("delete-qr-btn").unwrap().get_attr("data-qr-id"),
            Some("9")
        );
    }

    #[test]
    fn test_card_content_cannot_inject() {
        let html = render_card(&card(r#""><img src=x onerror=alert(1)>"#)).to_html();
        assert_eq!(html.matches("<img").count(), 1);
        assert!(!html.contains("onerror=alert(1)>"));
    }

    #[test]
    fn test_slot_style() {
        let mut slot = CardSlot::new(card("a"));
        assert_eq!(slot.render().get_attr("style"), None);

        slot.transition = Some(Transition::CardEnter);
        assert_eq!(
            slot.render().get_attr("style"),
            Some("animation: fadeInUp 0.5s ease-out")
        );

        slot.visible = false;
        assert_eq!(slot.render().get_attr("style"), Some("display: none"));
    }
}
