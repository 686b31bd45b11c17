//! Dashboard card manager
//!
//! Cards arrive server-rendered; this controller adds insertion of new
//! results, confirmed deletion, live search filtering and the total counter.

mod card;

use std::time::Duration;

use crate::animation::{CountUp, Transition};
use crate::client::QrBackend;
use crate::notify::{Notifications, Severity};
use crate::protocol::constants::JUST_NOW;
use crate::protocol::{QrCard, QrId, QrResult};
use crate::view::Node;
use crate::Result;

pub use card::{render_card, CardSlot};

const DELETE_PROMPT: &str = "Are you sure you want to delete this QR code?";

/// Yes/no prompt shown before destructive actions
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Outcome of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the prompt; nothing was sent
    Declined,
    /// The backend deleted it and the card, if displayed, was removed
    Deleted { removed: bool },
}

/// Card grid of the dashboard page
#[derive(Debug)]
pub struct Dashboard {
    slots: Vec<CardSlot>,
    /// Value shown by the total counter
    total: usize,
    search: String,
    notifications: Notifications,
    fade_out: Duration,
}

impl Dashboard {
    /// Adopt the server-rendered cards. Later duplicates of an id are
    /// dropped so ids stay unique.
    pub fn new(cards: Vec<QrCard>, notifications: Notifications, fade_out: Duration) -> Self {
        let mut slots: Vec<CardSlot> = Vec::with_capacity(cards.len());
        for card in cards {
            if slots.iter().any(|s| s.card.id == card.id) {
                tracing::debug!(id = %card.id, "dropping duplicate card");
                continue;
            }
            slots.push(CardSlot::new(card));
        }

        let total = slots.len();
        Self {
            slots,
            total,
            search: String::new(),
            notifications,
            fade_out,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Displayed total
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn cards(&self) -> impl Iterator<Item = &QrCard> {
        self.slots.iter().map(|s| &s.card)
    }

    pub fn slot(&self, id: &QrId) -> Option<&CardSlot> {
        self.slots.iter().find(|s| s.card.id == *id)
    }

    /// Ids of cards not hidden by the filter, in display order
    pub fn visible_ids(&self) -> Vec<&QrId> {
        self.slots
            .iter()
            .filter(|s| s.visible)
            .map(|s| &s.card.id)
            .collect()
    }

    /// Count-up animation for the total counter on page load
    pub fn count_up(&self) -> CountUp {
        CountUp::new(self.total as u64)
    }

    /// Recompute the total from the cards present.
    pub fn recount(&mut self) -> usize {
        self.total = self.slots.len();
        self.total
    }

    /// Prepend a card for a freshly generated result.
    ///
    /// Returns false if the result has no id or the id is already shown.
    pub fn insert(&mut self, result: &QrResult) -> bool {
        let Some(card) = QrCard::from_result(result, JUST_NOW) else {
            tracing::debug!("result without id, no card inserted");
            return false;
        };
        if self.slot(&card.id).is_some() {
            tracing::debug!(id = %card.id, "card already displayed");
            return false;
        }

        let mut slot = CardSlot::new(card);
        slot.transition = Some(Transition::CardEnter);
        self.slots.insert(0, slot);
        self.recount();
        true
    }

    /// Confirm, then delete a code.
    ///
    /// On success the card fades out and is removed, and the total is
    /// recomputed. An id with no displayed card is still sent to the
    /// backend; the removal is then a no-op. On failure the card stays.
    pub async fn delete<B: QrBackend>(
        &mut self,
        id: &QrId,
        confirm: &mut impl Confirm,
        backend: &B,
    ) -> Result<DeleteOutcome> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(DeleteOutcome::Declined);
        }

        if let Err(e) = backend.delete(id).await {
            tracing::warn!(%id, "delete failed: {}", e);
            self.notifications
                .show("Error deleting QR code", Severity::Error)
                .await;
            return Err(e);
        }

        let removed = match self.slots.iter_mut().find(|s| s.card.id == *id) {
            Some(slot) => {
                slot.transition = Some(Transition::CardExit);
                tokio::time::sleep(self.fade_out).await;
                self.slots.retain(|s| s.card.id != *id);
                true
            }
            None => false,
        };

        self.notifications
            .show("QR Code deleted successfully", Severity::Success)
            .await;
        self.recount();

        tracing::info!(%id, removed, "qr code deleted");
        Ok(DeleteOutcome::Deleted { removed })
    }

    /// Show only cards whose content or created text contains `term`,
    /// ignoring case. Matching cards replay their entrance animation.
    pub fn filter(&mut self, term: &str) {
        self.search = term.to_string();
        let term = term.to_lowercase();

        for slot in &mut self.slots {
            slot.visible = slot.matches(&term);
            slot.transition = if slot.visible {
                Some(Transition::FilterMatch)
            } else {
                None
            };
        }
    }

    /// The `.qr-grid` element with every card, hidden ones included
    pub fn render(&self) -> Node {
        Node::el("div")
            .class("qr-grid")
            .children(self.slots.iter().map(CardSlot::render))
    }

    /// The total counter
    pub fn render_total(&self) -> Node {
        Node::el("span")
            .class("stat-number")
            .child(Node::text(self.total.to_string()))
    }
}
