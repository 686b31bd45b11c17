//! Cosmetic animations: CSS transitions, scroll reveal, stat count-up

use std::time::Duration;

use crate::protocol::constants::{COUNT_UP_DURATION_MS, COUNT_UP_FRAME_MS};

/// CSS animations applied to cards, results and page sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// New dashboard card entering the grid
    CardEnter,
    /// Card matched by a search
    FilterMatch,
    /// Card being deleted
    CardExit,
    /// Section scrolled into view
    Reveal,
}

impl Transition {
    /// Value of the `animation` style property
    pub fn css(&self) -> &'static str {
        match self {
            Transition::CardEnter => "fadeInUp 0.5s ease-out",
            Transition::FilterMatch => "fadeIn 0.3s ease-out",
            Transition::CardExit => "fadeOut 0.3s ease-out",
            Transition::Reveal => "fadeInUp 0.6s ease-out",
        }
    }
}

/// Axis-aligned box in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Margins applied to the viewport before intersecting, CSS order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Tracked {
    id: String,
    rect: Rect,
    revealed: bool,
}

/// Reveals elements once enough of them scrolls into view.
///
/// Observed elements start hidden (opacity 0). An element is revealed the
/// first time its visible fraction reaches the threshold and stays revealed.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    margin: RootMargin,
    tracked: Vec<Tracked>,
}

impl RevealObserver {
    pub fn new(threshold: f64, margin: RootMargin) -> Self {
        Self {
            threshold,
            margin,
            tracked: Vec::new(),
        }
    }

    /// Start observing an element; its rect is relative to the viewport.
    pub fn observe(&mut self, id: impl Into<String>, rect: Rect) {
        self.tracked.push(Tracked {
            id: id.into(),
            rect,
            revealed: false,
        });
    }

    /// Element moved, e.g. after a scroll.
    pub fn update_rect(&mut self, id: &str, rect: Rect) {
        if let Some(t) = self.tracked.iter_mut().find(|t| t.id == id) {
            t.rect = rect;
        }
    }

    /// Scroll by `dy` pixels: every element moves up by that amount.
    pub fn scroll_by(&mut self, dy: f64) {
        for t in &mut self.tracked {
            t.rect.y -= dy;
        }
    }

    /// Evaluate all pending elements against a viewport and return the ids
    /// revealed by this pass.
    pub fn on_viewport(&mut self, width: f64, height: f64) -> Vec<String> {
        let root = Rect::new(
            -self.margin.left,
            -self.margin.top,
            width + self.margin.left + self.margin.right,
            height + self.margin.top + self.margin.bottom,
        );

        let mut revealed = Vec::new();
        for t in self.tracked.iter_mut().filter(|t| !t.revealed) {
            let Some(hit) = t.rect.intersection(&root) else {
                continue;
            };
            let ratio = match t.rect.area() {
                a if a > 0.0 => hit.area() / a,
                _ => 1.0,
            };
            if ratio >= self.threshold {
                t.revealed = true;
                revealed.push(t.id.clone());
            }
        }

        if !revealed.is_empty() {
            tracing::debug!(count = revealed.len(), "revealed elements");
        }
        revealed
    }

    /// Current `opacity` of an observed element
    pub fn opacity(&self, id: &str) -> Option<f32> {
        self.tracked
            .iter()
            .find(|t| t.id == id)
            .map(|t| if t.revealed { 1.0 } else { 0.0 })
    }

    /// Current `animation` of an observed element, if revealed
    pub fn animation(&self, id: &str) -> Option<Transition> {
        self.tracked
            .iter()
            .find(|t| t.id == id && t.revealed)
            .map(|_| Transition::Reveal)
    }
}

impl Default for RevealObserver {
    /// Threshold 0.1, bottom margin -50px
    fn default() -> Self {
        Self::new(
            0.1,
            RootMargin {
                top: 0.0,
                right: 0.0,
                bottom: -50.0,
                left: 0.0,
            },
        )
    }
}

/// Frames of a stat counter counting up from zero to its target
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    step: f64,
    current: f64,
    done: bool,
}

impl CountUp {
    pub fn new(target: u64) -> Self {
        let frames = (COUNT_UP_DURATION_MS / COUNT_UP_FRAME_MS) as f64;
        Self {
            target,
            step: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }

    /// Parse the counter's initial text; leading digits only, as the
    /// server renders e.g. `12` or `12 codes`.
    pub fn from_text(text: &str) -> Option<Self> {
        let digits: String = text
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok().map(Self::new)
    }

    pub fn frame_interval() -> Duration {
        Duration::from_millis(COUNT_UP_FRAME_MS)
    }
}

impl Iterator for CountUp {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        self.current += self.step;
        if self.current >= self.target as f64 {
            self.done = true;
            Some(self.target)
        } else {
            Some(self.current.floor() as u64)
        }
    }
}
