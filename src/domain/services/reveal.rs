use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Idle,
    Advancing,
}

/// Paces how much of an already aggregated list is shown.
///
/// A scroll trigger raises the target by one page; each animation frame then
/// reveals at most one batch until the target is met. The controller never
/// touches the list itself, it only tracks a window length.
#[derive(Debug, Clone)]
pub struct RevealController {
    page_size: usize,
    batch_size: usize,
    window: usize,
    target: usize,
    total: usize,
    state: RevealState,
}

impl RevealController {
    /// Neither `page_size` nor `batch_size` is ever zero; `batch_size` is also
    /// capped at `prefetch_limit`.
    pub fn new(page_size: usize, batch_size: usize, prefetch_limit: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            batch_size: batch_size.min(prefetch_limit).max(1),
            window: page_size,
            target: page_size,
            total: 0,
            state: RevealState::Idle,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn visible_count(&self) -> usize {
        self.window.min(self.total)
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.visible_count() >= self.total
    }

    /// Adopts a new list length. A shorter list pulls the window down with it.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.window = self.window.max(self.page_size).min(total);
        self.target = self.target.max(self.window).min(total);
        if self.window >= self.target {
            self.state = RevealState::Idle;
        }
    }

    /// Scroll reached the end of the visible window.
    pub fn trigger(&mut self) -> RevealState {
        if self.window < self.total {
            self.target = (self.target.max(self.window) + self.page_size).min(self.total);
            self.state = RevealState::Advancing;
        }
        self.state
    }

    /// One animation frame. Returns true while more frames are needed.
    pub fn tick(&mut self) -> bool {
        if self.state != RevealState::Advancing {
            return false;
        }

        self.window = (self.window + self.batch_size).min(self.target);
        if self.window >= self.target {
            self.state = RevealState::Idle;
        }
        self.state == RevealState::Advancing
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count().min(items.len())]
    }

    /// Back to a single page, e.g. when the view is entered again.
    pub fn reset(&mut self) {
        self.window = self.page_size.min(self.total);
        self.target = self.window;
        self.state = RevealState::Idle;
    }
}
