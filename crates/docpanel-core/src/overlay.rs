//! Single dismissable modal overlay (the contact dialog).
//!
//! Opening locks page scroll and remembers the scroll container's previous
//! overflow value; closing restores exactly that value.

use tracing::trace;

/// Overflow value written to the scroll container while the overlay is open.
pub const SCROLL_LOCK_OVERFLOW: &str = "hidden";

const ESCAPE_KEY: &str = "Escape";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    /// Click on the dimming area around the content box.
    OutsideClick,
    Escape,
}

/// Where a click inside the overlay element landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    Dimming,
    Content,
    CloseButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEffect {
    /// Show the overlay and set the scroll container's overflow to
    /// [`SCROLL_LOCK_OVERFLOW`].
    Opened,
    /// Hide the overlay and put `restore_overflow` back on the scroll container.
    Closed {
        reason: DismissReason,
        restore_overflow: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DismissableOverlay {
    state: OverlayState,
    saved_overflow: Option<String>,
}

impl DismissableOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> OverlayState {
        self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open)
    }

    /// Trigger click. `current_overflow` is the scroll container's inline
    /// overflow right now. Re-opening an open overlay does nothing.
    pub fn open(&mut self, current_overflow: &str) -> Option<OverlayEffect> {
        if self.is_open() {
            return None;
        }
        self.state = OverlayState::Open;
        self.saved_overflow = Some(current_overflow.to_owned());
        trace!(saved_overflow = current_overflow, "overlay opened");
        Some(OverlayEffect::Opened)
    }

    /// Close for `reason`. Closing a closed overlay does nothing.
    pub fn close(&mut self, reason: DismissReason) -> Option<OverlayEffect> {
        if !self.is_open() {
            return None;
        }
        self.state = OverlayState::Closed;
        let restore_overflow = self.saved_overflow.take().unwrap_or_default();
        trace!(?reason, "overlay closed");
        Some(OverlayEffect::Closed {
            reason,
            restore_overflow,
        })
    }

    /// Document-level key press. Only Escape while open has an effect.
    pub fn key_down(&mut self, key: &str) -> Option<OverlayEffect> {
        if key != ESCAPE_KEY {
            return None;
        }
        self.close(DismissReason::Escape)
    }

    pub fn click(&mut self, target: OverlayClick) -> Option<OverlayEffect> {
        match target {
            OverlayClick::Dimming => self.close(DismissReason::OutsideClick),
            OverlayClick::CloseButton => self.close(DismissReason::CloseButton),
            OverlayClick::Content => None,
        }
    }
}
