#![forbid(unsafe_code)]

//! Drag-to-resize for a fixed-position side panel.
//!
//! The resizer is driven by three host signals:
//! - press-start on the handle ([`DragResizer::press_start`]),
//! - pointer-move anywhere in the document ([`DragResizer::pointer_move`]),
//! - press-end anywhere in the document ([`DragResizer::press_end`]).
//!
//! Every move recomputes the width from the drag-start reference point, so a
//! dropped or coalesced move cannot desynchronize the final width from the
//! final pointer position. The width is persisted once per completed gesture.

use tracing::{debug, trace};

use crate::config::ResizeConfig;
use crate::prefs::{PreferenceStore, Preferences};

/// Inclusive pixel bounds for a resizable panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthBounds {
    min: u32,
    max: u32,
}

impl WidthBounds {
    /// Bounds with `min <= max`, `None` otherwise.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Option<Self> {
        if min > max {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// Bounds without ordering validation. An inverted pair clamps everything
    /// to `max`.
    #[must_use]
    pub const fn new_unchecked(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn min(self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Clamp an arbitrary signed width into the bounds.
    #[must_use]
    pub fn clamp(self, width: i64) -> u32 {
        let clamped = width.max(i64::from(self.min)).min(i64::from(self.max));
        // In range of u32 by construction.
        u32::try_from(clamped).unwrap_or(self.max)
    }
}

/// State captured between press-start and press-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub start_pointer_x: i32,
    pub start_panel_width: u32,
}

impl DragSession {
    /// Width for a pointer at `pointer_x`, relative to the drag origin.
    #[must_use]
    pub fn width_at(&self, pointer_x: i32, bounds: WidthBounds) -> u32 {
        let delta = i64::from(pointer_x) - i64::from(self.start_pointer_x);
        bounds.clamp(i64::from(self.start_panel_width) + delta)
    }
}

/// Lifecycle phase recorded for one resizer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePhase {
    PressStart,
    PointerMove,
    PressEnd,
}

/// Why an incoming signal left the resizer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeIgnoredReason {
    /// Press-start while a session is already active.
    AlreadyDragging,
    /// Move or press-end with no active session.
    NotDragging,
}

/// What the host should do after an accepted signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEffect {
    /// Enter the drag affordance (cursor, handle highlight) and suppress the
    /// press default action.
    DragStarted { start_width: u32 },
    /// Apply `width` to the panel immediately and re-anchor the handle.
    Preview { width: u32 },
    /// Leave the drag affordance; `width` has been persisted.
    Committed { width: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Applied(ResizeEffect),
    Ignored(ResizeIgnoredReason),
}

/// Result of one resizer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDispatch {
    pub phase: ResizePhase,
    pub outcome: ResizeOutcome,
}

impl ResizeDispatch {
    const fn applied(phase: ResizePhase, effect: ResizeEffect) -> Self {
        Self {
            phase,
            outcome: ResizeOutcome::Applied(effect),
        }
    }

    const fn ignored(phase: ResizePhase, reason: ResizeIgnoredReason) -> Self {
        Self {
            phase,
            outcome: ResizeOutcome::Ignored(reason),
        }
    }

    /// Effect to apply, if the signal was accepted.
    #[must_use]
    pub const fn effect(&self) -> Option<ResizeEffect> {
        match self.outcome {
            ResizeOutcome::Applied(effect) => Some(effect),
            ResizeOutcome::Ignored(_) => None,
        }
    }

    #[must_use]
    pub const fn accepted(&self) -> bool {
        matches!(self.outcome, ResizeOutcome::Applied(_))
    }
}

/// Drag-resize state machine for one panel.
#[derive(Debug, Clone)]
pub struct DragResizer {
    bounds: WidthBounds,
    storage_key: String,
    session: Option<DragSession>,
}

impl DragResizer {
    #[must_use]
    pub fn new(config: &ResizeConfig) -> Self {
        Self {
            bounds: config.bounds(),
            storage_key: config.storage_key.clone(),
            session: None,
        }
    }

    /// Construct only when the viewport is wide enough for drag-resize.
    ///
    /// The check runs once; later viewport changes do not toggle the feature.
    #[must_use]
    pub fn for_viewport(config: &ResizeConfig, viewport_width: u32) -> Option<Self> {
        if !config.enabled_for_viewport(viewport_width) {
            debug!(
                viewport_width,
                breakpoint = config.breakpoint_px,
                "menu resize skipped on narrow viewport"
            );
            return None;
        }
        Some(Self::new(config))
    }

    #[must_use]
    pub const fn bounds(&self) -> WidthBounds {
        self.bounds
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    #[must_use]
    pub const fn session(&self) -> Option<DragSession> {
        self.session
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Persisted width clamped into bounds, `None` when nothing usable is stored.
    ///
    /// `None` means the panel keeps its stylesheet width.
    #[must_use]
    pub fn initial_width<S: PreferenceStore>(&self, prefs: &Preferences<S>) -> Option<u32> {
        let stored = prefs.get_opt::<i64>(&self.storage_key)?;
        let width = self.bounds.clamp(stored);
        debug!(stored, width, "menu resize restored width");
        Some(width)
    }

    /// Press-start on the handle with the panel's current rendered width.
    pub fn press_start(&mut self, pointer_x: i32, rendered_width: u32) -> ResizeDispatch {
        if self.session.is_some() {
            return ResizeDispatch::ignored(
                ResizePhase::PressStart,
                ResizeIgnoredReason::AlreadyDragging,
            );
        }
        self.session = Some(DragSession {
            start_pointer_x: pointer_x,
            start_panel_width: rendered_width,
        });
        debug!(pointer_x, start_width = rendered_width, "menu resize drag started");
        ResizeDispatch::applied(
            ResizePhase::PressStart,
            ResizeEffect::DragStarted {
                start_width: rendered_width,
            },
        )
    }

    /// Pointer-move anywhere in the document.
    pub fn pointer_move(&mut self, pointer_x: i32) -> ResizeDispatch {
        let Some(session) = self.session else {
            return ResizeDispatch::ignored(ResizePhase::PointerMove, ResizeIgnoredReason::NotDragging);
        };
        let width = session.width_at(pointer_x, self.bounds);
        trace!(pointer_x, width, "menu resize preview");
        ResizeDispatch::applied(ResizePhase::PointerMove, ResizeEffect::Preview { width })
    }

    /// Press-end anywhere in the document. Persists the rendered width.
    pub fn press_end<S: PreferenceStore>(
        &mut self,
        rendered_width: u32,
        prefs: &mut Preferences<S>,
    ) -> ResizeDispatch {
        if self.session.take().is_none() {
            return ResizeDispatch::ignored(ResizePhase::PressEnd, ResizeIgnoredReason::NotDragging);
        }
        let width = self.bounds.clamp(i64::from(rendered_width));
        prefs.set(&self.storage_key, &i64::from(width));
        debug!(width, "menu resize drag finished");
        ResizeDispatch::applied(ResizePhase::PressEnd, ResizeEffect::Committed { width })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DragResizer, ResizeEffect, ResizeIgnoredReason, ResizeOutcome, ResizePhase, WidthBounds,
    };
    use crate::config::ResizeConfig;
    use crate::prefs::{MemoryPreferenceStore, Preferences};
    use proptest::prelude::*;

    fn resizer() -> DragResizer {
        DragResizer::new(&ResizeConfig::default())
    }

    fn prefs() -> Preferences<MemoryPreferenceStore> {
        Preferences::new(MemoryPreferenceStore::new())
    }

    fn preview_width(resizer: &mut DragResizer, x: i32) -> u32 {
        match resizer.pointer_move(x).effect() {
            Some(ResizeEffect::Preview { width }) => width,
            other => panic!("expected preview, got {other:?}"),
        }
    }

    #[test]
    fn bounds_reject_inverted_pair() {
        assert!(WidthBounds::new(400, 180).is_none());
        assert!(WidthBounds::new(180, 180).is_some());
    }

    #[test]
    fn inverted_unchecked_bounds_do_not_panic() {
        let bounds = WidthBounds::new_unchecked(400, 180);
        assert_eq!(bounds.clamp(10), 180);
        assert_eq!(bounds.clamp(1_000), 180);
    }

    #[test]
    fn narrow_viewport_skips_construction() {
        let config = ResizeConfig::default();
        assert!(DragResizer::for_viewport(&config, 896).is_none());
        assert!(DragResizer::for_viewport(&config, 1280).is_some());
    }

    #[test]
    fn drag_left_by_fifty_from_240() {
        let mut resizer = resizer();
        let mut prefs = prefs();
        let start = resizer.press_start(300, 240);
        assert_eq!(
            start.effect(),
            Some(ResizeEffect::DragStarted { start_width: 240 })
        );
        assert_eq!(preview_width(&mut resizer, 250), 190);
        let end = resizer.press_end(190, &mut prefs);
        assert_eq!(end.effect(), Some(ResizeEffect::Committed { width: 190 }));
        assert_eq!(prefs.store().raw("menu-width"), Some("190"));
        assert!(!resizer.is_dragging());
    }

    #[test]
    fn moves_are_relative_to_drag_origin_not_cumulative() {
        let mut resizer = resizer();
        resizer.press_start(100, 250);
        assert_eq!(preview_width(&mut resizer, 130), 280);
        assert_eq!(preview_width(&mut resizer, 160), 310);
        // Jumping back must not accumulate earlier deltas.
        assert_eq!(preview_width(&mut resizer, 110), 260);
    }

    #[test]
    fn preview_clamps_far_outside_bounds() {
        let mut resizer = resizer();
        resizer.press_start(500, 300);
        assert_eq!(preview_width(&mut resizer, -10_000), 180);
        assert_eq!(preview_width(&mut resizer, i32::MAX), 400);
        assert_eq!(preview_width(&mut resizer, i32::MIN), 180);
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut resizer = resizer();
        let dispatch = resizer.pointer_move(42);
        assert_eq!(dispatch.phase, ResizePhase::PointerMove);
        assert_eq!(
            dispatch.outcome,
            ResizeOutcome::Ignored(ResizeIgnoredReason::NotDragging)
        );
    }

    #[test]
    fn press_end_without_session_is_noop_and_writes_nothing() {
        let mut resizer = resizer();
        let mut prefs = prefs();
        let dispatch = resizer.press_end(250, &mut prefs);
        assert!(!dispatch.accepted());
        assert!(prefs.store().is_empty());
    }

    #[test]
    fn second_press_start_keeps_original_session() {
        let mut resizer = resizer();
        resizer.press_start(10, 200);
        let dispatch = resizer.press_start(90, 300);
        assert_eq!(
            dispatch.outcome,
            ResizeOutcome::Ignored(ResizeIgnoredReason::AlreadyDragging)
        );
        let session = resizer.session().expect("session kept");
        assert_eq!(session.start_pointer_x, 10);
        assert_eq!(session.start_panel_width, 200);
    }

    #[test]
    fn commit_clamps_out_of_range_rendered_width() {
        let mut resizer = resizer();
        let mut prefs = prefs();
        resizer.press_start(0, 900);
        let dispatch = resizer.press_end(900, &mut prefs);
        assert_eq!(dispatch.effect(), Some(ResizeEffect::Committed { width: 400 }));
        assert_eq!(prefs.store().raw("menu-width"), Some("400"));
    }

    #[test]
    fn initial_width_is_unset_without_preference() {
        let resizer = resizer();
        let prefs = prefs();
        assert_eq!(resizer.initial_width(&prefs), None);
        assert!(prefs.store().is_empty());
    }

    #[test]
    fn initial_width_clamps_stored_values() {
        let resizer = resizer();
        let low = Preferences::new(MemoryPreferenceStore::new().with_raw("menu-width", "-20"));
        let high = Preferences::new(MemoryPreferenceStore::new().with_raw("menu-width", "9000"));
        let ok = Preferences::new(MemoryPreferenceStore::new().with_raw("menu-width", "321"));
        let junk = Preferences::new(MemoryPreferenceStore::new().with_raw("menu-width", "abc"));
        assert_eq!(resizer.initial_width(&low), Some(180));
        assert_eq!(resizer.initial_width(&high), Some(400));
        assert_eq!(resizer.initial_width(&ok), Some(321));
        assert_eq!(resizer.initial_width(&junk), None);
    }

    proptest! {
        #[test]
        fn live_width_always_within_bounds(
            start_x in -5_000i32..5_000,
            start_width in 0u32..2_000,
            moves in prop::collection::vec(any::<i32>(), 1..64),
        ) {
            let mut resizer = resizer();
            resizer.press_start(start_x, start_width);
            for x in moves {
                let width = preview_width(&mut resizer, x);
                prop_assert!((180..=400).contains(&width));
            }
        }

        #[test]
        fn committed_width_matches_final_pointer(
            start_x in -5_000i32..5_000,
            start_width in 180u32..=400,
            moves in prop::collection::vec(-5_000i32..5_000, 1..32),
        ) {
            let mut resizer = resizer();
            let mut prefs = prefs();
            resizer.press_start(start_x, start_width);
            let mut live = start_width;
            for &x in &moves {
                live = preview_width(&mut resizer, x);
            }
            let final_x = *moves.last().expect("non-empty moves");
            let expected = (i64::from(start_width) + i64::from(final_x) - i64::from(start_x))
                .clamp(180, 400);
            let dispatch = resizer.press_end(live, &mut prefs);
            prop_assert_eq!(
                dispatch.effect(),
                Some(ResizeEffect::Committed { width: expected as u32 })
            );
            prop_assert_eq!(prefs.get("menu-width", 0_i64), expected);
        }
    }
}
