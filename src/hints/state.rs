//! Lifecycle state for the hint overlay.
//!
//! Pure state machine, no ECS: the systems in `overlay.rs` drive it and a
//! reconciliation pass maps `(visible, revision)` onto the actual sprite
//! entity. Keeping it plain makes every transition unit-testable.

use bevy::prelude::*;

use crate::hints::canvas::OverlayCanvas;

/// Where the overlay lifecycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintPhase {
    /// No composed canvas exists yet
    Empty,
    /// A canvas is ready but not displayed (never shown, or hidden again)
    Ready,
    /// The canvas is displayed as the active overlay
    Shown,
}

/// Process-wide hint state, owned by the app as a resource.
///
/// Only the overlay systems mutate this; everything else observes.
#[derive(Resource, Debug)]
pub struct HintState {
    composed: Option<OverlayCanvas>,
    /// Highlighting master switch; while off, show requests are suppressed
    /// but any composed canvas is retained
    enabled: bool,
    visible: bool,
    /// Bumped on every recompute so the display layer can tell a stale
    /// overlay sprite from a current one
    revision: u64,
}

impl Default for HintState {
    fn default() -> Self {
        Self::new()
    }
}

impl HintState {
    /// Initial state: enabled, nothing composed, nothing shown.
    pub fn new() -> Self {
        Self {
            composed: None,
            enabled: true,
            visible: false,
            revision: 0,
        }
    }

    pub fn phase(&self) -> HintPhase {
        match (&self.composed, self.visible) {
            (None, _) => HintPhase::Empty,
            (Some(_), false) => HintPhase::Ready,
            (Some(_), true) => HintPhase::Shown,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible && self.composed.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn canvas(&self) -> Option<&OverlayCanvas> {
        self.composed.as_ref()
    }

    /// Install a freshly composed canvas, discarding the previous one.
    ///
    /// Safe to call repeatedly; each call is a complete replacement. The
    /// machine lands in the computed-but-not-shown phase either way, so a
    /// caller that wants the fresh image on screen issues a show in the
    /// same tick.
    pub fn install(&mut self, canvas: OverlayCanvas) {
        self.composed = Some(canvas);
        self.visible = false;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Request display of the composed canvas.
    ///
    /// No-op while nothing is composed, and while the master switch is off
    /// (the canvas is kept either way). Returns true when the overlay is
    /// visible afterwards.
    pub fn show(&mut self) -> bool {
        if self.composed.is_none() || !self.enabled {
            return false;
        }
        self.visible = true;
        true
    }

    /// Retire the overlay but keep the canvas for a later `show`.
    /// Idempotent - hiding twice is a no-op both times.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Turn the master switch on.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Turn the master switch off and force-hide the overlay.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.visible = false;
    }
}
