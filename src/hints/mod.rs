pub mod bounds;
pub mod canvas;
pub mod compose;
mod input;
mod overlay;
mod shape;
mod state;

pub use bounds::{scan_bounds, HotspotBounds, SamplingMode};
pub use canvas::{draw_circle_outline, draw_rect_outline, OverlayCanvas};
pub use compose::{compose, resolve_outline_color, ComposeOptions};
pub use overlay::{
    DisableHints, EnableHints, HideHints, HintOverlay, HintsHidden, HintsShown, RecomputeHints,
    ShowHints,
};
pub use shape::{select_shape, HintShape, ShapeMode};
pub use state::{HintPhase, HintState};

use bevy::prelude::*;

/// All per-tick hint systems run inside this set, in a fixed order:
/// trigger poll, state transitions (recompute before show/hide), overlay
/// reconciliation, pause hook. Embedding systems that write hint request
/// messages should schedule themselves before it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HintUpdateSet;

pub struct HintsPlugin;

impl Plugin for HintsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HintState>()
            .add_message::<RecomputeHints>()
            .add_message::<ShowHints>()
            .add_message::<HideHints>()
            .add_message::<EnableHints>()
            .add_message::<DisableHints>()
            .add_message::<HintsShown>()
            .add_message::<HintsHidden>()
            .add_systems(
                Update,
                (
                    input::poll_activation_key,
                    input::poll_master_switch_key,
                    overlay::enable_hints_system.run_if(on_message::<EnableHints>),
                    overlay::disable_hints_system.run_if(on_message::<DisableHints>),
                    overlay::recompute_hints_system.run_if(on_message::<RecomputeHints>),
                    overlay::show_hints_system.run_if(on_message::<ShowHints>),
                    overlay::hide_hints_system.run_if(on_message::<HideHints>),
                    overlay::sync_overlay_system,
                    input::pause_while_shown,
                )
                    .chain()
                    .in_set(HintUpdateSet),
            );
    }
}
