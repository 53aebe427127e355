//! Overlay systems: request messages in, sprite lifecycle out.
//!
//! The state machine itself lives in `state.rs`; the systems here translate
//! request messages into state transitions and reconcile the actual overlay
//! sprite with what the state says should be on screen.

use bevy::prelude::*;

use crate::config::HintSettings;
use crate::constants::OVERLAY_Z;
use crate::hints::compose::{compose, resolve_outline_color, ComposeOptions};
use crate::hints::state::HintState;
use crate::scene::HotspotScene;

/// Request: rescan the scene and rebuild the composed overlay image.
#[derive(Message)]
pub struct RecomputeHints;

/// Request: display the composed overlay image.
#[derive(Message)]
pub struct ShowHints;

/// Request: retire the overlay, keeping the composed image.
#[derive(Message)]
pub struct HideHints;

/// Request: turn the highlight master switch on.
#[derive(Message)]
pub struct EnableHints;

/// Request: turn the master switch off and hide any overlay.
#[derive(Message)]
pub struct DisableHints;

/// Notification: an overlay just appeared on screen.
#[derive(Message)]
pub struct HintsShown;

/// Notification: the overlay just left the screen.
#[derive(Message)]
pub struct HintsHidden;

/// Marker for the live overlay sprite, stamped with the revision of the
/// composed canvas it was built from.
#[derive(Component)]
pub struct HintOverlay {
    pub revision: u64,
}

fn compose_options(settings: &HintSettings) -> ComposeOptions {
    ComposeOptions {
        max_hotspots: settings.max_hotspots,
        mode: settings.mode,
        ratio_threshold: settings.ratio_threshold,
        min_size: settings.min_shape_size,
        border_width: settings.border_width,
        color: resolve_outline_color(settings.border_color, settings.random_border_color),
        sampling: settings.sampling,
    }
}

/// Run one full highlight pass and install the result.
///
/// Collapses however many requests arrived this tick into a single pass;
/// every pass is a complete replacement of the previous image.
pub fn recompute_hints_system(
    mut events: MessageReader<RecomputeHints>,
    scene: Res<HotspotScene>,
    settings: Res<HintSettings>,
    mut state: ResMut<HintState>,
) {
    if events.read().last().is_none() {
        return;
    }

    let opts = compose_options(&settings);
    let canvas = compose(&*scene, &opts);
    if canvas.is_blank() {
        debug!("No active hotspots to highlight");
    }
    state.install(canvas);
    debug!("Recomputed hint overlay (revision {})", state.revision());
}

pub fn show_hints_system(mut events: MessageReader<ShowHints>, mut state: ResMut<HintState>) {
    if events.read().last().is_some() && !state.show() {
        debug!(
            "Show request ignored (phase {:?}, enabled {})",
            state.phase(),
            state.is_enabled()
        );
    }
}

pub fn hide_hints_system(mut events: MessageReader<HideHints>, mut state: ResMut<HintState>) {
    if events.read().last().is_some() {
        state.hide();
    }
}

pub fn enable_hints_system(mut events: MessageReader<EnableHints>, mut state: ResMut<HintState>) {
    if events.read().last().is_some() {
        state.enable();
        info!("Hints enabled");
    }
}

pub fn disable_hints_system(mut events: MessageReader<DisableHints>, mut state: ResMut<HintState>) {
    if events.read().last().is_some() {
        state.disable();
        info!("Hints disabled");
    }
}

/// Reconcile the overlay sprite with the hint state.
///
/// Whatever sequence of requests ran this tick, afterwards there is at most
/// one overlay entity: stale revisions and surplus sprites are despawned
/// before a fresh one is spawned. Retiring a missing overlay is a no-op, so
/// repeated hides are safe. Emits the shown/hidden notifications on actual
/// on-screen transitions only.
pub fn sync_overlay_system(
    mut commands: Commands,
    state: Res<HintState>,
    mut images: ResMut<Assets<Image>>,
    existing: Query<(Entity, &HintOverlay)>,
    mut shown: MessageWriter<HintsShown>,
    mut hidden: MessageWriter<HintsHidden>,
) {
    let had_overlay = !existing.is_empty();

    if !state.is_visible() {
        for (entity, _) in existing.iter() {
            commands.entity(entity).despawn();
        }
        if had_overlay {
            hidden.write(HintsHidden);
        }
        return;
    }

    let revision = state.revision();
    let mut current_alive = false;
    for (entity, overlay) in existing.iter() {
        if overlay.revision == revision && !current_alive {
            current_alive = true;
        } else {
            commands.entity(entity).despawn();
        }
    }

    if !current_alive
        && let Some(canvas) = state.canvas()
    {
        let handle = images.add(canvas.to_image());
        commands.spawn((
            Sprite::from_image(handle),
            Transform::from_translation(Vec3::new(0.0, 0.0, OVERLAY_Z)),
            HintOverlay { revision },
        ));
        if !had_overlay {
            shown.write(HintsShown);
        }
    }
}
