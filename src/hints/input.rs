//! Built-in trigger glue: key polling and the pause hook.
//!
//! Everything here is thin and optional. With `custom_input_handling` set
//! the key polls step aside entirely and the embedding layer writes the
//! request messages itself; the pause hook only listens to the shown/hidden
//! notifications and never reaches into the hint core.

use bevy::prelude::*;

use crate::config::HintSettings;
use crate::hints::overlay::{
    DisableHints, EnableHints, HideHints, HintsHidden, HintsShown, RecomputeHints, ShowHints,
};
use crate::hints::state::HintState;

/// Poll the activation key once per tick.
///
/// Press: one recompute followed by one show. Release: one hide. At most
/// one of the two branches fires per tick, keeping the per-tick ordering
/// guarantee trivially true.
pub fn poll_activation_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<HintSettings>,
    mut recompute: MessageWriter<RecomputeHints>,
    mut show: MessageWriter<ShowHints>,
    mut hide: MessageWriter<HideHints>,
) {
    if settings.custom_input_handling {
        return;
    }

    if keyboard.just_pressed(settings.activation_key) {
        recompute.write(RecomputeHints);
        show.write(ShowHints);
    } else if keyboard.just_released(settings.activation_key) {
        hide.write(HideHints);
    }
}

/// F2 flips the highlight master switch.
///
/// While the switch is off, holding the activation key still recomputes but
/// nothing reaches the screen; the composed image survives for the moment
/// the switch comes back on.
pub fn poll_master_switch_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<HintSettings>,
    state: Res<HintState>,
    mut enable: MessageWriter<EnableHints>,
    mut disable: MessageWriter<DisableHints>,
) {
    if settings.custom_input_handling {
        return;
    }

    if keyboard.just_pressed(KeyCode::F2) {
        if state.is_enabled() {
            disable.write(DisableHints);
        } else {
            enable.write(EnableHints);
        }
    }
}

/// Freeze the scene clock while hints are on screen.
pub fn pause_while_shown(
    settings: Res<HintSettings>,
    mut shown: MessageReader<HintsShown>,
    mut hidden: MessageReader<HintsHidden>,
    mut time: ResMut<Time<Virtual>>,
) {
    if !settings.pause_while_shown {
        shown.clear();
        hidden.clear();
        return;
    }

    if shown.read().last().is_some() {
        time.pause();
        debug!("Scene clock paused while hints are shown");
    }
    if hidden.read().last().is_some() {
        time.unpause();
        debug!("Scene clock resumed");
    }
}
