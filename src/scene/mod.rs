mod mask;
mod source;

pub use mask::{demo_scene, load_scene, LoadedScene, MaskBuffer};
pub use source::{HotspotId, HotspotSource};

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::PrimaryWindow;

use crate::config::{ConfigLoaded, HintSettings};
use crate::constants::BACKGROUND_Z;
use crate::hints::{HintState, RecomputeHints, ShowHints};

/// The current scene: hotspot raster plus per-hotspot activity flags.
///
/// This is the concrete collaborator the hint scan runs against. Clicking a
/// hotspot toggles it off and on again, standing in for a real game where
/// objects get picked up or unlocked.
#[derive(Resource)]
pub struct HotspotScene {
    mask: MaskBuffer,
    disabled: HashSet<HotspotId>,
    labels: HashMap<HotspotId, String>,
}

impl HotspotScene {
    pub fn new(mask: MaskBuffer, labels: HashMap<HotspotId, String>) -> Self {
        Self {
            mask,
            disabled: HashSet::new(),
            labels,
        }
    }

    /// Flip a hotspot between active and inactive; returns true when the
    /// hotspot is active afterwards.
    pub fn toggle(&mut self, id: HotspotId) -> bool {
        if self.disabled.remove(&id) {
            true
        } else {
            self.disabled.insert(id);
            false
        }
    }

    /// Human-readable name, when the scene knows one.
    pub fn label(&self, id: HotspotId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }
}

impl HotspotSource for HotspotScene {
    fn width(&self) -> u32 {
        self.mask.width
    }

    fn height(&self) -> u32 {
        self.mask.height
    }

    fn hotspot_at(&self, x: u32, y: u32) -> Option<HotspotId> {
        match self.mask.get(x, y) {
            0 => None,
            id => Some(id),
        }
    }

    fn is_active(&self, id: HotspotId) -> bool {
        !self.disabled.contains(&id)
    }
}

/// Marker for the scene background sprite.
#[derive(Component)]
pub struct SceneBackground;

#[derive(Component)]
pub struct SceneCamera;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        SceneCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

/// Wrap a raw RGBA buffer as a GPU texture.
fn rgba_to_image(width: u32, height: u32, data: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

/// Startup system: load the configured scene (or the demo room) and spawn
/// its background sprite.
fn setup_scene(
    mut commands: Commands,
    settings: Res<HintSettings>,
    mut images: ResMut<Assets<Image>>,
) {
    let loaded = match (&settings.background_image, &settings.hotspot_mask) {
        (Some(background), Some(mask)) => match load_scene(background, mask) {
            Ok(scene) => {
                info!("Loaded scene from {:?} + {:?}", background, mask);
                scene
            }
            Err(e) => {
                warn!("{}; falling back to the demo scene", e);
                demo_scene()
            }
        },
        (None, None) => demo_scene(),
        _ => {
            warn!(
                "background_image and hotspot_mask must be configured together; \
                 falling back to the demo scene"
            );
            demo_scene()
        }
    };

    let width = loaded.mask.width;
    let height = loaded.mask.height;
    let handle = images.add(rgba_to_image(width, height, loaded.background));

    commands.spawn((
        Sprite::from_image(handle),
        Transform::from_translation(Vec3::new(0.0, 0.0, BACKGROUND_Z)),
        SceneBackground,
    ));

    commands.insert_resource(HotspotScene::new(loaded.mask, loaded.labels));
    info!("Scene ready: {}x{} pixels", width, height);
}

/// Left-clicking a hotspot toggles it, the way picking an object up would.
/// If hints are on screen, ask for a recompute so the overlay stays honest.
fn handle_hotspot_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    mut scene: ResMut<HotspotScene>,
    state: Res<HintState>,
    mut recompute: MessageWriter<RecomputeHints>,
    mut show: MessageWriter<ShowHints>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };

    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_pos) else {
        return;
    };

    // The background sprite is centered at the origin; convert the world
    // position to scene pixels (y down)
    let width = scene.width() as f32;
    let height = scene.height() as f32;
    let x = world_pos.x + width / 2.0;
    let y = height / 2.0 - world_pos.y;
    if x < 0.0 || y < 0.0 || x >= width || y >= height {
        return;
    }

    let Some(id) = scene.hotspot_at(x as u32, y as u32) else {
        return;
    };

    let active = scene.toggle(id);
    match scene.label(id) {
        Some(name) => info!(
            "Hotspot '{}' is now {}",
            name,
            if active { "active" } else { "inactive" }
        ),
        None => info!(
            "Hotspot {} is now {}",
            id,
            if active { "active" } else { "inactive" }
        ),
    }

    if state.is_visible() {
        recompute.write(RecomputeHints);
        show.write(ShowHints);
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (spawn_camera, setup_scene.after(ConfigLoaded)),
        )
        .add_systems(
            Update,
            handle_hotspot_click.before(crate::hints::HintUpdateSet),
        );
    }
}
