//! Hotspot mask rasters and scene loading.
//!
//! A scene is a background picture plus a same-sized mask whose red channel
//! carries the hotspot id of every pixel (0 = background). Scenes load from
//! a configured PNG pair, or fall back to the built-in demo room.

use std::collections::HashMap;
use std::path::Path;

use crate::scene::source::HotspotId;
use crate::theme;

/// Demo scene width in pixels
pub const DEMO_WIDTH: u32 = 640;

/// Demo scene height in pixels
pub const DEMO_HEIGHT: u32 = 400;

/// Id-per-pixel raster describing which hotspot owns each scene pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major hotspot ids, row 0 at the top; 0 = background
    ids: Vec<u8>,
}

impl MaskBuffer {
    /// An all-background mask of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ids: vec![0; (width * height) as usize],
        }
    }

    /// The hotspot id at (x, y); out-of-bounds reads are background.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.ids[(y * self.width + x) as usize]
    }

    /// Write the id of a single pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, id: HotspotId) {
        if x < self.width && y < self.height {
            self.ids[(y * self.width + x) as usize] = id;
        }
    }

    /// Stamp an id over the inclusive rectangle, clipped to the mask.
    pub fn fill_rect(&mut self, id: HotspotId, left: u32, top: u32, right: u32, bottom: u32) {
        for y in top..=bottom.min(self.height.saturating_sub(1)) {
            for x in left..=right.min(self.width.saturating_sub(1)) {
                self.ids[(y * self.width + x) as usize] = id;
            }
        }
    }
}

/// A fully loaded scene ready to become resources and sprites.
pub struct LoadedScene {
    pub mask: MaskBuffer,
    /// Row-major RGBA8 background, same dimensions as the mask
    pub background: Vec<u8>,
    /// Human-readable hotspot names for log output, where known
    pub labels: HashMap<HotspotId, String>,
}

/// Load a scene from a background/mask PNG pair.
///
/// The mask's red channel is the hotspot id. Both images must share
/// dimensions; anything else is an error string for the caller to report
/// before falling back to the demo scene.
pub fn load_scene(background_path: &Path, mask_path: &Path) -> Result<LoadedScene, String> {
    let background = image::open(background_path)
        .map_err(|e| format!("Failed to open background {:?}: {}", background_path, e))?
        .to_rgba8();
    let mask_image = image::open(mask_path)
        .map_err(|e| format!("Failed to open hotspot mask {:?}: {}", mask_path, e))?
        .to_rgba8();

    if background.dimensions() != mask_image.dimensions() {
        return Err(format!(
            "Background is {:?} but hotspot mask is {:?}; the two must match",
            background.dimensions(),
            mask_image.dimensions()
        ));
    }

    let (width, height) = background.dimensions();
    let mut mask = MaskBuffer::new(width, height);
    for (x, y, pixel) in mask_image.enumerate_pixels() {
        if pixel[0] != 0 {
            mask.set(x, y, pixel[0]);
        }
    }

    Ok(LoadedScene {
        mask,
        background: background.into_raw(),
        labels: HashMap::new(),
    })
}

/// Paint an opaque rectangle into a raw RGBA background buffer.
fn paint_rect(
    background: &mut [u8],
    width: u32,
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
    color: [u8; 4],
) {
    for y in top..=bottom {
        for x in left..=right {
            let idx = ((y * width + x) * 4) as usize;
            background[idx..idx + 4].copy_from_slice(&color);
        }
    }
}

/// The built-in demo room: a door, a window, a chest, a rug and a key.
///
/// Shapes are chosen so that mixed mode exercises both outline kinds and the
/// key exercises the minimum-size clamp.
pub fn demo_scene() -> LoadedScene {
    let mut mask = MaskBuffer::new(DEMO_WIDTH, DEMO_HEIGHT);
    let mut background = vec![0u8; (DEMO_WIDTH * DEMO_HEIGHT * 4) as usize];
    let mut labels = HashMap::new();

    // Room: wall above, floor below
    paint_rect(&mut background, DEMO_WIDTH, 0, 0, DEMO_WIDTH - 1, 279, theme::DEMO_WALL);
    paint_rect(
        &mut background,
        DEMO_WIDTH,
        0,
        280,
        DEMO_WIDTH - 1,
        DEMO_HEIGHT - 1,
        theme::DEMO_FLOOR,
    );

    let mut place = |id: HotspotId,
                     name: &str,
                     color: [u8; 4],
                     left: u32,
                     top: u32,
                     right: u32,
                     bottom: u32| {
        paint_rect(&mut background, DEMO_WIDTH, left, top, right, bottom, color);
        mask.fill_rect(id, left, top, right, bottom);
        labels.insert(id, name.to_string());
    };

    // Tall door: elongated, mixed mode gives it a rectangle
    place(1, "door", theme::DEMO_DOOR, 70, 80, 150, 300);
    // Window: squarish, mixed mode gives it a circle
    place(2, "window", theme::DEMO_WINDOW, 420, 70, 540, 170);
    // Chest: squarish
    place(3, "chest", theme::DEMO_CHEST, 250, 270, 330, 330);
    // Rug: wide and flat
    place(4, "rug", theme::DEMO_RUG, 360, 330, 600, 370);
    // Key: tiny, exercises the minimum outline size
    place(5, "key", theme::DEMO_KEY, 200, 346, 206, 352);

    LoadedScene {
        mask,
        background,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mask_is_all_background() {
        let mask = MaskBuffer::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(mask.get(x, y), 0);
            }
        }
    }

    #[test]
    fn test_fill_rect_and_get() {
        let mut mask = MaskBuffer::new(16, 16);
        mask.fill_rect(3, 2, 2, 5, 6);
        assert_eq!(mask.get(2, 2), 3);
        assert_eq!(mask.get(5, 6), 3);
        assert_eq!(mask.get(6, 6), 0);
        assert_eq!(mask.get(2, 7), 0);
    }

    #[test]
    fn test_get_out_of_bounds_is_background() {
        let mask = MaskBuffer::new(4, 4);
        assert_eq!(mask.get(4, 0), 0);
        assert_eq!(mask.get(0, 4), 0);
        assert_eq!(mask.get(100, 100), 0);
    }

    #[test]
    fn test_fill_rect_clips_at_edges() {
        let mut mask = MaskBuffer::new(4, 4);
        mask.fill_rect(1, 2, 2, 10, 10);
        assert_eq!(mask.get(3, 3), 1);
    }

    #[test]
    fn test_demo_scene_dimensions_agree() {
        let scene = demo_scene();
        assert_eq!(scene.mask.width, DEMO_WIDTH);
        assert_eq!(scene.mask.height, DEMO_HEIGHT);
        assert_eq!(
            scene.background.len(),
            (DEMO_WIDTH * DEMO_HEIGHT * 4) as usize
        );
    }

    #[test]
    fn test_demo_scene_contains_every_labeled_hotspot() {
        let scene = demo_scene();
        for &id in scene.labels.keys() {
            let mut found = false;
            'search: for y in 0..scene.mask.height {
                for x in 0..scene.mask.width {
                    if scene.mask.get(x, y) == id {
                        found = true;
                        break 'search;
                    }
                }
            }
            assert!(found, "hotspot {} has no pixels in the demo mask", id);
        }
    }

    #[test]
    fn test_demo_scene_background_is_opaque() {
        let scene = demo_scene();
        assert!(scene.background.chunks_exact(4).all(|px| px[3] == 255));
    }
}
