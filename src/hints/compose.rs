//! One full highlight pass: scan, select, draw.

use rand::Rng;

use crate::hints::bounds::{scan_bounds, SamplingMode};
use crate::hints::canvas::{draw_circle_outline, draw_rect_outline, OverlayCanvas};
use crate::hints::shape::{select_shape, HintShape, ShapeMode};
use crate::scene::HotspotSource;

/// Everything a single highlight pass needs to know.
///
/// Derived from the validated settings once per recompute, with the outline
/// color already resolved (the random-color option picks a fresh one each
/// pass).
#[derive(Debug, Clone, Copy)]
pub struct ComposeOptions {
    pub max_hotspots: usize,
    pub mode: ShapeMode,
    pub ratio_threshold: f32,
    pub min_size: u32,
    pub border_width: u32,
    pub color: [u8; 4],
    pub sampling: SamplingMode,
}

/// Run one full highlight pass over the scene.
///
/// Scans every hotspot, then draws the selected outline for each box the
/// scan actually observed into one scene-sized canvas. Hotspots the scan
/// never saw are skipped entirely. The returned canvas replaces any previous
/// one - every pass starts from transparent.
pub fn compose(source: &dyn HotspotSource, opts: &ComposeOptions) -> OverlayCanvas {
    let mut canvas = OverlayCanvas::new(source.width(), source.height());
    let arena = scan_bounds(source, opts.max_hotspots, opts.sampling);

    for bounds in arena.iter().filter(|b| b.seen) {
        match select_shape(bounds, opts.mode, opts.ratio_threshold) {
            HintShape::Circle => draw_circle_outline(
                &mut canvas,
                bounds,
                opts.min_size,
                opts.border_width,
                opts.color,
            ),
            HintShape::Rectangle => draw_rect_outline(
                &mut canvas,
                bounds,
                opts.min_size,
                opts.border_width,
                opts.color,
            ),
        }
    }

    canvas
}

/// The outline color for one pass: the configured color, or a random
/// saturated one when the randomize flag is set. Random picks are
/// deliberately unseeded and differ from pass to pass.
pub fn resolve_outline_color(fixed: [u8; 3], randomize: bool) -> [u8; 4] {
    if !randomize {
        return [fixed[0], fixed[1], fixed[2], 255];
    }
    let mut rng = rand::rng();
    // One bright channel keeps random colors visible on dark scenes
    let mut color = [
        rng.random_range(0..=255u8),
        rng.random_range(0..=255u8),
        rng.random_range(0..=255u8),
    ];
    color[rng.random_range(0..3usize)] = 255;
    [color[0], color[1], color[2], 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{HotspotId, HotspotSource};
    use std::collections::HashSet;

    const COLOR: [u8; 4] = [255, 208, 64, 255];

    struct GridSource {
        width: u32,
        height: u32,
        ids: Vec<u8>,
        inactive: HashSet<HotspotId>,
    }

    impl GridSource {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                ids: vec![0; (width * height) as usize],
                inactive: HashSet::new(),
            }
        }

        fn fill(&mut self, id: HotspotId, left: u32, top: u32, right: u32, bottom: u32) {
            for y in top..=bottom {
                for x in left..=right {
                    self.ids[(y * self.width + x) as usize] = id;
                }
            }
        }
    }

    impl HotspotSource for GridSource {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn hotspot_at(&self, x: u32, y: u32) -> Option<HotspotId> {
            if x >= self.width || y >= self.height {
                return None;
            }
            match self.ids[(y * self.width + x) as usize] {
                0 => None,
                id => Some(id),
            }
        }

        fn is_active(&self, id: HotspotId) -> bool {
            !self.inactive.contains(&id)
        }
    }

    fn opts() -> ComposeOptions {
        ComposeOptions {
            max_hotspots: 8,
            mode: ShapeMode::Rectangle,
            ratio_threshold: 1.5,
            min_size: 0,
            border_width: 2,
            color: COLOR,
            sampling: SamplingMode::Full,
        }
    }

    #[test]
    fn test_empty_scene_composes_blank_canvas() {
        let scene = GridSource::new(64, 48);
        let canvas = compose(&scene, &opts());
        assert!(canvas.is_blank());
        assert_eq!(canvas.width, 64);
        assert_eq!(canvas.height, 48);
    }

    #[test]
    fn test_observed_hotspot_is_outlined() {
        let mut scene = GridSource::new(64, 64);
        scene.fill(1, 10, 10, 40, 40);
        let canvas = compose(&scene, &opts());
        assert_eq!(canvas.pixel(10, 25), COLOR);
        assert_eq!(canvas.pixel(40, 25), COLOR);
        // Interior stays clear
        assert_eq!(canvas.pixel(25, 25)[3], 0);
    }

    #[test]
    fn test_inactive_hotspot_is_not_rendered() {
        let mut scene = GridSource::new(64, 64);
        scene.fill(1, 10, 10, 40, 40);
        scene.inactive.insert(1);
        let canvas = compose(&scene, &opts());
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_recompute_reflects_only_latest_state() {
        let mut scene = GridSource::new(64, 64);
        scene.fill(1, 10, 10, 40, 40);
        scene.fill(2, 50, 50, 60, 60);
        let first = compose(&scene, &opts());
        assert_ne!(first.pixel(10, 25)[3], 0);
        assert_ne!(first.pixel(50, 55)[3], 0);

        // Deactivate hotspot 1 and recompute: no residual outline
        scene.inactive.insert(1);
        let second = compose(&scene, &opts());
        assert_eq!(second.pixel(10, 25)[3], 0);
        assert_ne!(second.pixel(50, 55)[3], 0);
    }

    #[test]
    fn test_id_beyond_capacity_never_rendered() {
        let mut scene = GridSource::new(64, 64);
        scene.fill(7, 10, 10, 40, 40);
        let mut o = opts();
        o.max_hotspots = 4;
        let canvas = compose(&scene, &o);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_mixed_mode_draws_both_shapes() {
        let mut scene = GridSource::new(128, 128);
        // Elongated: rectangle
        scene.fill(1, 10, 10, 20, 90);
        // Squarish: circle
        scene.fill(2, 60, 60, 100, 100);
        let mut o = opts();
        o.mode = ShapeMode::Mixed;
        let canvas = compose(&scene, &o);
        // Rectangle corner is painted
        assert_eq!(canvas.pixel(10, 10), COLOR);
        // Circle owns its rim midpoint but not its corner
        assert_eq!(canvas.pixel(80, 60), COLOR);
        assert_eq!(canvas.pixel(60, 60)[3], 0);
    }

    #[test]
    fn test_fixed_color_resolves_opaque() {
        assert_eq!(resolve_outline_color([1, 2, 3], false), [1, 2, 3, 255]);
    }

    #[test]
    fn test_random_color_is_opaque_and_bright() {
        let c = resolve_outline_color([0, 0, 0], true);
        assert_eq!(c[3], 255);
        assert!(c[0] == 255 || c[1] == 255 || c[2] == 255);
    }
}
