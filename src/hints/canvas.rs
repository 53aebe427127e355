//! CPU-side overlay canvas and the outline rasterizer.
//!
//! Hint outlines are drawn into a plain RGBA8 buffer and only converted to a
//! GPU texture when the overlay is actually displayed.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::hints::bounds::HotspotBounds;
use crate::theme;

/// Scene-sized RGBA8 buffer with a transparent background.
///
/// Replaced wholesale on every recompute; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayCanvas {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, row 0 at the top
    pub data: Vec<u8>,
}

impl OverlayCanvas {
    /// A fully transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    /// Write one pixel, ignoring coordinates outside the canvas.
    pub fn put(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.data[idx..idx + 4].copy_from_slice(&color);
    }

    /// Read one pixel; out-of-bounds reads come back transparent.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return theme::TRANSPARENT;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Fill the inclusive rectangle [x0..=x1] x [y0..=y1], clipped to the
    /// canvas. Degenerate ranges (x1 < x0) are a no-op.
    fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 4]) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i64 - 1);
        let y1 = y1.min(self.height as i64 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, color);
            }
        }
    }

    /// True when every pixel is transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Convert to a GPU texture for display as a sprite.
    pub fn to_image(&self) -> Image {
        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.data.clone(),
            TextureFormat::Rgba8UnormSrgb,
            default(),
        )
    }
}

/// Grow a 1-dimensional span [lo, hi] symmetrically until hi - lo reaches
/// `min`, truncation accepted (an odd deficit leaves the span one short).
fn widen_span(lo: i64, hi: i64, min: i64) -> (i64, i64) {
    let extent = hi - lo;
    if extent >= min {
        return (lo, hi);
    }
    let deficit = min - extent;
    (lo - deficit / 2, hi + deficit / 2)
}

/// Draw a rectangular outline around the box.
///
/// A box smaller than `min_size` in either dimension is widened symmetrically
/// first. The four border bands go down clockwise (top, right, bottom, left)
/// and only ever touch the border - the interior stays untouched so shapes
/// drawn earlier show through.
pub fn draw_rect_outline(
    canvas: &mut OverlayCanvas,
    bounds: &HotspotBounds,
    min_size: u32,
    border_width: u32,
    color: [u8; 4],
) {
    let (top, bottom) = widen_span(bounds.top as i64, bounds.bottom as i64, min_size as i64);
    let (left, right) = widen_span(bounds.left as i64, bounds.right as i64, min_size as i64);
    let bw = border_width.max(1) as i64;

    // top
    canvas.fill_rect(left, top, right, top + bw - 1, color);
    // right
    canvas.fill_rect(right - bw + 1, top, right, bottom, color);
    // bottom
    canvas.fill_rect(left, bottom - bw + 1, right, bottom, color);
    // left
    canvas.fill_rect(left, top, left + bw - 1, bottom, color);
}

/// Draw a circular ring outline around the box.
///
/// The ring is produced by filling a disk of `color` and then a smaller
/// concentric disk of transparent color into a scratch buffer, which is then
/// stamped onto the canvas. The scratch buffer exists because the
/// fill-then-erase pair would wipe out previously drawn shapes if it ran on
/// the shared canvas; it is dropped as soon as the stamp lands.
pub fn draw_circle_outline(
    canvas: &mut OverlayCanvas,
    bounds: &HotspotBounds,
    min_size: u32,
    border_width: u32,
    color: [u8; 4],
) {
    let h = bounds.height() as i64;
    let w = bounds.width() as i64;

    let mut radius = h.max(w) / 2;
    if 2 * radius < min_size as i64 {
        radius = min_size as i64 / 2;
    }

    let side = 2 * radius + 1;
    let mut ring = OverlayCanvas::new(side as u32, side as u32);
    fill_disk(&mut ring, radius, radius, radius, color);
    let inner = radius - border_width.max(1) as i64;
    if inner > 0 {
        fill_disk(&mut ring, radius, radius, inner, theme::TRANSPARENT);
    }

    // Stamp centered on the box midpoint; transparent scratch pixels are
    // skipped so the canvas keeps whatever was already there.
    let origin_x = bounds.left as i64 + w / 2 - radius;
    let origin_y = bounds.top as i64 + h / 2 - radius;
    for y in 0..side {
        for x in 0..side {
            let px = ring.pixel(x, y);
            if px[3] != 0 {
                canvas.put(origin_x + x, origin_y + y, px);
            }
        }
    }
}

/// Overwrite every pixel within `radius` of (cx, cy).
fn fill_disk(canvas: &mut OverlayCanvas, cx: i64, cy: i64, radius: i64, color: [u8; 4]) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.put(cx + dx, cy + dy, color);
            }
        }
    }
}
