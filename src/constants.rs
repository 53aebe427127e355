//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 960.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

/// Z position of the scene background sprite
pub const BACKGROUND_Z: f32 = 0.0;

/// Z position of the hint overlay sprite (above everything else in the scene)
pub const OVERLAY_Z: f32 = 10.0;

/// Hard ceiling on the configurable hotspot capacity.
/// Hotspot ids are raster-encoded as a single byte, so 255 is the most
/// distinct hotspots any scene can address (0 is the background).
pub const MAX_HOTSPOT_CAPACITY: usize = 255;
