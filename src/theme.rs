//! Centralized color palette for the application.
//!
//! Hint outlines and the built-in demo scene are drawn CPU-side into raw
//! RGBA8 buffers, so colors here are `[u8; 4]` rather than `bevy::Color`.
//! Modify values here to change the application's color scheme.

// ============================================================================
// Hint Overlay Colors
// ============================================================================

/// Default hint outline color (warm yellow, fully opaque)
pub const HINT_OUTLINE: [u8; 4] = [255, 208, 64, 255];

/// Fully transparent pixel, used to clear overlay buffers
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

// ============================================================================
// Demo Scene Palette
// ============================================================================

/// Back wall of the demo room
pub const DEMO_WALL: [u8; 4] = [54, 48, 66, 255];

/// Floor of the demo room
pub const DEMO_FLOOR: [u8; 4] = [88, 70, 56, 255];

/// Door panel
pub const DEMO_DOOR: [u8; 4] = [120, 86, 48, 255];

/// Window glass
pub const DEMO_WINDOW: [u8; 4] = [96, 140, 180, 255];

/// Treasure chest
pub const DEMO_CHEST: [u8; 4] = [140, 100, 40, 255];

/// Rug in front of the chest
pub const DEMO_RUG: [u8; 4] = [128, 44, 44, 255];

/// Brass key on the floor
pub const DEMO_KEY: [u8; 4] = [200, 176, 80, 255];
