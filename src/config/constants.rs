// Default parameters for the cloth simulation
use bevy::prelude::*;

// Cloth grid (particles per axis, separation between neighbors)
pub const CLOTH_COLS: usize = 20;
pub const CLOTH_ROWS: usize = 20;
pub const CLOTH_SPACING: Vec2 = Vec2::new(25.0, 25.0);

// Simulation space is y-down with the origin at the top-left corner,
// sized like the demo window.
pub const SIM_WIDTH: f32 = 800.0;
pub const SIM_HEIGHT: f32 = 600.0;

// Global physics
pub const GRAVITY: Vec2 = Vec2::new(0.0, 10.0);

// Stepping and interaction
pub const TIME_SCALE: f32 = 4.0;
pub const CUT_RADIUS: f32 = 4.0;
