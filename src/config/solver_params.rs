use bevy::prelude::*;

use crate::config::constants::{CUT_RADIUS, TIME_SCALE};

/// Solver parameters for controlling cloth stepping and interaction
#[derive(Resource, Clone)]
pub struct SolverParams {
    /// Multiplier applied to the frame delta before Verlet integration.
    /// Values above 1.0 overdrive the step so a single relaxation sweep
    /// per tick still produces a reasonably taut cloth.
    pub time_scale: f32,

    /// Maximum pointer-to-segment distance for a cut query to hit a
    /// constraint
    pub cut_radius: f32,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            time_scale: TIME_SCALE,
            cut_radius: CUT_RADIUS,
        }
    }
}

impl SolverParams {
    /// Set the integration time scale (clamped to non-negative)
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale.max(0.0);
        self
    }

    /// Set the cut query radius (clamped to non-negative)
    pub fn with_cut_radius(mut self, cut_radius: f32) -> Self {
        self.cut_radius = cut_radius.max(0.0);
        self
    }
}
