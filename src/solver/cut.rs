use bevy::prelude::*;

use crate::core::ClothState;
use crate::math::Vector;

/// Cut requests queued by the driver for the next tick, in simulation
/// coordinates.
#[derive(Resource, Default)]
pub struct CutRequests {
    pub points: Vec<Vector>,
}

/// Cut stage: drains the queued pointer positions, deactivating the
/// nearest active constraint for each one that hits.
pub fn apply_pending_cuts(mut state: ResMut<ClothState>, mut cuts: ResMut<CutRequests>) {
    for point in cuts.points.drain(..) {
        if let Some(index) = state.cut_at(point) {
            debug!("cut constraint {} near ({:.1}, {:.1})", index, point.x, point.y);
        }
    }
}
