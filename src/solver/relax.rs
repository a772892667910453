use bevy::prelude::*;

use crate::core::ClothState;

/// Relaxation stage: exactly one Gauss–Seidel sweep per tick.
pub fn relax_constraints(mut state: ResMut<ClothState>) {
    state.relax_constraints();
}
