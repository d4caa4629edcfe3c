//! Per-frame simulation step
//!
//! Advances every entity by `dt` frames. Nothing here draws; the renderer
//! reads the updated state afterwards.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::pointer::Pointer;
use super::state::{Cell, EntityStore, FieldState, Particle, uniform};
use crate::consts::*;
use crate::renderer::SurfaceSize;
use crate::smoothing_factor;

/// Advance the field by `dt` frames (1.0 = one display refresh)
pub fn tick(state: &mut FieldState, pointer: &Pointer, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let size = state.size;
    state.time_frames += 1;

    let FieldState { entities, rng, .. } = state;
    match entities {
        EntityStore::Particles(particles) => {
            for particle in particles.iter_mut() {
                update_particle(particle, pointer, size, dt, rng);
            }
        }
        EntityStore::Cells(cells) => {
            for cell in cells.iter_mut() {
                update_cell(cell, pointer, dt);
            }
        }
    }
}

/// Bounce, wrap, repel, then drift a single particle
///
/// A particle that wraps past the top gets no repulsion and no drift on
/// that frame; it lands at exactly `height + radius`.
pub fn update_particle(
    particle: &mut Particle,
    pointer: &Pointer,
    size: SurfaceSize,
    dt: f32,
    rng: &mut Pcg32,
) {
    let (w, h) = (size.width_f32(), size.height_f32());

    // Sides bounce
    if particle.pos.x > w || particle.pos.x < 0.0 {
        particle.vel.x = -particle.vel.x;
    }

    // Leaving through the top re-enters just below the bottom edge. There is
    // no bottom check: the upward drift keeps particles from escaping there.
    if particle.pos.y < 0.0 {
        particle.pos = Vec2::new(uniform(rng, 0.0, w), h + particle.radius);
        return;
    }

    repel(particle, pointer, size, dt);

    particle.pos += particle.vel * dt;
}

/// Nudge a particle away from the pointer by a fixed step per axis
///
/// Returns true if the particle was inside the pointer radius. The nudge is
/// positional and never touches velocity; a particle is not pushed once it
/// is within `REPEL_EDGE_MARGIN` radii of the edge it is moving toward.
pub fn repel(particle: &mut Particle, pointer: &Pointer, size: SurfaceSize, dt: f32) -> bool {
    let Some(target) = pointer.position else {
        return false;
    };

    let distance = target.distance(particle.pos);
    if distance >= pointer.radius + particle.radius {
        return false;
    }

    let (w, h) = (size.width_f32(), size.height_f32());
    let margin = particle.radius * REPEL_EDGE_MARGIN;
    let step = REPEL_STEP * dt;
    let pos = &mut particle.pos;

    if target.x < pos.x && pos.x < w - margin {
        pos.x += step;
    }
    if target.x > pos.x && pos.x > margin {
        pos.x -= step;
    }
    if target.y < pos.y && pos.y < h - margin {
        pos.y += step;
    }
    if target.y > pos.y && pos.y > margin {
        pos.y -= step;
    }

    true
}

/// Retarget a cell from pointer proximity and ease its illumination
///
/// Brightening closes `CELL_RISE_RATE` of the gap per frame, dimming only
/// `CELL_DECAY_RATE`, so cells light quickly and leave a slow trail.
pub fn update_cell(cell: &mut Cell, pointer: &Pointer, dt: f32) {
    let lit = pointer
        .distance_to(cell.center())
        .is_some_and(|d| d < pointer.radius);
    cell.target_alpha = if lit { 1.0 } else { 0.0 };

    let rate = if cell.target_alpha > cell.alpha {
        CELL_RISE_RATE
    } else {
        CELL_DECAY_RATE
    };
    cell.alpha += (cell.target_alpha - cell.alpha) * smoothing_factor(rate, dt);
    cell.alpha = cell.alpha.clamp(0.0, 1.0);
}
