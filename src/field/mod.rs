//! Field simulation module
//!
//! All per-frame behavior lives here. This module stays free of rendering:
//! - Entities are plain data rebuilt wholesale on resize
//! - The pointer arrives as a snapshot, never read from ambient state
//! - Draw calls are issued afterwards by `renderer`

pub mod links;
pub mod pointer;
pub mod state;
pub mod tick;

pub use links::{Link, collect_links, for_each_link, link_opacity, link_threshold};
pub use pointer::Pointer;
pub use state::{
    Cell, EntityStore, FieldMode, FieldState, Particle, grid_dims, particle_count, spawn_cells,
    spawn_particles,
};
pub use tick::{repel, tick, update_cell, update_particle};
