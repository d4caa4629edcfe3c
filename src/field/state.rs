//! Field state and entity types
//!
//! Entities are plain data; behavior lives in `tick` and `links`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::renderer::{Rgba, SurfaceSize};

/// Which animation a field runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMode {
    /// Drifting particles that repel from the pointer and link to neighbours
    #[default]
    Particles,
    /// Grid of cells lit by pointer proximity
    Cells,
}

impl FieldMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldMode::Particles => "particles",
            FieldMode::Cells => "cells",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "particles" | "particle" | "gravity" => Some(FieldMode::Particles),
            "cells" | "cell" | "pixels" | "pixel" => Some(FieldMode::Cells),
            _ => None,
        }
    }

    /// Pointer radius that affects entities in this mode
    pub fn interaction_radius(&self) -> f32 {
        match self {
            FieldMode::Particles => PARTICLE_INTERACTION_RADIUS,
            FieldMode::Cells => CELL_ACTIVATION_RADIUS,
        }
    }
}

/// A drifting particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position; may leave the surface transiently
    pub pos: Vec2,
    /// Per-frame drift, only changed by a horizontal bounce
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            color: PARTICLE_COLOR,
        }
    }
}

/// A grid cell that lights up near the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Top-left corner (col * size, row * size)
    pub origin: Vec2,
    /// Current illumination in [0, 1]
    pub alpha: f32,
    /// 0.0 or 1.0
    pub target_alpha: f32,
}

impl Cell {
    pub fn new(col: u32, row: u32) -> Self {
        Self {
            origin: Vec2::new(col as f32 * CELL_SIZE, row as f32 * CELL_SIZE),
            alpha: 0.0,
            target_alpha: 0.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::splat(CELL_SIZE / 2.0)
    }
}

/// Live entity collection, one variant per mode
#[derive(Debug, Clone, PartialEq)]
pub enum EntityStore {
    Particles(Vec<Particle>),
    Cells(Vec<Cell>),
}

impl EntityStore {
    pub fn len(&self) -> usize {
        match self {
            EntityStore::Particles(p) => p.len(),
            EntityStore::Cells(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of particles for a surface: floor(area / divisor)
pub fn particle_count(size: SurfaceSize) -> usize {
    (size.width as u64 * size.height as u64 / PARTICLE_DENSITY_DIVISOR) as usize
}

/// Grid dimensions (cols, rows) for a surface
pub fn grid_dims(size: SurfaceSize) -> (u32, u32) {
    let cols = size.width.div_ceil(CELL_SIZE_PX);
    let rows = size.height.div_ceil(CELL_SIZE_PX);
    (cols, rows)
}

/// Uniform sample in [lo, hi); degenerate ranges never panic
#[inline]
pub(crate) fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Spawn a fresh particle batch sized to the surface
pub fn spawn_particles(size: SurfaceSize, rng: &mut Pcg32) -> Vec<Particle> {
    let count = particle_count(size);
    let (w, h) = (size.width_f32(), size.height_f32());

    (0..count)
        .map(|_| {
            let radius = PARTICLE_MIN_SIZE + rng.random::<f32>() * PARTICLE_SIZE_SPAN;
            let x = uniform(rng, radius * 2.0, w - radius * 2.0);
            let y = uniform(rng, radius * 2.0, h - radius * 2.0);
            let dx = uniform(rng, -PARTICLE_MAX_DRIFT_X, PARTICLE_MAX_DRIFT_X);
            let dy = uniform(
                rng,
                PARTICLE_MIN_DRIFT_Y,
                PARTICLE_MIN_DRIFT_Y + PARTICLE_DRIFT_Y_SPAN,
            );
            Particle::new(Vec2::new(x, y), Vec2::new(dx, dy), radius)
        })
        .collect()
}

/// Build the full unlit grid covering the surface (row-major)
pub fn spawn_cells(size: SurfaceSize) -> Vec<Cell> {
    let (cols, rows) = grid_dims(size);
    let mut cells = Vec::with_capacity(cols as usize * rows as usize);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(Cell::new(col, row));
        }
    }
    cells
}

/// Complete field state for one surface
#[derive(Debug, Clone)]
pub struct FieldState {
    pub mode: FieldMode,
    /// Surface dimensions the store was built for
    pub size: SurfaceSize,
    pub entities: EntityStore,
    /// Frames advanced since the last rebuild
    pub time_frames: u64,
    pub(crate) rng: Pcg32,
}

impl FieldState {
    /// Create a field for the given mode and surface, seeding its RNG
    pub fn new(mode: FieldMode, size: SurfaceSize, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let entities = Self::build(mode, size, &mut rng);
        Self {
            mode,
            size,
            entities,
            time_frames: 0,
            rng,
        }
    }

    fn build(mode: FieldMode, size: SurfaceSize, rng: &mut Pcg32) -> EntityStore {
        match mode {
            FieldMode::Particles => EntityStore::Particles(spawn_particles(size, rng)),
            FieldMode::Cells => EntityStore::Cells(spawn_cells(size)),
        }
    }

    /// Discard every entity and rebuild for new surface dimensions
    pub fn rebuild(&mut self, size: SurfaceSize) {
        self.size = size;
        self.entities = Self::build(self.mode, size, &mut self.rng);
        self.time_frames = 0;
        log::debug!(
            "Rebuilt {} field at {}x{}: {} entities",
            self.mode.as_str(),
            size.width,
            size.height,
            self.entities.len()
        );
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.entities {
            EntityStore::Particles(p) => p,
            EntityStore::Cells(_) => &[],
        }
    }

    pub fn cells(&self) -> &[Cell] {
        match &self.entities {
            EntityStore::Cells(c) => c,
            EntityStore::Particles(_) => &[],
        }
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        match &mut self.entities {
            EntityStore::Particles(p) => p,
            EntityStore::Cells(_) => &mut [],
        }
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        match &mut self.entities {
            EntityStore::Cells(c) => c,
            EntityStore::Particles(_) => &mut [],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_particle_count_matches_density() {
        // 1920 * 1080 / 9000 = 230.4
        assert_eq!(particle_count(SurfaceSize::new(1920, 1080)), 230);
        assert_eq!(particle_count(SurfaceSize::new(90, 100)), 1);
        assert_eq!(particle_count(SurfaceSize::new(89, 100)), 0);
    }

    #[test]
    fn test_grid_dims_round_up() {
        assert_eq!(grid_dims(SurfaceSize::new(1920, 1080)), (48, 27));
        assert_eq!(grid_dims(SurfaceSize::new(41, 1)), (2, 1));
        assert_eq!(grid_dims(SurfaceSize::new(0, 500)), (0, 13));
    }

    #[test]
    fn test_zero_area_yields_empty_store() {
        let state = FieldState::new(FieldMode::Particles, SurfaceSize::new(0, 0), 1);
        assert!(state.entities.is_empty());
        let state = FieldState::new(FieldMode::Cells, SurfaceSize::new(0, 720), 1);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_spawned_particles_within_ranges() {
        let state = FieldState::new(FieldMode::Particles, SurfaceSize::new(800, 600), 42);
        assert!(!state.particles().is_empty());
        for p in state.particles() {
            assert!(p.radius >= 1.0 && p.radius <= 3.0);
            assert!(p.vel.x >= -0.2 && p.vel.x <= 0.2);
            assert!(p.vel.y >= -1.5 && p.vel.y <= -1.0);
            assert!(p.pos.x >= p.radius * 2.0 && p.pos.x <= 800.0 - p.radius * 2.0);
            assert!(p.pos.y >= p.radius * 2.0 && p.pos.y <= 600.0 - p.radius * 2.0);
            assert!((0.0..=1.0).contains(&p.color.a));
        }
    }

    #[test]
    fn test_cells_laid_out_row_major() {
        let state = FieldState::new(FieldMode::Cells, SurfaceSize::new(100, 50), 0);
        let cells = state.cells();
        assert_eq!(cells.len(), 3 * 2);
        assert_eq!(cells[0].origin, Vec2::new(0.0, 0.0));
        assert_eq!(cells[2].origin, Vec2::new(80.0, 0.0));
        assert_eq!(cells[3].origin, Vec2::new(0.0, 40.0));
        assert!(cells.iter().all(|c| c.alpha == 0.0 && c.target_alpha == 0.0));
    }

    #[test]
    fn test_rebuild_discards_previous_entities() {
        let mut state = FieldState::new(FieldMode::Cells, SurfaceSize::new(400, 400), 0);
        state.cells_mut()[0].alpha = 0.8;
        state.time_frames = 99;

        state.rebuild(SurfaceSize::new(200, 120));
        assert_eq!(state.cells().len(), 5 * 3);
        assert_eq!(state.cells()[0].alpha, 0.0);
        assert_eq!(state.time_frames, 0);
        assert_eq!(state.size, SurfaceSize::new(200, 120));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(FieldMode::from_str("Particles"), Some(FieldMode::Particles));
        assert_eq!(FieldMode::from_str("pixel"), Some(FieldMode::Cells));
        assert_eq!(FieldMode::from_str("orbs"), None);
        assert_eq!(FieldMode::from_str(FieldMode::Cells.as_str()), Some(FieldMode::Cells));
    }

    proptest! {
        #[test]
        fn prop_particle_density_exact(w in 0u32..4000, h in 0u32..3000, seed in any::<u64>()) {
            let size = SurfaceSize::new(w, h);
            let state = FieldState::new(FieldMode::Particles, size, seed);
            let expected = ((w as f64 * h as f64) / 9000.0).floor() as usize;
            prop_assert_eq!(state.entities.len(), expected);
        }

        #[test]
        fn prop_cell_grid_exact(w in 0u32..4000, h in 0u32..3000) {
            let size = SurfaceSize::new(w, h);
            let state = FieldState::new(FieldMode::Cells, size, 0);
            let expected = h.div_ceil(40) as usize * w.div_ceil(40) as usize;
            prop_assert_eq!(state.entities.len(), expected);
        }

        #[test]
        fn prop_resize_depends_only_on_new_size(
            w0 in 0u32..2000, h0 in 0u32..2000,
            w1 in 0u32..2000, h1 in 0u32..2000,
        ) {
            let mut state = FieldState::new(FieldMode::Particles, SurfaceSize::new(w0, h0), 7);
            state.rebuild(SurfaceSize::new(w1, h1));
            prop_assert_eq!(state.entities.len(), particle_count(SurfaceSize::new(w1, h1)));

            let mut grid = FieldState::new(FieldMode::Cells, SurfaceSize::new(w0, h0), 7);
            grid.rebuild(SurfaceSize::new(w1, h1));
            let (cols, rows) = grid_dims(SurfaceSize::new(w1, h1));
            prop_assert_eq!(grid.entities.len(), (cols * rows) as usize);
        }
    }
}
