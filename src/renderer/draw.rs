//! Draw pass: turns an updated field into surface draw calls

use crate::consts::*;
use crate::field::{Cell, FieldState, Particle, for_each_link};
use crate::renderer::{Rgba, Surface};

/// Per-frame draw call counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub circles: usize,
    pub rects: usize,
    pub lines: usize,
}

impl DrawStats {
    pub fn total(&self) -> usize {
        self.circles + self.rects + self.lines
    }
}

/// Fill color for a cell at the given illumination
///
/// Illumination scales both the hue (dim indigo to lit indigo) and the
/// opacity (up to `CELL_PEAK_OPACITY`).
pub fn cell_color(alpha: f32) -> Rgba {
    CELL_DIM_COLOR
        .mix(CELL_LIT_COLOR, alpha)
        .with_alpha(alpha * CELL_PEAK_OPACITY)
}

/// Clear the surface and draw the whole field
pub fn draw_field<S: Surface + ?Sized>(
    state: &FieldState,
    surface: &mut S,
    links: bool,
) -> DrawStats {
    surface.clear_all();

    let mut stats = DrawStats::default();
    let particles = state.particles();
    if !particles.is_empty() {
        stats.circles = draw_particles(particles, surface);
        if links {
            stats.lines = draw_links(state, surface);
        }
    }

    let cells = state.cells();
    if !cells.is_empty() {
        stats.rects = draw_cells(cells, surface);
    }

    stats
}

fn draw_particles<S: Surface + ?Sized>(particles: &[Particle], surface: &mut S) -> usize {
    for p in particles {
        surface.fill_circle(p.pos, p.radius, p.color);
    }
    particles.len()
}

fn draw_links<S: Surface + ?Sized>(state: &FieldState, surface: &mut S) -> usize {
    let mut count = 0;
    for_each_link(state.particles(), state.size, |link| {
        surface.stroke_line(
            link.from,
            link.to,
            LINK_COLOR.with_alpha(link.opacity),
            LINK_WIDTH,
        );
        count += 1;
    });
    count
}

/// Dark cells are skipped entirely
fn draw_cells<S: Surface + ?Sized>(cells: &[Cell], surface: &mut S) -> usize {
    let extent = CELL_SIZE - CELL_GAP;
    let mut count = 0;
    for cell in cells.iter().filter(|c| c.alpha > CELL_DRAW_EPSILON) {
        surface.fill_rect(cell.origin, extent, extent, cell_color(cell.alpha));
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldMode, Pointer, tick};
    use crate::renderer::{DrawCall, RecordingSurface, SurfaceSize};
    use glam::Vec2;

    #[test]
    fn test_particles_drawn_as_circles_with_links() {
        let size = SurfaceSize::new(700, 700);
        let mut state = FieldState::new(FieldMode::Particles, size, 1);
        if let crate::field::EntityStore::Particles(p) = &mut state.entities {
            p.clear();
            p.push(Particle::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 2.0));
            p.push(Particle::new(Vec2::new(20.0, 10.0), Vec2::ZERO, 1.5));
        }
        let mut surface = RecordingSurface::new(size);

        let stats = draw_field(&state, &mut surface, true);

        assert_eq!(stats, DrawStats { circles: 2, rects: 0, lines: 1 });
        assert!(matches!(surface.calls()[0], DrawCall::Clear { .. }));
        match surface.lines().next() {
            Some(DrawCall::Line { color, width, .. }) => {
                assert_eq!(*width, LINK_WIDTH);
                assert!(color.a > 0.99);
                assert_eq!((color.r, color.g, color.b), (79, 70, 229));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_links_can_be_disabled() {
        let size = SurfaceSize::new(1280, 720);
        let state = FieldState::new(FieldMode::Particles, size, 3);
        let mut surface = RecordingSurface::new(size);
        let stats = draw_field(&state, &mut surface, false);
        assert_eq!(stats.lines, 0);
        assert_eq!(stats.circles, state.particles().len());
    }

    #[test]
    fn test_dark_cells_not_drawn() {
        let size = SurfaceSize::new(400, 400);
        let mut state = FieldState::new(FieldMode::Cells, size, 0);
        let mut surface = RecordingSurface::new(size);

        assert_eq!(draw_field(&state, &mut surface, true).rects, 0);

        tick(&mut state, &Pointer::at(Vec2::new(20.0, 20.0), CELL_ACTIVATION_RADIUS), 1.0);
        let stats = draw_field(&state, &mut surface, true);
        assert!(stats.rects > 0);
        assert_eq!(stats.rects, surface.rects().count());

        match surface.rects().next() {
            Some(DrawCall::Rect { width, height, color, .. }) => {
                assert_eq!(*width, 39.0);
                assert_eq!(*height, 39.0);
                assert!((color.a - CELL_RISE_RATE * CELL_PEAK_OPACITY).abs() < 1e-5);
            }
            other => panic!("expected a rect, got {other:?}"),
        }
    }

    #[test]
    fn test_cell_color_scales_with_illumination() {
        let dim = cell_color(0.1);
        let lit = cell_color(1.0);
        assert!(dim.a < lit.a);
        assert!(dim.b < lit.b);
        assert_eq!(lit, CELL_LIT_COLOR.with_alpha(CELL_PEAK_OPACITY));
    }

    #[test]
    fn test_empty_field_draws_nothing() {
        let state = FieldState::new(FieldMode::Particles, SurfaceSize::new(0, 0), 0);
        let mut surface = RecordingSurface::new(SurfaceSize::new(0, 0));
        assert_eq!(draw_field(&state, &mut surface, true).total(), 0);
    }
}
