//! Ambient Field - interactive canvas backgrounds
//!
//! Core modules:
//! - `field`: Simulation state and per-frame physics (no rendering)
//! - `renderer`: Drawing surface abstraction and the draw pass
//! - `driver`: Frame loop state machine and input event routing
//! - `settings`: Host preferences persisted in LocalStorage

pub mod driver;
pub mod error;
pub mod field;
pub mod renderer;
pub mod settings;

pub use driver::{FrameDriver, InputEvent, RunState};
pub use error::FieldError;
pub use field::{FieldMode, FieldState, Pointer};
pub use renderer::{RecordingSurface, Rgba, Surface, SurfaceSize};
pub use settings::Settings;

/// Field configuration constants
pub mod consts {
    use crate::renderer::Rgba;

    /// Nominal display refresh the per-frame rates are tuned against
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest step (in frames) a single tick may advance
    pub const MAX_FRAME_DT: f32 = 4.0;

    /// Surface area (px²) per particle
    pub const PARTICLE_DENSITY_DIVISOR: u64 = 9000;
    /// Pointer repulsion radius for particles
    pub const PARTICLE_INTERACTION_RADIUS: f32 = 150.0;
    /// Particle radius range [min, min + span)
    pub const PARTICLE_MIN_SIZE: f32 = 1.0;
    pub const PARTICLE_SIZE_SPAN: f32 = 2.0;
    /// Horizontal drift range [-max, max)
    pub const PARTICLE_MAX_DRIFT_X: f32 = 0.2;
    /// Vertical drift range [min, min + span); negative is up
    pub const PARTICLE_MIN_DRIFT_Y: f32 = -1.5;
    pub const PARTICLE_DRIFT_Y_SPAN: f32 = 0.5;
    pub const PARTICLE_COLOR: Rgba = Rgba::new(255, 255, 255, 0.4);

    /// Positional nudge applied per frame while inside the pointer radius
    pub const REPEL_STEP: f32 = 2.0;
    /// Particles are never pushed closer to an edge than this many radii
    pub const REPEL_EDGE_MARGIN: f32 = 10.0;

    /// Link threshold is (width / N) * (height / N)
    pub const LINK_THRESHOLD_DIVISOR: f32 = 7.0;
    /// Squared distance at which a link fades out completely
    pub const LINK_OPACITY_FALLOFF: f32 = 20_000.0;
    pub const LINK_COLOR: Rgba = Rgba::new(79, 70, 229, 1.0);
    pub const LINK_WIDTH: f32 = 1.0;

    /// Grid cell edge length (px)
    pub const CELL_SIZE_PX: u32 = 40;
    pub const CELL_SIZE: f32 = CELL_SIZE_PX as f32;
    /// Gap left between neighbouring cells
    pub const CELL_GAP: f32 = 1.0;
    /// Pointer distance from a cell center that lights it
    pub const CELL_ACTIVATION_RADIUS: f32 = 100.0;
    /// Fraction of the gap closed per frame when brightening
    pub const CELL_RISE_RATE: f32 = 0.2;
    /// Fraction of the gap closed per frame when dimming
    pub const CELL_DECAY_RATE: f32 = 0.05;
    /// Cells at or below this illumination are not drawn
    pub const CELL_DRAW_EPSILON: f32 = 0.01;
    /// Opacity of a fully lit cell
    pub const CELL_PEAK_OPACITY: f32 = 0.4;
    pub const CELL_LIT_COLOR: Rgba = Rgba::new(79, 70, 229, 1.0);
    pub const CELL_DIM_COLOR: Rgba = Rgba::new(30, 27, 75, 1.0);
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fraction of a gap closed after `dt` frames at a per-frame `rate`
///
/// Exactly `rate` when `dt == 1`; never exceeds 1.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    (1.0 - (1.0 - rate).powf(dt.max(0.0))).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_factor_single_frame() {
        assert!((smoothing_factor(0.2, 1.0) - 0.2).abs() < 1e-6);
        assert!((smoothing_factor(0.05, 1.0) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_smoothing_factor_compounds() {
        // Two frames at 0.2 close 1 - 0.8² of the gap
        assert!((smoothing_factor(0.2, 2.0) - 0.36).abs() < 1e-6);
        assert_eq!(smoothing_factor(0.2, 0.0), 0.0);
        assert!(smoothing_factor(0.9, 100.0) <= 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(4.0, 4.0, 0.7), 4.0);
    }
}
