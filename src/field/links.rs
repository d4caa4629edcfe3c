//! Proximity linker
//!
//! Connects every pair of particles closer than a surface-derived threshold.
//! This is an O(n²) pass per frame; n is bounded by the density divisor, so
//! the cost scales with screen area and that is the ceiling for this field.

use glam::Vec2;

use super::state::Particle;
use crate::consts::*;
use crate::renderer::SurfaceSize;

/// A link to draw between two particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    /// Stroke opacity in (0, 1]
    pub opacity: f32,
}

/// Squared-distance threshold below which two particles link
pub fn link_threshold(size: SurfaceSize) -> f32 {
    (size.width_f32() / LINK_THRESHOLD_DIVISOR) * (size.height_f32() / LINK_THRESHOLD_DIVISOR)
}

/// Link opacity for a squared distance under `threshold`
///
/// Falls off linearly with squared distance. The falloff never ends before
/// the threshold, so every drawn link stays visible.
#[inline]
pub fn link_opacity(dist_sq: f32, threshold: f32) -> f32 {
    let normalizer = threshold.max(LINK_OPACITY_FALLOFF);
    (1.0 - dist_sq / normalizer).clamp(0.0, 1.0)
}

/// Visit every linked unordered pair of particles
pub fn for_each_link(particles: &[Particle], size: SurfaceSize, mut visit: impl FnMut(Link)) {
    let threshold = link_threshold(size);
    if threshold <= 0.0 {
        return;
    }

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let dist_sq = a.pos.distance_squared(b.pos);
            if dist_sq < threshold {
                let opacity = link_opacity(dist_sq, threshold);
                if opacity > 0.0 {
                    visit(Link {
                        from: a.pos,
                        to: b.pos,
                        opacity,
                    });
                }
            }
        }
    }
}

/// Collect this frame's links
pub fn collect_links(particles: &[Particle], size: SurfaceSize) -> Vec<Link> {
    let mut links = Vec::new();
    for_each_link(particles, size, |link| links.push(link));
    links
}
