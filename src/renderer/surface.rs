//! Drawing surface abstraction
//!
//! The field only needs an immediate-mode 2D target with five primitives:
//! clear, filled circle, filled rect, stroked line, and resize.

use glam::Vec2;

/// An sRGB color with straight alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Alpha is clamped to [0, 1]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a < 0.0 {
            0.0
        } else if a > 1.0 {
            1.0
        } else {
            a
        };
        Self { r, g, b, a }
    }

    /// Same color with a different (clamped) alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Per-channel blend toward `other`; `t` is clamped to [0, 1]
    pub fn mix(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| crate::lerp(a as f32, b as f32, t).round() as u8;
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
            crate::lerp(self.a, other.a, t),
        )
    }

    /// CSS `rgba()` string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Pixel dimensions of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build from signed host dimensions; negative extents collapse to zero
    pub fn from_signed(width: i64, height: i64) -> Self {
        let clamp = |v: i64| v.clamp(0, u32::MAX as i64) as u32;
        Self::new(clamp(width), clamp(height))
    }

    #[inline]
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Immediate-mode 2D drawing target
pub trait Surface {
    /// Current pixel dimensions
    fn size(&self) -> SurfaceSize;

    /// Replace the surface dimensions (contents are discarded)
    fn resize(&mut self, size: SurfaceSize);

    /// Clear a rectangular region to transparent
    fn clear(&mut self, origin: Vec2, width: f32, height: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn fill_rect(&mut self, origin: Vec2, width: f32, height: f32, color: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);

    /// Clear the whole surface
    fn clear_all(&mut self) {
        let size = self.size();
        self.clear(Vec2::ZERO, size.width_f32(), size.height_f32());
    }
}

/// A single recorded draw command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear {
        origin: Vec2,
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Rect {
        origin: Vec2,
        width: f32,
        height: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
}

/// Surface that records draw calls instead of rasterizing
///
/// Used by tests and by the headless native binary. Clearing the whole
/// surface drops the previous frame's calls so `calls()` always holds the
/// most recent frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    calls: Vec<DrawCall>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            calls: Vec::new(),
            frames: 0,
        }
    }

    /// Draw calls issued since the last full clear
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of full clears seen (one per presented frame)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Rect { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.calls.clear();
    }

    fn clear(&mut self, origin: Vec2, width: f32, height: f32) {
        let full = origin == Vec2::ZERO
            && width >= self.size.width_f32()
            && height >= self.size.height_f32();
        if full {
            self.calls.clear();
            self.frames += 1;
        }
        self.calls.push(DrawCall::Clear {
            origin,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, width: f32, height: f32, color: Rgba) {
        self.calls.push(DrawCall::Rect {
            origin,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            width,
        });
    }
}
