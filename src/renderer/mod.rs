//! Rendering module
//!
//! Everything the field draws goes through the `Surface` trait, so the same
//! draw pass targets a browser canvas or a recording surface in tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::{DrawStats, cell_color, draw_field};
pub use surface::{DrawCall, RecordingSurface, Rgba, Surface, SurfaceSize};
