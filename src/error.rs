//! Error types for field construction.
//!
//! The simulation itself cannot fail; only acquiring a drawing surface can.

use std::fmt;

/// Errors that can occur while attaching a field to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// The window has no `document`.
    NoDocument,
    /// No element with the given id.
    MissingCanvas(String),
    /// The element with the given id is not a `<canvas>`.
    NotACanvas(String),
    /// The canvas refused a 2D context.
    NoContext(String),
    /// None of the known canvas ids are present on the page.
    NoSurfaces,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NoWindow => write!(f, "No window available"),
            FieldError::NoDocument => write!(f, "Window has no document"),
            FieldError::MissingCanvas(id) => write!(f, "No element with id '{}'", id),
            FieldError::NotACanvas(id) => write!(f, "Element '{}' is not a canvas", id),
            FieldError::NoContext(id) => write!(f, "Canvas '{}' has no 2D context", id),
            FieldError::NoSurfaces => write!(f, "No field canvas found on the page"),
        }
    }
}

impl std::error::Error for FieldError {}

#[cfg(target_arch = "wasm32")]
impl From<FieldError> for wasm_bindgen::JsValue {
    fn from(e: FieldError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
