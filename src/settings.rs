//! Field settings and preferences
//!
//! Persisted in LocalStorage. Tuning values are compile-time constants in
//! `consts`; only host-level preferences live here.

use serde::{Deserialize, Serialize};

use crate::field::FieldMode;

/// Canvas ids the page may provide, and the mode each one runs
pub const DEFAULT_CANVASES: [(&str, FieldMode); 2] = [
    ("gravityCanvas", FieldMode::Particles),
    ("pixelCanvas", FieldMode::Cells),
];

/// Field settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Draw proximity links between particles
    #[serde(default = "default_true")]
    pub links: bool,

    // === Accessibility ===
    /// Reduced motion (render one still frame instead of animating)
    #[serde(default)]
    pub reduced_motion: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            links: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Whether fields should animate, given the system motion preference
    pub fn animate(&self, system_prefers_reduced_motion: bool) -> bool {
        !(self.reduced_motion || system_prefers_reduced_motion)
    }

    /// Mode for a canvas: explicit `data-mode` wins over the id mapping
    pub fn mode_for(canvas_id: &str, data_mode: Option<&str>) -> Option<FieldMode> {
        if let Some(mode) = data_mode.and_then(FieldMode::from_str) {
            return Some(mode);
        }
        DEFAULT_CANVASES
            .iter()
            .find(|(id, _)| *id == canvas_id)
            .map(|(_, mode)| *mode)
    }

    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "ambient_field_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_animate_with_links() {
        let settings = Settings::default();
        assert!(settings.links);
        assert!(settings.animate(false));
        assert!(!settings.animate(true));
    }

    #[test]
    fn test_reduced_motion_overrides() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.animate(false));
    }

    #[test]
    fn test_mode_for_canvas() {
        assert_eq!(Settings::mode_for("gravityCanvas", None), Some(FieldMode::Particles));
        assert_eq!(Settings::mode_for("pixelCanvas", None), Some(FieldMode::Cells));
        assert_eq!(Settings::mode_for("pixelCanvas", Some("particles")), Some(FieldMode::Particles));
        assert_eq!(Settings::mode_for("other", Some("bogus")), None);
    }

    #[test]
    fn test_load_without_storage_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"reduced_motion":true}"#).unwrap();
        assert!(settings.links);
        assert!(settings.reduced_motion);

        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), Settings::default());
    }
}
