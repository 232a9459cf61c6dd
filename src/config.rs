//! Painter configuration (`config.ron`)
//!
//! Tunables that used to be constants: zoom bounds, camera limits, strip
//! width, the starting color. Stored as pretty RON under the user config
//! directory. A missing file means defaults; a broken one is logged and
//! ignored so the painter always starts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::color::Hsl;
use crate::error::ConfigError;
use crate::mapping::{MAX_ZOOM, MIN_ZOOM};
use crate::scene::{OrbitCamera, SkinModel, Vec3, START_POSITION};
use crate::texture::OVERLAY_SCALE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    /// 2D view zoom bounds
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom the 2D view opens at (clamped into the bounds)
    pub initial_zoom: f32,
    /// Orbit camera radial zoom stops
    pub camera_min_distance: f32,
    pub camera_max_distance: f32,
    pub camera_start: [f32; 3],
    /// Radians per pixel of orbit drag
    pub orbit_sensitivity: f32,
    /// Size of the overlay shell relative to the head
    pub overlay_scale: f32,
    /// Width of each picker strip in pixels
    pub strip_width: f32,
    pub start_hsl: Hsl,
    /// Skin to load at startup
    pub initial_skin: Option<PathBuf>,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            initial_zoom: MIN_ZOOM,
            camera_min_distance: 1.2,
            camera_max_distance: 5.0,
            camera_start: [START_POSITION.x, START_POSITION.y, START_POSITION.z],
            orbit_sensitivity: 0.01,
            overlay_scale: OVERLAY_SCALE,
            strip_width: 256.0,
            start_hsl: Hsl::new(0, 100, 50),
            initial_skin: None,
        }
    }
}

impl PainterConfig {
    /// Default location: `<config dir>/skinpaint/config.ron`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skinpaint")
            .join("config.ron")
    }

    /// Parse a config from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize as pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron(&contents)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ron()?)?;
        info!("saved config to {}", path.display());
        Ok(())
    }

    /// Load `path`, falling back to defaults when it is missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("using default config, {} is unusable: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Orbit camera at the configured start position and distance limits
    pub fn camera(&self) -> OrbitCamera {
        let [x, y, z] = self.camera_start;
        let mut camera = OrbitCamera::from_position(Vec3::new(x, y, z));
        camera.min_distance = self.camera_min_distance;
        camera.max_distance = self.camera_max_distance.max(self.camera_min_distance);
        camera
    }

    pub fn model(&self) -> SkinModel {
        SkinModel::with_overlay_scale(self.overlay_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ron");
        let config = PainterConfig {
            max_zoom: 6.0,
            strip_width: 200.0,
            start_hsl: Hsl::new(120, 50, 40),
            initial_skin: Some(PathBuf::from("steve.png")),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(PainterConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = PainterConfig::from_ron("(max_zoom: 4.0)").unwrap();
        assert_eq!(config.max_zoom, 4.0);
        assert_eq!(config.strip_width, 256.0);
        assert_eq!(config.start_hsl, Hsl::new(0, 100, 50));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = PainterConfig::load_or_default(&dir.path().join("absent.ron"));
        assert_eq!(config, PainterConfig::default());
    }

    #[test]
    fn test_malformed_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        fs::write(&path, "(max_zoom: \"lots\"").unwrap();
        assert!(PainterConfig::load_from(&path).is_err());
        assert_eq!(PainterConfig::load_or_default(&path), PainterConfig::default());
    }

    #[test]
    fn test_camera_uses_bounds() {
        let config = PainterConfig {
            camera_min_distance: 2.0,
            camera_max_distance: 3.0,
            ..Default::default()
        };
        let camera = config.camera();
        assert_eq!(camera.min_distance, 2.0);
        assert_eq!(camera.max_distance, 3.0);
        assert!((camera.distance - START_POSITION.len()).abs() < 1e-5);
    }
}
