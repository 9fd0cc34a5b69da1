//! Runtime configuration
//!
//! All tunables for the scene live here. Defaults reproduce the classic
//! Earth/Moon layout; a JSON file in the platform config directory can
//! override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";

/// Where the active configuration came from
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

/// Top-level configuration resource
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub geometry: GeometryConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub textures: TextureConfig,
    pub window: WindowConfig,
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            animation: AnimationConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            textures: TextureConfig::default(),
            window: WindowConfig::default(),
            log_filter: "info,wgpu=error,naga=warn".to_string(),
        }
    }
}

/// Body sizes and placement constants, in logical pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub primary_radius: f32,
    pub satellite_radius: f32,
    /// Horizontal distance from the primary's center to the satellite's
    pub separation: f32,
    /// Distance from the screen plane to the primary's center
    pub primary_depth: f32,
    pub satellite_depth: f32,
    pub mesh_sectors: u32,
    pub mesh_stacks: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            primary_radius: 400.0,
            satellite_radius: 100.0,
            separation: 500.0,
            primary_depth: 900.0,
            satellite_depth: 100.0,
            mesh_sectors: 128,
            mesh_stacks: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub rotate_period_secs: f64,
    pub revolution_period_secs: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotate_period_secs: 3.0,
            revolution_period_secs: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Zoom distance for one wheel notch when the device reports lines
    pub scroll_line_pixels: f32,
    /// Optional `[min, max]` clamp on camera depth. Unbounded when absent.
    pub depth_limits: Option<[f32; 2]>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 30.0,
            near: 1.0,
            far: 100_000.0,
            scroll_line_pixels: 40.0,
            depth_limits: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Absolute screen-space x of the point light
    pub light_x: f32,
    pub light_depth: f32,
    pub intensity: f32,
    pub range: f32,
    pub ambient_brightness: f32,
    pub background_rgb: [u8; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_x: 3000.0,
            light_depth: 100.0,
            // Scene units are pixels, so the light sits thousands of units away.
            intensity: 1.0e10,
            range: 20_000.0,
            ambient_brightness: 20.0,
            background_rgb: [10, 10, 40],
        }
    }
}

/// Texture paths, relative to the asset root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub primary_diffuse: String,
    pub primary_bump: String,
    pub primary_specular: String,
    pub satellite_diffuse: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            primary_diffuse: "textures/earth_diffuse.jpg".to_string(),
            primary_bump: "textures/earth_bump.jpg".to_string(),
            primary_specular: "textures/earth_specular.jpg".to_string(),
            satellite_diffuse: "textures/moon_flat.jpg".to_string(),
        }
    }
}

impl TextureConfig {
    pub fn paths(&self) -> [&str; 4] {
        [
            &self.primary_diffuse,
            &self.primary_bump,
            &self.primary_specular,
            &self.satellite_diffuse,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Earth Moon System".to_string(),
            fullscreen: true,
        }
    }
}

impl SystemConfig {
    /// Load configuration from the platform config directory
    ///
    /// Resolves:
    /// - macOS: ~/Library/Application Support/earthmoon/config.json
    /// - Linux: ~/.config/earthmoon/config.json
    /// - Windows: %APPDATA%\earthmoon\config\config.json
    ///
    /// Falls back to defaults when the directory cannot be resolved or the
    /// file does not exist.
    pub fn load() -> anyhow::Result<(Self, ConfigSource)> {
        match ProjectDirs::from("", "", "earthmoon") {
            Some(dirs) => Self::load_from(&dirs.config_dir().join(CONFIG_FILE_NAME)),
            None => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    /// Load configuration from a specific file
    ///
    /// Returns defaults if the file doesn't exist.
    /// Returns Err if the file exists but cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> anyhow::Result<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: SystemConfig = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;

        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let g = &self.geometry;
        for (name, value) in [
            ("geometry.primary_radius", g.primary_radius),
            ("geometry.satellite_radius", g.satellite_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                bail!("{name} must be a positive number, got {value}");
            }
        }
        for (name, value) in [
            ("geometry.separation", g.separation),
            ("geometry.primary_depth", g.primary_depth),
            ("geometry.satellite_depth", g.satellite_depth),
            ("lighting.light_x", self.lighting.light_x),
            ("lighting.light_depth", self.lighting.light_depth),
            ("camera.scroll_line_pixels", self.camera.scroll_line_pixels),
        ] {
            if !value.is_finite() {
                bail!("{name} must be finite, got {value}");
            }
        }
        if g.mesh_sectors < 3 || g.mesh_stacks < 2 {
            bail!(
                "sphere mesh needs at least 3 sectors and 2 stacks, got {}x{}",
                g.mesh_sectors,
                g.mesh_stacks
            );
        }

        let a = &self.animation;
        for (name, value) in [
            ("animation.rotate_period_secs", a.rotate_period_secs),
            ("animation.revolution_period_secs", a.revolution_period_secs),
        ] {
            if !(value.is_finite() && value > 0.0) {
                bail!("{name} must be a positive number, got {value}");
            }
        }

        let c = &self.camera;
        if !(c.fov_degrees > 0.0 && c.fov_degrees < 180.0) {
            bail!("camera.fov_degrees must be in (0, 180), got {}", c.fov_degrees);
        }
        if !(c.near > 0.0 && c.far > c.near) {
            bail!("camera clip planes must satisfy 0 < near < far");
        }
        if let Some([min, max]) = c.depth_limits
            && !(min.is_finite() && max.is_finite() && min <= max)
        {
            bail!("camera.depth_limits must be finite with min <= max, got [{min}, {max}]");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "earthmoon-config-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("Failed to create temp dir");
        dir
    }

    #[test]
    fn test_defaults_match_classic_layout() {
        let config = SystemConfig::default();
        assert_eq!(config.geometry.primary_radius, 400.0);
        assert_eq!(config.geometry.satellite_radius, 100.0);
        assert_eq!(config.geometry.separation, 500.0);
        assert_eq!(config.animation.rotate_period_secs, 3.0);
        assert_eq!(config.animation.revolution_period_secs, 10.0);
        assert_eq!(config.camera.depth_limits, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = unique_temp_dir("missing");
        let (config, source) =
            SystemConfig::load_from(&dir.join(CONFIG_FILE_NAME)).expect("Failed to load");
        assert_eq!(config, SystemConfig::default());
        assert_eq!(source, ConfigSource::Defaults);
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let dir = unique_temp_dir("partial");
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{ "animation": { "revolution_period_secs": 27.3 },
                 "camera": { "depth_limits": [-500.0, 800.0] } }"#,
        )
        .expect("Failed to write config");

        let (config, source) = SystemConfig::load_from(&path).expect("Failed to load");
        assert_eq!(source, ConfigSource::File(path));
        assert_eq!(config.animation.revolution_period_secs, 27.3);
        assert_eq!(config.animation.rotate_period_secs, 3.0);
        assert_eq!(config.camera.depth_limits, Some([-500.0, 800.0]));
        assert_eq!(config.geometry, GeometryConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = unique_temp_dir("malformed");
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").expect("Failed to write config");
        assert!(SystemConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SystemConfig::default();
        config.animation.rotate_period_secs = 0.0;
        assert!(config.validate().is_err());

        let mut config = SystemConfig::default();
        config.geometry.satellite_radius = -1.0;
        assert!(config.validate().is_err());

        let mut config = SystemConfig::default();
        config.camera.depth_limits = Some([10.0, -10.0]);
        assert!(config.validate().is_err());

        let mut config = SystemConfig::default();
        config.geometry.separation = f32::NAN;
        assert!(config.validate().is_err());
    }
}
