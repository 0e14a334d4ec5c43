use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or saving configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Construction parameters for the free-look camera.
///
/// `fov`, `min_fov` and `max_fov` are in degrees. Nothing here checks that
/// `min_fov <= fov <= max_fov`; the camera only clamps on scroll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub move_speed: f32,
    pub look_speed: f32,
    pub fov: f32,
    pub min_fov: f32,
    pub max_fov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            move_speed: 1.5,
            look_speed: 0.3,
            fov: 70.0,
            min_fov: 0.1,
            max_fov: 120.0,
        }
    }
}

/// Main window parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
    pub clear_color: [f32; 4],
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "freelook".into(),
            width: 800,
            height: 600,
            fullscreen: true,
            vsync: true,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

/// Which mesh the sandbox spins in front of the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    #[default]
    Triangle,
    Cube,
}

/// Top-level sandbox configuration, usually read from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    /// Image applied to the mesh. A generated checkerboard is used when unset.
    pub texture: Option<PathBuf>,
    pub mesh: MeshKind,
    pub spin_degrees_per_second: f32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            texture: None,
            mesh: MeshKind::default(),
            spin_degrees_per_second: 40.0,
        }
    }
}

impl SandboxConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
