use std::ffi::OsString;
use std::path::PathBuf;

use glam::Vec3;
use thiserror::Error;

/// Environment variable that overrides the shader directory.
pub const SHADER_DIR_ENV: &str = "RESTAURANT_SHADER_DIR";

pub const USAGE: &str = "Usage: restaurant-scene [--summary] [--shader-dir <path>]";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown argument: {0}. Expected --summary or --shader-dir <path>")]
    UnknownArgument(String),
    #[error("Missing value for {0}")]
    MissingValue(&'static str),
}

/// Start-up settings for the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub camera_position: Vec3,
    pub shader_dir: PathBuf,
    /// Compose a single frame and print it instead of opening a window.
    pub summary_only: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "3D Restaurant".to_string(),
            width: 1000,
            height: 800,
            camera_position: Vec3::new(0.0, 3.0, 10.0),
            shader_dir: default_shader_dir(),
            summary_only: false,
        }
    }
}

impl AppConfig {
    /// Reads the process environment and arguments.
    pub fn from_env() -> Result<Self, ConfigError> {
        let shader_dir = std::env::var_os(SHADER_DIR_ENV);
        Self::parse_from(std::env::args_os().skip(1), shader_dir)
    }

    /// Builds a config from arguments (without the program name) and an
    /// optional shader directory taken from the environment. Flags win over
    /// the environment.
    pub fn parse_from<I, S>(args: I, env_shader_dir: Option<OsString>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut config = Self::default();
        if let Some(dir) = env_shader_dir.filter(|dir| !dir.is_empty()) {
            config.shader_dir = PathBuf::from(dir);
        }

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.to_str() {
                Some("--summary") => config.summary_only = true,
                Some("--shader-dir") => {
                    let dir = args.next().ok_or(ConfigError::MissingValue("--shader-dir"))?;
                    config.shader_dir = PathBuf::from(dir);
                }
                _ => {
                    return Err(ConfigError::UnknownArgument(
                        arg.to_string_lossy().into_owned(),
                    ))
                }
            }
        }
        Ok(config)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

fn default_shader_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders")
}
