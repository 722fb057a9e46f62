use std::fmt;
use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "FACEMARK_MODEL_PATH";
pub const FRAMES_DIR_ENV: &str = "FACEMARK_FRAMES_DIR";
pub const OUTPUT_DIR_ENV: &str = "FACEMARK_OUTPUT_DIR";
pub const ROTATION_ENV: &str = "FACEMARK_ROTATION";
pub const LOG_DIR_ENV: &str = "FACEMARK_LOG_DIR";
pub const LOOP_ENV: &str = "FACEMARK_LOOP";
pub const MAX_FRAMES_ENV: &str = "FACEMARK_MAX_FRAMES";

#[derive(Debug, PartialEq)]
pub struct SettingsError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: '{}'", self.key, self.value)
    }
}

impl std::error::Error for SettingsError {}

/// Run settings, read from `FACEMARK_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model_path: PathBuf,
    pub frames_dir: PathBuf,
    pub output_dir: PathBuf,
    pub rotation_degrees: i32,
    pub log_dir: Option<PathBuf>,
    pub looping: bool,
    pub max_frames: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/face_landmarks_106.onnx"),
            frames_dir: PathBuf::from("frames"),
            output_dir: PathBuf::from("output"),
            rotation_degrees: 0,
            log_dir: None,
            looping: false,
            max_frames: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source, falling back to defaults for unset keys.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, SettingsError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(path) = lookup(MODEL_PATH_ENV) {
            settings.model_path = path.into();
        }
        if let Some(dir) = lookup(FRAMES_DIR_ENV) {
            settings.frames_dir = dir.into();
        }
        if let Some(dir) = lookup(OUTPUT_DIR_ENV) {
            settings.output_dir = dir.into();
        }
        if let Some(value) = lookup(ROTATION_ENV) {
            settings.rotation_degrees = value.trim().parse().map_err(|_| SettingsError {
                key: ROTATION_ENV,
                value,
            })?;
        }
        settings.log_dir = lookup(LOG_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        if let Some(value) = lookup(LOOP_ENV) {
            let looping = match value.trim() {
                "1" | "true" | "yes" => Some(true),
                "0" | "false" | "no" | "" => Some(false),
                _ => None,
            };
            settings.looping = looping.ok_or(SettingsError {
                key: LOOP_ENV,
                value,
            })?;
        }
        if let Some(value) = lookup(MAX_FRAMES_ENV) {
            let max = value.trim().parse().map_err(|_| SettingsError {
                key: MAX_FRAMES_ENV,
                value,
            })?;
            settings.max_frames = Some(max);
        }

        Ok(settings)
    }
}
