use std::path::{Path, PathBuf};

/// Configuration for replaying captured images from a directory.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    source_dir: PathBuf,
    rotation_degrees: i32,
    looping: bool,
    max_frames: Option<usize>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("frames"),
            rotation_degrees: 0,
            looping: false,
            max_frames: None,
        }
    }
}

impl CameraConfig {
    /// Set the directory holding the image files.
    pub fn with_source_dir(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = source_dir.into();
        self
    }

    /// Set the sensor rotation reported with every image.
    pub fn with_rotation_degrees(mut self, rotation_degrees: i32) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    /// Restart from the first file after the last one.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Stop after delivering this many images.
    pub fn with_max_frames(mut self, max_frames: Option<usize>) -> Self {
        self.max_frames = max_frames;
        self
    }

    // Getters
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn max_frames(&self) -> Option<usize> {
        self.max_frames
    }
}
