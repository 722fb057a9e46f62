use crate::{Camera, CameraConfig, CameraError, CapturedImage};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

/// Replays image files from a directory as if they came from a camera.
///
/// Files are delivered in file-name order with the configured rotation. Only
/// one image is in flight at a time: `recv` waits until the previously
/// delivered image has been closed.
#[derive(Debug)]
pub struct ReplayCamera {
    config: CameraConfig,
    files: Vec<PathBuf>,
    next: usize,
    delivered: usize,
    gate: Arc<Semaphore>,
}

impl ReplayCamera {
    /// Scan `config.source_dir()` for image files.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the directory cannot be read or holds no images.
    pub async fn open(config: CameraConfig) -> Result<Self, CameraError> {
        let mut entries = tokio::fs::read_dir(config.source_dir()).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if is_image {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(CameraError::Device(format!(
                "no image files in {}",
                config.source_dir().display()
            )));
        }

        log::info!(
            "replaying {} images from {} (rotation {} degrees)",
            files.len(),
            config.source_dir().display(),
            config.rotation_degrees()
        );

        Ok(Self {
            config,
            files,
            next: 0,
            delivered: 0,
            gate: Arc::new(Semaphore::new(1)),
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// True while a delivered image has not been closed yet.
    pub fn in_flight(&self) -> bool {
        self.gate.available_permits() == 0
    }

    fn exhausted(&self) -> bool {
        let limit_reached = self
            .config
            .max_frames()
            .is_some_and(|max| self.delivered >= max);
        limit_reached || (self.next >= self.files.len() && !self.config.looping())
    }
}

impl Camera for ReplayCamera {
    async fn recv(&mut self) -> Result<Option<CapturedImage>, CameraError> {
        if self.exhausted() {
            return Ok(None);
        }

        // no state changes before this point so a cancelled recv loses nothing
        let permit = self
            .gate
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| CameraError::Channel(e.to_string()))?;

        if self.next >= self.files.len() {
            self.next = 0;
        }
        let path = &self.files[self.next];
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| CameraError::Stream(format!("{}: {e}", path.display())))?;
        log::debug!("replay frame {} from {}", self.delivered, path.display());

        self.next += 1;
        self.delivered += 1;

        Ok(Some(
            CapturedImage::encoded(data, self.config.rotation_degrees()).with_permit(permit),
        ))
    }
}
