use crate::{CameraError, CapturedImage};

/// Async source of captured images.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next captured image, or `None` once the source is exhausted.
    ///
    /// Sources may hold back the next image until the previous one has been
    /// closed (dropped).
    async fn recv(&mut self) -> Result<Option<CapturedImage>, CameraError>;
}
