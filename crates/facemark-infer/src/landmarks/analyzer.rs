use super::config::AnalyzerConfig;
use super::decode::decode;
use super::encode::encode;
use super::types::{Landmark, RawLandmarkOutput};
use crate::{InferError, Session};
use facemark_camera::CapturedImage;
use facemark_image::{Frame, Rotation, draw_markers, normalize_to};
use std::time::{Duration, Instant};

/// Output of one analyzed frame.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Time spent inside the inference call.
    pub process_time: Duration,
    /// The normalized frame with landmark markers drawn on it.
    pub frame: Frame,
    /// Landmarks in `frame` pixel coordinates, in model order.
    pub landmarks: Vec<Landmark>,
}

/// Runs captured images through a landmark model and reports annotated frames.
///
/// The session is borrowed: whoever loaded it decides how long it lives and
/// drops it when analysis is over. Frames are handled one at a time and no
/// state carries over between them.
pub struct LandmarkAnalyzer<'s, F>
where
    F: FnMut(AnalysisResult),
{
    session: &'s mut dyn Session,
    config: AnalyzerConfig,
    callback: F,
}

impl<'s, F> LandmarkAnalyzer<'s, F>
where
    F: FnMut(AnalysisResult),
{
    pub fn new(session: &'s mut dyn Session, callback: F) -> Self {
        Self {
            session,
            config: AnalyzerConfig::default(),
            callback,
        }
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one captured image and invoke the callback with the result.
    ///
    /// Images that cannot be converted to a frame, or that carry a rotation
    /// that is not a multiple of 90 degrees, are logged and skipped without
    /// invoking the callback. The image is closed before returning on every
    /// path.
    ///
    /// # Errors
    ///
    /// Inference and output validation errors are returned unchanged.
    pub fn analyze(&mut self, image: CapturedImage) -> Result<(), InferError> {
        let prepared = image
            .to_frame()
            .and_then(|frame| image.rotation().map(|rotation| (frame, rotation)));

        let (frame, rotation) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                log::warn!("skipping frame: {e}");
                image.close();
                return Ok(());
            }
        };

        let result = self.process_frame(&frame, rotation);
        image.close();
        result
    }

    /// Normalize, encode, infer, decode and draw one frame, then invoke the callback.
    pub fn process_frame(&mut self, frame: &Frame, rotation: Rotation) -> Result<(), InferError> {
        self.config.validate()?;
        let size = self.config.target_size();

        let normalized = normalize_to(frame, size, rotation);
        let input = encode(&normalized, self.config.channel_order());
        log::debug!(
            "frame {}x{} rotated {} degrees, encoded as {:?}",
            frame.width(),
            frame.height(),
            rotation.degrees(),
            input.shape
        );

        let input_name = match self.config.input_name() {
            Some(name) => name.to_string(),
            None => self
                .session
                .input_names()
                .first()
                .ok_or_else(|| InferError::BackendError("model has no inputs".to_string()))?
                .clone(),
        };

        let start = Instant::now();
        let mut outputs = self.session.run(&[(input_name.as_str(), input)])?;
        let process_time = start.elapsed();

        let index = self.config.output_index();
        let output_name = self
            .session
            .output_names()
            .get(index)
            .ok_or_else(|| {
                InferError::BackendError(format!("model has no output at index {index}"))
            })?
            .clone();
        let output = outputs.remove(&output_name).ok_or_else(|| {
            InferError::BackendError(format!("model produced no output named '{output_name}'"))
        })?;

        let raw = RawLandmarkOutput::from_tensor(&output)?;
        if let Some(expected) = self.config.expected_landmarks() {
            if raw.len() != expected {
                return Err(InferError::ShapeMismatch {
                    expected: format!("{expected} landmarks"),
                    got: format!("{} landmarks in {:?}", raw.len(), output.shape),
                });
            }
        }

        let landmarks = decode(&raw, normalized.width(), normalized.height());
        log::debug!(
            "decoded {} landmarks in {:?}",
            landmarks.len(),
            process_time
        );

        let mut annotated = normalized;
        draw_markers(
            &mut annotated,
            landmarks.iter().map(|landmark| landmark.position),
            self.config.marker_radius(),
            self.config.marker_color(),
        );

        (self.callback)(AnalysisResult {
            process_time,
            frame: annotated,
            landmarks,
        });
        Ok(())
    }
}
