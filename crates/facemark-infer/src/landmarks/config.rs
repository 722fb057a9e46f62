use super::types::{ChannelOrder, LANDMARK_COUNT};
use crate::InferError;
use facemark_image::{MARKER_COLOR, MARKER_RADIUS, TARGET_SIZE};

/// Settings for `LandmarkAnalyzer`.
///
/// The defaults match the 106-point face landmark model: 256x256 RGB input,
/// first model input, first model output, red 2 px markers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    target_size: usize,
    channel_order: ChannelOrder,
    input_name: Option<String>,
    output_index: usize,
    expected_landmarks: Option<usize>,
    marker_radius: i32,
    marker_color: [u8; 3],
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            target_size: TARGET_SIZE,
            channel_order: ChannelOrder::default(),
            input_name: None,
            output_index: 0,
            expected_landmarks: Some(LANDMARK_COUNT),
            marker_radius: MARKER_RADIUS,
            marker_color: MARKER_COLOR,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side length of the square frame fed to the model.
    pub fn with_target_size(mut self, size: usize) -> Self {
        self.target_size = size;
        self
    }

    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    /// Feed this model input instead of the first one.
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = Some(name.into());
        self
    }

    /// Position of the landmark output in the model's output list.
    pub fn with_output_index(mut self, index: usize) -> Self {
        self.output_index = index;
        self
    }

    /// Required row count of the landmark output, or `None` to accept any.
    pub fn with_expected_landmarks(mut self, count: Option<usize>) -> Self {
        self.expected_landmarks = count;
        self
    }

    pub fn with_marker_radius(mut self, radius: i32) -> Self {
        self.marker_radius = radius;
        self
    }

    pub fn with_marker_color(mut self, color: [u8; 3]) -> Self {
        self.marker_color = color;
        self
    }

    /// Check the settings that cannot be used as given.
    ///
    /// # Errors
    ///
    /// Returns `InferError::InvalidConfig` if the target size is zero or
    /// larger than an image side can be.
    pub fn validate(&self) -> Result<(), InferError> {
        if self.target_size == 0 || u32::try_from(self.target_size).is_err() {
            return Err(InferError::InvalidConfig(format!(
                "target size {} is outside 1..={}",
                self.target_size,
                u32::MAX
            )));
        }
        Ok(())
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    pub fn input_name(&self) -> Option<&str> {
        self.input_name.as_deref()
    }

    pub fn output_index(&self) -> usize {
        self.output_index
    }

    pub fn expected_landmarks(&self) -> Option<usize> {
        self.expected_landmarks
    }

    pub fn marker_radius(&self) -> i32 {
        self.marker_radius
    }

    pub fn marker_color(&self) -> [u8; 3] {
        self.marker_color
    }
}
