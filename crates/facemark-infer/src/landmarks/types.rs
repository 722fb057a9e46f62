use crate::InferError;
use facemark_base::{Tensor, Vec2};

/// Number of landmarks the face landmark model reports per frame.
pub const LANDMARK_COUNT: usize = 106;

/// A single landmark in pixel coordinates of the analyzed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub position: Vec2<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }
}

/// Plane order of the encoded input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelOrder {
    /// Source channel index for each output plane.
    pub fn planes(&self) -> [usize; 3] {
        match self {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Bgr => [2, 1, 0],
        }
    }
}

/// Validated view over a landmark model output.
///
/// Accepts `[count, k]` or `[1, count, k]` with `k >= 2`. Only the first two
/// components of each row are read.
#[derive(Debug, Clone, Copy)]
pub struct RawLandmarkOutput<'a> {
    data: &'a [f32],
    count: usize,
    stride: usize,
}

impl<'a> RawLandmarkOutput<'a> {
    pub fn from_tensor(tensor: &'a Tensor<f32>) -> Result<Self, InferError> {
        let (count, stride) = match tensor.shape.as_slice() {
            &[count, k] if k >= 2 => (count, k),
            &[1, count, k] if k >= 2 => (count, k),
            _ => {
                return Err(InferError::ShapeMismatch {
                    expected: "[N, K] or [1, N, K] with K >= 2".to_string(),
                    got: format!("{:?}", tensor.shape),
                });
            }
        };

        // fields are public, so the buffer may disagree with the shape
        if count.checked_mul(stride) != Some(tensor.data.len()) {
            return Err(InferError::ShapeMismatch {
                expected: format!("a buffer matching shape {:?}", tensor.shape),
                got: format!("{} values", tensor.data.len()),
            });
        }

        Ok(Self {
            data: &tensor.data,
            count,
            stride,
        })
    }

    /// Number of landmark rows.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Values per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Components 0 and 1 of `row`.
    pub fn row(&self, row: usize) -> Option<(f32, f32)> {
        if row >= self.count {
            return None;
        }
        let base = row * self.stride;
        Some((self.data[base], self.data[base + 1]))
    }

    pub fn rows(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.data
            .chunks_exact(self.stride)
            .take(self.count)
            .map(|row| (row[0], row[1]))
    }
}
