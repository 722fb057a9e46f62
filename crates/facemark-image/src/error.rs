use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Encode(String),
    Tensor(facemark_base::TensorError),
    InvalidDimensions { width: usize, height: usize, channels: usize },
    UnsupportedRotation(i32),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
            ImageError::InvalidDimensions {
                width,
                height,
                channels,
            } => write!(
                f,
                "invalid frame dimensions: {width}x{height}x{channels}, expected non-empty RGB"
            ),
            ImageError::UnsupportedRotation(degrees) => {
                write!(f, "unsupported rotation: {degrees} degrees is not a multiple of 90")
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<facemark_base::TensorError> for ImageError {
    fn from(err: facemark_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
