use crate::{Frame, ImageError};
use image::imageops::{self, FilterType};

/// Side length of the square frame fed to the landmark model.
pub const TARGET_SIZE: usize = 256;

/// Clockwise sensor rotation, as reported alongside each captured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse any multiple of 90, wrapping negative values and full turns.
    pub fn from_degrees(degrees: i32) -> Result<Self, ImageError> {
        if degrees % 90 != 0 {
            return Err(ImageError::UnsupportedRotation(degrees));
        }
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            _ => Ok(Rotation::Deg270),
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = ImageError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

/// Rescale to `TARGET_SIZE` x `TARGET_SIZE` and rotate.
pub fn normalize(frame: &Frame, rotation: Rotation) -> Frame {
    normalize_to(frame, TARGET_SIZE, rotation)
}

/// Rescale to `size` x `size` with nearest-neighbour sampling, then rotate clockwise.
///
/// The aspect ratio is not preserved. Because the output is square, every
/// rotation keeps all content and the output size is always `size` x `size`.
///
/// # Panics
///
/// If `size` is zero or does not fit in a `u32`.
pub fn normalize_to(frame: &Frame, size: usize, rotation: Rotation) -> Frame {
    let mut image = frame.to_rgb_image();
    if frame.width() != size || frame.height() != size {
        image = imageops::resize(&image, size as u32, size as u32, FilterType::Nearest);
    }

    let image = match rotation {
        Rotation::Deg0 => image,
        Rotation::Deg90 => imageops::rotate90(&image),
        Rotation::Deg180 => imageops::rotate180(&image),
        Rotation::Deg270 => imageops::rotate270(&image),
    };

    match Frame::from_rgb_image(image) {
        Ok(frame) => frame,
        Err(_) => unreachable!("a resized frame is never empty"),
    }
}
