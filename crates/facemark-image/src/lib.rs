//! Frame handling for facemark.
//!
//! Frames are RGB8 `Tensor<u8>` buffers in HWC layout `[height, width, 3]`.
//! This crate decodes and encodes them through the `image` crate, rescales
//! and rotates them into the fixed model resolution and draws landmark
//! markers on them.

pub mod error;
pub mod frame;
pub mod normalize;
pub mod overlay;

pub use error::ImageError;
pub use frame::Frame;
pub use normalize::{Rotation, TARGET_SIZE, normalize, normalize_to};
pub use overlay::{MARKER_COLOR, MARKER_RADIUS, draw_filled_circle, draw_markers};

use image::{ExtendedColorType, ImageEncoder};

/// Decodes any container the `image` crate recognises into an RGB `Frame`.
///
/// Alpha is dropped and grey or 16-bit images are converted to RGB8.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_image(data: &[u8]) -> Result<Frame, ImageError> {
    let image = image::load_from_memory(data)?;
    Frame::from_rgb_image(image.to_rgb8())
}

/// Encodes a frame as PNG bytes.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            frame.data(),
            frame.width() as u32,
            frame.height() as u32,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Encodes a frame as JPEG bytes with `quality` in 1..=100.
pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            frame.data(),
            frame.width() as u32,
            frame.height() as u32,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}
