use crate::CameraError;
use crate::convert::{nv21_to_rgb, rgba_to_rgb, yuyv_to_rgb};
use facemark_image::{Frame, Rotation};
use std::fmt;
use tokio::sync::OwnedSemaphorePermit;

/// Pixel layout of a captured image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
    Yuyv,
    Nv21,
    /// A complete image file (JPEG, PNG, ...); dimensions come from its header.
    Encoded,
}

/// One image delivered by a camera, with the sensor rotation at capture time.
///
/// Dropping the image (or calling `close`) tells the source it may deliver
/// the next one.
pub struct CapturedImage {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
    rotation_degrees: i32,
    permit: Option<OwnedSemaphorePermit>,
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .field("rotation_degrees", &self.rotation_degrees)
            .field("in_flight", &self.permit.is_some())
            .finish()
    }
}

impl CapturedImage {
    /// Wrap a raw buffer. `width` and `height` are ignored for `PixelFormat::Encoded`.
    pub fn new(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
        rotation_degrees: i32,
    ) -> Self {
        Self {
            width,
            height,
            format,
            data,
            rotation_degrees,
            permit: None,
        }
    }

    /// An encoded image file (JPEG, PNG, ...).
    pub fn encoded(data: Vec<u8>, rotation_degrees: i32) -> Self {
        Self::new(0, 0, PixelFormat::Encoded, data, rotation_degrees)
    }

    pub(crate) fn with_permit(mut self, permit: OwnedSemaphorePermit) -> Self {
        self.permit = Some(permit);
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    /// The sensor rotation, if it is a multiple of 90 degrees.
    pub fn rotation(&self) -> Result<Rotation, CameraError> {
        Ok(Rotation::from_degrees(self.rotation_degrees)?)
    }

    /// Convert the buffer to an RGB8 frame at its native resolution.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Malformed` if a raw buffer is too short for its
    /// dimensions, and `CameraError::Decode` if an encoded image cannot be read.
    pub fn to_frame(&self) -> Result<Frame, CameraError> {
        let (w, h) = (self.width, self.height);
        let rgb = match self.format {
            PixelFormat::Encoded => return Ok(facemark_image::decode_image(&self.data)?),
            PixelFormat::Rgb8 => {
                let expected = w.saturating_mul(h).saturating_mul(3);
                (self.data.len() >= expected).then(|| self.data[..expected].to_vec())
            }
            PixelFormat::Rgba8 => rgba_to_rgb(&self.data, w, h),
            PixelFormat::Yuyv => yuyv_to_rgb(&self.data, w, h),
            PixelFormat::Nv21 => nv21_to_rgb(&self.data, w, h),
        };

        let rgb = rgb.ok_or_else(|| {
            CameraError::Malformed(format!(
                "{:?} buffer of {} bytes does not hold a {}x{} image",
                self.format,
                self.data.len(),
                w,
                h
            ))
        })?;
        Ok(Frame::new(w, h, rgb)?)
    }

    /// Release the image back to its source.
    pub fn close(self) {}
}
