use crate::ImageError;
use facemark_base::tensor::element_count;
use facemark_base::{Tensor, TensorError};
use image::RgbImage;

/// An RGB8 image held as a `Tensor<u8>` with shape `[height, width, 3]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Tensor<u8>,
}

impl Frame {
    pub const CHANNELS: usize = 3;

    /// Wrap interleaved RGB bytes (row-major, 3 bytes per pixel).
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        Self::from_tensor(Tensor::new(vec![height, width, Self::CHANNELS], data)?)
    }

    /// A frame where every pixel has the same colour.
    pub fn solid(width: usize, height: usize, color: [u8; 3]) -> Result<Self, ImageError> {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(width * height * Self::CHANNELS)
            .collect();
        Self::new(width, height, data)
    }

    /// Accepts an HWC tensor with exactly three channels, non-zero extent and
    /// a buffer matching its shape.
    pub fn from_tensor(pixels: Tensor<u8>) -> Result<Self, ImageError> {
        let dim = |i: usize| pixels.shape.get(i).copied().unwrap_or(0);
        let (height, width, channels) = (dim(0), dim(1), dim(2));
        if pixels.ndim() != 3 || channels != Self::CHANNELS || height == 0 || width == 0 {
            return Err(ImageError::InvalidDimensions {
                width,
                height,
                channels,
            });
        }
        let expected = element_count(&pixels.shape)?;
        if expected != pixels.data.len() {
            return Err(ImageError::Tensor(TensorError::ShapeMismatch {
                expected,
                got: pixels.data.len(),
            }));
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> usize {
        self.pixels.shape[1]
    }

    pub fn height(&self) -> usize {
        self.pixels.shape[0]
    }

    pub fn data(&self) -> &[u8] {
        &self.pixels.data
    }

    pub fn as_tensor(&self) -> &Tensor<u8> {
        &self.pixels
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        self.pixels
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width() && y < self.height()).then(|| (y * self.width() + x) * Self::CHANNELS)
    }

    /// Colour at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        let i = self.offset(x, y)?;
        let p = &self.pixels.data[i..i + Self::CHANNELS];
        Some([p[0], p[1], p[2]])
    }

    /// Set the colour at `(x, y)`. Returns false and does nothing outside the frame.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: [u8; 3]) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.pixels.data[i..i + Self::CHANNELS].copy_from_slice(&color);
                true
            }
            None => false,
        }
    }

    pub fn from_rgb_image(image: RgbImage) -> Result<Self, ImageError> {
        let (width, height) = image.dimensions();
        Self::new(width as usize, height as usize, image.into_raw())
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        match RgbImage::from_raw(
            self.width() as u32,
            self.height() as u32,
            self.pixels.data.clone(),
        ) {
            Some(image) => image,
            None => unreachable!("frame buffer always matches its dimensions"),
        }
    }
}
