use super::types::ChannelOrder;
use facemark_base::Tensor;
use facemark_image::Frame;

/// Encode an RGB frame as a `[1, 3, H, W]` planar tensor.
///
/// Byte values are copied as floats without scaling, so every element is in
/// `0.0..=255.0`. The three planes follow `order`.
pub fn encode(frame: &Frame, order: ChannelOrder) -> Tensor<f32> {
    let (w, h) = (frame.width(), frame.height());
    let plane = w * h;
    let pixels = frame.data();

    let mut tensor = Tensor {
        shape: vec![1, 3, h, w],
        data: vec![0.0f32; 3 * plane],
    };
    for (dst, src_channel) in order.planes().into_iter().enumerate() {
        let out = &mut tensor.data[dst * plane..(dst + 1) * plane];
        for (value, pixel) in out.iter_mut().zip(pixels.chunks_exact(3)) {
            *value = pixel[src_channel] as f32;
        }
    }
    tensor
}
