use super::types::{Landmark, RawLandmarkOutput};
use crate::InferError;
use facemark_base::Tensor;

/// Map a signed 16-bit fixed-point coordinate onto `0..dimension`.
///
/// `-32768` maps to 0, `0` to the centre and `32767` to just under `dimension`.
/// Values outside the `i16` range are not clamped.
pub fn decode_value(value: f32, dimension: usize) -> f32 {
    ((value + 32768.0) / 65536.0) * dimension as f32
}

/// One landmark per output row, in row order.
pub fn decode(raw: &RawLandmarkOutput<'_>, frame_width: usize, frame_height: usize) -> Vec<Landmark> {
    raw.rows()
        .map(|(x, y)| {
            Landmark::new(
                decode_value(x, frame_width),
                decode_value(y, frame_height),
            )
        })
        .collect()
}

/// Validate `tensor` as landmark output and decode it.
pub fn decode_tensor(
    tensor: &Tensor<f32>,
    frame_width: usize,
    frame_height: usize,
) -> Result<Vec<Landmark>, InferError> {
    let raw = RawLandmarkOutput::from_tensor(tensor)?;
    Ok(decode(&raw, frame_width, frame_height))
}
