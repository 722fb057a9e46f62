//! Device pixel formats to interleaved RGB8.
//!
//! Every converter returns `None` when the buffer is shorter than the
//! dimensions require. Extra trailing bytes (row padding) are ignored.

// BT.601 full-range, fixed-point with 8 fractional bits
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    [r, g, b]
}

/// `[R, G, B, A, ...]` to `[R, G, B, ...]`.
pub fn rgba_to_rgb(data: &[u8], width: usize, height: usize) -> Option<Vec<u8>> {
    let expected = width.checked_mul(height)?.checked_mul(4)?;
    if data.len() < expected {
        return None;
    }
    Some(
        data[..expected]
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
    )
}

/// YUYV 4:2:2 (`[Y0, U, Y1, V]` per pixel pair) to RGB.
pub fn yuyv_to_rgb(data: &[u8], width: usize, height: usize) -> Option<Vec<u8>> {
    let pixels = width.checked_mul(height)?;
    let expected = pixels.checked_mul(2)?;
    if data.len() < expected || pixels % 2 != 0 {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixels * 3);
    for chunk in data[..expected].chunks_exact(4) {
        rgb.extend_from_slice(&yuv_to_rgb(chunk[0], chunk[1], chunk[3]));
        rgb.extend_from_slice(&yuv_to_rgb(chunk[2], chunk[1], chunk[3]));
    }
    Some(rgb)
}

/// NV21 (Y plane followed by interleaved V/U at quarter resolution) to RGB.
///
/// This is the layout Android camera stacks hand out for YUV_420_888 frames
/// packed into a single buffer.
pub fn nv21_to_rgb(data: &[u8], width: usize, height: usize) -> Option<Vec<u8>> {
    if width % 2 != 0 || height % 2 != 0 {
        return None;
    }
    let y_len = width.checked_mul(height)?;
    let expected = y_len.checked_add(y_len / 2)?;
    if data.len() < expected {
        return None;
    }

    let (y_plane, vu_plane) = data[..expected].split_at(y_len);
    let mut rgb = Vec::with_capacity(y_len * 3);
    for row in 0..height {
        let vu_row = &vu_plane[(row / 2) * width..];
        for col in 0..width {
            let vu = (col / 2) * 2;
            let y = y_plane[row * width + col];
            rgb.extend_from_slice(&yuv_to_rgb(y, vu_row[vu + 1], vu_row[vu]));
        }
    }
    Some(rgb)
}
