use crate::Frame;
use facemark_base::Vec2;

/// Landmark marker radius in pixels.
pub const MARKER_RADIUS: i32 = 2;

/// Landmark marker colour (red).
pub const MARKER_COLOR: [u8; 3] = [255, 0, 0];

/// Draw a filled circle, clipping to the frame.
///
/// Only the part of the bounding square that overlaps the frame is visited,
/// so the cost is bounded by the frame size whatever the radius.
pub fn draw_filled_circle(frame: &mut Frame, center: Vec2<i32>, radius: i32, color: [u8; 3]) {
    if radius < 0 {
        return;
    }
    let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
    let r2 = r * r;

    let x0 = (cx - r).max(0);
    let x1 = (cx + r).min(frame.width() as i64 - 1);
    let y0 = (cy - r).max(0);
    let y1 = (cy + r).min(frame.height() as i64 - 1);

    for y in y0..=y1 {
        let dy = y - cy;
        for x in x0..=x1 {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                frame.set_pixel(x as usize, y as usize, color);
            }
        }
    }
}

/// Draw one marker per point and return how many points were not skipped.
///
/// Points are rounded to the nearest pixel. Non-finite points are skipped;
/// points outside the frame are clipped (partially drawn or not at all).
pub fn draw_markers<I>(frame: &mut Frame, points: I, radius: i32, color: [u8; 3]) -> usize
where
    I: IntoIterator<Item = Vec2<f32>>,
{
    let mut drawn = 0;
    for point in points {
        if !point.is_finite() {
            continue;
        }
        draw_filled_circle(frame, point.round_to_pixel(), radius, color);
        drawn += 1;
    }
    drawn
}
