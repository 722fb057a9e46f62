use facemark_base::Vec2;
use facemark_image::{Frame, MARKER_COLOR, MARKER_RADIUS, draw_filled_circle, draw_markers};

const BLACK: [u8; 3] = [0, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];

fn coloured(frame: &Frame, color: [u8; 3]) -> usize {
    frame.data().chunks_exact(3).filter(|p| *p == color).count()
}

#[test]
fn test_draw_filled_circle_basic() {
    let mut frame = Frame::solid(20, 20, BLACK).unwrap();
    draw_filled_circle(&mut frame, Vec2::new(10, 10), 3, GREEN);

    assert_eq!(frame.pixel(10, 10), Some(GREEN));
    assert_eq!(frame.pixel(12, 10), Some(GREEN));
    assert_eq!(frame.pixel(15, 10), Some(BLACK));
    // lattice points with dx^2 + dy^2 <= 9
    assert_eq!(coloured(&frame, GREEN), 29);
}

#[test]
fn test_draw_filled_circle_clips_at_corner() {
    let mut frame = Frame::solid(10, 10, BLACK).unwrap();
    draw_filled_circle(&mut frame, Vec2::new(0, 0), 2, GREEN);

    assert_eq!(frame.pixel(0, 0), Some(GREEN));
    assert_eq!(frame.pixel(2, 0), Some(GREEN));
    assert_eq!(frame.pixel(0, 2), Some(GREEN));
    assert_eq!(frame.pixel(2, 2), Some(BLACK));
    assert_eq!(coloured(&frame, GREEN), 6);
}

#[test]
fn test_draw_filled_circle_fully_outside() {
    let mut frame = Frame::solid(10, 10, BLACK).unwrap();
    draw_filled_circle(&mut frame, Vec2::new(-50, 400), 2, GREEN);
    assert_eq!(coloured(&frame, GREEN), 0);
}

#[test]
fn test_draw_filled_circle_huge_radius_fills_frame() {
    let mut frame = Frame::solid(4, 4, BLACK).unwrap();
    draw_filled_circle(&mut frame, Vec2::new(1, 1), 50_000, GREEN);
    assert_eq!(coloured(&frame, GREEN), 16);

    let mut frame = Frame::solid(4, 4, BLACK).unwrap();
    draw_filled_circle(&mut frame, Vec2::new(i32::MIN, i32::MAX), i32::MAX, GREEN);
    assert_eq!(coloured(&frame, GREEN), 0);
}

#[test]
fn test_draw_filled_circle_negative_radius_draws_nothing() {
    let mut frame = Frame::solid(4, 4, BLACK).unwrap();
    draw_filled_circle(&mut frame, Vec2::new(1, 1), -1, GREEN);
    assert_eq!(coloured(&frame, GREEN), 0);
}

#[test]
fn test_draw_markers_rounds_and_skips_non_finite() {
    let mut frame = Frame::solid(32, 32, BLACK).unwrap();
    let points = vec![
        Vec2::new(4.6, 4.4),
        Vec2::new(f32::NAN, 3.0),
        Vec2::new(1.0e9, -1.0e9),
    ];

    let drawn = draw_markers(&mut frame, points, MARKER_RADIUS, MARKER_COLOR);

    assert_eq!(drawn, 2);
    assert_eq!(frame.pixel(5, 4), Some(MARKER_COLOR));
    assert_eq!(frame.pixel(0, 3), Some(BLACK));
    // radius 2 disc has 13 pixels
    assert_eq!(coloured(&frame, MARKER_COLOR), 13);
}
