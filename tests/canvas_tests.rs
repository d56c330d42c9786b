use collabrx_scene::render::{Canvas, DrawOp, Rgba};

const RED: Rgba = Rgba::new(255, 0, 0, 255);
const GREEN: Rgba = Rgba::new(0, 255, 0, 255);
const BLUE: Rgba = Rgba::new(0, 0, 255, 255);
const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

// ============================================================================
// Canvas Core Functionality Tests
// ============================================================================

#[test]
fn test_canvas_new() {
    let canvas = Canvas::new(640, 480);
    assert_eq!(canvas.dimensions(), (640, 480));
    assert_eq!(canvas.pixels().len(), 640 * 480 * 4);
    assert_eq!(canvas.alpha().len(), 640 * 480);
    assert_eq!(canvas.pixel(0, 0), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_canvas_clear_opaque() {
    let canvas = Canvas::new(100, 100)
        .draw(DrawOp::Clear(Rgba::new(255, 128, 64, 255)))
        .execute_ops();

    assert_eq!(canvas.pixel(0, 0), Some(Rgba::new(255, 128, 64, 255)));
    assert_eq!(canvas.pixel(50, 50), Some(Rgba::new(255, 128, 64, 255)));
    assert_eq!(canvas.pixel(99, 99), Some(Rgba::new(255, 128, 64, 255)));
    assert!(canvas.alpha().iter().all(|a| *a == 1.0));
}

#[test]
fn test_canvas_clear_semi_transparent() {
    let canvas = Canvas::new(50, 50)
        .draw(DrawOp::Clear(Rgba::new(200, 150, 100, 128)))
        .execute_ops();

    let expected_alpha = 128.0 / 255.0;
    for a in canvas.alpha() {
        assert!((*a - expected_alpha).abs() < 0.01);
    }
}

#[test]
fn test_canvas_pixel_edge_cases() {
    let canvas = Canvas::new(100, 100)
        .draw(DrawOp::Pixel { x: 0, y: 0, color: RED })
        .draw(DrawOp::Pixel { x: 99, y: 99, color: GREEN })
        .draw(DrawOp::Pixel { x: 0, y: 99, color: BLUE })
        .draw(DrawOp::Pixel { x: -1, y: 100, color: RED })
        .execute_ops();

    assert_eq!(canvas.pixel(0, 0), Some(RED));
    assert_eq!(canvas.pixel(99, 99), Some(GREEN));
    assert_eq!(canvas.pixel(0, 99), Some(BLUE));
    assert_eq!(canvas.pixel(100, 100), None);
}

#[test]
fn test_execute_drains_pending_ops() {
    let mut canvas = Canvas::new(10, 10);
    canvas.push(DrawOp::Clear(BLACK));
    canvas.push(DrawOp::Pixel { x: 1, y: 1, color: RED });
    assert_eq!(canvas.pending(), 2);

    let canvas = canvas.execute_ops();
    assert_eq!(canvas.pending(), 0);
}

// ============================================================================
// Line Drawing Tests
// ============================================================================

#[test]
fn test_line_includes_both_endpoints() {
    let canvas = Canvas::new(100, 100)
        .draw(DrawOp::Line { x1: 10, y1: 50, x2: 29, y2: 50, color: RED })
        .execute_ops();

    for x in 10..30 {
        assert_eq!(canvas.pixel(x, 50), Some(RED), "Failed at x={}", x);
    }
    assert_eq!(canvas.pixel(30, 50), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_line_clipped_by_canvas_edge() {
    let canvas = Canvas::new(20, 20)
        .draw(DrawOp::Line { x1: -10, y1: 5, x2: 30, y2: 5, color: GREEN })
        .execute_ops();

    assert_eq!(canvas.pixel(0, 5), Some(GREEN));
    assert_eq!(canvas.pixel(19, 5), Some(GREEN));
}

#[test]
fn test_dashed_line_pattern() {
    let canvas = Canvas::new(40, 10)
        .draw(DrawOp::Clear(BLACK))
        .draw(DrawOp::DashedLine { x1: 0, y1: 2, x2: 39, y2: 2, dash: 3, gap: 2, color: RED })
        .execute_ops();

    let lit: Vec<bool> = (0..10).map(|x| canvas.pixel(x, 2) == Some(RED)).collect();
    assert_eq!(
        lit,
        vec![true, true, true, false, false, true, true, true, false, false]
    );
}

// ============================================================================
// Shape Tests
// ============================================================================

#[test]
fn test_circle_outline_leaves_center_empty() {
    let canvas = Canvas::new(50, 50)
        .draw(DrawOp::Circle { cx: 25, cy: 25, radius: 10, color: BLUE })
        .execute_ops();

    assert_eq!(canvas.pixel(35, 25), Some(BLUE));
    assert_eq!(canvas.pixel(25, 15), Some(BLUE));
    assert_eq!(canvas.pixel(25, 25), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_filled_circle_zero_radius_is_single_pixel() {
    let canvas = Canvas::new(10, 10)
        .draw(DrawOp::FilledCircle { cx: 4, cy: 4, radius: 0, color: RED })
        .execute_ops();

    let painted = canvas.alpha().iter().filter(|a| **a > 0.0).count();
    assert_eq!(painted, 1);
    assert_eq!(canvas.pixel(4, 4), Some(RED));
}

#[test]
fn test_later_ops_paint_over_earlier_ones() {
    let canvas = Canvas::new(50, 50)
        .draw(DrawOp::FilledCircle { cx: 20, cy: 25, radius: 10, color: RED })
        .draw(DrawOp::FilledCircle { cx: 30, cy: 25, radius: 10, color: BLUE })
        .execute_ops();

    assert_eq!(canvas.pixel(12, 25), Some(RED));
    assert_eq!(canvas.pixel(25, 25), Some(BLUE));
}

#[test]
fn test_degenerate_triangle_draws_nothing() {
    let canvas = Canvas::new(20, 20)
        .draw(DrawOp::Triangle { vertices: [(1.0, 1.0), (10.0, 10.0), (19.0, 19.0)], color: RED })
        .execute_ops();

    assert!(canvas.alpha().iter().all(|a| *a == 0.0));
}

#[test]
fn test_translucent_triangle_blends_with_background() {
    let canvas = Canvas::new(20, 20)
        .draw(DrawOp::Clear(BLACK))
        .draw(DrawOp::Triangle {
            vertices: [(0.0, 0.0), (20.0, 0.0), (0.0, 20.0)],
            color: Rgba::new(255, 255, 255, 128),
        })
        .execute_ops();

    let px = canvas.pixel(2, 2).unwrap();
    assert!((125..=130).contains(&px.r), "{:?}", px);
    assert_eq!(px.a, 255);
    assert_eq!(canvas.pixel(18, 18), Some(BLACK));
}
