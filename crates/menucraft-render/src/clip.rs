//! Clip mask outlines for shaped images.

use kurbo::{BezPath, Circle, Point, Rect, Shape};
use menucraft_core::model::ClipShape;
use std::f64::consts::PI;

/// Flattening tolerance for curve-to-path conversion.
const TOLERANCE: f64 = 0.1;

/// Outline of `shape` fitted to `rect`.
///
/// Round masks use the smaller side so they stay regular inside
/// non-square boxes.
pub fn clip_path(shape: ClipShape, rect: Rect) -> BezPath {
    let center = rect.center();
    let min_side = rect.width().min(rect.height());
    match shape {
        ClipShape::Rectangle => rect.to_path(TOLERANCE),
        ClipShape::Circle => Circle::new(center, min_side / 2.0).to_path(TOLERANCE),
        ClipShape::Triangle => polygon(&[
            Point::new(center.x, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ]),
        ClipShape::Hexagon => {
            let radius = min_side / 2.0;
            let points: Vec<Point> = (0..6)
                .map(|i| {
                    let angle = i as f64 * PI / 3.0;
                    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                })
                .collect();
            polygon(&points)
        }
        ClipShape::Star => {
            let outer = min_side / 2.0;
            let inner = outer / 2.0;
            let points: Vec<Point> = (0..10)
                .map(|i| {
                    let radius = if i % 2 == 0 { outer } else { inner };
                    let angle = i as f64 * PI / 5.0 - PI / 2.0;
                    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                })
                .collect();
            polygon(&points)
        }
        ClipShape::Heart => heart(rect),
    }
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Two mirrored cubic lobes meeting at the bottom tip.
fn heart(rect: Rect) -> BezPath {
    let s = rect.width().min(rect.height());
    let cx = rect.center().x;
    let cy = rect.center().y - s * 0.05;

    let mut path = BezPath::new();
    path.move_to((cx, cy + s * 0.3));
    path.curve_to(
        (cx - s * 0.5, cy),
        (cx - s * 0.5, cy - s * 0.3),
        (cx, cy - s * 0.3),
    );
    path.curve_to(
        (cx + s * 0.5, cy - s * 0.3),
        (cx + s * 0.5, cy),
        (cx, cy + s * 0.3),
    );
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(path: &BezPath, x: f64, y: f64) -> bool {
        path.contains(Point::new(x, y))
    }

    #[test]
    fn test_circle_uses_smaller_side() {
        let path = clip_path(ClipShape::Circle, Rect::new(0.0, 0.0, 200.0, 100.0));
        let bbox = path.bounding_box();
        assert!((bbox.width() - 100.0).abs() < 0.5);
        assert!((bbox.center().x - 100.0).abs() < 0.5);
        assert!(!contains(&path, 10.0, 50.0));
        assert!(contains(&path, 100.0, 50.0));
    }

    #[test]
    fn test_triangle_vertices() {
        let path = clip_path(ClipShape::Triangle, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(contains(&path, 50.0, 90.0));
        assert!(!contains(&path, 5.0, 5.0));
        assert!(!contains(&path, 95.0, 5.0));
    }

    #[test]
    fn test_star_has_ten_points() {
        let path = clip_path(ClipShape::Star, Rect::new(0.0, 0.0, 100.0, 100.0));
        // move_to + 9 line_to + close
        assert_eq!(path.elements().len(), 11);
        // Top point sits on the outer radius
        let bbox = path.bounding_box();
        assert!(bbox.y0.abs() < 1e-9);
        assert!(contains(&path, 50.0, 50.0));
    }

    #[test]
    fn test_hexagon_is_regular() {
        let path = clip_path(ClipShape::Hexagon, Rect::new(0.0, 0.0, 100.0, 100.0));
        let bbox = path.bounding_box();
        assert!((bbox.width() - 100.0).abs() < 1e-9);
        assert!((bbox.height() - 100.0 * (3.0_f64).sqrt() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_heart_contains_center_not_corners() {
        let path = clip_path(ClipShape::Heart, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(contains(&path, 50.0, 50.0));
        assert!(!contains(&path, 2.0, 98.0));
    }

    #[test]
    fn test_rectangle_matches_box() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(clip_path(ClipShape::Rectangle, rect).bounding_box(), rect);
    }
}
