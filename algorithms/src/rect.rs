//! Detect paths that trace a single axis-aligned rectangle.

use crate::math::{rect, Rect};
use crate::path::{Path, PathElement};

/// If `path` consists of exactly one closed subpath of exactly five elements
/// (a move, three lines and a close) tracing an axis-aligned rectangle with
/// nonzero area, returns that rectangle, normalized to a positive size with
/// its origin at the min corner.
///
/// Anything else - curves, extra subpaths, unclosed outlines, slanted or
/// degenerate edges - returns `None`. This is a strict structural check, not
/// a tolerant geometric one: a rectangle drawn with an explicit closing line
/// (four lines and a close) is not recognized.
pub fn to_axis_aligned_rectangle(path: &Path) -> Option<Rect> {
    let mut elements = path.elements();

    let p0 = match elements.next() {
        Some(PathElement::MoveTo(p)) => p,
        _ => return None,
    };
    let p1 = match elements.next() {
        Some(PathElement::LineTo(p)) => p,
        _ => return None,
    };
    let p2 = match elements.next() {
        Some(PathElement::LineTo(p)) => p,
        _ => return None,
    };
    let p3 = match elements.next() {
        Some(PathElement::LineTo(p)) => p,
        _ => return None,
    };
    match elements.next() {
        Some(PathElement::Close) => {}
        _ => return None,
    }
    if elements.next().is_some() {
        return None;
    }

    // Edges must alternate horizontal/vertical, including the closing edge
    // back to p0.
    let horizontal_first = p0.y == p1.y && p1.x == p2.x && p2.y == p3.y && p3.x == p0.x;
    let vertical_first = p0.x == p1.x && p1.y == p2.y && p2.x == p3.x && p3.y == p0.y;
    if !horizontal_first && !vertical_first {
        return None;
    }

    let min_x = p0.x.min(p2.x);
    let max_x = p0.x.max(p2.x);
    let min_y = p0.y.min(p2.y);
    let max_y = p0.y.max(p2.y);
    if min_x == max_x || min_y == max_y {
        return None;
    }

    Some(rect(min_x, min_y, max_x - min_x, max_y - min_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{point, Angle, Transform};

    #[test]
    fn recognizes_rectangle_paths() {
        let r = rect(10.0, 20.0, 100.0, 200.0);
        let path = Path::from_rect(&r, None);

        assert_eq!(to_axis_aligned_rectangle(&path), Some(r));
    }

    #[test]
    fn normalizes_winding_and_start_corner() {
        // Start at the max corner and wind the other way.
        let mut builder = Path::builder();
        builder.move_to(point(5.0, 7.0), None);
        builder.line_to(point(5.0, 2.0), None);
        builder.line_to(point(1.0, 2.0), None);
        builder.line_to(point(1.0, 7.0), None);
        builder.close();
        let path = builder.build();

        assert_eq!(
            to_axis_aligned_rectangle(&path),
            Some(rect(1.0, 2.0, 4.0, 5.0))
        );
    }

    #[test]
    fn rejects_ellipses() {
        let path = Path::from_ellipse_in_rect(&rect(0.0, 0.0, 10.0, 10.0), None);
        assert_eq!(to_axis_aligned_rectangle(&path), None);
    }

    #[test]
    fn rejects_unclosed_outline() {
        let mut builder = Path::builder();
        builder.add_lines(
            &[
                point(0.0, 0.0),
                point(4.0, 0.0),
                point(4.0, 4.0),
                point(0.0, 4.0),
            ],
            None,
        );
        let path = builder.build();

        assert_eq!(to_axis_aligned_rectangle(&path), None);
    }

    #[test]
    fn rejects_explicit_closing_line() {
        let mut builder = Path::builder();
        builder.add_lines(
            &[
                point(0.0, 0.0),
                point(4.0, 0.0),
                point(4.0, 4.0),
                point(0.0, 4.0),
                point(0.0, 0.0),
            ],
            None,
        );
        builder.close();
        let path = builder.build();

        // Six elements, not five.
        assert_eq!(to_axis_aligned_rectangle(&path), None);
    }

    #[test]
    fn rejects_multiple_subpaths() {
        let mut builder = Path::builder();
        builder.add_rectangle(&rect(0.0, 0.0, 1.0, 1.0), None);
        builder.add_rectangle(&rect(2.0, 2.0, 1.0, 1.0), None);
        let path = builder.build();

        assert_eq!(to_axis_aligned_rectangle(&path), None);
    }

    #[test]
    fn rejects_rotated_rectangle() {
        let rotation = Transform::rotation(Angle::radians(0.5));
        let path = Path::from_rect(&rect(0.0, 0.0, 4.0, 4.0), Some(&rotation));

        assert_eq!(to_axis_aligned_rectangle(&path), None);
    }

    #[test]
    fn rejects_degenerate_rectangle() {
        let path = Path::from_rect(&rect(1.0, 1.0, 0.0, 5.0), None);
        assert_eq!(to_axis_aligned_rectangle(&path), None);
    }

    #[test]
    fn rejects_quadrilateral() {
        let mut builder = Path::builder();
        builder.move_to(point(0.0, 0.0), None);
        builder.line_to(point(4.0, 0.0), None);
        builder.line_to(point(5.0, 4.0), None);
        builder.line_to(point(0.0, 4.0), None);
        builder.close();
        let path = builder.build();

        assert_eq!(to_axis_aligned_rectangle(&path), None);
    }

    #[test]
    fn rejects_empty_path() {
        assert_eq!(to_axis_aligned_rectangle(&Path::new()), None);
    }
}
