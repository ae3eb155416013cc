//! The mutable path construction API.
//!
//! Every operation takes the geometry to append plus an optional transform,
//! applied to the supplied coordinates at append time and never stored.
//! There are no error returns: degenerate inputs (zero radii, collinear
//! tangent points, over-large corner radii, singular transforms) degrade to
//! clamping or straight segments.

use crate::events::PathElement;
use crate::geom::Arc;
use crate::math::{point, vector, Angle, Point, Rect, Transform};
use crate::{MutablePath, Path};

use std::f32::consts::PI;

/// Control-point offset ratio approximating a quarter circle with one cubic
/// bezier.
const CONSTANT_FACTOR: f32 = 0.55228475;

#[inline]
fn apply(transform: Option<&Transform>, p: Point) -> Point {
    match transform {
        Some(mat) => mat.transform_point(p),
        None => p,
    }
}

impl MutablePath {
    /// Begin a new subpath at `to`.
    pub fn move_to(&mut self, to: Point, transform: Option<&Transform>) {
        let to = apply(transform, to);
        self.data_mut().move_to(to);
    }

    /// Add a line segment from the current position to `to`.
    pub fn line_to(&mut self, to: Point, transform: Option<&Transform>) {
        let to = apply(transform, to);
        self.data_mut().line_to(to);
    }

    /// Add a quadratic bezier segment from the current position.
    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point, transform: Option<&Transform>) {
        let ctrl = apply(transform, ctrl);
        let to = apply(transform, to);
        self.data_mut().quadratic_bezier_to(ctrl, to);
    }

    /// Add a cubic bezier segment from the current position.
    pub fn cubic_bezier_to(
        &mut self,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
        transform: Option<&Transform>,
    ) {
        let ctrl1 = apply(transform, ctrl1);
        let ctrl2 = apply(transform, ctrl2);
        let to = apply(transform, to);
        self.data_mut().cubic_bezier_to(ctrl1, ctrl2, to);
    }

    /// Close the current subpath, moving the current position back to the
    /// subpath's start.
    ///
    /// No-op if the path is empty, the subpath is already closed, or no
    /// drawable segment was added since the last move: calling it twice in a
    /// row appends exactly one close element.
    pub fn close(&mut self) {
        if self.data.need_moveto || !self.data.has_segments {
            return;
        }
        self.data_mut().close();
    }

    /// Move to the first point and add a line segment to each point after it.
    pub fn add_lines(&mut self, points: &[Point], transform: Option<&Transform>) {
        if points.is_empty() {
            return;
        }
        self.move_to(points[0], transform);
        for p in &points[1..] {
            self.line_to(*p, transform);
        }
    }

    /// Add `r` as a closed subpath of exactly five elements: a move to the
    /// min corner, three lines and a close.
    pub fn add_rectangle(&mut self, r: &Rect, transform: Option<&Transform>) {
        let min = r.min();
        let max = r.max();

        self.move_to(min, transform);
        self.line_to(point(max.x, min.y), transform);
        self.line_to(max, transform);
        self.line_to(point(min.x, max.y), transform);
        self.close();
    }

    /// [add_rectangle](Self::add_rectangle) for each rectangle of the slice.
    pub fn add_rectangles(&mut self, rects: &[Rect], transform: Option<&Transform>) {
        for r in rects {
            self.add_rectangle(r, transform);
        }
    }

    /// Add the ellipse inscribed in `r` as a closed subpath of four cubic
    /// bezier quarter arcs.
    ///
    /// The control points lie within `r`, so the path's bounding box matches
    /// `r`; the curve itself undershoots the true ellipse by a small bounded
    /// error.
    pub fn add_ellipse_in_rect(&mut self, r: &Rect, transform: Option<&Transform>) {
        let rx = r.size.width * 0.5;
        let ry = r.size.height * 0.5;
        let center = point(r.origin.x + rx, r.origin.y + ry);
        let dx = rx * CONSTANT_FACTOR;
        let dy = ry * CONSTANT_FACTOR;

        let east = point(center.x + rx, center.y);
        let north = point(center.x, center.y + ry);
        let west = point(center.x - rx, center.y);
        let south = point(center.x, center.y - ry);

        self.move_to(east, transform);
        self.cubic_bezier_to(
            point(east.x, center.y + dy),
            point(center.x + dx, north.y),
            north,
            transform,
        );
        self.cubic_bezier_to(
            point(center.x - dx, north.y),
            point(west.x, center.y + dy),
            west,
            transform,
        );
        self.cubic_bezier_to(
            point(west.x, center.y - dy),
            point(center.x - dx, south.y),
            south,
            transform,
        );
        self.cubic_bezier_to(
            point(center.x + dx, south.y),
            point(east.x, center.y - dy),
            east,
            transform,
        );
        self.close();
    }

    /// Add a rounded rectangle as a closed subpath of four straight edges
    /// and four quarter-arc cubics.
    ///
    /// `corner_width` is clamped to half of the rectangle's width and
    /// `corner_height` to half of its height; zero radii fall back to a
    /// plain rectangle.
    pub fn add_rounded_rectangle(
        &mut self,
        r: &Rect,
        corner_width: f32,
        corner_height: f32,
        transform: Option<&Transform>,
    ) {
        let rw = corner_width.max(0.0).min(r.size.width * 0.5);
        let rh = corner_height.max(0.0).min(r.size.height * 0.5);
        if rw == 0.0 || rh == 0.0 {
            self.add_rectangle(r, transform);
            return;
        }

        let min = r.min();
        let max = r.max();
        // Control offset from each arc endpoint toward the corner.
        let kw = rw * (1.0 - CONSTANT_FACTOR);
        let kh = rh * (1.0 - CONSTANT_FACTOR);

        self.move_to(point(min.x + rw, min.y), transform);
        self.line_to(point(max.x - rw, min.y), transform);
        self.cubic_bezier_to(
            point(max.x - kw, min.y),
            point(max.x, min.y + kh),
            point(max.x, min.y + rh),
            transform,
        );
        self.line_to(point(max.x, max.y - rh), transform);
        self.cubic_bezier_to(
            point(max.x, max.y - kh),
            point(max.x - kw, max.y),
            point(max.x - rw, max.y),
            transform,
        );
        self.line_to(point(min.x + rw, max.y), transform);
        self.cubic_bezier_to(
            point(min.x + kw, max.y),
            point(min.x, max.y - kh),
            point(min.x, max.y - rh),
            transform,
        );
        self.line_to(point(min.x, min.y + rh), transform);
        self.cubic_bezier_to(
            point(min.x, min.y + kh),
            point(min.x + kw, min.y),
            point(min.x + rw, min.y),
            transform,
        );
        self.close();
    }

    /// Add a circular arc sweeping from `start_angle` to `end_angle` around
    /// `center`, counterclockwise unless `clockwise` is set.
    ///
    /// If the path is not empty, a line segment connects the current
    /// position to the arc's start; otherwise the arc starts a subpath.
    pub fn add_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
        transform: Option<&Transform>,
    ) {
        let two_pi = 2.0 * PI;
        let delta = end_angle.radians - start_angle.radians;

        // Normalize the sweep into the requested direction, keeping full
        // turns as full turns.
        let sweep = if !clockwise {
            if delta >= two_pi {
                two_pi
            } else {
                ((delta % two_pi) + two_pi) % two_pi
            }
        } else if -delta >= two_pi {
            -two_pi
        } else {
            -((((-delta) % two_pi) + two_pi) % two_pi)
        };

        self.add_relative_arc(center, radius, start_angle, Angle::radians(sweep), transform);
    }

    /// Add a circular arc sweeping `sweep` (signed, counterclockwise
    /// positive) from `start_angle` around `center`.
    ///
    /// Same auto-connect behavior as [add_arc](Self::add_arc).
    pub fn add_relative_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: Angle,
        sweep: Angle,
        transform: Option<&Transform>,
    ) {
        let arc = Arc::circle(center, radius.abs(), start_angle, sweep);

        let start = arc.from();
        if self.data.verbs.is_empty() {
            self.move_to(start, transform);
        } else {
            self.line_to(start, transform);
        }

        arc.for_each_cubic_bezier(&mut |c| {
            self.cubic_bezier_to(c.ctrl1, c.ctrl2, c.to, transform);
        });
    }

    /// Add a line to the start of the arc of the given radius tangent to
    /// both the segment from the current position to `p1` and the segment
    /// from `p1` to `p2`, then the arc itself.
    ///
    /// Collinear points, coincident points or a non-positive radius degrade
    /// to a single line segment to `p1`.
    pub fn add_tangent_arc(
        &mut self,
        p1: Point,
        p2: Point,
        radius: f32,
        transform: Option<&Transform>,
    ) {
        // The tangent geometry is computed in path space: the transform
        // applies to the given points, not to the derived circle.
        let p1 = apply(transform, p1);
        let p2 = apply(transform, p2);
        let p0 = self.data.current;

        let v1 = p1 - p0;
        let v2 = p2 - p1;
        let cross = v1.cross(v2);

        if radius <= 0.0 || cross == 0.0 || v1.square_length() == 0.0 || v2.square_length() == 0.0 {
            self.data_mut().line_to(p1);
            return;
        }

        let d1 = v1.normalize();
        let d2 = v2.normalize();

        // Angle of the corner at p1, between the incoming and outgoing legs.
        let cos_theta = (-d1).dot(d2).max(-1.0).min(1.0);
        let half = cos_theta.acos() * 0.5;
        let tangent_dist = radius / half.tan();
        if !tangent_dist.is_finite() {
            self.data_mut().line_to(p1);
            return;
        }

        let t1 = p1 - d1 * tangent_dist;
        let t2 = p1 + d2 * tangent_dist;

        // The center sits at distance `radius` from t1, perpendicular to the
        // incoming leg, on the side the corner turns toward.
        let turn = if cross > 0.0 { 1.0 } else { -1.0 };
        let center = t1 + vector(-d1.y, d1.x) * (radius * turn);

        let start_angle = (t1 - center).angle_from_x_axis();
        let end_angle = (t2 - center).angle_from_x_axis();
        let mut sweep = (end_angle - start_angle).radians;
        if turn > 0.0 && sweep < 0.0 {
            sweep += 2.0 * PI;
        }
        if turn < 0.0 && sweep > 0.0 {
            sweep -= 2.0 * PI;
        }

        self.data_mut().line_to(t1);
        let arc = Arc::circle(center, radius, start_angle, Angle::radians(sweep));
        arc.for_each_cubic_bezier(&mut |c| {
            self.data_mut().cubic_bezier_to(c.ctrl1, c.ctrl2, c.to);
        });
    }

    /// Append a structural copy of another path's elements, transformed by
    /// the optional transform. The two paths share nothing afterwards.
    pub fn add_path(&mut self, other: &Path, transform: Option<&Transform>) {
        for element in other.elements() {
            match element {
                PathElement::MoveTo(to) => self.move_to(to, transform),
                PathElement::LineTo(to) => self.line_to(to, transform),
                PathElement::QuadraticTo { ctrl, to } => {
                    self.quadratic_bezier_to(ctrl, to, transform)
                }
                PathElement::CubicTo { ctrl1, ctrl2, to } => {
                    self.cubic_bezier_to(ctrl1, ctrl2, to, transform)
                }
                PathElement::Close => self.close(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rect;
    use std::f32::consts::FRAC_PI_2;

    fn element_kinds(path: &Path) -> Vec<char> {
        path.elements()
            .map(|element| match element {
                PathElement::MoveTo(_) => 'M',
                PathElement::LineTo(_) => 'L',
                PathElement::QuadraticTo { .. } => 'Q',
                PathElement::CubicTo { .. } => 'C',
                PathElement::Close => 'Z',
            })
            .collect()
    }

    fn assert_rect_approx(a: Rect, b: Rect, epsilon: f32) {
        assert!(
            (a.origin.x - b.origin.x).abs() < epsilon
                && (a.origin.y - b.origin.y).abs() < epsilon
                && (a.size.width - b.size.width).abs() < epsilon
                && (a.size.height - b.size.height).abs() < epsilon,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn rectangle_is_five_elements() {
        let r = rect(10.0, 20.0, 100.0, 200.0);
        let path = Path::from_rect(&r, None);

        assert_eq!(element_kinds(&path), vec!['M', 'L', 'L', 'L', 'Z']);
        assert_eq!(path.bounding_box(), r);

        let elements: Vec<_> = path.elements().collect();
        assert_eq!(elements[0], PathElement::MoveTo(point(10.0, 20.0)));
        assert_eq!(elements[1], PathElement::LineTo(point(110.0, 20.0)));
        assert_eq!(elements[2], PathElement::LineTo(point(110.0, 220.0)));
        assert_eq!(elements[3], PathElement::LineTo(point(10.0, 220.0)));
    }

    #[test]
    fn rectangles() {
        let mut builder = Path::builder();
        builder.add_rectangles(
            &[rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 1.0, 1.0)],
            None,
        );
        let path = builder.build();

        assert_eq!(
            element_kinds(&path),
            vec!['M', 'L', 'L', 'L', 'Z', 'M', 'L', 'L', 'L', 'Z']
        );
        assert_eq!(path.bounding_box(), rect(0.0, 0.0, 6.0, 6.0));
    }

    #[test]
    fn lines() {
        let mut builder = Path::builder();
        builder.add_lines(
            &[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)],
            None,
        );
        assert_eq!(element_kinds(&builder.to_path()), vec!['M', 'L', 'L']);

        let mut empty = Path::builder();
        empty.add_lines(&[], None);
        assert!(empty.is_empty());
    }

    #[test]
    fn ellipse_matches_rect() {
        let r = rect(10.0, 20.0, 100.0, 50.0);
        let path = Path::from_ellipse_in_rect(&r, None);

        assert_eq!(element_kinds(&path), vec!['M', 'C', 'C', 'C', 'C', 'Z']);
        assert_rect_approx(path.bounding_box(), r, 1e-3);
    }

    #[test]
    fn rounded_rectangle_clamps_radii() {
        let r = rect(0.0, 0.0, 100.0, 50.0);
        let path = Path::from_rounded_rectangle(&r, 30.0, 30.0, None);

        // corner_height is clamped to 25; the path must stay inside the rect.
        assert_eq!(
            element_kinds(&path),
            vec!['M', 'L', 'C', 'L', 'C', 'L', 'C', 'L', 'C', 'Z']
        );
        assert_rect_approx(path.bounding_box(), r, 1e-3);

        // The first edge runs between the clamped corner starts.
        let elements: Vec<_> = path.elements().collect();
        assert_eq!(elements[0], PathElement::MoveTo(point(30.0, 0.0)));
        assert_eq!(elements[1], PathElement::LineTo(point(70.0, 0.0)));
    }

    #[test]
    fn rounded_rectangle_zero_radius() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        let mut builder = Path::builder();
        builder.add_rounded_rectangle(&r, 0.0, 5.0, None);
        let path = builder.build();

        assert_eq!(element_kinds(&path), vec!['M', 'L', 'L', 'L', 'Z']);
    }

    #[test]
    fn arc_bounding_box() {
        let mut builder = Path::builder();
        builder.add_arc(
            point(50.0, 50.0),
            25.0,
            Angle::radians(0.0),
            Angle::radians(FRAC_PI_2),
            false,
            None,
        );
        let path = builder.build();

        assert!(!path.is_empty());
        // The whole arc stays within the circle's box, give or take the
        // bezier approximation tolerance.
        let bounds = path.bounding_box();
        assert!(bounds.min_x() >= 25.0 - 0.01);
        assert!(bounds.min_y() >= 25.0 - 0.01);
        assert!(bounds.max_x() <= 75.0 + 0.01);
        assert!(bounds.max_y() <= 75.0 + 0.01);
    }

    #[test]
    fn arc_auto_connect() {
        let mut builder = Path::builder();
        builder.move_to(point(0.0, 0.0), None);
        builder.add_arc(
            point(10.0, 0.0),
            5.0,
            Angle::radians(0.0),
            Angle::radians(FRAC_PI_2),
            false,
            None,
        );

        let elements: Vec<_> = builder.elements().collect();
        assert_eq!(elements[0], PathElement::MoveTo(point(0.0, 0.0)));
        assert_eq!(elements[1], PathElement::LineTo(point(15.0, 0.0)));
        assert!(matches!(elements[2], PathElement::CubicTo { .. }));
    }

    #[test]
    fn arc_on_empty_path_starts_with_move() {
        let mut builder = Path::builder();
        builder.add_arc(
            point(0.0, 0.0),
            1.0,
            Angle::radians(0.0),
            Angle::radians(PI),
            false,
            None,
        );

        let elements: Vec<_> = builder.elements().collect();
        assert_eq!(elements[0], PathElement::MoveTo(point(1.0, 0.0)));
        assert_eq!(element_kinds(&builder.to_path()), vec!['M', 'C', 'C']);
    }

    #[test]
    fn arc_clockwise() {
        let mut builder = Path::builder();
        builder.add_arc(
            point(0.0, 0.0),
            1.0,
            Angle::radians(FRAC_PI_2),
            Angle::radians(0.0),
            true,
            None,
        );
        let path = builder.build();

        assert_eq!(element_kinds(&path), vec!['M', 'C']);
        let last = path.current_point();
        assert!((last - point(1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn full_circle_relative_arc() {
        let mut builder = Path::builder();
        builder.add_relative_arc(
            point(0.0, 0.0),
            10.0,
            Angle::radians(0.0),
            Angle::radians(2.0 * PI),
            None,
        );
        let path = builder.build();

        assert_eq!(element_kinds(&path), vec!['M', 'C', 'C', 'C', 'C']);
        assert_rect_approx(path.bounding_box(), rect(-10.0, -10.0, 20.0, 20.0), 1e-2);
    }

    #[test]
    fn tangent_arc_right_angle() {
        let mut builder = Path::builder();
        builder.move_to(point(0.0, 0.0), None);
        builder.add_tangent_arc(point(10.0, 0.0), point(10.0, 10.0), 5.0, None);

        let elements: Vec<_> = builder.elements().collect();
        assert_eq!(elements[0], PathElement::MoveTo(point(0.0, 0.0)));
        assert_eq!(elements[1], PathElement::LineTo(point(5.0, 0.0)));
        assert!(matches!(elements[2], PathElement::CubicTo { .. }));
        assert_eq!(elements.len(), 3);

        let end = builder.current_point();
        assert!((end - point(10.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn tangent_arc_right_turn() {
        let mut builder = Path::builder();
        builder.move_to(point(0.0, 0.0), None);
        builder.add_tangent_arc(point(10.0, 0.0), point(10.0, -10.0), 5.0, None);

        let end = builder.current_point();
        assert!((end - point(10.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn tangent_arc_collinear_degrades_to_line() {
        let mut builder = Path::builder();
        builder.move_to(point(0.0, 0.0), None);
        builder.add_tangent_arc(point(5.0, 0.0), point(10.0, 0.0), 2.0, None);

        let elements: Vec<_> = builder.elements().collect();
        assert_eq!(
            elements,
            vec![
                PathElement::MoveTo(point(0.0, 0.0)),
                PathElement::LineTo(point(5.0, 0.0)),
            ]
        );
    }

    #[test]
    fn tangent_arc_zero_radius_degrades_to_line() {
        let mut builder = Path::builder();
        builder.move_to(point(0.0, 0.0), None);
        builder.add_tangent_arc(point(5.0, 5.0), point(10.0, 0.0), 0.0, None);

        assert_eq!(element_kinds(&builder.to_path()), vec!['M', 'L']);
        assert_eq!(builder.current_point(), point(5.0, 5.0));
    }

    #[test]
    fn add_path_with_transform() {
        let source = Path::from_rect(&rect(0.0, 0.0, 1.0, 1.0), None);

        let mut builder = Path::builder();
        builder.add_path(&source, Some(&Transform::translation(10.0, 10.0)));
        let path = builder.build();

        assert_eq!(element_kinds(&path), element_kinds(&source));
        assert_eq!(path.bounding_box(), rect(10.0, 10.0, 1.0, 1.0));
    }

    #[test]
    fn add_path_from_own_snapshot() {
        let mut builder = Path::builder();
        builder.add_rectangle(&rect(0.0, 0.0, 1.0, 1.0), None);
        let snapshot = builder.to_path();

        builder.add_path(&snapshot, None);

        assert_eq!(builder.elements().count(), 10);
        assert_eq!(snapshot.elements().count(), 5);
    }

    #[test]
    fn transform_applies_at_append_time() {
        let mat = Transform::rotation(Angle::radians(FRAC_PI_2));
        let mut builder = Path::builder();
        builder.move_to(point(1.0, 0.0), Some(&mat));
        // Rotating (1, 0) by a quarter turn lands on (0, 1).
        let stored = builder.current_point();
        assert!((stored - point(0.0, 1.0)).length() < 1e-6);
    }
}
