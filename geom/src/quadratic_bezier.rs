use crate::line::LineSegment;
use crate::math::Point;
use crate::MAX_FLATTEN_RECURSION;

/// A 2d curve segment defined by three points: the beginning of the segment,
/// a control point and the end of the segment.
///
/// The curve is defined by equation:
/// `∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to`
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    /// Sample the curve at t (between 0.0 and 1.0).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * 2.0 * one_t * t + self.to.to_vector() * t2
    }

    /// Split this curve into two sub-curves at the half-way point.
    pub fn split_in_half(&self) -> (Self, Self) {
        let ctrl_a = self.from.lerp(self.ctrl, 0.5);
        let ctrl_b = self.ctrl.lerp(self.to, 0.5);
        let mid = ctrl_a.lerp(ctrl_b, 0.5);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: ctrl_a,
                to: mid,
            },
            QuadraticBezierSegment {
                from: mid,
                ctrl: ctrl_b,
                to: self.to,
            },
        )
    }

    // Squared deviation bound of the curve from its chord. The maximum
    // distance between curve and chord is at most sqrt(flatness²) / 4.
    fn flatness_squared(&self) -> f32 {
        let d = self.ctrl.to_vector() * 2.0 - self.from.to_vector() - self.to.to_vector();

        d.square_length()
    }

    /// Conservative vertical range, from the hull of the control points.
    pub fn fast_bounding_range_y(&self) -> (f32, f32) {
        let min = self.from.y.min(self.ctrl.y).min(self.to.y);
        let max = self.from.y.max(self.ctrl.y).max(self.to.y);

        (min, max)
    }

    /// Approximate the curve with a sequence of line segments, each at most
    /// `tolerance` away from the curve.
    ///
    /// The segments are produced in order and join exactly: the first starts
    /// at `from` and the last ends at `to`.
    pub fn for_each_flattened<F>(&self, tolerance: f32, callback: &mut F)
    where
        F: FnMut(&LineSegment),
    {
        debug_assert!(tolerance > 0.0);
        self.flatten_recursive(16.0 * tolerance * tolerance, MAX_FLATTEN_RECURSION, callback);
    }

    fn flatten_recursive<F>(&self, sq_tolerance: f32, depth: u32, callback: &mut F)
    where
        F: FnMut(&LineSegment),
    {
        if depth == 0 || self.flatness_squared() <= sq_tolerance {
            callback(&LineSegment {
                from: self.from,
                to: self.to,
            });
            return;
        }

        let (a, b) = self.split_in_half();
        a.flatten_recursive(sq_tolerance, depth - 1, callback);
        b.flatten_recursive(sq_tolerance, depth - 1, callback);
    }
}
