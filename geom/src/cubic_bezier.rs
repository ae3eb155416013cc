use crate::line::LineSegment;
use crate::math::Point;
use crate::MAX_FLATTEN_RECURSION;

/// A 2d curve segment defined by four points: the beginning of the segment,
/// two control points and the end of the segment.
///
/// The curve is defined by equation:
/// `∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to`
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the curve at t (between 0.0 and 1.0).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Split this curve into two sub-curves at the half-way point.
    pub fn split_in_half(&self) -> (Self, Self) {
        let ctrl1a = self.from.lerp(self.ctrl1, 0.5);
        let ctrl12 = self.ctrl1.lerp(self.ctrl2, 0.5);
        let ctrl2b = self.ctrl2.lerp(self.to, 0.5);
        let ctrl2a = ctrl1a.lerp(ctrl12, 0.5);
        let ctrl1b = ctrl12.lerp(ctrl2b, 0.5);
        let mid = ctrl2a.lerp(ctrl1b, 0.5);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl2a,
                to: mid,
            },
            CubicBezierSegment {
                from: mid,
                ctrl1: ctrl1b,
                ctrl2: ctrl2b,
                to: self.to,
            },
        )
    }

    // Squared deviation bound of the curve from its chord, per axis.
    fn flatness_squared(&self) -> f32 {
        let u = self.ctrl1.to_vector() * 3.0 - self.from.to_vector() * 2.0 - self.to.to_vector();
        let v = self.ctrl2.to_vector() * 3.0 - self.from.to_vector() - self.to.to_vector() * 2.0;

        (u.x * u.x).max(v.x * v.x) + (u.y * u.y).max(v.y * v.y)
    }

    /// Conservative vertical range, from the hull of the control points.
    pub fn fast_bounding_range_y(&self) -> (f32, f32) {
        let min = self
            .from
            .y
            .min(self.ctrl1.y)
            .min(self.ctrl2.y)
            .min(self.to.y);
        let max = self
            .from
            .y
            .max(self.ctrl1.y)
            .max(self.ctrl2.y)
            .max(self.to.y);

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn sample_endpoints() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(1.0, 2.0),
            ctrl2: point(3.0, 2.0),
            to: point(4.0, 0.0),
        };

        assert_eq!(curve.sample(0.0), curve.from);
        assert_eq!(curve.sample(1.0), curve.to);
    }

    #[test]
    fn split_in_half_meets_sample() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(0.0, 100.0),
            ctrl2: point(100.0, 100.0),
            to: point(100.0, 0.0),
        };

        let (a, b) = curve.split_in_half();
        let mid = curve.sample(0.5);

        assert!((a.to - mid).length() < 1e-4);
        assert!((b.from - mid).length() < 1e-4);
        assert_eq!(a.from, curve.from);
        assert_eq!(b.to, curve.to);
    }

    #[test]
    fn flattened_chain_is_continuous() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(0.0, 100.0),
            ctrl2: point(100.0, 100.0),
            to: point(100.0, 0.0),
        };

        let mut previous = None;
        let mut count = 0;
        curve.for_each_flattened(0.01, &mut |seg| {
            if let Some(prev) = previous {
                assert_eq!(seg.from, prev);
            } else {
                assert_eq!(seg.from, curve.from);
            }
            previous = Some(seg.to);
            count += 1;
        });

        assert_eq!(previous, Some(curve.to));
        assert!(count > 1);
    }

    #[test]
    fn flatten_line() {
        // Control points at the thirds of the chord: this cubic is exactly
        // the chord's linear parametrization.
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(4.0, 0.0),
            ctrl2: point(8.0, 0.0),
            to: point(12.0, 0.0),
        };

        let mut count = 0;
        curve.for_each_flattened(0.1, &mut |seg| {
            assert_eq!(seg.from, curve.from);
            assert_eq!(seg.to, curve.to);
            count += 1;
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn flatten_degenerate_terminates() {
        // All control points on the same spot must not recurse forever.
        let p = point(1.0, 1.0);
        let curve = CubicBezierSegment {
            from: p,
            ctrl1: p,
            ctrl2: p,
            to: p,
        };

        let mut count = 0;
        curve.for_each_flattened(0.01, &mut |_| {
            count += 1;
        });
        assert_eq!(count, 1);
    }
}
