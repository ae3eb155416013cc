use crate::math::{Point, Vector};

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (between 0.0 and 1.0).
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.to_vector().length()
    }
}

#[test]
fn sample() {
    use crate::math::point;

    let seg = LineSegment {
        from: point(1.0, 1.0),
        to: point(3.0, 5.0),
    };

    assert_eq!(seg.sample(0.0), point(1.0, 1.0));
    assert_eq!(seg.sample(0.5), point(2.0, 3.0));
    assert_eq!(seg.sample(1.0), point(3.0, 5.0));
    assert_eq!(seg.to_vector(), crate::math::vector(2.0, 4.0));
}
