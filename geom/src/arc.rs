//! Circular and elliptic arcs and their cubic bezier approximation.

use crate::cubic_bezier::CubicBezierSegment;
use crate::math::{point, vector, Angle, Point, Vector};

use std::f32::consts::FRAC_PI_2;

/// An axis-aligned elliptic arc, parametrized by center, radii and a swept
/// angle range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc {
    pub center: Point,
    pub radii: Vector,
    pub start_angle: Angle,
    pub sweep_angle: Angle,
}

impl Arc {
    /// A circular arc of the given radius.
    pub fn circle(center: Point, radius: f32, start_angle: Angle, sweep_angle: Angle) -> Self {
        Arc {
            center,
            radii: vector(radius, radius),
            start_angle,
            sweep_angle,
        }
    }

    /// Sample the arc at t (between 0.0 and 1.0).
    pub fn sample(&self, t: f32) -> Point {
        self.point_at_angle(Angle::radians(
            self.start_angle.radians + self.sweep_angle.radians * t,
        ))
    }

    /// The start of the arc.
    #[inline]
    pub fn from(&self) -> Point {
        self.sample(0.0)
    }

    /// The end of the arc.
    #[inline]
    pub fn to(&self) -> Point {
        self.sample(1.0)
    }

    fn point_at_angle(&self, angle: Angle) -> Point {
        point(
            self.center.x + self.radii.x * angle.radians.cos(),
            self.center.y + self.radii.y * angle.radians.sin(),
        )
    }

    // Derivative of the parametrization by angle.
    fn tangent_at_angle(&self, angle: Angle) -> Vector {
        vector(
            -self.radii.x * angle.radians.sin(),
            self.radii.y * angle.radians.cos(),
        )
    }

    /// Approximate the arc with a sequence of cubic bezier segments, none of
    /// them spanning more than a quarter turn.
    ///
    /// Each segment uses the tangent-scaled control offset
    /// `k = 4/3 · tan(Δ/4)`, which keeps the radial error of a quarter-turn
    /// piece under 3e-4 of the radius. A zero sweep produces no segments.
    pub fn for_each_cubic_bezier<F>(&self, callback: &mut F)
    where
        F: FnMut(&CubicBezierSegment),
    {
        let sweep = self.sweep_angle.radians;
        if sweep == 0.0 {
            return;
        }

        let n_steps = (sweep.abs() / FRAC_PI_2).ceil().max(1.0);
        let step = sweep / n_steps;
        let k = (4.0 / 3.0) * (step * 0.25).tan();

        for i in 0..(n_steps as u32) {
            let a0 = Angle::radians(self.start_angle.radians + step * i as f32);
            let a1 = Angle::radians(a0.radians + step);

            let from = self.point_at_angle(a0);
            let to = self.point_at_angle(a1);
            let ctrl1 = from + self.tangent_at_angle(a0) * k;
            let ctrl2 = to - self.tangent_at_angle(a1) * k;

            callback(&CubicBezierSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            });
        }
    }
}
