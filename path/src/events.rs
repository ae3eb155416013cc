use crate::math::{Point, Transform};

/// One path command and the points that define it, as stored.
///
/// Elements only carry their own coordinates; the position a segment starts
/// from is implied by the previous element. See [PathEvent](crate::PathEvent)
/// for the self-contained form.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    QuadraticTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

impl PathElement {
    /// The endpoint this element leaves the pen at, if it has one.
    pub fn endpoint(&self) -> Option<Point> {
        match *self {
            PathElement::MoveTo(to)
            | PathElement::LineTo(to)
            | PathElement::QuadraticTo { to, .. }
            | PathElement::CubicTo { to, .. } => Some(to),
            PathElement::Close => None,
        }
    }

    /// This element with all of its points transformed.
    pub fn transformed(&self, mat: &Transform) -> Self {
        match *self {
            PathElement::MoveTo(to) => PathElement::MoveTo(mat.transform_point(to)),
            PathElement::LineTo(to) => PathElement::LineTo(mat.transform_point(to)),
            PathElement::QuadraticTo { ctrl, to } => PathElement::QuadraticTo {
                ctrl: mat.transform_point(ctrl),
                to: mat.transform_point(to),
            },
            PathElement::CubicTo { ctrl1, ctrl2, to } => PathElement::CubicTo {
                ctrl1: mat.transform_point(ctrl1),
                ctrl2: mat.transform_point(ctrl2),
                to: mat.transform_point(to),
            },
            PathElement::Close => PathElement::Close,
        }
    }
}

/// A self-contained path event: every segment carries the position it starts
/// from, and the end of a subpath knows its first position so the closing
/// segment can be reconstructed.
///
/// `End::close` tells whether the subpath was explicitly closed; consumers
/// that treat every subpath as a loop (hit testing does) use `last`/`first`
/// either way.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathEvent {
    Begin {
        at: Point,
    },
    Line {
        from: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    End {
        last: Point,
        first: Point,
        close: bool,
    },
}

#[test]
fn element_endpoint() {
    use crate::math::point;

    assert_eq!(
        PathElement::MoveTo(point(1.0, 2.0)).endpoint(),
        Some(point(1.0, 2.0))
    );
    assert_eq!(
        PathElement::CubicTo {
            ctrl1: point(0.0, 0.0),
            ctrl2: point(1.0, 1.0),
            to: point(2.0, 2.0),
        }
        .endpoint(),
        Some(point(2.0, 2.0))
    );
    assert_eq!(PathElement::Close.endpoint(), None);
}

#[test]
fn element_transformed() {
    use crate::math::{point, Transform};

    let translation = Transform::translation(10.0, 0.0);
    assert_eq!(
        PathElement::LineTo(point(1.0, 1.0)).transformed(&translation),
        PathElement::LineTo(point(11.0, 1.0))
    );
    assert_eq!(
        PathElement::Close.transformed(&translation),
        PathElement::Close
    );
}
