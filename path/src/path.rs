//! Path storage and the two facades over it: the mutable builder and the
//! immutable, value-comparable path.

use crate::events::{PathElement, PathEvent};
use crate::math::{null_rect, point, Point, Rect, Transform};

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// The verb tag of a stored element. Each verb is followed by a fixed number
/// of points in the point buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub(crate) enum Verb {
    MoveTo,
    LineTo,
    QuadraticTo,
    CubicTo,
    Close,
}

/// The storage shared by [Path] and [MutablePath]: parallel verb and point
/// buffers, plus the construction state needed to enforce the subpath rules.
///
/// Invariants: every subpath starts with a `MoveTo` verb, `Close` is never
/// first in a subpath, and `current` always equals the endpoint of the last
/// appended element (the subpath start right after a close, the zero point
/// when empty).
#[derive(Clone, Debug)]
pub(crate) struct PathData {
    pub(crate) points: Vec<Point>,
    pub(crate) verbs: Vec<Verb>,
    pub(crate) current: Point,
    pub(crate) first: Point,
    // Whether the next drawing command must open a subpath first.
    pub(crate) need_moveto: bool,
    // Whether the open subpath contains at least one drawable segment.
    pub(crate) has_segments: bool,
}

fn nan_check(p: Point) {
    debug_assert!(!p.x.is_nan());
    debug_assert!(!p.y.is_nan());
}

impl PathData {
    pub(crate) fn new() -> Self {
        PathData {
            points: Vec::new(),
            verbs: Vec::new(),
            current: point(0.0, 0.0),
            first: point(0.0, 0.0),
            need_moveto: true,
            has_segments: false,
        }
    }

    // A drawing command issued with no open subpath starts one at the
    // current position first (the zero point on an empty path, the previous
    // subpath's start right after a close).
    fn begin_if_needed(&mut self) {
        if self.need_moveto {
            let at = self.current;
            self.move_to(at);
        }
    }

    pub(crate) fn move_to(&mut self, to: Point) {
        nan_check(to);
        self.points.push(to);
        self.verbs.push(Verb::MoveTo);
        self.current = to;
        self.first = to;
        self.need_moveto = false;
        self.has_segments = false;
    }

    pub(crate) fn line_to(&mut self, to: Point) {
        nan_check(to);
        self.begin_if_needed();
        self.points.push(to);
        self.verbs.push(Verb::LineTo);
        self.current = to;
        self.has_segments = true;
    }

    pub(crate) fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        nan_check(ctrl);
        nan_check(to);
        self.begin_if_needed();
        self.points.push(ctrl);
        self.points.push(to);
        self.verbs.push(Verb::QuadraticTo);
        self.current = to;
        self.has_segments = true;
    }

    pub(crate) fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        nan_check(ctrl1);
        nan_check(ctrl2);
        nan_check(to);
        self.begin_if_needed();
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
        self.verbs.push(Verb::CubicTo);
        self.current = to;
        self.has_segments = true;
    }

    /// No-op unless a subpath with at least one drawable segment is open.
    pub(crate) fn close(&mut self) {
        if self.need_moveto || !self.has_segments {
            return;
        }
        self.verbs.push(Verb::Close);
        self.current = self.first;
        self.need_moveto = true;
        self.has_segments = false;
    }

    // The loose bounding box: min/max over every stored coordinate,
    // endpoints and control points alike. Curve control points are
    // deliberately included as-is, giving a conservative hull rather
    // than the tight analytic extent.
    fn compute_bounding_box(&self) -> Rect {
        if self.points.is_empty() {
            return null_rect();
        }

        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Rect::new(min, (max - min).to_size())
    }

    // Bit-exact structural comparison: verb sequences and coordinate bit
    // patterns, no epsilon. `0.0` and `-0.0` are different paths.
    fn structural_eq(&self, other: &Self) -> bool {
        self.verbs == other.verbs
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(other.points.iter())
                .all(|(a, b)| a.x.to_bits() == b.x.to_bits() && a.y.to_bits() == b.y.to_bits())
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        self.verbs.hash(state);
        for p in &self.points {
            p.x.to_bits().hash(state);
            p.y.to_bits().hash(state);
        }
    }

    fn fmt_svg(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for element in self.elements() {
            match element {
                PathElement::MoveTo(to) => write!(f, "M {} {} ", to.x, to.y)?,
                PathElement::LineTo(to) => write!(f, "L {} {} ", to.x, to.y)?,
                PathElement::QuadraticTo { ctrl, to } => {
                    write!(f, "Q {} {} {} {} ", ctrl.x, ctrl.y, to.x, to.y)?
                }
                PathElement::CubicTo { ctrl1, ctrl2, to } => write!(
                    f,
                    "C {} {} {} {} {} {} ",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                )?,
                PathElement::Close => write!(f, "Z ")?,
            }
        }

        Ok(())
    }

    fn elements(&self) -> Elements {
        Elements {
            points: self.points.iter(),
            verbs: self.verbs.iter(),
        }
    }
}

/// An iterator over the elements of a path, in storage order.
///
/// The traversal is read-only and restartable: it borrows the path, and
/// calling `elements()` again starts over from the first element.
#[derive(Clone)]
pub struct Elements<'l> {
    points: std::slice::Iter<'l, Point>,
    verbs: std::slice::Iter<'l, Verb>,
}

impl<'l> Iterator for Elements<'l> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        match self.verbs.next()? {
            Verb::MoveTo => Some(PathElement::MoveTo(*self.points.next()?)),
            Verb::LineTo => Some(PathElement::LineTo(*self.points.next()?)),
            Verb::QuadraticTo => {
                let ctrl = *self.points.next()?;
                let to = *self.points.next()?;
                Some(PathElement::QuadraticTo { ctrl, to })
            }
            Verb::CubicTo => {
                let ctrl1 = *self.points.next()?;
                let ctrl2 = *self.points.next()?;
                let to = *self.points.next()?;
                Some(PathElement::CubicTo { ctrl1, ctrl2, to })
            }
            Verb::Close => Some(PathElement::Close),
        }
    }
}

/// An iterator over a path as self-contained [PathEvent]s.
///
/// Subpaths left open by the path are still terminated with an
/// `End { close: false, .. }` event so that consumers always see the
/// closing edge.
#[derive(Clone)]
pub struct Iter<'l> {
    elements: Elements<'l>,
    current: Point,
    first: Point,
    in_subpath: bool,
    pending: Option<PathEvent>,
}

impl<'l> Iter<'l> {
    fn new(elements: Elements<'l>) -> Self {
        Iter {
            elements,
            current: point(0.0, 0.0),
            first: point(0.0, 0.0),
            in_subpath: false,
            pending: None,
        }
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }

        match self.elements.next() {
            Some(PathElement::MoveTo(to)) => {
                let unterminated = self.in_subpath;
                let last = self.current;
                let first = self.first;

                self.current = to;
                self.first = to;
                self.in_subpath = true;

                if unterminated {
                    self.pending = Some(PathEvent::Begin { at: to });
                    return Some(PathEvent::End {
                        last,
                        first,
                        close: false,
                    });
                }

                Some(PathEvent::Begin { at: to })
            }
            Some(PathElement::LineTo(to)) => {
                let from = self.current;
                self.current = to;
                Some(PathEvent::Line { from, to })
            }
            Some(PathElement::QuadraticTo { ctrl, to }) => {
                let from = self.current;
                self.current = to;
                Some(PathEvent::Quadratic { from, ctrl, to })
            }
            Some(PathElement::CubicTo { ctrl1, ctrl2, to }) => {
                let from = self.current;
                self.current = to;
                Some(PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                })
            }
            Some(PathElement::Close) => {
                let last = self.current;
                self.current = self.first;
                self.in_subpath = false;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: true,
                })
            }
            None => {
                if self.in_subpath {
                    self.in_subpath = false;
                    return Some(PathEvent::End {
                        last: self.current,
                        first: self.first,
                        close: false,
                    });
                }
                None
            }
        }
    }
}

/// A read-only path value.
///
/// Cloning shares the underlying storage, which is only duplicated when a
/// [MutablePath] obtained through [Path::to_mutable] is first mutated, so
/// independently held paths never observe each other's changes. Paths
/// compare and hash structurally (see [Path::eq]) and are safe to read from
/// multiple threads.
#[derive(Clone)]
pub struct Path {
    data: Arc<PathData>,
    bounds: OnceLock<Rect>,
}

impl Path {
    /// An empty path.
    pub fn new() -> Path {
        Path::wrap(Arc::new(PathData::new()))
    }

    /// A builder for this type of path.
    pub fn builder() -> MutablePath {
        MutablePath::new()
    }

    fn wrap(data: Arc<PathData>) -> Path {
        Path {
            data,
            bounds: OnceLock::new(),
        }
    }

    /// A closed rectangle path: move to the min corner, three lines, close.
    pub fn from_rect(r: &Rect, transform: Option<&Transform>) -> Path {
        let mut builder = Path::builder();
        builder.add_rectangle(r, transform);
        builder.build()
    }

    /// The ellipse inscribed in `r`, as four cubic bezier quarter arcs.
    pub fn from_ellipse_in_rect(r: &Rect, transform: Option<&Transform>) -> Path {
        let mut builder = Path::builder();
        builder.add_ellipse_in_rect(r, transform);
        builder.build()
    }

    /// A rounded rectangle; corner radii are clamped to half of the
    /// rectangle's extents.
    pub fn from_rounded_rectangle(
        r: &Rect,
        corner_width: f32,
        corner_height: f32,
        transform: Option<&Transform>,
    ) -> Path {
        let mut builder = Path::builder();
        builder.add_rounded_rectangle(r, corner_width, corner_height, transform);
        builder.build()
    }

    /// Whether the path contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.verbs.is_empty()
    }

    /// The endpoint of the last element, or the zero point for an empty path.
    pub fn current_point(&self) -> Point {
        self.data.current
    }

    /// Iterate over the path's elements, in storage order.
    pub fn elements(&self) -> Elements {
        self.data.elements()
    }

    /// Iterate over the path as self-contained events.
    pub fn iter(&self) -> Iter {
        Iter::new(self.elements())
    }

    /// Invoke `visitor` with each element, in storage order.
    pub fn apply<F>(&self, mut visitor: F)
    where
        F: FnMut(&PathElement),
    {
        for element in self.elements() {
            visitor(&element);
        }
    }

    /// The bounding box of all endpoints and control points, computed on
    /// first use; the null rectangle for an empty path.
    ///
    /// For bezier segments this is the hull of the control points, a
    /// conservative superset of the curve's true extent.
    pub fn bounding_box(&self) -> Rect {
        *self.bounds.get_or_init(|| self.data.compute_bounding_box())
    }

    /// A mutable copy of this path. The storage is shared until the copy is
    /// first mutated, at which point it is duplicated; this path is never
    /// affected.
    pub fn to_mutable(&self) -> MutablePath {
        MutablePath {
            data: Arc::clone(&self.data),
            bounds: Cell::new(None),
        }
    }

    /// A copy of this path with every point transformed.
    pub fn transformed(&self, mat: &Transform) -> Path {
        let mut data = (*self.data).clone();
        for p in &mut data.points {
            *p = mat.transform_point(*p);
        }
        data.current = mat.transform_point(data.current);
        data.first = mat.transform_point(data.first);

        Path::wrap(Arc::new(data))
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::new()
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) || self.data.structural_eq(&other.data)
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.structural_hash(state);
    }
}

impl PartialEq<MutablePath> for Path {
    fn eq(&self, other: &MutablePath) -> bool {
        self.data.structural_eq(&other.data)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.data.fmt_svg(f)
    }
}

/// A path under construction.
///
/// All of the appending operations live here (see the
/// [builder](crate::builder) module for the shape synthesis ones). There is
/// no failure mode: degenerate inputs degrade to defined fallbacks instead
/// of returning errors.
///
/// A `MutablePath` exclusively owns its storage as far as mutation is
/// concerned: snapshots taken with [MutablePath::to_path] share the buffers,
/// and the next mutation duplicates them, so a snapshot never changes after
/// the fact.
#[derive(Clone)]
pub struct MutablePath {
    pub(crate) data: Arc<PathData>,
    bounds: Cell<Option<Rect>>,
}

impl MutablePath {
    /// An empty mutable path.
    pub fn new() -> MutablePath {
        MutablePath {
            data: Arc::new(PathData::new()),
            bounds: Cell::new(None),
        }
    }

    // Every mutation funnels through here: invalidate the cached bounding
    // box and un-share the storage if any snapshot still points at it.
    pub(crate) fn data_mut(&mut self) -> &mut PathData {
        self.bounds.set(None);
        Arc::make_mut(&mut self.data)
    }

    /// Whether the path contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.verbs.is_empty()
    }

    /// The endpoint of the last element, or the zero point for an empty path.
    pub fn current_point(&self) -> Point {
        self.data.current
    }

    /// Iterate over the path's elements, in storage order.
    pub fn elements(&self) -> Elements {
        self.data.elements()
    }

    /// Iterate over the path as self-contained events.
    pub fn iter(&self) -> Iter {
        Iter::new(self.elements())
    }

    /// Invoke `visitor` with each element, in storage order.
    pub fn apply<F>(&self, mut visitor: F)
    where
        F: FnMut(&PathElement),
    {
        for element in self.elements() {
            visitor(&element);
        }
    }

    /// The bounding box of all endpoints and control points (see
    /// [Path::bounding_box]), cached until the next mutation.
    pub fn bounding_box(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let bounds = self.data.compute_bounding_box();
        self.bounds.set(Some(bounds));

        bounds
    }

    /// Snapshot the path built so far as an immutable [Path], without
    /// copying. Mutating this builder afterwards does not affect the
    /// snapshot.
    pub fn to_path(&self) -> Path {
        Path::wrap(Arc::clone(&self.data))
    }

    /// Finish building, consuming the builder.
    pub fn build(self) -> Path {
        Path::wrap(self.data)
    }
}

impl Default for MutablePath {
    fn default() -> Self {
        MutablePath::new()
    }
}

impl<'l> IntoIterator for &'l MutablePath {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl PartialEq for MutablePath {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) || self.data.structural_eq(&other.data)
    }
}

impl Eq for MutablePath {}

impl Hash for MutablePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.structural_hash(state);
    }
}

impl PartialEq<Path> for MutablePath {
    fn eq(&self, other: &Path) -> bool {
        self.data.structural_eq(&other.data)
    }
}

impl fmt::Debug for MutablePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.data.fmt_svg(f)
    }
}
