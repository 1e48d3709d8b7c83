use std::cmp;
use std::fmt;
use itertools::Itertools;

/// A position in the plane.
///
/// Coordinates are compared exactly: two Points are the same vertex only if
/// both coordinates are bit-for-bit equal (modulo the sign of zero). That is
/// the convention the input columns use to signal ring closure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }

    pub fn distance2(&self, other: &Point) -> f64 {
        let dx = other.0 - self.0;
        let dy = other.1 - self.1;
        dx * dx + dy * dy
    }

    /// Hashable identity for exact-equality grouping. `-0.0` and `0.0` map
    /// to the same key, like `==` does.
    pub(crate) fn key(&self) -> (u64, u64) {
        ((self.0 + 0.0).to_bits(), (self.1 + 0.0).to_bits())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// Returns the area of the triangle (a, b, c).
///
/// This is the Visvalingam-Whyatt "effective area" of b.
pub fn triangle_area(a: &Point, b: &Point, c: &Point) -> f64 {
    let cross = (a.0 - b.0) * (c.1 - b.1) - (c.0 - b.0) * (a.1 - b.1);
    0.5 * cross.abs()
}

/// Returns the distance from `p` to the infinite line through `a` and `b`.
///
/// When `a` and `b` coincide there is no line; we return the distance from
/// `p` to `a` instead.
pub fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len2 = dx * dx + dy * dy;

    if len2 == 0.0 {
        return p.distance2(a).sqrt();
    }

    let cross = dx * (a.1 - p.1) - dy * (a.0 - p.0);
    cross.abs() / len2.sqrt()
}

/// Returns the number of distinct Points in `points`.
pub fn count_distinct<'a, T: IntoIterator<Item=&'a Point>>(points: T) -> usize {
    points.into_iter().map(|p| p.key()).unique().count()
}

/// A polygon boundary or an open polyline.
///
/// A closed Ring stores its closure point twice: `points[0] == points[len - 1]`.
/// We call that last slot the "closure slot". It isn't a vertex of its own;
/// it's there so the Ring reads the same way the input columns do.
///
/// A closed Ring needs three distinct vertices plus the closure slot (four
/// Points) to mean anything. An open path needs two Points.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub points: Box<[Point]>,
    pub closed: bool,
}

impl Ring {
    /// Builds a closed Ring from vertices, appending the closure point.
    ///
    /// # Panics
    ///
    /// Panics if `vertices` is empty.
    pub fn closed_from_vertices(vertices: Vec<Point>) -> Ring {
        assert!(!vertices.is_empty());

        let mut points = vertices;
        let first = points[0];
        points.push(first);
        Ring { points: points.into_boxed_slice(), closed: true }
    }

    pub fn path(points: Vec<Point>) -> Ring {
        Ring { points: points.into_boxed_slice(), closed: false }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the closure slot, if this Ring is closed.
    pub fn closure_slot(&self) -> Option<usize> {
        if self.closed && self.points.len() >= 2 {
            Some(self.points.len() - 1)
        } else {
            None
        }
    }

    /// The Points that are vertices in their own right: everything but the
    /// closure slot.
    pub fn vertices(&self) -> &[Point] {
        match self.closure_slot() {
            Some(slot) => &self.points[.. slot],
            None => &self.points[..],
        }
    }

    pub fn n_distinct_vertices(&self) -> usize {
        count_distinct(self.vertices())
    }

    /// `true` iff this is a closed Ring with fewer than three distinct
    /// vertices. No budget can make it a valid polygon.
    pub fn is_degenerate(&self) -> bool {
        self.closed && self.n_distinct_vertices() < 3
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Number of Points this Ring keeps no matter how small the budget, or
    /// `None` if it can't be kept at all.
    ///
    /// A Ring smaller than its floor can't shrink; its floor is its own
    /// length.
    pub fn structural_minimum(&self) -> Option<usize> {
        if self.is_degenerate() {
            None
        } else if self.closed {
            Some(cmp::min(4, self.points.len()))
        } else {
            Some(cmp::min(2, self.points.len()))
        }
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ret = write!(f, "{}", if self.closed { "Ring[" } else { "Path[" });
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                ret = ret.and_then(|_| write!(f, ","));
            }
            ret = ret.and_then(|_| write!(f, "{}", point));
        }
        ret.and_then(|_| write!(f, "]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::closed_from_vertices(vec![ Point(0., 0.), Point(0., 1.), Point(1., 1.), Point(1., 0.) ])
    }

    #[test]
    fn closed_ring_repeats_first_point() {
        let ring = square();
        assert_eq!(5, ring.len());
        assert_eq!(ring.points[0], ring.points[4]);
        assert_eq!(Some(4), ring.closure_slot());
        assert_eq!(4, ring.vertices().len());
    }

    #[test]
    fn path_has_no_closure_slot() {
        let path = Ring::path(vec![ Point(0., 0.), Point(1., 1.) ]);
        assert_eq!(None, path.closure_slot());
        assert_eq!(2, path.vertices().len());
        assert_eq!(Some(2), path.structural_minimum());
    }

    #[test]
    fn structural_minimum_of_ring() {
        assert_eq!(Some(4), square().structural_minimum());
    }

    #[test]
    fn degenerate_ring_has_no_minimum() {
        let ring = Ring::closed_from_vertices(vec![ Point(0., 0.), Point(1., 1.), Point(1., 1.) ]);
        assert!(ring.is_degenerate());
        assert_eq!(None, ring.structural_minimum());
    }

    #[test]
    fn single_point_path_keeps_itself() {
        let path = Ring::path(vec![ Point(3., 3.) ]);
        assert_eq!(Some(1), path.structural_minimum());
    }

    #[test]
    fn negative_zero_is_not_distinct() {
        assert_eq!(1, count_distinct(&[ Point(0., -0.), Point(-0., 0.) ]));
    }

    #[test]
    fn triangle_area_ignores_winding() {
        let a = Point(0., 0.);
        let b = Point(4., 0.);
        let c = Point(0., 3.);
        assert_eq!(6., triangle_area(&a, &b, &c));
        assert_eq!(6., triangle_area(&c, &b, &a));
    }

    #[test]
    fn perpendicular_distance_to_line() {
        let d = perpendicular_distance(&Point(5., 3.), &Point(0., 0.), &Point(10., 0.));
        assert_eq!(3., d);
    }

    #[test]
    fn perpendicular_distance_to_coincident_chord() {
        let d = perpendicular_distance(&Point(3., 4.), &Point(0., 0.), &Point(0., 0.));
        assert_eq!(5., d);
    }

    #[test]
    fn non_finite_ring() {
        let ring = Ring::path(vec![ Point(0., 0.), Point(::std::f64::NAN, 1.) ]);
        assert!(!ring.is_finite());
        assert!(square().is_finite());
    }

    #[test]
    fn display() {
        let path = Ring::path(vec![ Point(0., 0.), Point(1.5, 2.) ]);
        assert_eq!("Path[(0,0),(1.5,2)]", format!("{}", path));
    }
}
