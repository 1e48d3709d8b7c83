use crate::geo::{self, Ring};

/// Returns the index in `lo + 1 .. hi` farthest from the chord
/// `(points[lo], points[hi])`, and that distance. The first one wins ties.
fn farthest_from_chord(points: &[geo::Point], lo: usize, hi: usize) -> (usize, f64) {
    let (a, b) = (&points[lo], &points[hi]);
    let mut best = (lo + 1, geo::perpendicular_distance(&points[lo + 1], a, b));

    for k in lo + 2 .. hi {
        let d = geo::perpendicular_distance(&points[k], a, b);
        if d > best.1 {
            best = (k, d);
        }
    }

    best
}

/// Returns the vertex in `1 .. end` farthest from `points[0]`. The first one
/// wins ties.
fn farthest_from_start(points: &[geo::Point], end: usize) -> usize {
    let origin = &points[0];
    let mut best = (1, origin.distance2(&points[1]));

    for k in 2 .. end {
        let d2 = origin.distance2(&points[k]);
        if d2 > best.1 {
            best = (k, d2);
        }
    }

    best.0
}

/// Returns one importance weight per Point of `ring`.
///
/// The shape is cut at two fixed points, which weigh `f64::INFINITY`:
///
/// * open path: its endpoints;
/// * closed Ring: point 0 and the vertex farthest from it. (The closure
///   slot sits on top of point 0, so it weighs `f64::INFINITY` too.)
///
/// Then each span is split at its point farthest from the span's chord.
/// That point's weight is its distance to the chord; the two halves are
/// split in turn, until no span has interior points.
pub fn weights(ring: &Ring) -> Vec<f64> {
    let points = &ring.points[..];
    let len = points.len();

    if len <= 2 {
        return vec![ f64::INFINITY; len ];
    }

    let mut ret = vec![ 0.0; len ];
    let last = len - 1;
    ret[0] = f64::INFINITY;
    ret[last] = f64::INFINITY;

    // Spans still to split, as (first, last) indexes. A stack, not
    // recursion: a spiral can make the recursion as deep as the input.
    let mut spans = Vec::<(usize, usize)>::new();

    if ring.closed {
        let split = farthest_from_start(points, last);
        ret[split] = f64::INFINITY;
        spans.push((split, last));
        spans.push((0, split));
    } else {
        spans.push((0, last));
    }

    while let Some((lo, hi)) = spans.pop() {
        if hi <= lo + 1 {
            continue;
        }

        let (k, d) = farthest_from_chord(points, lo, hi);
        ret[k] = d;
        spans.push((k, hi));
        spans.push((lo, k));
    }

    ret
}
