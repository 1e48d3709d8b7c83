//! Splits a flat Point stream into Rings and paths.
//!
//! The input columns don't say where one shape ends and the next begins.
//! They use a convention instead: a ring repeats its first Point as its last.
//! So we scan once, remembering the first Point of the current shape, and cut
//! whenever we see it again.
use crate::geo::{Point, Ring};

/// Returns the Rings (closed) and paths (open) encoded in `points`.
///
/// * A shape closes at the first later Point exactly equal to its first
///   Point, at least three Points on. The closed Ring includes that repeat
///   as its closure slot.
/// * A repeat sooner than that (`A,A` or `A,B,A`) can't enclose anything,
///   so it doesn't close the shape; the scan carries on past it.
/// * Whatever is left at the end, without a repeat, is one open path.
/// * A single leftover Point can't form a path; we drop it.
///
/// A longer closure with fewer than three distinct vertices (say,
/// `A,B,B,A`) still ends the shape, so the shapes after it are read
/// correctly. It comes out as a degenerate closed Ring (see
/// `Ring::is_degenerate()`), which no budget will keep.
///
/// Never fails: malformed input just makes small shapes.
pub fn extract(points: &[Point]) -> Vec<Ring> {
    let mut rings = Vec::<Ring>::new();
    let mut start: usize = 0;

    for i in 1 .. points.len() {
        if i >= start + 3 && points[i] == points[start] {
            rings.push(Ring {
                points: points[start ..= i].to_vec().into_boxed_slice(),
                closed: true,
            });
            start = i + 1;
        }
    }

    if points.len() >= start + 2 {
        rings.push(Ring::path(points[start ..].to_vec()));
    }

    rings
}
