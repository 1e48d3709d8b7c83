use crate::geo::{self, Ring};

/// Rebuilds Rings from keep-masks.
///
/// Kept Points stay in their original order. A closed Ring is re-closed on
/// its first *kept* vertex, which need not be its original first one. Rings
/// that can't stand on their own are left out, with no placeholder:
///
/// * a closed Ring with fewer than three distinct kept vertices;
/// * an open path with fewer than two kept Points.
///
/// # Panics
///
/// Panics if `masks` doesn't line up with `rings`.
pub fn assemble(rings: &[Ring], masks: &[Vec<bool>]) -> Vec<Ring> {
    assert_eq!(rings.len(), masks.len());

    rings.iter()
        .zip(masks.iter())
        .filter_map(|(ring, mask)| assemble_ring(ring, mask))
        .collect()
}

/// Rebuilds one Ring from its keep-mask; `None` if it can't stand alone.
pub fn assemble_ring(ring: &Ring, mask: &[bool]) -> Option<Ring> {
    assert_eq!(ring.len(), mask.len());

    let kept: Vec<geo::Point> = ring.vertices().iter()
        .zip(mask.iter())
        .filter(|&(_, &keep)| keep)
        .map(|(&p, _)| p)
        .collect();

    if ring.closed {
        if geo::count_distinct(&kept) >= 3 {
            Some(Ring::closed_from_vertices(kept))
        } else {
            None
        }
    } else if kept.len() >= 2 {
        Some(Ring::path(kept))
    } else {
        None
    }
}
