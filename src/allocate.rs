//! Spends one vertex budget across many Rings.
//!
//! Two passes:
//!
//! 1. In ring order, each Ring reserves its structural minimum from the
//!    budget: its `f64::INFINITY` vertices, topped up with its own heaviest
//!    vertices if that's not enough. A Ring that doesn't fit is dropped
//!    whole, and costs nothing.
//! 2. All other vertices of surviving Rings compete for what's left, by
//!    weight alone. A Ring gets more of the budget when its vertices matter
//!    more than other Rings' do, not when it has more of them.
use std::cmp::{self, Ordering};
use std::convert::TryFrom;
use tracing::trace;

use crate::simplify::{WeightedRing, WeightedVertex};

/// Heaviest first. Ties go to the earlier Ring, then the earlier position.
fn by_importance(a: &WeightedVertex, b: &WeightedVertex) -> Ordering {
    b.weight.total_cmp(&a.weight)
        .then(a.ring_index.cmp(&b.ring_index))
        .then(a.position.cmp(&b.position))
}

/// Returns one keep-mask per Ring, aligned with its Points.
///
/// A dropped Ring's mask is all `false`. A surviving Ring keeps at least its
/// structural minimum. The masks keep at most `budget` Points in total.
///
/// `budget <= 0` drops everything. A budget of at least the total Point
/// count keeps everything (except degenerate Rings, which nothing keeps).
pub fn allocate(rings: &[WeightedRing], budget: i64) -> Vec<Vec<bool>> {
    let mut masks: Vec<Vec<bool>> = rings.iter().map(|r| vec![ false; r.len() ]).collect();

    if budget <= 0 {
        return masks;
    }

    let mut remaining = usize::try_from(budget).unwrap_or(usize::max_value());
    let mut pool = Vec::<WeightedVertex>::new();

    for (i, ring) in rings.iter().enumerate() {
        let minimum = match ring.structural_minimum {
            Some(minimum) => minimum,
            None => {
                trace!(ring = i, "dropping degenerate ring");
                continue;
            }
        };

        let (forced, mut reducible): (Vec<&WeightedVertex>, Vec<&WeightedVertex>) = ring.vertices.iter()
            .partition(|v| v.weight == f64::INFINITY);

        let reservation = cmp::max(minimum, forced.len());
        if remaining < reservation {
            trace!(ring = i, reservation, remaining, "dropping ring that doesn't fit the budget");
            continue;
        }
        remaining -= reservation;

        for v in forced.iter() {
            masks[i][v.position] = true;
        }

        let n_top_up = reservation - forced.len();
        if n_top_up > 0 {
            reducible.sort_by(|a, b| by_importance(a, b));
            for v in reducible.drain(.. n_top_up) {
                masks[i][v.position] = true;
            }
        }

        pool.extend(reducible.into_iter().cloned());
    }

    if pool.len() > remaining {
        if remaining == 0 {
            pool.clear();
        } else {
            pool.select_nth_unstable_by(remaining, by_importance);
            pool.truncate(remaining);
        }
    }

    for v in pool.iter() {
        masks[v.ring_index][v.position] = true;
    }

    masks
}
