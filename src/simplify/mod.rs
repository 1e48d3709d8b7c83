//! Weighs every vertex of a Ring by how much removing it would change the
//! shape.
//!
//! Two interchangeable strategies, picked per call. Either way a weight of
//! `f64::INFINITY` means "never remove".
use std::fmt;
use rayon::prelude::*;

use crate::geo::{Point, Ring};

pub mod douglas_peucker;
pub mod visvalingam_whyatt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Recursive split at the point of maximum deviation from the chord.
    DouglasPeucker,

    /// Iterative elimination of the smallest-area triangle.
    VisvalingamWhyatt,
}

impl Strategy {
    /// The short name the plotting options use, e.g. `vertex_dp`.
    pub fn name(&self) -> &'static str {
        match *self {
            Strategy::DouglasPeucker => "vertex_dp",
            Strategy::VisvalingamWhyatt => "vertex_vw",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedVertex {
    pub point: Point,
    pub ring_index: usize,
    pub position: usize,
    pub weight: f64,
}

/// The scored form of one Ring: one WeightedVertex per Point, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedRing {
    pub closed: bool,

    /// How many Points the Ring needs to survive; see
    /// `Ring::structural_minimum()`. `None` means it can't survive.
    pub structural_minimum: Option<usize>,

    pub vertices: Vec<WeightedVertex>,
}

impl WeightedRing {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
}

/// Weighs each Point of `ring`, which sits at `ring_index` in its batch.
pub fn score(ring: &Ring, ring_index: usize, strategy: Strategy) -> WeightedRing {
    let weights = match strategy {
        Strategy::DouglasPeucker => douglas_peucker::weights(ring),
        Strategy::VisvalingamWhyatt => visvalingam_whyatt::weights(ring),
    };

    let vertices = ring.points.iter()
        .zip(weights.into_iter())
        .enumerate()
        .map(|(position, (&point, weight))| WeightedVertex {
            point: point,
            ring_index: ring_index,
            position: position,
            weight: weight,
        })
        .collect();

    WeightedRing {
        closed: ring.closed,
        structural_minimum: ring.structural_minimum(),
        vertices: vertices,
    }
}

/// Weighs every Ring. Rings are independent, so they're scored in
/// parallel; the result is in ring order.
pub fn score_all(rings: &[Ring], strategy: Strategy) -> Vec<WeightedRing> {
    rings.par_iter()
        .enumerate()
        .map(|(i, ring)| score(ring, i, strategy))
        .collect()
}
