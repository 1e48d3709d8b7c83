use std::cmp::Ordering;
use std::collections::HashMap;

use crate::geo::{self, Ring};

/// Marks "no heap slot": the vertex was eliminated, it's a path endpoint
/// that never entered the heap, or it was pulled out to stay.
const NULL_INDEX: usize = usize::MAX;

#[derive(Debug)]
struct Vertex {
    /// The "importance" of the vertex, while it is still in the chain: the
    /// area of the triangle it forms with its current neighbors.
    area: f64,

    /// Position in the binary heap (minimum area first), or NULL_INDEX.
    heap_index: usize,

    /// Neighbors in the chain of vertices that haven't been eliminated yet.
    /// On a closed Ring the chain wraps around.
    previous: usize,
    next: usize,
}

/// A min-heap of chain vertices, keyed by area.
///
/// Ties go to the lower vertex index, so elimination order is a function of
/// the input alone.
#[derive(Debug)]
struct VertexHeap<'a> {
    points: &'a [geo::Point],
    vertices: Vec<Vertex>,
    heap: Vec<usize>,
    closed: bool,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left_child(i: usize) -> usize {
    2 * i + 1
}

impl<'a> VertexHeap<'a> {
    /// Builds the chain over `points`.
    ///
    /// Open: the endpoints anchor the chain and never enter the heap.
    /// Closed: `points` excludes the closure slot and every vertex is
    /// removable.
    fn new(points: &'a [geo::Point], closed: bool) -> VertexHeap<'a> {
        let len = points.len();

        let mut vertices: Vec<Vertex> = (0 .. len)
            .map(|i| Vertex {
                area: f64::INFINITY,
                heap_index: NULL_INDEX,
                previous: if i > 0 { i - 1 } else if closed { len - 1 } else { NULL_INDEX },
                next: if i + 1 < len { i + 1 } else if closed { 0 } else { NULL_INDEX },
            })
            .collect();

        let removable: Vec<usize> = if closed {
            (0 .. len).collect()
        } else if len > 2 {
            (1 .. len - 1).collect()
        } else {
            vec![]
        };

        for &i in removable.iter() {
            let v = &mut vertices[i];
            v.area = geo::triangle_area(&points[v.previous], &points[i], &points[v.next]);
        }

        let mut ret = VertexHeap {
            points: points,
            vertices: vertices,
            heap: removable,
            closed: closed,
        };
        ret.heapify();
        ret
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (va, vb) = (self.heap[a], self.heap[b]);
        self.vertices[va].area.total_cmp(&self.vertices[vb].area).then(va.cmp(&vb)) == Ordering::Less
    }

    fn heapify(&mut self) {
        for (slot, &v) in self.heap.iter().enumerate() {
            self.vertices[v].heap_index = slot;
        }

        let len = self.heap.len();
        if len > 1 {
            let mut start = parent(len - 1);

            loop {
                self.sift_down(start);
                if start == 0 {
                    break;
                }
                start -= 1;
            }
        }
    }

    fn sift_down(&mut self, start: usize) {
        let len = self.heap.len();
        let mut root = start;

        while left_child(root) < len {
            let child = left_child(root);
            let mut swap = root;

            if self.less(child, swap) {
                swap = child;
            }

            if child + 1 < len && self.less(child + 1, swap) {
                swap = child + 1;
            }

            if swap == root {
                // root holds smallest element
                return;
            }

            self.swap(root, swap);
            root = swap;
        }
    }

    fn sift_up(&mut self, end: usize) {
        let mut child = end;

        while child > 0 {
            let parent = parent(child);
            if self.less(child, parent) {
                self.swap(parent, child);
                child = parent;
            } else {
                return;
            }
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.vertices[self.heap[a]].heap_index = a;
        self.vertices[self.heap[b]].heap_index = b;
    }

    /// Removes the smallest-area vertex from the heap. Returns its index, or
    /// None if the heap is empty. The vertex stays in the chain.
    fn pop(&mut self) -> Option<usize> {
        let last = self.heap.pop()?;

        let top = if self.heap.is_empty() {
            last
        } else {
            let top = self.heap[0];
            self.heap[0] = last;
            self.vertices[last].heap_index = 0;
            self.sift_down(0);
            top
        };

        self.vertices[top].heap_index = NULL_INDEX;
        Some(top)
    }

    /// Splices vertex `i` out of the chain.
    fn unlink(&mut self, i: usize) {
        let (previous, next) = (self.vertices[i].previous, self.vertices[i].next);
        self.vertices[previous].next = next;
        self.vertices[next].previous = previous;
    }

    /// Recomputes the area of vertex `i` after its neighbors changed, and
    /// restores heap order.
    fn recalculate_area(&mut self, i: usize) {
        let (previous, next, heap_index, old_area) = {
            let v = &self.vertices[i];
            (v.previous, v.next, v.heap_index, v.area)
        };

        if heap_index == NULL_INDEX {
            // A path endpoint, or a vertex that stays. Its weight can't change.
            return;
        }

        let new_area = geo::triangle_area(&self.points[previous], &self.points[i], &self.points[next]);
        self.vertices[i].area = new_area;

        if new_area < old_area {
            self.sift_up(heap_index);
        } else if new_area > old_area {
            self.sift_down(heap_index);
        }
    }

    /// Eliminates vertices until `floor` remain, smallest area first.
    ///
    /// On a closed Ring, `floor` counts distinct Points: a vertex whose Point
    /// would leave fewer than `floor` distinct Points in the chain is never
    /// eliminated, and elimination moves on to the next one.
    ///
    /// Returns `(vertex, weight)` in elimination order. A vertex's weight is
    /// its area when eliminated, raised to the previous weight if smaller:
    /// a vertex can't be less important than one that had to go before it.
    fn eliminate(&mut self, floor: usize) -> Vec<(usize, f64)> {
        let mut copies = HashMap::<(u64, u64), usize>::new();
        if self.closed {
            for p in self.points.iter() {
                *copies.entry(p.key()).or_insert(0) += 1;
            }
        }
        let mut n_distinct = copies.len();

        let mut live = self.vertices.len();
        let mut last_weight = 0.0; // weight of previously-eliminated vertex
        let mut ret = Vec::<(usize, f64)>::with_capacity(self.heap.len());

        while live > floor {
            let i = match self.pop() {
                Some(i) => i,
                None => break,
            };

            if let Some(n) = copies.get_mut(&self.points[i].key()) {
                if *n == 1 {
                    if n_distinct <= floor {
                        // last copy of a Point the Ring can't lose
                        continue;
                    }
                    n_distinct -= 1;
                }
                *n -= 1;
            }

            self.unlink(i);
            live -= 1;

            let weight = self.vertices[i].area.max(last_weight);
            last_weight = weight;
            ret.push((i, weight));

            let (previous, next) = (self.vertices[i].previous, self.vertices[i].next);
            self.recalculate_area(previous);
            self.recalculate_area(next);
        }

        ret
    }
}

/// Returns `(position, weight)` for every vertex of `ring` that
/// Visvalingam-Whyatt eliminates, in elimination order.
///
/// Weights in the result never decrease. Vertices that are never
/// eliminated don't appear: path endpoints, the closure slot and the
/// vertices a closed Ring needs for three distinct Points.
pub fn removal_order(ring: &Ring) -> Vec<(usize, f64)> {
    let (points, floor) = if ring.closed {
        (ring.vertices(), 3)
    } else {
        (&ring.points[..], 2)
    };

    VertexHeap::new(points, ring.closed).eliminate(floor)
}

/// Returns one importance weight per Point of `ring`.
///
/// Vertices that survive elimination, and the closure slot, weigh
/// `f64::INFINITY`.
pub fn weights(ring: &Ring) -> Vec<f64> {
    let mut ret = vec![ f64::INFINITY; ring.len() ];
    for (i, weight) in removal_order(ring) {
        ret[i] = weight;
    }
    ret
}
