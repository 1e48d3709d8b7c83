//! The entry points: rings in, fewer vertices out.
//!
//! `simplify()` is the bare pipeline (score, allocate, assemble) over Rings
//! with finite coordinates. The `sample_*` functions wrap it for callers
//! holding raw columns: they read shapes, apply the non-finite policy,
//! share one budget across groups and report whether sampling changed
//! anything.
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, warn};

use crate::allocate::allocate;
use crate::assemble::{assemble, assemble_ring};
use crate::config::{GeometryKind, NonFinitePolicy, SamplingConfig};
use crate::geo::{Point, Ring};
use crate::read::{extract, Columns, ColumnsError};
use crate::simplify::{score_all, Strategy};

#[derive(Clone, Debug, PartialEq)]
pub struct SimplificationRequest {
    pub rings: Vec<Ring>,

    /// Total Points to keep, across all Rings, closure points included.
    pub vertex_budget: i64,

    pub strategy: Strategy,
}

/// Simplified Rings, in input order. Rings that couldn't keep their shape
/// within the budget are missing.
pub type SimplificationResult = Vec<Ring>;

/// A sampled value, plus what the caller should tell the user about it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sampled<T> {
    pub value: T,

    /// `true` iff at least one Point was removed.
    pub applied: bool,

    /// e.g., `"sampling_vertex_dp(n=100) was applied"`, when `applied`.
    pub message: Option<String>,
}

impl<T> Sampled<T> {
    fn new(value: T, applied: bool, config: &SamplingConfig) -> Sampled<T> {
        let message = if applied {
            Some(format!("{} was applied", config.spec.expression()))
        } else {
            None
        };

        Sampled { value: value, applied: applied, message: message }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Sampled<U> {
        Sampled { value: f(self.value), applied: self.applied, message: self.message }
    }
}

fn n_points(rings: &[Ring]) -> usize {
    rings.iter().map(|r| r.len()).sum()
}

/// Simplifies `request.rings` to at most `request.vertex_budget` Points.
///
/// Assumes every coordinate is finite; see `sample_rings()` for input that
/// may hold NaN.
///
/// # Examples
///
/// ```
/// use vertexsampling::{simplify, SimplificationRequest, Strategy};
/// use vertexsampling::geo::{Point, Ring};
///
/// let request = SimplificationRequest {
///     rings: vec![ Ring::path(vec![ Point(0., 0.), Point(1., 1.), Point(2., 2.) ]) ],
///     vertex_budget: 2,
///     strategy: Strategy::DouglasPeucker,
/// };
///
/// let result = simplify(&request);
/// assert_eq!(vec![ Ring::path(vec![ Point(0., 0.), Point(2., 2.) ]) ], result);
/// ```
pub fn simplify(request: &SimplificationRequest) -> SimplificationResult {
    let weighted = score_all(&request.rings, request.strategy);
    let masks = allocate(&weighted, request.vertex_budget);
    let ret = assemble(&request.rings, &masks);

    debug!(
        strategy = %request.strategy,
        budget = request.vertex_budget,
        rings_in = request.rings.len(),
        rings_out = ret.len(),
        points_in = n_points(&request.rings),
        points_out = n_points(&ret),
        "simplified rings"
    );

    ret
}

/// Samples `rings` per `config`, one slot per input Ring: the sampled Ring,
/// or `None` where it was dropped. Also returns whether any Point went.
fn sample_aligned(rings: &[Ring], config: &SamplingConfig) -> (Vec<Option<Ring>>, bool) {
    let finite: Vec<bool> = rings.iter().map(|r| r.is_finite()).collect();
    let n_non_finite = finite.iter().filter(|&&f| !f).count();

    if n_non_finite > 0 {
        warn!(
            rings = n_non_finite,
            policy = ?config.non_finite,
            "rings with non-finite coordinates skip vertex sampling"
        );
    }

    let finite_rings: Vec<Ring> = rings.iter()
        .zip(finite.iter())
        .filter(|&(_, &f)| f)
        .map(|(r, _)| r.clone())
        .collect();

    let weighted = score_all(&finite_rings, config.spec.strategy);
    let mut masks = allocate(&weighted, config.spec.n).into_iter();
    let mut finite_iter = finite_rings.iter();

    let mut ret = Vec::<Option<Ring>>::with_capacity(rings.len());
    let mut n_points_out = 0;

    for (ring, &is_finite) in rings.iter().zip(finite.iter()) {
        let out = if is_finite {
            let (finite_ring, mask) = match (finite_iter.next(), masks.next()) {
                (Some(r), Some(m)) => (r, m),
                _ => unreachable!("one mask per finite ring"),
            };

            let sampled = assemble_ring(finite_ring, &mask);
            n_points_out += sampled.as_ref().map_or(0, |r| r.len());
            sampled
        } else if config.non_finite == NonFinitePolicy::PassThrough {
            Some(ring.clone())
        } else {
            None
        };
        ret.push(out);
    }

    let n_points_in = n_points(&finite_rings);
    let applied = n_points_out < n_points_in;

    debug!(
        sampling = %config.spec,
        rings_in = rings.len(),
        rings_out = ret.iter().filter(|r| r.is_some()).count(),
        points_in = n_points_in,
        points_out = n_points_out,
        applied,
        "sampled rings"
    );

    (ret, applied)
}

/// Samples `rings` per `config`.
///
/// Rings with a non-finite coordinate skip simplification: they're passed
/// through in place, uncharged, or dropped, per `config.non_finite`.
pub fn sample_rings(rings: &[Ring], config: &SamplingConfig) -> Sampled<Vec<Ring>> {
    let (sampled, applied) = sample_aligned(rings, config);
    let ret = sampled.into_iter().flatten().collect();
    Sampled::new(ret, applied, config)
}

/// Reads one group's Points as shapes, per `geometry`.
fn shapes(points: &[Point], geometry: GeometryKind) -> Vec<Ring> {
    match geometry {
        GeometryKind::Polygon => extract(points),
        GeometryKind::Path if points.len() >= 2 => vec![ Ring::path(points.to_vec()) ],
        GeometryKind::Path => vec![],
    }
}

/// Samples geometry in column form: read shapes, sample, flatten back.
///
/// All rows form one group; see `sample_groups()`.
///
/// # Examples
///
/// ```
/// use vertexsampling::{sample_columns, SamplingConfig};
/// use vertexsampling::read::Columns;
///
/// // a rectangle, closed by repeating its first corner
/// let columns = Columns::new(
///     vec![ 0., 0., 100., 100., 0. ],
///     vec![ 0., 100., 100., 0., 0. ],
/// ).unwrap();
///
/// let config: SamplingConfig = "vertex_dp(n=4)".parse().unwrap();
/// let sampled = sample_columns(&columns, &config);
///
/// assert_eq!(&[ 0., 0., 100., 0. ], sampled.value.xs());
/// assert_eq!(&[ 0., 100., 100., 0. ], sampled.value.ys());
/// assert_eq!(Some("sampling_vertex_dp(n=4) was applied".to_string()), sampled.message);
/// ```
pub fn sample_columns(columns: &Columns, config: &SamplingConfig) -> Sampled<Columns> {
    let rings = shapes(&columns.points(), config.geometry);
    sample_rings(&rings, config).map(|rings| Columns::from_rings(&rings))
}

/// Samples grouped rows, all groups sharing the one budget `n`.
///
/// `groups[row]` names the group of each row. Rows of a group needn't be
/// adjacent, but they're read in row order, and each group's shapes are
/// read apart from the others'. The shapes of all groups then compete for
/// the budget together, in order of their group's first appearance.
///
/// Groups come out in that order too, and the returned group column lines
/// up with the returned coordinate columns. A group whose shapes were all
/// dropped is missing.
pub fn sample_groups<G: Clone + Eq + Hash>(
    columns: &Columns,
    groups: &[G],
    config: &SamplingConfig,
) -> Result<Sampled<(Columns, Vec<G>)>, ColumnsError> {
    if groups.len() != columns.len() {
        return Err(ColumnsError::GroupLengthMismatch { rows: columns.len(), groups: groups.len() });
    }

    let mut group_index = HashMap::<&G, usize>::new();
    let mut group_rows = Vec::<(&G, Vec<usize>)>::new();
    for (row, group) in groups.iter().enumerate() {
        let i = *group_index.entry(group).or_insert_with(|| {
            group_rows.push((group, vec![]));
            group_rows.len() - 1
        });
        group_rows[i].1.push(row);
    }

    let mut rings = Vec::<Ring>::new();
    let mut ring_groups = Vec::<&G>::new();
    for &(group, ref rows) in group_rows.iter() {
        let points: Vec<Point> = rows.iter().map(|&row| columns.point(row)).collect();
        for ring in shapes(&points, config.geometry) {
            rings.push(ring);
            ring_groups.push(group);
        }
    }

    let (sampled, applied) = sample_aligned(&rings, config);

    let mut xs = Vec::<f64>::new();
    let mut ys = Vec::<f64>::new();
    let mut out_groups = Vec::<G>::new();

    for (ring, &group) in sampled.iter().zip(ring_groups.iter()) {
        if let Some(ring) = ring {
            for point in ring.points.iter() {
                xs.push(point.0);
                ys.push(point.1);
                out_groups.push(group.clone());
            }
        }
    }

    let out_columns = Columns::new(xs, ys)?;
    Ok(Sampled::new((out_columns, out_groups), applied, config))
}

#[cfg(test)]
mod tests {
    use crate::config::{GeometryKind, NonFinitePolicy, SamplingConfig, SamplingSpec};
    use crate::geo::{Point, Ring};
    use crate::read::{Columns, ColumnsError};
    use crate::simplify::Strategy;
    use super::*;

    fn config(strategy: Strategy, n: i64) -> SamplingConfig {
        SamplingConfig::new(SamplingSpec::new(strategy, n))
    }

    fn square(x: f64) -> Ring {
        Ring::closed_from_vertices(vec![ Point(x, 0.), Point(x, 1.), Point(x + 1., 1.), Point(x + 1., 0.) ])
    }

    fn nan_path() -> Ring {
        Ring::path(vec![ Point(0., 0.), Point(f64::NAN, 1.), Point(2., 2.) ])
    }

    #[test]
    fn empty_input() {
        let request = SimplificationRequest { rings: vec![], vertex_budget: 10, strategy: Strategy::DouglasPeucker };
        assert!(simplify(&request).is_empty());

        let sampled = sample_columns(&Columns::default(), &config(Strategy::VisvalingamWhyatt, 10));
        assert!(sampled.value.is_empty());
        assert!(!sampled.applied);
        assert_eq!(None, sampled.message);
    }

    #[test]
    fn non_positive_budget_empties_result() {
        let request = SimplificationRequest { rings: vec![ square(0.) ], vertex_budget: 0, strategy: Strategy::DouglasPeucker };
        assert!(simplify(&request).is_empty());
    }

    #[test]
    fn untouched_input_reports_nothing() {
        let sampled = sample_rings(&[ square(0.), square(5.) ], &config(Strategy::DouglasPeucker, 10));
        assert_eq!(vec![ square(0.), square(5.) ], sampled.value);
        assert!(!sampled.applied);
        assert_eq!(None, sampled.message);
    }

    #[test]
    fn non_finite_ring_passes_through_in_place_and_free() {
        let rings = vec![ square(0.), nan_path(), square(5.) ];
        let sampled = sample_rings(&rings, &config(Strategy::DouglasPeucker, 10));
        // NaN != NaN, so compare the passed-through Ring by its rendering
        assert_eq!(3, sampled.value.len());
        assert_eq!(square(0.), sampled.value[0]);
        assert_eq!(nan_path().to_string(), sampled.value[1].to_string());
        assert_eq!(square(5.), sampled.value[2]);
        assert!(!sampled.applied);
    }

    #[test]
    fn non_finite_ring_can_be_dropped() {
        let rings = vec![ square(0.), nan_path(), square(5.) ];
        let config = config(Strategy::VisvalingamWhyatt, 10).with_non_finite(NonFinitePolicy::Drop);
        let sampled = sample_rings(&rings, &config);
        assert_eq!(vec![ square(0.), square(5.) ], sampled.value);
    }

    #[test]
    fn message_names_the_sampling() {
        let sampled = sample_rings(&[ square(0.) ], &config(Strategy::VisvalingamWhyatt, 4));
        assert!(sampled.applied);
        assert_eq!(Some("sampling_vertex_vw(n=4) was applied".to_string()), sampled.message);
        assert_eq!(4, sampled.value[0].len());
    }

    #[test]
    fn all_nan_columns_do_not_fail() {
        let columns = Columns::new(vec![ f64::NAN; 7 ], vec![ f64::NAN; 7 ]).unwrap();
        for &strategy in &[ Strategy::DouglasPeucker, Strategy::VisvalingamWhyatt ] {
            let sampled = sample_columns(&columns, &config(strategy, 5));
            assert_eq!(7, sampled.value.len());

            let dropped = sample_columns(&columns, &config(strategy, 5).with_non_finite(NonFinitePolicy::Drop));
            assert!(dropped.value.is_empty());
        }
    }

    #[test]
    fn groups_share_the_budget() {
        // two open paths, each five rows; group "b" rows interleave with "a"
        let xs = vec![ 0., 0., 1., 1., 2., 2., 3., 3., 4., 4. ];
        let ys = vec![ 0., 10., 5., 10., 0., 10., 5., 10., 0., 10. ];
        let groups = vec![ "a", "b", "a", "b", "a", "b", "a", "b", "a", "b" ];
        let columns = Columns::new(xs, ys).unwrap();

        let sampled = sample_groups(&columns, &groups, &config(Strategy::DouglasPeucker, 6)).unwrap();
        let (out, out_groups) = sampled.value;

        // "a" zigzags, so both its peaks beat anything on straight "b"
        assert_eq!(6, out.len());
        assert_eq!(vec![ "a", "a", "a", "a", "b", "b" ], out_groups);
        assert_eq!(&[ 0., 1., 3., 4. ], &out.xs()[.. 4]);
        assert_eq!(&[ 0., 4. ], &out.xs()[4 ..]);
        assert!(sampled.applied);
        assert_eq!(Some("sampling_vertex_dp(n=6) was applied".to_string()), sampled.message);
    }

    #[test]
    fn group_that_does_not_fit_is_left_out() {
        let columns = Columns::new(vec![ 0., 1., 2., 5., 6. ], vec![ 0., 1., 0., 5., 6. ]).unwrap();
        let groups = vec![ 1, 1, 1, 2, 2 ];

        let sampled = sample_groups(&columns, &groups, &config(Strategy::VisvalingamWhyatt, 3)).unwrap();
        let (out, out_groups) = sampled.value;
        assert_eq!(vec![ 1, 1, 1 ], out_groups);
        assert_eq!(&[ 0., 1., 2. ], out.xs());
    }

    #[test]
    fn path_geometry_keeps_a_returning_line_open() {
        let columns = Columns::new(vec![ 0., 10., 10., 0., 0. ], vec![ 0., 0., 10., 10., 0. ]).unwrap();
        let path = config(Strategy::VisvalingamWhyatt, 3).with_geometry(GeometryKind::Path);

        let sampled = sample_columns(&columns, &path);
        assert_eq!(3, sampled.value.len());
        assert_eq!(Point(0., 0.), sampled.value.point(0));
        assert_eq!(Point(0., 0.), sampled.value.point(2));

        // as a polygon, three Points can't hold the ring
        let polygon = config(Strategy::VisvalingamWhyatt, 3);
        assert!(sample_columns(&columns, &polygon).value.is_empty());
    }

    #[test]
    fn path_geometry_makes_one_path_per_group() {
        let columns = Columns::new(
            vec![ 0., 0., 1., 1., 0., 0., 2. ],
            vec![ 0., 9., 1., 9., 0., 9., 9. ],
        ).unwrap();
        let groups = vec![ "a", "b", "a", "b", "a", "b", "b" ];
        let config = config(Strategy::DouglasPeucker, 100).with_geometry(GeometryKind::Path);

        let sampled = sample_groups(&columns, &groups, &config).unwrap();
        let (out, out_groups) = sampled.value;
        assert_eq!(7, out.len());
        assert_eq!(vec![ "a", "a", "a", "b", "b", "b", "b" ], out_groups);
        assert!(!sampled.applied);
    }

    #[test]
    fn nan_row_passes_through_either_way() {
        let mut ys = vec![ 0.; 11 ];
        ys[4] = f64::NAN;
        let columns = Columns::new((0 .. 11).map(|x| x as f64).collect(), ys).unwrap();

        for &geometry in &[ GeometryKind::Polygon, GeometryKind::Path ] {
            for &strategy in &[ Strategy::DouglasPeucker, Strategy::VisvalingamWhyatt ] {
                let sampled = sample_columns(&columns, &config(strategy, 5).with_geometry(geometry));
                assert_eq!(11, sampled.value.len());
                assert!(!sampled.applied);
            }
        }
    }

    #[test]
    fn group_column_must_line_up() {
        let columns = Columns::new(vec![ 0., 1. ], vec![ 0., 1. ]).unwrap();
        match sample_groups(&columns, &[ 1 ], &config(Strategy::DouglasPeucker, 3)) {
            Err(ColumnsError::GroupLengthMismatch { rows: 2, groups: 1 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
