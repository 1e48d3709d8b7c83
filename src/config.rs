//! What to sample with, and how much to keep.
//!
//! Plot options spell a sampling the way the Python API calls it:
//! `sampling_vertex_dp(n=100)`, or tersely `vertex_vw(150)`.
use std::fmt;
use std::str::FromStr;
use regex::Regex;
use thiserror::Error;

use crate::simplify::Strategy;

lazy_static! {
    static ref SAMPLING_EXPRESSION: Regex = Regex::new(
        r"^\s*(?:sampling_)?(vertex_dp|vertex_vw)\s*\(\s*(?:n\s*=\s*)?([+-]?\d+)\s*\)\s*$"
    ).unwrap();
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown vertex sampling strategy {0:?}: expected vertex_dp or vertex_vw")]
    UnknownStrategy(String),

    #[error("Can't parse sampling expression {0:?}: expected something like vertex_dp(n=100)")]
    InvalidExpression(String),

    #[error("Sampling size {0:?} is out of range")]
    InvalidCount(String),

    #[error("Unknown geometry {0:?}: expected polygon or path")]
    UnknownGeometry(String),
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Strategy, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertex_dp" | "dp" | "douglas_peucker" => Ok(Strategy::DouglasPeucker),
            "vertex_vw" | "vw" | "visvalingam_whyatt" => Ok(Strategy::VisvalingamWhyatt),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// A strategy plus `n`, the vertex budget.
///
/// `n` is allowed to be zero or negative: that samples everything away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingSpec {
    pub strategy: Strategy,
    pub n: i64,
}

impl SamplingSpec {
    pub fn new(strategy: Strategy, n: i64) -> SamplingSpec {
        SamplingSpec { strategy: strategy, n: n }
    }

    /// The canonical spelling, e.g. `sampling_vertex_vw(n=150)`. This is how
    /// the computation message names the sampling.
    pub fn expression(&self) -> String {
        format!("sampling_{}(n={})", self.strategy.name(), self.n)
    }
}

impl fmt::Display for SamplingSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

impl FromStr for SamplingSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<SamplingSpec, ConfigError> {
        let captures = SAMPLING_EXPRESSION.captures(s)
            .ok_or_else(|| ConfigError::InvalidExpression(s.to_string()))?;

        let strategy = captures[1].parse::<Strategy>()?;
        let n = captures[2].parse::<i64>()
            .map_err(|_| ConfigError::InvalidCount(captures[2].to_string()))?;

        Ok(SamplingSpec::new(strategy, n))
    }
}

/// What to do with a Ring that has a NaN or infinite coordinate.
///
/// Such a Ring would poison weight comparisons, so it never reaches the
/// scorer either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonFinitePolicy {
    /// Emit the Ring untouched, in place. It isn't charged to the budget.
    PassThrough,

    /// Leave the Ring out.
    Drop,
}

impl Default for NonFinitePolicy {
    fn default() -> NonFinitePolicy {
        NonFinitePolicy::PassThrough
    }
}

/// How the rows of one group make shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryKind {
    /// Polygon rings: a shape closes where it repeats its first Point, and
    /// the rows hold any number of shapes.
    Polygon,

    /// One open path per group, e.g., a line or a contour. A path that
    /// returns to its first Point is still a path: its ends stay put.
    Path,
}

impl Default for GeometryKind {
    fn default() -> GeometryKind {
        GeometryKind::Polygon
    }
}

impl FromStr for GeometryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<GeometryKind, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polygon" => Ok(GeometryKind::Polygon),
            "path" => Ok(GeometryKind::Path),
            _ => Err(ConfigError::UnknownGeometry(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingConfig {
    pub spec: SamplingSpec,
    pub geometry: GeometryKind,
    pub non_finite: NonFinitePolicy,
}

impl SamplingConfig {
    pub fn new(spec: SamplingSpec) -> SamplingConfig {
        SamplingConfig {
            spec: spec,
            geometry: GeometryKind::default(),
            non_finite: NonFinitePolicy::default(),
        }
    }

    pub fn with_geometry(self, geometry: GeometryKind) -> SamplingConfig {
        SamplingConfig { geometry: geometry, ..self }
    }

    pub fn with_non_finite(self, policy: NonFinitePolicy) -> SamplingConfig {
        SamplingConfig { non_finite: policy, ..self }
    }
}

impl From<SamplingSpec> for SamplingConfig {
    fn from(spec: SamplingSpec) -> SamplingConfig {
        SamplingConfig::new(spec)
    }
}

impl FromStr for SamplingConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<SamplingConfig, ConfigError> {
        s.parse::<SamplingSpec>().map(SamplingConfig::new)
    }
}
