//! Budgeted vertex sampling for polylines and polygons.
//!
//! Given many Rings and one vertex budget, keep the vertices that matter
//! most to the shapes, preserving the order of the Points kept, closure of
//! closed Rings and a minimum shape per surviving Ring.
//!
//! The pipeline is `read::extract()`, `simplify::score_all()`,
//! `allocate()`, `assemble()`. `sample_columns()` runs all of it.
extern crate byteorder;
extern crate itertools;
#[macro_use] extern crate lazy_static;
extern crate rayon;
extern crate regex;
extern crate thiserror;
extern crate tracing;

pub mod geo;
pub mod read;
pub mod simplify;
pub mod allocate;
pub mod assemble;
pub mod config;
mod sample;

pub use allocate::allocate;
pub use assemble::assemble;
pub use config::{ConfigError, GeometryKind, NonFinitePolicy, SamplingConfig, SamplingSpec};
pub use read::extract;
pub use sample::{sample_columns, sample_groups, sample_rings, simplify, Sampled, SimplificationRequest, SimplificationResult};
pub use simplify::{score, score_all, Strategy};
