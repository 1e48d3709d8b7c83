//! Reads geometry as the statistics pipeline hands it over: two parallel
//! coordinate columns, shapes separated only by the ring-closure convention.
//!
//! # Examples
//!
//! ```
//! use vertexsampling::geo::Point;
//! use vertexsampling::read::{extract, Columns};
//!
//! let columns = Columns::new(
//!     vec![ 0., 1., 0., 0., 5., 6. ],
//!     vec![ 0., 0., 1., 0., 5., 6. ],
//! ).unwrap();
//!
//! let rings = extract(&columns.points());
//! assert_eq!(2, rings.len());
//! assert!(rings[0].closed);
//! assert_eq!(vec![ Point(5., 5.), Point(6., 6.) ], rings[1].points.to_vec());
//! ```

pub mod columns;
pub mod extract;

pub use self::columns::{Columns, ColumnsError};
pub use self::columns::{open, create, read_columns, write_columns};
pub use self::extract::extract;
