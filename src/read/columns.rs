//! Two parallel coordinate columns, X and Y.
//!
//! This is the shape geometry arrives in and leaves in: one row per Point,
//! all shapes concatenated, each closed ring repeating its first row as its
//! last.
//!
//! The binary form is little-endian:
//!
//! | bytes         | value                  |
//! |---------------|------------------------|
//! | 4             | `u32` row count `n`    |
//! | `8 * n`       | `n` × `f64` X column   |
//! | `8 * n`       | `n` × `f64` Y column   |
use std::fs;
use std::io;
use std::path::Path;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use thiserror::Error;

use crate::geo::{Point, Ring};

const COLUMNS_HEADER_LENGTH: usize = 4;
const COLUMNS_VALUE_LENGTH: usize = 8;

#[derive(Error, Debug)]
pub enum ColumnsError {
    #[error(transparent)]
    IOError(#[from] io::Error),

    #[error("X column has {xs} rows but Y column has {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Group column has {groups} rows but geometry has {rows}")]
    GroupLengthMismatch { rows: usize, groups: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Columns {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Columns {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Columns, ColumnsError> {
        if xs.len() != ys.len() {
            return Err(ColumnsError::LengthMismatch { xs: xs.len(), ys: ys.len() });
        }
        Ok(Columns { xs: xs, ys: ys })
    }

    pub fn from_points<'a, T: IntoIterator<Item=&'a Point>>(points: T) -> Columns {
        let (xs, ys) = points.into_iter().map(|p| (p.0, p.1)).unzip();
        Columns { xs: xs, ys: ys }
    }

    /// Flattens Rings back into columns, ring after ring. Closed Rings carry
    /// their closure slot, so the closure row comes out too.
    pub fn from_rings(rings: &[Ring]) -> Columns {
        Columns::from_points(rings.iter().flat_map(|r| r.points.iter()))
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn point(&self, row: usize) -> Point {
        Point(self.xs[row], self.ys[row])
    }

    pub fn points(&self) -> Vec<Point> {
        self.xs.iter().zip(self.ys.iter()).map(|(&x, &y)| Point(x, y)).collect()
    }
}

fn read_column(file: &mut dyn io::Read, n: usize, name: &str) -> Result<Vec<f64>, ColumnsError> {
    let mut column = vec![ 0f64; n ];
    file.read_f64_into::<LittleEndian>(&mut column).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ColumnsError::ParseError(format!("{} column is truncated: expected {} values", name, n))
        } else {
            ColumnsError::IOError(err)
        }
    })?;
    Ok(column)
}

/// Reads one Columns value, and checks nothing follows it.
pub fn read_columns(file: &mut dyn io::Read) -> Result<Columns, ColumnsError> {
    let n = file.read_u32::<LittleEndian>().map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ColumnsError::ParseError(format!("File is shorter than its {}-byte header", COLUMNS_HEADER_LENGTH))
        } else {
            ColumnsError::IOError(err)
        }
    })? as usize;

    let xs = read_column(file, n, "X")?;
    let ys = read_column(file, n, "Y")?;

    let mut rest = [ 0u8; 1 ];
    if file.read(&mut rest)? != 0 {
        return Err(ColumnsError::ParseError(format!("File has bytes after its {} rows", n)));
    }

    Columns::new(xs, ys)
}

pub fn write_columns(file: &mut dyn io::Write, columns: &Columns) -> Result<(), ColumnsError> {
    if columns.len() > u32::max_value() as usize {
        return Err(ColumnsError::ParseError(format!("Can't write {} rows: the format holds at most {}", columns.len(), u32::max_value())));
    }

    file.write_u32::<LittleEndian>(columns.len() as u32)?;
    for &x in columns.xs.iter() {
        file.write_f64::<LittleEndian>(x)?;
    }
    for &y in columns.ys.iter() {
        file.write_f64::<LittleEndian>(y)?;
    }
    Ok(())
}

/// Number of bytes `write_columns()` produces for `n` rows.
pub fn encoded_len(n: usize) -> usize {
    COLUMNS_HEADER_LENGTH + 2 * COLUMNS_VALUE_LENGTH * n
}

pub fn open(path: &Path) -> Result<Columns, ColumnsError> {
    let mut r = io::BufReader::new(fs::File::open(path)?);
    read_columns(&mut r)
}

pub fn create(path: &Path, columns: &Columns) -> Result<(), ColumnsError> {
    let mut w = io::BufWriter::new(fs::File::create(path)?);
    write_columns(&mut w, columns)?;
    io::Write::flush(&mut w)?;
    Ok(())
}
