//! JSON persistence of result sets and of single rectangle lists.
//!
//! A result file bundles `border`, `ylow`, `yup` and `xspace` as one JSON
//! object. Files are written to a sibling temporary path and renamed into
//! place, so readers never observe a partially written bundle.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use super::error::ResultSetError;
use super::set::ResultSet;
use crate::geometry::Rectangle;

/// Serializes one rectangle list.
pub fn write_rectangles<W: Write>(writer: W, rects: &[Rectangle]) -> Result<(), ResultSetError> {
    serde_json::to_writer(writer, rects)?;
    Ok(())
}

/// Deserializes one rectangle list.
pub fn read_rectangles<R: Read>(reader: R) -> Result<Vec<Rectangle>, ResultSetError> {
    Ok(serde_json::from_reader(reader)?)
}

impl ResultSet {
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), ResultSetError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Reads a bundle and checks that every box matches the dimension of
    /// `xspace`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ResultSetError> {
        let rs: ResultSet = serde_json::from_reader(reader)?;
        let expected = rs.dim();
        let all = rs.border().iter().chain(rs.ylow()).chain(rs.yup());
        if let Some(bad) = all.into_iter().find(|r| r.dim() != expected) {
            return Err(ResultSetError::DimensionMismatch {
                expected,
                found: bad.dim(),
            });
        }
        Ok(rs)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ResultSetError> {
        let path = path.as_ref();
        let tmp = path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            self.to_writer(&mut writer)?;
            writer.flush()?;
        }
        fs::rename(&tmp, path)?;
        debug!("result set written to {:?}", path);
        Ok(())
    }

    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, ResultSetError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}
