//! Persistence of the archive: a line-per-point text form and, with the
//! `serde` feature, the JSON form of the recursive node structure.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use super::config::NDTreeConfig;
use super::error::NDTreeError;
use super::tree::NDTree;
use crate::geometry::Point;

impl NDTree {
    /// Writes one `(x1, ..., xn)` line per stored point.
    pub fn write_text<W: Write>(&self, mut writer: W) -> Result<(), NDTreeError> {
        for p in self.points() {
            writeln!(writer, "{}", p)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Loads the text form by inserting every listed point in order.
    ///
    /// Blank lines are skipped. Dominated points in the input are dropped
    /// the same way [`NDTree::insert`] drops them.
    pub fn read_text<R: BufRead>(config: NDTreeConfig, reader: R) -> Result<Self, NDTreeError> {
        let mut tree = NDTree::new(config)?;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let p: Point = line.parse().map_err(|source| NDTreeError::Parse {
                line: i + 1,
                source,
            })?;
            tree.insert(p)?;
        }
        Ok(tree)
    }

    pub fn save_text(&self, path: impl AsRef<Path>) -> Result<(), NDTreeError> {
        let path = path.as_ref();
        debug!("ndtree: writing {} points to {:?}", self.len(), path);
        self.write_text(BufWriter::new(File::create(path)?))
    }

    pub fn load_text(config: NDTreeConfig, path: impl AsRef<Path>) -> Result<Self, NDTreeError> {
        let path = path.as_ref();
        debug!("ndtree: loading points from {:?}", path);
        Self::read_text(config, BufReader::new(File::open(path)?))
    }
}

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use crate::ndtree::tree::NodeSnapshot;
    use std::io::Read;

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Stored {
        config: NDTreeConfig,
        root: NodeSnapshot,
    }

    impl NDTree {
        /// Writes the full node structure (points, children, bounds) as JSON.
        pub fn write_json<W: Write>(&self, writer: W) -> Result<(), NDTreeError> {
            let stored = Stored {
                config: self.config(),
                root: self.snapshot(),
            };
            serde_json::to_writer(writer, &stored)?;
            Ok(())
        }

        /// Restores a tree written by [`NDTree::write_json`] with its exact shape.
        pub fn read_json<R: Read>(reader: R) -> Result<Self, NDTreeError> {
            let stored: Stored = serde_json::from_reader(reader)?;
            NDTree::from_snapshot(stored.config, &stored.root)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> NDTree {
        let points = [(1.0, 5.0), (2.0, 4.0), (3.0, 3.0), (4.0, 2.0), (5.0, 1.0)];
        NDTree::from_points(
            NDTreeConfig::new(2, 2),
            points.iter().map(|&(x, y)| Point::from([x, y])),
        )
        .unwrap()
    }

    #[test]
    fn test_text_format() {
        let tree = NDTree::from_points(
            NDTreeConfig::default(),
            vec![Point::from([1.0, 2.5]), Point::from([2.0, 0.5])],
        )
        .unwrap();
        let mut buf = Vec::new();
        tree.write_text(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "(1, 2.5)\n(2, 0.5)\n");
    }

    #[test]
    fn test_text_roundtrip_preserves_points() {
        let tree = sample_tree();
        let mut buf = Vec::new();
        tree.write_text(&mut buf).unwrap();
        let loaded = NDTree::read_text(tree.config(), buf.as_slice()).unwrap();
        let mut a = tree.points();
        let mut b = loaded.points();
        let key = |p: &Point| p.coords().to_vec();
        a.sort_by(|x, y| key(x).partial_cmp(&key(y)).unwrap());
        b.sort_by(|x, y| key(x).partial_cmp(&key(y)).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_read_text_skips_blank_and_dominated_lines() {
        let input = "(1, 1)\n\n(2, 2)\n(0, 3)\n";
        let tree = NDTree::read_text(NDTreeConfig::default(), input.as_bytes()).unwrap();
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&Point::from([1.0, 1.0])));
        assert!(tree.contains(&Point::from([0.0, 3.0])));
    }

    #[test]
    fn test_read_text_reports_line() {
        let input = "(1, 1)\n(2, oops)\n";
        let err = NDTree::read_text(NDTreeConfig::default(), input.as_bytes()).unwrap_err();
        assert!(matches!(err, NDTreeError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_save_and_load_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.txt");
        let tree = sample_tree();
        tree.save_text(&path).unwrap();
        let loaded = NDTree::load_text(tree.config(), &path).unwrap();
        assert_eq!(loaded.len(), tree.len());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_roundtrip_preserves_shape() {
        let tree = sample_tree();
        let mut buf = Vec::new();
        tree.write_json(&mut buf).unwrap();
        let loaded = NDTree::read_json(buf.as_slice()).unwrap();
        assert_eq!(loaded, tree);
        assert_eq!(loaded.config(), tree.config());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_malformed_input() {
        let err = NDTree::read_json("{\"config\": 3}".as_bytes()).unwrap_err();
        assert!(matches!(err, NDTreeError::Format(_)));
    }
}
