//! Axis-aligned n-dimensional boxes and their algebra.

use std::fmt::{self, Display};

use rand::Rng;

use super::error::GeometryError;
use super::point::Point;
use super::segment::Segment;

/// Closed axis-aligned box `[min_corner, max_corner]`.
///
/// The corners are normalized on construction by taking the componentwise
/// minimum and maximum of the two supplied points, so `min_corner <=
/// max_corner` holds on every axis and `Rectangle::new(p, q) ==
/// Rectangle::new(q, p)`. Zero-volume boxes are valid values; a box
/// collapsed onto a single point is the "no intersection" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    min_corner: Point,
    max_corner: Point,
}

impl Rectangle {
    /// Creates the box spanned by two corners.
    ///
    /// # Panics
    ///
    /// Panics if the corners have different dimensions.
    pub fn new(a: Point, b: Point) -> Self {
        let min_corner = a.min_point(&b);
        let max_corner = a.max_point(&b);
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Checked form of [`Rectangle::new`].
    pub fn try_new(a: Point, b: Point) -> Result<Self, GeometryError> {
        a.check_dim(&b)?;
        if a.dim() == 0 {
            return Err(GeometryError::EmptyPoint);
        }
        Ok(Self::new(a, b))
    }

    /// Zero-volume box collapsed onto `at`.
    pub fn degenerate(at: Point) -> Self {
        Self {
            min_corner: at.clone(),
            max_corner: at,
        }
    }

    pub fn min_corner(&self) -> &Point {
        &self.min_corner
    }

    pub fn max_corner(&self) -> &Point {
        &self.max_corner
    }

    pub fn dim(&self) -> usize {
        self.min_corner.dim()
    }

    /// Per-axis side lengths.
    pub fn extents(&self) -> Point {
        &self.max_corner - &self.min_corner
    }

    pub fn volume(&self) -> f64 {
        self.extents().iter().product::<f64>().abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.volume() == 0.0
    }

    pub fn center(&self) -> Point {
        self.min_corner.midpoint(&self.max_corner)
    }

    /// The main diagonal, from `min_corner` to `max_corner`.
    pub fn diag(&self) -> Segment {
        Segment::new(self.min_corner.clone(), self.max_corner.clone())
    }

    pub fn diag_length(&self) -> f64 {
        self.min_corner.distance(&self.max_corner)
    }

    /// Corner selected by the n-bit `index`: bit `n - 1 - axis` picks
    /// `max_corner` on that axis, otherwise `min_corner`.
    pub fn vertex(&self, index: usize) -> Point {
        let n = self.dim();
        let coords = (0..n)
            .map(|axis| {
                if (index >> (n - 1 - axis)) & 1 == 1 {
                    self.max_corner[axis]
                } else {
                    self.min_corner[axis]
                }
            })
            .collect();
        Point::new(coords)
    }

    /// All `2^n` corners; index 0 is `min_corner` and the last is `max_corner`.
    pub fn vertices(&self) -> Vec<Point> {
        (0..1usize << self.dim()).map(|i| self.vertex(i)).collect()
    }

    /// Closed membership: `min_corner <= p <= max_corner`.
    pub fn inside(&self, p: &Point) -> bool {
        self.min_corner.less_equal(p) && p.less_equal(&self.max_corner)
    }

    /// Open membership: `p` lies strictly inside on every axis.
    ///
    /// A point with NaN coordinates is never contained.
    pub fn contains(&self, p: &Point) -> bool {
        p.is_comparable() && self.min_corner.less(p) && p.less(&self.max_corner)
    }

    /// True when `other` lies within `self` (closed).
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        self.inside(&other.min_corner) && self.inside(&other.max_corner)
    }

    /// True iff some vertex of `other` is [`inside`](Self::inside) `self`.
    ///
    /// This samples the corners of `other` only. It is not symmetric and it
    /// misses crossing boxes whose corners all lie outside each other; the
    /// boxes produced by the search never cross that way.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        (0..1usize << other.dim()).any(|i| self.inside(&other.vertex(i)))
    }

    fn touches(&self, other: &Rectangle) -> bool {
        self.overlaps(other) || other.overlaps(self)
    }

    /// Common part of both boxes.
    ///
    /// Unlike [`overlaps`](Self::overlaps), which only samples the vertices
    /// of `other`, this checks vertices in both directions: a small `other`
    /// nested in `self` and a large `other` enclosing `self` both yield their
    /// common part. When neither box has a vertex inside the other the result
    /// is the zero-volume box at `self.min_corner`.
    pub fn intersection(&self, other: &Rectangle) -> Rectangle {
        if !self.touches(other) {
            return Rectangle::degenerate(self.min_corner.clone());
        }
        Rectangle {
            min_corner: self.min_corner.max_point(&other.min_corner),
            max_corner: self.max_corner.min_point(&other.max_corner),
        }
    }

    /// Boxes covering `self \ other`.
    ///
    /// Each axis on which `other` truncates `self` cuts off one slab below
    /// and one above the intersection; adjacent slabs are then merged where
    /// they are concatenable. Returns `[self]` when the boxes do not overlap.
    pub fn difference(&self, other: &Rectangle) -> Vec<Rectangle> {
        if !self.touches(other) {
            return vec![self.clone()];
        }
        let inter = self.intersection(other);
        let mut rest_min = self.min_corner.coords().to_vec();
        let mut rest_max = self.max_corner.coords().to_vec();
        let mut pieces = Vec::with_capacity(2 * self.dim());

        for axis in 0..self.dim() {
            let (lo, hi) = (inter.min_corner[axis], inter.max_corner[axis]);
            if rest_min[axis] < lo {
                let mut max = rest_max.clone();
                max[axis] = lo;
                pieces.push(Rectangle {
                    min_corner: Point::new(rest_min.clone()),
                    max_corner: Point::new(max),
                });
                rest_min[axis] = lo;
            }
            if hi < rest_max[axis] {
                let mut min = rest_min.clone();
                min[axis] = hi;
                pieces.push(Rectangle {
                    min_corner: Point::new(min),
                    max_corner: Point::new(rest_max.clone()),
                });
                rest_max[axis] = hi;
            }
        }

        merge_concatenable(pieces)
    }

    /// True iff both boxes agree on every axis but one, and abut exactly on
    /// that axis.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn concatenable(&self, other: &Rectangle) -> bool {
        assert_eq!(self.dim(), other.dim(), "Rectangle dimension mismatch");
        let mut differing = None;
        for axis in 0..self.dim() {
            let same = self.min_corner[axis] == other.min_corner[axis]
                && self.max_corner[axis] == other.max_corner[axis];
            if !same {
                if differing.is_some() {
                    return false;
                }
                differing = Some(axis);
            }
        }
        match differing {
            Some(axis) => {
                self.max_corner[axis] == other.min_corner[axis]
                    || other.max_corner[axis] == self.min_corner[axis]
            }
            None => false,
        }
    }

    /// Union of two concatenable boxes.
    pub fn concatenate(&self, other: &Rectangle) -> Result<Rectangle, GeometryError> {
        if !self.concatenable(other) {
            return Err(GeometryError::NotConcatenable {
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        Ok(self.span(other))
    }

    fn span(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            min_corner: self.min_corner.min_point(&other.min_corner),
            max_corner: self.max_corner.max_point(&other.max_corner),
        }
    }

    /// Every point of `self` is `<=` every point of `other`.
    pub fn dominates_rect(&self, other: &Rectangle) -> bool {
        self.max_corner.less_equal(&other.min_corner)
    }

    /// Every point of `self` is `>=` every point of `other`.
    pub fn is_dominated_by_rect(&self, other: &Rectangle) -> bool {
        other.dominates_rect(self)
    }

    /// Uniformly random point inside the box.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let coords = self
            .min_corner
            .iter()
            .zip(self.max_corner.iter())
            .map(|(lo, hi)| lo + rng.gen::<f64>() * (hi - lo))
            .collect();
        Point::new(coords)
    }
}

/// Repeatedly merges concatenable pairs until no merge applies.
pub fn merge_concatenable(mut rects: Vec<Rectangle>) -> Vec<Rectangle> {
    loop {
        let mut merged = false;
        'scan: for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                if rects[i].concatenable(&rects[j]) {
                    let other = rects.swap_remove(j);
                    rects[i] = rects[i].span(&other);
                    merged = true;
                    break 'scan;
                }
            }
        }
        if !merged {
            return rects;
        }
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min_corner, self.max_corner)
    }
}

// =============================================================================
// Rectangle Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Rectangle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Rectangle", 2)?;
        s.serialize_field("min_corner", &self.min_corner)?;
        s.serialize_field("max_corner", &self.max_corner)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rectangle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            min_corner: Point,
            max_corner: Point,
        }

        let raw = Raw::deserialize(deserializer)?;
        Rectangle::try_new(raw.min_corner, raw.max_corner).map_err(serde::de::Error::custom)
    }
}
