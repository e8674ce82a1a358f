//! Geometry: points, diagonal segments and axis-aligned boxes.
//!
//! [`Rectangle`] carries the box algebra the search relies on (volume,
//! vertices, overlap, intersection, difference, concatenation, dominance),
//! and [`brect`] / [`irect`] / [`disjoint_irect`] decompose a box around a
//! cut point.

mod directions;
mod error;
mod point;
mod rectangle;
mod segment;

pub use directions::{
    brect, comparable_directions, disjoint_irect, incomparable_directions, irect,
};
pub use error::GeometryError;
pub use point::Point;
pub use rectangle::{merge_concatenable, Rectangle};
pub use segment::Segment;
