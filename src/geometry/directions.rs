//! Corner-selector directions and the box decomposition around a cut.
//!
//! A direction `alpha` in `{0,1}^n` is stored as `Vec<bool>` (`true` = 1).
//! The all-zero and all-one directions are *comparable*: they select the
//! boxes below and above the cut. The remaining `2^n - 2` directions are
//! *incomparable* and select the boxes whose status is still unknown.

use super::point::Point;
use super::rectangle::Rectangle;

fn direction(index: usize, n: usize) -> Vec<bool> {
    (0..n).map(|axis| (index >> (n - 1 - axis)) & 1 == 1).collect()
}

/// The all-zero and all-one directions, in that order.
pub fn comparable_directions(n: usize) -> [Vec<bool>; 2] {
    [vec![false; n], vec![true; n]]
}

/// Every direction except the all-zero and all-one ones.
///
/// Empty for `n < 2`.
pub fn incomparable_directions(n: usize) -> Vec<Vec<bool>> {
    if n < 2 {
        return Vec::new();
    }
    (1..(1usize << n) - 1).map(|i| direction(i, n)).collect()
}

/// Sub-box of `xspace` selected by `alpha` around the cut `y_rect`.
///
/// On axis `i`, `alpha[i] == false` keeps `[xspace.min, y_rect.max]` and
/// `alpha[i] == true` keeps `[y_rect.min, xspace.max]`.
///
/// # Panics
///
/// Panics if `alpha`, `y_rect` and `xspace` disagree on the dimension.
pub fn brect(alpha: &[bool], y_rect: &Rectangle, xspace: &Rectangle) -> Rectangle {
    assert_eq!(alpha.len(), y_rect.dim(), "Direction dimension mismatch");
    assert_eq!(y_rect.dim(), xspace.dim(), "Rectangle dimension mismatch");

    let (min, max): (Vec<f64>, Vec<f64>) = alpha
        .iter()
        .enumerate()
        .map(|(axis, &up)| {
            if up {
                (y_rect.min_corner()[axis], xspace.max_corner()[axis])
            } else {
                (xspace.min_corner()[axis], y_rect.max_corner()[axis])
            }
        })
        .unzip();
    Rectangle::new(Point::new(min), Point::new(max))
}

/// [`brect`] applied to every direction in `alphas`.
pub fn irect(alphas: &[Vec<bool>], y_rect: &Rectangle, xspace: &Rectangle) -> Vec<Rectangle> {
    alphas
        .iter()
        .map(|alpha| brect(alpha, y_rect, xspace))
        .collect()
}

/// Disjoint boxes covering `rect` minus its corner boxes `[rect.min, y.min]`
/// and `[y.max, rect.max]`.
///
/// Covers the same set as [`irect`] over the incomparable directions, but
/// the band `[y.min, y.max]`, where the [`brect`] boxes overlap, is handed
/// to exactly one box. The first `n - 1` boxes lie below `y.min` on the
/// leading axes and above it on one axis. The next one is the band on
/// axis 0, and the last `n - 1` lie above `y.max` on the leading axes and
/// below it on one axis. Thin slabs may be degenerate.
///
/// # Panics
///
/// Panics if `y_rect` and `rect` disagree on the dimension.
pub fn disjoint_irect(y_rect: &Rectangle, rect: &Rectangle) -> Vec<Rectangle> {
    assert_eq!(y_rect.dim(), rect.dim(), "Rectangle dimension mismatch");
    let n = rect.dim();
    let low = y_rect.min_corner().coords();
    let high = y_rect.max_corner().coords();
    let mut pieces = Vec::with_capacity(2 * n);

    for axis in 1..n {
        let mut min = rect.min_corner().coords().to_vec();
        let mut max = rect.max_corner().coords().to_vec();
        max[..axis].copy_from_slice(&low[..axis]);
        min[axis] = low[axis];
        pieces.push(Rectangle::new(Point::new(min), Point::new(max)));
    }
    for axis in 0..n {
        let mut min = rect.min_corner().coords().to_vec();
        let mut max = rect.max_corner().coords().to_vec();
        if axis == 0 {
            min[0] = low[0];
        } else {
            min[..axis].copy_from_slice(&high[..axis]);
        }
        max[axis] = high[axis];
        pieces.push(Rectangle::new(Point::new(min), Point::new(max)));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(min: [f64; 2], max: [f64; 2]) -> Rectangle {
        Rectangle::new(Point::from(min), Point::from(max))
    }

    #[test]
    fn test_direction_counts() {
        assert!(incomparable_directions(1).is_empty());
        assert_eq!(incomparable_directions(2).len(), 2);
        assert_eq!(incomparable_directions(3).len(), 6);
        assert_eq!(
            incomparable_directions(2),
            vec![vec![false, true], vec![true, false]]
        );
        assert_eq!(
            comparable_directions(3),
            [vec![false; 3], vec![true; 3]]
        );
    }

    #[test]
    fn test_brect_selects_sub_boxes() {
        let xspace = rect([0.0, 0.0], [1.0, 1.0]);
        let cut = rect([0.4, 0.4], [0.6, 0.6]);

        assert_eq!(brect(&[false, false], &cut, &xspace), rect([0.0, 0.0], [0.6, 0.6]));
        assert_eq!(brect(&[true, true], &cut, &xspace), rect([0.4, 0.4], [1.0, 1.0]));
        assert_eq!(brect(&[false, true], &cut, &xspace), rect([0.0, 0.4], [0.6, 1.0]));
        assert_eq!(brect(&[true, false], &cut, &xspace), rect([0.4, 0.0], [1.0, 0.6]));
    }

    #[test]
    fn test_irect_covers_incomparable_corners() {
        let xspace = rect([0.0, 0.0], [1.0, 1.0]);
        let cut = rect([0.5, 0.5], [0.5, 0.5]);
        let pieces = irect(&incomparable_directions(2), &cut, &xspace);
        let volume: f64 = pieces.iter().map(Rectangle::volume).sum();
        assert_eq!(pieces.len(), 2);
        assert!((volume - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_irect_in_the_plane() {
        let r = rect([0.0, 0.0], [1.0, 1.0]);
        let cut = rect([0.4, 0.4], [0.6, 0.6]);
        assert_eq!(
            disjoint_irect(&cut, &r),
            vec![
                rect([0.0, 0.4], [0.4, 1.0]),
                rect([0.4, 0.0], [0.6, 1.0]),
                rect([0.6, 0.0], [1.0, 0.6]),
            ]
        );
    }

    #[test]
    fn test_disjoint_irect_on_a_line_is_the_gap() {
        let r = Rectangle::new(Point::from([0.0]), Point::from([1.0]));
        let cut = Rectangle::new(Point::from([0.25]), Point::from([0.5]));
        assert_eq!(disjoint_irect(&cut, &r), vec![cut]);
    }

    #[test]
    fn test_disjoint_irect_partitions_the_rest() {
        let r = Rectangle::new(Point::from([0.0, 0.0, 0.0]), Point::from([1.0, 2.0, 1.0]));
        let cut = Rectangle::new(Point::from([0.3, 0.5, 0.6]), Point::from([0.4, 0.9, 0.7]));
        let pieces = disjoint_irect(&cut, &r);
        assert_eq!(pieces.len(), 5);

        let low = Rectangle::new(r.min_corner().clone(), cut.min_corner().clone());
        let high = Rectangle::new(cut.max_corner().clone(), r.max_corner().clone());
        let volume: f64 = pieces.iter().map(Rectangle::volume).sum();
        assert!((volume + low.volume() + high.volume() - r.volume()).abs() < 1e-12);

        let mut all = pieces.clone();
        all.push(low);
        all.push(high);
        for (i, a) in all.iter().enumerate() {
            assert!(r.contains_rect(a));
            for b in &all[i + 1..] {
                assert!(a.intersection(b).volume() < 1e-12, "{a} overlaps {b}");
            }
        }
    }
}
