//! The three region lists produced by a search, plus the search space.

use rand::Rng;

use crate::geometry::{merge_concatenable, Point, Rectangle};

/// Outcome of a search over `xspace`.
///
/// - `ylow`: boxes proven to lie outside the closure.
/// - `yup`: boxes proven to lie inside the closure.
/// - `border`: boxes whose status is still undetermined.
///
/// Up to floating-point tolerance the three lists partition `xspace`.
/// `ylow` and `yup` never overlap each other; border boxes may share faces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultSet {
    border: Vec<Rectangle>,
    ylow: Vec<Rectangle>,
    yup: Vec<Rectangle>,
    xspace: Rectangle,
}

fn total_volume(rects: &[Rectangle]) -> f64 {
    rects.iter().map(Rectangle::volume).sum()
}

/// Sum of the pairwise intersection volumes within one list.
fn overlapping_volume(rects: &[Rectangle]) -> f64 {
    let mut total = 0.0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            total += a.intersection(b).volume();
        }
    }
    total
}

fn distinct_vertices(rects: &[Rectangle]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();
    for v in rects.iter().flat_map(Rectangle::vertices) {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn sample<R: Rng + ?Sized>(rects: &[Rectangle], n: usize, rng: &mut R) -> Vec<Point> {
    if rects.is_empty() {
        return Vec::new();
    }
    (0..n)
        .map(|_| rects[rng.gen_range(0..rects.len())].sample_point(rng))
        .collect()
}

impl ResultSet {
    pub fn new(
        border: Vec<Rectangle>,
        ylow: Vec<Rectangle>,
        yup: Vec<Rectangle>,
        xspace: Rectangle,
    ) -> Self {
        Self {
            border,
            ylow,
            yup,
            xspace,
        }
    }

    pub fn border(&self) -> &[Rectangle] {
        &self.border
    }

    pub fn ylow(&self) -> &[Rectangle] {
        &self.ylow
    }

    pub fn yup(&self) -> &[Rectangle] {
        &self.yup
    }

    pub fn xspace(&self) -> &Rectangle {
        &self.xspace
    }

    pub fn dim(&self) -> usize {
        self.xspace.dim()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Volumes
    // ─────────────────────────────────────────────────────────────────────

    pub fn volume_space(&self) -> f64 {
        self.xspace.volume()
    }

    pub fn volume_ylow(&self) -> f64 {
        total_volume(&self.ylow)
    }

    pub fn volume_yup(&self) -> f64 {
        total_volume(&self.yup)
    }

    /// Volume of the space not yet classified: `xspace - ylow - yup`.
    pub fn volume_border(&self) -> f64 {
        self.volume_space() - self.volume_ylow() - self.volume_yup()
    }

    /// Plain sum of the border boxes, counting shared faces and overlaps.
    pub fn volume_border_sum(&self) -> f64 {
        total_volume(&self.border)
    }

    pub fn overlapping_volume_ylow(&self) -> f64 {
        overlapping_volume(&self.ylow)
    }

    pub fn overlapping_volume_yup(&self) -> f64 {
        overlapping_volume(&self.yup)
    }

    pub fn overlapping_volume_border(&self) -> f64 {
        overlapping_volume(&self.border)
    }

    /// Sum of the intersection volumes between every `ylow` and `yup` box.
    pub fn overlapping_volume_ylow_yup(&self) -> f64 {
        self.ylow
            .iter()
            .flat_map(|a| self.yup.iter().map(move |b| a.intersection(b).volume()))
            .sum()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────────────

    pub fn member_space(&self, p: &Point) -> bool {
        self.xspace.inside(p)
    }

    pub fn member_yup(&self, p: &Point) -> bool {
        self.yup.iter().any(|r| r.inside(p))
    }

    pub fn member_ylow(&self, p: &Point) -> bool {
        self.ylow.iter().any(|r| r.inside(p))
    }

    /// Inside `xspace` and in neither `yup` nor `ylow`.
    pub fn member_border(&self, p: &Point) -> bool {
        self.member_space(p) && !self.member_yup(p) && !self.member_ylow(p)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Vertices and sampling
    // ─────────────────────────────────────────────────────────────────────

    pub fn vertices_ylow(&self) -> Vec<Point> {
        distinct_vertices(&self.ylow)
    }

    pub fn vertices_yup(&self) -> Vec<Point> {
        distinct_vertices(&self.yup)
    }

    pub fn vertices_border(&self) -> Vec<Point> {
        distinct_vertices(&self.border)
    }

    /// `n` random points, each drawn from a uniformly chosen `ylow` box.
    pub fn sample_ylow<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Point> {
        sample(&self.ylow, n, rng)
    }

    pub fn sample_yup<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Point> {
        sample(&self.yup, n, rng)
    }

    pub fn sample_border<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Point> {
        sample(&self.border, n, rng)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Simplification
    // ─────────────────────────────────────────────────────────────────────

    /// Merges concatenable boxes within each region until none remain.
    ///
    /// The represented regions are unchanged; only the fragment count drops.
    pub fn simplify(&mut self) {
        self.border = merge_concatenable(std::mem::take(&mut self.border));
        self.ylow = merge_concatenable(std::mem::take(&mut self.ylow));
        self.yup = merge_concatenable(std::mem::take(&mut self.yup));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rect(min: [f64; 2], max: [f64; 2]) -> Rectangle {
        Rectangle::new(Point::from(min), Point::from(max))
    }

    /// Unit square split at x = 0.5: left half low, upper right up, lower right border.
    fn sample_set() -> ResultSet {
        ResultSet::new(
            vec![rect([0.5, 0.0], [1.0, 0.5])],
            vec![rect([0.0, 0.0], [0.5, 0.5]), rect([0.0, 0.5], [0.5, 1.0])],
            vec![rect([0.5, 0.5], [1.0, 1.0])],
            rect([0.0, 0.0], [1.0, 1.0]),
        )
    }

    #[test]
    fn test_volumes() {
        let rs = sample_set();
        assert!((rs.volume_space() - 1.0).abs() < 1e-12);
        assert!((rs.volume_ylow() - 0.5).abs() < 1e-12);
        assert!((rs.volume_yup() - 0.25).abs() < 1e-12);
        assert!((rs.volume_border() - 0.25).abs() < 1e-12);
        assert!((rs.volume_border_sum() - 0.25).abs() < 1e-12);
        assert_eq!(rs.overlapping_volume_ylow(), 0.0);
        assert_eq!(rs.overlapping_volume_ylow_yup(), 0.0);
    }

    #[test]
    fn test_empty_regions_contribute_nothing() {
        let rs = ResultSet::new(vec![], vec![], vec![], rect([0.0, 0.0], [2.0, 2.0]));
        assert_eq!(rs.volume_ylow(), 0.0);
        assert_eq!(rs.volume_yup(), 0.0);
        assert!((rs.volume_border() - 4.0).abs() < 1e-12);
        assert!(rs.vertices_ylow().is_empty());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(rs.sample_yup(5, &mut rng).is_empty());
    }

    #[test]
    fn test_overlapping_volume() {
        let rs = ResultSet::new(
            vec![rect([0.0, 0.0], [2.0, 2.0]), rect([1.0, 1.0], [3.0, 3.0])],
            vec![],
            vec![],
            rect([0.0, 0.0], [3.0, 3.0]),
        );
        assert!((rs.overlapping_volume_border() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_membership() {
        let rs = sample_set();
        assert!(rs.member_ylow(&Point::from([0.25, 0.75])));
        assert!(rs.member_yup(&Point::from([0.75, 0.75])));
        assert!(rs.member_border(&Point::from([0.75, 0.25])));
        assert!(!rs.member_border(&Point::from([0.25, 0.25])));
        assert!(!rs.member_border(&Point::from([1.5, 0.25])));
    }

    #[test]
    fn test_vertices_are_distinct() {
        let rs = sample_set();
        assert_eq!(rs.vertices_ylow().len(), 6);
        assert_eq!(rs.vertices_yup().len(), 4);
    }

    #[test]
    fn test_sampling_stays_in_region() {
        let rs = sample_set();
        let mut rng = StdRng::seed_from_u64(3);
        for p in rs.sample_ylow(50, &mut rng) {
            assert!(rs.member_ylow(&p));
        }
        for p in rs.sample_border(50, &mut rng) {
            assert!(rs.border()[0].inside(&p));
        }
    }

    #[test]
    fn test_simplify_merges_fragments() {
        let mut rs = sample_set();
        let before = (rs.volume_ylow(), rs.volume_yup());
        rs.simplify();
        assert_eq!(rs.ylow(), &[rect([0.0, 0.0], [0.5, 1.0])]);
        assert_eq!(rs.yup().len(), 1);
        assert_eq!(rs.border().len(), 1);
        assert!((rs.volume_ylow() - before.0).abs() < 1e-12);
        assert!((rs.volume_yup() - before.1).abs() < 1e-12);
    }
}
