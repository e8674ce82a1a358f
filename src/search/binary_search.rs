use crate::geometry::{Point, Segment};
use crate::oracle::OracleError;

/// Bisects `segment` until every axis of `high - low` is below `error`.
///
/// `f` is assumed monotone along the segment: false at `low`, true at
/// `high`. Points where `f` holds replace `high`; the others replace `low`.
/// Returns the narrowed segment and the number of evaluations.
///
/// Bisection also stops once the midpoint coincides with an endpoint, which
/// happens when `error` is finer than the float spacing at these coordinates.
pub fn binary_search<F>(
    segment: Segment,
    mut f: F,
    error: &Point,
) -> Result<(Segment, usize), OracleError>
where
    F: FnMut(&Point) -> Result<bool, OracleError>,
{
    let mut y = segment;
    let mut steps = 0;
    while !y.diag().less(error) {
        let mid = y.center();
        if &mid == y.low() || &mid == y.high() {
            break;
        }
        if f(&mid)? {
            y.set_high(mid);
        } else {
            y.set_low(mid);
        }
        steps += 1;
    }
    Ok((y, steps))
}
