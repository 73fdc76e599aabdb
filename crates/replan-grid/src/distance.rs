use replan_core::Point;

/// Straight-line (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    if a == b {
        return 0.0;
    }
    let d = a - b;
    f64::from(d.x * d.x + d.y * d.y).sqrt()
}
