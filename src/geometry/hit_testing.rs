use super::Point;

/// Squared distance from `point` to the closest point of segment `a`–`b`.
///
/// The projection parameter is clamped to `[0, 1]`. A zero-length segment degenerates to the
/// distance to `a`. No square root is taken.
pub fn distance_squared_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let segment = b - a;
    let length_squared = segment.length_squared();
    if length_squared == 0.0 {
        return (point - a).length_squared();
    }
    let t = (point - a).dot(segment) / length_squared;
    let closest = if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        a + segment * t
    };
    (point - closest).length_squared()
}

/// True if `point` lies strictly within `half_width` of any segment of the polyline.
pub fn polyline_contains(points: &[Point], point: Point, half_width: f64) -> bool {
    let threshold = half_width * half_width;
    points
        .windows(2)
        .any(|pair| distance_squared_to_segment(point, pair[0], pair[1]) < threshold)
}
