use crate::geometry::distance;
use crate::model::ControlPoint;

/// Drop anchors closer than `min_spacing` to the previously kept anchor.
///
/// The first and last points are always kept. A dropped point's outgoing
/// handle is carried over to the kept point so the following segment leaves
/// in the same direction.
pub fn merge_close_points(points: Vec<ControlPoint>, min_spacing: f64) -> Vec<ControlPoint> {
    if min_spacing <= 0. || points.len() <= 2 {
        return points;
    }
    let last_index = points.len() - 1;
    let mut kept: Vec<ControlPoint> = Vec::with_capacity(points.len());
    for (idx, cp) in points.into_iter().enumerate() {
        let too_close = idx != last_index
            && kept
                .last()
                .is_some_and(|prev| distance(prev.anchor, cp.anchor) < min_spacing);
        if !too_close {
            kept.push(cp);
        } else if let Some(prev) = kept.last_mut() {
            prev.handle_out = cp.handle_out;
        }
    }
    kept
}

/// Reduce `points` to at most `target` anchors spread evenly along the
/// sequence, always keeping the first and last.
pub fn simplify_to(points: Vec<ControlPoint>, target: usize) -> Vec<ControlPoint> {
    let target = target.max(2);
    let n = points.len();
    if n <= target {
        return points;
    }
    let step = target - 1;
    let mut wanted = (0..target)
        .map(|i| (i * (n - 1) + step / 2) / step)
        .peekable();
    points
        .into_iter()
        .enumerate()
        .filter_map(|(idx, cp)| {
            if wanted.peek() == Some(&idx) {
                wanted.next();
                Some(cp)
            } else {
                None
            }
        })
        .collect()
}
