use kurbo::{BezPath, Point};

/// Concrete ordered sequence of world-space points a hint marker travels along.
///
/// Built once per activation by [`crate::build_polyline`] and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Polyline {
    points: Vec<Point>,
    closed: bool,
}

impl Polyline {
    pub(crate) fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// All points in travel order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when there are no points at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the source was closed into a loop (last point repeats the first).
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Point at `index`.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Number of segments (`len - 1`, or 0).
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Polyline as an open path, handy for drawing or for building a corridor.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
        }
        path
    }
}
