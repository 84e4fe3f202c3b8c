//! Ordered point sources feeding the index

use crate::spatial::Point3D;

/// An ordered, finite stream of points the index loads from.
///
/// Positions are stable: `points(start, n)` always yields the same points for
/// the same range, so a caller's loaded count doubles as the read cursor.
pub trait PointSource {
    /// Metadata carried by each point
    type Payload;

    /// Total number of points the source can ever yield
    fn total_available(&self) -> usize;

    /// Up to `count` points starting at `start`, in source order.
    ///
    /// Ranges past the end are clamped; an exhausted source yields nothing.
    fn points(&self, start: usize, count: usize) -> Vec<Point3D<Self::Payload>>;

    /// Points left after the first `loaded` have been taken
    fn remaining(&self, loaded: usize) -> usize {
        self.total_available().saturating_sub(loaded)
    }
}

/// In-memory source over an already materialized list of points
#[derive(Clone, Debug, Default)]
pub struct VecSource<P> {
    points: Vec<Point3D<P>>,
}

impl<P> VecSource<P> {
    pub fn new(points: Vec<Point3D<P>>) -> Self {
        Self { points }
    }
}

impl<P> FromIterator<Point3D<P>> for VecSource<P> {
    fn from_iter<I: IntoIterator<Item = Point3D<P>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<P: Clone> PointSource for VecSource<P> {
    type Payload = P;

    fn total_available(&self) -> usize {
        self.points.len()
    }

    fn points(&self, start: usize, count: usize) -> Vec<Point3D<P>> {
        let start = start.min(self.points.len());
        let end = start.saturating_add(count).min(self.points.len());
        self.points[start..end].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(n: usize) -> VecSource<usize> {
        (0..n).map(|i| Point3D::from_xyz(i as f64, 0.0, 0.0, i)).collect()
    }

    #[test]
    fn test_points_in_order() {
        let src = source(10);
        let ids: Vec<usize> = src.points(3, 4).into_iter().map(Point3D::into_payload).collect();
        assert_eq!(ids, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_points_clamped() {
        let src = source(5);
        assert_eq!(src.points(3, 100).len(), 2);
        assert!(src.points(5, 1).is_empty());
        assert!(src.points(50, 1).is_empty());
        assert_eq!(src.points(0, usize::MAX).len(), 5);
    }

    #[test]
    fn test_remaining() {
        let src = source(5);
        assert_eq!(src.remaining(0), 5);
        assert_eq!(src.remaining(4), 1);
        assert_eq!(src.remaining(9), 0);
    }
}
