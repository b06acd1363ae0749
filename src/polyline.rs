//! Route geometry as decoded `[longitude, latitude]` coordinates.
//!
//! Point order follows GeoJSON and the routing service and is never swapped
//! inside the pipeline.

use serde::{Deserialize, Serialize};

/// A polyline of `[longitude, latitude]` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<[f64; 2]>,
}

impl Polyline {
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keep every `interval`-th point (indices 0, k, 2k, ...) and always the
    /// last point.
    ///
    /// An interval of 0 is treated as 1. The result has at most
    /// `ceil(len / interval) + 1` points and shares both endpoints with `self`.
    pub fn sample(&self, interval: usize) -> Polyline {
        let interval = interval.max(1);
        let mut sampled: Vec<[f64; 2]> = self.points.iter().step_by(interval).copied().collect();

        let last_index = self.points.len().saturating_sub(1);
        if !self.points.is_empty() && last_index % interval != 0 {
            sampled.push(self.points[last_index]);
        }

        Polyline::new(sampled)
    }

    pub fn into_points(self) -> Vec<[f64; 2]> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Polyline {
        Polyline::new((0..n).map(|i| [i as f64, -(i as f64)]).collect())
    }

    #[test]
    fn test_sample_101_points_by_10() {
        let sampled = line(101).sample(10);
        assert_eq!(sampled.len(), 11);
        let xs: Vec<f64> = sampled.points().iter().map(|p| p[0]).collect();
        assert_eq!(xs, (0..=100).step_by(10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_appends_last_point() {
        let sampled = line(25).sample(10);
        let xs: Vec<f64> = sampled.points().iter().map(|p| p[0]).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 24.0]);
    }

    #[test]
    fn test_sample_endpoints_and_bound() {
        for n in 1..60 {
            let original = line(n);
            for k in 1..15 {
                let sampled = original.sample(k);
                assert_eq!(sampled.points().first(), original.points().first());
                assert_eq!(sampled.points().last(), original.points().last());
                assert!(sampled.len() <= n.div_ceil(k) + 1, "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn test_sample_single_point() {
        let sampled = line(1).sample(10);
        assert_eq!(sampled.points(), &[[0.0, 0.0]]);
    }

    #[test]
    fn test_sample_zero_interval_keeps_everything() {
        assert_eq!(line(7).sample(0), line(7));
    }

    #[test]
    fn test_sample_empty() {
        assert!(Polyline::new(vec![]).sample(3).is_empty());
    }

    #[test]
    fn test_preserves_lon_lat_order() {
        let polyline = Polyline::new(vec![[-122.4, 37.7], [-122.3, 37.8]]);
        assert_eq!(polyline.sample(5).into_points(), vec![[-122.4, 37.7], [-122.3, 37.8]]);
    }
}
