//! Point clouds of Cartesian atom positions.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A Cartesian position `[x, y, z]`, in the same length unit as the source
/// structure (Å for crystal structures).
pub type Point3 = [f64; 3];

/// Ordered collection of 3D positions, one per atom of an expanded network.
///
/// Order carries no meaning for extent estimation; it is kept so that
/// producers can be tested deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    points: Vec<Point3>,
}

impl PointCloud {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { points: Vec::with_capacity(capacity) }
    }

    #[inline]
    pub fn push(&mut self, point: Point3) {
        self.points.push(point);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }

    /// Arithmetic mean of all points, `None` for an empty cloud.
    pub fn centroid(&self) -> Option<Point3> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let mut c = [0.0; 3];
        for p in &self.points {
            c[0] += p[0];
            c[1] += p[1];
            c[2] += p[2];
        }
        Some([c[0] / n, c[1] / n, c[2] / n])
    }

    /// Check the preconditions of covariance estimation: at least two
    /// points, all coordinates finite.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.points.len() < 2 {
            return Err(GeometryError::InsufficientData { points: self.points.len() });
        }
        if let Some(index) = self
            .points
            .iter()
            .position(|p| !p.iter().all(|c| c.is_finite()))
        {
            return Err(GeometryError::NonFiniteCoordinate { index });
        }
        Ok(())
    }

    /// Apply `f` to every point, returning a new cloud.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Point3) -> Point3,
    {
        self.points.iter().map(|&p| f(p)).collect()
    }
}

impl From<Vec<Point3>> for PointCloud {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point3> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}

impl Extend<Point3> for PointCloud {
    fn extend<I: IntoIterator<Item = Point3>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
