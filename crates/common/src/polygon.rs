use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::types::rotate_degrees;

/// An immutable polygon described by its vertices in order.
///
/// Collision code assumes the polygon is convex with a consistent winding.
/// Neither property is checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
        }
    }

    /// Axis-aligned rectangle spanning `min..max`, walking +x first, then +y
    /// (clockwise on screen).
    pub fn rect(min: Vec2, max: Vec2) -> Self {
        Self::new([
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A copy of this polygon with every vertex shifted by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.vertices.iter().map(|v| *v + offset))
    }

    /// A copy of this polygon rotated about the origin by `degrees`.
    pub fn rotate(&self, degrees: f32) -> Self {
        Self::new(self.vertices.iter().map(|v| rotate_degrees(*v, degrees)))
    }

    /// Non-normalized edge normals, one per edge `v[i] -> v[i + 1]`, wrapping
    /// from the last vertex back to the first.
    ///
    /// Each normal is its edge vector turned by +90 degrees.
    pub fn surface_normals(&self) -> impl Iterator<Item = Vec2> + '_ {
        let next = self.vertices.iter().cycle().skip(1);
        self.vertices.iter().zip(next).map(|(a, b)| (*b - *a).perp())
    }

    /// Smallest and largest dot product of any vertex with `axis`.
    pub fn project(&self, axis: Vec2) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|v| v.dot(axis))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }
}

impl Add<Vec2> for &Polygon {
    type Output = Polygon;

    fn add(self, offset: Vec2) -> Polygon {
        self.translate(offset)
    }
}

impl Sub<Vec2> for &Polygon {
    type Output = Polygon;

    fn sub(self, offset: Vec2) -> Polygon {
        self.translate(-offset)
    }
}
