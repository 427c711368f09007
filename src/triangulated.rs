//! Polygon triangulation into triangle strips.
//!
//! `geo` ear-cuts a polygon (holes included) into loose triangles. These
//! are chained into strips by walking shared edges, so that
//! [`strip_to_quads`] can pair them up into CAD faces.

use crate::errors::{LayoutError, LayoutResult};
use crate::float_types::Real;
use crate::ground::{GroundPlane, to_geo_polygon};
use crate::tessellate::{Quad, strip_to_quads};
use geo::{Polygon, TriangulateEarcut};
use nalgebra::Point2;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Ordered points where every consecutive triple is a triangle.
pub type TriangleStrip = Vec<Point2<Real>>;

/// A planar region that can present itself as triangle strips.
///
/// Anything implementing this gets quad tessellation for free.
pub trait TriangleStrips {
    fn triangle_strips(&self) -> LayoutResult<Vec<TriangleStrip>>;

    /// Tessellate every strip and concatenate the quads.
    fn to_quads(&self) -> LayoutResult<Vec<Quad>> {
        let mut quads = Vec::new();
        for strip in self.triangle_strips()? {
            quads.extend(strip_to_quads(&strip)?);
        }
        Ok(quads)
    }
}

impl TriangleStrips for [Point2<Real>] {
    fn triangle_strips(&self) -> LayoutResult<Vec<TriangleStrip>> {
        if self.len() < 3 {
            return Err(LayoutError::InsufficientGeometry {
                needed: 3,
                len: self.len(),
            });
        }
        triangle_strips(&to_geo_polygon(self))
    }
}

impl TriangleStrips for GroundPlane {
    fn triangle_strips(&self) -> LayoutResult<Vec<TriangleStrip>> {
        let mut strips = Vec::new();
        for polygon in self.polygons() {
            strips.extend(triangle_strips(polygon)?);
        }
        Ok(strips)
    }
}

fn edge(u: usize, v: usize) -> (usize, usize) {
    if u < v { (u, v) } else { (v, u) }
}

/// Triangulate `polygon` and chain the triangles into strips.
///
/// Vertices are unified by exact coordinate. Starting from the first
/// triangle not yet used, each strip grows across the edge formed by its
/// last two points for as long as an unused triangle lies on the other
/// side. The walk follows triangle order, so the output is deterministic.
///
/// A triangle with no unused neighbour becomes a four-point strip with its
/// last point repeated, which tessellates into one degenerate quad.
pub fn triangle_strips(polygon: &Polygon<Real>) -> LayoutResult<Vec<TriangleStrip>> {
    let raw = panic::catch_unwind(AssertUnwindSafe(|| polygon.earcut_triangles_raw()))
        .map_err(|_| LayoutError::FatalGeometry("polygon triangulation failed".into()))?;

    // earcut may hand back the closing point of a ring under its own index
    let mut ids: HashMap<(u64, u64), usize> = HashMap::new();
    let mut points: Vec<Point2<Real>> = Vec::new();
    let mut canonical = Vec::with_capacity(raw.vertices.len() / 2);
    for xy in raw.vertices.chunks_exact(2) {
        // fold -0.0 into 0.0
        let (x, y) = (xy[0] + 0.0, xy[1] + 0.0);
        let id = *ids.entry((x.to_bits(), y.to_bits())).or_insert_with(|| {
            points.push(Point2::new(x, y));
            points.len() - 1
        });
        canonical.push(id);
    }

    let mut triangles: Vec<[usize; 3]> = Vec::with_capacity(raw.triangle_indices.len() / 3);
    for tri in raw.triangle_indices.chunks_exact(3) {
        let [a, b, c] = [canonical[tri[0]], canonical[tri[1]], canonical[tri[2]]];
        if a != b && b != c && a != c {
            triangles.push([a, b, c]);
        }
    }

    let mut edges: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (t, &[a, b, c]) in triangles.iter().enumerate() {
        for key in [edge(a, b), edge(b, c), edge(c, a)] {
            edges.entry(key).or_default().push(t);
        }
    }
    let neighbour = |u: usize, v: usize, used: &[bool]| -> Option<usize> {
        edges.get(&edge(u, v))?.iter().copied().find(|&t| !used[t])
    };

    let mut used = vec![false; triangles.len()];
    let mut strips = Vec::new();
    for start in 0..triangles.len() {
        if used[start] {
            continue;
        }
        used[start] = true;

        let [a, b, c] = triangles[start];
        let first = [[a, b, c], [b, c, a], [c, a, b]]
            .into_iter()
            .find(|r| neighbour(r[1], r[2], &used).is_some())
            .unwrap_or([a, b, c]);
        let mut strip = first.to_vec();

        loop {
            let (u, v) = (strip[strip.len() - 2], strip[strip.len() - 1]);
            let Some(t) = neighbour(u, v, &used) else {
                break;
            };
            used[t] = true;
            let Some(w) = triangles[t].into_iter().find(|&x| x != u && x != v) else {
                break;
            };
            strip.push(w);
        }

        if strip.len() == 3 {
            strip.push(strip[2]);
        }
        strips.push(strip.into_iter().map(|id| points[id]).collect());
    }

    debug!(
        triangles = triangles.len(),
        strips = strips.len(),
        "triangulated polygon"
    );
    Ok(strips)
}
