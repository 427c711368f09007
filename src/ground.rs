//! Ground plane cutout.
//!
//! The ground plane is the chip outline with every electrode footprint,
//! grown by the clearance gap, subtracted from it. Subtracting many
//! separated footprints from one rectangle generally leaves holes and
//! disconnected pieces, so the result is kept as a `geo::MultiPolygon`.

use crate::aabb::{Aabb, BoardOutline};
use crate::errors::{LayoutError, LayoutResult};
use crate::float_types::{Real, tolerance};
use crate::offset::offset;
use geo::{Area, BooleanOps, Contains, Coord, LineString, MultiPolygon, Polygon};
use nalgebra::Point2;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq)]
pub struct GroundPlane {
    pub region: MultiPolygon<Real>,
}

/// Convert a contour into a hole-free `geo` polygon. `geo` closes the ring.
pub fn to_geo_polygon(contour: &[Point2<Real>]) -> Polygon<Real> {
    let coords: Vec<Coord<Real>> = contour.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Polygon::new(LineString::new(coords), Vec::new())
}

impl GroundPlane {
    /// Subtract each of `offset_contours` in turn from the board outline.
    pub fn carve(
        board: &BoardOutline,
        offset_contours: &[Vec<Point2<Real>>],
    ) -> LayoutResult<Self> {
        let mut region = MultiPolygon::new(vec![to_geo_polygon(&board.corners())]);

        for (i, contour) in offset_contours.iter().enumerate() {
            let cutter = checked_cutter(i, contour)?;

            // nothing to cut outside the board
            if let Some(bb) = Aabb::from_points(contour) {
                if !bb.intersects(board) {
                    debug!(contour = i, "cutout lies outside the board, skipped");
                    continue;
                }
            }

            let cutter = MultiPolygon::new(vec![cutter]);
            region = panic::catch_unwind(AssertUnwindSafe(|| region.difference(&cutter)))
                .map_err(|_| {
                    LayoutError::FatalGeometry(format!("polygon difference failed on cutout {i}"))
                })?;
        }

        let holes: usize = region.0.iter().map(|p| p.interiors().len()).sum();
        info!(
            cutouts = offset_contours.len(),
            pieces = region.0.len(),
            holes,
            "carved ground plane"
        );
        Ok(Self { region })
    }

    /// Grow every electrode contour by `gap` and carve the results out of
    /// the board. The offset direction follows each contour's winding.
    pub fn from_electrodes(
        board: &BoardOutline,
        contours: &[Vec<Point2<Real>>],
        gap: Real,
    ) -> LayoutResult<Self> {
        let grown = contours
            .iter()
            .map(|contour| {
                let clockwise = to_geo_polygon(contour).signed_area() < 0.0;
                offset(contour, gap, clockwise)
            })
            .collect::<LayoutResult<Vec<_>>>()?;
        Self::carve(board, &grown)
    }

    /// Whether `p` lies strictly inside the ground plane.
    pub fn contains(&self, p: &Point2<Real>) -> bool {
        self.region.contains(&geo::Point::new(p.x, p.y))
    }

    pub fn polygons(&self) -> &[Polygon<Real>] {
        &self.region.0
    }

    pub fn area(&self) -> Real {
        self.region.unsigned_area()
    }
}

/// Merge the faces of one electrode back into its outer outlines.
///
/// Drawings store an electrode as many small faces, whose sharp corners
/// would turn into long miter spikes when offset one by one, so the faces
/// are united before offsetting. Holes inside a merged outline are dropped,
/// the ground plane never reaches into an electrode. Faces enclosing no area
/// are skipped.
pub fn merge_outlines(faces: &[Vec<Point2<Real>>]) -> LayoutResult<Vec<Vec<Point2<Real>>>> {
    let mut merged = MultiPolygon::<Real>::new(Vec::new());
    for (i, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(LayoutError::InsufficientGeometry {
                needed: 3,
                len: face.len(),
            });
        }
        if face.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(LayoutError::FatalGeometry(format!(
                "face {i} has a non-finite coordinate"
            )));
        }
        let polygon = to_geo_polygon(face);
        if polygon.unsigned_area() < tolerance() {
            continue;
        }

        let face = MultiPolygon::new(vec![polygon]);
        merged = if merged.0.is_empty() {
            face
        } else {
            panic::catch_unwind(AssertUnwindSafe(|| merged.union(&face))).map_err(|_| {
                LayoutError::FatalGeometry(format!("polygon union failed on face {i}"))
            })?
        };
    }

    let outlines: Vec<_> = merged
        .0
        .iter()
        .map(|polygon| outline(polygon.exterior()))
        .filter(|ring| ring.len() >= 3)
        .collect();
    debug!(faces = faces.len(), outlines = outlines.len(), "merged faces");
    Ok(outlines)
}

/// Unclosed copy of `ring` without vertices on straight runs or back-tracks.
fn outline(ring: &LineString<Real>) -> Vec<Point2<Real>> {
    let mut points: Vec<Point2<Real>> = ring.coords().map(|c| Point2::new(c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    // vertex i turns by less than the tolerance
    let straight = |points: &[Point2<Real>], i: usize| {
        let n = points.len();
        let before = points[i] - points[(i + n - 1) % n];
        let after = points[(i + 1) % n] - points[i];
        before.perp(&after).abs() <= tolerance() * before.norm() * after.norm()
    };
    while points.len() >= 3 {
        match (0..points.len()).find(|&i| straight(&points, i)) {
            Some(i) => {
                points.remove(i);
            }
            None => break,
        }
    }
    points
}

fn checked_cutter(i: usize, contour: &[Point2<Real>]) -> LayoutResult<Polygon<Real>> {
    if contour.len() < 3 {
        return Err(LayoutError::InsufficientGeometry {
            needed: 3,
            len: contour.len(),
        });
    }
    if contour.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(LayoutError::FatalGeometry(format!(
            "cutout {i} has a non-finite coordinate"
        )));
    }
    let polygon = to_geo_polygon(contour);
    if polygon.unsigned_area() < tolerance() {
        return Err(LayoutError::FatalGeometry(format!("cutout {i} encloses no area")));
    }
    Ok(polygon)
}
