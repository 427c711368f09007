//! **Mathematical Foundation: Miter Offsetting of Simple Polygons**
//!
//! Grows a contour by moving every vertex along the bisector of its corner.
//!
//! ## **Construction**
//! For a vertex `p` with neighbours `a` (previous) and `b` (next), let
//! ```text
//! v₁ = (a − p) / |a − p|,   θ₁ = atan2(v₁)
//! v₂ = (b − p) / |b − p|,   θ₂ = atan2(v₂)
//! Δθ = ½(θ₂ − θ₁),          θₘ = ½(θ₁ + θ₂)
//! p' = p + (m / sin Δθ) · (cos θₘ, sin θₘ)
//! ```
//! Both edges adjacent to `p'` then lie exactly `m` from the original
//! edges, which is the miter join of the offset polygon.
//!
//! ## **Winding**
//! With counter-clockwise winding a positive margin grows the polygon. For
//! clockwise contours the displacement is negated.
//!
//! ## **Degenerate Corners**
//! - `Δθ = 0` exactly (the two edges fold back onto each other): the vertex
//!   is dropped and the result has one vertex fewer.
//! - `|sin Δθ|` below [`tolerance`](crate::float_types::tolerance): the miter
//!   length blows up, reported as [`LayoutError::DegenerateCorner`].
//!
//! Margins larger than the shortest adjacent edge can produce
//! self-intersecting output; keep the margin small relative to the edges.

use crate::errors::{LayoutError, LayoutResult};
use crate::float_types::{Real, tolerance};
use nalgebra::{Point2, Vector2};

/// Offset `contour` outward by `margin`.
///
/// Output vertex `k` is the displaced input vertex `k + 1` (mod n).
pub fn offset(
    contour: &[Point2<Real>],
    margin: Real,
    clockwise: bool,
) -> LayoutResult<Vec<Point2<Real>>> {
    let n = contour.len();
    if n < 3 {
        return Err(LayoutError::InsufficientGeometry { needed: 3, len: n });
    }

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let index = (i + 1) % n;
        let p0 = contour[i];
        let p1 = contour[index];
        let p2 = contour[(i + 2) % n];

        let v1 = unit(p0 - p1).ok_or(LayoutError::DegenerateCorner { index })?;
        let v2 = unit(p2 - p1).ok_or(LayoutError::DegenerateCorner { index })?;

        let theta1 = v1.y.atan2(v1.x);
        let theta2 = v2.y.atan2(v2.x);
        let dtheta = 0.5 * (theta2 - theta1);

        // edges fold back onto each other
        if dtheta == 0.0 {
            continue;
        }
        let sin = dtheta.sin();
        if sin.abs() < tolerance() {
            return Err(LayoutError::DegenerateCorner { index });
        }

        let d = if clockwise { -margin / sin } else { margin / sin };
        let theta = 0.5 * (theta1 + theta2);
        out.push(p1 + Vector2::new(d * theta.cos(), d * theta.sin()));
    }

    Ok(out)
}

fn unit(v: Vector2<Real>) -> Option<Vector2<Real>> {
    let norm = v.norm();
    (norm > 0.0 && norm.is_finite()).then(|| v / norm)
}
