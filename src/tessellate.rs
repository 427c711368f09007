//! Triangle strips to quadrilateral faces.
//!
//! CAD faces (`3DFACE`) take four corners, so consecutive triangle pairs of
//! a strip are merged into one quad each.

use crate::errors::{LayoutError, LayoutResult};
use crate::float_types::Real;
use nalgebra::Point2;

/// Four corners of a face. The last two coincide when the face holds a
/// single triangle.
pub type Quad = [Point2<Real>; 4];

/// Turn a triangle strip into quads.
///
/// Triangles `(s[i], s[i+1], s[i+2])` and `(s[i+1], s[i+2], s[i+3])` share
/// the diagonal `s[i+1]–s[i+2]`, so their union is the quad
/// `s[i], s[i+1], s[i+3], s[i+2]` (in that order, not strip order, or the
/// outline would cross itself). An odd number of points leaves one triangle
/// over, emitted as a quad with its last point repeated.
///
/// A strip of `n ≥ 4` points gives `ceil((n − 2) / 2)` quads.
pub fn strip_to_quads(strip: &[Point2<Real>]) -> LayoutResult<Vec<Quad>> {
    let n = strip.len();
    if n < 4 {
        return Err(LayoutError::InsufficientGeometry { needed: 4, len: n });
    }

    let mut quads = Vec::with_capacity((n - 1) / 2);
    let mut i = 0;
    while i + 4 <= n {
        quads.push([strip[i], strip[i + 1], strip[i + 3], strip[i + 2]]);
        i += 2;
    }

    if n % 2 == 1 {
        quads.push([strip[n - 3], strip[n - 2], strip[n - 1], strip[n - 1]]);
    }

    Ok(quads)
}
