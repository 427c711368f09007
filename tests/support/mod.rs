//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Point2;
use trapgen::float_types::Real;
use trapgen::layout::Contour;
use trapgen::params::ParameterSet;
use trapgen::tessellate::Quad;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Shoelace area, positive for counter-clockwise rings.
pub fn signed_area(points: &[Point2<Real>]) -> Real {
    let n = points.len();
    0.5 * (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<Real>()
}

/// Total area covered by a list of quads.
pub fn quads_area(quads: &[Quad]) -> Real {
    quads.iter().map(|q| signed_area(q).abs()).sum()
}

/// Counter-clockwise axis-aligned square.
pub fn square(cx: Real, cy: Real, side: Real) -> Contour {
    rectangle(cx - 0.5 * side, cy - 0.5 * side, cx + 0.5 * side, cy + 0.5 * side)
}

/// Counter-clockwise rectangle from its lower left and upper right corners.
pub fn rectangle(x0: Real, y0: Real, x1: Real, y1: Real) -> Contour {
    vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ]
}

/// A chip with a single DC electrode per side whose pad sits `pad_offset`
/// above the electrode.
pub fn single_electrode(pad_offset: Real) -> ParameterSet {
    ParameterSet {
        gap: 10.0,
        dc_count: 1,
        dc_widths: vec![100.0],
        dc_pad_seps: vec![],
        dc_pad_offset: pad_offset,
        ..ParameterSet::default()
    }
}
