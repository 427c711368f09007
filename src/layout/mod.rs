//! Electrode geometry of the trap.
//!
//! The trap axis runs along y. The RF electrode and the center electrode
//! sit on the axis, DC electrodes line up along both sides of it and route
//! their leads out to bonding pads near the left and right chip edges.
//! Features that come in left/right pairs are computed for the right side
//! and mirrored.

use crate::aabb::BoardOutline;
use crate::errors::{LayoutError, LayoutResult};
use crate::float_types::Real;
use nalgebra::Point2;

pub mod contours;
pub mod derived;

pub use contours::{
    center_contour, center_pad_contour, dc_contour, rf_contour, thermometer_contour,
};
pub use derived::{DerivedParameters, SideLayout, vertical_section_index};

/// Ordered, implicitly closed polygon boundary. The first vertex is not
/// repeated at the end.
pub type Contour = Vec<Point2<Real>>;

/// Which half of the chip a mirrored feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub const fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Horizontal placement of a feature that may straddle the center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Mirror a right-side contour onto the left side.
///
/// Negating x flips the winding, reversing the point order restores it.
pub fn mirror(contour: Contour) -> Contour {
    contour
        .into_iter()
        .rev()
        .map(|p| Point2::new(-p.x, p.y))
        .collect()
}

/// Place a right-side contour on `side`.
pub(crate) fn place(contour: Contour, side: Side) -> Contour {
    match side {
        Side::Right => contour,
        Side::Left => mirror(contour),
    }
}

/// Fail if any vertex of `contour` lies outside the chip outline.
pub fn check_bounds(
    feature: &str,
    contour: &[Point2<Real>],
    board: &BoardOutline,
) -> LayoutResult<()> {
    match contour.iter().position(|p| !board.contains(p)) {
        Some(index) => Err(LayoutError::OutOfBounds {
            feature: feature.to_string(),
            index,
            x: contour[index].x,
            y: contour[index].y,
        }),
        None => Ok(()),
    }
}

/// Build a contour from matching breakpoint tables.
pub(crate) fn zip_points(xs: &[Real], ys: &[Real]) -> Contour {
    debug_assert_eq!(xs.len(), ys.len());
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| Point2::new(x, y))
        .collect()
}
