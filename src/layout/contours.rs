//! Contour templates for every electrode family.
//!
//! Each generator computes a small table of breakpoints (`x1…`, `y1…`) from
//! the parameters and strings them together in a fixed order. All contours
//! come out counter-clockwise and are checked against the chip outline.

use crate::aabb::BoardOutline;
use crate::errors::{LayoutError, LayoutResult};
use crate::float_types::Real;
use crate::layout::{
    Align, Contour, DerivedParameters, Side, check_bounds, mirror, place, zip_points,
};
use crate::params::ParameterSet;
use tracing::debug;

fn board(params: &ParameterSet) -> BoardOutline {
    BoardOutline::centered(params.width, params.height)
}

fn checked(feature: &str, contour: Contour, params: &ParameterSet) -> LayoutResult<Contour> {
    check_bounds(feature, &contour, &board(params))?;
    debug!(feature, vertices = contour.len(), "generated contour");
    Ok(contour)
}

/// Outline of the RF electrode with its bonding pad jog.
///
/// The electrode is a U around the center electrode: two rails of
/// `rf_length` joined below the center electrode, with a bridge from the
/// left rail out to the RF pad near the bottom. 16 vertices.
pub fn rf_contour(params: &ParameterSet) -> LayoutResult<Contour> {
    let gap = params.gap;
    let bridge = params.rf_bridge_width;
    let pad_height = params.rf_pad_height;
    let c = 0.5 * params.center_width;
    let l = 0.5 * params.rf_length;

    let x1 = -c - gap - params.rf_width_left;
    let x2 = -params.rf_pad_offset;
    let x3 = -params.rf_pad_offset - params.rf_pad_width;
    let x4 = c + gap + params.rf_width_right;
    let x5 = c + gap;
    let x6 = -x5;

    let y1 = l;
    let y2 = -l + 0.5 * pad_height + 0.5 * bridge + gap;
    let y3 = -l + pad_height;
    let y4 = -l;
    let y5 = -l + 0.5 * pad_height - 0.5 * bridge;
    let y6 = -0.5 * params.center_length - gap;

    let xs = [x1, x1, x2, x2, x3, x3, x2, x2, x1, x1, x4, x4, x5, x5, x6, x6];
    let ys = [y1, y2, y2, y3, y3, y4, y4, y5, y5, y4, y4, y1, y1, y6, y6, y1];

    checked("rf electrode", zip_points(&xs, &ys), params)
}

/// Outline of the `i`th DC electrode on `side`, including its lead and pad.
///
/// A lead whose pad is level with the electrode runs straight out
/// (12 vertices). Otherwise it jogs in the vertical section, offset by its
/// [`vertical_section_index`](crate::layout::vertical_section_index) so that
/// neighbouring leads turning the same way stay `dc_lead_sep` apart
/// (16 vertices).
pub fn dc_contour(
    params: &ParameterSet,
    derived: &DerivedParameters,
    side: Side,
    i: usize,
) -> LayoutResult<Contour> {
    if i >= params.dc_count || i >= derived.center_positions.len() {
        return Err(LayoutError::Config(format!(
            "dc electrode index {i} out of range for dc_count = {}",
            params.dc_count
        )));
    }

    let routing = derived.side(side);
    let width = params.dc_widths[i];
    let center = derived.center_positions[i];
    let pad = routing.pad_center_positions[i];
    let turn = routing.turn[i];
    let vsi = routing.vertical_section_index[i];

    let gap = params.gap;
    let w = 0.5 * params.width;
    let c = 0.5 * params.center_width;
    let b = 0.5 * params.dc_lead_width;
    let pad_half = 0.5 * params.dc_pad_height;
    let edge = w - params.dc_pad_margin;

    let rf_width = match side {
        Side::Left => params.rf_width_left,
        Side::Right => params.rf_width_right,
    };
    let x1 = c + 2.0 * gap + rf_width;
    let x2 = x1 + params.dc_length;

    let contour = if turn == 0 {
        let x3 = edge - params.dc_pad_width;
        let x4 = edge;

        let y1 = center - 0.5 * width;
        let y2 = center - b;
        let y3 = center - pad_half;
        let y4 = center + pad_half;
        let y5 = center + b;
        let y6 = center + 0.5 * width;

        let xs = [x1, x2, x2, x3, x3, x4, x4, x3, x3, x2, x2, x1];
        let ys = [y1, y1, y2, y2, y3, y3, y4, y4, y5, y5, y6, y6];
        zip_points(&xs, &ys)
    } else {
        let lead = edge - params.dc_pad_width - (vsi as Real + 1.5) * params.dc_lead_sep;
        let jog = Real::from(turn) * b;
        let x3 = lead + jog;
        let x4 = edge - params.dc_pad_width;
        let x5 = edge;
        let x6 = lead - jog;

        let y1 = center - 0.5 * width;
        let y2 = center - b;
        let y3 = pad - b;
        let y4 = pad - pad_half;
        let y5 = pad + pad_half;
        let y6 = pad + b;
        let y7 = center + b;
        let y8 = center + 0.5 * width;

        let xs = [x1, x2, x2, x3, x3, x4, x4, x5, x5, x4, x4, x6, x6, x2, x2, x1];
        let ys = [y1, y1, y2, y2, y3, y3, y4, y4, y5, y5, y6, y6, y7, y7, y8, y8];
        zip_points(&xs, &ys)
    };

    let feature = format!("dc electrode {} {i}", side.name());
    checked(&feature, place(contour, side), params)
}

/// Rectangle of the center electrode. `Align::Center` draws the whole
/// electrode, `Left` and `Right` draw one half of an electrode split along
/// the trap axis by `gap`. 4 vertices.
pub fn center_contour(params: &ParameterSet, align: Align) -> LayoutResult<Contour> {
    let c = 0.5 * params.center_width;
    let y1 = -0.5 * params.center_length;
    let y2 = center_top(params);

    let right_half = |x1| zip_points(&[x1, c, c, x1], &[y1, y1, y2, y2]);
    let contour = match align {
        Align::Center => right_half(-c),
        Align::Right => right_half(0.5 * params.gap),
        Align::Left => mirror(right_half(0.5 * params.gap)),
    };

    checked("center electrode", contour, params)
}

/// Bridge and bonding pad of the center electrode on `side`. 6 vertices.
pub fn center_pad_contour(params: &ParameterSet, side: Side) -> LayoutResult<Contour> {
    let w = 0.5 * params.width;

    // bridge starts at the electrode edge
    let x1 = 0.5 * params.center_width;
    let x2 = w - params.center_pad_margin - params.dc_pad_width;
    let x3 = w - params.center_pad_margin;

    let y1 = center_top(params);
    let y2 = y1 - params.center_bridge_width;
    let y3 = y1 - params.dc_pad_height;

    let xs = [x1, x1, x2, x2, x3, x3];
    let ys = [y1, y2, y2, y3, y3, y1];

    let feature = format!("center pad {}", side.name());
    checked(&feature, place(zip_points(&xs, &ys), side), params)
}

/// Pad for an SMD thermometer sitting on the bottom chip edge, `None` when
/// the chip has no thermometer. 4 vertices.
pub fn thermometer_contour(params: &ParameterSet, side: Side) -> LayoutResult<Option<Contour>> {
    let Some(therm) = &params.thermometer else {
        return Ok(None);
    };
    let h = 0.5 * params.height;

    let offset = match side {
        Side::Left => therm.offset_left,
        Side::Right => therm.offset_right,
    };
    let x1 = offset;
    let x2 = offset + therm.pad_width;
    let y1 = -h + therm.pad_height;
    let y2 = -h;

    let xs = [x1, x1, x2, x2];
    let ys = [y1, y2, y2, y1];

    let feature = format!("thermometer pad {}", side.name());
    checked(&feature, place(zip_points(&xs, &ys), side), params).map(Some)
}

/// Top edge shared by the center electrode and its pad bridges, one gap
/// above the RF rails.
fn center_top(params: &ParameterSet) -> Real {
    0.5 * params.rf_length + params.rf_center_bridge_sep + params.gap + params.center_bridge_width
}
