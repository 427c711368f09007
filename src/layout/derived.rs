//! Positions of DC electrodes and their bonding pads.

use crate::errors::{LayoutError, LayoutResult};
use crate::float_types::Real;
use crate::layout::Side;
use crate::params::ParameterSet;
use tracing::debug;

/// Pad placement and lead routing for one side of the chip.
#[derive(Debug, Clone, PartialEq)]
pub struct SideLayout {
    /// Pad centers along the trap axis
    pub pad_center_positions: Vec<Real>,
    /// Direction each lead jogs to reach its pad: `+1` up, `-1` down, `0` straight
    pub turn: Vec<i8>,
    /// Position of each lead inside its group of same-direction jogs
    pub vertical_section_index: Vec<usize>,
}

/// Values computed once from a [`ParameterSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedParameters {
    /// DC electrode centers along the trap axis, symmetric about 0
    pub center_positions: Vec<Real>,
    pub left: SideLayout,
    pub right: SideLayout,
}

impl DerivedParameters {
    pub fn new(params: &ParameterSet) -> LayoutResult<Self> {
        let n = params.dc_count;
        if n == 0 {
            return Err(LayoutError::Config("dc_count must be at least 1".into()));
        }
        if params.dc_widths.len() != n {
            return Err(LayoutError::Config(format!(
                "dc_widths has {} entries, expected {n}",
                params.dc_widths.len()
            )));
        }
        if params.dc_pad_seps.len() != n - 1 {
            return Err(LayoutError::Config(format!(
                "dc_pad_seps has {} entries, expected {}",
                params.dc_pad_seps.len(),
                n - 1
            )));
        }

        let gap = params.gap;
        let pad_height = params.dc_pad_height;

        let total: Real = params.dc_widths.iter().sum();
        let center_offset = -0.5 * (total + (n - 1) as Real * gap);
        let mut center_positions = Vec::with_capacity(n);
        let mut run = 0.0;
        for (i, width) in params.dc_widths.iter().enumerate() {
            center_positions.push(center_offset + run + 0.5 * width + i as Real * gap);
            run += width;
        }

        let total_seps: Real = params.dc_pad_seps.iter().sum();
        let pad_offset = -0.5 * (n as Real * pad_height + 2.0 * (n - 1) as Real * gap + total_seps)
            + 0.5 * pad_height;
        let pad_centers = |displacement: Real| {
            let mut positions = Vec::with_capacity(n);
            let mut run = 0.0;
            for i in 0..n {
                let stacked = i as Real * (pad_height + 2.0 * gap) + run;
                positions.push(stacked + displacement + pad_offset);
                if let Some(sep) = params.dc_pad_seps.get(i) {
                    run += sep;
                }
            }
            positions
        };

        let left = SideLayout::new(pad_centers(params.pad_offset_left()), &center_positions);
        let right = SideLayout::new(pad_centers(params.pad_offset_right()), &center_positions);
        debug!(
            electrodes = n,
            left_turn = ?left.turn,
            right_turn = ?right.turn,
            "derived DC layout"
        );

        Ok(Self {
            center_positions,
            left,
            right,
        })
    }

    pub const fn side(&self, side: Side) -> &SideLayout {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

impl SideLayout {
    fn new(pad_center_positions: Vec<Real>, center_positions: &[Real]) -> Self {
        let turn: Vec<i8> = pad_center_positions
            .iter()
            .zip(center_positions)
            .map(|(pad, center)| sign(pad - center))
            .collect();
        let vertical_section_index = vertical_section_index(&turn);
        Self {
            pad_center_positions,
            turn,
            vertical_section_index,
        }
    }
}

fn sign(x: Real) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Index each lead within its run of equal, non-zero turns.
///
/// Runs of `+1` count up from their start, runs of `-1` count down to 0 at
/// their end, so the index grows away from where the group jogs to.
/// Straight leads (`0`) get index 0.
///
/// ```
/// use trapgen::layout::vertical_section_index;
/// assert_eq!(
///     vertical_section_index(&[-1, -1, -1, 1, 1, 1, 1]),
///     vec![2, 1, 0, 0, 1, 2, 3]
/// );
/// ```
pub fn vertical_section_index(turn: &[i8]) -> Vec<usize> {
    let mut vsi = Vec::with_capacity(turn.len());
    let mut start = 0;
    while start < turn.len() {
        let t = turn[start];
        if t == 0 {
            vsi.push(0);
            start += 1;
            continue;
        }
        let len = turn[start..].iter().take_while(|&&u| u == t).count();
        if t > 0 {
            vsi.extend(0..len);
        } else {
            vsi.extend((0..len).rev());
        }
        start += len;
    }
    vsi
}
