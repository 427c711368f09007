use proptest::prelude::*;
use trapgen::layout::{DerivedParameters, Side, vertical_section_index};
use trapgen::{LayoutError, ParameterSet};

mod support;

use crate::support::{approx_eq, single_electrode};

#[test]
fn electrode_array_is_centered() {
    let params = ParameterSet::default();
    let derived = DerivedParameters::new(&params).unwrap();
    let n = params.dc_count;
    let span = params.dc_widths.iter().sum::<f64>() + (n - 1) as f64 * params.gap;

    assert_eq!(derived.center_positions.len(), n);
    let first_edge = derived.center_positions[0] - 0.5 * params.dc_widths[0];
    let last_edge = derived.center_positions[n - 1] + 0.5 * params.dc_widths[n - 1];
    assert!(approx_eq(first_edge, -0.5 * span, 1e-9));
    assert!(approx_eq(last_edge, 0.5 * span, 1e-9));

    for i in 1..n {
        let spacing = derived.center_positions[i] - derived.center_positions[i - 1];
        let expected = 0.5 * (params.dc_widths[i] + params.dc_widths[i - 1]) + params.gap;
        assert!(approx_eq(spacing, expected, 1e-9), "spacing {i}: {spacing} != {expected}");
    }
}

#[test]
fn pad_array_is_centered_and_displaced() {
    let params = ParameterSet::default();
    let derived = DerivedParameters::new(&params).unwrap();
    let pads = &derived.right.pad_center_positions;
    let n = params.dc_count;

    for i in 1..n {
        let spacing = pads[i] - pads[i - 1];
        let expected = params.dc_pad_height + 2.0 * params.gap + params.dc_pad_seps[i - 1];
        assert!(approx_eq(spacing, expected, 1e-9));
    }
    // without the displacement the outer pad edges are symmetric
    let low = pads[0] - 0.5 * params.dc_pad_height - params.dc_pad_offset;
    let high = pads[n - 1] + 0.5 * params.dc_pad_height - params.dc_pad_offset;
    assert!(approx_eq(low, -high, 1e-9));
}

#[test]
fn turn_follows_pad_position() {
    let params = ParameterSet::default();
    let derived = DerivedParameters::new(&params).unwrap();
    for side in Side::BOTH {
        let routing = derived.side(side);
        for i in 0..params.dc_count {
            let delta = routing.pad_center_positions[i] - derived.center_positions[i];
            let expected = if delta > 0.0 {
                1
            } else if delta < 0.0 {
                -1
            } else {
                0
            };
            assert_eq!(routing.turn[i], expected);
        }
    }
    // the reference chip fans out downward below the middle and upward above it
    assert_eq!(derived.right.turn[0], -1);
    assert_eq!(derived.right.turn[params.dc_count - 1], 1);
}

#[test]
fn single_electrode_turns() {
    let up = DerivedParameters::new(&single_electrode(50.0)).unwrap();
    assert_eq!(up.center_positions, vec![0.0]);
    assert_eq!(up.right.pad_center_positions, vec![50.0]);
    assert_eq!(up.right.turn, vec![1]);

    let level = DerivedParameters::new(&single_electrode(0.0)).unwrap();
    assert_eq!(level.right.turn, vec![0]);
    assert_eq!(level.right.vertical_section_index, vec![0]);

    let down = DerivedParameters::new(&single_electrode(-50.0)).unwrap();
    assert_eq!(down.left.turn, vec![-1]);
}

#[test]
fn each_side_routes_with_its_own_offset() {
    let params = ParameterSet {
        dc_pad_offset_right: Some(-3000.0),
        ..ParameterSet::default()
    };
    let derived = DerivedParameters::new(&params).unwrap();
    assert_ne!(derived.left.turn, derived.right.turn);
    assert!(derived.right.turn.iter().all(|&t| t == -1));
    assert_eq!(
        derived.right.vertical_section_index,
        vertical_section_index(&derived.right.turn)
    );
    assert_eq!(
        derived.left.vertical_section_index,
        vertical_section_index(&derived.left.turn)
    );
}

#[test]
fn mismatched_widths_are_rejected() {
    let params = ParameterSet {
        dc_widths: vec![400.0; 9],
        ..ParameterSet::default()
    };
    assert!(matches!(DerivedParameters::new(&params), Err(LayoutError::Config(_))));
    assert!(matches!(params.validate(), Err(LayoutError::Config(_))));
}

#[test]
fn mismatched_pad_seps_are_rejected() {
    let params = ParameterSet {
        dc_pad_seps: vec![100.0; 10],
        ..ParameterSet::default()
    };
    assert!(matches!(DerivedParameters::new(&params), Err(LayoutError::Config(_))));
}

#[test]
fn zero_electrodes_are_rejected() {
    let params = ParameterSet {
        dc_count: 0,
        dc_widths: vec![],
        dc_pad_seps: vec![],
        ..ParameterSet::default()
    };
    assert!(matches!(DerivedParameters::new(&params), Err(LayoutError::Config(_))));
}

#[test]
fn vertical_section_index_example() {
    assert_eq!(
        vertical_section_index(&[-1, -1, -1, 1, 1, 1, 1]),
        vec![2, 1, 0, 0, 1, 2, 3]
    );
    assert_eq!(vertical_section_index(&[0, 0, 1, -1]), vec![0, 0, 0, 0]);
}

proptest! {
    #[test]
    fn runs_map_to_contiguous_ranges(turn in prop::collection::vec(-1i8..=1, 0..40)) {
        let vsi = vertical_section_index(&turn);
        prop_assert_eq!(vsi.len(), turn.len());

        let mut start = 0;
        while start < turn.len() {
            let t = turn[start];
            if t == 0 {
                prop_assert_eq!(vsi[start], 0);
                start += 1;
                continue;
            }
            let len = turn[start..].iter().take_while(|&&u| u == t).count();
            let run = &vsi[start..start + len];
            let expected: Vec<usize> = if t > 0 {
                (0..len).collect()
            } else {
                (0..len).rev().collect()
            };
            prop_assert_eq!(run, expected.as_slice());
            start += len;
        }
    }
}
