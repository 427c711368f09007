use trapgen::aabb::BoardOutline;
use trapgen::layers::LayerAssembler;
use trapgen::layout::{
    Align, DerivedParameters, Side, center_contour, center_pad_contour, check_bounds, dc_contour,
    mirror, rf_contour, thermometer_contour,
};
use trapgen::params::ThermometerPads;
use trapgen::{LayoutError, ParameterSet};

mod support;

use crate::support::{approx_eq, signed_area, single_electrode};

#[test]
fn vertex_counts() {
    let params = ParameterSet::default();
    let derived = DerivedParameters::new(&params).unwrap();

    assert_eq!(rf_contour(&params).unwrap().len(), 16);
    assert_eq!(center_contour(&params, Align::Center).unwrap().len(), 4);
    for side in Side::BOTH {
        assert_eq!(center_pad_contour(&params, side).unwrap().len(), 6);
        for i in 0..params.dc_count {
            let expected = if derived.side(side).turn[i] == 0 { 12 } else { 16 };
            assert_eq!(dc_contour(&params, &derived, side, i).unwrap().len(), expected);
        }
    }
}

#[test]
fn left_side_mirrors_right_side() {
    let params = ParameterSet::default();
    let derived = DerivedParameters::new(&params).unwrap();

    for i in 0..params.dc_count {
        let left = dc_contour(&params, &derived, Side::Left, i).unwrap();
        let right = dc_contour(&params, &derived, Side::Right, i).unwrap();
        assert_eq!(left, mirror(right));
    }
    assert_eq!(
        center_pad_contour(&params, Side::Left).unwrap(),
        mirror(center_pad_contour(&params, Side::Right).unwrap())
    );
}

#[test]
fn all_contours_are_counter_clockwise_and_on_the_chip() {
    let params = ParameterSet {
        thermometer: Some(ThermometerPads::default()),
        ..ParameterSet::default()
    };
    let derived = DerivedParameters::new(&params).unwrap();
    let assembler = LayerAssembler::electrodes(&params, &derived).unwrap();
    let board = BoardOutline::centered(params.width, params.height);

    let mut count = 0;
    for contour in assembler.contours() {
        assert!(signed_area(contour) > 0.0, "clockwise contour {contour:?}");
        check_bounds("test", contour, &board).unwrap();
        count += 1;
    }
    // rf + 2 * dc + center + 2 pads + 2 thermometer pads
    assert_eq!(count, 1 + 2 * params.dc_count + 3 + 2);
}

#[test]
fn single_electrode_straight_and_jogged() {
    let straight = single_electrode(0.0);
    let derived = DerivedParameters::new(&straight).unwrap();
    let contour = dc_contour(&straight, &derived, Side::Right, 0).unwrap();
    assert_eq!(contour.len(), 12);
    // electrode edges at +-50, lead at +-25
    assert!(approx_eq(contour[0].y, -50.0, 1e-9));
    assert!(approx_eq(contour[2].y, -25.0, 1e-9));
    assert!(approx_eq(contour[11].y, 50.0, 1e-9));

    let jogged = single_electrode(50.0);
    let derived = DerivedParameters::new(&jogged).unwrap();
    let contour = dc_contour(&jogged, &derived, Side::Right, 0).unwrap();
    assert_eq!(contour.len(), 16);
    // the pad sits 50 above the electrode
    let pad_top = contour.iter().map(|p| p.y).fold(f64::MIN, f64::max);
    assert!(approx_eq(pad_top, 50.0 + 0.5 * jogged.dc_pad_height, 1e-9));
    // pad reaches the chip edge minus its margin
    let right = contour.iter().map(|p| p.x).fold(f64::MIN, f64::max);
    assert!(approx_eq(right, 0.5 * jogged.width - jogged.dc_pad_margin, 1e-9));
}

#[test]
fn short_chip_is_out_of_bounds() {
    let params = ParameterSet {
        height: 1000.0,
        ..ParameterSet::default()
    };
    match rf_contour(&params) {
        Err(LayoutError::OutOfBounds { feature, index, y, .. }) => {
            assert_eq!(feature, "rf electrode");
            assert_eq!(index, 0);
            assert!(approx_eq(y, 5750.0, 1e-9));
        }
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
}

#[test]
fn oversized_pad_margin_names_the_electrode() {
    let params = ParameterSet {
        dc_pad_margin: -500.0,
        ..ParameterSet::default()
    };
    let derived = DerivedParameters::new(&params).unwrap();
    let err = dc_contour(&params, &derived, Side::Left, 3).unwrap_err();
    let LayoutError::OutOfBounds { feature, .. } = &err else {
        panic!("expected OutOfBounds, got {err}");
    };
    assert_eq!(feature, "dc electrode left 3");
}

#[test]
fn electrode_index_out_of_range() {
    let params = ParameterSet::default();
    let derived = DerivedParameters::new(&params).unwrap();
    assert!(matches!(
        dc_contour(&params, &derived, Side::Right, params.dc_count),
        Err(LayoutError::Config(_))
    ));
}

#[test]
fn split_center_electrode() {
    let params = ParameterSet::default();
    let whole = center_contour(&params, Align::Center).unwrap();
    let right = center_contour(&params, Align::Right).unwrap();
    let left = center_contour(&params, Align::Left).unwrap();

    let half_gap = 0.5 * params.gap;
    assert!(right.iter().all(|p| p.x >= half_gap - 1e-9));
    assert!(left.iter().all(|p| p.x <= -half_gap + 1e-9));
    assert_eq!(left, mirror(right.clone()));

    let top = whole.iter().map(|p| p.y).fold(f64::MIN, f64::max);
    let bottom = whole.iter().map(|p| p.y).fold(f64::MAX, f64::min);
    let halves = signed_area(&left) + signed_area(&right);
    let expected = signed_area(&whole) - params.gap * (top - bottom);
    assert!(approx_eq(halves, expected, 1e-6));
}

#[test]
fn center_pads_meet_the_electrode() {
    let params = ParameterSet::default();
    let center = center_contour(&params, Align::Center).unwrap();
    let pad = center_pad_contour(&params, Side::Right).unwrap();

    let top = center.iter().map(|p| p.y).fold(f64::MIN, f64::max);
    assert!(approx_eq(pad[0].y, top, 1e-9));
    assert!(approx_eq(pad[0].x, 0.5 * params.center_width, 1e-9));
    assert!(approx_eq(pad[4].x, 0.5 * params.width - params.center_pad_margin, 1e-9));
}

#[test]
fn thermometer_pads_are_optional() {
    let params = ParameterSet::default();
    assert_eq!(thermometer_contour(&params, Side::Left).unwrap(), None);

    let params = ParameterSet {
        thermometer: Some(ThermometerPads::default()),
        ..ParameterSet::default()
    };
    let right = thermometer_contour(&params, Side::Right).unwrap().unwrap();
    let left = thermometer_contour(&params, Side::Left).unwrap().unwrap();
    assert_eq!(right.len(), 4);
    assert!(right.iter().all(|p| p.x >= 500.0 && p.x <= 1100.0));
    assert!(left.iter().all(|p| p.x <= -1200.0 && p.x >= -1800.0));
    assert!(right.iter().any(|p| approx_eq(p.y, -0.5 * params.height, 1e-9)));
}
