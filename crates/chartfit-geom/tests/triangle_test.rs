use chartfit_geom::{
    Error, Orientation, PartitionSegment, SolveMethod, WeightedItem, items_in_order,
    partition_triangle,
};
use proptest::prelude::*;

fn bands(segments: &[PartitionSegment]) -> Vec<(f64, f64)> {
    segments
        .iter()
        .map(|s| {
            let t = s.trapezoid().expect("trapezoid geometry");
            (t.y_top, t.y_bottom)
        })
        .collect()
}

fn total_area(segments: &[PartitionSegment]) -> f64 {
    segments.iter().map(PartitionSegment::area).sum()
}

#[test]
fn first_band_of_ascending_pyramid_matches_closed_form() {
    let items = items_in_order([("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);
    let segments = partition_triangle(&items, 100.0, 100.0, Orientation::ApexUp).unwrap();

    let first = segments[0].trapezoid().unwrap();
    assert_eq!(first.y_top, 0.0);
    assert!((first.y_bottom - 100.0 * (0.1f64).sqrt()).abs() < 1e-9);
    assert!((first.y_bottom - 31.6227766).abs() < 1e-6);

    // Cumulative area fraction k maps to depth H·sqrt(k).
    let second = segments[1].trapezoid().unwrap();
    assert!((second.y_bottom - 100.0 * (0.3f64).sqrt()).abs() < 1e-9);
    let third = segments[2].trapezoid().unwrap();
    assert!((third.y_bottom - 100.0 * (0.6f64).sqrt()).abs() < 1e-9);
    assert_eq!(segments[3].trapezoid().unwrap().y_bottom, 100.0);
}

#[test]
fn band_areas_are_proportional_to_weights() {
    let items = items_in_order([("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);
    let segments = partition_triangle(&items, 100.0, 100.0, Orientation::ApexUp).unwrap();
    for (segment, weight) in segments.iter().zip([1.0, 2.0, 3.0, 4.0]) {
        let expected = weight / 10.0 * 5000.0;
        assert!((segment.area() - expected).abs() < 1e-6, "{segment:?}");
        assert!(!segment.used_fallback);
    }
}

#[test]
fn huge_finite_weights_keep_proportional_areas() {
    let items = items_in_order([("a", 1e308), ("b", 1e308)]);
    let segments = partition_triangle(&items, 100.0, 100.0, Orientation::ApexUp).unwrap();
    for segment in &segments {
        assert!((segment.area() - 2500.0).abs() < 1e-6, "{segment:?}");
    }

    let items = items_in_order([("max", f64::MAX), ("half", f64::MAX / 2.0), ("tiny", 1.0)]);
    let segments = partition_triangle(&items, 100.0, 100.0, Orientation::ApexDown).unwrap();
    assert!((segments[0].area() - 5000.0 / 1.5).abs() < 1e-6);
    assert!((segments[1].area() - 5000.0 / 3.0).abs() < 1e-6);
    assert!(segments.iter().all(|s| s.area().is_finite()));
    assert!((total_area(&segments) - 5000.0).abs() < 1e-6);
}

#[test]
fn funnel_puts_the_first_item_on_the_wide_edge() {
    let items = items_in_order([("top", 4.0), ("mid", 3.0), ("low", 2.0), ("tip", 1.0)]);
    let segments = partition_triangle(&items, 100.0, 100.0, Orientation::ApexDown).unwrap();

    let ids: Vec<&str> = segments.iter().map(|s| s.item_id.as_str()).collect();
    assert_eq!(ids, vec!["top", "mid", "low", "tip"]);

    let top = segments[0].trapezoid().unwrap();
    assert_eq!(top.y_top, 0.0);
    assert_eq!(top.width_top, 100.0);
    let tip = segments[3].trapezoid().unwrap();
    assert_eq!(tip.y_bottom, 100.0);
    assert_eq!(tip.width_bottom, 0.0);
    assert!((tip.y_top - (100.0 - 100.0 * (0.1f64).sqrt())).abs() < 1e-9);
    assert!((total_area(&segments) - 5000.0).abs() < 1e-6);
}

#[test]
fn zero_weight_item_yields_zero_height_band() {
    let items = items_in_order([("a", 1.0), ("zero", 0.0), ("b", 1.0)]);
    let segments = partition_triangle(&items, 80.0, 120.0, Orientation::ApexUp).unwrap();

    let zero = &segments[1];
    let t = zero.trapezoid().unwrap();
    assert!(zero.zero_area);
    assert!(!zero.is_rendered());
    assert_eq!(t.height(), 0.0);
    assert_eq!(t.solve, SolveMethod::ZeroWeight);
    assert_eq!(t.y_top, segments[0].trapezoid().unwrap().y_bottom);
    assert!(segments[0].is_rendered() && segments[2].is_rendered());
}

#[test]
fn trailing_zero_weight_sits_on_the_base() {
    let items = items_in_order([("a", 1.0), ("zero", 0.0)]);
    let segments = partition_triangle(&items, 50.0, 50.0, Orientation::ApexUp).unwrap();
    assert_eq!(bands(&segments), vec![(0.0, 50.0), (50.0, 50.0)]);
}

#[test]
fn all_zero_weights_produce_zero_segments_without_nan() {
    let items = items_in_order([("a", 0.0), ("b", 0.0)]);
    let segments = partition_triangle(&items, 100.0, 100.0, Orientation::ApexUp).unwrap();
    assert_eq!(segments.len(), 2);
    for s in &segments {
        assert!(s.zero_area);
        assert_eq!(s.area(), 0.0);
        let t = s.trapezoid().unwrap();
        assert!(t.y_top.is_finite() && t.y_bottom.is_finite());
    }
}

#[test]
fn empty_input_yields_no_segments() {
    let segments = partition_triangle(&[], 100.0, 100.0, Orientation::ApexUp).unwrap();
    assert!(segments.is_empty());
}

#[test]
fn processing_follows_order_index_not_input_position() {
    let items = vec![
        WeightedItem::new("second", 3.0, 1),
        WeightedItem::new("first", 1.0, 0),
    ];
    let segments = partition_triangle(&items, 100.0, 100.0, Orientation::ApexUp).unwrap();
    assert_eq!(segments[0].item_id, "first");
    assert!((segments[0].trapezoid().unwrap().y_bottom - 50.0).abs() < 1e-9);
}

#[test]
fn invalid_inputs_are_typed_errors() {
    let items = items_in_order([("ok", 1.0), ("bad", -2.0)]);
    let err = partition_triangle(&items, 100.0, 100.0, Orientation::ApexUp).unwrap_err();
    assert_eq!(
        err,
        Error::NegativeWeight {
            id: "bad".to_string(),
            weight: -2.0
        }
    );

    let items = items_in_order([("nan", f64::NAN)]);
    assert!(matches!(
        partition_triangle(&items, 100.0, 100.0, Orientation::ApexUp),
        Err(Error::NonFiniteWeight { .. })
    ));

    let items = items_in_order([("a", 1.0)]);
    assert!(matches!(
        partition_triangle(&items, 0.0, 100.0, Orientation::ApexUp),
        Err(Error::InvalidDimension { field: "width", .. })
    ));
    assert!(matches!(
        partition_triangle(&items, 100.0, f64::INFINITY, Orientation::ApexUp),
        Err(Error::InvalidDimension { field: "height", .. })
    ));
}

#[test]
fn degenerate_silhouette_uses_flagged_fallbacks() {
    // W/2H = 5e-14 is below the degenerate-slope threshold.
    let items = items_in_order([("a", 1.0), ("b", 1.0), ("c", 2.0)]);
    let segments = partition_triangle(&items, 1e-10, 1000.0, Orientation::ApexUp).unwrap();

    let methods: Vec<SolveMethod> = segments
        .iter()
        .map(|s| s.trapezoid().unwrap().solve)
        .collect();
    assert_eq!(methods[0], SolveMethod::Proportional);
    assert_eq!(methods[1], SolveMethod::Linear);
    assert!(segments.iter().all(|s| s.used_fallback));
    assert_eq!(segments[2].trapezoid().unwrap().y_bottom, 1000.0);
    for pair in segments.windows(2) {
        assert_eq!(
            pair[0].trapezoid().unwrap().y_bottom,
            pair[1].trapezoid().unwrap().y_top
        );
    }
}

#[test]
fn segments_serialize_with_kind_tag() {
    let items = items_in_order([("a", 1.0)]);
    let segments = partition_triangle(&items, 10.0, 10.0, Orientation::ApexUp).unwrap();
    let json = serde_json::to_value(&segments[0]).unwrap();
    assert_eq!(json["itemId"], "a");
    assert_eq!(json["geometry"]["kind"], "trapezoid");
    assert_eq!(json["geometry"]["yBottom"], 10.0);
    assert_eq!(json["usedFallback"], false);
}

proptest! {
    #[test]
    fn areas_sum_to_the_silhouette(
        weights in prop::collection::vec(0.0f64..1000.0, 1..20),
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
        funnel in any::<bool>(),
    ) {
        let items = items_in_order(weights.iter().enumerate().map(|(i, w)| (format!("i{i}"), *w)));
        let orientation = if funnel { Orientation::ApexDown } else { Orientation::ApexUp };
        let segments = partition_triangle(&items, width, height, orientation).unwrap();

        let target = width * height / 2.0;
        let sum = total_area(&segments);
        if weights.iter().any(|w| *w > 0.0) {
            prop_assert!(((sum - target) / target).abs() < 1e-6, "sum {sum} target {target}");
        } else {
            prop_assert_eq!(sum, 0.0);
        }
    }

    #[test]
    fn bands_are_contiguous_and_monotonic(
        weights in prop::collection::vec(0.0f64..1000.0, 1..20),
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
        funnel in any::<bool>(),
    ) {
        let items = items_in_order(weights.iter().enumerate().map(|(i, w)| (format!("i{i}"), *w)));
        let orientation = if funnel { Orientation::ApexDown } else { Orientation::ApexUp };
        let segments = partition_triangle(&items, width, height, orientation).unwrap();

        let b = bands(&segments);
        for (top, bottom) in &b {
            prop_assert!(top <= bottom);
        }
        for pair in b.windows(2) {
            prop_assert_eq!(pair[0].1, pair[1].0);
        }
    }
}
