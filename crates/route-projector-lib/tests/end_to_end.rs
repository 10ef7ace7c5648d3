//! End-to-end checks over the public API

use route_projector_lib::{
    Bounds, MarkerKind, RenderConfig, RouteLeg, RoutePoint, RouteSummary, build_render_model,
    compute_bounds, decode_polyline, encode_polyline, fit_zoom, render,
};

const CANONICAL: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn canonical_leg_builds_expected_model() {
    let legs = vec![RouteLeg::new(CANONICAL)];
    let model = build_render_model(&legs, &RenderConfig::default());

    assert_eq!(model.segments.len(), 1);
    let points = &model.segments[0].points;
    assert_eq!(points.len(), 3);
    assert!(close(points[0].lat, 38.5) && close(points[0].lng, -120.2));
    assert!(close(points[1].lat, 40.7) && close(points[1].lng, -120.95));
    assert!(close(points[2].lat, 43.252) && close(points[2].lng, -126.453));

    let bounds = model.bounds.expect("non-empty route has bounds");
    assert!(close(bounds.min_lat, 38.5));
    assert!(close(bounds.max_lat, 43.252));
    assert!(close(bounds.min_lng, -126.453));
    assert!(close(bounds.max_lng, -120.2));

    assert_eq!(model.markers.len(), 2);
    assert_eq!(model.markers[0].kind, MarkerKind::Start);
    assert!(close(model.markers[0].position.lat, 38.5));
    assert!(close(model.markers[0].position.lng, -120.2));
    assert_eq!(model.markers[1].kind, MarkerKind::End);
    assert!(close(model.markers[1].position.lat, 43.252));
    assert!(close(model.markers[1].position.lng, -126.453));
}

#[test]
fn two_connected_legs_have_no_junction_marker() {
    let a = RoutePoint::new(25.7565, -80.3760);
    let b = RoutePoint::new(25.7580, -80.3741);
    let c = RoutePoint::new(25.7551, -80.3722);
    let legs = vec![
        RouteLeg::new(encode_polyline(&[a, b])).with_distance(250.0),
        RouteLeg::new(encode_polyline(&[b, c])).with_distance(380.0),
    ];

    let model = build_render_model(&legs, &RenderConfig::default());
    let kinds: Vec<MarkerKind> = model.markers.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![MarkerKind::Start, MarkerKind::End]);
    assert!(model.markers[0].position.same_as(&a));
    assert!(model.markers[1].position.same_as(&c));

    let summary = RouteSummary::from_legs(&legs);
    assert_eq!(summary.leg_count, 2);
    assert_eq!(summary.distance_km(), "0.6");
}

#[test]
fn single_point_route_has_only_a_start_marker() {
    let legs = vec![RouteLeg::new(encode_polyline(&[RoutePoint::new(1.0, 1.0)]))];
    let model = build_render_model(&legs, &RenderConfig::default());

    assert_eq!(model.markers.len(), 1);
    assert_eq!(model.markers[0].kind, MarkerKind::Start);
    assert_eq!(
        compute_bounds(&model.segments[0].points),
        Some(Bounds {
            min_lat: 1.0,
            max_lat: 1.0,
            min_lng: 1.0,
            max_lng: 1.0
        })
    );
}

#[test]
fn larger_bounds_never_zoom_in_further() {
    let inner = Bounds {
        min_lat: 25.750,
        max_lat: 25.760,
        min_lng: -80.380,
        max_lng: -80.370,
    };
    let outer = Bounds {
        min_lat: 25.70,
        max_lat: 25.80,
        min_lng: -80.45,
        max_lng: -80.30,
    };
    assert!(outer.contains(&inner));

    for (width, height) in [(200.0, 150.0), (640.0, 480.0), (1920.0, 1080.0)] {
        assert!(fit_zoom(&outer, width, height) <= fit_zoom(&inner, width, height));
    }
}

#[test]
fn corrupt_leg_does_not_abort_the_route() {
    let legs = vec![
        RouteLeg::new("~~~~~~~~~~~~"),
        RouteLeg::new(CANONICAL),
        RouteLeg::new("_p~iF"),
    ];
    assert!(decode_polyline(&legs[0].encoded_polyline).is_err());

    let model = build_render_model(&legs, &RenderConfig::default());
    assert_eq!(model.segments.len(), 1);
    assert_eq!(model.segments[0].leg_index, 1);

    let scene = render(&model, 640, 480);
    assert_eq!(scene.paths.len(), 1);
    assert_eq!(scene.markers.len(), 2);
    assert!(scene.basemap.is_some());
}

#[test]
fn empty_route_renders_nothing() {
    let model = build_render_model(&[], &RenderConfig::default());
    assert!(model.bounds.is_none());

    let scene = render(&model, 640, 480);
    assert!(scene.is_empty());
    assert!(scene.basemap.is_none());
}
