use proptest::prelude::*;

use prop_blueprint_core::{
    BlueprintParameter, ParameterStore, Point, TemplateId, TemplateParams, classify,
};

fn tray_width(width: f64) -> f64 {
    let store = ParameterStore::from_parameters(vec![
        BlueprintParameter::new("Tray Width", width, 0.0, 1000.0),
        BlueprintParameter::new("Tray Height", 120.0, 0.0, 1000.0),
        BlueprintParameter::new("Wall Depth", 15.0, 0.0, 100.0),
    ]);
    let params = TemplateId::BoxTray.resolve(&store.resolver());
    assert!(matches!(params, TemplateParams::BoxTray { .. }));
    params
        .build(Point::new(400.0, 275.0))
        .bounds()
        .unwrap()
        .width()
}

proptest! {
    #[test]
    fn tier_or_step_always_wins(
        prefix in "[a-z ]{0,12}",
        suffix in "[a-z ]{0,12}",
        keyword in prop::sample::select(vec!["tier", "step", "TIER", "Step", "sTeP"]),
        other in prop::sample::select(vec!["", " slope", " angle", " stand"]),
    ) {
        let desc = format!("{prefix}{other}{keyword}{suffix}");
        prop_assert_eq!(classify(desc.as_str()), TemplateId::SteppedTiers);
    }

    #[test]
    fn text_without_keywords_is_a_tray(desc in "[xyz0-9 ,.-]{0,40}") {
        prop_assert_eq!(classify(desc.as_str()), TemplateId::BoxTray);
    }

    #[test]
    fn tray_bounds_grow_with_width(w in 50.0f64..500.0, dw in 0.5f64..200.0) {
        prop_assert!(tray_width(w + dw) > tray_width(w));
    }
}
