use super::{Basis, DomainKind, ModelError, View};

#[test]
fn cloned_view_is_equal_and_independent() {
    let mut original = View::default();
    original.override_mut(DomainKind::Cell, 7).color = Some([10, 20, 30]);

    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.override_mut(DomainKind::Cell, 7).masked = true;
    copy.origin[2] = 4.0;
    assert_ne!(copy, original);
    assert!(!original.override_for(DomainKind::Cell, 7).masked);
    assert_eq!(original.origin[2], 0.0);
}

#[test]
fn equality_covers_override_maps() {
    let left = View::default();
    let mut right = View::default();
    right.override_mut(DomainKind::Material, 3);
    assert_ne!(left, right, "a lazily created override is a structural change");
}

#[test]
fn aspect_lock_derives_vertical_resolution() {
    let mut view = View::default();
    view.set_aspect_lock(false);
    view.set_extent(50.0, 25.0);
    view.set_h_res(500);
    view.set_aspect_lock(true);
    assert_eq!(view.v_res(), 250);

    view.set_h_res(1000);
    assert_eq!(view.v_res(), 500);

    view.set_height(50.0);
    assert_eq!(view.v_res(), 1000);
}

#[test]
fn aspect_lock_ignores_direct_vertical_edits() {
    let mut view = View::default();
    view.set_v_res(120);
    assert_eq!(view.v_res(), 500);

    view.set_aspect_lock(false);
    view.set_v_res(120);
    assert_eq!(view.v_res(), 120);
}

#[test]
fn aspect_lock_guards_degenerate_height() {
    let mut view = View::default();
    view.set_extent(1.0, 0.0);
    assert_eq!(view.v_res(), 1, "ratio uses the epsilon height and clamps to one pixel");
}

#[test]
fn override_reads_do_not_create_entries() {
    let view = View::default();
    let entry = view.override_for(DomainKind::Cell, 42);
    assert!(entry.is_default());
    assert!(view.cells.is_empty());
}

#[test]
fn validate_rejects_degenerate_extents() {
    let mut view = View::default();
    assert!(view.validate().is_ok());

    view.set_width(0.0);
    assert_eq!(
        view.validate(),
        Err(ModelError::NonPositiveExtent {
            axis: "width",
            value: 0.0
        })
    );

    let mut view = View::default();
    view.highlight_alpha = 1.5;
    assert_eq!(view.validate(), Err(ModelError::AlphaOutOfRange(1.5)));
}

#[test]
fn view_roundtrip_json() {
    let mut view = View::default();
    view.basis = Basis::Yz;
    view.override_mut(DomainKind::Material, 2).highlighted = true;
    let serialized = serde_json::to_string_pretty(&view).expect("serialize view");
    assert!(serialized.contains("\"yz\""));
    let restored: View = serde_json::from_str(&serialized).expect("deserialize view");
    assert_eq!(restored, view);
}

#[test]
fn summary_rounds_to_two_decimals() {
    let mut view = View::default();
    view.origin = [1.23456, -2.0, 0.005];
    let summary = view.summary();
    assert!(summary.starts_with("(1.23, -2, 0.01)"), "{summary}");
    assert!(summary.contains("Basis: xy"));
    assert!(summary.contains("Color By: material"));
}
