use std::fs;

use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::history::{SavedView, SessionState};
use crate::model::{Basis, DomainKind, View};
use crate::render::{RenderedPlot, VOID_ID};

use super::{
    StoreError, load_session, load_view_file, save_plot_image, save_session, save_view_file,
};

fn saved_view() -> SavedView {
    let mut current = View::default();
    current.basis = Basis::Yz;
    current.origin = [1.0, -2.0, 3.5];
    current.override_mut(DomainKind::Cell, 4).color = Some([1, 2, 3]);
    SavedView {
        default: View::default(),
        current,
    }
}

#[test]
fn view_file_without_extension_gets_pltvw() {
    let dir = tempfile::tempdir().expect("tempdir");
    let written = save_view_file(dir.path().join("zoomed"), &saved_view()).expect("save");
    assert_eq!(written.extension().and_then(|ext| ext.to_str()), Some("pltvw"));

    let loaded = load_view_file(&written).expect("load");
    assert_eq!(loaded, saved_view());
}

#[test]
fn view_file_uses_yaml_for_yaml_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("view.yml");
    save_view_file(&path, &saved_view()).expect("save");
    let raw = fs::read_to_string(&path).expect("read");
    assert!(raw.contains("basis: yz"), "{raw}");
    assert_eq!(load_view_file(&path).expect("load"), saved_view());
}

#[test]
fn view_file_with_degenerate_view_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut saved = saved_view();
    saved.current.set_width(-1.0);
    let path = save_view_file(dir.path().join("bad.pltvw"), &saved).expect("save");
    assert!(matches!(load_view_file(&path), Err(StoreError::Model(_))));

    fs::write(&path, "{ not json").expect("write");
    assert!(matches!(load_view_file(&path), Err(StoreError::SerdeJson(_))));
}

#[test]
fn session_roundtrip_and_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("plot_settings.json");
    assert!(load_session(&path).expect("missing").is_none());

    let session = SessionState {
        default: View::default(),
        current: saved_view().current,
        previous: vec![View::default()],
        subsequent: Vec::new(),
    };
    save_session(&path, &session).expect("save");
    assert_eq!(load_session(&path).expect("load"), Some(session));
}

#[test]
fn session_without_stacks_defaults_to_empty_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plot_settings.json");
    let document = serde_json::json!({
        "default": View::default(),
        "current": View::default(),
    });
    fs::write(&path, document.to_string()).expect("write");
    let session = load_session(&path).expect("load").expect("present");
    assert!(session.previous.is_empty() && session.subsequent.is_empty());
}

#[test]
fn plot_image_is_written_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plot = RenderedPlot {
        image: RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])),
        cell_ids: Array2::from_elem((2, 3), VOID_ID),
        material_ids: Array2::from_elem((2, 3), VOID_ID),
    };

    let png = save_plot_image(dir.path().join("plot"), &plot).expect("png");
    assert_eq!(png.extension().and_then(|ext| ext.to_str()), Some("png"));
    let decoded = image::open(&png).expect("decode").to_rgb8();
    assert_eq!(decoded.get_pixel(2, 1), &Rgb([10, 20, 30]));

    let ppm = save_plot_image(dir.path().join("plot.ppm"), &plot).expect("ppm");
    assert!(ppm.is_file());
}
