use crate::model::{DomainKind, View};

use super::{
    PlotRenderer, RenderError, RenderRequest, ShellsRenderer, VOID_ID, default_color, shade,
};

fn small_view() -> View {
    let mut view = View::default();
    view.set_h_res(40);
    view
}

#[test]
fn request_forwards_only_the_colored_domain() {
    let mut view = View::default();
    view.override_mut(DomainKind::Cell, 1).masked = true;
    view.override_mut(DomainKind::Material, 2).highlighted = true;

    let request = RenderRequest::from_view(&view);
    assert_eq!(request.colorby, DomainKind::Material);
    assert_eq!(request.overrides.len(), 1);
    assert!(request.overrides[&2].highlighted);

    view.colorby = DomainKind::Cell;
    let request = RenderRequest::from_view(&view);
    assert!(request.overrides[&1].masked);
}

#[test]
fn builtin_renderer_fills_requested_resolution() {
    let mut view = small_view();
    view.set_h_res(200);
    let plot = ShellsRenderer::default()
        .render(&RenderRequest::from_view(&view))
        .expect("render");
    assert_eq!((plot.width(), plot.height()), (200, 200));
    assert_eq!(plot.cell_ids.dim(), (200, 200));
    assert_eq!(plot.distinct_ids(DomainKind::Material), vec![1, 2, 3, 4]);
    assert_eq!(plot.id_at(DomainKind::Cell, 0, 0), Some(4), "corners fall in the baffle");
    assert_eq!(plot.id_at(DomainKind::Cell, 200, 0), None);
}

#[test]
fn builtin_geometry_distinguishes_cells_and_materials() {
    let renderer = ShellsRenderer::default();
    let half = renderer.pitch * renderer.lattice_size as f64 / 2.0;
    let pin = |column: usize, row: usize| {
        [
            -half + (column as f64 + 0.5) * renderer.pitch,
            -half + (row as f64 + 0.5) * renderer.pitch,
            0.0,
        ]
    };
    assert_eq!(renderer.classify(pin(0, 0)), (1, 1));
    assert_eq!(renderer.classify(pin(2, 7)), (5, 3));
    assert_eq!(renderer.classify([half + 1.0, 0.0, 0.0]), (4, 4));
    assert_eq!(renderer.classify([0.0, 0.0, 60.0]), (VOID_ID, VOID_ID));
}

#[test]
fn masked_ids_use_mask_background() {
    let mut view = small_view();
    view.mask_background = [1, 2, 3];
    view.override_mut(DomainKind::Material, 3).masked = true;
    let request = RenderRequest::from_view(&view);
    assert_eq!(shade(&request, 3), [1, 2, 3]);

    view.masking = false;
    let request = RenderRequest::from_view(&view);
    assert_eq!(shade(&request, 3), default_color(3, 0));
}

#[test]
fn highlighting_dims_other_ids() {
    let mut view = small_view();
    view.highlight_alpha = 1.0;
    view.highlight_background = [9, 9, 9];
    view.override_mut(DomainKind::Material, 1).highlighted = true;
    view.override_mut(DomainKind::Material, 1).color = Some([200, 0, 0]);
    let request = RenderRequest::from_view(&view);
    assert_eq!(shade(&request, 1), [200, 0, 0]);
    assert_eq!(shade(&request, 2), [9, 9, 9]);
    assert_eq!(shade(&request, VOID_ID), view.plot_background);
}

#[test]
fn default_palette_is_deterministic_per_seed() {
    assert_eq!(default_color(7, 0), default_color(7, 0));
    assert_ne!(default_color(7, 0), default_color(8, 0));
    assert_ne!(default_color(7, 0), default_color(7, 5));
}

#[test]
fn invalid_request_is_rejected_before_rendering() {
    let mut view = small_view();
    view.set_width(0.0);
    let result = ShellsRenderer::default().render(&RenderRequest::from_view(&view));
    assert!(matches!(result, Err(RenderError::InvalidView(_))));
}

#[cfg(unix)]
#[test]
fn command_renderer_reports_failures() {
    use super::CommandRenderer;

    let dir = tempfile::tempdir().expect("tempdir");
    let request = RenderRequest::from_view(&small_view());

    let failing = CommandRenderer::new("false", dir.path());
    assert!(matches!(
        failing.render(&request),
        Err(RenderError::ProcessFailed { .. })
    ));

    let silent = CommandRenderer::new("true", dir.path());
    assert!(matches!(
        silent.render(&request),
        Err(RenderError::MissingImage(_))
    ));
    assert!(dir.path().join("plot_request.json").is_file());
}

#[cfg(unix)]
#[test]
fn command_renderer_loads_produced_image() {
    use super::CommandRenderer;

    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("source.png");
    image::RgbImage::from_pixel(4, 3, image::Rgb([5, 6, 7]))
        .save(&source)
        .expect("save source");

    let renderer = CommandRenderer::new("cp", dir.path().join("work")).with_args(vec![
        source.to_string_lossy().to_string(),
        "plot.png".to_string(),
    ]);
    let plot = renderer
        .render(&RenderRequest::from_view(&small_view()))
        .expect("render");
    assert_eq!((plot.width(), plot.height()), (4, 3));
    assert_eq!(plot.id_at(DomainKind::Cell, 1, 1), None);
}
