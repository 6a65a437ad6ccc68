use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::history::HISTORY_LIMIT;
use crate::model::{Basis, DomainKind, View};
use crate::render::{CommandRenderer, PlotRenderer, ShellsRenderer};
use crate::ui::interaction::gesture::DEFAULT_DRAG_THRESHOLD_PX;

const DEFAULT_SESSION_FILE: &str = "plot_settings.json";
const DEFAULT_WORK_DIR: &str = "plot_explorer_work";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub default_view: DefaultViewConfig,
    pub renderer: RendererConfig,
    pub session_file: PathBuf,
    pub history_limit: usize,
    pub drag_threshold_px: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_view: DefaultViewConfig::default(),
            renderer: RendererConfig::default(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            history_limit: HISTORY_LIMIT,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
        }
    }
}

impl ExplorerConfig {
    pub(super) fn sanitize(mut self, warnings: &mut Vec<String>) -> Self {
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            warnings.push(format!(
                "drag_threshold_px {} is invalid; using {DEFAULT_DRAG_THRESHOLD_PX}",
                self.drag_threshold_px
            ));
            self.drag_threshold_px = DEFAULT_DRAG_THRESHOLD_PX;
        }
        if self.session_file.as_os_str().is_empty() {
            warnings.push(format!("session_file is empty; using {DEFAULT_SESSION_FILE}"));
            self.session_file = PathBuf::from(DEFAULT_SESSION_FILE);
        }
        if let RendererConfig::Command { program, .. } = &self.renderer
            && program.as_os_str().is_empty()
        {
            warnings.push("command renderer has no program; using the builtin renderer".into());
            self.renderer = RendererConfig::Builtin;
        }
        self.default_view.sanitize(warnings);
        self
    }

    /// The model's default view: the application defaults plus overrides.
    pub fn default_view(&self) -> View {
        self.default_view.to_view()
    }

    pub fn build_renderer(&self) -> Box<dyn PlotRenderer> {
        self.renderer.build()
    }
}

/// Partial overrides for the initial view; unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultViewConfig {
    pub origin: Option<[f64; 3]>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub basis: Option<Basis>,
    pub colorby: Option<DomainKind>,
    pub h_res: Option<u32>,
    pub v_res: Option<u32>,
    pub aspect_lock: Option<bool>,
}

impl DefaultViewConfig {
    fn sanitize(&mut self, warnings: &mut Vec<String>) {
        if let Some(origin) = self.origin
            && origin.iter().any(|value| !value.is_finite())
        {
            warnings.push(format!("default_view.origin {origin:?} is not finite; ignored"));
            self.origin = None;
        }
        for (name, extent) in [("width", &mut self.width), ("height", &mut self.height)] {
            if let Some(value) = *extent
                && !(value.is_finite() && value > 0.0)
            {
                warnings.push(format!("default_view.{name} {value} must be positive; ignored"));
                *extent = None;
            }
        }
        for (name, resolution) in [("h_res", &mut self.h_res), ("v_res", &mut self.v_res)] {
            if *resolution == Some(0) {
                warnings.push(format!("default_view.{name} must be at least 1; ignored"));
                *resolution = None;
            }
        }
    }

    pub fn to_view(&self) -> View {
        let mut view = View::default();
        // Unlock first so an explicit v_res survives, then restore the lock.
        view.set_aspect_lock(false);
        if let Some(origin) = self.origin {
            view.origin = origin;
        }
        if let Some(basis) = self.basis {
            view.basis = basis;
        }
        if let Some(colorby) = self.colorby {
            view.colorby = colorby;
        }
        view.set_extent(
            self.width.unwrap_or(view.width()),
            self.height.unwrap_or(view.height()),
        );
        if let Some(h_res) = self.h_res {
            view.set_h_res(h_res);
        }
        if let Some(v_res) = self.v_res {
            view.set_v_res(v_res);
        }
        view.set_aspect_lock(self.aspect_lock.unwrap_or(true));
        view
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RendererConfig {
    #[default]
    Builtin,
    Command {
        program: PathBuf,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        work_dir: Option<PathBuf>,
        #[serde(default)]
        image_name: Option<String>,
    },
}

impl RendererConfig {
    pub fn build(&self) -> Box<dyn PlotRenderer> {
        match self {
            Self::Builtin => Box::new(ShellsRenderer::default()),
            Self::Command {
                program,
                args,
                work_dir,
                image_name,
            } => {
                let work_dir = work_dir
                    .clone()
                    .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_WORK_DIR));
                let mut renderer = CommandRenderer::new(program, work_dir).with_args(args.clone());
                if let Some(image_name) = image_name {
                    renderer = renderer.with_image_name(image_name);
                }
                Box::new(renderer)
            }
        }
    }
}
