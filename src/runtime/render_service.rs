use crate::config::RendererConfig;
use crate::model::View;
use crate::render::{PlotRenderer, RenderRequest, RenderedPlot};

use super::Result;

/// Builds renderers from configuration and runs one-off renders.
#[derive(Debug, Clone, Default)]
pub struct RenderService {
    renderer: RendererConfig,
}

impl RenderService {
    pub fn new(renderer: RendererConfig) -> Self {
        Self { renderer }
    }

    pub fn renderer_config(&self) -> &RendererConfig {
        &self.renderer
    }

    pub fn build(&self) -> Box<dyn PlotRenderer> {
        self.renderer.build()
    }

    pub fn render_view(&self, view: &View) -> Result<RenderedPlot> {
        let request = RenderRequest::from_view(view);
        Ok(self.build().render(&request)?)
    }
}
