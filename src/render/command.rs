use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use ndarray::Array2;
use serde::Deserialize;

use super::{PlotRenderer, RenderError, RenderRequest, RenderedPlot, Result, VOID_ID};

const REQUEST_FILE: &str = "plot_request.json";
const IDS_FILE: &str = "plot_ids.json";
const REQUEST_ENV: &str = "PLOT_EXPLORER_REQUEST";
const REQUEST_PLACEHOLDER: &str = "{request}";

/// Delegates rasterization to an external program.
///
/// The request is written as JSON into the work directory; its path is
/// exported as `PLOT_EXPLORER_REQUEST` and substituted for `{request}` in the
/// arguments. The program must leave `image_name` in the work directory and
/// may add `plot_ids.json` with row-major `cells`/`materials` id arrays.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: PathBuf,
    args: Vec<String>,
    work_dir: PathBuf,
    image_name: String,
}

#[derive(Debug, Deserialize)]
struct IdGridFile {
    cells: Vec<i32>,
    materials: Vec<i32>,
}

impl CommandRenderer {
    pub fn new(program: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            work_dir: work_dir.into(),
            image_name: "plot.png".to_string(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_image_name(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl PlotRenderer for CommandRenderer {
    fn name(&self) -> &str {
        "command"
    }

    fn render(&self, request: &RenderRequest) -> Result<RenderedPlot> {
        request.validate()?;
        fs::create_dir_all(&self.work_dir)?;
        let work_dir = std::path::absolute(&self.work_dir)?;
        let request_path = work_dir.join(REQUEST_FILE);
        let image_path = work_dir.join(&self.image_name);
        let ids_path = work_dir.join(IDS_FILE);

        for stale in [&image_path, &ids_path] {
            if stale.is_file() {
                fs::remove_file(stale)?;
            }
        }
        fs::write(&request_path, serde_json::to_string_pretty(request)?)?;

        let request_arg = request_path.to_string_lossy();
        let args = self
            .args
            .iter()
            .map(|arg| arg.replace(REQUEST_PLACEHOLDER, &request_arg))
            .collect::<Vec<_>>();
        log::debug!("running renderer {} {:?}", self.program.display(), args);
        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&work_dir)
            .env(REQUEST_ENV, &request_path)
            .output()?;

        if !output.status.success() {
            return Err(RenderError::ProcessFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if !image_path.is_file() {
            return Err(RenderError::MissingImage(image_path));
        }

        let image = image::open(&image_path)?.to_rgb8();
        let (cell_ids, material_ids) =
            read_id_grids(&ids_path, image.width() as usize, image.height() as usize)?;
        Ok(RenderedPlot {
            image,
            cell_ids,
            material_ids,
        })
    }
}

fn read_id_grids(path: &Path, width: usize, height: usize) -> Result<(Array2<i32>, Array2<i32>)> {
    if !path.is_file() {
        return Ok((
            Array2::from_elem((height, width), VOID_ID),
            Array2::from_elem((height, width), VOID_ID),
        ));
    }
    let raw = fs::read_to_string(path)?;
    let grids = serde_json::from_str::<IdGridFile>(&raw)?;
    Ok((
        Array2::from_shape_vec((height, width), grids.cells)?,
        Array2::from_shape_vec((height, width), grids.materials)?,
    ))
}
