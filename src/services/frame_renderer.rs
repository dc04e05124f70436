use duotone::{DitherEngine, DitherParams, RenderReport};
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::models::RenderSettings;
use crate::rendering::{decode_png, encode_png, Frame};

/// Renders PNG frames through the dither engine.
///
/// Each frame is handled the way a video host would: the decoded source
/// is copied into a destination frame and the engine rewrites that copy.
pub struct FrameRenderer {
    engine: DitherEngine,
    params: DitherParams,
    optimize: bool,
}

/// Outcome of a directory render
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output paths, in frame order
    pub rendered: Vec<PathBuf>,
}

impl FrameRenderer {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            engine: settings.engine(),
            params: settings.params.clone(),
            optimize: false,
        }
    }

    /// Re-compress output PNGs with oxipng
    pub fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    pub fn params(&self) -> &DitherParams {
        &self.params
    }

    /// Dither one decoded frame into a new frame.
    pub fn render_frame(&self, source: &Frame) -> Result<(Frame, RenderReport), RenderError> {
        let blank = vec![0; source.data().len()];
        let mut output =
            Frame::from_rgba(source.width(), source.height(), source.has_alpha(), blank)?;
        let report = {
            let src = source.view()?;
            let mut dst = output.buffer()?;
            dst.copy_from(&src)?;
            self.engine.render(&src, &mut dst, &self.params)?
        };
        Ok((output, report))
    }

    /// Dither PNG bytes into PNG bytes.
    pub fn render_png(&self, png: &[u8]) -> Result<(Vec<u8>, RenderReport), RenderError> {
        let source = decode_png(png)?;
        let (output, report) = self.render_frame(&source)?;
        Ok((encode_png(&output, self.optimize)?, report))
    }

    /// Dither a PNG file.
    pub fn render_file(&self, input: &Path, output: &Path) -> Result<RenderReport, RenderError> {
        let png = std::fs::read(input)?;
        let (encoded, report) = self.render_png(&png)?;
        std::fs::write(output, &encoded)?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            bytes = encoded.len(),
            algorithm = report.dithered.map(|a| a.name()),
            pixelated = report.pixelated,
            "Rendered frame"
        );
        Ok(report)
    }

    /// Dither every `*.png` frame of `input` into `output`, in file name
    /// order. Output files keep their input names.
    pub fn render_directory(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<BatchReport, RenderError> {
        let frames = list_frames(input)?;
        if frames.is_empty() {
            tracing::warn!(dir = %input.display(), "No PNG frames found");
        }
        std::fs::create_dir_all(output)?;

        let mut report = BatchReport::default();
        for frame in frames {
            let Some(name) = frame.file_name() else {
                continue;
            };
            let target = output.join(name);
            self.render_file(&frame, &target)?;
            report.rendered.push(target);
        }

        tracing::info!(frames = report.rendered.len(), "Batch complete");
        Ok(report)
    }
}

/// PNG files directly inside `dir`, sorted by name
pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}
