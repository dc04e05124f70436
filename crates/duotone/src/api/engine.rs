//! DitherEngine -- the single per-frame entry point.
//!
//! [`DitherEngine`] runs the optional pixelation pass and then exactly one
//! dithering strategy on a destination buffer the host has already
//! populated with a copy of the source frame.

use crate::buffer::{ensure_same_frame, PixelBuffer, PixelView};
use crate::dither::{Dither, DitherAlgorithm, DitherParams, EdgePolicy, NoiseSource, Strategy};
use crate::pixelate::{pixelate, pixelate_in_place};

use super::EngineError;

/// Progress of one render call.
///
/// `Idle -> Pixelated (optional) -> Dithered (optional) -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStage {
    #[default]
    Idle,
    Pixelated,
    Dithered,
    Done,
}

/// What a render call did to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// Whether the pixelation pass ran (`block_factor > 1`)
    pub pixelated: bool,
    /// Strategy that dithered the frame, if any
    pub dithered: Option<DitherAlgorithm>,
    /// Last stage reached; `Done` for every completed call
    pub stage: RenderStage,
}

impl RenderReport {
    fn advance(&mut self, stage: RenderStage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "render stage");
        self.stage = stage;
    }
}

/// Stateless per-frame dithering pipeline.
///
/// The engine holds only configuration that is not part of the per-frame
/// parameters: where blue-noise randomness comes from, and how error
/// diffusion treats lane ends. Nothing persists between calls, so one
/// engine can render any number of frames.
///
/// # Example
///
/// ```
/// use duotone::{DitherEngine, DitherParams, NoiseSource, PixelBuffer, PixelLayout, PixelView};
///
/// let src_data = vec![90u8; 8 * 8 * 4];
/// let mut dst_data = src_data.clone();
///
/// let src = PixelView::packed(&src_data, 8, 8, PixelLayout::Argb8).unwrap();
/// let mut dst = PixelBuffer::packed(&mut dst_data, 8, 8, PixelLayout::Argb8).unwrap();
///
/// let engine = DitherEngine::new().noise_source(NoiseSource::Seeded(1));
/// let report = engine
///     .render(&src, &mut dst, &DitherParams::new().block_factor(2))
///     .unwrap();
///
/// assert!(report.pixelated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DitherEngine {
    noise: NoiseSource,
    edge_policy: EdgePolicy,
}

impl DitherEngine {
    /// Engine with entropy-seeded noise and the [`EdgePolicy::Full`] policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set where blue-noise randomness comes from.
    #[inline]
    pub fn noise_source(mut self, noise: NoiseSource) -> Self {
        self.noise = noise;
        self
    }

    /// Set how error diffusion treats the ends of each lane.
    #[inline]
    pub fn edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    /// Render one frame from `src` into `dst`.
    ///
    /// `dst` must already hold a copy of `src` (see
    /// [`PixelBuffer::copy_from`]): when neither stage runs it is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// [`EngineError::Buffer`] when `src` and `dst` differ in size or
    /// channel layout. Nothing is written in that case.
    pub fn render(
        &self,
        src: &PixelView<'_>,
        dst: &mut PixelBuffer<'_>,
        params: &DitherParams,
    ) -> Result<RenderReport, EngineError> {
        ensure_same_frame(src, &dst.as_view())?;
        let mut report = RenderReport::default();

        if params.block_factor > 1 {
            pixelate(src, dst, params.block_factor)?;
            report.pixelated = true;
            report.advance(RenderStage::Pixelated);
        }

        self.dither(dst, params, &mut report);
        Ok(report)
    }

    /// Render a frame whose destination is also its source.
    pub fn render_in_place(
        &self,
        frame: &mut PixelBuffer<'_>,
        params: &DitherParams,
    ) -> RenderReport {
        let mut report = RenderReport::default();

        if params.block_factor > 1 {
            pixelate_in_place(frame, params.block_factor);
            report.pixelated = true;
            report.advance(RenderStage::Pixelated);
        }

        self.dither(frame, params, &mut report);
        report
    }

    fn dither(&self, buf: &mut PixelBuffer<'_>, params: &DitherParams, report: &mut RenderReport) {
        match Strategy::select(params, self.noise, self.edge_policy) {
            Some(strategy) => {
                strategy.apply(buf, params);
                report.dithered = Some(strategy.algorithm());
                report.advance(RenderStage::Dithered);
            }
            None => tracing::debug!(
                algorithm = ?params.algorithm,
                direction = ?params.direction,
                "no dither strategy selected"
            ),
        }
        report.advance(RenderStage::Done);
    }
}
