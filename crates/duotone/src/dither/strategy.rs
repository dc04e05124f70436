//! Closed dispatch over the three dithering strategies.

use super::{
    DirectionalErrorDiffusion, Dither, DitherAlgorithm, DitherParams, EdgePolicy, NoiseSource,
    OrderedMatrix, StochasticBlueNoise,
};
use crate::buffer::PixelBuffer;

/// One configured dithering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ErrorDiffusion(DirectionalErrorDiffusion),
    Ordered(OrderedMatrix),
    BlueNoise(StochasticBlueNoise),
}

impl Strategy {
    /// Pick the strategy described by `params`.
    ///
    /// Returns `None` when no algorithm is selected, or when error
    /// diffusion is selected without a direction. Both mean "leave the
    /// buffer as it is".
    ///
    /// ```
    /// use duotone::{DitherAlgorithm, DitherParams, EdgePolicy, NoiseSource, Strategy};
    ///
    /// let params = DitherParams::new().algorithm_selector(2);
    /// let strategy = Strategy::select(&params, NoiseSource::Entropy, EdgePolicy::Full);
    /// assert_eq!(strategy.map(|s| s.algorithm()), Some(DitherAlgorithm::Ordered));
    ///
    /// let params = DitherParams::new().direction_selector(9);
    /// assert!(Strategy::select(&params, NoiseSource::Entropy, EdgePolicy::Full).is_none());
    /// ```
    pub fn select(
        params: &DitherParams,
        noise: NoiseSource,
        edge_policy: EdgePolicy,
    ) -> Option<Self> {
        match params.algorithm? {
            DitherAlgorithm::ErrorDiffusion => {
                let direction = params.direction?;
                Some(Strategy::ErrorDiffusion(
                    DirectionalErrorDiffusion::new(direction).edge_policy(edge_policy),
                ))
            }
            DitherAlgorithm::Ordered => Some(Strategy::Ordered(OrderedMatrix::new())),
            DitherAlgorithm::BlueNoise => {
                Some(Strategy::BlueNoise(StochasticBlueNoise::new(noise)))
            }
        }
    }

    pub fn algorithm(&self) -> DitherAlgorithm {
        match self {
            Strategy::ErrorDiffusion(_) => DitherAlgorithm::ErrorDiffusion,
            Strategy::Ordered(_) => DitherAlgorithm::Ordered,
            Strategy::BlueNoise(_) => DitherAlgorithm::BlueNoise,
        }
    }
}

impl Dither for Strategy {
    fn apply(&self, buf: &mut PixelBuffer<'_>, params: &DitherParams) {
        match self {
            Strategy::ErrorDiffusion(s) => s.apply(buf, params),
            Strategy::Ordered(s) => s.apply(buf, params),
            Strategy::BlueNoise(s) => s.apply(buf, params),
        }
    }
}
