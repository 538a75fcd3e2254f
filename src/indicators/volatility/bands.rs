//! Mean-reversion bands

use crate::common::math;
use crate::models::indicators::MeanReversionBands;

/// Bands at `mean ± width * std_dev` over the last `lookback` closes.
///
/// Uses the population standard deviation. Returns `None` when fewer than
/// `lookback` closes are available or `lookback` is zero.
pub fn calculate_mean_reversion_bands(
    closes: &[f64],
    lookback: usize,
    width: f64,
) -> Option<MeanReversionBands> {
    if lookback == 0 || closes.len() < lookback {
        return None;
    }

    let window = &closes[closes.len() - lookback..];
    let mean = math::mean(window)?;
    let std_dev = math::population_std_dev(window)?;

    Some(MeanReversionBands {
        mean,
        std_dev,
        width,
        upper: mean + width * std_dev,
        lower: mean - width * std_dev,
    })
}
