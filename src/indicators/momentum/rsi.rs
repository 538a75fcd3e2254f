//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::{closes, Candle, RsiIndicator};

/// Value reported when the window is too short or completely flat.
pub const RSI_NEUTRAL: f64 = 50.0;

/// Calculate RSI with Wilder smoothing and return the value at the last close.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are seeded with the simple mean of the first `period` moves and
/// then smoothed over the rest of the window. Windows shorter than
/// `period + 1` closes yield [`RSI_NEUTRAL`].
pub fn calculate_rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return RSI_NEUTRAL;
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    // A seed with no losses settles the value; the smoothing pass is skipped.
    if avg_loss == 0.0 {
        return zero_loss_rsi(avg_gain);
    }

    let mut rsi = rsi_from_averages(avg_gain, avg_loss);

    for (&gain, &loss) in gains[period..].iter().zip(&losses[period..]) {
        avg_gain = math::wilder_smooth(avg_gain, gain, period);
        avg_loss = math::wilder_smooth(avg_loss, loss, period);
        rsi = if avg_loss == 0.0 {
            zero_loss_rsi(avg_gain)
        } else {
            rsi_from_averages(avg_gain, avg_loss)
        };
    }

    rsi
}

/// RSI over candle closes, tagged with the period used.
pub fn calculate_rsi_indicator(candles: &[Candle], period: usize) -> RsiIndicator {
    RsiIndicator {
        value: calculate_rsi(&closes(candles), period),
        period,
    }
}

fn zero_loss_rsi(avg_gain: f64) -> f64 {
    if avg_gain > 0.0 {
        100.0
    } else {
        RSI_NEUTRAL
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
