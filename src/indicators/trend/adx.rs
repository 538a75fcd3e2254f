//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::models::indicators::{AdxIndicator, Candle};

pub const DEFAULT_ADX_PERIOD: usize = 14;

/// Lower bound for the average true range, so flat windows never divide by zero.
const MIN_ATR: f64 = 1e-10;
/// Directional indices are clipped to this magnitude.
const DI_LIMIT: f64 = 1e5;

/// Calculate ADX
///
/// ADX measures trend strength regardless of direction. True range and
/// directional movement are seeded with a simple mean over the first `period`
/// bars and then Wilder-smoothed; the result is the mean of the last `period`
/// DX readings. Windows shorter than `period + 1` candles yield `0.0`.
///
/// The directional indices are smoothed against the raw movement of each bar
/// and rescaled by the refreshed ATR, so the accumulator carries DI units from
/// one step to the next.
pub fn calculate_adx(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period + 1 {
        return 0.0;
    }

    let bars = candles.len() - 1;
    let mut tr_values = Vec::with_capacity(bars);
    let mut plus_dm_values = Vec::with_capacity(bars);
    let mut minus_dm_values = Vec::with_capacity(bars);

    for pair in candles.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        tr_values.push(math::true_range(curr.high, curr.low, prev.close));

        let up_move = curr.high - prev.high;
        let down_move = prev.low - curr.low;
        plus_dm_values.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm_values.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    if tr_values.len() < period {
        return 0.0;
    }

    let seed = |values: &[f64]| values[..period].iter().sum::<f64>() / period as f64;

    let mut atr = seed(&tr_values).max(MIN_ATR);
    let mut plus_di = (100.0 * seed(&plus_dm_values) / atr).clamp(-DI_LIMIT, DI_LIMIT);
    let mut minus_di = (100.0 * seed(&minus_dm_values) / atr).clamp(-DI_LIMIT, DI_LIMIT);

    let mut dx_values = Vec::with_capacity(bars - period + 1);
    dx_values.push(directional_index(plus_di, minus_di));

    let tail_moves = tr_values[period..]
        .iter()
        .zip(&plus_dm_values[period..])
        .zip(&minus_dm_values[period..]);
    for ((&tr, &plus_dm), &minus_dm) in tail_moves {
        atr = math::wilder_smooth(atr, tr, period).max(MIN_ATR);
        let plus_acc = math::wilder_smooth(plus_di, plus_dm, period);
        let minus_acc = math::wilder_smooth(minus_di, minus_dm, period);
        plus_di = (100.0 * plus_acc / atr).clamp(-DI_LIMIT, DI_LIMIT);
        minus_di = (100.0 * minus_acc / atr).clamp(-DI_LIMIT, DI_LIMIT);
        dx_values.push(directional_index(plus_di, minus_di));
    }

    let tail = &dx_values[dx_values.len().saturating_sub(period)..];
    let adx = math::mean(tail).unwrap_or(0.0);
    if adx.is_nan() {
        0.0
    } else {
        adx
    }
}

/// ADX over candles, tagged with the period used.
pub fn calculate_adx_indicator(candles: &[Candle], period: usize) -> AdxIndicator {
    AdxIndicator {
        value: calculate_adx(candles, period),
        period,
    }
}

fn directional_index(plus_di: f64, minus_di: f64) -> f64 {
    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        0.0
    } else {
        100.0 * (plus_di - minus_di).abs() / di_sum
    }
}
