//! Rolling-window math over closing prices.
//!
//! Every function returns a vector aligned with its input: entry `i` only
//! looks at `values[..=i]`, and is `None` until the window is full.

/// Simple moving average of the trailing `period` values
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    // Summing each window directly keeps the result exactly the mean of
    // those values, with no drift from a running sum.
    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        out[i] = Some(window.iter().sum::<f64>() / period as f64);
    }
    out
}

/// Wilder's relative strength index.
///
/// Gains and losses are smoothed with factor `1/period`, starting from the
/// first bar (which has no prior close and so counts as no change). The
/// first value appears at index `period - 1`, once `period` bars are seen.
pub fn rsi_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let alpha = 1.0 / period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..values.len() {
        let change = values[i] - values[i - 1];
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        avg_gain = avg_gain * (1.0 - alpha) + gain * alpha;
        avg_loss = avg_loss * (1.0 - alpha) + loss * alpha;
        if i + 1 >= period {
            out[i] = Some(rsi_from_averages(avg_gain, avg_loss));
        }
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    // No losses in the window, flat series included
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}
