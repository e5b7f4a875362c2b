use super::round_to;
use crate::error::DomainError;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Relative Strength Index of the most recent bar, rounded to 2 decimals.
///
/// Gains and losses are averaged with a simple moving average over the last
/// `period` price changes. The first price has no predecessor and counts as a
/// zero change, so `period` prices are enough for a reading.
///
/// Returns `Ok(None)` when the series is shorter than `period` or the window
/// holds no movement at all (both averages zero).
pub fn rsi(closes: &[f64], period: usize) -> Result<Option<f64>, DomainError> {
    if period == 0 {
        return Err(DomainError::InvalidWindow(
            "RSI period must be greater than zero".to_string(),
        ));
    }
    let n = closes.len();
    if n < period {
        return Ok(None);
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in (n - period)..n {
        if i == 0 {
            continue;
        }
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum -= change;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    let value = if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return Ok(None);
        }
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    if !value.is_finite() {
        return Ok(None);
    }
    Ok(Some(round_to(value, 2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_all_gains() {
        let closes: Vec<f64> = (1..=20).map(f64::from).collect();
        assert_eq!(rsi(&closes, 14).unwrap(), Some(100.0));
    }

    #[test]
    fn test_rsi_all_losses() {
        let closes: Vec<f64> = (1..=20).map(|i| 20.0 - f64::from(i)).collect();
        assert_eq!(rsi(&closes, 14).unwrap(), Some(0.0));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert_eq!(rsi(&closes, 14).unwrap(), None);
        assert_eq!(rsi(&[], 14).unwrap(), None);
    }

    #[test]
    fn test_rsi_exactly_period_points() {
        let closes: Vec<f64> = (1..=14).map(f64::from).collect();
        assert_eq!(rsi(&closes, 14).unwrap(), Some(100.0));
    }

    #[test]
    fn test_rsi_flat_window_is_unavailable() {
        assert_eq!(rsi(&[10.0; 30], 14).unwrap(), None);
    }

    #[test]
    fn test_rsi_mixed_moves() {
        // Window of 4 changes: +2, -1, +1, -2 → avg gain 0.75, avg loss 0.75 → 50
        let closes = [10.0, 12.0, 11.0, 12.0, 10.0];
        assert_eq!(rsi(&closes, 4).unwrap(), Some(50.0));

        // Window of 3 changes: -1, +1, -2 → gain 1/3, loss 1 → RS 1/3 → 25
        assert_eq!(rsi(&closes, 3).unwrap(), Some(25.0));
    }

    #[test]
    fn test_rsi_uses_only_latest_window() {
        // Early crash outside the window must not matter.
        let mut closes = vec![100.0, 50.0];
        closes.extend((1..=14).map(|i| 50.0 + f64::from(i)));
        assert_eq!(rsi(&closes, 14).unwrap(), Some(100.0));
    }

    #[test]
    fn test_rsi_zero_period_is_rejected() {
        assert!(rsi(&[1.0, 2.0], 0).is_err());
    }
}
