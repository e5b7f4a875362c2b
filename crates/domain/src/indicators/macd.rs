use super::ema::ema_series;
use super::round_to;
use crate::error::DomainError;
use crate::value_objects::indicator_result::MacdValue;
use serde::{Deserialize, Serialize};

/// EMA spans of a MACD calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdParams {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.fast == 0 || self.signal == 0 {
            return Err(DomainError::InvalidWindow(
                "MACD spans must be greater than zero".to_string(),
            ));
        }
        if self.fast >= self.slow {
            return Err(DomainError::InvalidWindow(format!(
                "MACD fast span ({}) must be shorter than slow span ({})",
                self.fast, self.slow
            )));
        }
        Ok(())
    }
}

/// MACD line, signal line and histogram at the most recent bar.
///
/// MACD and signal are rounded to 4 decimals; the histogram is taken from the
/// rounded lines so `histogram == macd - signal` holds on the returned values.
pub fn macd(closes: &[f64], params: MacdParams) -> Result<Option<MacdValue>, DomainError> {
    params.validate()?;

    let fast = ema_series(closes, params.fast);
    let slow = ema_series(closes, params.slow);
    let lines: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signals = ema_series(&lines, params.signal);

    let (Some(&line), Some(&signal)) = (lines.last(), signals.last()) else {
        return Ok(None);
    };
    if !line.is_finite() || !signal.is_finite() {
        return Ok(None);
    }

    let macd = round_to(line, 4);
    let signal = round_to(signal, 4);
    Ok(Some(MacdValue {
        macd,
        signal,
        histogram: round_to(macd - signal, 4),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                100.0 + 5.0 * (t / 7.0).sin() + 0.3 * t + 1.7 * (t / 2.3).cos()
            })
            .collect()
    }

    #[test]
    fn test_histogram_is_macd_minus_signal() {
        for n in [1, 5, 26, 60, 250] {
            let v = macd(&wave(n), MacdParams::default()).unwrap().unwrap();
            assert!(
                (v.histogram - (v.macd - v.signal)).abs() < 1e-9,
                "n={n}: {v:?}"
            );
        }
    }

    #[test]
    fn test_macd_constant_series_is_zero() {
        let v = macd(&[42.0; 50], MacdParams::default()).unwrap().unwrap();
        assert_eq!(v.macd, 0.0);
        assert_eq!(v.signal, 0.0);
        assert_eq!(v.histogram, 0.0);
    }

    #[test]
    fn test_macd_rising_series_is_positive() {
        let closes: Vec<f64> = (0..100).map(|i| 10.0 + f64::from(i)).collect();
        let v = macd(&closes, MacdParams::default()).unwrap().unwrap();
        assert!(v.macd > 0.0);
        assert!(v.signal > 0.0);
    }

    #[test]
    fn test_macd_hand_worked() {
        // fast=1 tracks the price, slow=3 (α=0.5), signal=1 tracks the line.
        // closes 10, 12: slow = 10, 11 → line = 0, 1
        let params = MacdParams {
            fast: 1,
            slow: 3,
            signal: 1,
        };
        let v = macd(&[10.0, 12.0], params).unwrap().unwrap();
        assert_eq!(v.macd, 1.0);
        assert_eq!(v.signal, 1.0);
        assert_eq!(v.histogram, 0.0);
    }

    #[test]
    fn test_macd_empty_series() {
        assert_eq!(macd(&[], MacdParams::default()).unwrap(), None);
    }

    #[test]
    fn test_macd_params_validation() {
        let bad = MacdParams {
            fast: 26,
            slow: 12,
            signal: 9,
        };
        assert!(macd(&[1.0], bad).is_err());
        let zero = MacdParams {
            fast: 0,
            slow: 26,
            signal: 9,
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_macd_is_pure() {
        let closes = wave(120);
        let a = macd(&closes, MacdParams::default()).unwrap();
        let b = macd(&closes, MacdParams::default()).unwrap();
        assert_eq!(a, b);
    }
}
