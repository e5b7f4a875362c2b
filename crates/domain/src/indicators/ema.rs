/// Exponential Moving Average, incremental form.
///
/// Seeded with the first observation and never bias-corrected, i.e. the same
/// numbers as pandas `ewm(span=span, adjust=False).mean()`:
///
///   bar 0  → value = x₀
///   bar 1+ → value = α·x + (1−α)·prev   where α = 2/(span+1)
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
    value: f64,
    count: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
            value: 0.0,
            count: 0,
        }
    }

    /// Feed one observation, return the current EMA value.
    pub fn update(&mut self, x: f64) -> f64 {
        if self.count == 0 {
            self.value = x;
        } else {
            self.value = self.alpha * x + (1.0 - self.alpha) * self.value;
        }
        self.count += 1;
        self.value
    }
}

/// EMA of every prefix of `values`.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let mut ema = Ema::new(span);
    values.iter().map(|&x| ema.update(x)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_matches_pandas_adjust_false() {
        // pd.Series([10,11,12,13]).ewm(span=3, adjust=False).mean()
        let out = ema_series(&[10.0, 11.0, 12.0, 13.0], 3);
        let expected = [10.0, 10.5, 11.25, 12.125];
        for (got, want) in out.iter().zip(expected) {
            assert!((got - want).abs() < 1e-10, "{got} != {want}");
        }
    }

    #[test]
    fn test_ema_empty() {
        assert!(ema_series(&[], 12).is_empty());
    }

    #[test]
    fn test_incremental_update_matches_series() {
        let mut ema = Ema::new(3);
        assert_eq!(ema.update(10.0), 10.0);
        assert_eq!(ema.update(11.0), 10.5);
    }

    #[test]
    fn test_ema_constant_input_is_constant() {
        let out = ema_series(&[5.0; 40], 26);
        assert!(out.iter().all(|v| (v - 5.0).abs() < 1e-12));
    }
}
