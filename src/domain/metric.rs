/// One raw counter to read over a trailing window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterQuery {
    pub metric_name: String,
    pub resource_id: String,
    pub window_seconds: u64,
}

impl CounterQuery {
    #[must_use]
    pub fn new(metric_name: &str, resource_id: &str, window_seconds: u64) -> Self {
        Self {
            metric_name: metric_name.to_owned(),
            resource_id: resource_id.to_owned(),
            window_seconds,
        }
    }
}

/// Sum of every datapoint returned for a [`CounterQuery`].
///
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct CounterTotal(f64);

impl CounterTotal {
    pub const ZERO: Self = Self(0.0);

    /// Wraps a counter value, rejecting negative or non-finite input.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// A single custom-metric write.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    pub namespace: String,
    pub metric_name: String,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::CounterTotal;

    #[test]
    fn counter_total_rejects_negative_and_non_finite() -> Result<(), String> {
        for value in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            if CounterTotal::new(value).is_some() {
                return Err(format!("Expected {} to be rejected", value));
            }
        }
        Ok(())
    }

    #[test]
    fn counter_total_accepts_zero_and_fractions() -> Result<(), String> {
        let zero = CounterTotal::new(0.0).ok_or("zero rejected")?;
        if zero != CounterTotal::ZERO {
            return Err("Expected zero total".to_owned());
        }
        let half = CounterTotal::new(0.5).ok_or("fraction rejected")?;
        if half.value() <= 0.0 {
            return Err("Expected positive total".to_owned());
        }
        Ok(())
    }
}
