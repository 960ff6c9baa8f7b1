//! Converts host frame timestamps into the shader's `time` uniform.

/// Elapsed-time source anchored at the moment the demo started.
///
/// Host timestamps are milliseconds on a monotonic clock
/// (`performance.now()` / the `requestAnimationFrame` argument).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    origin_ms: f64,
}

impl FrameClock {
    /// Anchors the clock at `origin_ms`.
    pub fn new(origin_ms: f64) -> Self {
        Self { origin_ms }
    }

    /// Host timestamp that maps to `time = 0`.
    pub fn origin_ms(&self) -> f64 {
        self.origin_ms
    }

    /// Seconds elapsed since the origin. Timestamps before the origin map to 0.
    pub fn seconds(&self, now_ms: f64) -> f32 {
        ((now_ms - self.origin_ms).max(0.0) / 1000.0) as f32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_zero() {
        let clock = FrameClock::new(1234.5);
        assert_eq!(clock.seconds(1234.5), 0.0);
    }

    #[test]
    fn milliseconds_become_seconds() {
        let clock = FrameClock::new(500.0);
        assert!((clock.seconds(2500.0) - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn earlier_timestamps_clamp_to_zero() {
        let clock = FrameClock::new(1000.0);
        assert_eq!(clock.seconds(10.0), 0.0);
    }

    #[test]
    fn default_origin_is_zero() {
        assert!((FrameClock::default().seconds(16.0) - 0.016).abs() < 1e-6);
    }
}
