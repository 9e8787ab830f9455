use std::time::{Duration, Instant};

/// Produces the `now` timestamps the chart's animations are driven with.
///
/// Every animation in the engine takes time as a [`Duration`] since an
/// arbitrary epoch rather than reading a clock itself. Hosts running on real
/// time use this clock; tests pass hand-made durations instead.
///
/// # Example
/// ```
/// use centerline::FrameClock;
///
/// let mut clock = FrameClock::new();
/// let now = clock.tick();
/// assert!(now >= std::time::Duration::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Time the clock was created
    start_time: Instant,
    /// Time since start at the last tick
    elapsed: Duration,
    /// Time between the last two ticks
    delta: Duration,
    /// Number of ticks so far
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance to the current instant and return the time since creation.
    ///
    /// Call once per frame; pass the result to every chart call of that frame.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.start_time.elapsed();
        self.delta = elapsed.saturating_sub(self.elapsed);
        self.elapsed = elapsed;
        self.frame_count += 1;
        elapsed
    }

    /// Time since creation at the last [`Self::tick`].
    #[inline]
    pub fn now(&self) -> Duration {
        self.elapsed
    }

    /// Time between the last two ticks.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b >= a);
        assert_eq!(clock.now(), b);
        assert_eq!(clock.delta(), b - a);
        assert_eq!(clock.frame_count(), 2);
    }
}
