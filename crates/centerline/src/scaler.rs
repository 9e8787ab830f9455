//! Animated vertical range changes.
//!
//! The auto-scaler interpolates the visible Y range from where it is to a
//! target chosen by [`crate::ViewportManager::auto_scale`]. It is polled once
//! per frame with [`VerticalAutoScaler::tick`]; a new target always replaces
//! the one in flight.

use std::time::Duration;

use crate::easing::Easing;

/// A visible Y range in data units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YRange {
    /// Smallest visible value (drawn at the bottom of the content rect)
    pub min: f64,
    /// Largest visible value (drawn at the top of the content rect)
    pub max: f64,
}

impl YRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Interpolate towards `to` by `t` (0.0 to 1.0).
    #[inline]
    pub fn lerp(&self, to: &YRange, t: f64) -> YRange {
        YRange {
            min: self.min + t * (to.min - self.min),
            max: self.max + t * (to.max - self.max),
        }
    }
}

/// Auto-scaler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalerState {
    /// No animation in flight
    Idle,
    /// Interpolating towards the target
    Animating,
}

/// Result of polling the auto-scaler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleTick {
    /// Nothing to apply.
    Idle,
    /// Still animating; apply this range.
    Animating(YRange),
    /// Reached the target on this poll; apply this range.
    Finished(YRange),
}

impl ScaleTick {
    /// The range to apply to the viewport, if any.
    pub fn range(&self) -> Option<YRange> {
        match *self {
            ScaleTick::Idle => None,
            ScaleTick::Animating(r) | ScaleTick::Finished(r) => Some(r),
        }
    }
}

/// Time-based interpolation of the visible Y range.
#[derive(Debug, Clone)]
pub struct VerticalAutoScaler {
    state: ScalerState,
    easing: Easing,
    duration: Duration,
    started_at: Duration,
    start: YRange,
    target: YRange,
    current: YRange,
}

impl VerticalAutoScaler {
    /// Default animation length.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

    pub fn new() -> Self {
        Self {
            state: ScalerState::Idle,
            easing: Easing::FastOutSlowIn,
            duration: Self::DEFAULT_DURATION,
            started_at: Duration::ZERO,
            start: YRange::default(),
            target: YRange::default(),
            current: YRange::default(),
        }
    }

    /// Set the easing curve (builder pattern).
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the animation duration (builder pattern).
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Change the duration. An animation in flight keeps its start time and
    /// uses the new length from the next poll on.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> ScalerState {
        self.state
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.state == ScalerState::Animating
    }

    /// Range of the last (or current) animation's end.
    pub fn target(&self) -> YRange {
        self.target
    }

    /// Range as of the last poll.
    pub fn current(&self) -> YRange {
        self.current
    }

    /// Start animating from `from` to `to`, replacing any animation in flight.
    pub fn start_scaling_y(&mut self, now: Duration, from: YRange, to: YRange) {
        self.started_at = now;
        self.start = from;
        self.current = from;
        self.target = to;
        self.state = ScalerState::Animating;
    }

    /// Advance to `now`.
    pub fn tick(&mut self, now: Duration) -> ScaleTick {
        if self.state == ScalerState::Idle {
            return ScaleTick::Idle;
        }

        let elapsed = now.saturating_sub(self.started_at);
        if elapsed >= self.duration {
            self.current = self.target;
            self.state = ScalerState::Idle;
            return ScaleTick::Finished(self.current);
        }

        let fraction = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = f64::from(self.easing.apply(fraction));
        self.current = self.start.lerp(&self.target, eased);
        ScaleTick::Animating(self.current)
    }

    /// Jump straight to the target and stop.
    pub fn abort(&mut self) {
        self.current = self.target;
        self.state = ScalerState::Idle;
    }

    /// Stop (`true`) or resume (`false`) without touching the current range.
    pub fn force_finished(&mut self, finished: bool) {
        self.state = if finished {
            ScalerState::Idle
        } else {
            ScalerState::Animating
        };
    }
}

impl Default for VerticalAutoScaler {
    fn default() -> Self {
        Self::new()
    }
}
