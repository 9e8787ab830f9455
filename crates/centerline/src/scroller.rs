//! Built-in [`ScrollPhysics`] implementation.
//!
//! Each axis runs its own motion:
//! - a programmatic scroll interpolates with an [`Easing`] curve;
//! - a fling decays exponentially, `v(t) = v0 * e^(-k t)`, until the speed
//!   drops below [`Scroller::STOP_VELOCITY`] or the travel reaches the
//!   overscroll edge, then springs back into bounds if it ended outside them.
//!
//! Positions are evaluated in closed form from the start time, so the result
//! does not depend on how often the scroller is polled.

use std::time::Duration;

use crate::easing::Easing;
use crate::physics::{FlingParams, ScrollPhysics};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Idle,
    Scroll {
        from: f64,
        delta: f64,
        started: f64,
        duration: f64,
    },
    Fling {
        from: f64,
        velocity: f64,
        started: f64,
        /// Seconds until the fling stops
        length: f64,
        end: f64,
        spring_to: Option<f64>,
    },
    SpringBack {
        from: f64,
        to: f64,
        started: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    motion: Motion,
    current: i32,
    final_pos: i32,
}

impl Axis {
    const IDLE: Self = Self {
        motion: Motion::Idle,
        current: 0,
        final_pos: 0,
    };

    fn start_scroll(&mut self, now: f64, start: i32, delta: i32, duration: f64) {
        self.current = start;
        self.final_pos = start + delta;
        self.motion = Motion::Scroll {
            from: f64::from(start),
            delta: f64::from(delta),
            started: now,
            duration,
        };
    }

    fn spring_back(&mut self, now: f64, from: f64, to: f64) {
        self.current = from.round() as i32;
        self.final_pos = to.round() as i32;
        self.motion = Motion::SpringBack {
            from,
            to,
            started: now,
        };
    }

    #[allow(clippy::too_many_arguments)]
    fn start_fling(
        &mut self,
        now: f64,
        start: i32,
        velocity: f32,
        min: i32,
        max: i32,
        over: i32,
        friction: f64,
    ) {
        let start = f64::from(start);
        let min = f64::from(min);
        // A surface smaller than the content rect gives an inverted range.
        let max = f64::from(max).max(min);

        if start < min || start > max {
            self.spring_back(now, start, start.clamp(min, max));
            return;
        }

        let v = f64::from(velocity);
        let speed = v.abs();
        if speed.is_nan() || speed <= Scroller::STOP_VELOCITY {
            self.current = start as i32;
            self.final_pos = self.current;
            self.motion = Motion::Idle;
            return;
        }

        let k = friction;
        let mut length = (speed / Scroller::STOP_VELOCITY).ln() / k;
        let mut end = start + v / k * (1.0 - Scroller::STOP_VELOCITY / speed);

        let over = f64::from(over.max(0));
        let (lo, hi) = (min - over, max + over);
        if end < lo || end > hi {
            // Stop early where the decay curve crosses the overscroll edge.
            let edge = end.clamp(lo, hi);
            let remaining = (1.0 - (edge - start) * k / v).clamp(f64::MIN_POSITIVE, 1.0);
            length = -remaining.ln() / k;
            end = edge;
        }

        let spring_to = if end < min {
            Some(min)
        } else if end > max {
            Some(max)
        } else {
            None
        };

        self.current = start as i32;
        self.final_pos = spring_to.unwrap_or(end).round() as i32;
        self.motion = Motion::Fling {
            from: start,
            velocity: v,
            started: now,
            length: length.max(0.0),
            end,
            spring_to,
        };
    }

    /// Advance to `now`. Returns `true` while the axis is still moving.
    fn update(&mut self, now: f64, easing: Easing, friction: f64) -> bool {
        match self.motion {
            Motion::Idle => false,
            Motion::Scroll {
                from,
                delta,
                started,
                duration,
            } => {
                let elapsed = now - started;
                if elapsed >= duration {
                    self.current = self.final_pos;
                    self.motion = Motion::Idle;
                    return false;
                }
                let t = (elapsed / duration) as f32;
                self.current = (from + delta * f64::from(easing.apply(t))).round() as i32;
                true
            }
            Motion::Fling {
                from,
                velocity,
                started,
                length,
                end,
                spring_to,
            } => {
                let elapsed = (now - started).max(0.0);
                if elapsed >= length {
                    match spring_to {
                        Some(to) => {
                            self.spring_back(started + length, end, to);
                            self.update(now, easing, friction)
                        }
                        None => {
                            self.current = self.final_pos;
                            self.motion = Motion::Idle;
                            false
                        }
                    }
                } else {
                    let travelled = velocity / friction * (1.0 - (-friction * elapsed).exp());
                    self.current = (from + travelled).round() as i32;
                    true
                }
            }
            Motion::SpringBack { from, to, started } => {
                let t = (now - started).max(0.0) / Scroller::SPRING_BACK_DURATION;
                if t >= 1.0 {
                    self.current = self.final_pos;
                    self.motion = Motion::Idle;
                    return false;
                }
                let eased = f64::from(Easing::CubicOut.apply(t as f32));
                self.current = (from + (to - from) * eased).round() as i32;
                true
            }
        }
    }

    fn stop(&mut self) {
        self.motion = Motion::Idle;
    }

    fn is_idle(&self) -> bool {
        self.motion == Motion::Idle
    }
}

/// Default scroll physics: eased scrolls and exponentially decaying flings.
#[derive(Debug, Clone)]
pub struct Scroller {
    x: Axis,
    y: Axis,
    finished: bool,
    easing: Easing,
    friction: f64,
}

impl Scroller {
    /// Velocity decay rate, per second.
    pub const DEFAULT_FRICTION: f64 = 4.2;
    /// Speed (pixels per second) below which a fling stops.
    pub const STOP_VELOCITY: f64 = 20.0;
    /// Seconds taken to spring back into bounds after an overscroll.
    pub const SPRING_BACK_DURATION: f64 = 0.25;

    pub fn new() -> Self {
        Self {
            x: Axis::IDLE,
            y: Axis::IDLE,
            finished: true,
            easing: Easing::AccelerateDecelerate,
            friction: Self::DEFAULT_FRICTION,
        }
    }

    /// Set the curve used by programmatic scrolls (builder pattern).
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the fling decay rate (builder pattern). Non-positive values are
    /// replaced by [`Self::DEFAULT_FRICTION`].
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = if friction > 0.0 {
            friction
        } else {
            Self::DEFAULT_FRICTION
        };
        self
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollPhysics for Scroller {
    fn start_scroll(
        &mut self,
        now: Duration,
        start_x: i32,
        start_y: i32,
        dx: i32,
        dy: i32,
        duration: Duration,
    ) {
        let now = now.as_secs_f64();
        let duration = duration.as_secs_f64();
        self.x.start_scroll(now, start_x, dx, duration);
        self.y.start_scroll(now, start_y, dy, duration);
        self.finished = false;
    }

    fn fling(&mut self, now: Duration, params: FlingParams) {
        let now = now.as_secs_f64();
        self.x.start_fling(
            now,
            params.start_x,
            params.velocity_x,
            params.min_x,
            params.max_x,
            params.over_x,
            self.friction,
        );
        self.y.start_fling(
            now,
            params.start_y,
            params.velocity_y,
            params.min_y,
            params.max_y,
            params.over_y,
            self.friction,
        );
        self.finished = false;
    }

    fn force_finished(&mut self, finished: bool) {
        self.finished = finished;
        if finished {
            self.x.stop();
            self.y.stop();
        }
    }

    fn compute_scroll_offset(&mut self, now: Duration) -> bool {
        if self.finished {
            return false;
        }
        let now = now.as_secs_f64();
        let x_moving = self.x.update(now, self.easing, self.friction);
        let y_moving = self.y.update(now, self.easing, self.friction);
        if !x_moving && !y_moving {
            self.finished = true;
        }
        true
    }

    fn current_x(&self) -> i32 {
        self.x.current
    }

    fn current_y(&self) -> i32 {
        self.y.current
    }

    fn final_x(&self) -> i32 {
        self.x.final_pos
    }

    fn final_y(&self) -> i32 {
        self.y.final_pos
    }

    fn is_finished(&self) -> bool {
        self.finished && self.x.is_idle() && self.y.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    /// Poll every 16 ms until the scroller settles, collecting X offsets.
    fn run(scroller: &mut Scroller, from: Duration) -> Vec<i32> {
        let mut xs = Vec::new();
        let mut now = from;
        while scroller.compute_scroll_offset(now) {
            xs.push(scroller.current_x());
            now += ms(16);
            assert!(now < from + Duration::from_secs(30), "never settled");
        }
        xs
    }

    #[test]
    fn test_scroll_reaches_target() {
        let mut s = Scroller::new();
        s.start_scroll(ms(0), 100, 0, 250, 0, ms(300));
        assert_eq!(s.final_x(), 350);
        assert!(!s.is_finished());

        let xs = run(&mut s, ms(0));
        assert_eq!(*xs.last().unwrap(), 350);
        assert!(xs.windows(2).all(|w| w[1] >= w[0]));
        assert!(s.is_finished());
        assert!(!s.compute_scroll_offset(ms(5000)));
    }

    #[test]
    fn test_zero_duration_scroll_finishes_on_first_poll() {
        let mut s = Scroller::new();
        s.start_scroll(ms(10), 0, 0, -40, 0, Duration::ZERO);
        let sample = s.poll_offset(ms(10));
        assert!(sample.active);
        assert!(sample.finished);
        assert_eq!(sample.x, -40);
    }

    #[test]
    fn test_fling_decelerates_to_final() {
        let mut s = Scroller::new();
        s.fling(
            ms(0),
            FlingParams {
                start_x: 0,
                velocity_x: 2000.0,
                min_x: -1000,
                max_x: 100_000,
                max_y: 0,
                ..Default::default()
            },
        );
        let xs = run(&mut s, ms(0));
        assert_eq!(*xs.last().unwrap(), s.final_x());
        // Total travel is bounded by v0 / k.
        assert!(f64::from(s.final_x()) <= 2000.0 / Scroller::DEFAULT_FRICTION);
        assert!(s.final_x() > 300);
        // Steps shrink as the fling slows down.
        let first_step = xs[1] - xs[0];
        let last_step = xs[xs.len() - 1] - xs[xs.len() - 2];
        assert!(first_step > last_step);
    }

    #[test]
    fn test_fling_springs_back_into_bounds() {
        let mut s = Scroller::new();
        s.fling(
            ms(0),
            FlingParams {
                start_x: 90,
                velocity_x: 5000.0,
                min_x: 0,
                max_x: 100,
                over_x: 50,
                ..Default::default()
            },
        );
        assert_eq!(s.final_x(), 100);

        let xs = run(&mut s, ms(0));
        assert!(xs.iter().all(|&x| (0..=150).contains(&x)));
        assert!(xs.iter().any(|&x| x > 100));
        assert_eq!(*xs.last().unwrap(), 100);
    }

    #[test]
    fn test_zero_velocity_fling_finishes_immediately() {
        let mut s = Scroller::new();
        s.fling(
            ms(0),
            FlingParams {
                start_x: 42,
                min_x: 0,
                max_x: 100,
                ..Default::default()
            },
        );
        assert!(s.compute_scroll_offset(ms(0)));
        assert!(s.is_finished());
        assert_eq!(s.current_x(), 42);
        assert!(!s.compute_scroll_offset(ms(16)));
    }

    #[test]
    fn test_force_finished_keeps_offset() {
        let mut s = Scroller::new().with_easing(Easing::Linear);
        s.start_scroll(ms(0), 0, 0, 100, 0, ms(100));
        assert!(s.compute_scroll_offset(ms(50)));
        assert_eq!(s.current_x(), 50);

        s.force_finished(true);
        assert!(s.is_finished());
        assert!(!s.compute_scroll_offset(ms(60)));
        assert_eq!(s.current_x(), 50);
    }

    #[test]
    fn test_poll_cadence_does_not_change_positions() {
        let params = FlingParams {
            start_x: 0,
            velocity_x: -3000.0,
            min_x: -10_000,
            max_x: 10_000,
            ..Default::default()
        };
        let mut a = Scroller::new();
        let mut b = Scroller::new();
        a.fling(ms(0), params);
        b.fling(ms(0), params);

        for t in (0..400).step_by(8) {
            b.compute_scroll_offset(ms(t));
        }
        a.compute_scroll_offset(ms(400));
        b.compute_scroll_offset(ms(400));
        assert_eq!(a.current_x(), b.current_x());
    }
}
