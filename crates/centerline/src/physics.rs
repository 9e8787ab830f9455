//! The scroll physics collaborator.
//!
//! The viewport manager never simulates motion itself. It converts the
//! logical viewport into integer pixel offsets on a [`crate::ScrollSurface`],
//! hands those to a [`ScrollPhysics`] implementation together with bounds
//! or a target, and polls the offset back once per frame.

use std::time::Duration;

/// Arguments of a fling.
///
/// Positions are surface pixels; velocities are pixels per second in the
/// direction of increasing offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlingParams {
    pub start_x: i32,
    pub start_y: i32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    /// How far past `min_x`/`max_x` the motion may travel before springing back
    pub over_x: i32,
    /// How far past `min_y`/`max_y` the motion may travel before springing back
    pub over_y: i32,
}

/// Snapshot returned by [`ScrollPhysics::poll_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSample {
    pub x: i32,
    pub y: i32,
    /// The offset was (re)computed on this poll
    pub active: bool,
    /// No motion remains after this poll
    pub finished: bool,
}

/// A source of animated pixel offsets.
///
/// Time is always supplied by the caller as a duration since an arbitrary
/// epoch. Starting a scroll or fling replaces whatever motion was in flight.
pub trait ScrollPhysics {
    /// Animate from `(start_x, start_y)` by `(dx, dy)` over `duration`.
    fn start_scroll(
        &mut self,
        now: Duration,
        start_x: i32,
        start_y: i32,
        dx: i32,
        dy: i32,
        duration: Duration,
    );

    /// Start a decelerating fling.
    fn fling(&mut self, now: Duration, params: FlingParams);

    /// Stop (`true`) or un-stop (`false`) the motion, keeping the current offset.
    fn force_finished(&mut self, finished: bool);

    /// Advance to `now`.
    ///
    /// Returns `true` while there is an offset to apply, including the poll on
    /// which the motion reaches its final position. Returns `false` once the
    /// motion had already finished before this call.
    fn compute_scroll_offset(&mut self, now: Duration) -> bool;

    fn current_x(&self) -> i32;
    fn current_y(&self) -> i32;

    /// Where the current motion will come to rest horizontally.
    fn final_x(&self) -> i32;

    /// Where the current motion will come to rest vertically.
    fn final_y(&self) -> i32;

    fn is_finished(&self) -> bool;

    /// Poll and collect the result in one value.
    fn poll_offset(&mut self, now: Duration) -> ScrollSample {
        let active = self.compute_scroll_offset(now);
        ScrollSample {
            x: self.current_x(),
            y: self.current_y(),
            active,
            finished: self.is_finished(),
        }
    }
}
