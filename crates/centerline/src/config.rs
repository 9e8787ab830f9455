//! Host configuration for a chart.

use std::time::Duration;

use crate::easing::Easing;

/// Errors produced when validating a [`GraphConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Visible X range must be at least 1.
    InvalidVisibleRange(u32),

    /// X-axis interval must be at least 1.
    InvalidXInterval(u32),

    /// Y-axis step-count hint must be at least 1.
    InvalidStepHint(u32),

    /// An animation duration was zero.
    InvalidDuration { name: &'static str, millis: u128 },

    /// Tap radius must be finite and non-negative.
    InvalidClickRadius(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidVisibleRange(v) => {
                write!(f, "Visible X range must be at least 1, got {}", v)
            }
            ConfigError::InvalidXInterval(v) => {
                write!(f, "X interval must be at least 1, got {}", v)
            }
            ConfigError::InvalidStepHint(v) => {
                write!(f, "Y step-count hint must be at least 1, got {}", v)
            }
            ConfigError::InvalidDuration { name, millis } => {
                write!(f, "{} must be longer than 0 ms, got {} ms", name, millis)
            }
            ConfigError::InvalidClickRadius(r) => {
                write!(f, "Point click radius must be finite and >= 0, got {}", r)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Chart behaviour settings.
///
/// Pixel values are in whatever unit the host draws in; the engine never
/// converts densities.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    /// Logical width of the viewport in X units
    pub visible_x_range: u32,
    /// Spacing of X-axis stops
    pub x_interval: u32,
    /// Snap to the nearest X stop after a fling or release instead of auto-scaling
    pub snap_enabled: bool,
    /// Length of the vertical auto-scale animation
    pub scale_duration: Duration,
    /// Length of snap, tap-to-focus and programmatic scrolls
    pub snap_duration: Duration,
    /// Initial step-count guess for the Y-axis stop search
    pub y_step_hint: u32,
    /// Tap tolerance around a drawn point, in pixels
    pub point_click_radius: f32,
    /// Curve for the vertical auto-scale
    pub scale_easing: Easing,
    /// Curve for programmatic scrolls of the built-in scroller
    pub scroll_easing: Easing,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            visible_x_range: 7,
            x_interval: 1,
            snap_enabled: true,
            scale_duration: Duration::from_millis(300),
            snap_duration: Duration::from_millis(300),
            y_step_hint: 2,
            point_click_radius: 48.0,
            scale_easing: Easing::FastOutSlowIn,
            scroll_easing: Easing::AccelerateDecelerate,
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visible_x_range(mut self, range: u32) -> Self {
        self.visible_x_range = range;
        self
    }

    pub fn with_x_interval(mut self, interval: u32) -> Self {
        self.x_interval = interval;
        self
    }

    pub fn with_snap_enabled(mut self, enabled: bool) -> Self {
        self.snap_enabled = enabled;
        self
    }

    pub fn with_scale_duration(mut self, duration: Duration) -> Self {
        self.scale_duration = duration;
        self
    }

    pub fn with_snap_duration(mut self, duration: Duration) -> Self {
        self.snap_duration = duration;
        self
    }

    pub fn with_y_step_hint(mut self, hint: u32) -> Self {
        self.y_step_hint = hint;
        self
    }

    pub fn with_point_click_radius(mut self, radius: f32) -> Self {
        self.point_click_radius = radius;
        self
    }

    pub fn with_scale_easing(mut self, easing: Easing) -> Self {
        self.scale_easing = easing;
        self
    }

    pub fn with_scroll_easing(mut self, easing: Easing) -> Self {
        self.scroll_easing = easing;
        self
    }

    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_visible_range(self.visible_x_range)?;
        validate_x_interval(self.x_interval)?;
        if self.y_step_hint == 0 {
            return Err(ConfigError::InvalidStepHint(self.y_step_hint));
        }
        validate_duration("scale duration", self.scale_duration)?;
        validate_duration("snap duration", self.snap_duration)?;
        if !(self.point_click_radius.is_finite() && self.point_click_radius >= 0.0) {
            return Err(ConfigError::InvalidClickRadius(self.point_click_radius));
        }
        Ok(())
    }
}

pub(crate) fn validate_visible_range(range: u32) -> ConfigResult<()> {
    if range == 0 {
        return Err(ConfigError::InvalidVisibleRange(range));
    }
    Ok(())
}

pub(crate) fn validate_x_interval(interval: u32) -> ConfigResult<()> {
    if interval == 0 {
        return Err(ConfigError::InvalidXInterval(interval));
    }
    Ok(())
}

pub(crate) fn validate_duration(name: &'static str, duration: Duration) -> ConfigResult<()> {
    if duration.is_zero() {
        return Err(ConfigError::InvalidDuration {
            name,
            millis: duration.as_millis(),
        });
    }
    Ok(())
}
