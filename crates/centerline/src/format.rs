//! Label formatting hooks.
//!
//! The engine does not render text, but it owns the values labels are made
//! from. Hosts plug in a [`ValueFormatter`] for X-axis stops and a
//! [`LabelFormatter`] for the label over the centre line; plain closures work
//! for both.

use crate::data::DataPoint;

/// Formats an X-axis stop.
pub trait ValueFormatter {
    fn format_value(&self, value: f64) -> String;
}

/// Formats the label for the point(s) closest to the centre line.
pub trait LabelFormatter {
    fn format_label(&self, points: &[DataPoint]) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format_value(&self, value: f64) -> String {
        self(value)
    }
}

impl<F> LabelFormatter for F
where
    F: Fn(&[DataPoint]) -> String,
{
    fn format_label(&self, points: &[DataPoint]) -> String {
        self(points)
    }
}

/// Shortest round-trip form; integral values have no fraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValueFormatter;

impl ValueFormatter for DefaultValueFormatter {
    fn format_value(&self, value: f64) -> String {
        format_number(value)
    }
}

/// One line per point: the Y value followed by a unit suffix.
#[derive(Debug, Clone)]
pub struct UnitLabelFormatter {
    suffix: String,
}

impl UnitLabelFormatter {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Default for UnitLabelFormatter {
    fn default() -> Self {
        Self::new(" kg")
    }
}

impl LabelFormatter for UnitLabelFormatter {
    fn format_label(&self, points: &[DataPoint]) -> String {
        let mut out = String::new();
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format_number(p.y));
            out.push_str(&self.suffix);
        }
        out
    }
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Also catches -0.0.
        return "0".to_owned();
    }
    value.to_string()
}

/// Format with exactly `digits` decimals. Values that round to zero print
/// without a sign.
pub fn format_float(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits.min(15) as i32);
    if (value * scale).round() == 0.0 {
        return format!("{:.*}", digits, 0.0);
    }
    format!("{:.*}", digits, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_value_formatter() {
        let f = DefaultValueFormatter;
        assert_eq!(f.format_value(3.0), "3");
        assert_eq!(f.format_value(-2.5), "-2.5");
        assert_eq!(f.format_value(-0.0), "0");
    }

    #[test]
    fn test_unit_label_formatter() {
        let f = UnitLabelFormatter::default();
        let points = [DataPoint::new(1.0, 70.0), DataPoint::new(1.0, 72.5)];
        assert_eq!(f.format_label(&points), "70 kg\n72.5 kg");
        assert_eq!(f.format_label(&[]), "");
    }

    #[test]
    fn test_closures_are_formatters() {
        let days = |x: f64| format!("day {}", x as i64);
        assert_eq!(days.format_value(4.0), "day 4");

        let count = |points: &[DataPoint]| points.len().to_string();
        assert_eq!(count.format_label(&[DataPoint::default()]), "1");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(70.0, 0), "70");
        assert_eq!(format_float(1.26, 1), "1.3");
        assert_eq!(format_float(-3.456, 2), "-3.46");
        assert_eq!(format_float(-0.001, 2), "0.00");
        assert_eq!(format_float(-0.0, 0), "0");
    }
}
