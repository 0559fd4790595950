use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::AxisValueType;

/// Formats a single axis value into its tick label.
///
/// The solver treats formatters as opaque: it only ever creates one through a
/// [`FormatterFactory`] and calls [`ValueFormatter::format`]. Hosts supply
/// locale-aware implementations; [`DefaultFormatterFactory`] is a plain
/// non-localized stand-in.
pub trait ValueFormatter {
    fn format(&self, value: f64) -> String;
}

/// Inputs a formatter is created from: the axis value type, the domain bounds
/// (`value`/`value2` for date-time ranges) and the tick geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatterSpec {
    pub value_type: AxisValueType,
    pub value: f64,
    pub value2: f64,
    pub tick_count: usize,
    /// Interval between adjacent ticks, when display units should be chosen
    /// from it rather than from the domain magnitude.
    pub tick_interval: Option<f64>,
}

impl FormatterSpec {
    #[must_use]
    pub fn new(value_type: AxisValueType, value: f64, value2: f64, tick_count: usize) -> Self {
        Self {
            value_type,
            value,
            value2,
            tick_count,
            tick_interval: None,
        }
    }

    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: f64) -> Self {
        self.tick_interval = Some(tick_interval);
        self
    }
}

/// Creates [`ValueFormatter`]s for axis labels.
pub trait FormatterFactory {
    fn create(&self, spec: FormatterSpec) -> Box<dyn ValueFormatter>;
}

/// Built-in formatter factory: display-unit-aware numbers and span-derived
/// date granularity. No locale handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatterFactory;

impl FormatterFactory for DefaultFormatterFactory {
    fn create(&self, spec: FormatterSpec) -> Box<dyn ValueFormatter> {
        match spec.value_type {
            AxisValueType::DateTime => Box::new(DateFormatter::from_span(
                (spec.value2 - spec.value).abs(),
            )),
            AxisValueType::Boolean => Box::new(BooleanFormatter),
            AxisValueType::Text => Box::new(NumericFormatter::plain()),
            AxisValueType::Numeric | AxisValueType::Integer => {
                let magnitude = spec.value.abs().max(spec.value2.abs());
                Box::new(NumericFormatter::for_interval(
                    magnitude,
                    spec.tick_interval.unwrap_or(0.0),
                ))
            }
        }
    }
}

/// Numeric formatter with optional K/M/bn/T display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericFormatter {
    divisor: f64,
    suffix: &'static str,
    decimals: usize,
}

impl NumericFormatter {
    #[must_use]
    pub fn plain() -> Self {
        Self {
            divisor: 1.0,
            suffix: "",
            decimals: 0,
        }
    }

    /// Picks display units from a reference magnitude and decimal places from
    /// the tick interval, so adjacent labels always differ.
    #[must_use]
    pub fn for_interval(reference: f64, tick_interval: f64) -> Self {
        let reference = reference.abs();
        let (divisor, suffix) = if reference >= 1e12 {
            (1e12, "T")
        } else if reference >= 1e9 {
            (1e9, "bn")
        } else if reference >= 1e6 {
            (1e6, "M")
        } else if reference >= 1e3 {
            (1e3, "K")
        } else {
            (1.0, "")
        };

        let scaled_interval = if tick_interval > 0.0 {
            tick_interval / divisor
        } else {
            1.0
        };
        let decimals = if scaled_interval >= 1.0 || scaled_interval <= 0.0 {
            0
        } else {
            (-scaled_interval.log10().floor()) as usize
        }
        .min(6);

        Self {
            divisor,
            suffix,
            decimals,
        }
    }
}

impl ValueFormatter for NumericFormatter {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        let scaled = value / self.divisor;
        format!("{:.*}{}", self.decimals, scaled, self.suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanFormatter;

impl ValueFormatter for BooleanFormatter {
    fn format(&self, value: f64) -> String {
        if value != 0.0 { "True" } else { "False" }.to_owned()
    }
}

/// Date formatter whose granularity follows the formatted domain span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    pattern: &'static str,
}

impl DateFormatter {
    const TWO_YEARS_MS: f64 = 2.0 * 365.25 * 24.0 * 3_600_000.0;
    const TWO_MONTHS_MS: f64 = 2.0 * 30.44 * 24.0 * 3_600_000.0;
    const TWO_DAYS_MS: f64 = 2.0 * 24.0 * 3_600_000.0;
    const TWO_MINUTES_MS: f64 = 2.0 * 60_000.0;

    #[must_use]
    pub fn from_span(span_ms: f64) -> Self {
        let pattern = if span_ms >= Self::TWO_YEARS_MS {
            "%Y"
        } else if span_ms >= Self::TWO_MONTHS_MS {
            "%b %Y"
        } else if span_ms >= Self::TWO_DAYS_MS {
            "%b %d"
        } else if span_ms >= Self::TWO_MINUTES_MS {
            "%H:%M"
        } else {
            "%H:%M:%S"
        };
        Self { pattern }
    }
}

impl ValueFormatter for DateFormatter {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        match Utc.timestamp_millis_opt(value as i64).single() {
            Some(moment) => moment.format(self.pattern).to_string(),
            None => String::new(),
        }
    }
}
