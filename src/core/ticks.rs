use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use smallvec::SmallVec;

use crate::core::types::AxisValueType;

/// Lower bound on the tick count a linear axis may settle on.
pub const MIN_TICK_COUNT: usize = 2;

/// Tick count used when a scalar domain collapses to a single value.
pub const DEFAULT_BEST_TICK_COUNT: usize = 3;

/// Ratio of the tick step below which a tick value is treated as floating
/// point noise around zero and snapped to exactly `0.0`.
pub const TICK_ZERO_SNAP_RATIO: f64 = 1e-5;

/// Samples an ordinal label list down to at most `max_ticks` entries.
///
/// Labels are taken at an even stride of `floor(len / max_ticks)` (clamped to
/// at least 1). All labels are returned unchanged when `max_ticks >= len`.
#[must_use]
pub fn recommended_ordinal_ticks<T: Clone>(max_ticks: isize, labels: &[T]) -> Vec<T> {
    if max_ticks <= 0 {
        return Vec::new();
    }
    let max_ticks = max_ticks as usize;
    if max_ticks >= labels.len() {
        return labels.to_vec();
    }

    let stride = (labels.len() / max_ticks).max(1);
    labels
        .iter()
        .step_by(stride)
        .take(max_ticks)
        .cloned()
        .collect()
}

/// Clips `values` to `[min, max]`, guaranteeing at least the two domain
/// endpoints when fewer than two of the inputs fall inside range.
#[must_use]
pub fn ensure_values_in_range(values: &[f64], min: f64, max: f64) -> Vec<f64> {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let inside: Vec<f64> = values
        .iter()
        .copied()
        .filter(|value| *value >= min && *value <= max)
        .collect();

    if inside.len() < 2 {
        return vec![min, max];
    }
    inside
}

/// Chooses the tick count an axis should aim for given its domain and the
/// backing column types.
///
/// Integer-only columns never get more ticks than there are distinct integers
/// in range; degenerate domains fall back to a small constant.
#[must_use]
pub fn best_tick_count(
    min: f64,
    max: f64,
    column_types: &[AxisValueType],
    max_tick_count: usize,
    is_date_time: bool,
) -> usize {
    if max_tick_count <= 1 || (min >= -1.0 && max <= 1.0) {
        return max_tick_count;
    }

    if min.is_nan() || max.is_nan() {
        return DEFAULT_BEST_TICK_COUNT;
    }

    if min == max {
        return if is_date_time {
            1
        } else {
            DEFAULT_BEST_TICK_COUNT
        };
    }

    let all_integer =
        !column_types.is_empty() && column_types.iter().all(|value_type| value_type.is_integer());
    if all_integer {
        let distinct = (max - min).abs() + 1.0;
        return (distinct as usize).min(max_tick_count);
    }

    max_tick_count
}

/// Generates "nice" linear ticks near `max_ticks` for `[min, max]`.
///
/// The underlying step ladder can over- or under-produce; over-production is
/// retried with one fewer tick and falling below [`MIN_TICK_COUNT`] is retried
/// with one more. Near-zero artifacts are snapped to true zero and intervals
/// below `min_interval` are coalesced by doubling.
#[must_use]
pub fn recommended_linear_ticks(
    min: f64,
    max: f64,
    max_ticks: usize,
    min_interval: Option<f64>,
) -> Vec<f64> {
    if max_ticks == 0 || !min.is_finite() || !max.is_finite() || min == max {
        return Vec::new();
    }
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    let mut ticks = nice_ticks(min, max, max_ticks);
    if ticks.len() > max_ticks && max_ticks > 1 {
        ticks = nice_ticks(min, max, max_ticks - 1);
    }
    if ticks.len() < MIN_TICK_COUNT {
        ticks = nice_ticks(min, max, max_ticks + 1);
    }
    if ticks.len() < MIN_TICK_COUNT {
        ticks = vec![min, max];
    }

    snap_ticks_to_zero(&mut ticks);

    if let Some(min_interval) = min_interval {
        ticks = coalesce_ticks(ticks, min_interval);
    }
    ticks
}

/// Evenly spaced ticks on a 1/2/5 step ladder covering `[min, max]`.
fn nice_ticks(min: f64, max: f64, target_count: usize) -> Vec<f64> {
    let target = target_count.max(1) as f64;
    let raw_step = (max - min) / target;
    let step = nice_step(raw_step);
    if !step.is_finite() || step <= 0.0 {
        return vec![min, max];
    }

    let first = (min / step).ceil();
    let last = (max / step).floor();
    let mut ticks = Vec::new();
    let mut index = first;
    while index <= last {
        ticks.push(index * step);
        index += 1.0;
    }
    ticks
}

fn nice_step(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return f64::NAN;
    }
    let magnitude = 10_f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let factor = if residual >= 5.0 {
        10.0
    } else if residual >= 2.0 {
        5.0
    } else if residual >= 1.0 {
        2.0
    } else {
        1.0
    };
    magnitude * factor
}

fn snap_ticks_to_zero(ticks: &mut [f64]) {
    if ticks.len() < 2 {
        return;
    }
    let step = (ticks[1] - ticks[0]).abs();
    for tick in ticks.iter_mut() {
        if tick.abs() < step * TICK_ZERO_SNAP_RATIO {
            *tick = 0.0;
        }
    }
}

/// Drops intermediate ticks until the spacing respects `min_interval`,
/// doubling the kept stride each round and never going below two ticks.
fn coalesce_ticks(ticks: Vec<f64>, min_interval: f64) -> Vec<f64> {
    if !min_interval.is_finite() || min_interval <= 0.0 || ticks.len() <= MIN_TICK_COUNT {
        return ticks;
    }

    let mut current = ticks;
    loop {
        let interval = match (current.first(), current.get(1)) {
            (Some(first), Some(second)) => (second - first).abs(),
            _ => return current,
        };
        if interval >= min_interval || current.len() <= MIN_TICK_COUNT {
            return current;
        }
        let halved: Vec<f64> = current.iter().copied().step_by(2).collect();
        if halved.len() < MIN_TICK_COUNT {
            return current;
        }
        current = halved;
    }
}

/// Calendar unit ladder for date-time tick sequencing, coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DateUnit {
    fn approx_millis(self) -> f64 {
        match self {
            Self::Year => 365.25 * 24.0 * 3_600_000.0,
            Self::Month => 30.44 * 24.0 * 3_600_000.0,
            Self::Week => 7.0 * 24.0 * 3_600_000.0,
            Self::Day => 24.0 * 3_600_000.0,
            Self::Hour => 3_600_000.0,
            Self::Minute => 60_000.0,
            Self::Second => 1_000.0,
            Self::Millisecond => 1.0,
        }
    }

    fn nice_multiples(self) -> &'static [u32] {
        match self {
            Self::Year => &[1, 2, 5, 10, 20, 50, 100],
            Self::Month => &[1, 2, 3, 6],
            Self::Week => &[1, 2],
            Self::Day => &[1, 2, 7, 14],
            Self::Hour => &[1, 2, 3, 6, 12],
            Self::Minute | Self::Second => &[1, 2, 5, 10, 15, 30],
            Self::Millisecond => &[1, 2, 5, 10, 25, 50, 100, 200, 250, 500],
        }
    }
}

const DATE_UNIT_LADDER: [DateUnit; 8] = [
    DateUnit::Millisecond,
    DateUnit::Second,
    DateUnit::Minute,
    DateUnit::Hour,
    DateUnit::Day,
    DateUnit::Week,
    DateUnit::Month,
    DateUnit::Year,
];

/// Generates a calendar-aware tick sequence over a `[min_ms, max_ms]`
/// Unix-millisecond domain, aiming for `expected_count` ticks.
///
/// The sequence is aligned to whole calendar units (midnights, month starts,
/// January 1st) and clipped back into the domain via
/// [`ensure_values_in_range`].
#[must_use]
pub fn recommended_datetime_ticks(min_ms: f64, max_ms: f64, expected_count: usize) -> Vec<f64> {
    if !min_ms.is_finite() || !max_ms.is_finite() || expected_count == 0 {
        return Vec::new();
    }
    let (min_ms, max_ms) = if min_ms <= max_ms {
        (min_ms, max_ms)
    } else {
        (max_ms, min_ms)
    };
    if min_ms == max_ms {
        return vec![min_ms];
    }

    let span = max_ms - min_ms;
    let target_interval = span / expected_count as f64;
    let (unit, multiple) = pick_date_interval(target_interval);

    let sequence = date_sequence(min_ms, max_ms, unit, multiple);
    ensure_values_in_range(&sequence, min_ms, max_ms)
}

/// Picks the calendar unit and multiple whose interval lands closest to (and
/// not below) the requested target interval.
fn pick_date_interval(target_interval_ms: f64) -> (DateUnit, u32) {
    let mut candidates: SmallVec<[(f64, DateUnit, u32); 8]> = SmallVec::new();
    for unit in DATE_UNIT_LADDER {
        for &multiple in unit.nice_multiples() {
            let interval = unit.approx_millis() * f64::from(multiple);
            if interval >= target_interval_ms {
                candidates.push((interval, unit, multiple));
                break;
            }
        }
    }

    candidates
        .into_iter()
        .min_by(|left, right| left.0.total_cmp(&right.0))
        .map(|(_, unit, multiple)| (unit, multiple))
        .unwrap_or((DateUnit::Year, 100))
}

fn date_sequence(min_ms: f64, max_ms: f64, unit: DateUnit, multiple: u32) -> Vec<f64> {
    let Some(start) = Utc.timestamp_millis_opt(min_ms as i64).single() else {
        return vec![min_ms, max_ms];
    };

    let mut cursor = floor_to_unit(start, unit, multiple);
    let mut values = Vec::new();
    // Hard cap keeps pathological unit/domain combinations bounded.
    for _ in 0..512 {
        let ms = cursor.timestamp_millis() as f64;
        if ms > max_ms {
            break;
        }
        values.push(ms);
        cursor = advance(cursor, unit, multiple);
    }
    values
}

fn floor_to_unit(moment: DateTime<Utc>, unit: DateUnit, multiple: u32) -> DateTime<Utc> {
    let date = moment.date_naive();
    let result = match unit {
        DateUnit::Year => {
            let year = moment.year() - moment.year().rem_euclid(multiple as i32);
            Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
        }
        DateUnit::Month => {
            let month0 = moment.month0() - moment.month0() % multiple;
            Utc.with_ymd_and_hms(moment.year(), month0 + 1, 1, 0, 0, 0)
                .single()
        }
        DateUnit::Week => {
            let days_from_monday = date.weekday().num_days_from_monday();
            date.checked_sub_days(chrono::Days::new(u64::from(days_from_monday)))
                .and_then(|monday| monday.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        DateUnit::Day => date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
        DateUnit::Hour => Utc
            .with_ymd_and_hms(
                moment.year(),
                moment.month(),
                moment.day(),
                moment.hour() - moment.hour() % multiple,
                0,
                0,
            )
            .single(),
        DateUnit::Minute => Utc
            .with_ymd_and_hms(
                moment.year(),
                moment.month(),
                moment.day(),
                moment.hour(),
                moment.minute() - moment.minute() % multiple,
                0,
            )
            .single(),
        DateUnit::Second => Utc
            .with_ymd_and_hms(
                moment.year(),
                moment.month(),
                moment.day(),
                moment.hour(),
                moment.minute(),
                moment.second() - moment.second() % multiple,
            )
            .single(),
        DateUnit::Millisecond => {
            let millis = moment.timestamp_millis();
            let step = i64::from(multiple);
            Utc.timestamp_millis_opt(millis - millis.rem_euclid(step))
                .single()
        }
    };
    result.unwrap_or(moment)
}

fn advance(moment: DateTime<Utc>, unit: DateUnit, multiple: u32) -> DateTime<Utc> {
    let stepped = match unit {
        DateUnit::Year => moment.with_year(moment.year() + multiple as i32),
        DateUnit::Month => {
            let total = moment.month0() + multiple;
            let year = moment.year() + (total / 12) as i32;
            moment.with_year(year).and_then(|m| m.with_month0(total % 12))
        }
        DateUnit::Week => moment.checked_add_days(chrono::Days::new(7 * u64::from(multiple))),
        DateUnit::Day => moment.checked_add_days(chrono::Days::new(u64::from(multiple))),
        DateUnit::Hour => {
            moment.checked_add_signed(chrono::Duration::hours(i64::from(multiple)))
        }
        DateUnit::Minute => {
            moment.checked_add_signed(chrono::Duration::minutes(i64::from(multiple)))
        }
        DateUnit::Second => {
            moment.checked_add_signed(chrono::Duration::seconds(i64::from(multiple)))
        }
        DateUnit::Millisecond => {
            moment.checked_add_signed(chrono::Duration::milliseconds(i64::from(multiple)))
        }
    };
    stepped.unwrap_or_else(|| moment + chrono::Duration::milliseconds(1))
}
