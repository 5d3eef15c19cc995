// File: crates/plot-core/src/scale.rs
// Summary: Nice-number axis scaling (linear and calendar) and the X-axis scaling strategies.

use chrono::{FixedOffset, Local, LocalResult, TimeZone, Timelike};

use crate::axis::{format_time, format_value};

const HOUR: f64 = 3600.0;
const DAY: f64 = 24.0 * HOUR;

/// Resolved axis range: `min..=max` stepped by `increment`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
}

impl Scale {
    /// Used when no series carries any valid data.
    pub const FALLBACK: Scale = Scale { min: 0.0, max: 1.0, increment: 0.2 };

    pub const fn new(min: f64, max: f64, increment: f64) -> Self {
        Self { min, max, increment }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Caller-supplied scale components; any `None` is inferred at render time.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleHint {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub increment: Option<f64>,
}

impl ScaleHint {
    pub const fn new(min: Option<f64>, max: Option<f64>, increment: Option<f64>) -> Self {
        Self { min, max, increment }
    }

    pub const fn fixed(min: f64, max: f64, increment: f64) -> Self {
        Self::new(Some(min), Some(max), Some(increment))
    }

    /// The hint as a scale, when every component is present.
    pub fn complete(&self) -> Option<Scale> {
        match (self.min, self.max, self.increment) {
            (Some(min), Some(max), Some(inc)) => Some(Scale::new(min, max, inc)),
            _ => None,
        }
    }

    /// Fill unset components from `computed`, keeping the ones the caller set.
    pub fn fill(&self, computed: Scale) -> Scale {
        Scale {
            min: self.min.unwrap_or(computed.min),
            max: self.max.unwrap_or(computed.max),
            increment: self.increment.unwrap_or(computed.increment),
        }
    }
}

/// Choose round `(min, max, increment)` covering `data_min..=data_max` in about `nsteps` steps.
pub fn nice_scale(data_min: f64, data_max: f64, hint: &ScaleHint, nsteps: usize) -> Scale {
    if let Some(s) = hint.complete() {
        return s;
    }

    let (mut lo, mut hi) = if data_min <= data_max { (data_min, data_max) } else { (data_max, data_min) };
    if let Some(m) = hint.min {
        lo = m;
    }
    if let Some(m) = hint.max {
        hi = m;
    }
    if hi < lo {
        hi = lo;
    }
    if hi - lo < f64::EPSILON * lo.abs().max(1.0) {
        // Degenerate range: open it up on whichever ends are free.
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        match (hint.min.is_some(), hint.max.is_some()) {
            (false, false) if lo == 0.0 => hi = lo + pad,
            (false, false) => {
                lo -= pad;
                hi += pad;
            }
            (true, false) => hi = lo + pad,
            (false, true) => lo = hi - pad,
            (true, true) => hi = lo + 1.0,
        }
    }

    let increment = hint.increment.unwrap_or_else(|| nice_increment(hi - lo, nsteps));
    let min = hint.min.unwrap_or_else(|| increment * (lo / increment + 1e-9).floor());
    let max = hint.max.unwrap_or_else(|| increment * (hi / increment - 1e-9).ceil());
    Scale::new(min, max, increment)
}

fn nice_increment(range: f64, nsteps: usize) -> f64 {
    let step = range / nsteps.max(1) as f64;
    let magnitude = 10f64.powf(step.log10().floor());
    let msd = (step / magnitude + 0.5) as i64;
    let msd = if msd > 5 {
        10.0
    } else if msd > 2 {
        5.0
    } else if msd > 1 {
        2.0
    } else {
        1.0
    };
    msd * magnitude
}

/// Calendar-aware scaling for epoch-second ranges. `offset` fixes the time zone used
/// to align ticks on local boundaries; `None` uses the process's local zone.
pub fn nice_time_scale(tmin: f64, tmax: f64, offset: Option<FixedOffset>) -> Scale {
    let tmax = if tmax > tmin { tmax } else { tmin + HOUR };
    let span = tmax - tmin;

    let interval = if span <= 16_000.0 {
        900.0
    } else if span <= 27_000.0 {
        1800.0
    } else if span <= 2.0 * DAY + 1000.0 {
        3.0 * HOUR
    } else if span <= 7.0 * DAY + 1000.0 {
        DAY
    } else if span <= 31.0 * DAY + 1000.0 {
        3.0 * DAY
    } else {
        // Roughly monthly ticks, widened until there are at most ten.
        let month = 30.0 * DAY;
        (span / (10.0 * month)).ceil().max(1.0) * month
    };

    let midnight = match offset {
        Some(off) => local_midnight(&off, tmin),
        None => local_midnight(&Local, tmin),
    };
    let min = if interval < DAY {
        midnight + ((tmin - midnight) / interval).floor() * interval
    } else {
        midnight
    };
    let max = min + ((tmax - min) / interval).ceil().max(1.0) * interval;
    Scale::new(min, max, interval)
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, ts: f64) -> f64 {
    let secs = ts.floor() as i64;
    match tz.timestamp_opt(secs, 0) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            (secs - dt.time().num_seconds_from_midnight() as i64) as f64
        }
        LocalResult::None => secs as f64,
    }
}

/// Printf-style format with enough decimals to distinguish ticks `increment` apart.
pub fn pick_label_format(increment: f64) -> String {
    let decimals = if increment > 0.0 && increment.is_finite() {
        (-increment.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    format!("%.{decimals}f")
}

/// How the X axis is scaled and labelled.
pub trait ScalingStrategy: std::fmt::Debug {
    /// Resolve the axis scale from the data extent and whatever the caller pinned.
    fn resolve_scale(&self, extent: Option<(f64, f64)>, hint: &ScaleHint, nsteps: usize) -> Scale;
    /// Format string for tick labels; a configured format always wins. `extent` is the
    /// data extent the scale was resolved from.
    fn label_format(&self, scale: &Scale, extent: Option<(f64, f64)>, configured: Option<&str>) -> Option<String>;
    /// Text for a single tick.
    fn label(&self, value: f64, format: Option<&str>) -> String;
}

/// Scale for an axis with no valid data: a fully pinned hint, else the fixed fallback.
/// Partial pins are ignored since filling the fallback with them can invert the range.
fn without_data(hint: &ScaleHint) -> Scale {
    hint.complete().unwrap_or(Scale::FALLBACK)
}

/// Plain numeric axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearScaling;

impl ScalingStrategy for LinearScaling {
    fn resolve_scale(&self, extent: Option<(f64, f64)>, hint: &ScaleHint, nsteps: usize) -> Scale {
        match extent {
            Some((lo, hi)) => nice_scale(lo, hi, hint, nsteps),
            None => without_data(hint),
        }
    }

    fn label_format(&self, scale: &Scale, _extent: Option<(f64, f64)>, configured: Option<&str>) -> Option<String> {
        Some(configured.map(str::to_string).unwrap_or_else(|| pick_label_format(scale.increment)))
    }

    fn label(&self, value: f64, format: Option<&str>) -> String {
        match format {
            Some(f) => format_value(f, value),
            None => String::new(),
        }
    }
}

/// Time axis; values are unix epoch seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct CalendarScaling {
    /// Fixed UTC offset for alignment and labels; `None` means local time.
    pub offset: Option<FixedOffset>,
}

impl CalendarScaling {
    pub fn local() -> Self {
        Self { offset: None }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset: Some(offset) }
    }
}

impl ScalingStrategy for CalendarScaling {
    fn resolve_scale(&self, extent: Option<(f64, f64)>, hint: &ScaleHint, _nsteps: usize) -> Scale {
        if let Some(s) = hint.complete() {
            return s;
        }
        match extent {
            Some((lo, hi)) => hint.fill(nice_time_scale(lo, hi, self.offset)),
            None => without_data(hint),
        }
    }

    /// Picked from the span of the data, not of the rounded-out scale. No data, no labels.
    fn label_format(&self, _scale: &Scale, extent: Option<(f64, f64)>, configured: Option<&str>) -> Option<String> {
        if let Some(f) = configured {
            return Some(f.to_string());
        }
        let (lo, hi) = extent?;
        let span = hi - lo;
        let fmt = if span > 30.0 * DAY {
            "%x"
        } else if span > DAY {
            "%x %X"
        } else {
            "%X"
        };
        Some(fmt.to_string())
    }

    fn label(&self, value: f64, format: Option<&str>) -> String {
        let Some(fmt) = format else {
            return String::new();
        };
        let secs = value.round() as i64;
        match self.offset {
            Some(off) => format_time(&off, secs, fmt),
            None => format_time(&Local, secs, fmt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_scale_rounds_outwards() {
        let s = nice_scale(3.2, 47.9, &ScaleHint::default(), 10);
        assert_eq!(s, Scale::new(0.0, 50.0, 5.0));
    }

    #[test]
    fn nice_scale_keeps_pinned_components() {
        let hint = ScaleHint::new(Some(-10.0), None, None);
        let s = nice_scale(3.2, 47.9, &hint, 10);
        assert_eq!(s.min, -10.0);
        assert!(s.max >= 47.9);

        let hint = ScaleHint::new(None, None, Some(7.0));
        let s = nice_scale(3.2, 47.9, &hint, 10);
        assert_eq!(s.increment, 7.0);
        assert_eq!(s.min, 0.0);
        assert_eq!(s.max, 49.0);

        let fixed = ScaleHint::fixed(1.0, 2.0, 0.5);
        assert_eq!(nice_scale(-100.0, 100.0, &fixed, 10), Scale::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn nice_scale_opens_flat_ranges() {
        let s = nice_scale(0.0, 0.0, &ScaleHint::default(), 10);
        assert!(s.max > s.min);
        let s = nice_scale(20.0, 20.0, &ScaleHint::default(), 10);
        assert!(s.min < 20.0 && s.max > 20.0);
    }

    #[test]
    fn bar_extent_scale() {
        let s = nice_scale(-5.0, 20.0, &ScaleHint::default(), 10);
        assert_eq!(s, Scale::new(-5.0, 20.0, 5.0));
    }

    #[test]
    fn label_format_tracks_increment() {
        assert_eq!(pick_label_format(5.0), "%.0f");
        assert_eq!(pick_label_format(0.2), "%.1f");
        assert_eq!(pick_label_format(0.05), "%.2f");
        assert_eq!(pick_label_format(100.0), "%.0f");
    }

    #[test]
    fn time_scale_aligns_to_boundaries() {
        let utc = FixedOffset::east_opt(0).unwrap();
        // 2024-01-01T00:00Z plus a few hours and change
        let t0 = 1_704_067_200.0 + 1234.0;
        let t1 = t0 + 3.0 * HOUR;
        let s = nice_time_scale(t0, t1, Some(utc));
        assert_eq!(s.increment, 900.0);
        assert!(s.min <= t0 && s.max >= t1);
        assert_eq!((s.min - 1_704_067_200.0) % 900.0, 0.0);

        let s = nice_time_scale(t0, t0 + 5.0 * DAY, Some(utc));
        assert_eq!(s.increment, DAY);
        assert_eq!(s.min, 1_704_067_200.0);
        assert!(s.max >= t0 + 5.0 * DAY);
    }

    #[test]
    fn calendar_label_formats_by_span() {
        let cal = CalendarScaling::default();
        let scale = Scale::new(0.0, 365.0 * DAY, 30.0 * DAY);
        let fmt = |hi: f64| cal.label_format(&scale, Some((0.0, hi)), None);
        assert_eq!(fmt(12.0 * HOUR).as_deref(), Some("%X"));
        assert_eq!(fmt(7.0 * DAY).as_deref(), Some("%x %X"));
        assert_eq!(fmt(365.0 * DAY).as_deref(), Some("%x"));
        assert_eq!(cal.label_format(&scale, Some((0.0, DAY)), Some("%d")).as_deref(), Some("%d"));
    }

    #[test]
    fn calendar_format_follows_data_not_rounded_scale() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let cal = CalendarScaling::with_offset(utc);
        let t0 = 1_704_067_200.0 + 1800.0;
        let extent = Some((t0, t0 + 23.9 * HOUR));
        let scale = cal.resolve_scale(extent, &ScaleHint::default(), 10);
        assert!(scale.span() > DAY);
        assert_eq!(cal.label_format(&scale, extent, None).as_deref(), Some("%X"));
    }

    #[test]
    fn calendar_without_data_has_no_labels() {
        let cal = CalendarScaling::with_offset(FixedOffset::east_opt(0).unwrap());
        let scale = cal.resolve_scale(None, &ScaleHint::default(), 10);
        assert_eq!(scale, Scale::FALLBACK);
        let fmt = cal.label_format(&scale, None, None);
        assert_eq!(fmt, None);
        assert_eq!(cal.label(scale.min, fmt.as_deref()), "");
        assert_eq!(cal.label_format(&scale, None, Some("%H")).as_deref(), Some("%H"));
    }

    #[test]
    fn calendar_labels_use_offset() {
        let cal = CalendarScaling::with_offset(FixedOffset::east_opt(3600).unwrap());
        assert_eq!(cal.label(1_704_067_200.0, Some("%H:%M")), "01:00");
        assert_eq!(cal.label(1_704_067_200.0, None), "");
    }

    #[test]
    fn calendar_pinned_scale_is_used_verbatim() {
        let cal = CalendarScaling::default();
        let hint = ScaleHint::fixed(10.0, 20.0, 5.0);
        assert_eq!(cal.resolve_scale(Some((0.0, 1e9)), &hint, 10), Scale::new(10.0, 20.0, 5.0));
    }

    #[test]
    fn linear_without_data_falls_back() {
        let s = LinearScaling.resolve_scale(None, &ScaleHint::default(), 10);
        assert_eq!(s, Scale::FALLBACK);
    }

    #[test]
    fn partial_pins_without_data_do_not_invert() {
        let min_only = ScaleHint::new(Some(5.0), None, None);
        assert_eq!(LinearScaling.resolve_scale(None, &min_only, 10), Scale::FALLBACK);
        let max_only = ScaleHint::new(None, Some(-3.0), Some(1.0));
        assert_eq!(CalendarScaling::default().resolve_scale(None, &max_only, 10), Scale::FALLBACK);

        let pinned = ScaleHint::fixed(5.0, 9.0, 1.0);
        assert_eq!(LinearScaling.resolve_scale(None, &pinned, 10), Scale::new(5.0, 9.0, 1.0));
    }
}
