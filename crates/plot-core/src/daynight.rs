// File: crates/plot-core/src/daynight.rs
// Summary: Day/night background bands with faded edges around each sunrise and sunset.

use crate::almanac::Condition;
use crate::color::{fade, Rgb};
use crate::options::DayNightOptions;
use crate::scale::Scale;
use crate::scaled::ScaledDraw;

/// A vertical strip spanning the full Y range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub x0: f64,
    pub x1: f64,
    pub color: Rgb,
}

/// Everything to paint for one chart, in paint order: bands, fades, then edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayNightPlan {
    pub bands: Vec<Band>,
    pub fades: Vec<Band>,
    pub edges: Vec<f64>,
}

/// Width in X units of one fade step. Grows linearly from 120 at the equator to 420 at
/// the poles, so twilight looks longer at high latitudes.
pub fn fade_step(latitude: f64) -> f64 {
    120.0 + 300.0 * (1.0 - (90.0 - latitude.abs()) / 90.0)
}

fn condition_color(cond: Condition, opts: &DayNightOptions) -> Rgb {
    match cond {
        Condition::Day => opts.day_color,
        Condition::Night => opts.night_color,
    }
}

/// Lay out the bands for `transitions` over `x_range`, starting in condition `first`.
pub fn plan(
    first: Condition,
    transitions: &[f64],
    x_range: (f64, f64),
    latitude: f64,
    opts: &DayNightOptions,
) -> DayNightPlan {
    let (xmin, xmax) = x_range;

    let mut bands = Vec::with_capacity(transitions.len() + 1);
    let mut cond = first;
    let mut left = xmin;
    for &t in transitions {
        bands.push(Band { x0: left, x1: t, color: condition_color(cond, opts) });
        left = t;
        cond = cond.flip();
    }
    bands.push(Band { x0: left, x1: xmax, color: condition_color(cond, opts) });

    let mut fades = Vec::new();
    let nfade = opts.gradient;
    if nfade > 0 {
        let d = fade_step(latitude);
        // `from` is the condition being left at the current transition.
        let mut from = first;
        for (i, &t) in transitions.iter().enumerate() {
            let last = if i == 0 { xmin } else { transitions[i - 1] };
            let next = transitions.get(i + 1).copied().unwrap_or(xmax);
            let (c_from, c_to) = (condition_color(from, opts), condition_color(from.flip(), opts));
            for z in 1..nfade {
                let x0 = t - d * f64::from(nfade + 1) / 2.0 + d * f64::from(z);
                let x1 = x0 + d;
                if last < x0 && x1 < next {
                    let color = fade(c_to, c_from, f64::from(z) / f64::from(nfade));
                    fades.push(Band { x0, x1, color });
                }
            }
            from = from.flip();
        }
    }

    DayNightPlan { bands, fades, edges: transitions.to_vec() }
}

/// Paint a plan over the full height of `y`.
pub fn draw(sdraw: &ScaledDraw<'_>, plan: &DayNightPlan, y: &Scale, edge_color: Rgb) {
    for band in plan.bands.iter().chain(&plan.fades) {
        sdraw.rectangle((band.x0, y.min), (band.x1, y.max), Some(band.color.into()), None);
    }
    for &x in &plan.edges {
        sdraw.segment((x, y.min), (x, y.max), edge_color.into(), 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> DayNightOptions {
        DayNightOptions { show: true, ..Default::default() }
    }

    #[test]
    fn bands_alternate_from_first_condition() {
        let o = opts();
        let p = plan(Condition::Night, &[100.0, 200.0], (0.0, 300.0), 0.0, &o);
        let colors: Vec<Rgb> = p.bands.iter().map(|b| b.color).collect();
        assert_eq!(colors, vec![o.night_color, o.day_color, o.night_color]);
        assert_eq!((p.bands[0].x0, p.bands[2].x1), (0.0, 300.0));
        assert_eq!(p.edges, vec![100.0, 200.0]);
    }

    #[test]
    fn no_transitions_is_one_band() {
        let o = opts();
        let p = plan(Condition::Day, &[], (0.0, 86_400.0), 45.0, &o);
        assert_eq!(p.bands, vec![Band { x0: 0.0, x1: 86_400.0, color: o.day_color }]);
        assert!(p.fades.is_empty() && p.edges.is_empty());
    }

    #[test]
    fn fades_stay_between_neighbouring_transitions() {
        let o = DayNightOptions { gradient: 4, ..opts() };
        let ts = [100.0, 200.0];
        let p = plan(Condition::Day, &ts, (0.0, 300.0), 0.0, &o);
        for f in &p.fades {
            let owner = if (f.x0 + f.x1) / 2.0 < 150.0 { 0 } else { 1 };
            let last = if owner == 0 { 0.0 } else { ts[0] };
            let next = if owner == 0 { ts[1] } else { 300.0 };
            assert!(f.x0 > last && f.x1 < next, "{f:?}");
        }
    }

    #[test]
    fn fades_fill_wide_gaps_symmetrically() {
        let o = DayNightOptions { gradient: 20, ..opts() };
        let t = 43_200.0;
        let p = plan(Condition::Night, &[t], (0.0, 86_400.0), 0.0, &o);
        assert_eq!(p.fades.len(), 19);
        let first = p.fades.first().expect("fade");
        let last = p.fades.last().expect("fade");
        assert!((t - first.x0 - (last.x1 - t)).abs() < 1e-9);
        // Nearest the night side the strip is mostly night.
        let night = o.night_color;
        assert!(first.color.r.abs_diff(night.r) <= last.color.r.abs_diff(night.r));
    }

    #[test]
    fn zero_gradient_disables_fades() {
        let o = DayNightOptions { gradient: 0, ..opts() };
        let p = plan(Condition::Night, &[43_200.0], (0.0, 86_400.0), 0.0, &o);
        assert!(p.fades.is_empty());
    }

    #[test]
    fn fade_step_grows_toward_poles() {
        assert_eq!(fade_step(0.0), 120.0);
        assert_eq!(fade_step(-90.0), 420.0);
        assert!(fade_step(45.0) > fade_step(10.0));
    }
}
