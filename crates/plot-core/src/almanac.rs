// File: crates/plot-core/src/almanac.rs
// Summary: Sunrise/sunset transitions for day/night shading, computed with the sunrise equation.

use crate::types::Location;

/// Which half of the diurnal cycle a moment falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Day,
    Night,
}

impl Condition {
    pub fn flip(self) -> Self {
        match self {
            Condition::Day => Condition::Night,
            Condition::Night => Condition::Day,
        }
    }
}

/// Source of day/night transitions over a time range (unix seconds).
pub trait Almanac: std::fmt::Debug {
    /// The condition at `t0` and every transition strictly inside `(t0, t1)`, ascending.
    fn transitions(&self, location: Location, t0: f64, t1: f64) -> (Condition, Vec<f64>);
}

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const J2000: f64 = 2_451_545.0;
const SECS_PER_DAY: f64 = 86_400.0;
/// Apparent altitude of the sun's upper limb at rise/set, refraction included.
const HORIZON_DEG: f64 = -0.833;
const OBLIQUITY_DEG: f64 = 23.4397;

fn to_julian(unix: f64) -> f64 {
    unix / SECS_PER_DAY + UNIX_EPOCH_JD
}

fn to_unix(jd: f64) -> f64 {
    (jd - UNIX_EPOCH_JD) * SECS_PER_DAY
}

/// Solar events for one day.
#[derive(Clone, Copy, Debug, PartialEq)]
enum SolarDay {
    RiseSet { rise: f64, set: f64 },
    /// The sun never crosses the horizon; `transit` is local solar noon.
    Polar { transit: f64, condition: Condition },
}

/// Sunrise equation for day number `n` (days since J2000) at the given site.
fn solar_day(n: f64, loc: Location) -> SolarDay {
    let j_star = n - loc.longitude / 360.0;
    let m = (357.5291 + 0.985_600_28 * j_star).rem_euclid(360.0);
    let m_rad = m.to_radians();
    let c = 1.9148 * m_rad.sin() + 0.02 * (2.0 * m_rad).sin() + 0.0003 * (3.0 * m_rad).sin();
    let lambda = (m + c + 180.0 + 102.9372).rem_euclid(360.0).to_radians();
    let transit = J2000 + j_star + 0.0053 * m_rad.sin() - 0.0069 * (2.0 * lambda).sin();

    let sin_decl = lambda.sin() * OBLIQUITY_DEG.to_radians().sin();
    let cos_decl = sin_decl.asin().cos();
    let phi = loc.latitude.to_radians();
    let cos_w0 = (HORIZON_DEG.to_radians().sin() - phi.sin() * sin_decl) / (phi.cos() * cos_decl);

    if cos_w0 < -1.0 {
        SolarDay::Polar { transit: to_unix(transit), condition: Condition::Day }
    } else if cos_w0 > 1.0 || cos_w0.is_nan() {
        SolarDay::Polar { transit: to_unix(transit), condition: Condition::Night }
    } else {
        let half = cos_w0.acos().to_degrees() / 360.0;
        SolarDay::RiseSet { rise: to_unix(transit - half), set: to_unix(transit + half) }
    }
}

fn day_number(unix: f64) -> f64 {
    (to_julian(unix) - J2000 + 0.0008).ceil()
}

/// Almanac backed by the standard sunrise equation. Accurate to about a minute away from
/// the poles; at the edge of a polar period the switch is placed at solar noon.
#[derive(Clone, Copy, Debug, Default)]
pub struct SunAlmanac;

impl Almanac for SunAlmanac {
    fn transitions(&self, location: Location, t0: f64, t1: f64) -> (Condition, Vec<f64>) {
        let first_day = day_number(t0) - 2.0;
        let last_day = day_number(t1) + 1.0;

        let mut events: Vec<(f64, Condition)> = Vec::new();
        let mut state = Condition::Night;
        let mut n = first_day;
        while n <= last_day {
            match solar_day(n, location) {
                SolarDay::RiseSet { rise, set } => {
                    events.push((rise, Condition::Day));
                    events.push((set, Condition::Night));
                }
                SolarDay::Polar { transit, condition } => {
                    if n == first_day {
                        state = condition;
                    }
                    events.push((transit, condition));
                }
            }
            n += 1.0;
        }
        events.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut first = None;
        let mut out = Vec::new();
        for (t, cond) in events {
            if t > t0 && first.is_none() {
                first = Some(state);
            }
            if t >= t1 {
                break;
            }
            if cond != state {
                if t > t0 {
                    out.push(t);
                }
                state = cond;
            }
        }
        (first.unwrap_or(state), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2024-03-20 00:00:00 UTC.
    const EQUINOX: f64 = 1_710_892_800.0;
    /// 2024-06-21 00:00:00 UTC.
    const JUNE_SOLSTICE: f64 = 1_718_928_000.0;
    /// 2024-12-21 00:00:00 UTC.
    const DECEMBER_SOLSTICE: f64 = 1_734_739_200.0;

    fn hours(t: f64, base: f64) -> f64 {
        (t - base) / 3600.0
    }

    #[test]
    fn equator_at_equinox_has_twelve_hour_day() {
        let loc = Location { latitude: 0.0, longitude: 0.0 };
        let (first, ts) = SunAlmanac.transitions(loc, EQUINOX, EQUINOX + SECS_PER_DAY);
        assert_eq!(first, Condition::Night);
        assert_eq!(ts.len(), 2);
        let rise = hours(ts[0], EQUINOX);
        let set = hours(ts[1], EQUINOX);
        assert!((5.8..6.3).contains(&rise), "sunrise at {rise}h");
        assert!((17.9..18.4).contains(&set), "sunset at {set}h");
    }

    #[test]
    fn longitude_shifts_transitions() {
        let east = Location { latitude: 0.0, longitude: 90.0 };
        let (_, ts) = SunAlmanac.transitions(east, EQUINOX, EQUINOX + SECS_PER_DAY);
        // Local 06:00 at 90E is 00:00 UTC, local 18:00 is 12:00 UTC.
        let set = ts.iter().map(|&t| hours(t, EQUINOX)).find(|h| (11.5..12.5).contains(h));
        assert!(set.is_some(), "{ts:?}");
    }

    #[test]
    fn starting_in_daylight() {
        let loc = Location { latitude: 0.0, longitude: 0.0 };
        let noon = EQUINOX + 12.0 * 3600.0;
        let (first, ts) = SunAlmanac.transitions(loc, noon, noon + SECS_PER_DAY);
        assert_eq!(first, Condition::Day);
        assert_eq!(ts.len(), 2);
        assert!(ts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn polar_day_and_night() {
        let arctic = Location { latitude: 80.0, longitude: 15.0 };
        let (first, ts) = SunAlmanac.transitions(arctic, JUNE_SOLSTICE, JUNE_SOLSTICE + 3.0 * SECS_PER_DAY);
        assert_eq!(first, Condition::Day);
        assert!(ts.is_empty());

        let (first, ts) =
            SunAlmanac.transitions(arctic, DECEMBER_SOLSTICE, DECEMBER_SOLSTICE + 3.0 * SECS_PER_DAY);
        assert_eq!(first, Condition::Night);
        assert!(ts.is_empty());
    }

    #[test]
    fn week_has_fourteen_transitions() {
        let loc = Location { latitude: 45.5, longitude: -122.7 };
        let (_, ts) = SunAlmanac.transitions(loc, EQUINOX, EQUINOX + 7.0 * SECS_PER_DAY);
        assert_eq!(ts.len(), 14);
    }

    #[test]
    fn flip_alternates() {
        assert_eq!(Condition::Day.flip(), Condition::Night);
        assert_eq!(Condition::Night.flip().flip(), Condition::Night);
    }
}
