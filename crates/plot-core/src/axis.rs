// File: crates/plot-core/src/axis.rs
// Summary: Axis label placement and tick-label formatting (printf-style numbers, strftime-style times).

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::TimeZone;
use serde::{Deserialize, Serialize};

/// Which side(s) of the chart carry Y labels (and the unit label).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    #[default]
    Left,
    Right,
    Both,
}

impl LabelSide {
    pub const fn left(self) -> bool {
        matches!(self, LabelSide::Left | LabelSide::Both)
    }

    pub const fn right(self) -> bool {
        matches!(self, LabelSide::Right | LabelSide::Both)
    }
}

/// Format `v` with a printf-like format. Each conversion takes the C form
/// `%[flags][width][.precision]conv` with flags from `-+ 0#` and conversions `f`, `e`, `d`
/// and `g`; `%%` is a literal percent. Unknown conversions are copied through unchanged.
pub fn format_value(fmt: &str, v: f64) -> String {
    let mut out = String::with_capacity(fmt.len() + 8);
    let mut chars = fmt.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut spec = Conversion::default();
        let mut raw = String::from("%");
        while let Some(f) = chars.peek().copied().filter(|f| "-+ 0#".contains(*f)) {
            match f {
                '-' => spec.left = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '0' => spec.zero = true,
                _ => {}
            }
            raw.push(f);
            chars.next();
        }
        let width = take_digits(&mut chars, &mut raw);
        spec.width = width.parse().unwrap_or(0);
        if chars.peek() == Some(&'.') {
            raw.push('.');
            chars.next();
            spec.precision = Some(take_digits(&mut chars, &mut raw).parse().unwrap_or(0));
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(conv @ ('f' | 'F' | 'e' | 'E' | 'd' | 'i' | 'g' | 'G')) => spec.write(&mut out, conv, v),
            Some(other) => {
                out.push_str(&raw);
                out.push(other);
            }
            None => out.push_str(&raw),
        }
    }
    out
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, raw: &mut String) -> String {
    let mut digits = String::new();
    while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(d);
        chars.next();
    }
    raw.push_str(&digits);
    digits
}

/// Flags, width and precision of one printf conversion.
#[derive(Default)]
struct Conversion {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
}

impl Conversion {
    fn write(&self, out: &mut String, conv: char, v: f64) {
        let magnitude = v.abs();
        let mut body = String::new();
        let _ = match conv {
            'f' | 'F' => write!(body, "{:.*}", self.precision.unwrap_or(6), magnitude),
            'e' | 'E' => write!(body, "{}", c_exponent(magnitude, self.precision.unwrap_or(6), conv == 'E')),
            'd' | 'i' => write!(body, "{}", magnitude.trunc() as i64),
            _ => write!(body, "{magnitude}"),
        };
        let negative = v.is_sign_negative() && !v.is_nan() && (conv != 'd' && conv != 'i' || v <= -1.0);
        let sign = if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        };
        let len = sign.len() + body.chars().count();
        let pad = self.width.saturating_sub(len);
        if self.left {
            out.push_str(sign);
            out.push_str(&body);
            out.extend(std::iter::repeat(' ').take(pad));
        } else if self.zero && v.is_finite() {
            out.push_str(sign);
            out.extend(std::iter::repeat('0').take(pad));
            out.push_str(&body);
        } else {
            out.extend(std::iter::repeat(' ').take(pad));
            out.push_str(sign);
            out.push_str(&body);
        }
    }
}

/// `1.5e3` as C prints it: `1.500000e+03`.
fn c_exponent(magnitude: f64, precision: usize, upper: bool) -> String {
    let rust = format!("{magnitude:.precision$e}");
    let (mantissa, exp) = rust.split_once('e').unwrap_or((rust.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let e = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{e}{sign}{:02}", exp.abs())
}

/// Format an epoch timestamp with a strftime-style format in `tz`.
///
/// If the formatter rejects the format, it is retried with only the specifiers it can
/// encode, so a label is always produced.
pub fn format_time<Tz: TimeZone>(tz: &Tz, secs: i64, fmt: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(dt) = tz.timestamp_opt(secs, 0).earliest() else {
        return String::new();
    };
    let mut out = String::new();
    if write!(out, "{}", dt.format(fmt)).is_ok() {
        return out;
    }
    tracing::debug!(format = fmt, "time format rejected; retrying with encodable items");
    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).filter(|i| !matches!(i, Item::Error)).collect();
    out.clear();
    let _ = write!(out, "{}", dt.format_with_items(items.iter()));
    out
}
