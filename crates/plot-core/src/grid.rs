// File: crates/plot-core/src/grid.rs
// Summary: Gridline positions along a resolved scale.

use crate::scale::Scale;

/// Tick values `min, min + inc, ...` up to and including `max`.
pub fn ticks(scale: &Scale) -> Vec<f64> {
    if scale.increment.is_nan() || scale.increment <= 0.0 || !scale.span().is_finite() || scale.span() < 0.0 {
        return vec![scale.min];
    }
    // Half a step of slack absorbs float drift at the top end.
    let n = (scale.span() / scale.increment + 1.5) as usize;
    (0..n).map(|i| scale.min + scale.increment * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_both_ends() {
        let t = ticks(&Scale::new(0.0, 1.0, 0.2));
        assert_eq!(t.len(), 6);
        assert_eq!(t[0], 0.0);
        assert!((t[5] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_increment_yields_single_tick() {
        assert_eq!(ticks(&Scale::new(3.0, 9.0, 0.0)), vec![3.0]);
    }
}
