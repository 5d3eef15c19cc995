// File: crates/plot-core/tests/autoscale.rs
// Purpose: Validate scale resolution over mixed series kinds.

use wxplot_core::{Chart, PlotLine, PlotOptions, Scale, ScaleHint, Vector2};

fn xs(v: &[f64]) -> Vec<Option<f64>> {
    v.iter().copied().map(Some).collect()
}

#[test]
fn bar_series_extends_x_minimum_by_first_width() {
    let mut chart = Chart::new(PlotOptions::default());
    chart
        .add_line(PlotLine::bar(xs(&[0.0, 10.0, 20.0]), xs(&[1.0, 4.0, 2.0]), vec![5.0; 3]))
        .expect("valid bar");
    let rendered = chart.render().expect("render");
    assert_eq!(rendered.x_scale.min, -5.0);
    assert!(rendered.x_scale.max >= 20.0);
}

#[test]
fn vector_magnitudes_set_symmetric_y_range() {
    let mut chart = Chart::new(PlotOptions::default());
    chart
        .add_line(PlotLine::vector(
            xs(&[0.0, 1.0, 2.0]),
            vec![Some(Vector2::new(3.0, 4.0)), None, Some(Vector2::new(-1.0, 0.0))],
        ))
        .expect("valid vector");
    let rendered = chart.render().expect("render");
    assert!(rendered.y_scale.min <= -5.0 && rendered.y_scale.max >= 5.0);
    assert_eq!(rendered.y_scale.min, -rendered.y_scale.max);
}

#[test]
fn mixed_series_cover_union_of_extents() {
    let mut chart = Chart::new(PlotOptions::default());
    chart.add_line(PlotLine::from_xy(&[(0.0, 1.0), (5.0, 3.0)])).expect("line");
    chart
        .add_line(PlotLine::line(xs(&[2.0, 3.0]), vec![Some(6.0), None]))
        .expect("line with gap");
    let rendered = chart.render().expect("render");
    assert!(rendered.x_scale.min <= 0.0 && rendered.x_scale.max >= 5.0);
    assert!(rendered.y_scale.min <= 1.0 && rendered.y_scale.max >= 6.0);
}

#[test]
fn pinned_components_are_kept() {
    let mut chart = Chart::new(PlotOptions::default());
    chart.add_line(PlotLine::from_xy(&[(0.0, 12.0), (10.0, 37.0)])).expect("line");
    chart.set_y_scale(ScaleHint::new(Some(0.0), None, None));
    chart.set_x_scale(ScaleHint::fixed(0.0, 20.0, 4.0));
    let rendered = chart.render().expect("render");
    assert_eq!(rendered.y_scale.min, 0.0);
    assert!(rendered.y_scale.max >= 37.0);
    assert_eq!(rendered.x_scale, Scale::new(0.0, 20.0, 4.0));
}
