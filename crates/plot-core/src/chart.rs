// File: crates/plot-core/src/chart.rs
// Summary: Chart accumulation and the supersampled Skia raster rendering pipeline.

use std::path::Path;

use image::{ImageFormat, RgbImage};
use skia_safe as skia;

use crate::almanac::{Almanac, SunAlmanac};
use crate::color::Rgb;
use crate::daynight;
use crate::downsample::{read_rgba, reduce};
use crate::error::{PlotError, Result};
use crate::grid::ticks;
use crate::options::{FontSpec, PlotOptions};
use crate::rose::{draw_rose, RoseStyle};
use crate::scale::{CalendarScaling, LinearScaling, Scale, ScaleHint, ScalingStrategy};
use crate::scaled::{fill_paint, LineOptions, ScaledDraw};
use crate::series::{union, PlotKind, PlotLine, Series};
use crate::text::{baseline, draw_text, ink_size, text_width, FontBook, TextAnchor};
use crate::types::{Layout, Location};

/// A plot under construction: data, labels and caller-pinned scales.
///
/// Rendering never modifies the chart. Resolved scales and label formats come back on
/// [`RenderedChart`], so the same chart can be rendered any number of times.
#[derive(Debug)]
pub struct Chart {
    options: PlotOptions,
    series: Vec<Series>,
    x_hint: ScaleHint,
    y_hint: ScaleHint,
    bottom_label: String,
    unit_label: String,
    location: Option<Location>,
    x_scaling: Box<dyn ScalingStrategy>,
    almanac: Box<dyn Almanac>,
}

/// The output of one render.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    /// Final image at the requested size.
    pub image: RgbImage,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub x_label_format: Option<String>,
    pub y_label_format: Option<String>,
    /// Size of the supersampled canvas before reduction.
    pub canvas_size: (u32, u32),
    pub rose_drawn: bool,
}

impl RenderedChart {
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = std::io::Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Chart {
    /// A chart with a plain numeric X axis.
    pub fn new(options: PlotOptions) -> Self {
        Self::with_scaling(options, Box::new(LinearScaling))
    }

    /// A chart whose X values are unix timestamps, scaled and labelled in local time.
    pub fn time_series(options: PlotOptions) -> Self {
        Self::with_scaling(options, Box::new(CalendarScaling::local()))
    }

    fn with_scaling(options: PlotOptions, x_scaling: Box<dyn ScalingStrategy>) -> Self {
        Self {
            options,
            series: Vec::new(),
            x_hint: ScaleHint::default(),
            y_hint: ScaleHint::default(),
            bottom_label: String::new(),
            unit_label: String::new(),
            location: None,
            x_scaling,
            almanac: Box::new(SunAlmanac),
        }
    }

    pub fn with_x_scaling(mut self, scaling: impl ScalingStrategy + 'static) -> Self {
        self.x_scaling = Box::new(scaling);
        self
    }

    pub fn with_almanac(mut self, almanac: impl Almanac + 'static) -> Self {
        self.almanac = Box::new(almanac);
        self
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Validate and append a series. Rejected series leave the chart unchanged.
    pub fn add_line(&mut self, line: PlotLine) -> Result<()> {
        let series = Series::try_from(line)?;
        self.series.push(series);
        Ok(())
    }

    /// Pin any of the X scale's min, max or increment; unset parts are computed.
    pub fn set_x_scale(&mut self, hint: ScaleHint) {
        self.x_hint = hint;
    }

    pub fn set_y_scale(&mut self, hint: ScaleHint) {
        self.y_hint = hint;
    }

    pub fn set_location(&mut self, latitude: f64, longitude: f64) {
        self.location = Some(Location { latitude, longitude });
    }

    pub fn set_day_night(&mut self, show: bool, day: Rgb, night: Rgb, edge: Rgb) {
        let dn = &mut self.options.daynight;
        dn.show = show;
        dn.day_color = day;
        dn.night_color = night;
        dn.edge_color = edge;
    }

    pub fn set_bottom_label(&mut self, label: impl Into<String>) {
        self.bottom_label = label.into();
    }

    pub fn set_unit_label(&mut self, label: impl Into<String>) {
        self.unit_label = label.into();
    }

    fn x_extent(&self) -> Option<(f64, f64)> {
        self.series.iter().fold(None, |acc, s| union(acc, s.x_extent()))
    }

    fn y_extent(&self) -> Option<(f64, f64)> {
        self.series.iter().fold(None, |acc, s| union(acc, s.y_extent()))
    }

    fn series_color(&self, index: usize) -> Rgb {
        self.series[index].style.color.unwrap_or_else(|| self.options.theme.line_color(index))
    }

    fn load_font(&self, fonts: &mut FontBook, spec: &FontSpec, size: f32) -> Result<skia::Font> {
        let path = self.options.font_path(spec.path.as_deref());
        fonts.font(path.as_deref(), size)
    }

    /// Render to an in-memory RGB image of the configured size.
    #[tracing::instrument(skip(self), fields(series = self.series.len()))]
    pub fn render(&self) -> Result<RenderedChart> {
        let layout = Layout::new(&self.options);
        tracing::debug!(?layout, "layout");
        let theme = &self.options.theme;
        let mut fonts = FontBook::new();

        let mut surface = skia::surfaces::raster_n32_premul((layout.width, layout.height))
            .ok_or(PlotError::Surface { width: layout.width, height: layout.height })?;
        let canvas = surface.canvas();
        canvas.clear(skia::Color::from(theme.image_background));

        let area = layout.chart_rect();
        canvas.draw_rect(
            skia::Rect::from_ltrb(area.left as f32, area.top as f32, area.right as f32, area.bottom as f32),
            &fill_paint(theme.chart_background.into()),
        );

        self.draw_bottom_label(canvas, &layout, &mut fonts)?;
        self.draw_top_band(canvas, &layout, &mut fonts)?;

        let x_extent = self.x_extent();
        let x_scale = self.x_scaling.resolve_scale(x_extent, &self.x_hint, self.options.x_nticks);
        let y_extent = self.y_extent();
        if y_extent.is_none() {
            tracing::warn!("no valid Y data; using the default Y scale");
        }
        let y_scale = LinearScaling.resolve_scale(y_extent, &self.y_hint, self.options.y_nticks);
        let x_fmt = self.x_scaling.label_format(&x_scale, x_extent, self.options.x_label_format.as_deref());
        let y_fmt = LinearScaling.label_format(&y_scale, y_extent, self.options.y_label_format.as_deref());
        tracing::debug!(?x_scale, ?y_scale, ?x_fmt, ?y_fmt, "resolved scales");

        let sdraw = ScaledDraw::new(canvas, layout.plot_rect(), &x_scale, &y_scale);

        if self.options.daynight.show {
            match self.location {
                Some(loc) => self.draw_day_night(&sdraw, loc, &x_scale, &y_scale),
                None => tracing::warn!("day/night shading requested without a location; skipped"),
            }
        }

        self.draw_x_axis(&sdraw, &layout, &x_scale, &y_scale, x_fmt.as_deref(), &mut fonts)?;
        self.draw_y_axis(&sdraw, &layout, &x_scale, &y_scale, y_fmt.as_deref(), &mut fonts)?;
        let rose = self.draw_series(&sdraw, &layout, &x_scale, &y_scale);

        let rose_drawn = rose.is_some();
        if let Some(style) = rose {
            let spec = &self.options.rose.label_font;
            let spec = FontSpec {
                path: spec.path.clone().or_else(|| self.options.bottom_label_font.path.clone()),
                size: spec.size,
            };
            let font = self.load_font(&mut fonts, &spec, spec.size as f32)?;
            draw_rose(canvas, layout.rose_origin, &self.options.rose, &style, &font)?;
        }

        let rgba = read_rgba(&mut surface)?;
        let canvas_size = rgba.dimensions();
        let image = reduce(rgba, layout.aa);
        tracing::debug!(canvas = ?canvas_size, output = ?layout.output_size(), "render complete");

        Ok(RenderedChart {
            image,
            x_scale,
            y_scale,
            x_label_format: x_fmt,
            y_label_format: y_fmt,
            canvas_size,
            rose_drawn,
        })
    }

    /// Render and write a PNG to `path`, creating parent directories as needed.
    pub fn render_to_png(&self, path: impl AsRef<Path>) -> Result<RenderedChart> {
        let rendered = self.render()?;
        rendered.save_png(path)?;
        Ok(rendered)
    }

    /// Render and encode as PNG bytes.
    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        self.render()?.to_png_bytes()
    }

    fn draw_bottom_label(&self, canvas: &skia::Canvas, layout: &Layout, fonts: &mut FontBook) -> Result<()> {
        if self.bottom_label.is_empty() {
            return Ok(());
        }
        let font = self.load_font(fonts, &self.options.bottom_label_font, layout.bottom_font)?;
        let (w, h) = ink_size(&font, &self.bottom_label);
        let x = (layout.width as f32 - w) / 2.0;
        let top = layout.height as f32 - h - self.options.bottom_label_offset as f32;
        let y = baseline(&font, &self.bottom_label, top, TextAnchor::InkTop);
        draw_text(canvas, &self.bottom_label, (x, y), &font, self.options.theme.bottom_label.into());
        Ok(())
    }

    fn draw_top_band(&self, canvas: &skia::Canvas, layout: &Layout, fonts: &mut FontBook) -> Result<()> {
        let theme = &self.options.theme;
        canvas.draw_rect(
            skia::Rect::from_ltrb(0.0, 0.0, layout.width as f32, layout.top_band as f32),
            &fill_paint(theme.chart_background.into()),
        );

        if !self.unit_label.is_empty() {
            let font = self.load_font(fonts, &self.options.unit_label_font, layout.unit_font)?;
            let side = self.options.y_label_side;
            let mut origins = Vec::with_capacity(2);
            if side.left() {
                origins.push(layout.unit_label_origin.0);
            }
            if side.right() {
                origins.push((layout.width - layout.margins.right as i32 + 4) as f32);
            }
            let y = baseline(&font, &self.unit_label, layout.unit_label_origin.1, TextAnchor::Ascender);
            for x in origins {
                draw_text(canvas, &self.unit_label, (x, y), &font, theme.unit_label.into());
            }
        }

        if self.series.is_empty() {
            return Ok(());
        }
        let font = self.load_font(fonts, &self.options.top_label_font, layout.top_font)?;
        let legend: Vec<&str> = self.series.iter().map(|s| s.style.label.as_str()).collect();
        let mut x = (layout.width as f32 - text_width(&font, &legend.join(" "))) / 2.0;
        let y = baseline(&font, "", 0.0, TextAnchor::Ascender);
        for (i, label) in legend.iter().enumerate() {
            draw_text(canvas, label, (x, y), &font, self.series_color(i).into());
            x += text_width(&font, &format!("{label} "));
        }
        Ok(())
    }

    fn draw_day_night(&self, sdraw: &ScaledDraw<'_>, loc: Location, x: &Scale, y: &Scale) {
        let (first, transitions) = self.almanac.transitions(loc, x.min, x.max);
        tracing::debug!(?first, count = transitions.len(), "day/night transitions");
        let dn = &self.options.daynight;
        let plan = daynight::plan(first, &transitions, (x.min, x.max), loc.latitude, dn);
        daynight::draw(sdraw, &plan, y, dn.edge_color);
    }

    fn draw_x_axis(
        &self,
        sdraw: &ScaledDraw<'_>,
        layout: &Layout,
        x: &Scale,
        y: &Scale,
        format: Option<&str>,
        fonts: &mut FontBook,
    ) -> Result<()> {
        let font = self.load_font(fonts, &self.options.axis_label_font, layout.axis_font)?;
        let theme = &self.options.theme;
        let spacing = self.options.x_label_spacing.max(1);
        let top = (layout.height - layout.margins.bottom as i32 + 2) as f32;
        for (i, xv) in ticks(x).into_iter().enumerate() {
            sdraw.segment((xv, y.min), (xv, y.max), theme.gridline.into(), layout.aa as f32);
            if i % spacing != 0 {
                continue;
            }
            let label = self.x_scaling.label(xv, format);
            let w = text_width(&font, &label);
            let origin = (sdraw.map().x(xv) - w / 2.0, baseline(&font, &label, top, TextAnchor::Ascender));
            draw_text(sdraw.canvas(), &label, origin, &font, theme.axis_label.into());
        }
        Ok(())
    }

    fn draw_y_axis(
        &self,
        sdraw: &ScaledDraw<'_>,
        layout: &Layout,
        x: &Scale,
        y: &Scale,
        format: Option<&str>,
        fonts: &mut FontBook,
    ) -> Result<()> {
        let font = self.load_font(fonts, &self.options.axis_label_font, layout.axis_font)?;
        let theme = &self.options.theme;
        let side = self.options.y_label_side;
        let spacing = self.options.y_label_spacing.max(1);
        for (i, yv) in ticks(y).into_iter().enumerate() {
            sdraw.segment((x.min, yv), (x.max, yv), theme.gridline.into(), layout.aa as f32);
            if i % spacing != 0 {
                continue;
            }
            let label = LinearScaling.label(yv, format);
            let (w, h) = ink_size(&font, &label);
            let top = sdraw.map().y(yv) - h / 2.0;
            let base = baseline(&font, &label, top, TextAnchor::InkTop);
            if side.left() {
                let origin = (layout.margins.left as f32 - w - 2.0, base);
                draw_text(sdraw.canvas(), &label, origin, &font, theme.axis_label.into());
            }
            if side.right() {
                let origin = ((layout.width - layout.margins.right as i32 + 4) as f32, base);
                draw_text(sdraw.canvas(), &label, origin, &font, theme.axis_label.into());
            }
        }
        Ok(())
    }

    /// Draw every series, last-added first so the first series ends up on top. Returns the
    /// rose style when a vector series was drawn.
    fn draw_series(&self, sdraw: &ScaledDraw<'_>, layout: &Layout, x: &Scale, y: &Scale) -> Option<RoseStyle> {
        let theme = &self.options.theme;
        let aa = layout.aa as f32;
        let mut rose = None;

        for (i, series) in self.series.iter().enumerate().rev() {
            let color = self.series_color(i);
            let fill = series.style.fill_color.unwrap_or_else(|| theme.fill_color(i));
            let width = series.style.width.unwrap_or_else(|| theme.line_width(i)) as f32 * aa;
            let max_dx = series.style.gap_fraction.map(|f| f * x.span());

            match &series.kind {
                PlotKind::Line { y: ys, style, marker, marker_size } => {
                    let opts = LineOptions {
                        color: color.into(),
                        width,
                        style: *style,
                        marker: *marker,
                        marker_size: *marker_size as f32 * aa,
                        max_dx,
                    };
                    sdraw.line(&series.x, ys, &opts);
                }
                PlotKind::Bar { y: ys, widths } => {
                    for ((&xv, yv), &bw) in series.x.iter().zip(ys).zip(widths) {
                        let Some(yv) = *yv else { continue };
                        sdraw.rectangle((xv - bw, y.min), (xv, yv), Some(fill.into()), Some(color.into()));
                    }
                }
                PlotKind::Vector { y: vs, rotate } => {
                    for (&xv, v) in series.x.iter().zip(vs) {
                        let Some(v) = *v else { continue };
                        sdraw.vector(xv, v, *rotate, color.into(), width);
                    }
                    // The colour sticks to the first vector series drawn; the rotation follows the last.
                    let rose_color = rose
                        .map(|r: RoseStyle| r.color)
                        .unwrap_or_else(|| self.options.rose.color.unwrap_or(color));
                    rose = Some(RoseStyle { color: rose_color, label_color: theme.rose_label, rotation: *rotate });
                }
            }
        }
        rose
    }
}
