// File: crates/demo/src/main.rs
// Summary: Demo loads a weather archive CSV and renders temperature, wind and rain charts to PNGs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use wxplot_core::{theme, Chart, PlotLine, PlotOptions, Vector2};

#[derive(Parser, Debug)]
#[command(name = "wxplot-demo")]
#[command(about = "Render weather station charts from an archive CSV")]
struct Args {
    /// Archive CSV with a `dateTime` column (epoch seconds). Synthetic data when omitted.
    input: Option<PathBuf>,

    /// JSON file with plot options; unset keys keep their defaults.
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Theme preset, applied on top of the options file.
    #[arg(long)]
    theme: Option<String>,

    /// Output directory.
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Station latitude; enables day/night shading together with --longitude.
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

/// One archive record. Missing readings stay `None`.
#[derive(Clone, Debug, Default)]
struct Sample {
    time: f64,
    out_temp: Option<f64>,
    dewpoint: Option<f64>,
    wind_speed: Option<f64>,
    wind_dir: Option<f64>,
    rain: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut options = match &args.options {
        Some(p) => load_options(p)?,
        None => PlotOptions::default(),
    };
    if let Some(name) = &args.theme {
        options.theme = theme::find(name);
    }
    let location = args.latitude.zip(args.longitude);

    let samples = match &args.input {
        Some(p) => load_archive_csv(p).with_context(|| format!("failed to load CSV '{}'", p.display()))?,
        None => synthetic_day(),
    };
    if samples.is_empty() {
        anyhow::bail!("no samples loaded; check headers/delimiter.");
    }
    tracing::info!(samples = samples.len(), "loaded archive");

    let stem = args
        .input
        .as_deref()
        .and_then(Path::file_stem)
        .and_then(|s| s.to_str())
        .unwrap_or("synthetic")
        .to_string();

    let x: Vec<Option<f64>> = samples.iter().map(|s| Some(s.time)).collect();

    // 1) Temperature and dewpoint, shaded by day and night when the station is known
    let mut temp = Chart::time_series(chart_options(&options, location));
    temp.add_line(PlotLine::line(x.clone(), samples.iter().map(|s| s.out_temp).collect()).with_label("Temperature"))?;
    temp.add_line(
        PlotLine::line(x.clone(), samples.iter().map(|s| s.dewpoint).collect())
            .with_label("Dewpoint")
            .with_gap_fraction(0.01),
    )?;
    temp.set_unit_label("°C");
    if let Some((lat, lon)) = location {
        temp.set_location(lat, lon);
    }
    write_chart(&temp, &args.out_dir, &stem, "temp")?;

    // 2) Wind vectors
    let mut wind = Chart::time_series(chart_options(&options, None));
    let vectors = samples
        .iter()
        .map(|s| {
            let (speed, dir) = (s.wind_speed?, s.wind_dir?);
            let rad = dir.to_radians();
            Some(Vector2::new(speed * rad.sin(), speed * rad.cos()))
        })
        .collect();
    wind.add_line(PlotLine::vector(x.clone(), vectors).with_label("Wind"))?;
    wind.set_unit_label("m/s");
    write_chart(&wind, &args.out_dir, &stem, "wind")?;

    // 3) Rain bars, one bar per archive interval
    let mut rain = Chart::time_series(chart_options(&options, None));
    let interval = samples.windows(2).map(|w| w[1].time - w[0].time).fold(f64::INFINITY, f64::min);
    let interval = if interval.is_finite() { interval } else { 300.0 };
    rain.add_line(
        PlotLine::bar(x, samples.iter().map(|s| s.rain).collect(), vec![interval; samples.len()])
            .with_label("Rain"),
    )?;
    rain.set_unit_label("mm");
    write_chart(&rain, &args.out_dir, &stem, "rain")?;

    Ok(())
}

/// Options for one chart. Day/night shading needs a station location, so it is on exactly
/// when one is given.
fn chart_options(base: &PlotOptions, location: Option<(f64, f64)>) -> PlotOptions {
    let mut options = base.clone();
    options.daynight.show = location.is_some();
    options
}

fn load_options(path: &Path) -> Result<PlotOptions> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options {}", path.display()))
}

fn write_chart(chart: &Chart, out_dir: &Path, stem: &str, suffix: &str) -> Result<()> {
    let out = out_dir.join(format!("wx_{stem}_{suffix}.png"));
    let rendered = chart.render_to_png(&out).with_context(|| format!("rendering {}", out.display()))?;
    tracing::info!(
        path = %out.display(),
        x_scale = ?rendered.x_scale,
        y_scale = ?rendered.y_scale,
        rose = rendered.rose_drawn,
        "wrote chart"
    );
    Ok(())
}

/// Load a weewx-style archive export. Column names are matched case-insensitively.
fn load_archive_csv(path: &Path) -> Result<Vec<Sample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["datetime", "time", "timestamp"]).context("no dateTime column")?;
    let i_temp = idx(&["outtemp", "temperature", "temp"]);
    let i_dew = idx(&["dewpoint"]);
    let i_speed = idx(&["windspeed", "wind_speed"]);
    let i_dir = idx(&["winddir", "wind_dir"]);
    let i_rain = idx(&["rain"]);

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok());
        // Rows without a timestamp cannot be placed on the axis.
        let Some(time) = parse(Some(i_time)) else {
            tracing::warn!(row = ?rec.position().map(|p| p.line()), "skipping row without timestamp");
            continue;
        };
        out.push(Sample {
            time,
            out_temp: parse(i_temp),
            dewpoint: parse(i_dew),
            wind_speed: parse(i_speed),
            wind_dir: parse(i_dir),
            rain: parse(i_rain),
        });
    }
    Ok(out)
}

/// 24 hours of 5-minute samples ending now, with a short outage in the afternoon.
fn synthetic_day() -> Vec<Sample> {
    let end = chrono::Utc::now().timestamp() as f64;
    let start = end - 86_400.0;
    (0..288)
        .map(|i| {
            let t = start + i as f64 * 300.0;
            let phase = i as f64 / 288.0 * std::f64::consts::TAU;
            let outage = (200..212).contains(&i);
            Sample {
                time: t,
                out_temp: (!outage).then(|| 12.0 - 6.0 * phase.cos()),
                dewpoint: (!outage).then(|| 6.0 - 2.0 * (phase * 0.5).cos()),
                wind_speed: Some(3.0 + 2.0 * (phase * 3.0).sin().abs()),
                wind_dir: Some((180.0 + 90.0 * phase.sin()).rem_euclid(360.0)),
                rain: Some(if (150..170).contains(&i) { 0.2 } else { 0.0 }),
            }
        })
        .collect()
}
