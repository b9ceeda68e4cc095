//! Descriptive charts over the persisted CSV.
//!
//! Both renderers re-read the sink file and coerce cells to numbers
//! themselves; a cell that does not parse counts as missing, and rows missing
//! any field a chart needs are skipped. The CSV itself is never modified.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::{Path, PathBuf};

const TIMELINE_FILE: &str = "charge_timeline.png";
const SCATTER_FILE: &str = "temperature_vs_charge_rate.png";
const BACKGROUND: RGBColor = RGBColor(13, 17, 23);

/// One CSV row with every chart-relevant cell coerced to a number.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRow {
    pub date: Option<NaiveDate>,
    pub estimated_start: Option<f64>,
    pub end_soc: Option<f64>,
    pub speed: Option<f64>,
    pub minutes: Option<f64>,
    pub max_speed: Option<f64>,
    pub temperature: Option<f64>,
}

/// A timeline entry with every plottable quantity present; rows that cannot
/// produce one are excluded from the bar chart. Minutes and max speed only
/// feed the annotation text, so they stay optional.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBar {
    pub date: Option<NaiveDate>,
    pub start: f64,
    pub end: f64,
    pub speed: f64,
    pub minutes: Option<f64>,
    pub max_speed: Option<f64>,
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub temperature: f64,
    pub speed: f64,
    pub minutes: f64,
}

/// Read the sink CSV and coerce the chart columns. Unparsable cells become
/// `None` rather than errors.
pub fn load_plot_rows(csv_path: &Path) -> Result<Vec<PlotRow>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("open {}", csv_path.display()))?;
    let headers = reader.headers().context("read CSV header")?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let date_col = column("Date");
    let start_col = column("Estimated Starting Charge");
    let end_col = column("End State of Charge");
    let speed_col = column("Effective Charging Speed");
    let minutes_col = column("Minutes Charging");
    let max_col = column("Max Charging Speed");
    let temp_col = column("Average Temperature (°C)");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("read CSV row")?;
        let cell = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .and_then(|s| s.trim().parse::<f64>().ok())
        };
        rows.push(PlotRow {
            date: date_col
                .and_then(|i| record.get(i))
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y").ok()),
            estimated_start: cell(start_col),
            end_soc: cell(end_col),
            speed: cell(speed_col),
            minutes: cell(minutes_col),
            max_speed: cell(max_col),
            temperature: cell(temp_col),
        });
    }
    Ok(rows)
}

/// Timeline entries in date-ascending order. Rows missing the estimated
/// start, end state of charge, speed, or temperature are skipped; undated
/// rows sort last.
pub fn timeline_bars(rows: &[PlotRow]) -> Vec<TimelineBar> {
    let mut bars: Vec<TimelineBar> = rows
        .iter()
        .filter_map(|row| {
            Some(TimelineBar {
                date: row.date,
                start: row.estimated_start?,
                end: row.end_soc?,
                speed: row.speed?,
                minutes: row.minutes,
                max_speed: row.max_speed,
                temperature: row.temperature?,
            })
        })
        .collect();
    bars.sort_by_key(|bar| (bar.date.is_none(), bar.date));
    bars
}

/// Scatter points; rows missing speed, minutes, or temperature are skipped.
pub fn scatter_points(rows: &[PlotRow]) -> Vec<ScatterPoint> {
    rows.iter()
        .filter_map(|row| {
            Some(ScatterPoint {
                temperature: row.temperature?,
                speed: row.speed?,
                minutes: row.minutes?,
            })
        })
        .collect()
}

/// Diverging blue-white-red map over `[min, max]`, coolwarm endpoints.
/// A degenerate range maps everything to the midpoint.
pub fn diverging_color(value: f64, min: f64, max: f64) -> RGBColor {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let lerp = |a: u8, b: u8, f: f64| {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * f).round() as u8
    };
    if t < 0.5 {
        let f = t * 2.0;
        RGBColor(lerp(59, 221, f), lerp(76, 221, f), lerp(192, 221, f))
    } else {
        let f = (t - 0.5) * 2.0;
        RGBColor(lerp(221, 180, f), lerp(221, 4, f), lerp(221, 38, f))
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Render one horizontal bar per session, spanning estimated start to end
/// percentage, colored by outdoor temperature.
pub fn render_timeline(csv_path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let bars = timeline_bars(&load_plot_rows(csv_path)?);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create plot dir {}", out_dir.display()))?;
    let out_path = out_dir.join(TIMELINE_FILE);

    let (temp_min, temp_max) = value_range(bars.iter().map(|b| b.temperature));
    let n = bars.len().max(1);

    // The drawing objects borrow the output path; end their scope before the
    // path is returned.
    {
        let root = BitMapBackend::new(&out_path, (1200, 1200)).into_drawing_area();
        root.fill(&BACKGROUND)?;
        let (plot_area, legend_area) = root.split_horizontally(1100);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(30)
            .caption(
                "Electrify America Charging Sessions",
                ("sans-serif", 28).into_font().color(&WHITE),
            )
            .build_cartesian_2d(-12f64..112f64, 0f64..n as f64)?;

        let label_style = ("sans-serif", 13)
            .into_font()
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let start_style = label_style.pos(Pos::new(HPos::Right, VPos::Center));
        let end_style = label_style.pos(Pos::new(HPos::Left, VPos::Center));

        for (i, bar) in bars.iter().enumerate() {
            // Earliest session on top.
            let slot = (n - 1 - i) as f64;
            let color = diverging_color(bar.temperature, temp_min, temp_max);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(bar.start, slot + 0.15), (bar.end, slot + 0.85)],
                color.filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(bar.start, slot + 0.15), (bar.end, slot + 0.85)],
                BLACK.stroke_width(1),
            )))?;

            let mut annotation = match bar.minutes {
                Some(minutes) => format!("{:.0} min {:.0} kW", minutes, bar.speed),
                None => format!("{:.0} kW", bar.speed),
            };
            if let Some(max) = bar.max_speed {
                annotation.push_str(&format!(" (max {max:.0} kW)"));
            }
            chart.draw_series(std::iter::once(Text::new(
                annotation,
                ((bar.start + bar.end) / 2.0, slot + 0.5),
                label_style.clone(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("~{:.0}%", bar.start),
                (bar.start - 1.0, slot + 0.5),
                start_style.clone(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.0}%", bar.end),
                (bar.end + 1.0, slot + 0.5),
                end_style.clone(),
            )))?;
        }

        draw_color_legend(&legend_area, temp_min, temp_max, "Temp (°C)")?;

        root.present().context("write timeline chart")?;
    }

    println!("Plot saved to {}", out_path.display());
    Ok(out_path)
}

/// Render outdoor temperature against effective charging speed, colored by
/// minutes spent charging.
pub fn render_temperature_scatter(csv_path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let points = scatter_points(&load_plot_rows(csv_path)?);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create plot dir {}", out_dir.display()))?;
    let out_path = out_dir.join(SCATTER_FILE);

    let (temp_min, temp_max) = value_range(points.iter().map(|p| p.temperature));
    let (_, speed_max) = value_range(points.iter().map(|p| p.speed));
    let (min_min, min_max) = value_range(points.iter().map(|p| p.minutes));

    // Keep the axes sane when the data set is empty or a single point.
    let (x_lo, x_hi) = if temp_min.is_finite() {
        (temp_min - 2.0, temp_max + 2.0)
    } else {
        (0.0, 1.0)
    };
    let y_hi = if speed_max.is_finite() { speed_max * 1.1 } else { 1.0 };

    // Same scoping as the timeline: the backend borrows the output path.
    {
        let root = BitMapBackend::new(&out_path, (1000, 600)).into_drawing_area();
        root.fill(&BACKGROUND)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(30)
            .caption(
                "Temperature vs Effective Charge Rate",
                ("sans-serif", 24).into_font().color(&WHITE),
            )
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_lo..x_hi, 0f64..y_hi)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("Average Temperature (°C)")
            .y_desc("Effective Charging Speed (kW)")
            .axis_desc_style(("sans-serif", 16).into_font().color(&WHITE))
            .label_style(("sans-serif", 13).into_font().color(&WHITE))
            .axis_style(WHITE.mix(0.6))
            .draw()?;

        chart.draw_series(points.iter().map(|p| {
            Circle::new(
                (p.temperature, p.speed),
                5,
                diverging_color(p.minutes, min_min, min_max).filled(),
            )
        }))?;

        root.present().context("write scatter chart")?;
    }

    println!("Plot saved to {}", out_path.display());
    Ok(out_path)
}

/// Vertical gradient strip with min/max labels, standing in for a colorbar.
fn draw_color_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    min: f64,
    max: f64,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    if !min.is_finite() || !max.is_finite() {
        return Ok(());
    }
    let (width, height) = area.dim_in_pixel();
    let top = 80_i32;
    let bottom = height as i32 - 80;
    let x0 = 20_i32;
    let x1 = (width as i32 - 30).max(x0 + 10);

    let steps = (bottom - top).max(1);
    for step in 0..steps {
        // Max at the top of the strip.
        let value = max - (max - min) * f64::from(step) / f64::from(steps);
        area.draw(&Rectangle::new(
            [(x0, top + step), (x1, top + step + 1)],
            diverging_color(value, min, max).filled(),
        ))?;
    }

    let text = ("sans-serif", 14).into_font().color(&WHITE);
    area.draw(&Text::new(title.to_string(), (x0 - 10, top - 40), text.clone()))?;
    area.draw(&Text::new(format!("{max:.1}"), (x0, top - 20), text.clone()))?;
    area.draw(&Text::new(format!("{min:.1}"), (x0, bottom + 8), text))?;
    Ok(())
}
