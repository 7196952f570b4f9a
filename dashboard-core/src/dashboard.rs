//! Four-panel dashboard image.
//!
//! Layout is fixed: a bold title, a 2×2 grid of panels and a one-line footer
//! with the render time.

use std::{error::Error, path::Path};

use chrono::Utc;
use plotters::{
    coord::{Shift, ranged1d::SegmentValue},
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use tracing::{debug, info};

use crate::{
    error::{RenderError, describe_error},
    model::WeatherRecord,
};

const WIDTH: u32 = 1800;
const HEIGHT: u32 = 1400;
const FOOTER_HEIGHT: u32 = 40;
const FONT: &str = "sans-serif";

const COOLWARM: [RGBColor; 4] = [
    RGBColor(59, 76, 192),
    RGBColor(141, 176, 254),
    RGBColor(244, 154, 123),
    RGBColor(180, 4, 38),
];
const CREST: [RGBColor; 2] = [RGBColor(108, 168, 141), RGBColor(37, 82, 127)];
const MAGMA: [RGBColor; 2] = [RGBColor(140, 41, 129), RGBColor(251, 135, 97)];

#[derive(Debug, Clone, PartialEq)]
struct Bar {
    label: &'static str,
    value: f64,
}

#[derive(Debug, Clone)]
struct BarPanel {
    caption: &'static str,
    bars: Vec<Bar>,
    palette: &'static [RGBColor],
}

/// Render `record` as a PNG at `output_path`.
pub fn render(record: &WeatherRecord, output_path: &Path) -> Result<(), RenderError> {
    debug!(path = %output_path.display(), "Rendering dashboard");

    draw_dashboard(record, output_path).map_err(|e| {
        RenderError::new(output_path.display().to_string(), describe_error(e.as_ref()))
    })?;

    info!(path = %output_path.display(), "Dashboard written");
    Ok(())
}

fn draw_dashboard(record: &WeatherRecord, output_path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (main, footer) = root.split_vertically((HEIGHT - FOOTER_HEIGHT) as i32);
    let body = main.titled(&record.title(), (FONT, 48).into_font().style(FontStyle::Bold))?;

    let panels = body.split_evenly((2, 2));
    for (area, panel) in panels.iter().zip(bar_panels(record)) {
        draw_bar_panel(area, &panel)?;
    }
    draw_summary_panel(&panels[3], &summary_lines(record))?;

    let stamp = format!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    footer.draw(&Text::new(
        stamp,
        ((WIDTH - 20) as i32, (FOOTER_HEIGHT / 2) as i32),
        (FONT, 16)
            .into_font()
            .color(&BLACK.mix(0.6))
            .pos(Pos::new(HPos::Right, VPos::Center)),
    ))?;

    root.present()?;
    Ok(())
}

fn bar_panels(record: &WeatherRecord) -> [BarPanel; 3] {
    [
        BarPanel {
            caption: "Temperature Overview",
            bars: vec![
                Bar { label: "Temperature (°C)", value: record.temp_c },
                Bar { label: "Feels Like (°C)", value: record.feelslike_c },
                Bar { label: "Temperature (°F)", value: record.temp_f },
                Bar { label: "Feels Like (°F)", value: record.feelslike_f },
            ],
            palette: &COOLWARM,
        },
        BarPanel {
            caption: "Humidity & Wind Speed",
            bars: vec![
                Bar { label: "Humidity (%)", value: record.humidity },
                Bar { label: "Wind Speed (kph)", value: record.wind_kph },
            ],
            palette: &CREST,
        },
        BarPanel {
            caption: "Pressure & Visibility",
            bars: vec![
                Bar { label: "Pressure (mb)", value: record.pressure_mb },
                Bar { label: "Visibility (km)", value: record.vis_km },
            ],
            palette: &MAGMA,
        },
    ]
}

fn summary_lines(record: &WeatherRecord) -> [String; 3] {
    [
        format!("Condition: {}", record.condition_text),
        format!("Wind Direction: {}", record.wind_dir),
        format!("UV Index: {}", record.uv_index),
    ]
}

/// Y range covering zero and every value, with headroom for the value labels.
fn value_range(bars: &[Bar]) -> (f64, f64) {
    let (min, max) = bars
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), bar| (lo.min(bar.value), hi.max(bar.value)));

    let span = max - min;
    let pad = if span > f64::EPSILON { span * 0.15 } else { 1.0 };
    let lower = if min < 0.0 { min - pad } else { 0.0 };

    (lower, max + pad)
}

fn segment_index(x: &SegmentValue<u32>) -> Option<usize> {
    match x {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => Some(*i as usize),
        SegmentValue::Last => None,
    }
}

fn draw_bar_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &BarPanel,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let bars = &panel.bars;
    let (y_min, y_max) = value_range(bars);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.caption, (FONT, 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..bars.len() as u32).into_segmented(), y_min..y_max)?;

    let x_label = |x: &SegmentValue<u32>| {
        segment_index(x)
            .and_then(|i| bars.get(i))
            .map(|bar| bar.label.to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&x_label)
        .y_desc("Value")
        .label_style((FONT, 18))
        .axis_desc_style((FONT, 22))
        .draw()?;

    let palette = panel.palette;
    chart.draw_series(
        Histogram::vertical(&chart)
            .style_func(move |x, _| {
                let i = segment_index(x).unwrap_or(0);
                palette[i % palette.len()].filled()
            })
            .margin(40)
            .data(bars.iter().enumerate().map(|(i, bar)| (i as u32, bar.value))),
    )?;

    let label_style = TextStyle::from((FONT, 22).into_font());
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let anchor = if bar.value < 0.0 { VPos::Top } else { VPos::Bottom };
        Text::new(
            format!("{:.1}", bar.value),
            (SegmentValue::CenterOf(i as u32), bar.value),
            label_style.pos(Pos::new(HPos::Center, anchor)),
        )
    }))?;

    Ok(())
}

fn draw_summary_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    lines: &[String],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (width, height) = area.dim_in_pixel();
    let style = TextStyle::from((FONT, 40).into_font()).pos(Pos::new(HPos::Center, VPos::Center));

    // Evenly spaced top to bottom at 20%, 50%, 80% of the panel height.
    for (line, fraction) in lines.iter().zip([0.2, 0.5, 0.8]) {
        let y = (f64::from(height) * fraction) as i32;
        area.draw(&Text::new(line.as_str(), ((width / 2) as i32, y), style.clone()))?;
    }

    Ok(())
}
