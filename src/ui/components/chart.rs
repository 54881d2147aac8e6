use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::series::GeneratedSeries;
use crate::ui::components::utils::split_horizontal;
use crate::ui::styles::{secondary_line, HIGH_COLOR, LOW_COLOR};

const X_AXIS_TITLE: &str = "Day";
const Y_AXIS_TITLE: &str = "Price";
const PRICE_TICKS: usize = 5;
const DAY_TICKS: usize = 6;

/// Which side of each sample a plot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSide {
    High,
    Low,
}

impl PriceSide {
    fn label(self) -> &'static str {
        match self {
            PriceSide::High => "High",
            PriceSide::Low => "Low",
        }
    }

    fn color(self) -> Color {
        match self {
            PriceSide::High => HIGH_COLOR,
            PriceSide::Low => LOW_COLOR,
        }
    }
}

/// `(day, price)` points for one side of the series.
pub fn scatter_points(series: &GeneratedSeries, side: PriceSide) -> Vec<(f64, f64)> {
    series
        .samples
        .iter()
        .map(|sample| {
            let price = match side {
                PriceSide::High => sample.high,
                PriceSide::Low => sample.low,
            };
            (sample.day as f64, price)
        })
        .collect()
}

/// X and Y bounds shared by both plots so high and low read on the same scale.
pub fn plot_bounds(series: &GeneratedSeries) -> ([f64; 2], [f64; 2]) {
    let x = [0.0, series.len().max(1) as f64 + 1.0];
    let y = match series.price_bounds() {
        Some((min, max)) => {
            let pad = ((max - min) * 0.05).max(0.5);
            [(min - pad).max(0.0), max + pad]
        }
        None => [0.0, 1.0],
    };
    (x, y)
}

/// Two scatter plots side by side: day vs. high and day vs. low.
pub fn render_series_charts(f: &mut Frame<'_>, area: Rect, series: Option<&GeneratedSeries>) {
    let Some(series) = series else {
        f.render_widget(
            Paragraph::new(vec![
                Line::from("No ticker selected"),
                secondary_line("Pick a ticker and press Enter to plot generated prices."),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Generated prices"),
            ),
            area,
        );
        return;
    };

    let columns = split_horizontal(
        area,
        &[Constraint::Percentage(50), Constraint::Percentage(50)],
    );
    render_scatter(f, columns[0], series, PriceSide::High);
    render_scatter(f, columns[1], series, PriceSide::Low);
}

fn render_scatter(f: &mut Frame<'_>, area: Rect, series: &GeneratedSeries, side: PriceSide) {
    let title = format!("{} — Daily {} (mock data)", series.ticker, side.label());
    let block = Block::default().borders(Borders::ALL).title(title);

    if series.is_empty() {
        f.render_widget(
            Paragraph::new("No points generated")
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let points = scatter_points(series, side);
    let (x_bounds, y_bounds) = plot_bounds(series);

    let dataset = Dataset::default()
        .name(side.label())
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(side.color()))
        .data(&points);

    let x_labels = day_ticks(series.len(), DAY_TICKS)
        .into_iter()
        .map(|day| Span::raw(day.to_string()))
        .collect::<Vec<_>>();
    let y_labels = compute_price_ticks(y_bounds[0], y_bounds[1], PRICE_TICKS)
        .into_iter()
        .map(|value| Span::raw(format!("{value:.2}")))
        .collect::<Vec<_>>();

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(X_AXIS_TITLE)
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Y_AXIS_TITLE)
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// Evenly spaced day labels from 1 to `len`, without duplicates.
fn day_ticks(len: usize, desired: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![1];
    }

    let desired = desired.max(2).min(len);
    let step = (len - 1) as f64 / (desired - 1) as f64;
    let mut ticks: Vec<usize> = (0..desired)
        .map(|i| 1 + (i as f64 * step).round() as usize)
        .collect();
    ticks.dedup();
    ticks
}

fn compute_price_ticks(min: f64, max: f64, desired: usize) -> Vec<f64> {
    let desired = desired.max(2);
    if !min.is_finite() || !max.is_finite() {
        return vec![0.0, 1.0];
    }

    let mut effective_min = min;
    let mut effective_max = max.max(effective_min + f64::EPSILON);

    if (effective_max - effective_min).abs() < 1e-6 {
        let span = if effective_min.abs() < 1.0 {
            1.0
        } else {
            effective_min.abs() * 0.05
        };
        effective_min -= span / 2.0;
        effective_max += span / 2.0;
    }

    let step = (effective_max - effective_min) / (desired as f64 - 1.0);
    (0..desired)
        .map(|i| effective_min + step * i as f64)
        .collect()
}
