//! Inline-SVG chart rendering.
//!
//! The whole dashboard is server-rendered markup; charts are small SVG
//! documents built with the same maud templates as the rest of the page.

use analytics::DailySentiment;
use maud::{html, Markup};
use redpulse_core::Thresholds;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 280.0;
const MARGIN_LEFT: f64 = 34.0;
const MARGIN_RIGHT: f64 = 12.0;
const MARGIN_TOP: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 28.0;

const HISTOGRAM_BINS: usize = 20;

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Map a sentiment value in [-1, 1] to an x pixel.
fn sentiment_x(value: f64) -> f64 {
    MARGIN_LEFT + (value + 1.0) / 2.0 * plot_width()
}

/// Sentiment score histogram with dashed markers at both thresholds.
pub fn histogram(scores: &[f64], thresholds: Thresholds) -> Markup {
    if scores.is_empty() {
        return notice("No data to plot");
    }

    let mut bins = [0usize; HISTOGRAM_BINS];
    for &score in scores {
        let normalized = (score.clamp(-1.0, 1.0) + 1.0) / 2.0;
        let index = ((normalized * HISTOGRAM_BINS as f64) as usize).min(HISTOGRAM_BINS - 1);
        bins[index] += 1;
    }
    let max_count = bins.iter().copied().max().unwrap_or(1).max(1);

    let bar_width = plot_width() / HISTOGRAM_BINS as f64;
    let baseline = MARGIN_TOP + plot_height();

    html! {
        svg class="chart histogram" viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) role="img" {
            @for (i, &count) in bins.iter().enumerate() {
                @let bar_height = plot_height() * count as f64 / max_count as f64;
                @let x = MARGIN_LEFT + i as f64 * bar_width;
                rect class="bar"
                    x=(format!("{:.1}", x + 1.0))
                    y=(format!("{:.1}", baseline - bar_height))
                    width=(format!("{:.1}", bar_width - 2.0))
                    height=(format!("{:.1}", bar_height)) {}
            }
            line class="axis"
                x1=(format!("{MARGIN_LEFT}")) y1=(format!("{baseline}"))
                x2=(format!("{:.1}", WIDTH - MARGIN_RIGHT)) y2=(format!("{baseline}")) {}
            line class="marker positive"
                x1=(format!("{:.1}", sentiment_x(thresholds.positive)))
                y1=(format!("{MARGIN_TOP}"))
                x2=(format!("{:.1}", sentiment_x(thresholds.positive)))
                y2=(format!("{baseline}"))
                stroke-dasharray="5 4" {}
            line class="marker negative"
                x1=(format!("{:.1}", sentiment_x(thresholds.negative)))
                y1=(format!("{MARGIN_TOP}"))
                x2=(format!("{:.1}", sentiment_x(thresholds.negative)))
                y2=(format!("{baseline}"))
                stroke-dasharray="5 4" {}
            text class="tick" x=(format!("{MARGIN_LEFT}")) y=(format!("{:.1}", HEIGHT - 8.0)) { "-1" }
            text class="tick" x=(format!("{:.1}", sentiment_x(0.0))) y=(format!("{:.1}", HEIGHT - 8.0)) { "0" }
            text class="tick" x=(format!("{:.1}", WIDTH - MARGIN_RIGHT - 10.0)) y=(format!("{:.1}", HEIGHT - 8.0)) { "1" }
        }
    }
}

/// Mean sentiment per day as a line chart, chronological input assumed.
pub fn line_chart(series: &[DailySentiment]) -> Markup {
    if series.is_empty() {
        return notice("No data to plot");
    }

    // y maps [-1, 1] onto the plot area, positive up
    let y_of = |score: f64| {
        MARGIN_TOP + (1.0 - (score.clamp(-1.0, 1.0) + 1.0) / 2.0) * plot_height()
    };
    let x_of = |i: usize| {
        if series.len() == 1 {
            MARGIN_LEFT + plot_width() / 2.0
        } else {
            MARGIN_LEFT + i as f64 / (series.len() - 1) as f64 * plot_width()
        }
    };

    let points: Vec<String> = series
        .iter()
        .enumerate()
        .map(|(i, day)| format!("{:.1},{:.1}", x_of(i), y_of(day.mean_score)))
        .collect();
    let zero_y = y_of(0.0);

    html! {
        svg class="chart line-chart" viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) role="img" {
            line class="axis zero"
                x1=(format!("{MARGIN_LEFT}")) y1=(format!("{zero_y:.1}"))
                x2=(format!("{:.1}", WIDTH - MARGIN_RIGHT)) y2=(format!("{zero_y:.1}")) {}
            @if series.len() > 1 {
                polyline class="series" fill="none" points=(points.join(" ")) {}
            }
            @for (i, day) in series.iter().enumerate() {
                circle class="point"
                    cx=(format!("{:.1}", x_of(i)))
                    cy=(format!("{:.1}", y_of(day.mean_score)))
                    r="3" {
                    title { (day.date) " : " (format!("{:.2}", day.mean_score)) }
                }
            }
            text class="tick" x=(format!("{MARGIN_LEFT}")) y=(format!("{:.1}", HEIGHT - 8.0)) {
                (series[0].date)
            }
            @if series.len() > 1 {
                text class="tick end" text-anchor="end"
                    x=(format!("{:.1}", WIDTH - MARGIN_RIGHT))
                    y=(format!("{:.1}", HEIGHT - 8.0)) {
                    (series[series.len() - 1].date)
                }
            }
        }
    }
}

/// Horizontal bar rows scaled against the largest value. Used for the
/// most-discussed posts and the hashtag counts.
pub fn bar_rows<'a>(items: impl IntoIterator<Item = (&'a str, u64)>) -> Markup {
    let items: Vec<(&str, u64)> = items.into_iter().collect();
    if items.is_empty() {
        return notice("No data to plot");
    }
    let max = items.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);

    html! {
        div class="bar-rows" {
            @for (label, value) in &items {
                div class="bar-row" {
                    span class="bar-row__label" title=(label) { (label) }
                    div class="bar-row__track" {
                        div class="bar-row__fill"
                            style=(format!("width: {:.1}%", *value as f64 / max as f64 * 100.0)) {}
                    }
                    span class="bar-row__value" { (value) }
                }
            }
        }
    }
}

pub fn notice(message: &str) -> Markup {
    html! {
        p class="notice" { (message) }
    }
}
