//! Impact/complexity priority matrix.
//!
//! `chart_points` flattens the three pillars into one tagged dataset; the SVG
//! renderer only draws what it is given.

use serde::Serialize;

use super::escape;
use crate::domain::report::{AiStrategyReport, Pillar};

/// Point-area range, smallest to largest impact.
const SIZE_RANGE: (f64, f64) = (100.0, 500.0);

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 45.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub title: String,
    pub pillar: Pillar,
    /// x axis
    pub complexity_score: f64,
    /// y axis
    pub impact_score: f64,
    pub size: f64,
    pub color: &'static str,
}

/// Optimization first, then innovation, then decisions; each in reply order.
pub fn chart_points(report: &AiStrategyReport) -> Vec<ChartPoint> {
    report
        .pillars
        .iter()
        .map(|(pillar, rec)| ChartPoint {
            title: rec.title.clone(),
            pillar,
            complexity_score: rec.complexity_score,
            impact_score: rec.impact_score,
            size: point_size(rec.impact_score),
            color: pillar.color(),
        })
        .collect()
}

fn point_size(impact: f64) -> f64 {
    let (min, max) = SIZE_RANGE;
    min + impact.clamp(0.0, 100.0) * (max - min) / 100.0
}

fn plot_x(score: f64) -> f64 {
    MARGIN_LEFT + score.clamp(0.0, 100.0) / 100.0 * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
}

fn plot_y(score: f64) -> f64 {
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    MARGIN_TOP + (1.0 - score.clamp(0.0, 100.0) / 100.0) * plot_height
}

/// Scatter plot with both axes fixed to 0-100.
pub fn render_svg(points: &[ChartPoint]) -> String {
    let mut svg = format!(
        r#"<svg class="matrix" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Impact versus complexity">"#
    );

    for tick in (0..=100).step_by(25) {
        let t = f64::from(tick);
        svg.push_str(&format!(
            r##"<line x1="{x0}" y1="{y}" x2="{x1}" y2="{y}" stroke="#e2e8f0"/><text x="{lx}" y="{ly}" class="tick" text-anchor="end">{tick}%</text>"##,
            x0 = plot_x(0.0),
            x1 = plot_x(100.0),
            y = plot_y(t),
            lx = MARGIN_LEFT - 8.0,
            ly = plot_y(t) + 4.0,
        ));
        svg.push_str(&format!(
            r##"<line x1="{x}" y1="{y0}" x2="{x}" y2="{y1}" stroke="#e2e8f0"/><text x="{x}" y="{ly}" class="tick" text-anchor="middle">{tick}%</text>"##,
            x = plot_x(t),
            y0 = plot_y(0.0),
            y1 = plot_y(100.0),
            ly = plot_y(0.0) + 18.0,
        ));
    }

    svg.push_str(&format!(
        r#"<text x="{x}" y="{y}" class="axis" text-anchor="middle">Complexity</text>"#,
        x = plot_x(50.0),
        y = HEIGHT - 6.0,
    ));
    svg.push_str(&format!(
        r#"<text x="14" y="{y}" class="axis" text-anchor="middle" transform="rotate(-90 14 {y})">Impact</text>"#,
        y = plot_y(50.0),
    ));

    for point in points {
        let cx = plot_x(point.complexity_score);
        let cy = plot_y(point.impact_score);
        // size is an area, like a bubble chart's z axis
        let r = (point.size / std::f64::consts::PI).sqrt();
        let title = escape(&point.title);
        svg.push_str(&format!(
            r#"<g><circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{color}" fill-opacity="0.85"><title>{title} ({pillar}): impact {impact}, complexity {complexity}</title></circle><text x="{cx:.1}" y="{ly:.1}" class="point-label" text-anchor="middle">{title}</text></g>"#,
            color = point.color,
            pillar = point.pillar.label(),
            impact = point.impact_score,
            complexity = point.complexity_score,
            ly = cy - r - 4.0,
        ));
    }

    svg.push_str("</svg>");
    svg
}
