use super::chart::{chart_points, render_svg};
use super::{escape, layout};
use crate::domain::report::{GeneratedReport, Pillar, StrategyRecommendation};

fn recommendation_card(rec: &StrategyRecommendation, color: &str) -> String {
    format!(
        r#"<article class="card" style="border-left-color:{color}"><h4>{title}</h4><p>{description}</p><div class="meta"><span class="roi">ROI: {roi}</span><span>Impact: {impact} &middot; Effort: {complexity}</span></div></article>"#,
        title = escape(&rec.title),
        description = escape(&rec.description),
        roi = escape(&rec.roi_estimate),
        impact = rec.impact_score,
        complexity = rec.complexity_score,
    )
}

/// Read-only rendering of a validated report.
pub fn render_dashboard(generated: &GeneratedReport) -> String {
    let report = &generated.report;
    let mut body = String::new();

    body.push_str(&format!(
        r#"<section class="hero"><div><small>Strategic roadmap for {company} &middot; {date}</small><h2>AI Transformation Plan</h2><blockquote>&ldquo;{summary}&rdquo;</blockquote></div><form method="post" action="/reset"><button type="submit">New assessment</button></form></section>"#,
        company = escape(&generated.company),
        date = generated.generated_at.format("%Y-%m-%d"),
        summary = escape(&report.executive_summary),
    ));

    body.push_str(r#"<div class="grid">"#);
    body.push_str(&format!(
        r#"<section class="panel"><h3>Impact / Complexity Matrix</h3><p style="color:#64748b">Visual prioritization of initiatives</p>{}</section>"#,
        render_svg(&chart_points(report)),
    ));

    body.push_str(r#"<section class="panel dark"><h3>Execution Timeline</h3>"#);
    for step in &report.roadmap {
        body.push_str(&format!(
            r#"<div class="step"><h4>{phase} ({duration})</h4><ol>"#,
            phase = escape(&step.phase),
            duration = escape(&step.duration),
        ));
        for action in &step.actions {
            body.push_str(&format!("<li>{}</li>", escape(action)));
        }
        body.push_str("</ol></div>");
    }
    body.push_str("</section></div>");

    body.push_str(r#"<div class="grid">"#);
    for pillar in Pillar::ALL {
        body.push_str(&format!(
            r#"<section><h3 style="border-bottom:2px solid {color}">{label}</h3>"#,
            color = pillar.color(),
            label = pillar.label(),
        ));
        for rec in report.pillars.get(pillar) {
            body.push_str(&recommendation_card(rec, pillar.color()));
        }
        body.push_str("</section>");
    }
    body.push_str("</div>");

    body.push_str(r#"<section class="risks"><h3>Governance &amp; Risk Management</h3><ul class="grid" style="list-style:none;padding:0;margin-top:1rem">"#);
    for entry in &report.risks_and_mitigation {
        body.push_str(&format!(
            r#"<li class="risk"><strong>RISK:</strong> {risk}<br><strong>MITIGATION:</strong> {mitigation}</li>"#,
            risk = escape(&entry.risk),
            mitigation = escape(&entry.mitigation),
        ));
    }
    body.push_str("</ul></section>");

    layout("Strategy dashboard", &body)
}
