use super::{escape, layout};
use crate::domain::profile::{CompanySize, ProfileDraft, StrategicGoal};

/// Outcome teasers shown under the form.
const VALUE_CARDS: [(&str, &str); 3] = [
    ("Efficiency", "Lower costs through intelligent automation."),
    ("Growth", "New products powered by AI capabilities."),
    ("Decision", "Real-time data support for the C-level."),
];

/// Profile form, pre-filled from the draft.
///
/// While a generation is in flight the submit button is disabled; `banner`
/// carries the last validation or generation message.
pub fn render_form(draft: &ProfileDraft, in_flight: bool, banner: Option<&str>) -> String {
    let mut body = String::from(
        r#"<section style="text-align:center;margin-bottom:3rem">
<h1 style="font-size:3rem;margin:0">Design your competitive <span style="color:#4f46e5">advantage</span></h1>
<p style="color:#64748b;font-size:1.1rem">Turn business objectives into an actionable artificial intelligence roadmap.</p>
</section>"#,
    );

    if let Some(message) = banner {
        body.push_str(&format!(
            r#"<div class="banner" role="alert">{}</div>"#,
            escape(message)
        ));
    }

    if in_flight {
        body.push_str(
            r#"<div class="notice" role="status"><strong>Generating roadmap</strong>. This usually takes less than ten seconds; reload the page to see the result.</div>"#,
        );
    }

    body.push_str(r#"<form class="profile" method="post" action="/strategy">"#);

    body.push_str(&format!(
        r#"<div class="row">
<div><label class="caption" for="name">Organization</label><input id="name" name="name" type="text" required placeholder="e.g. Goldman Sachs" value="{name}"></div>
<div><label class="caption" for="industry">Industry</label><input id="industry" name="industry" type="text" required placeholder="e.g. Pharmaceutical logistics" value="{industry}"></div>
</div>"#,
        name = escape(&draft.name),
        industry = escape(&draft.industry),
    ));

    body.push_str(r#"<fieldset style="border:0;padding:0"><label class="caption" style="text-align:center">Company size</label><div class="choices">"#);
    for size in CompanySize::ALL {
        let checked = if draft.size == Some(size) { " checked" } else { "" };
        body.push_str(&format!(
            r#"<label class="choice"><input type="radio" name="size" value="{value}"{checked}> {label}</label>"#,
            value = size.as_str(),
            label = size.label(),
        ));
    }
    body.push_str("</div></fieldset>");

    body.push_str(r#"<fieldset style="border:0;padding:0"><label class="caption" style="text-align:center">Strategic axes</label><div class="choices">"#);
    for goal in StrategicGoal::ALL {
        let checked = if draft.has_goal(goal) { " checked" } else { "" };
        body.push_str(&format!(
            r#"<label class="choice goal" style="border-left-color:{color}"><input type="checkbox" name="primaryGoals" value="{value}"{checked}> {label}</label>"#,
            color = goal.color(),
            value = goal.as_str(),
            label = goal.label(),
        ));
    }
    body.push_str("</div></fieldset>");

    body.push_str(&format!(
        r#"<div class="row">
<div><label class="caption" for="currentTechStack">Technology stack</label><textarea id="currentTechStack" name="currentTechStack" required placeholder="e.g. SAP, AWS, manual data silos...">{stack}</textarea></div>
<div><label class="caption" for="challenges">Pain points</label><textarea id="challenges" name="challenges" required placeholder="e.g. High operating costs, slow reporting...">{challenges}</textarea></div>
</div>"#,
        stack = escape(&draft.current_tech_stack),
        challenges = escape(&draft.challenges),
    ));

    let disabled = if in_flight { " disabled" } else { "" };
    body.push_str(&format!(
        r#"<button class="primary" type="submit"{disabled}>GENERATE EXECUTIVE STRATEGY</button></form>"#
    ));

    body.push_str(r#"<section class="values">"#);
    for (title, blurb) in VALUE_CARDS {
        body.push_str(&format!("<div><strong>{title}</strong><p>{blurb}</p></div>"));
    }
    body.push_str("</section>");

    layout("New assessment", &body)
}
