//! Server-rendered pages: the profile form and the strategy dashboard.

pub mod chart;
pub mod dashboard;
pub mod form;

pub use chart::chart_points;
pub use dashboard::render_dashboard;
pub use form::render_form;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f8fafc; color: #0f172a; }
nav { background: #fff; border-bottom: 1px solid #f1f5f9; padding: 1rem 2rem; display: flex; justify-content: space-between; }
nav form { margin: 0; }
nav .brand { border: 0; background: none; padding: 0; cursor: pointer; color: #0f172a; font: inherit; font-size: 1.1rem; font-weight: 700; }
nav .brand span { color: #4f46e5; font-weight: 500; }
.values { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1.5rem; margin-top: 3rem; opacity: .6; }
.values div { border: 1px solid #e2e8f0; border-radius: 1rem; padding: 1.5rem; text-align: center; }
.values p { font-size: .75rem; color: #64748b; }
main { max-width: 72rem; margin: 0 auto; padding: 3rem 1rem; }
footer { text-align: center; color: #94a3b8; font-size: .7rem; text-transform: uppercase; letter-spacing: .1em; padding: 2rem; }
.banner { background: #fef2f2; border: 1px solid #fee2e2; color: #dc2626; padding: 1.5rem; border-radius: 1rem; margin-bottom: 2rem; }
.notice { background: #eef2ff; color: #3730a3; padding: 1.5rem; border-radius: 1rem; margin-bottom: 2rem; }
form.profile { background: #fff; padding: 2.5rem; border-radius: 1.5rem; box-shadow: 0 20px 40px rgba(148,163,184,.25); display: grid; gap: 2rem; }
.row { display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); gap: 2rem; }
label.caption { display: block; font-size: .75rem; font-weight: 700; color: #94a3b8; text-transform: uppercase; letter-spacing: .1em; margin-bottom: .5rem; }
input[type=text], textarea { width: 100%; box-sizing: border-box; padding: 1rem; border: 2px solid #f1f5f9; border-radius: 1rem; background: #f8fafc; }
textarea { height: 8rem; }
.choices { display: flex; flex-wrap: wrap; gap: .75rem; justify-content: center; }
.choice { border: 2px solid #f1f5f9; border-radius: .75rem; padding: .5rem 1.5rem; cursor: pointer; }
.goal { border-left-width: 6px; }
button.primary { padding: 1.25rem; border: 0; border-radius: 1rem; background: #4f46e5; color: #fff; font-size: 1.25rem; font-weight: 900; cursor: pointer; }
button.primary:disabled { background: #cbd5e1; cursor: wait; }
.hero { background: #312e81; color: #fff; padding: 2.5rem; border-radius: 1.5rem; display: flex; justify-content: space-between; gap: 2rem; align-items: flex-end; }
.hero blockquote { font-style: italic; border-left: 2px solid #818cf8; padding-left: 1rem; margin: 0; }
.hero button { padding: .75rem 1.5rem; border: 0; border-radius: .75rem; background: #fff; color: #312e81; font-weight: 700; cursor: pointer; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(20rem, 1fr)); gap: 2rem; margin-top: 3rem; }
.panel { background: #fff; padding: 2rem; border-radius: 1.5rem; border: 1px solid #f1f5f9; }
.panel.dark { background: #0f172a; color: #fff; }
.step { border-left: 2px solid #6366f1; padding-left: 1.5rem; margin-bottom: 1.5rem; }
.step h4 { color: #a5b4fc; text-transform: uppercase; font-size: .75rem; margin: 0 0 .5rem; }
.card { background: #fff; padding: 1.25rem; border-radius: .75rem; border-left: 4px solid; margin-bottom: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.06); }
.card .meta { display: flex; justify-content: space-between; font-size: .75rem; font-weight: 600; text-transform: uppercase; color: #94a3b8; }
.card .roi { color: #4f46e5; background: #eef2ff; padding: .25rem .5rem; border-radius: .25rem; }
.risks { background: #fef2f2; padding: 2rem; border-radius: 1.5rem; margin-top: 3rem; }
.risk { background: #fff; padding: 1.25rem; border-radius: .75rem; border: 1px solid #fecaca; }
svg.matrix { width: 100%; height: auto; }
svg .tick { font-size: 10px; fill: #94a3b8; }
svg .axis { font-size: 12px; fill: #475569; }
svg .point-label { font-size: 11px; fill: #475569; font-weight: 700; }
"#;

/// Wraps a page body in the shared document chrome.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | StratAI Suite</title>
<style>{STYLE}</style>
</head>
<body>
<nav><form method="post" action="/reset"><button class="brand" type="submit">StratAI <span>Suite</span></button></form></nav>
<main>
{body}
</main>
<footer>StratAI Executive Suite</footer>
</body>
</html>"#,
        title = escape(title),
    )
}
