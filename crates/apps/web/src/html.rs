//! Markup for the intel panel and the detail modal.
//!
//! Every dataset string is escaped; only the fixed markup here is trusted.

use formats::{DetailDocument, DetailSection, IntelSummary, QuoteTone, SectionBody};

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

pub fn intel_panel_html(intel: &IntelSummary) -> String {
    let color = escape_html(&intel.accent);
    let status_class = match intel.status {
        formats::IntelStatus::Restricted => "locked",
        formats::IntelStatus::Open => "open",
    };
    format!(
        concat!(
            r#"<div class="intel-accent" style="background: {color}"></div>"#,
            r#"<div class="intel-inner">"#,
            r#"<div class="intel-header"><span class="intel-icon">{icon}</span>"#,
            r#"<span class="intel-designation">ZONE INTEL</span></div>"#,
            r#"<div class="intel-name" style="color: {color}">{name}</div>"#,
            r#"<div class="intel-type">{kind}</div>"#,
            r#"<div class="intel-sep" style="border-color: {color}"></div>"#,
            r#"<div class="intel-row"><span class="intel-label">CLEARANCE:</span>"#,
            r#"<span class="intel-value" style="color: {color}">{tier}</span></div>"#,
            r#"<div class="intel-tagline">"{tagline}"</div>"#,
            r#"<div class="intel-status {status_class}">{status}</div>"#,
            r#"</div>"#,
        ),
        color = color,
        icon = escape_html(&intel.icon),
        name = escape_html(&intel.name),
        kind = escape_html(&intel.kind),
        tier = escape_html(&intel.tier_label()),
        tagline = escape_html(&intel.tagline),
        status_class = status_class,
        status = intel.status.text(),
    )
}

pub fn detail_html(doc: &DetailDocument) -> String {
    let header = &doc.header;
    let mut html = String::new();
    html.push_str(r#"<div class="zone-detail-header">"#);
    html.push_str(&format!(
        r#"<div class="zone-detail-icon">{}</div><h2 class="zone-detail-title">{}</h2><p class="zone-detail-subtitle">{}</p>"#,
        escape_html(&header.icon),
        escape_html(&header.title),
        escape_html(&header.subtitle),
    ));
    if let Some(aliases) = &header.aliases {
        html.push_str(&format!(
            r#"<p class="zone-aliases">AKA: {}</p>"#,
            escape_html(aliases)
        ));
    }
    html.push_str("</div>");

    for section in &doc.sections {
        html.push_str(&section_html(section));
    }
    html
}

fn section_html(section: &DetailSection) -> String {
    let mut html = String::from(r#"<div class="zone-detail-section">"#);
    if let Some(title) = &section.title {
        html.push_str(&format!(
            r#"<h3 class="section-title">{}</h3>"#,
            escape_html(title)
        ));
    }

    match &section.body {
        SectionBody::Paragraphs(paragraphs) => {
            html.push_str(r#"<div class="section-content">"#);
            for p in paragraphs {
                html.push_str(&format!("<p>{}</p>", escape_html(p)));
            }
            html.push_str("</div>");
        }
        SectionBody::Items(items) => {
            html.push_str(r#"<div class="zone-functions">"#);
            for item in items {
                html.push_str(&format!(
                    r#"<div class="function-item">{}</div>"#,
                    escape_html(item)
                ));
            }
            html.push_str("</div>");
        }
        SectionBody::Labeled(pairs) => {
            html.push_str(r#"<div class="zone-functions">"#);
            for (label, text) in pairs {
                html.push_str(&format!(
                    r#"<div class="function-item"><strong class="tool-name">{}:</strong> {}</div>"#,
                    escape_html(label),
                    escape_html(text)
                ));
            }
            html.push_str("</div>");
        }
        SectionBody::Cards(cards) => {
            html.push_str(r#"<div class="faction-grid">"#);
            for card in cards {
                html.push_str(&format!(
                    r#"<div class="faction-item"><div class="faction-name">{}</div><div class="faction-essence">{}</div>"#,
                    escape_html(&card.title),
                    escape_html(&card.text)
                ));
                if let Some(note) = &card.note {
                    html.push_str(&format!(
                        r#"<div class="faction-homeland"><strong>Homeland:</strong> {}</div>"#,
                        escape_html(note)
                    ));
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
        }
        SectionBody::Quote { text, tone } => {
            let class = match tone {
                QuoteTone::Warning => "zone-quote warning",
                QuoteTone::Calm => "zone-quote calm",
            };
            html.push_str(&format!(
                r#"<div class="section-content"><p class="{class}">"{}"</p></div>"#,
                escape_html(text)
            ));
        }
        SectionBody::Layers(layers) => {
            html.push_str(r#"<div class="depth-layers">"#);
            for (i, layer) in layers.iter().enumerate() {
                // Deeper layers are drawn progressively more saturated.
                let i = i as f64;
                html.push_str(&format!(
                    concat!(
                        r#"<div class="depth-layer" style="background: rgba(255,0,85,{bg}); "#,
                        r#"border: 1px solid rgba(255,0,85,{border}); border-left: 3px solid rgba(255,0,85,{edge});">"#,
                        r#"<div class="depth-layer-head"><span class="depth-layer-name">{name}</span>"#,
                        r#"<span class="depth-layer-depth">{depth}</span></div>"#,
                        r#"<p class="depth-layer-text">{text}</p>"#,
                        r#"<p class="depth-layer-creatures">Inhabitants: {creatures}</p></div>"#,
                    ),
                    bg = 0.02 + i * 0.02,
                    border = 0.1 + i * 0.08,
                    edge = 0.3 + i * 0.15,
                    name = escape_html(&layer.name),
                    depth = escape_html(&layer.depth),
                    text = escape_html(&layer.description),
                    creatures = escape_html(&layer.creatures),
                ));
            }
            html.push_str("</div>");
        }
    }

    html.push_str("</div>");
    html
}
