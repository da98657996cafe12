//! Server-rendered HTML pages: the intake form, the result page and the error page.

use api_shared::BirthDataReq;
use astrologic_core::synthesis::{planet_symbol, MahaboteChart, VedicChart, WesternChart};
use astrologic_core::{DisplaySection, ReadingOutcome, Synthesis};

const STYLE: &str = "\
body { font-family: system-ui, 'Noto Sans Myanmar', sans-serif; max-width: 860px; margin: 40px auto; padding: 20px; line-height: 1.7; background: #0f0c1d; color: #ece8ff; }
h1 { color: #f4d35e; margin-bottom: 4px; }
h2 { color: #c9b8ff; border-bottom: 1px solid #3a3260; padding-bottom: 4px; margin-top: 32px; }
form label { display: block; margin-top: 12px; }
input, select { width: 100%; padding: 8px; border-radius: 6px; border: 1px solid #3a3260; background: #1b1733; color: inherit; }
button { margin-top: 20px; padding: 10px 24px; border: 0; border-radius: 6px; background: #f4d35e; color: #0f0c1d; font-weight: 600; cursor: pointer; }
button:disabled { opacity: 0.5; cursor: wait; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 16px; }
.card { background: #1b1733; border-radius: 8px; padding: 16px; }
.card h3 { margin-top: 0; color: #f4d35e; }
.card dt { color: #a79fd0; font-size: 0.85em; }
.card dd { margin: 0 0 8px 0; }
.section { background: #1b1733; border-left: 4px solid #f4d35e; border-radius: 4px; padding: 12px 16px; margin: 16px 0; }
.section h3 { margin: 0 0 8px 0; }
.note { background: #2a2445; border-left: 4px solid #a79fd0; padding: 12px 16px; border-radius: 4px; }
.error { background: #4a1d2a; border-left: 4px solid #ff6b81; padding: 12px 16px; border-radius: 4px; }
";

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"my\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

/// Paragraphs split on blank lines; single line breaks kept.
fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let lines: Vec<String> = p.lines().map(|l| escape(l.trim())).collect();
            format!("<p>{}</p>\n", lines.join("<br>\n"))
        })
        .collect()
}

fn text_input(html: &mut String, name: &str, label: &str, kind: &str, value: &str, required: bool) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label>\n<input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{}\"{}>\n",
        escape(value),
        if required { " required" } else { "" }
    ));
}

/// The birth-data intake form, optionally pre-filled and with a validation message.
///
/// Submitting disables the button, so a second submission cannot start while one is in flight.
pub fn intake_page(prefill: Option<&BirthDataReq>, error: Option<&str>) -> String {
    let blank = BirthDataReq::default();
    let req = prefill.unwrap_or(&blank);

    let mut html = String::new();
    html.push_str("<h1>🔮 AstroLogic</h1>\n");
    html.push_str("<p>Western, Vedic and Burmese Mahabote astrology in one reading.</p>\n");

    if let Some(message) = error {
        html.push_str(&format!("<div class=\"error\">{}</div>\n", escape(message)));
    }

    html.push_str(
        "<form method=\"post\" action=\"/reading\" \
         onsubmit=\"var b = this.querySelector('button'); b.disabled = true; b.textContent = 'Reading the stars…';\">\n",
    );
    text_input(&mut html, "name", "Name", "text", req.name.as_deref().unwrap_or(""), false);

    let gender = req.gender.as_deref().unwrap_or("");
    html.push_str("<label for=\"gender\">Gender</label>\n<select id=\"gender\" name=\"gender\">\n");
    for option in ["", "Female", "Male", "Other"] {
        let shown = if option.is_empty() { "Prefer not to say" } else { option };
        let selected = if option == gender { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{option}\"{selected}>{shown}</option>\n"
        ));
    }
    html.push_str("</select>\n");

    text_input(&mut html, "dob", "Date of birth", "date", &req.dob, true);
    text_input(&mut html, "time", "Time of birth (24h)", "time", &req.time, true);
    text_input(&mut html, "city", "City of birth", "text", &req.city, true);
    html.push_str("<button type=\"submit\">Get my reading</button>\n</form>\n");

    page("AstroLogic", &html)
}

fn card_row(html: &mut String, term: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    html.push_str(&format!("<dt>{}</dt><dd>{}</dd>\n", escape(term), escape(value)));
}

fn western_card(html: &mut String, western: &WesternChart) {
    html.push_str("<div class=\"card\">\n<h3>☉ Western (Tropical)</h3>\n<dl>\n");
    for (planet, placement) in western.placements() {
        let term = match planet_symbol(planet) {
            Some(symbol) => format!("{symbol} {planet}"),
            None => planet.to_string(),
        };
        card_row(html, &term, placement);
    }
    card_row(html, "↑ Ascendant", &western.ascendant);
    if !western.dominant_aspects.is_empty() {
        card_row(html, "Aspects", &western.dominant_aspects.join(", "));
    }
    html.push_str("</dl>\n</div>\n");
}

fn vedic_card(html: &mut String, vedic: &VedicChart) {
    html.push_str("<div class=\"card\">\n<h3>☽ Vedic (Sidereal)</h3>\n<dl>\n");
    let nakshatra = if vedic.nakshatra_pada > 0 {
        format!("{} (pada {})", vedic.nakshatra, vedic.nakshatra_pada)
    } else {
        vedic.nakshatra.clone()
    };
    card_row(html, "Nakshatra", &nakshatra);
    card_row(html, "Nakshatra lord", &vedic.nakshatra_lord);
    card_row(html, "Mahadasha", &vedic.mahadasha);
    card_row(html, "Mahadasha ends", &vedic.mahadasha_ends);
    card_row(html, "Next dasha", &vedic.next_dasha);
    html.push_str("</dl>\n</div>\n");
}

fn mahabote_card(html: &mut String, mahabote: &MahaboteChart) {
    html.push_str("<div class=\"card\">\n<h3>🪷 Mahabote (မဟာဘုတ်)</h3>\n<dl>\n");
    card_row(
        html,
        "Birth day",
        &format!("{} {}", mahabote.birth_day, mahabote.birth_day_burmese)
            .trim()
            .to_string(),
    );
    card_row(html, "House", &mahabote.house_name);
    card_row(html, "Ruling planet", &mahabote.ruling_planet);
    if mahabote.be_year != 0 {
        card_row(html, "Burmese Era year", &mahabote.be_year.to_string());
    }
    card_row(html, "Nakshatra (Burmese)", &mahabote.nakshatra_burmese);
    if mahabote.has_valid_grid() {
        card_row(html, "Grid", &format!("{} of 7", mahabote.grid_number));
    }
    card_row(html, "Characteristics", &mahabote.characteristics);
    html.push_str("</dl>\n</div>\n");
}

fn reading_sections(html: &mut String, sections: &[DisplaySection]) {
    for section in sections {
        html.push_str("<div class=\"section\">\n");
        html.push_str(&format!(
            "<h3>{} {}</h3>\n",
            section.icon,
            escape(&section.title)
        ));
        html.push_str(&paragraphs(&section.content));
        html.push_str("</div>\n");
    }
}

/// Result page: the three tradition cards, then the reading or the no-reading note.
pub fn result_page(name: &str, synthesis: &Synthesis, outcome: &ReadingOutcome) -> String {
    let mut html = String::new();
    html.push_str(&format!("<h1>🔮 Reading for {}</h1>\n", escape(name)));

    html.push_str("<h2>Your charts</h2>\n<div class=\"cards\">\n");
    western_card(&mut html, &synthesis.western);
    vedic_card(&mut html, &synthesis.vedic);
    mahabote_card(&mut html, &synthesis.mahabote);
    html.push_str("</div>\n");

    html.push_str("<h2>Your reading</h2>\n");
    match outcome {
        ReadingOutcome::Sections(sections) => reading_sections(&mut html, sections),
        ReadingOutcome::Unavailable(note) => {
            html.push_str(&format!("<div class=\"note\">{}</div>\n", escape(note)));
        }
    }

    html.push_str("<p><a href=\"/\">← New reading</a></p>\n");
    page("AstroLogic reading", &html)
}

/// Error page for a failed submission.
pub fn error_page(message: &str) -> String {
    let mut html = String::new();
    html.push_str("<h1>🔮 AstroLogic</h1>\n");
    html.push_str(&format!(
        "<div class=\"error\">Something went wrong: {}</div>\n",
        escape(message)
    ));
    html.push_str("<p><a href=\"/\">← Try again</a></p>\n");
    page("AstroLogic error", &html)
}
