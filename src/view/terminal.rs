//! Plain-terminal rendering of a [`PageModel`].

use super::model::{CardModel, ContentModel, InfographicPanel, PageModel};
use crate::ui::style as ui;
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────────────────────";

/// Render the whole page. `image_note` replaces the inline image, which a
/// terminal cannot show (for example the path the image was saved to).
pub fn render_page(page: &PageModel, image_note: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", ui::header(&page.title));
    let _ = writeln!(out, "{}", ui::dim(&page.tagline));
    let _ = writeln!(out, "{}", ui::cyan(&page.retailer_badge));
    let _ = writeln!(out, "{}", ui::dim(RULE));

    if page.busy {
        let _ = writeln!(out, "{}", ui::yellow(&page.trigger_label));
    }
    if let Some(hint) = &page.idle_hint {
        let _ = writeln!(out, "{}", ui::dim(hint));
    }
    if let Some(error) = &page.error {
        let _ = writeln!(out, "{}", ui::error(error));
    }
    if let Some(content) = &page.content {
        render_content(&mut out, content, image_note);
    }

    let _ = writeln!(out, "{}", ui::dim(RULE));
    let _ = writeln!(out, "{}", ui::dim(&page.footer_copyright));
    let _ = writeln!(out, "{}", ui::dim(&page.footer_disclaimer));
    out
}

fn render_content(out: &mut String, content: &ContentModel, image_note: Option<&str>) {
    for card in &content.cards {
        render_card(out, card);
    }

    render_infographic(out, &content.infographic, image_note);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", ui::header(&content.summary_title));
    let _ = writeln!(out, "{}", content.summary);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", ui::header(&content.sources_title));
    if let Some(none) = &content.no_sources {
        let _ = writeln!(out, "  {}", ui::dim(none));
    }
    for source in &content.sources {
        let _ = writeln!(
            out,
            "  {} {} {}",
            ui::accent(&source.ordinal),
            source.label,
            ui::url(&source.url)
        );
    }
    let _ = writeln!(out);
}

fn render_card(out: &mut String, card: &CardModel) {
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}  {}",
        ui::brand_badge(format!("[{}]", card.brand), card.tone),
        ui::value(&card.price)
    );
    match &card.category {
        Some(category) => {
            let _ = writeln!(out, "{} {}", ui::header(&card.model), ui::dim(category));
        }
        None => {
            let _ = writeln!(out, "{}", ui::header(&card.model));
        }
    }
    let _ = writeln!(
        out,
        "  {}: {}   {}: {}",
        ui::cyan(&card.weight_label),
        card.weight,
        ui::cyan(&card.drop_label),
        card.drop
    );
    if !card.features.is_empty() {
        let _ = writeln!(out, "  {}", ui::cyan(&card.highlights_label));
        for feature in &card.features {
            let _ = writeln!(out, "    {} {feature}", ui::accent("•"));
        }
    }
    let _ = writeln!(out, "  {} {}", card.link_label, ui::url(&card.link));
}

fn render_infographic(out: &mut String, panel: &InfographicPanel, image_note: Option<&str>) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", ui::header(&panel.title));
    let _ = writeln!(out, "{}", ui::dim(&panel.subtitle));
    match (&panel.placeholder, image_note) {
        (Some(placeholder), _) if panel.generating => {
            let _ = writeln!(out, "  {}", ui::yellow(placeholder));
        }
        (Some(placeholder), _) => {
            let _ = writeln!(out, "  {}", ui::dim(placeholder));
        }
        (None, Some(note)) => {
            let _ = writeln!(out, "  {}", ui::success(note));
        }
        (None, None) => {}
    }
}
