use crate::catalog::BrandTone;
use console::{Color, style};
use std::fmt::Display;

/// Green bold: confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: subtitles, secondary text, decorative lines
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: busy indicator, warnings
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Red bold: error banner
pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Green: prices, values
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: ordinals, bullet points
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan: field labels
pub fn cyan<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Cyan underlined: URLs, links
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}

fn tone_color(tone: BrandTone) -> Color {
    match tone {
        BrandTone::Nike => Color::Color256(208),
        BrandTone::Adidas => Color::Blue,
        BrandTone::Other => Color::Green,
    }
}

/// Bold brand badge in the brand's tone.
pub fn brand_badge<D: Display>(text: D, tone: BrandTone) -> String {
    style(text).fg(tone_color(tone)).bold().to_string()
}
