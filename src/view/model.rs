//! Render-ready projection of a [`ViewState`].
//!
//! Both renderers (terminal and HTML) read only this model, so what is shown
//! in each phase is decided in one place.

use super::state::{ImageSlot, ViewState};
use crate::catalog::{BrandTone, ShoeRecord, SourceLink, safe_link};
use crate::config::Config;
use serde::Serialize;

/// Locale and retailer wording the view needs besides the state itself.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub locale: String,
    pub retailer_name: String,
    pub product_names: Vec<String>,
}

impl ViewContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            locale: config.locale.clone(),
            retailer_name: config.search.retailer_name.clone(),
            product_names: config
                .search
                .products
                .iter()
                .map(|p| p.name.clone())
                .collect(),
        }
    }

    /// The fixed message shown when a comparison request fails.
    pub fn error_message(&self) -> String {
        t!("view.error", locale = self.locale.as_str()).into_owned()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageModel {
    pub lang: String,
    pub title: String,
    pub tagline: String,
    pub retailer_badge: String,
    pub trigger_label: String,
    pub trigger_enabled: bool,
    /// Busy indicator: loading and nothing to show yet.
    pub busy: bool,
    pub idle_hint: Option<String>,
    pub error: Option<String>,
    pub content: Option<ContentModel>,
    pub footer_copyright: String,
    pub footer_disclaimer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentModel {
    pub cards: Vec<CardModel>,
    pub infographic: InfographicPanel,
    pub summary_title: String,
    pub summary: String,
    pub sources_title: String,
    pub sources: Vec<SourceLink>,
    /// Shown instead of the list when there are no sources.
    pub no_sources: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardModel {
    pub brand: String,
    pub tone: BrandTone,
    pub price: String,
    pub model: String,
    pub category: Option<String>,
    pub weight_label: String,
    pub weight: String,
    pub drop_label: String,
    pub drop: String,
    pub highlights_label: String,
    pub features: Vec<String>,
    pub link: String,
    /// `link` when it is safe to render as an anchor.
    pub href: Option<String>,
    pub link_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfographicPanel {
    pub title: String,
    pub subtitle: String,
    /// `data:` URI of the image, when one is available.
    pub image_src: Option<String>,
    pub open_label: String,
    pub placeholder: Option<String>,
    /// Whether the placeholder stands for a request still in flight.
    pub generating: bool,
}

impl PageModel {
    pub fn build(state: &ViewState, ctx: &ViewContext) -> Self {
        let locale = ctx.locale.as_str();
        let retailer = ctx.retailer_name.as_str();
        let busy = state.is_loading() && state.result().is_none();

        let trigger_label = if state.is_loading() {
            t!("app.searching", locale = locale)
        } else {
            t!("app.search", locale = locale)
        };

        Self {
            lang: ctx.locale.clone(),
            title: t!("app.title", locale = locale).into_owned(),
            tagline: t!(
                "app.tagline",
                locale = locale,
                products = ctx.product_names.join(", ")
            )
            .into_owned(),
            retailer_badge: t!("app.retailer_badge", locale = locale, retailer = retailer)
                .into_owned(),
            trigger_label: trigger_label.into_owned(),
            trigger_enabled: state.trigger_enabled(),
            busy,
            idle_hint: matches!(state, ViewState::Idle)
                .then(|| t!("view.idle_hint", locale = locale).into_owned()),
            error: state.error_message().map(ToOwned::to_owned),
            content: state
                .result()
                .map(|result| ContentModel {
                    cards: result.shoes.iter().map(|s| card(s, ctx)).collect(),
                    infographic: infographic_panel(state.image_slot(), locale),
                    summary_title: t!("view.summary_title", locale = locale).into_owned(),
                    summary: result.summary.clone(),
                    sources_title: t!("view.sources_title", locale = locale, retailer = retailer)
                        .into_owned(),
                    sources: result.visible_sources(),
                    no_sources: result
                        .search_urls
                        .is_empty()
                        .then(|| t!("view.no_sources", locale = locale).into_owned()),
                }),
            footer_copyright: t!("app.footer_copyright", locale = locale).into_owned(),
            footer_disclaimer: t!("app.footer_disclaimer", locale = locale, retailer = retailer)
                .into_owned(),
        }
    }
}

fn card(shoe: &ShoeRecord, ctx: &ViewContext) -> CardModel {
    let locale = ctx.locale.as_str();
    CardModel {
        brand: shoe.brand.clone(),
        tone: shoe.brand_tone(),
        price: shoe.price.clone(),
        model: shoe.model.clone(),
        category: shoe.category.clone(),
        weight_label: t!("view.weight", locale = locale).into_owned(),
        weight: shoe.weight.clone(),
        drop_label: t!("view.drop", locale = locale).into_owned(),
        drop: shoe.drop.clone(),
        highlights_label: t!("view.highlights", locale = locale).into_owned(),
        features: shoe.features.clone(),
        link: shoe.link.clone(),
        href: safe_link(&shoe.link),
        link_label: t!("view.shop_link", locale = locale, retailer = &ctx.retailer_name)
            .into_owned(),
    }
}

fn infographic_panel(slot: ImageSlot<'_>, locale: &str) -> InfographicPanel {
    let (image_src, placeholder, generating) = match slot {
        ImageSlot::Image(image) => (Some(image.to_data_uri()), None, false),
        ImageSlot::Generating => (
            None,
            Some(t!("view.generating", locale = locale).into_owned()),
            true,
        ),
        ImageSlot::Unavailable | ImageSlot::Hidden => (
            None,
            Some(t!("view.unavailable", locale = locale).into_owned()),
            false,
        ),
    };

    InfographicPanel {
        title: t!("view.infographic_title", locale = locale).into_owned(),
        subtitle: t!("view.infographic_subtitle", locale = locale).into_owned(),
        image_src,
        open_label: t!("view.open_full", locale = locale).into_owned(),
        placeholder,
        generating,
    }
}
