use super::engine::TeraEngine;
use crate::catalog::ShoeRecord;
use crate::config::{InfographicStyle, SearchOptions, StyleRule};
use crate::error::RenderError;
use serde_json::{Value, json};
use tera::Context;

const COMPARISON_TEMPLATE: &str = "\
Search for and compare the following {{ release_window }} latest flagship carbon-plated marathon racing shoes:
{% for product in products %}{{ loop.index }}. {{ product.name }}{% if product.note %} ({{ product.note }}){% endif %}
{% endfor %}
Special requirements:
- Product links: find the product page of each shoe on {{ retailer_name }} ({{ retailer_domain }}). \
If {{ retailer_name }} does not list the model or size, link to the {{ retailer_name }} search results page instead.
- Write all content in {{ language }}.

Return for each shoe:
- Brand and full model name
- Current price on {{ retailer_name }} ({{ currency }})
- Core performance features (in {{ language }})
- Weight (grams)
- Heel-to-toe drop
Finish with a professional comparison summary of all {{ products | length }} shoes.";

const INFOGRAPHIC_TEMPLATE: &str = "\
Create a professional data-driven performance comparison infographic for: {{ shoe_list }}.
VISUAL DESIGN RULES:
{% for rule in rules %}{{ loop.index }}. {{ rule.title }}: {{ rule.directive }}
{% endfor %}";

const COMPARISON_NAME: &str = "comparison";
const INFOGRAPHIC_NAME: &str = "infographic";

/// Renders both prompts from configuration data.
pub struct PromptBuilder {
    engine: TeraEngine,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, RenderError> {
        let mut engine = TeraEngine::new();
        engine.add_template(COMPARISON_NAME, COMPARISON_TEMPLATE)?;
        engine.add_template(INFOGRAPHIC_NAME, INFOGRAPHIC_TEMPLATE)?;
        Ok(Self { engine })
    }

    pub fn comparison_prompt(&self, options: &SearchOptions) -> Result<String, RenderError> {
        let mut ctx = Context::new();
        ctx.insert("release_window", &options.release_window);
        ctx.insert("products", &options.products);
        ctx.insert("retailer_name", &options.retailer_name);
        ctx.insert("retailer_domain", &options.retailer_domain);
        ctx.insert("currency", &options.currency);
        ctx.insert("language", &options.language);
        self.engine.render(COMPARISON_NAME, &ctx)
    }

    pub fn infographic_prompt(
        &self,
        shoes: &[ShoeRecord],
        style: &InfographicStyle,
    ) -> Result<String, RenderError> {
        let shoe_list = shoes
            .iter()
            .map(ShoeRecord::infographic_line)
            .collect::<Vec<_>>()
            .join(", ");

        let mut ctx = Context::new();
        ctx.insert("shoe_list", &shoe_list);
        ctx.insert("rules", &design_rules(style));
        self.engine.render(INFOGRAPHIC_NAME, &ctx)
    }
}

/// Structure, metrics and contrast rules derived from the style, followed by
/// the free-form rules in configured order.
fn design_rules(style: &InfographicStyle) -> Vec<StyleRule> {
    let mut rules = vec![StyleRule {
        title: "STRUCTURE".into(),
        directive: style.layout.clone(),
    }];

    if !style.metrics.is_empty() {
        rules.push(StyleRule {
            title: "METRICS".into(),
            directive: format!(
                "Display {} horizontal bar charts for EACH shoe comparing: {}.",
                style.metrics.len(),
                english_list(&style.metrics.iter().map(|m| format!("\"{m}\"")).collect::<Vec<_>>())
            ),
        });
    }

    if !style.brand_colors.is_empty() {
        let colors = style
            .brand_colors
            .iter()
            .map(|bc| format!("{} for {}", bc.color, bc.brand))
            .collect::<Vec<_>>()
            .join(", ");
        rules.push(StyleRule {
            title: "CONTRAST".into(),
            directive: format!("Use high-contrast colors to distinguish models ({colors})."),
        });
    }

    rules.extend(style.rules.iter().cloned());
    rules
}

/// `a`, `a and b`, `a, b, and c`.
fn english_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} and {b}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    }
}

/// JSON schema the comparison response must follow. `brand`, `model`,
/// `price` and `link` are mandatory per shoe.
pub fn comparison_response_schema(options: &SearchOptions) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "shoes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "brand": { "type": "STRING" },
                        "model": { "type": "STRING" },
                        "category": { "type": "STRING" },
                        "price": { "type": "STRING" },
                        "features": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "weight": { "type": "STRING" },
                        "drop": { "type": "STRING" },
                        "link": {
                            "type": "STRING",
                            "description": format!("Must be a link on {}", options.retailer_domain)
                        }
                    },
                    "required": ["brand", "model", "price", "link"]
                }
            },
            "summary": { "type": "STRING" }
        },
        "required": ["shoes", "summary"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrandColor;

    fn shoe(brand: &str, model: &str, weight: &str, drop: &str) -> ShoeRecord {
        ShoeRecord {
            brand: brand.into(),
            model: model.into(),
            category: None,
            price: String::new(),
            features: vec![],
            weight: weight.into(),
            drop: drop.into(),
            link: String::new(),
        }
    }

    #[test]
    fn comparison_prompt_names_every_product_and_retailer() {
        let builder = PromptBuilder::new().unwrap();
        let prompt = builder
            .comparison_prompt(&SearchOptions::default())
            .unwrap();

        assert!(prompt.contains("1. Adidas Adizero Adios Pro 4 (must be the latest fourth"));
        assert!(prompt.contains("2. Nike Alphafly 3\n"));
        assert!(prompt.contains("3. ASICS Metaspeed Sky Paris or Edge Paris"));
        assert!(prompt.contains("momo (momo.com.tw)"));
        assert!(prompt.contains("Traditional Chinese (zh-TW)"));
        assert!(prompt.contains("(TWD)"));
        assert!(prompt.contains("all 3 shoes"));
    }

    #[test]
    fn comparison_prompt_follows_configuration() {
        let builder = PromptBuilder::new().unwrap();
        let mut options = SearchOptions::default();
        options.products.truncate(1);
        options.retailer_name = "PChome".into();
        options.retailer_domain = "pchome.com.tw".into();
        options.language = "English".into();

        let prompt = builder.comparison_prompt(&options).unwrap();
        assert!(prompt.contains("PChome (pchome.com.tw)"));
        assert!(prompt.contains("Write all content in English."));
        assert!(!prompt.contains("Nike"));
        assert!(prompt.contains("all 1 shoes"));
    }

    #[test]
    fn infographic_prompt_lists_shoes_and_numbered_rules() {
        let builder = PromptBuilder::new().unwrap();
        let shoes = vec![
            shoe("Nike", "Alphafly 3", "198g", "8mm"),
            shoe("Adidas", "Adios Pro 4", "215g", "6.5mm"),
        ];
        let prompt = builder
            .infographic_prompt(&shoes, &InfographicStyle::default())
            .unwrap();

        assert!(prompt.contains(
            "for: Nike Alphafly 3 (Weight: 198g, Drop: 8mm), Adidas Adios Pro 4 (Weight: 215g, Drop: 6.5mm)."
        ));
        assert!(prompt.contains("1. STRUCTURE: A side-by-side technical comparison layout."));
        assert!(prompt.contains(
            "2. METRICS: Display 3 horizontal bar charts for EACH shoe comparing: \"Energy Return\", \"Cushioning\", and \"Stability\"."
        ));
        assert!(prompt.contains("3. CONTRAST: Use high-contrast colors to distinguish models (Neon Orange for Nike, Cyan Blue for Adidas, Acid Green for ASICS)."));
        assert!(prompt.contains("4. DATA LABELS:"));
        assert!(prompt.contains("7. SHOE GRAPHICS:"));
    }

    #[test]
    fn empty_metrics_and_colors_are_skipped() {
        let style = InfographicStyle {
            metrics: vec![],
            brand_colors: vec![],
            rules: vec![],
            ..InfographicStyle::default()
        };
        let rules = design_rules(&style);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].title, "STRUCTURE");

        let style = InfographicStyle {
            brand_colors: vec![BrandColor {
                brand: "Puma".into(),
                color: "Red".into(),
            }],
            ..style
        };
        assert_eq!(design_rules(&style)[1].title, "CONTRAST");
    }

    #[test]
    fn english_list_joins_naturally() {
        let items = |v: &[&str]| v.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        assert_eq!(english_list(&items(&[])), "");
        assert_eq!(english_list(&items(&["a"])), "a");
        assert_eq!(english_list(&items(&["a", "b"])), "a and b");
        assert_eq!(english_list(&items(&["a", "b", "c"])), "a, b, and c");
    }

    #[test]
    fn schema_requires_mandatory_fields() {
        let schema = comparison_response_schema(&SearchOptions::default());
        assert_eq!(
            schema["properties"]["shoes"]["items"]["required"],
            json!(["brand", "model", "price", "link"])
        );
        assert_eq!(schema["required"], json!(["shoes", "summary"]));
        assert!(
            schema["properties"]["shoes"]["items"]["properties"]["link"]["description"]
                .as_str()
                .unwrap()
                .contains("momo.com.tw")
        );
    }
}
