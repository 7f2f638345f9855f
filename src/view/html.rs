//! Single-page HTML rendering of a [`PageModel`].

use super::model::PageModel;
use crate::error::RenderError;
use crate::prompt::TeraEngine;
use tera::Context;

const PAGE_NAME: &str = "page.html";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ page.lang }}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ page.title }}</title>
{% if not page.trigger_enabled %}<meta http-equiv="refresh" content="2">{% endif %}
<style>
body { margin: 0; font-family: system-ui, sans-serif; background: #0f172a; color: #e2e8f0; }
header, main, footer { max-width: 1100px; margin: 0 auto; padding: 1.5rem; }
.badge { display: inline-block; padding: .2rem .6rem; border-radius: 999px; font-size: .75rem; font-weight: 700; }
.tone-nike { background: #ea580c; }
.tone-adidas { background: #2563eb; }
.tone-other { background: #059669; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 1rem; }
.card, .panel { background: #1e293b; border-radius: 1rem; padding: 1.25rem; }
.price { color: #4ade80; font-weight: 700; }
.error { background: #7f1d1d; padding: 1rem; border-radius: .75rem; }
.busy, .generating { color: #facc15; }
.muted { color: #94a3b8; }
img { max-width: 100%; border-radius: .75rem; }
button[disabled] { opacity: .5; cursor: not-allowed; }
</style>
</head>
<body>
<header>
<h1>{{ page.title }}</h1>
<p class="muted">{{ page.tagline }}</p>
<span class="badge tone-other">{{ page.retailer_badge }}</span>
<form method="post" action="/search">
<button type="submit"{% if not page.trigger_enabled %} disabled{% endif %}>{{ page.trigger_label }}</button>
</form>
</header>
<main>
{% if page.busy %}<p class="busy">{{ page.trigger_label }}</p>{% endif %}
{% if page.idle_hint %}<p class="muted">{{ page.idle_hint }}</p>{% endif %}
{% if page.error %}<div class="error" role="alert">{{ page.error }}</div>{% endif %}
{% if page.content %}{% set content = page.content %}
<section class="cards">
{% for card in content.cards %}<article class="card">
<span class="badge tone-{{ card.tone }}">{{ card.brand }}</span>
<span class="price">{{ card.price }}</span>
<h2>{{ card.model }}</h2>
{% if card.category %}<p class="muted">{{ card.category }}</p>{% endif %}
<dl>
<dt>{{ card.weight_label }}</dt><dd>{{ card.weight }}</dd>
<dt>{{ card.drop_label }}</dt><dd>{{ card.drop }}</dd>
</dl>
<h3>{{ card.highlights_label }}</h3>
<ul>{% for feature in card.features %}<li>{{ feature }}</li>{% endfor %}</ul>
{% if card.href %}<a href="{{ card.href }}" target="_blank" rel="noopener noreferrer">{{ card.link_label }}</a>{% else %}<p class="muted">{{ card.link_label }}: {{ card.link }}</p>{% endif %}
</article>
{% endfor %}</section>
{% set panel = content.infographic %}
<section class="panel">
<h2>{{ panel.title }}</h2>
<p class="muted">{{ panel.subtitle }}</p>
{% if panel.image_src %}<img src="{{ panel.image_src }}" alt="{{ panel.title }}">
<p><a href="/infographic" target="_blank" rel="noopener noreferrer">{{ panel.open_label }}</a></p>
{% elif panel.placeholder %}<p class="{% if panel.generating %}generating{% else %}muted{% endif %}">{{ panel.placeholder }}</p>{% endif %}
</section>
<section class="panel">
<h2>{{ content.summary_title }}</h2>
<p>{{ content.summary }}</p>
</section>
<section class="panel">
<h3>{{ content.sources_title }}</h3>
{% if content.no_sources %}<p class="muted">{{ content.no_sources }}</p>{% endif %}
<ol>{% for source in content.sources %}<li><span class="muted">{{ source.ordinal }}</span> {% if source.href %}<a href="{{ source.href }}" target="_blank" rel="noopener noreferrer">{{ source.label }}</a>{% else %}{{ source.label }}{% endif %}</li>{% endfor %}</ol>
</section>
{% endif %}
</main>
<footer class="muted">
<p>{{ page.footer_copyright }}</p>
<p>{{ page.footer_disclaimer }}</p>
</footer>
</body>
</html>
"#;

/// Renders the page through an auto-escaping Tera template.
pub struct HtmlRenderer {
    engine: TeraEngine,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut engine = TeraEngine::new();
        engine.add_template(PAGE_NAME, PAGE_TEMPLATE)?;
        Ok(Self { engine })
    }

    pub fn render(&self, page: &PageModel) -> Result<String, RenderError> {
        let mut ctx = Context::new();
        ctx.insert("page", page);
        self.engine.render(PAGE_NAME, &ctx)
    }
}
