use crate::error::RenderError;
use tera::{Context, Tera};

/// Tera-backed template engine shared by the prompt builders and the HTML view.
///
/// Templates whose names end in `.html` are auto-escaped; prompt templates are
/// registered without an extension and render verbatim.
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Create with inline templates (no filesystem).
    pub fn new() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Register a template from a string, replacing any previous one.
    pub fn add_template(&mut self, name: &str, content: &str) -> Result<(), RenderError> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    /// Render a named template with the given context.
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String, RenderError> {
        Ok(self.tera.render(template_name, context)?)
    }
}
