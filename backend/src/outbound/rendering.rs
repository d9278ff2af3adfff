//! Development HTML renderer.
//!
//! A deliberately small stand-in for a real templating engine: it knows the
//! application's template names, emits a skeletal page for each, and embeds
//! the context so pages are inspectable. Handlers only depend on the
//! renderer port, so swapping in a full engine is an adapter change.

use serde_json::Value;

use crate::domain::ports::{RenderError, Renderer};

const KNOWN_TEMPLATES: &[&str] = &[
    "restaurants/index",
    "restaurants/show",
    "restaurants/new",
    "restaurants/edit",
    "users/register",
    "users/login",
];

#[derive(Default, Clone)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        if !KNOWN_TEMPLATES.contains(&template) {
            return Err(RenderError::unknown_template(template));
        }
        let body = serde_json::to_string_pretty(context)
            .map_err(|err| RenderError::render(err.to_string()))?;
        let flashes = context
            .get("flashes")
            .map(render_flashes)
            .unwrap_or_default();
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><title>RestoFind</title></head>\n<body>\n\
             <header><h1>RestoFind</h1></header>\n{flashes}\
             <main data-template=\"{template}\">\n<pre>{}</pre>\n</main>\n</body>\n</html>\n",
            escape(&body)
        ))
    }
}

fn render_flashes(flashes: &Value) -> String {
    let mut out = String::new();
    for (category, class) in [("success", "flash-success"), ("error", "flash-error")] {
        let Some(messages) = flashes.get(category).and_then(Value::as_array) else {
            continue;
        };
        for message in messages.iter().filter_map(Value::as_str) {
            out.push_str(&format!("<p class=\"{class}\">{}</p>\n", escape(message)));
        }
    }
    out
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_known_templates_with_flashes() {
        let renderer = HtmlRenderer::new();
        let html = renderer
            .render(
                "restaurants/index",
                &json!({
                    "restaurants": [],
                    "flashes": { "success": ["Successfully created a new restaurant!"], "error": [] }
                }),
            )
            .expect("render");
        assert!(html.contains("data-template=\"restaurants/index\""));
        assert!(html.contains("Successfully created a new restaurant!"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let renderer = HtmlRenderer::new();
        let err = renderer
            .render("restaurants/missing", &json!({}))
            .expect_err("unknown template");
        assert!(matches!(err, RenderError::UnknownTemplate { .. }));
    }

    #[test]
    fn flash_markup_is_escaped() {
        let renderer = HtmlRenderer::new();
        let html = renderer
            .render(
                "users/login",
                &json!({ "flashes": { "success": [], "error": ["<b>x</b>"] } }),
            )
            .expect("render");
        assert!(!html.contains("<b>x</b>"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
