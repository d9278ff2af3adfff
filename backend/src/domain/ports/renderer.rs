//! Port abstraction for the HTML rendering layer.
//!
//! Template semantics are out of scope: handlers hand a template name and a
//! JSON context across this boundary and receive markup back.

#[cfg(test)]
use mockall::automock;

use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Failures raised by renderer adapters.
    pub enum RenderError {
        /// The named template does not exist.
        UnknownTemplate { name: String } => "unknown template: {name}",
        /// The template could not be rendered with the given context.
        Render { message: String } => "render failed: {message}",
    }
}

/// Rendering port.
#[cfg_attr(test, automock)]
pub trait Renderer: Send + Sync {
    /// Render the named template with the given context into HTML.
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError>;
}
