//! # canvas_templates
//!
//! The template language used by the CloudCanvas knowledge base.
//!
//! The grammar is deliberately tiny:
//!
//! - `{{name}}` is replaced by the string form of `data["name"]`
//! - `{{#name}} ... {{/name}}` is kept only when `data["name"]` is truthy
//!
//! Blocks do not nest. Unknown placeholders stay in the output verbatim so a
//! partially specified resource is still readable and fixable by hand.
//!
//! ## Example
//!
//! ```rust
//! use canvas_templates::{TemplateData, TemplateRenderer};
//! use serde_json::json;
//!
//! let renderer = TemplateRenderer::new();
//! let mut data = TemplateData::new();
//! data.insert("name".to_string(), json!("web"));
//! data.insert("container_name".to_string(), json!("main"));
//!
//! let template = "subnet = {{#container_name}}aws_subnet.{{container_name}}.id{{/container_name}}";
//!
//! renderer.validate(template).unwrap();
//! let hcl = renderer.render(template, &data);
//! assert_eq!(hcl, "subnet = aws_subnet.main.id");
//! ```

pub mod error;
pub mod renderer;
mod scanner;

pub use error::{TemplateError, TemplateResult};
pub use renderer::{
    is_truthy, scalar_text, BlockOutline, TemplateData, TemplateOutline, TemplateRenderer,
};
