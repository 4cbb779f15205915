//! Named page and email templates, compiled into the binary.
//!
//! Placeholders are written `{{ key }}`. Plain values are HTML-escaped when
//! they land in an HTML template; markup built by the caller is inserted
//! verbatim with [`TemplateContext::insert_html`].

use std::collections::HashMap;
use std::sync::Arc;

pub const SUBSCRIBER_PAGE: &str = "newsletter-subscriber";
pub const UNSUBSCRIBER_PAGE: &str = "newsletter-unsubscriber";
pub const WELCOME_HTML: &str = "newsletter-welcome-html";
pub const WELCOME_TEXT: &str = "newsletter-welcome-text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Html,
    Text,
}

struct Template {
    format: Format,
    source: &'static str,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template `{0}` does not exist")]
    UnknownTemplate(String),
    #[error("Template `{template}` has no value for `{key}`")]
    MissingValue { template: String, key: String },
    #[error("Template `{0}` has an unterminated placeholder")]
    Unterminated(String),
}

enum Value {
    Text(String),
    Html(String),
}

#[derive(Default)]
pub struct TemplateContext {
    values: HashMap<&'static str, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(key, Value::Text(value.into()));
        self
    }

    pub fn insert_html(mut self, key: &'static str, markup: impl Into<String>) -> Self {
        self.values.insert(key, Value::Html(markup.into()));
        self
    }
}

#[derive(Clone)]
pub struct Templates {
    registry: Arc<HashMap<&'static str, Template>>,
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

impl Templates {
    pub fn new() -> Self {
        let mut registry = HashMap::new();
        registry.insert(
            SUBSCRIBER_PAGE,
            Template {
                format: Format::Html,
                source: include_str!("../templates/newsletter-subscriber.html"),
            },
        );
        registry.insert(
            UNSUBSCRIBER_PAGE,
            Template {
                format: Format::Html,
                source: include_str!("../templates/newsletter-unsubscriber.html"),
            },
        );
        registry.insert(
            WELCOME_HTML,
            Template {
                format: Format::Html,
                source: include_str!("../templates/newsletter-welcome.html"),
            },
        );
        registry.insert(
            WELCOME_TEXT,
            Template {
                format: Format::Text,
                source: include_str!("../templates/newsletter-welcome.txt"),
            },
        );

        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String, TemplateError> {
        let template = self
            .registry
            .get(name)
            .ok_or_else(|| TemplateError::UnknownTemplate(name.to_owned()))?;

        let mut output = String::with_capacity(template.source.len());
        let mut rest = template.source;
        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| TemplateError::Unterminated(name.to_owned()))?;
            let key = after[..end].trim();

            match context.values.get(key) {
                Some(Value::Html(markup)) => output.push_str(markup),
                Some(Value::Text(text)) if template.format == Format::Html => {
                    output.push_str(&htmlescape::encode_minimal(text))
                }
                Some(Value::Text(text)) => output.push_str(text),
                None => {
                    return Err(TemplateError::MissingValue {
                        template: name.to_owned(),
                        key: key.to_owned(),
                    })
                }
            }
            rest = &after[end + 2..];
        }
        output.push_str(rest);

        Ok(output)
    }
}
