use crate::domain::NewsletterForm;
use crate::flash::FlashMessage;
use crate::templates::{TemplateContext, TemplateError, Templates};

/// Turns form state and flash messages into newsletter pages.
#[derive(Clone)]
pub struct Presenter {
    templates: Templates,
    site_title: String,
}

impl Presenter {
    pub fn new(templates: Templates, site_title: String) -> Self {
        Self {
            templates,
            site_title,
        }
    }

    pub fn render_form(
        &self,
        template: &str,
        form: &NewsletterForm,
        flash: Option<&FlashMessage>,
    ) -> Result<String, TemplateError> {
        let flash_html = match flash {
            Some(message) => format!(
                r#"<div class="alert alert-{}">{}</div>"#,
                message.level().as_str(),
                htmlescape::encode_minimal(message.content()),
            ),
            None => String::new(),
        };
        let errors_html: String = form
            .email_errors()
            .iter()
            .map(|e| format!(r#"<p class="field-error">{}</p>"#, e))
            .collect();

        let context = TemplateContext::new()
            .insert("site_title", self.site_title.as_str())
            .insert("name", form.name())
            .insert("email", form.email())
            .insert_html("flash", flash_html)
            .insert_html("email_errors", errors_html);

        self.templates.render(template, &context)
    }
}
