use serde::Deserialize;

use crate::domain::{ContactEmail, ContactName};

const REQUIRED: &str = "This field is required.";
const INVALID_EMAIL: &str = "Invalid email address.";

/// Raw fields posted by the subscribe and unsubscribe forms.
#[derive(Debug, Default, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Outcome of validating a form.
#[derive(Debug)]
pub enum Submission {
    /// Nothing was posted; render an empty form.
    NotSubmitted,
    /// A submission was made but the email is missing or malformed.
    Invalid,
    Valid(ValidSubmission),
}

#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub name: Option<ContactName>,
    pub email: ContactEmail,
}

/// Form state shared by the subscribe and unsubscribe pages.
#[derive(Debug, Default)]
pub struct NewsletterForm {
    submitted: bool,
    name: String,
    email: String,
    email_errors: Vec<&'static str>,
}

impl NewsletterForm {
    /// A form that was never posted, as rendered on a GET request.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn submitted(data: FormData) -> Self {
        Self {
            submitted: true,
            name: data.name.unwrap_or_default(),
            email: data.email.unwrap_or_default(),
            email_errors: Vec::new(),
        }
    }

    pub fn validate_on_submit(&mut self) -> Submission {
        if !self.submitted {
            return Submission::NotSubmitted;
        }

        self.email_errors.clear();
        if self.email.is_empty() {
            self.email_errors.push(REQUIRED);
            return Submission::Invalid;
        }

        match ContactEmail::parse(self.email.clone()) {
            Ok(email) => Submission::Valid(ValidSubmission {
                name: ContactName::parse(self.name.clone()),
                email,
            }),
            Err(_) => {
                self.email_errors.push(INVALID_EMAIL);
                Submission::Invalid
            }
        }
    }

    /// Clears the submitted values so the form is never re-rendered with them.
    /// Field errors are kept.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn email_errors(&self) -> &[&'static str] {
        &self.email_errors
    }
}
