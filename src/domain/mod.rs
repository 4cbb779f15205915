mod contact;
mod contact_email;
mod contact_name;
mod newsletter_form;

pub use contact::{Contact, ContactId, ContactUpdate, ListId, NewContact};
pub use contact_email::ContactEmail;
pub use contact_name::ContactName;
pub use newsletter_form::{FormData, NewsletterForm, Submission, ValidSubmission};
