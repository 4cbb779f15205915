use std::fmt::Display;

use validator::validate_email;

/// Syntactically valid email address, the lookup key of a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Surrounding whitespace is dropped before the syntax check, so a padded
    /// address matches the stored contact.
    pub fn parse(s: String) -> Result<Self, String> {
        let address = s.trim();
        if validate_email(address) {
            Ok(Self(address.to_owned()))
        } else {
            Err(format!("Invalid email address: `{}`", s))
        }
    }
}

impl Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
