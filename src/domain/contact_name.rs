use std::fmt::Display;

/// Display name of a contact. Only ever built from a non-empty form value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    /// An empty value means the visitor did not provide a name.
    pub fn parse(s: String) -> Option<Self> {
        match s.is_empty() {
            true => None,
            false => Some(Self(s)),
        }
    }
}

impl Display for ContactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
