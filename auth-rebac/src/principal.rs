use crate::models::USER_PREFIX;
use std::fmt;

/// Subject used when a request carries no identity.
pub const ANONYMOUS: &str = "anonymous";

/// Caller identity as the CRUD services derive it from a request header.
///
/// Missing or blank header values become [`ANONYMOUS`]; any other id is
/// qualified with `user:` unless it already carries the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal(String);

impl Principal {
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Self::anonymous(),
            Some(ANONYMOUS) => Self::anonymous(),
            Some(id) if id.starts_with(USER_PREFIX) => Self(id.to_string()),
            Some(id) => Self(format!("{}{}", USER_PREFIX, id)),
        }
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS
    }

    pub fn as_subject(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
