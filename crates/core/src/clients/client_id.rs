use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::MAX_CLIENT_ID_LEN;
use crate::errors::{Error, Result, ValidationError};

/// Business identifier of a client (e.g. `WM-001`).
///
/// This is the only client identifier that leaves the storage layer. The
/// numeric row id is mapped to and from it inside the repositories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "clientId".to_string(),
            )));
        }
        if value.len() > MAX_CLIENT_ID_LEN {
            return Err(Error::Validation(ValidationError::invalid(format!(
                "clientId must be at most {} characters",
                MAX_CLIENT_ID_LEN
            ))));
        }
        if value.chars().any(char::is_control) {
            return Err(Error::Validation(ValidationError::invalid(
                "clientId contains control characters",
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for ClientId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

/// Accepts either a JSON string or a JSON number, so `{"clientId": 17}` and
/// `{"clientId": "17"}` name the same client.
impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        ClientId::parse(raw).map_err(serde::de::Error::custom)
    }
}
