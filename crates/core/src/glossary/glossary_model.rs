use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LANGUAGE;
use crate::errors::{Error, Result, ValidationError};

/// Definition of an investment term, unique per (term, language).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub id: i32,
    pub term: String,
    pub definition: String,
    pub category: String,
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGlossaryTerm {
    pub term: String,
    pub definition: String,
    pub category: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl NewGlossaryTerm {
    pub fn validate(&self) -> Result<()> {
        if self.term.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "term".to_string(),
            )));
        }
        if self.definition.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "definition".to_string(),
            )));
        }
        normalize_language(Some(&self.language))?;
        Ok(())
    }
}

/// Lower-cases a language code and checks it is 2 to 5 characters long.
/// `None` and blank input resolve to the default language.
pub fn normalize_language(language: Option<&str>) -> Result<String> {
    let code = language.map(str::trim).filter(|s| !s.is_empty());
    match code {
        None => Ok(DEFAULT_LANGUAGE.to_string()),
        Some(code) if (2..=5).contains(&code.chars().count()) => Ok(code.to_lowercase()),
        Some(code) => Err(Error::Validation(ValidationError::invalid(format!(
            "Language code '{}' must be 2 to 5 characters",
            code
        )))),
    }
}
