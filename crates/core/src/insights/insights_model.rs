use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InsightPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl InsightPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightPriority::High => "High",
            InsightPriority::Medium => "Medium",
            InsightPriority::Low => "Low",
        }
    }
}

impl fmt::Display for InsightPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(InsightPriority::High),
            "medium" => Ok(InsightPriority::Medium),
            "low" => Ok(InsightPriority::Low),
            other => Err(Error::Validation(ValidationError::invalid(format!(
                "Unknown insight priority '{}'",
                other
            )))),
        }
    }
}

/// Market commentary such as a CIO update, an ESG note or a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsight {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: String,
    pub priority: InsightPriority,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketInsight {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub priority: InsightPriority,
}

impl NewMarketInsight {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("content", &self.content),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    field.to_string(),
                )));
            }
        }
        Ok(())
    }
}
