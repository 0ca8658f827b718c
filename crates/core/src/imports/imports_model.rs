use serde::{Deserialize, Serialize};

use crate::clients::Client;

/// A source row that was not imported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RowFailure {
    /// 1-based line in the source, header included
    pub line: usize,
    pub client_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub clients: Vec<Client>,
    pub failures: Vec<RowFailure>,
}

impl ImportSummary {
    pub fn push_failure(&mut self, failure: RowFailure) {
        self.skipped += 1;
        self.failures.push(failure);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub failures: Vec<RowFailure>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSeedSummary {
    pub market_insights: usize,
    pub glossary_terms: usize,
}
