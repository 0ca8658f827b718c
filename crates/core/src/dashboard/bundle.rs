use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::clients::Client;
use crate::portfolios::{AssetAllocation, Portfolio, PortfolioPerformance};

/// Everything the dashboard needs to render a selected client.
///
/// `asset_allocations` and `performance` only ever hold rows of `portfolio`;
/// both are empty when the client has no portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientBundle {
    pub client: Client,
    pub portfolio: Option<Portfolio>,
    pub asset_allocations: Vec<AssetAllocation>,
    pub performance: Vec<PortfolioPerformance>,
    pub chat_history: Vec<ChatMessage>,
}

/// The subset of client data handed to the advisor model.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryContext {
    pub client: Client,
    pub portfolio: Option<Portfolio>,
    pub allocations: Vec<AssetAllocation>,
}
