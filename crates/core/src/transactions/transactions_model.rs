use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::clients::ClientId;
use crate::errors::{Error, Result, ValidationError};

/// A booked order. `client_id` is not checked against the client table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i32,
    pub client_id: ClientId,
    pub transaction_date: String,
    pub settlement_date: Option<String>,
    pub maturity_date: Option<String>,
    pub order_type: Option<String>,
    pub status: Option<String>,
    pub price_type: Option<String>,
    pub side: Option<String>,
    pub initiation: Option<String>,
    pub time_in_force: Option<String>,
    pub instrument_id: Option<String>,
    pub isin: Option<String>,
    pub quantity: Option<Decimal>,
    pub currency: Option<String>,
    pub market_value: Option<Decimal>,
    pub nominal_value: Option<Decimal>,
    pub price: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub instrument_name: Option<String>,
    pub asset_class: Option<String>,
    pub instrument_type: Option<String>,
    pub investment_category: Option<String>,
    pub advisory_type: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub client_id: String,
    pub transaction_date: String,
    pub settlement_date: Option<String>,
    pub maturity_date: Option<String>,
    pub order_type: Option<String>,
    pub status: Option<String>,
    pub price_type: Option<String>,
    pub side: Option<String>,
    pub initiation: Option<String>,
    pub time_in_force: Option<String>,
    pub instrument_id: Option<String>,
    pub isin: Option<String>,
    pub quantity: Option<Decimal>,
    pub currency: Option<String>,
    pub market_value: Option<Decimal>,
    pub nominal_value: Option<Decimal>,
    pub price: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub instrument_name: Option<String>,
    pub asset_class: Option<String>,
    pub instrument_type: Option<String>,
    pub investment_category: Option<String>,
    pub advisory_type: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        ClientId::parse(&self.client_id)?;
        if self.transaction_date.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "transactionDate".to_string(),
            )));
        }
        Ok(())
    }
}
