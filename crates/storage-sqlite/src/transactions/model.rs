use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{optional_decimal_text, parse_optional_decimal_text};
use wealthdesk_core::clients::ClientId;
use wealthdesk_core::transactions::{NewTransaction, Transaction};
use wealthdesk_core::Error;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i32,
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
    pub quantity: Option<String>,
    pub currency: Option<String>,
    pub market_value: Option<String>,
    pub nominal_value: Option<String>,
    pub price: Option<String>,
    pub interest_rate: Option<String>,
    pub instrument_name: Option<String>,
    pub asset_class: Option<String>,
    pub instrument_type: Option<String>,
    pub investment_category: Option<String>,
    pub advisory_type: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewTransactionDB {
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
    pub quantity: Option<String>,
    pub currency: Option<String>,
    pub market_value: Option<String>,
    pub nominal_value: Option<String>,
    pub price: Option<String>,
    pub interest_rate: Option<String>,
    pub instrument_name: Option<String>,
    pub asset_class: Option<String>,
    pub instrument_type: Option<String>,
    pub investment_category: Option<String>,
    pub advisory_type: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewTransactionDB {
    pub fn from_domain(tx: NewTransaction, created_at: NaiveDateTime) -> Self {
        Self {
            client_id: tx.client_id.trim().to_string(),
            transaction_date: tx.transaction_date,
            settlement_date: tx.settlement_date,
            maturity_date: tx.maturity_date,
            order_type: tx.order_type,
            status: tx.status,
            price_type: tx.price_type,
            side: tx.side,
            initiation: tx.initiation,
            time_in_force: tx.time_in_force,
            instrument_id: tx.instrument_id,
            isin: tx.isin,
            quantity: optional_decimal_text(tx.quantity),
            currency: tx.currency,
            market_value: optional_decimal_text(tx.market_value),
            nominal_value: optional_decimal_text(tx.nominal_value),
            price: optional_decimal_text(tx.price),
            interest_rate: optional_decimal_text(tx.interest_rate),
            instrument_name: tx.instrument_name,
            asset_class: tx.asset_class,
            instrument_type: tx.instrument_type,
            investment_category: tx.investment_category,
            advisory_type: tx.advisory_type,
            created_at,
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            client_id: ClientId::parse(&db.client_id)?,
            transaction_date: db.transaction_date,
            settlement_date: db.settlement_date,
            maturity_date: db.maturity_date,
            order_type: db.order_type,
            status: db.status,
            price_type: db.price_type,
            side: db.side,
            initiation: db.initiation,
            time_in_force: db.time_in_force,
            instrument_id: db.instrument_id,
            isin: db.isin,
            quantity: parse_optional_decimal_text(db.quantity.as_deref(), "quantity"),
            currency: db.currency,
            market_value: parse_optional_decimal_text(db.market_value.as_deref(), "market_value"),
            nominal_value: parse_optional_decimal_text(
                db.nominal_value.as_deref(),
                "nominal_value",
            ),
            price: parse_optional_decimal_text(db.price.as_deref(), "price"),
            interest_rate: parse_optional_decimal_text(
                db.interest_rate.as_deref(),
                "interest_rate",
            ),
            instrument_name: db.instrument_name,
            asset_class: db.asset_class,
            instrument_type: db.instrument_type,
            investment_category: db.investment_category,
            advisory_type: db.advisory_type,
            created_at: db.created_at,
        })
    }
}
