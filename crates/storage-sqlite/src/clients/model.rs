//! Database models for clients.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{decimal_text, parse_decimal_text};
use wealthdesk_core::clients::{Client, ClientId, NewClient};
use wealthdesk_core::Error;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClientDB {
    pub id: i32,
    pub client_id: String,
    pub name: String,
    pub risk_tolerance: String,
    pub investment_horizon: i32,
    pub investment_experience: String,
    pub free_asset_ratio: String,
    pub investment_objective: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::clients)]
pub struct NewClientDB {
    pub client_id: String,
    pub name: String,
    pub risk_tolerance: String,
    pub investment_horizon: i32,
    pub investment_experience: String,
    pub free_asset_ratio: String,
    pub investment_objective: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewClientDB {
    pub fn from_domain(client: NewClient, now: NaiveDateTime) -> Self {
        Self {
            client_id: client.client_id.into_inner(),
            name: client.name.trim().to_string(),
            risk_tolerance: client.risk_tolerance,
            investment_horizon: client.investment_horizon,
            investment_experience: client.investment_experience,
            free_asset_ratio: decimal_text(client.free_asset_ratio),
            investment_objective: client.investment_objective,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<ClientDB> for Client {
    type Error = Error;

    fn try_from(db: ClientDB) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: ClientId::parse(&db.client_id)?,
            name: db.name,
            risk_tolerance: db.risk_tolerance,
            investment_horizon: db.investment_horizon,
            investment_experience: db.investment_experience,
            free_asset_ratio: parse_decimal_text(&db.free_asset_ratio, "free_asset_ratio"),
            investment_objective: db.investment_objective,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
