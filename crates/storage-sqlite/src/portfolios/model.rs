//! Database models for portfolios, allocations and performance history.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::utils::{
    decimal_text, optional_decimal_text, parse_decimal_text, parse_optional_decimal_text,
};
use wealthdesk_core::clients::{AllocationSeed, ClientId, PerformanceSeed};
use wealthdesk_core::portfolios::{AssetAllocation, Portfolio, PortfolioPerformance};

/// `client_id` is the internal row id of the owning client.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub id: i32,
    pub client_id: i32,
    pub total_value: String,
    pub ytd_return: String,
    pub volatility: String,
    pub last_updated: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
pub struct NewPortfolioDB {
    pub client_id: i32,
    pub total_value: String,
    pub ytd_return: String,
    pub volatility: String,
    pub last_updated: NaiveDateTime,
}

/// Only the fields that are `Some` are written.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::portfolios)]
pub struct PortfolioChangeset {
    pub total_value: Option<String>,
    pub ytd_return: Option<String>,
    pub volatility: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
}

impl PortfolioDB {
    /// The business id comes from the joined client row.
    pub fn into_domain(self, client_id: ClientId) -> Portfolio {
        Portfolio {
            id: self.id,
            client_id,
            total_value: parse_decimal_text(&self.total_value, "total_value"),
            ytd_return: parse_decimal_text(&self.ytd_return, "ytd_return"),
            volatility: parse_decimal_text(&self.volatility, "volatility"),
            last_updated: self.last_updated,
        }
    }
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::asset_allocations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetAllocationDB {
    pub id: i32,
    pub portfolio_id: i32,
    pub asset_type: String,
    pub allocation: String,
    pub value: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::asset_allocations)]
pub struct NewAssetAllocationDB {
    pub portfolio_id: i32,
    pub asset_type: String,
    pub allocation: String,
    pub value: String,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::asset_allocations)]
pub struct AssetAllocationChangeset {
    pub asset_type: Option<String>,
    pub allocation: Option<String>,
    pub value: Option<String>,
}

impl NewAssetAllocationDB {
    pub fn from_seed(portfolio_id: i32, seed: AllocationSeed) -> Self {
        Self {
            portfolio_id,
            asset_type: seed.asset_type,
            allocation: decimal_text(seed.allocation),
            value: decimal_text(seed.value),
        }
    }
}

impl From<AssetAllocationDB> for AssetAllocation {
    fn from(db: AssetAllocationDB) -> Self {
        Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            asset_type: db.asset_type,
            allocation: parse_decimal_text(&db.allocation, "allocation"),
            value: parse_decimal_text(&db.value, "value"),
        }
    }
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_performance)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioPerformanceDB {
    pub id: i32,
    pub portfolio_id: i32,
    pub date: NaiveDate,
    pub value: String,
    pub benchmark_value: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_performance)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewPortfolioPerformanceDB {
    pub portfolio_id: i32,
    pub date: NaiveDate,
    pub value: String,
    pub benchmark_value: Option<String>,
}

impl NewPortfolioPerformanceDB {
    pub fn from_seed(portfolio_id: i32, seed: PerformanceSeed) -> Self {
        Self {
            portfolio_id,
            date: seed.date,
            value: decimal_text(seed.value),
            benchmark_value: optional_decimal_text(seed.benchmark_value),
        }
    }
}

impl From<PortfolioPerformanceDB> for PortfolioPerformance {
    fn from(db: PortfolioPerformanceDB) -> Self {
        Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            date: db.date,
            value: parse_decimal_text(&db.value, "value"),
            benchmark_value: parse_optional_decimal_text(
                db.benchmark_value.as_deref(),
                "benchmark_value",
            ),
        }
    }
}
