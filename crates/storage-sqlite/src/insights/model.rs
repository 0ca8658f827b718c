use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;

use wealthdesk_core::insights::{InsightPriority, MarketInsight, NewMarketInsight};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::market_insights)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketInsightDB {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: String,
    pub priority: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::market_insights)]
pub struct NewMarketInsightDB {
    pub title: String,
    pub content: String,
    pub category: String,
    pub priority: String,
    pub created_at: NaiveDateTime,
}

impl NewMarketInsightDB {
    pub fn from_domain(insight: NewMarketInsight, created_at: NaiveDateTime) -> Self {
        Self {
            title: insight.title,
            content: insight.content,
            category: insight.category,
            priority: insight.priority.as_str().to_string(),
            created_at,
        }
    }
}

impl From<MarketInsightDB> for MarketInsight {
    fn from(db: MarketInsightDB) -> Self {
        let priority = db.priority.parse::<InsightPriority>().unwrap_or_else(|_| {
            warn!(
                "Insight {} has unknown priority '{}', reading it as Medium",
                db.id, db.priority
            );
            InsightPriority::Medium
        });
        Self {
            id: db.id,
            title: db.title,
            content: db.content,
            category: db.category,
            priority,
            created_at: db.created_at,
        }
    }
}
