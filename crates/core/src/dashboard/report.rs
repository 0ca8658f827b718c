use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::clients::{Client, ClientId};
use crate::portfolios::{allocation_total, AssetAllocation, Portfolio, PortfolioPerformance};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LargestAllocation {
    pub asset_type: String,
    pub allocation: Decimal,
}

/// Headline figures printed on the first page of a client report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_value: Option<Decimal>,
    pub ytd_return: Option<Decimal>,
    pub volatility: Option<Decimal>,
    pub asset_class_count: usize,
    pub allocation_total: Decimal,
    pub largest_allocation: Option<LargestAllocation>,
    /// Value change across the reported performance window.
    pub performance_change: Option<Decimal>,
    pub benchmark_change: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientReport {
    pub generated_at: NaiveDateTime,
    pub client: Client,
    pub portfolio: Option<Portfolio>,
    pub asset_allocations: Vec<AssetAllocation>,
    /// Oldest first, unlike the dashboard bundle.
    pub performance: Vec<PortfolioPerformance>,
    pub summary: ReportSummary,
}

impl ClientReport {
    pub fn new(
        client: Client,
        portfolio: Option<Portfolio>,
        asset_allocations: Vec<AssetAllocation>,
        mut performance: Vec<PortfolioPerformance>,
        generated_at: NaiveDateTime,
    ) -> Self {
        performance.sort_by_key(|p| p.date);

        let largest_allocation = asset_allocations
            .iter()
            .max_by_key(|a| a.allocation)
            .map(|a| LargestAllocation {
                asset_type: a.asset_type.clone(),
                allocation: a.allocation,
            });

        let performance_change = match (performance.first(), performance.last()) {
            (Some(first), Some(last)) if performance.len() > 1 => {
                last.value.checked_sub(first.value)
            }
            _ => None,
        };
        let benchmark_change = match (performance.first(), performance.last()) {
            (Some(first), Some(last)) if performance.len() > 1 => {
                match (first.benchmark_value, last.benchmark_value) {
                    (Some(start), Some(end)) => end.checked_sub(start),
                    _ => None,
                }
            }
            _ => None,
        };

        let summary = ReportSummary {
            total_value: portfolio.as_ref().map(|p| p.total_value),
            ytd_return: portfolio.as_ref().map(|p| p.ytd_return),
            volatility: portfolio.as_ref().map(|p| p.volatility),
            asset_class_count: asset_allocations.len(),
            allocation_total: allocation_total(&asset_allocations),
            largest_allocation,
            performance_change,
            benchmark_change,
        };

        Self {
            generated_at,
            client,
            portfolio,
            asset_allocations,
            performance,
            summary,
        }
    }
}

/// Download name for a report, safe for a `Content-Disposition` header.
pub fn report_file_name(client_id: &ClientId) -> String {
    let safe: String = client_id
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("client-report-{}.json", safe)
}
