//! Dashboard module - per-client read models composed from several services.
//!
//! - `bundle`: the payload the dashboard page loads when a client is selected
//! - `report`: the downloadable client report
//! - `scorecard`: health metrics and milestones shown in the gamification panels

mod bundle;
mod dashboard_service;
mod report;
mod scorecard;

pub use bundle::{AdvisoryContext, ClientBundle};
pub use dashboard_service::{DashboardService, DashboardServiceTrait};
pub use report::{report_file_name, ClientReport, LargestAllocation, ReportSummary};
pub use scorecard::{
    build_scorecard, HealthMetric, HealthMetricKind, HealthStatus, Milestone, Scorecard,
};
