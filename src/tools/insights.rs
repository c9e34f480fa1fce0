/// Tools exposing the insight engine and the dashboard rollup
///
/// This module implements the wellness_insights and dashboard MCP tools.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Insight, MetricRecord, WearableLink};
use crate::engine::{legacy, InsightEngine};
use crate::storage::WellnessStore;
use crate::tools::log::parse_user_id;
use crate::tools::ToolError;

const DASHBOARD_LOG_LIMIT: u32 = 20;
const DASHBOARD_LOOKBACK_DAYS: i64 = 7;

/// Parameters for generating insights
#[derive(Debug, Deserialize)]
pub struct InsightsParams {
    pub user_id: String,
}

/// The ranked insight list for one user
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    pub count: usize,
}

/// Generate the full ranked insight list for a user
pub fn wellness_insights<S: WellnessStore>(
    storage: &S,
    params: InsightsParams,
) -> Result<InsightsResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;

    let insights = InsightEngine::new(storage).generate_insights(&user_id)?;
    let count = insights.len();

    Ok(InsightsResponse { insights, count })
}

/// Parameters for the dashboard rollup
#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub user_id: String,
}

/// Legacy single-message summaries shown on the dashboard cards
#[derive(Debug, Serialize)]
pub struct DashboardSummaries {
    pub sleep: String,
    pub hydration: String,
}

/// Everything the dashboard screen needs in one call
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub recent_logs: Vec<MetricRecord>,
    pub connected_wearables: Vec<WearableLink>,
    pub insights: DashboardSummaries,
}

/// Assemble the dashboard rollup: recent logs, active wearables and the
/// legacy one-line summaries
pub fn dashboard<S: WellnessStore>(
    storage: &S,
    params: DashboardParams,
) -> Result<DashboardResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;

    let since = Utc::now() - Duration::days(DASHBOARD_LOOKBACK_DAYS);
    let recent_logs =
        storage.records_for_user(&user_id, None, since, Some(DASHBOARD_LOG_LIMIT))?;
    let connected_wearables = storage.active_wearable_links(&user_id)?;

    let insights = DashboardSummaries {
        sleep: legacy::sleep_summary(storage, &user_id)?,
        hydration: legacy::hydration_summary(storage, &user_id)?,
    };

    Ok(DashboardResponse {
        recent_logs,
        connected_wearables,
        insights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataSource, InsightCategory, MetricType, Priority, UserId};
    use crate::storage::SqliteStorage;
    use tempfile::NamedTempFile;

    fn open_storage() -> (NamedTempFile, SqliteStorage) {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");
        (temp_file, storage)
    }

    fn log(storage: &SqliteStorage, user: &UserId, metric: MetricType, value: f64) {
        let record = MetricRecord::new(user.clone(), DataSource::Manual, metric, value).unwrap();
        storage.create_record(&record).unwrap();
    }

    #[test]
    fn test_insights_tool_returns_ranked_list() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log(&storage, &user, MetricType::SleepHours, 5.0);

        let response = wellness_insights(
            &storage,
            InsightsParams { user_id: user.to_string() },
        )
        .unwrap();

        assert_eq!(response.count, response.insights.len());
        assert_eq!(response.insights[0].category, InsightCategory::Sleep);
        assert_eq!(response.insights[0].priority, Priority::High);
    }

    #[test]
    fn test_dashboard_combines_logs_and_summaries() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log(&storage, &user, MetricType::SleepHours, 5.0);
        log(&storage, &user, MetricType::WaterMl, 1500.0);

        let response =
            dashboard(&storage, DashboardParams { user_id: user.to_string() }).unwrap();

        assert_eq!(response.recent_logs.len(), 2);
        assert!(response.connected_wearables.is_empty());
        assert!(response.insights.sleep.contains("5.0"));
        assert!(response.insights.hydration.contains("1500"));
    }

    #[test]
    fn test_dashboard_for_empty_user_uses_fallback_copy() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        let response =
            dashboard(&storage, DashboardParams { user_id: user.to_string() }).unwrap();

        assert!(response.recent_logs.is_empty());
        assert!(response.insights.sleep.contains("Keep tracking"));
    }
}
