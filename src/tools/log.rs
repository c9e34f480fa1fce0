/// Tools for logging metrics and reading back history
///
/// This module implements the metric_log and metric_history MCP tools.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DataSource, MetricRecord, MetricType, UserId};
use crate::storage::WellnessStore;
use crate::tools::ToolError;

const DEFAULT_HISTORY_DAYS: i64 = 7;

/// Parameters for logging a metric value
#[derive(Debug, Deserialize)]
pub struct MetricLogParams {
    pub user_id: String,
    pub metric_type: String,
    pub value: f64,
    pub source: Option<String>, // defaults to manual entry
}

/// Response from logging a metric
#[derive(Debug, Serialize)]
pub struct MetricLogResponse {
    pub success: bool,
    pub message: String,
    pub record_id: String,
}

/// Log one metric measurement for a user
pub fn metric_log<S: WellnessStore>(
    storage: &S,
    params: MetricLogParams,
) -> Result<MetricLogResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;

    let metric_type = MetricType::parse(&params.metric_type)
        .map_err(|e| ToolError::invalid(e.to_string()))?;

    let source = match params.source.as_deref() {
        Some(s) => DataSource::parse(s).map_err(|e| ToolError::invalid(e.to_string()))?,
        None => DataSource::Manual,
    };

    let record = MetricRecord::new(user_id, source, metric_type, params.value)
        .map_err(|e| ToolError::invalid(e.to_string()))?;
    storage.create_record(&record)?;

    tracing::info!(
        "Logged {} = {} for user {}",
        metric_type.as_str(),
        params.value,
        params.user_id
    );

    Ok(MetricLogResponse {
        success: true,
        message: format!("Logged {} = {}", metric_type.as_str(), params.value),
        record_id: record.id.to_string(),
    })
}

/// Parameters for reading metric history
#[derive(Debug, Deserialize)]
pub struct MetricHistoryParams {
    pub user_id: String,
    pub metric_type: Option<String>, // omit for all types
    pub days: Option<i64>,           // defaults to the last 7 days
    pub limit: Option<u32>,
}

/// Response listing metric records, newest first
#[derive(Debug, Serialize)]
pub struct MetricHistoryResponse {
    pub records: Vec<MetricRecord>,
    pub count: usize,
}

/// Read back a user's logged measurements, newest first
pub fn metric_history<S: WellnessStore>(
    storage: &S,
    params: MetricHistoryParams,
) -> Result<MetricHistoryResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;

    let metric_type = params
        .metric_type
        .as_deref()
        .map(MetricType::parse)
        .transpose()
        .map_err(|e| ToolError::invalid(e.to_string()))?;

    let days = params.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    if days <= 0 {
        return Err(ToolError::invalid("days must be positive"));
    }
    let since = Utc::now() - Duration::days(days);

    let records = storage.records_for_user(&user_id, metric_type, since, params.limit)?;
    let count = records.len();

    Ok(MetricHistoryResponse { records, count })
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, ToolError> {
    UserId::from_string(raw).map_err(|_| ToolError::invalid("Invalid user ID format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use tempfile::NamedTempFile;

    fn open_storage() -> (NamedTempFile, SqliteStorage) {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");
        (temp_file, storage)
    }

    #[test]
    fn test_log_and_read_back() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        let response = metric_log(
            &storage,
            MetricLogParams {
                user_id: user.to_string(),
                metric_type: "water_ml".to_string(),
                value: 500.0,
                source: None,
            },
        )
        .unwrap();
        assert!(response.success);

        let history = metric_history(
            &storage,
            MetricHistoryParams {
                user_id: user.to_string(),
                metric_type: Some("water_ml".to_string()),
                days: None,
                limit: None,
            },
        )
        .unwrap();
        assert_eq!(history.count, 1);
        assert_eq!(history.records[0].value, 500.0);
        assert_eq!(history.records[0].source, DataSource::Manual);
    }

    #[test]
    fn test_unknown_metric_type_rejected() {
        let (_guard, storage) = open_storage();
        let result = metric_log(
            &storage,
            MetricLogParams {
                user_id: UserId::new().to_string(),
                metric_type: "blood_oxygen".to_string(),
                value: 97.0,
                source: None,
            },
        );
        assert!(matches!(result, Err(ToolError::InvalidParams(_))));
    }

    #[test]
    fn test_bad_user_id_rejected() {
        let (_guard, storage) = open_storage();
        let result = metric_history(
            &storage,
            MetricHistoryParams {
                user_id: "not-a-uuid".to_string(),
                metric_type: None,
                days: None,
                limit: None,
            },
        );
        assert!(matches!(result, Err(ToolError::InvalidParams(_))));
    }

    #[test]
    fn test_history_limit_applies_newest_first() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        for value in [100.0, 200.0, 300.0] {
            metric_log(
                &storage,
                MetricLogParams {
                    user_id: user.to_string(),
                    metric_type: "steps".to_string(),
                    value,
                    source: Some("garmin".to_string()),
                },
            )
            .unwrap();
        }

        let history = metric_history(
            &storage,
            MetricHistoryParams {
                user_id: user.to_string(),
                metric_type: None,
                days: Some(1),
                limit: Some(2),
            },
        )
        .unwrap();
        assert_eq!(history.count, 2);
    }
}
