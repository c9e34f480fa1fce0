/// MetricRecord entity for logged health data
///
/// This module defines the MetricRecord struct that represents a single
/// logged measurement (a glass of water, a night of sleep, a step count)
/// owned by a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DataSource, DomainError, MetricType, RecordId, UserId};

/// A single logged health measurement
///
/// Records are immutable once created. They are queried by metric type and
/// time range; the unit of `value` is implied by the metric type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Unique identifier for this record
    pub id: RecordId,
    /// Which user owns this record
    pub user_id: UserId,
    /// Where the measurement came from (manual entry or a wearable)
    pub source: DataSource,
    /// What was measured
    pub metric_type: MetricType,
    /// The measured value; unit implied by the metric type
    pub value: f64,
    /// When the measurement was taken
    pub timestamp: DateTime<Utc>,
}

impl MetricRecord {
    /// Create a new record with validation, timestamped now
    ///
    /// Only finiteness of the value is enforced here. Per-metric domain
    /// bounds (e.g. sleep hours <= 24) are a known gap carried over from
    /// the ingestion contract.
    pub fn new(
        user_id: UserId,
        source: DataSource,
        metric_type: MetricType,
        value: f64,
    ) -> Result<Self, DomainError> {
        Self::validate_value(value)?;

        Ok(Self {
            id: RecordId::new(),
            user_id,
            source,
            metric_type,
            value,
            timestamp: Utc::now(),
        })
    }

    /// Create a record from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer when loading records from the database.
    pub fn from_existing(
        id: RecordId,
        user_id: UserId,
        source: DataSource,
        metric_type: MetricType,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            source,
            metric_type,
            value,
            timestamp,
        }
    }

    fn validate_value(value: f64) -> Result<(), DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidValue {
                message: "Metric value must be a finite number".to_string(),
            });
        }
        Ok(())
    }
}
