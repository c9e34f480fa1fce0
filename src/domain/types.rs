/// Core identifier and enum types used throughout the domain layer
///
/// This module defines the fundamental types like MetricType, DataSource and
/// the ID wrappers that are used by MetricRecord, WearableLink, Product and
/// Insight entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a user
///
/// This is a wrapper around UUID to provide type safety - you can't
/// accidentally pass a user ID where a product ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a user ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Convert to string representation
    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// Unique identifier for a metric record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// Unique identifier for a wearable link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(pub Uuid);

impl LinkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// Unique identifier for a catalog product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// The kinds of health metrics a user can log
///
/// The unit is implied by the metric type (milliliters for water, hours for
/// sleep, a 0-10 scale for stress, and so on). Unknown metric strings are
/// rejected at ingestion; the engine only ever sees these six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    WaterMl,
    SleepHours,
    StressLevel,
    Steps,
    SleepDeepSeconds,
    HeartRate,
}

impl MetricType {
    /// Storage/wire representation of this metric type
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::WaterMl => "water_ml",
            MetricType::SleepHours => "sleep_hours",
            MetricType::StressLevel => "stress_level",
            MetricType::Steps => "steps",
            MetricType::SleepDeepSeconds => "sleep_deep_seconds",
            MetricType::HeartRate => "heart_rate",
        }
    }

    /// Parse a metric type from its storage/wire representation
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "water_ml" => Ok(MetricType::WaterMl),
            "sleep_hours" => Ok(MetricType::SleepHours),
            "stress_level" => Ok(MetricType::StressLevel),
            "steps" => Ok(MetricType::Steps),
            "sleep_deep_seconds" => Ok(MetricType::SleepDeepSeconds),
            "heart_rate" => Ok(MetricType::HeartRate),
            other => Err(DomainError::InvalidMetricType(other.to_string())),
        }
    }
}

/// A wearable data provider a user can connect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WearableProvider {
    AppleHealth,
    Oura,
    Garmin,
    Whoop,
    GoogleFit,
}

impl WearableProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            WearableProvider::AppleHealth => "apple_health",
            WearableProvider::Oura => "oura",
            WearableProvider::Garmin => "garmin",
            WearableProvider::Whoop => "whoop",
            WearableProvider::GoogleFit => "google_fit",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "apple_health" => Ok(WearableProvider::AppleHealth),
            "oura" => Ok(WearableProvider::Oura),
            "garmin" => Ok(WearableProvider::Garmin),
            "whoop" => Ok(WearableProvider::Whoop),
            "google_fit" => Ok(WearableProvider::GoogleFit),
            other => Err(DomainError::InvalidProvider(other.to_string())),
        }
    }
}

/// Where a metric record came from: manual entry or one of the wearable
/// providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Manual,
    AppleHealth,
    Oura,
    Garmin,
    Whoop,
    GoogleFit,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Manual => "manual",
            DataSource::AppleHealth => "apple_health",
            DataSource::Oura => "oura",
            DataSource::Garmin => "garmin",
            DataSource::Whoop => "whoop",
            DataSource::GoogleFit => "google_fit",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "manual" => Ok(DataSource::Manual),
            "apple_health" => Ok(DataSource::AppleHealth),
            "oura" => Ok(DataSource::Oura),
            "garmin" => Ok(DataSource::Garmin),
            "whoop" => Ok(DataSource::Whoop),
            "google_fit" => Ok(DataSource::GoogleFit),
            other => Err(DomainError::InvalidSource(other.to_string())),
        }
    }
}

impl From<WearableProvider> for DataSource {
    fn from(provider: WearableProvider) -> Self {
        match provider {
            WearableProvider::AppleHealth => DataSource::AppleHealth,
            WearableProvider::Oura => DataSource::Oura,
            WearableProvider::Garmin => DataSource::Garmin,
            WearableProvider::Whoop => DataSource::Whoop,
            WearableProvider::GoogleFit => DataSource::GoogleFit,
        }
    }
}

/// A user's subscription tier
///
/// The tier gates some caller-side features (e.g. free users may hold only a
/// single active wearable link); the insight engine itself is tier-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Connect,
    Baseline,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Connect => "connect",
            Tier::Baseline => "baseline",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "free" => Ok(Tier::Free),
            "connect" => Ok(Tier::Connect),
            "baseline" => Ok(Tier::Baseline),
            other => Err(DomainError::InvalidTier(other.to_string())),
        }
    }
}

/// Supported response locales for user-facing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    /// Parse a locale tag, falling back to English for anything unrecognized
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "fr" => Locale::Fr,
            _ => Locale::En,
        }
    }
}

/// Priority tier of a generated insight
///
/// Insights are presented sorted by rank; the sort is stable so insights of
/// equal priority keep the order in which the analyzers emitted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    /// Sort rank: high sorts before normal, normal before low
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Normal => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

/// Which area of wellness an insight belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Sleep,
    Hydration,
    Stress,
    Fitness,
    Wellness,
    Tracking,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Sleep => "sleep",
            InsightCategory::Hydration => "hydration",
            InsightCategory::Stress => "stress",
            InsightCategory::Fitness => "fitness",
            InsightCategory::Wellness => "wellness",
            InsightCategory::Tracking => "tracking",
        }
    }
}
