/// Rule-based insight engine
///
/// This is the wellness brain: it snapshots a user's recent metric data,
/// runs a fixed table of per-metric analyzers and cross-metric correlators
/// against it, attaches product recommendations, and returns the insights
/// ranked by priority. Insights are transient; nothing here is persisted.
///
/// Thresholds are wellness-framed observations only. The engine never
/// asserts clinical conclusions.

pub mod legacy;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    Insight, InsightCategory, MetricRecord, MetricType, Priority, UserId, WearableLink,
};
use crate::storage::{StorageError, WellnessStore};

/// How far back the weekly analyzers look
const LOOKBACK_DAYS: i64 = 7;
/// Recency sub-window for stress analysis
const STRESS_RECENT_DAYS: i64 = 3;

const SLEEP_ALERT_HOURS: f64 = 6.0;
const SLEEP_TARGET_HOURS: f64 = 7.0;
const HYDRATION_LOW_ML: f64 = 1000.0;
const HYDRATION_TARGET_ML: f64 = 2000.0;
const STRESS_HIGH: f64 = 7.0;
const STRESS_MODERATE: f64 = 5.0;
/// The stress-sleep correlator uses its own stress threshold, independent of
/// the per-metric one; both rules may fire on the same data.
const CROSS_STRESS_HIGH: f64 = 6.0;
const STEPS_LOW: f64 = 5000.0;
const STEPS_GOOD: f64 = 8000.0;

/// A consistent view of one user's recent data
///
/// Fetched once per request; every analyzer and correlator reads only this
/// snapshot, so all rules within one call see the same records even if
/// writes land concurrently.
pub struct MetricSnapshot {
    /// When the snapshot was taken; anchors the recency sub-windows
    pub taken_at: DateTime<Utc>,
    pub sleep_week: Vec<MetricRecord>,
    pub water_week: Vec<MetricRecord>,
    pub stress_week: Vec<MetricRecord>,
    pub steps_week: Vec<MetricRecord>,
    pub water_today: Vec<MetricRecord>,
    pub sleep_today: Vec<MetricRecord>,
    pub stress_today: Vec<MetricRecord>,
    pub steps_today: Vec<MetricRecord>,
    pub wearables: Vec<WearableLink>,
}

/// The insight rules engine, generic over the storage backend
pub struct InsightEngine<'a, S: WellnessStore> {
    store: &'a S,
}

impl<'a, S: WellnessStore> InsightEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Generate the ranked insight list for one user
    ///
    /// Absence of data is the normal empty-state path, never an error; an
    /// empty result list is legitimate for a brand-new user. Only a storage
    /// failure propagates, all-or-nothing, with no retries.
    pub fn generate_insights(&self, user_id: &UserId) -> Result<Vec<Insight>, StorageError> {
        let snapshot = self.snapshot(user_id)?;

        let mut insights = Vec::new();
        if let Some(insight) = self.analyze_sleep(&snapshot)? {
            insights.push(insight);
        }
        if let Some(insight) = self.analyze_hydration(&snapshot) {
            insights.push(insight);
        }
        if let Some(insight) = self.analyze_stress(&snapshot)? {
            insights.push(insight);
        }
        if let Some(insight) = self.analyze_activity(&snapshot)? {
            insights.push(insight);
        }
        insights.extend(self.cross_analyze(&snapshot));

        rank_by_priority(&mut insights);

        tracing::debug!(
            "Generated {} insights for user {}",
            insights.len(),
            user_id.to_string()
        );
        Ok(insights)
    }

    /// Fetch the full data snapshot for one user
    pub fn snapshot(&self, user_id: &UserId) -> Result<MetricSnapshot, StorageError> {
        let taken_at = Utc::now();
        let week_ago = taken_at - Duration::days(LOOKBACK_DAYS);

        Ok(MetricSnapshot {
            taken_at,
            sleep_week: self
                .store
                .recent_by_type(user_id, MetricType::SleepHours, week_ago)?,
            water_week: self
                .store
                .recent_by_type(user_id, MetricType::WaterMl, week_ago)?,
            stress_week: self
                .store
                .recent_by_type(user_id, MetricType::StressLevel, week_ago)?,
            steps_week: self
                .store
                .recent_by_type(user_id, MetricType::Steps, week_ago)?,
            water_today: self.store.today_by_type(user_id, MetricType::WaterMl)?,
            sleep_today: self.store.today_by_type(user_id, MetricType::SleepHours)?,
            stress_today: self.store.today_by_type(user_id, MetricType::StressLevel)?,
            steps_today: self.store.today_by_type(user_id, MetricType::Steps)?,
            wearables: self.store.active_wearable_links(user_id)?,
        })
    }

    /// Sleep analyzer: unweighted mean over the 7-day window
    fn analyze_sleep(&self, snapshot: &MetricSnapshot) -> Result<Option<Insight>, StorageError> {
        let avg_sleep = match mean(&snapshot.sleep_week) {
            Some(avg) => avg,
            None => return Ok(None),
        };

        let insight = if avg_sleep < SLEEP_ALERT_HOURS {
            let magnesium = self.store.find_product_by_name("magnesium")?;
            Insight::new(
                "Sleep Alert",
                format!(
                    "You are averaging {:.1}h of sleep over the last 7 days. Aim for \
                     7-9h for optimal rest. Magnesium can help improve sleep quality.",
                    avg_sleep
                ),
                InsightCategory::Sleep,
                Priority::High,
                "moon",
            )
            .with_product(magnesium.map(|p| p.id))
        } else if avg_sleep < SLEEP_TARGET_HOURS {
            Insight::new(
                "Room to Improve",
                format!(
                    "You sleep {:.1}h on average. Try to gain an extra 30-60 minutes \
                     to reach the optimal range.",
                    avg_sleep
                ),
                InsightCategory::Sleep,
                Priority::Normal,
                "moon",
            )
        } else {
            Insight::new(
                "Excellent Sleep!",
                format!("Well done! You sleep {:.1}h on average. Keep it up!", avg_sleep),
                InsightCategory::Sleep,
                Priority::Low,
                "checkmark-circle",
            )
        };

        Ok(Some(insight))
    }

    /// Hydration analyzer: today's records only, not the 7-day window
    ///
    /// No records today emits the tracking reminder and stops; it never
    /// falls through to the sum-based branches.
    fn analyze_hydration(&self, snapshot: &MetricSnapshot) -> Option<Insight> {
        if snapshot.water_today.is_empty() {
            return Some(Insight::new(
                "Hydration",
                format!(
                    "Don't forget to track your water intake today! Target: {}ml.",
                    HYDRATION_TARGET_ML as i64
                ),
                InsightCategory::Hydration,
                Priority::Normal,
                "water",
            ));
        }

        let total_water: f64 = snapshot.water_today.iter().map(|r| r.value).sum();

        let insight = if total_water < HYDRATION_LOW_ML {
            Insight::new(
                "Low Hydration",
                format!(
                    "You have only logged {}ml today. Try to reach {}ml!",
                    total_water as i64, HYDRATION_TARGET_ML as i64
                ),
                InsightCategory::Hydration,
                Priority::Normal,
                "water",
            )
        } else if total_water < HYDRATION_TARGET_ML {
            Insight::new(
                "Good Progress",
                format!(
                    "You have logged {}ml today. A little more to hit the target!",
                    total_water as i64
                ),
                InsightCategory::Hydration,
                Priority::Low,
                "water",
            )
        } else {
            Insight::new(
                "Excellent Hydration!",
                format!(
                    "Perfect! You have logged {}ml today. Well hydrated!",
                    total_water as i64
                ),
                InsightCategory::Hydration,
                Priority::Low,
                "checkmark-circle",
            )
        };

        Some(insight)
    }

    /// Stress analyzer: 3-day recency sub-window of the 7-day snapshot
    ///
    /// A user whose only stress data is 4-7 days old gets no stress insight
    /// at all, even if it was elevated. Low stress (mean <= 5) is silent;
    /// the engine does not praise it.
    fn analyze_stress(&self, snapshot: &MetricSnapshot) -> Result<Option<Insight>, StorageError> {
        if snapshot.stress_week.is_empty() {
            return Ok(None);
        }

        let recent = recent_subset(&snapshot.stress_week, snapshot.taken_at, STRESS_RECENT_DAYS);
        let avg_stress = match mean_of(&recent) {
            Some(avg) => avg,
            None => return Ok(None),
        };

        if avg_stress > STRESS_HIGH {
            let meditation = self.store.find_product_by_name("meditation")?;
            Ok(Some(
                Insight::new(
                    "High Stress Detected",
                    format!(
                        "Your average stress level is {:.1}/10 over the last few days. \
                         Take time to relax. Meditation can help.",
                        avg_stress
                    ),
                    InsightCategory::Stress,
                    Priority::High,
                    "pulse",
                )
                .with_product(meditation.map(|p| p.id)),
            ))
        } else if avg_stress > STRESS_MODERATE {
            Ok(Some(Insight::new(
                "Moderate Stress",
                format!(
                    "Your stress is at {:.1}/10. Breathe deeply and take regular breaks.",
                    avg_stress
                ),
                InsightCategory::Stress,
                Priority::Normal,
                "pulse",
            )))
        } else {
            Ok(None)
        }
    }

    /// Activity analyzer: mean step count over the 7-day window
    ///
    /// Hitting the 8000+ range is silent; praise stops at encouragement.
    fn analyze_activity(&self, snapshot: &MetricSnapshot) -> Result<Option<Insight>, StorageError> {
        let avg_steps = match mean(&snapshot.steps_week) {
            Some(avg) => avg,
            None => return Ok(None),
        };

        if avg_steps < STEPS_LOW {
            let bands = self.store.find_product_by_name("resistance")?;
            Ok(Some(
                Insight::new(
                    "Low Activity",
                    format!(
                        "You are averaging {} steps/day. Aim for 8000-10000 steps for \
                         better cardiovascular health.",
                        avg_steps as i64
                    ),
                    InsightCategory::Fitness,
                    Priority::Normal,
                    "walk",
                )
                .with_product(bands.map(|p| p.id)),
            ))
        } else if avg_steps < STEPS_GOOD {
            Ok(Some(Insight::new(
                "Good Activity",
                format!(
                    "You are averaging {} steps/day. Great! Try to reach 10000.",
                    avg_steps as i64
                ),
                InsightCategory::Fitness,
                Priority::Low,
                "walk",
            )))
        } else {
            Ok(None)
        }
    }

    /// Cross-metric correlators, evaluated after the per-metric analyzers
    fn cross_analyze(&self, snapshot: &MetricSnapshot) -> Vec<Insight> {
        let mut insights = Vec::new();

        // Poor sleep + elevated recent stress
        if let Some(avg_sleep) = mean(&snapshot.sleep_week) {
            let recent =
                recent_subset(&snapshot.stress_week, snapshot.taken_at, STRESS_RECENT_DAYS);
            if let Some(avg_stress) = mean_of(&recent) {
                if avg_sleep < SLEEP_ALERT_HOURS && avg_stress > CROSS_STRESS_HIGH {
                    insights.push(Insight::new(
                        "Stress-Sleep Connection",
                        "Your elevated stress appears to be affecting your sleep. Try a \
                         short meditation session before bed."
                            .to_string(),
                        InsightCategory::Wellness,
                        Priority::High,
                        "analytics",
                    ));
                }
            }
        }

        // Low activity + sub-target sleep
        if let (Some(avg_sleep), Some(avg_steps)) =
            (mean(&snapshot.sleep_week), mean(&snapshot.steps_week))
        {
            if avg_sleep < SLEEP_TARGET_HOURS && avg_steps < STEPS_LOW {
                insights.push(Insight::new(
                    "Activity & Sleep",
                    "Physical activity improves sleep. A 20-minute daily walk could help."
                        .to_string(),
                    InsightCategory::Wellness,
                    Priority::Normal,
                    "analytics",
                ));
            }
        }

        // Multiple connected devices means a fuller data picture
        if snapshot.wearables.len() > 1 {
            insights.push(Insight::new(
                "Excellent Tracking!",
                format!(
                    "You have {} devices connected. Your data picture is complete!",
                    snapshot.wearables.len()
                ),
                InsightCategory::Tracking,
                Priority::Low,
                "checkmark-circle",
            ));
        }

        insights
    }
}

/// Stable sort by priority rank; equal priorities keep emission order
pub fn rank_by_priority(insights: &mut [Insight]) {
    insights.sort_by_key(|insight| insight.priority.rank());
}

/// Unweighted arithmetic mean of record values; None for an empty set
fn mean(records: &[MetricRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|r| r.value).sum();
    Some(total / records.len() as f64)
}

/// Mean over a borrowed subset (the recency sub-windows)
fn mean_of(records: &[&MetricRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|r| r.value).sum();
    Some(total / records.len() as f64)
}

/// Records no older than `days` relative to the snapshot anchor
///
/// A sub-window of the already-fetched snapshot, not a fresh query.
fn recent_subset(
    records: &[MetricRecord],
    taken_at: DateTime<Utc>,
    days: i64,
) -> Vec<&MetricRecord> {
    let cutoff = taken_at - Duration::days(days);
    records.iter().filter(|r| r.timestamp >= cutoff).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataSource, WearableProvider, WearableLink};
    use crate::storage::SqliteStorage;
    use tempfile::NamedTempFile;

    use crate::storage::WellnessStore;

    fn open_storage() -> (NamedTempFile, SqliteStorage) {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");
        (temp_file, storage)
    }

    fn log_at(
        storage: &SqliteStorage,
        user: &UserId,
        metric: MetricType,
        value: f64,
        days_ago: i64,
    ) {
        let mut record =
            MetricRecord::new(user.clone(), DataSource::Manual, metric, value).unwrap();
        record.timestamp = Utc::now() - Duration::days(days_ago);
        storage.create_record(&record).unwrap();
    }

    fn log_today(storage: &SqliteStorage, user: &UserId, metric: MetricType, value: f64) {
        let record = MetricRecord::new(user.clone(), DataSource::Manual, metric, value).unwrap();
        storage.create_record(&record).unwrap();
    }

    fn insights_of(
        storage: &SqliteStorage,
        user: &UserId,
        category: InsightCategory,
    ) -> Vec<Insight> {
        InsightEngine::new(storage)
            .generate_insights(user)
            .unwrap()
            .into_iter()
            .filter(|i| i.category == category)
            .collect()
    }

    #[test]
    fn test_low_sleep_mean_emits_high_priority_alert() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::SleepHours, 5.0, 3);
        log_at(&storage, &user, MetricType::SleepHours, 5.5, 2);
        log_at(&storage, &user, MetricType::SleepHours, 6.0, 1);

        let sleep = insights_of(&storage, &user, InsightCategory::Sleep);
        assert_eq!(sleep.len(), 1);
        assert_eq!(sleep[0].priority, Priority::High);
        assert!(sleep[0].message.contains("5.5"));
    }

    #[test]
    fn test_sleep_branches_at_boundaries() {
        // Mean exactly 6 falls into the improvement branch, not the alert
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::SleepHours, 6.0, 1);

        let sleep = insights_of(&storage, &user, InsightCategory::Sleep);
        assert_eq!(sleep.len(), 1);
        assert_eq!(sleep[0].priority, Priority::Normal);

        // Mean exactly 7 is praise
        let user2 = UserId::new();
        log_at(&storage, &user2, MetricType::SleepHours, 7.0, 1);
        let sleep2 = insights_of(&storage, &user2, InsightCategory::Sleep);
        assert_eq!(sleep2.len(), 1);
        assert_eq!(sleep2[0].priority, Priority::Low);
    }

    #[test]
    fn test_empty_sleep_set_emits_no_sleep_insight() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_today(&storage, &user, MetricType::Steps, 9000.0);

        assert!(insights_of(&storage, &user, InsightCategory::Sleep).is_empty());
    }

    #[test]
    fn test_sleep_alert_attaches_magnesium_product() {
        let (_guard, storage) = open_storage();
        for product in crate::storage::catalog::default_products().unwrap() {
            storage.insert_product(&product).unwrap();
        }
        let user = UserId::new();
        log_at(&storage, &user, MetricType::SleepHours, 5.0, 1);

        let sleep = insights_of(&storage, &user, InsightCategory::Sleep);
        let product_id = sleep[0].recommended_product_id.clone().unwrap();
        let product = storage.get_product(&product_id).unwrap();
        assert!(product.name.to_lowercase().contains("magnesium"));
    }

    #[test]
    fn test_hydration_reminder_when_nothing_logged_today() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        let hydration = insights_of(&storage, &user, InsightCategory::Hydration);
        assert_eq!(hydration.len(), 1);
        assert_eq!(hydration[0].priority, Priority::Normal);
        assert!(hydration[0].message.contains("2000"));
    }

    #[test]
    fn test_hydration_sum_branches() {
        let (_guard, storage) = open_storage();

        let user = UserId::new();
        log_today(&storage, &user, MetricType::WaterMl, 500.0);
        log_today(&storage, &user, MetricType::WaterMl, 600.0);
        let hydration = insights_of(&storage, &user, InsightCategory::Hydration);
        assert_eq!(hydration.len(), 1);
        assert_eq!(hydration[0].priority, Priority::Low);
        assert!(hydration[0].message.contains("1100"));

        // The 2000ml boundary is inclusive on the praise side
        let user2 = UserId::new();
        log_today(&storage, &user2, MetricType::WaterMl, 1500.0);
        log_today(&storage, &user2, MetricType::WaterMl, 500.0);
        let hydration2 = insights_of(&storage, &user2, InsightCategory::Hydration);
        assert_eq!(hydration2.len(), 1);
        assert!(hydration2[0].title.contains("Excellent"));
        assert!(hydration2[0].message.contains("2000"));
    }

    #[test]
    fn test_stress_mean_of_exactly_seven_is_moderate() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::StressLevel, 7.0, 1);
        log_at(&storage, &user, MetricType::StressLevel, 7.0, 2);

        let stress = insights_of(&storage, &user, InsightCategory::Stress);
        assert_eq!(stress.len(), 1);
        assert_eq!(stress[0].priority, Priority::Normal);
        assert!(stress[0].title.contains("Moderate"));
    }

    #[test]
    fn test_stale_stress_data_is_silent() {
        // Stress data only 4-7 days old produces no stress insight,
        // even when elevated
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::StressLevel, 9.0, 5);
        log_at(&storage, &user, MetricType::StressLevel, 9.5, 6);

        assert!(insights_of(&storage, &user, InsightCategory::Stress).is_empty());
    }

    #[test]
    fn test_low_stress_is_silent() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::StressLevel, 3.0, 1);

        assert!(insights_of(&storage, &user, InsightCategory::Stress).is_empty());
    }

    #[test]
    fn test_activity_branches() {
        let (_guard, storage) = open_storage();

        let user = UserId::new();
        log_at(&storage, &user, MetricType::Steps, 4000.0, 1);
        let fitness = insights_of(&storage, &user, InsightCategory::Fitness);
        assert_eq!(fitness.len(), 1);
        assert_eq!(fitness[0].priority, Priority::Normal);
        assert!(fitness[0].message.contains("4000"));

        // 8000+ steps is silent
        let user2 = UserId::new();
        log_at(&storage, &user2, MetricType::Steps, 9000.0, 1);
        assert!(insights_of(&storage, &user2, InsightCategory::Fitness).is_empty());
    }

    #[test]
    fn test_stress_sleep_correlator_requires_both_conditions() {
        // Both hold: fires
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::SleepHours, 5.0, 1);
        log_at(&storage, &user, MetricType::StressLevel, 8.0, 1);
        let wellness = insights_of(&storage, &user, InsightCategory::Wellness);
        assert!(wellness.iter().any(|i| i.title.contains("Stress-Sleep")));

        // Only poor sleep: does not fire
        let user2 = UserId::new();
        log_at(&storage, &user2, MetricType::SleepHours, 5.0, 1);
        log_at(&storage, &user2, MetricType::StressLevel, 4.0, 1);
        let wellness2 = insights_of(&storage, &user2, InsightCategory::Wellness);
        assert!(!wellness2.iter().any(|i| i.title.contains("Stress-Sleep")));

        // Only high stress: does not fire
        let user3 = UserId::new();
        log_at(&storage, &user3, MetricType::SleepHours, 8.0, 1);
        log_at(&storage, &user3, MetricType::StressLevel, 8.0, 1);
        let wellness3 = insights_of(&storage, &user3, InsightCategory::Wellness);
        assert!(!wellness3.iter().any(|i| i.title.contains("Stress-Sleep")));
    }

    #[test]
    fn test_stress_alert_and_correlator_may_both_fire() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::SleepHours, 5.0, 1);
        log_at(&storage, &user, MetricType::StressLevel, 9.0, 1);

        let insights = InsightEngine::new(&storage).generate_insights(&user).unwrap();
        assert!(insights.iter().any(|i| i.category == InsightCategory::Stress
            && i.priority == Priority::High));
        assert!(insights
            .iter()
            .any(|i| i.category == InsightCategory::Wellness));
    }

    #[test]
    fn test_activity_sleep_correlator() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::SleepHours, 6.5, 1);
        log_at(&storage, &user, MetricType::Steps, 3000.0, 1);

        let wellness = insights_of(&storage, &user, InsightCategory::Wellness);
        assert_eq!(wellness.len(), 1);
        assert_eq!(wellness[0].priority, Priority::Normal);
        assert!(wellness[0].title.contains("Activity"));
    }

    #[test]
    fn test_multi_device_bonus_requires_more_than_one_link() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        storage
            .create_wearable_link(&WearableLink::new(user.clone(), WearableProvider::Oura))
            .unwrap();

        // One device is not enough
        assert!(insights_of(&storage, &user, InsightCategory::Tracking).is_empty());

        storage
            .create_wearable_link(&WearableLink::new(user.clone(), WearableProvider::Garmin))
            .unwrap();
        let tracking = insights_of(&storage, &user, InsightCategory::Tracking);
        assert_eq!(tracking.len(), 1);
        assert!(tracking[0].message.contains('2'));
    }

    #[test]
    fn test_rank_groups_by_priority_preserving_relative_order() {
        let mk = |title: &str, priority: Priority| {
            Insight::new(title, String::new(), InsightCategory::Wellness, priority, "analytics")
        };
        let mut insights = vec![
            mk("a", Priority::Low),
            mk("b", Priority::High),
            mk("c", Priority::Normal),
            mk("d", Priority::High),
        ];

        rank_by_priority(&mut insights);

        let order: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_generation_is_idempotent_up_to_ids_and_timestamps() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::SleepHours, 5.0, 1);
        log_today(&storage, &user, MetricType::WaterMl, 800.0);
        log_at(&storage, &user, MetricType::Steps, 4000.0, 1);

        let engine = InsightEngine::new(&storage);
        let first = engine.generate_insights(&user).unwrap();
        let second = engine.generate_insights(&user).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.message, b.message);
            assert_eq!(a.category, b.category);
            assert_eq!(a.priority, b.priority);
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_sleep_only_user_end_to_end() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_at(&storage, &user, MetricType::SleepHours, 5.0, 3);
        log_at(&storage, &user, MetricType::SleepHours, 5.5, 2);
        log_at(&storage, &user, MetricType::SleepHours, 6.0, 1);

        let insights = InsightEngine::new(&storage).generate_insights(&user).unwrap();

        // The sleep alert ranks first; the only other emission is the
        // hydration tracking reminder for the empty today-window
        assert_eq!(insights[0].category, InsightCategory::Sleep);
        assert_eq!(insights[0].priority, Priority::High);
        assert!(insights[0].message.contains("5.5"));
        assert_eq!(
            insights
                .iter()
                .filter(|i| i.category == InsightCategory::Sleep)
                .count(),
            1
        );
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[1].category, InsightCategory::Hydration);
    }

    #[test]
    fn test_water_only_user_end_to_end() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        log_today(&storage, &user, MetricType::WaterMl, 500.0);
        log_today(&storage, &user, MetricType::WaterMl, 600.0);

        let insights = InsightEngine::new(&storage).generate_insights(&user).unwrap();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, InsightCategory::Hydration);
        assert_eq!(insights[0].priority, Priority::Low);
        assert!(insights[0].message.contains("1100"));
    }

    #[test]
    fn test_new_user_gets_only_the_hydration_reminder() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        let insights = InsightEngine::new(&storage).generate_insights(&user).unwrap();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, InsightCategory::Hydration);
    }
}
