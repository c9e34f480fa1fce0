/// Single-insight adapters for the older dashboard cards
///
/// Early clients expect one plain-text summary per wellness area rather
/// than the full insight list. These adapters run the full engine and pick
/// out the first (highest-ranked) insight of the relevant category.

use crate::domain::{InsightCategory, UserId};
use crate::engine::InsightEngine;
use crate::storage::{StorageError, WellnessStore};

const SLEEP_FALLBACK: &str = "Keep tracking your data to receive personalized insights!";
const HYDRATION_FALLBACK: &str = "Don't forget to track your water!";

/// One-line sleep summary for the legacy dashboard card
pub fn sleep_summary<S: WellnessStore>(
    store: &S,
    user_id: &UserId,
) -> Result<String, StorageError> {
    summary_for(store, user_id, InsightCategory::Sleep, SLEEP_FALLBACK)
}

/// One-line hydration summary for the legacy dashboard card
pub fn hydration_summary<S: WellnessStore>(
    store: &S,
    user_id: &UserId,
) -> Result<String, StorageError> {
    summary_for(store, user_id, InsightCategory::Hydration, HYDRATION_FALLBACK)
}

fn summary_for<S: WellnessStore>(
    store: &S,
    user_id: &UserId,
    category: InsightCategory,
    fallback: &str,
) -> Result<String, StorageError> {
    let insights = InsightEngine::new(store).generate_insights(user_id)?;
    let message = insights
        .into_iter()
        .find(|insight| insight.category == category)
        .map(|insight| insight.message)
        .unwrap_or_else(|| fallback.to_string());
    Ok(message)
}
