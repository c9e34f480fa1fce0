/// Tools for managing wearable connections and simulated sync
///
/// This module implements the wearable_connect, wearable_list,
/// wearable_disconnect and wearable_sync MCP tools. Sync is a stub that
/// inserts one plausible randomized record; a real implementation would pull
/// from the provider's API after an OAuth flow.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{
    LinkId, MetricRecord, MetricType, Tier, UserId, WearableLink, WearableProvider,
};
use crate::storage::{StorageError, WellnessStore};
use crate::tools::log::parse_user_id;
use crate::tools::ToolError;

/// How many active links the free tier allows
const FREE_TIER_LINK_LIMIT: usize = 1;

/// Parameters for connecting a wearable
#[derive(Debug, Deserialize)]
pub struct WearableConnectParams {
    pub user_id: String,
    pub provider: String,
    pub tier: Option<String>, // caller's subscription tier, defaults to free
}

/// Response from connecting a wearable
#[derive(Debug, Serialize)]
pub struct WearableConnectResponse {
    pub success: bool,
    pub message: String,
    pub link: WearableLink,
}

/// Connect a wearable provider for a user
///
/// Free-tier users may hold only one active link; connecting an already
/// linked provider is rejected rather than duplicated.
pub fn wearable_connect<S: WellnessStore>(
    storage: &S,
    params: WearableConnectParams,
) -> Result<WearableConnectResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let provider = WearableProvider::parse(&params.provider)
        .map_err(|e| ToolError::invalid(e.to_string()))?;
    let tier = match params.tier.as_deref() {
        Some(t) => Tier::parse(t).map_err(|e| ToolError::invalid(e.to_string()))?,
        None => Tier::Free,
    };

    let active = storage.active_wearable_links(&user_id)?;
    if tier == Tier::Free && active.len() >= FREE_TIER_LINK_LIMIT {
        return Err(ToolError::TierLimit(
            "Free tier allows only 1 wearable connection. Upgrade to the Connect \
             tier for unlimited wearables."
                .to_string(),
        ));
    }

    if storage.find_active_link(&user_id, provider)?.is_some() {
        return Err(ToolError::Storage(StorageError::DuplicateLink {
            provider: provider.as_str().to_string(),
        }));
    }

    let link = WearableLink::new(user_id, provider);
    storage.create_wearable_link(&link)?;

    // A real implementation would start the provider's OAuth flow here
    tracing::info!("User {} connected {}", params.user_id, provider.as_str());

    Ok(WearableConnectResponse {
        success: true,
        message: format!("Connected {}", provider.as_str()),
        link,
    })
}

/// Parameters for listing active wearable links
#[derive(Debug, Deserialize)]
pub struct WearableListParams {
    pub user_id: String,
}

/// Response listing a user's active wearable links
#[derive(Debug, Serialize)]
pub struct WearableListResponse {
    pub links: Vec<WearableLink>,
    pub count: usize,
}

/// List a user's active wearable links
pub fn wearable_list<S: WellnessStore>(
    storage: &S,
    params: WearableListParams,
) -> Result<WearableListResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let links = storage.active_wearable_links(&user_id)?;
    let count = links.len();
    Ok(WearableListResponse { links, count })
}

/// Parameters for disconnecting a wearable link
#[derive(Debug, Deserialize)]
pub struct WearableDisconnectParams {
    pub link_id: String,
}

/// Response from disconnecting a wearable
#[derive(Debug, Serialize)]
pub struct WearableDisconnectResponse {
    pub success: bool,
    pub message: String,
}

/// Soft-deactivate one wearable link
pub fn wearable_disconnect<S: WellnessStore>(
    storage: &S,
    params: WearableDisconnectParams,
) -> Result<WearableDisconnectResponse, ToolError> {
    let link_id = LinkId::from_string(&params.link_id)
        .map_err(|_| ToolError::invalid("Invalid link ID format"))?;

    storage.deactivate_wearable_link(&link_id)?;

    Ok(WearableDisconnectResponse {
        success: true,
        message: "Wearable disconnected".to_string(),
    })
}

/// Parameters for a simulated provider sync
#[derive(Debug, Deserialize)]
pub struct WearableSyncParams {
    pub user_id: String,
    pub provider: String,
}

/// One metric value pulled in by a sync
#[derive(Debug, Serialize)]
pub struct SyncedMetric {
    pub metric: String,
    pub value: f64,
}

/// Response from a simulated sync
#[derive(Debug, Serialize)]
pub struct WearableSyncResponse {
    pub message: String,
    pub synced_data: Vec<SyncedMetric>,
}

/// Pull simulated data from a connected provider
///
/// Each provider contributes its signature metric; providers without a stub
/// mapping sync successfully but bring no data.
pub fn wearable_sync<S: WellnessStore>(
    storage: &S,
    params: WearableSyncParams,
) -> Result<WearableSyncResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let provider = WearableProvider::parse(&params.provider)
        .map_err(|e| ToolError::invalid(e.to_string()))?;

    let link = storage.find_active_link(&user_id, provider)?;
    if link.is_none() {
        return Err(ToolError::invalid(format!(
            "Wearable {} is not connected",
            provider.as_str()
        )));
    }

    let mut rng = rand::rng();
    let synced = match provider {
        WearableProvider::AppleHealth => Some((
            MetricType::Steps,
            rng.random_range(3000..=12000) as f64,
        )),
        WearableProvider::Oura => Some((
            MetricType::SleepHours,
            (rng.random_range(5.5..9.0f64) * 10.0).round() / 10.0,
        )),
        _ => None,
    };

    let mut synced_data = Vec::new();
    if let Some((metric_type, value)) = synced {
        let record = MetricRecord::new(user_id, provider.into(), metric_type, value)
            .map_err(|e| ToolError::invalid(e.to_string()))?;
        storage.create_record(&record)?;
        synced_data.push(SyncedMetric {
            metric: metric_type.as_str().to_string(),
            value,
        });
    }

    Ok(WearableSyncResponse {
        message: format!("Synced data from {}", provider.as_str()),
        synced_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crate::storage::SqliteStorage;
    use tempfile::NamedTempFile;

    fn open_storage() -> (NamedTempFile, SqliteStorage) {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");
        (temp_file, storage)
    }

    fn connect(
        storage: &SqliteStorage,
        user: &UserId,
        provider: &str,
        tier: Option<&str>,
    ) -> Result<WearableConnectResponse, ToolError> {
        wearable_connect(
            storage,
            WearableConnectParams {
                user_id: user.to_string(),
                provider: provider.to_string(),
                tier: tier.map(String::from),
            },
        )
    }

    #[test]
    fn test_free_tier_is_limited_to_one_link() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        connect(&storage, &user, "oura", None).unwrap();
        let second = connect(&storage, &user, "garmin", None);
        assert!(matches!(second, Err(ToolError::TierLimit(_))));
    }

    #[test]
    fn test_connect_tier_allows_multiple_links() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        connect(&storage, &user, "oura", Some("connect")).unwrap();
        connect(&storage, &user, "garmin", Some("connect")).unwrap();

        let listed = wearable_list(
            &storage,
            WearableListParams { user_id: user.to_string() },
        )
        .unwrap();
        assert_eq!(listed.count, 2);
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        connect(&storage, &user, "oura", Some("baseline")).unwrap();
        let duplicate = connect(&storage, &user, "oura", Some("baseline"));
        assert!(matches!(
            duplicate,
            Err(ToolError::Storage(StorageError::DuplicateLink { .. }))
        ));
    }

    #[test]
    fn test_disconnect_frees_the_slot() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        let connected = connect(&storage, &user, "oura", None).unwrap();
        wearable_disconnect(
            &storage,
            WearableDisconnectParams { link_id: connected.link.id.to_string() },
        )
        .unwrap();

        // The free slot is free again
        connect(&storage, &user, "garmin", None).unwrap();
    }

    #[test]
    fn test_sync_requires_an_active_link() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();

        let result = wearable_sync(
            &storage,
            WearableSyncParams {
                user_id: user.to_string(),
                provider: "apple_health".to_string(),
            },
        );
        assert!(matches!(result, Err(ToolError::InvalidParams(_))));
    }

    #[test]
    fn test_apple_health_sync_inserts_a_steps_record() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        connect(&storage, &user, "apple_health", None).unwrap();

        let response = wearable_sync(
            &storage,
            WearableSyncParams {
                user_id: user.to_string(),
                provider: "apple_health".to_string(),
            },
        )
        .unwrap();

        assert_eq!(response.synced_data.len(), 1);
        assert_eq!(response.synced_data[0].metric, "steps");
        let value = response.synced_data[0].value;
        assert!((3000.0..=12000.0).contains(&value));

        let since = Utc::now() - Duration::days(1);
        let records = storage
            .recent_by_type(&user, MetricType::Steps, since)
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source.as_str(), "apple_health");
    }

    #[test]
    fn test_unmapped_provider_syncs_nothing() {
        let (_guard, storage) = open_storage();
        let user = UserId::new();
        connect(&storage, &user, "whoop", None).unwrap();

        let response = wearable_sync(
            &storage,
            WearableSyncParams {
                user_id: user.to_string(),
                provider: "whoop".to_string(),
            },
        )
        .unwrap();
        assert!(response.synced_data.is_empty());
    }
}
