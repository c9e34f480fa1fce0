/// WearableLink entity for connected data sources
///
/// A link records that a user has connected an external wearable provider.
/// Links are soft-deactivated rather than deleted; only active links feed
/// the insight engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LinkId, UserId, WearableProvider};

/// A user's connection to a wearable data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearableLink {
    /// Unique identifier for this link
    pub id: LinkId,
    /// Which user owns this link
    pub user_id: UserId,
    /// The connected provider
    pub provider: WearableProvider,
    /// When the connection was made
    pub connected_at: DateTime<Utc>,
    /// Whether the link is currently active
    pub is_active: bool,
}

impl WearableLink {
    /// Create a new active link, timestamped now
    pub fn new(user_id: UserId, provider: WearableProvider) -> Self {
        Self {
            id: LinkId::new(),
            user_id,
            provider,
            connected_at: Utc::now(),
            is_active: true,
        }
    }

    /// Create a link from existing data (used when loading from database)
    pub fn from_existing(
        id: LinkId,
        user_id: UserId,
        provider: WearableProvider,
        connected_at: DateTime<Utc>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            user_id,
            provider,
            connected_at,
            is_active,
        }
    }

    /// Soft-deactivate this link
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
