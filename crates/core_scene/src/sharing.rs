//! Per-project sharing restrictions and viewing analytics.

use serde::{Deserialize, Serialize};

use crate::ids::ProjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareRestriction {
    Public,
    Private,
    InviteOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSharing {
    pub project_id: ProjectId,
    pub restriction: ShareRestriction,
    pub invitees: Vec<String>,
    pub password_protected: bool,
}

/// Aggregate viewing counters kept by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalytics {
    pub project_id: ProjectId,
    pub total_views: u64,
    pub last_viewed_at_ms: i64,
    pub snapshots_downloaded: u64,
}
