use serde::{Deserialize, Serialize};

/// A user together with the sizes of its follow sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub followings_count: u64,
    pub followers_count: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
