use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserRef;

/// Comment on an auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CommentRecord")]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    pub user: Option<UserRef>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CommentRecord {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    user: Option<UserRef>,
    timestamp: DateTime<Utc>,
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.object_id.or(record.id),
            text: record.text,
            user: record.user,
            timestamp: record.timestamp,
        }
    }
}

impl Comment {
    pub fn author_email(&self) -> &str {
        self.user.as_ref().map(|u| u.email.as_str()).unwrap_or("")
    }
}
