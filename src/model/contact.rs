use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    /// The service the sender is asking about.
    pub service: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
    pub service: String,
}
