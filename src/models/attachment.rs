use crate::id::AttachmentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub id: AttachmentId,
    #[serde(default)]
    pub user_id: String,
    /// Id of the transaction the attachment belongs to.
    pub external_id: String,
    pub file_url: String,
    pub file_type: String,
    pub created: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub attachment_type: String,
    #[serde(default)]
    pub url: String,
}

/// Where to upload a file before registering it as an attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadUrl {
    pub file_url: String,
    pub upload_url: String,
}
