use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::NotificationRow;
use crate::timefmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_date: String,
}

impl From<NotificationRow> for NotificationDto {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            is_read: row.is_read,
            created_date: timefmt::format_wire(row.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PushNotificationRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub success: bool,
    pub message: String,
    pub notifications: Vec<NotificationDto>,
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub message: String,
    pub notification: NotificationDto,
}
