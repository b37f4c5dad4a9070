use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::CategoryRow;
use crate::timefmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub created_date: String,
    pub updated_date: Option<String>,
}

impl From<CategoryRow> for CategoryDto {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            icon: row.icon,
            created_date: timefmt::format_wire(row.created_at),
            updated_date: row.updated_at.map(timefmt::format_wire),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub message: String,
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub message: String,
    pub category: CategoryDto,
}
