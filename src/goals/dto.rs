use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::GoalRow;
use crate::{money, timefmt};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoalDto {
    pub goal_id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: Option<String>,
    pub created_date: String,
    pub updated_date: Option<String>,
}

impl From<GoalRow> for SavingGoalDto {
    fn from(row: GoalRow) -> Self {
        Self {
            goal_id: row.id,
            user_id: row.user_id,
            category_id: row.category_id,
            title: row.title,
            target_amount: money::format_amount(row.target_amount),
            current_amount: money::format_amount(row.current_amount),
            deadline: row.deadline.map(timefmt::format_wire),
            created_date: timefmt::format_wire(row.created_at),
            updated_date: row.updated_at.map(timefmt::format_wire),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub category_id: Uuid,
    pub title: String,
    pub target_amount: String,
    #[serde(default)]
    pub current_amount: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalAmountRequest {
    pub goal_id: Uuid,
    pub update_amount: String,
    pub is_add_amount: bool,
}

#[derive(Debug, Serialize)]
pub struct GoalListResponse {
    pub success: bool,
    pub message: String,
    pub goals: Vec<SavingGoalDto>,
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub success: bool,
    pub message: String,
    pub goal: SavingGoalDto,
}
