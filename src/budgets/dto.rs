use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::BudgetRow;
use crate::{money, timefmt};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDto {
    pub budget_id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub initial_amount: String,
    pub current_amount: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub created_date: String,
    pub updated_date: Option<String>,
}

impl From<BudgetRow> for BudgetDto {
    fn from(row: BudgetRow) -> Self {
        Self {
            budget_id: row.id,
            user_id: row.user_id,
            category_id: row.category_id,
            initial_amount: money::format_amount(row.initial_amount),
            current_amount: money::format_amount(row.current_amount),
            start_date: timefmt::format_wire(row.start_at),
            end_date: row.end_at.map(timefmt::format_wire),
            created_date: timefmt::format_wire(row.created_at),
            updated_date: row.updated_at.map(timefmt::format_wire),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    pub category_id: Uuid,
    pub initial_amount: String,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAmountRequest {
    pub budget_id: Uuid,
    pub update_amount: String,
    pub is_add_amount: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInitialAmountRequest {
    pub budget_id: Uuid,
    pub update_amount: String,
}

#[derive(Debug, Serialize)]
pub struct BudgetListResponse {
    pub success: bool,
    pub message: String,
    pub budgets: Vec<BudgetDto>,
}

#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    pub success: bool,
    pub message: String,
    pub budget: BudgetDto,
}
