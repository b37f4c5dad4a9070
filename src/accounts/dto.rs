use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::AccountRow;
use crate::{money, timefmt};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub account_id: Uuid,
    pub user_id: Uuid,
    pub balance: String,
    pub created_date: String,
    pub updated_date: Option<String>,
}

impl From<AccountRow> for AccountDto {
    fn from(row: AccountRow) -> Self {
        Self {
            account_id: row.id,
            user_id: row.user_id,
            balance: money::format_amount(row.balance),
            created_date: timefmt::format_wire(row.created_at),
            updated_date: row.updated_at.map(timefmt::format_wire),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub success: bool,
    pub message: String,
    pub account: AccountDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn balance_goes_on_the_wire_as_a_digit_string() {
        let dto = AccountDto::from(AccountRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            balance: 1_250_000,
            created_at: datetime!(2025-02-01 08:30:00 UTC),
            updated_at: None,
        });
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(v["balance"], "1250000");
        assert_eq!(v["createdDate"], "01/02/2025 08:30:00");
        assert!(v["updatedDate"].is_null());
    }
}
