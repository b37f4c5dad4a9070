use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::dto::{CreateBudgetRequest, UpdateAmountRequest, UpdateInitialAmountRequest};
use super::repo::{self, BudgetRow, NewBudget};
use crate::error::ServiceError;
use crate::events::DomainEvent;
use crate::money;
use crate::state::AppState;
use crate::timefmt;

/// Caps the current amount inside `[0, initial]`. Both violations are plain
/// validation failures; the caller's stored value stays unchanged.
pub fn apply_amount_change(
    current: i64,
    initial: i64,
    delta: i64,
    is_add: bool,
) -> Result<i64, ServiceError> {
    if is_add {
        let next = current
            .checked_add(delta)
            .ok_or_else(|| ServiceError::validation("Amount out of range"))?;
        if next > initial {
            return Err(ServiceError::validation(
                "Amount exceeds the budget's initial amount",
            ));
        }
        Ok(next)
    } else {
        let next = current - delta;
        if next < 0 {
            return Err(ServiceError::validation("Amount cannot go below zero"));
        }
        Ok(next)
    }
}

/// Budgets created in the current calendar month.
pub async fn list_current_month(
    state: &AppState,
    user_id: Uuid,
) -> Result<Vec<BudgetRow>, ServiceError> {
    let (from, to) = timefmt::month_bounds(OffsetDateTime::now_utc());
    Ok(repo::list_created_between(&state.db, user_id, from, to).await?)
}

pub async fn create(
    state: &AppState,
    user_id: Uuid,
    req: CreateBudgetRequest,
) -> Result<BudgetRow, ServiceError> {
    let initial = money::parse_amount(&req.initial_amount)?;
    let end_at = req
        .end_date
        .as_deref()
        .map(timefmt::parse_wire)
        .transpose()?;

    let now = OffsetDateTime::now_utc();
    let row = repo::insert(
        &state.db,
        NewBudget {
            user_id,
            category_id: req.category_id,
            initial_amount: initial,
            current_amount: 0,
            start_at: now,
            end_at,
            created_at: now,
            updated_at: None,
        },
    )
    .await?;

    let _ = state
        .events
        .publish(DomainEvent::BudgetCreated { user_id })
        .await;

    info!(budget_id = %row.id, %user_id, "budget created");
    Ok(row)
}

pub async fn update_current_amount(
    state: &AppState,
    user_id: Uuid,
    req: UpdateAmountRequest,
) -> Result<BudgetRow, ServiceError> {
    let delta = money::parse_amount(&req.update_amount)?;
    let budget = find_owned(state, req.budget_id, user_id).await?;

    let next = apply_amount_change(
        budget.current_amount,
        budget.initial_amount,
        delta,
        req.is_add_amount,
    )?;
    repo::set_current_amount(&state.db, budget.id, next).await?;

    Ok(BudgetRow {
        current_amount: next,
        updated_at: Some(OffsetDateTime::now_utc()),
        ..budget
    })
}

pub async fn update_initial_amount(
    state: &AppState,
    user_id: Uuid,
    req: UpdateInitialAmountRequest,
) -> Result<BudgetRow, ServiceError> {
    let new_initial = money::parse_amount(&req.update_amount)?;
    let budget = find_owned(state, req.budget_id, user_id).await?;

    if new_initial < budget.current_amount {
        return Err(ServiceError::validation(
            "New initial amount is below the budget's current amount",
        ));
    }
    repo::set_initial_amount(&state.db, budget.id, new_initial).await?;

    let _ = state
        .events
        .publish(DomainEvent::BudgetLimitChanged { user_id })
        .await;

    Ok(BudgetRow {
        initial_amount: new_initial,
        updated_at: Some(OffsetDateTime::now_utc()),
        ..budget
    })
}

pub async fn delete(state: &AppState, id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
    if !repo::delete_for_user(&state.db, id, user_id).await? {
        return Err(ServiceError::not_found(format!("Budget {id} not found")));
    }
    let _ = state
        .events
        .publish(DomainEvent::BudgetDeleted { user_id })
        .await;
    Ok(())
}

async fn find_owned(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> Result<BudgetRow, ServiceError> {
    let budget = repo::find(&state.db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Budget {id} not found")))?;
    if budget.user_id != user_id {
        // Same envelope as a miss; no cross-user probing
        return Err(ServiceError::not_found(format!("Budget {id} not found")));
    }
    Ok(budget)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_within_the_cap_is_applied() {
        assert_eq!(apply_amount_change(0, 1_000_000, 500_000, true).unwrap(), 500_000);
    }

    #[test]
    fn add_beyond_initial_is_rejected() {
        // 500,000 + 600,000 > 1,000,000
        let err = apply_amount_change(500_000, 1_000_000, 600_000, true).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn add_exactly_to_the_cap_is_allowed() {
        assert_eq!(
            apply_amount_change(400_000, 1_000_000, 600_000, true).unwrap(),
            1_000_000
        );
    }

    #[test]
    fn subtract_below_zero_is_rejected() {
        let err = apply_amount_change(100, 1_000, 200, false).unwrap_err();
        assert!(err.to_string().contains("below zero"));
        assert_eq!(apply_amount_change(200, 1_000, 200, false).unwrap(), 0);
    }

    #[test]
    fn cap_holds_across_successive_adds() {
        let initial = 1_000_000;
        let current = apply_amount_change(0, initial, 500_000, true).unwrap();
        assert_eq!(current, 500_000);
        assert!(apply_amount_change(current, initial, 600_000, true).is_err());
    }
}
