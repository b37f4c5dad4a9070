use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::dto::{CreateGoalRequest, UpdateGoalAmountRequest};
use super::repo::{self, GoalRow, NewGoal};
use crate::accounts;
use crate::error::ServiceError;
use crate::events::DomainEvent;
use crate::money;
use crate::state::AppState;
use crate::timefmt;

pub async fn list(state: &AppState, user_id: Uuid) -> Result<Vec<GoalRow>, ServiceError> {
    Ok(repo::list_by_user(&state.db, user_id).await?)
}

pub async fn create(
    state: &AppState,
    user_id: Uuid,
    req: CreateGoalRequest,
) -> Result<GoalRow, ServiceError> {
    if req.title.trim().is_empty() {
        return Err(ServiceError::validation("Goal title is required"));
    }
    let target = money::parse_positive_amount(&req.target_amount)?;
    let current = match &req.current_amount {
        Some(s) => money::parse_amount(s)?,
        None => 0,
    };
    let deadline = req
        .deadline
        .as_deref()
        .map(timefmt::parse_wire)
        .transpose()?;

    let row = repo::insert(
        &state.db,
        NewGoal {
            user_id,
            category_id: req.category_id,
            title: req.title.trim().to_string(),
            target_amount: target,
            current_amount: current,
            deadline,
        },
    )
    .await?;

    let _ = state
        .events
        .publish(DomainEvent::GoalCreated {
            user_id,
            title: row.title.clone(),
            target: row.target_amount,
            deadline: row.deadline.map(timefmt::format_wire),
        })
        .await;

    info!(goal_id = %row.id, %user_id, "saving goal created");
    Ok(row)
}

/// Moves money between the saving goal and the user's account: adding to the
/// goal debits the account, withdrawing credits it back. Goal and balance are
/// written in one transaction.
pub async fn update_amount(
    state: &AppState,
    user_id: Uuid,
    req: UpdateGoalAmountRequest,
) -> Result<GoalRow, ServiceError> {
    let amount = money::parse_positive_amount(&req.update_amount)?;
    let goal = find_owned(state, req.goal_id, user_id).await?;

    let new_total = if req.is_add_amount {
        goal.current_amount
            .checked_add(amount)
            .ok_or_else(|| ServiceError::validation("Amount out of range"))?
    } else {
        let next = goal.current_amount - amount;
        if next < 0 {
            return Err(ServiceError::validation(
                "Cannot withdraw more than the goal's current amount",
            ));
        }
        next
    };
    let balance_delta = if req.is_add_amount { -amount } else { amount };

    let mut tx = state.db.begin().await?;
    repo::set_current_amount_tx(&mut tx, goal.id, new_total).await?;
    accounts::services::adjust_balance(&mut tx, user_id, balance_delta).await?;
    tx.commit().await?;

    let _ = state
        .events
        .publish(DomainEvent::GoalAmountChanged {
            user_id,
            title: goal.title.clone(),
            added: req.is_add_amount,
            amount,
            total: new_total,
        })
        .await;

    Ok(GoalRow {
        current_amount: new_total,
        updated_at: Some(OffsetDateTime::now_utc()),
        ..goal
    })
}

pub async fn delete(state: &AppState, id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
    let goal = find_owned(state, id, user_id).await?;
    if !repo::delete_for_user(&state.db, id, user_id).await? {
        return Err(ServiceError::not_found(format!("Saving goal {id} not found")));
    }
    let _ = state
        .events
        .publish(DomainEvent::GoalDeleted {
            user_id,
            title: goal.title,
        })
        .await;
    Ok(())
}

async fn find_owned(state: &AppState, id: Uuid, user_id: Uuid) -> Result<GoalRow, ServiceError> {
    let goal = repo::find(&state.db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Saving goal {id} not found")))?;
    if goal.user_id != user_id {
        return Err(ServiceError::not_found(format!("Saving goal {id} not found")));
    }
    Ok(goal)
}
