//! Month rollover: when a new calendar month starts, every budget of the last
//! recorded month is cloned into the new one with its spending reset.
//!
//! Runs from a single background task and writes the clone set in one
//! transaction, so a restart mid-rollover cannot leave a partial month behind.

use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;

use super::repo::{self, BudgetRow, NewBudget};
use crate::timefmt;

/// Clones prior-month budgets into the month containing `now`: spending resets
/// to zero, the allotment carries over.
pub fn clone_into_month(prior: &[BudgetRow], now: OffsetDateTime) -> Vec<NewBudget> {
    prior
        .iter()
        .map(|old| NewBudget {
            user_id: old.user_id,
            category_id: old.category_id,
            initial_amount: old.initial_amount,
            current_amount: 0,
            start_at: old.start_at,
            end_at: old.end_at,
            created_at: now,
            updated_at: Some(now),
        })
        .collect()
}

/// Checks the most recent budget's month against now and clones the prior
/// month's budgets if a new month has started. Returns how many were created.
pub async fn run_monthly_rollover(db: &PgPool) -> anyhow::Result<usize> {
    let now = OffsetDateTime::now_utc();

    let Some(latest) = repo::latest_created(db).await? else {
        info!("no budgets yet, skipping month rollover");
        return Ok(0);
    };

    if timefmt::same_month(latest.created_at, now) {
        return Ok(0);
    }

    let (from, to) = timefmt::month_bounds(latest.created_at);
    let prior = repo::list_all_created_between(db, from, to).await?;
    if prior.is_empty() {
        return Ok(0);
    }

    let clones = clone_into_month(&prior, now);
    let mut tx = db.begin().await?;
    repo::insert_many_tx(&mut tx, &clones).await?;
    tx.commit().await?;

    info!(
        count = clones.len(),
        month = %now.month(),
        year = now.year(),
        "created budgets for the new month"
    );
    Ok(clones.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn budget(initial: i64, current: i64, created_at: OffsetDateTime) -> BudgetRow {
        BudgetRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            initial_amount: initial,
            current_amount: current,
            start_at: created_at,
            end_at: None,
            created_at,
            updated_at: None,
        }
    }

    #[test]
    fn one_clone_per_prior_budget_with_spending_reset() {
        let created = datetime!(2025-02-10 08:00:00 UTC);
        let prior = vec![
            budget(1_000_000, 750_000, created),
            budget(300_000, 0, created),
            budget(50_000, 50_000, created),
        ];
        let now = datetime!(2025-03-01 00:10:00 UTC);

        let clones = clone_into_month(&prior, now);
        assert_eq!(clones.len(), prior.len());
        for (old, new) in prior.iter().zip(&clones) {
            assert_eq!(new.user_id, old.user_id);
            assert_eq!(new.category_id, old.category_id);
            assert_eq!(new.initial_amount, old.initial_amount);
            assert_eq!(new.current_amount, 0);
            assert_eq!(new.created_at, now);
        }
    }

    #[test]
    fn empty_prior_month_produces_no_clones() {
        let clones = clone_into_month(&[], datetime!(2025-03-01 00:00:00 UTC));
        assert!(clones.is_empty());
    }
}
