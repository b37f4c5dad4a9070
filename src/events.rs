//! Domain events for the notification side-channel.
//!
//! Domain services publish an event after their own write commits; the sink
//! decides what to do with it. The production sink renders the event into
//! notification text and inserts a row. Publishing is deliberately outside the
//! data transaction: a lost notification is acceptable, a notification for a
//! rolled-back write is not.

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::money::format_grouped;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    BudgetCreated { user_id: Uuid },
    BudgetLimitChanged { user_id: Uuid },
    BudgetDeleted { user_id: Uuid },
    GoalCreated { user_id: Uuid, title: String, target: i64, deadline: Option<String> },
    GoalAmountChanged { user_id: Uuid, title: String, added: bool, amount: i64, total: i64 },
    GoalDeleted { user_id: Uuid, title: String },
    TransactionRecorded { user_id: Uuid },
    TransactionUpdated { user_id: Uuid },
}

impl DomainEvent {
    pub fn user_id(&self) -> Uuid {
        match self {
            DomainEvent::BudgetCreated { user_id }
            | DomainEvent::BudgetLimitChanged { user_id }
            | DomainEvent::BudgetDeleted { user_id }
            | DomainEvent::GoalCreated { user_id, .. }
            | DomainEvent::GoalAmountChanged { user_id, .. }
            | DomainEvent::GoalDeleted { user_id, .. }
            | DomainEvent::TransactionRecorded { user_id }
            | DomainEvent::TransactionUpdated { user_id } => *user_id,
        }
    }

    /// Notification text shown to the user.
    pub fn message(&self) -> String {
        match self {
            DomainEvent::BudgetCreated { .. } => "Budget created successfully.".into(),
            DomainEvent::BudgetLimitChanged { .. } => {
                "The initial amount of one of your budgets was updated.".into()
            }
            DomainEvent::BudgetDeleted { .. } => "You deleted a budget.".into(),
            DomainEvent::GoalCreated { title, target, deadline, .. } => {
                let deadline_text = match deadline {
                    Some(d) => format!("due {d}"),
                    None => "with no deadline".into(),
                };
                format!(
                    "You created the saving goal '{title}' with a target of {} VND, {deadline_text}.",
                    format_grouped(*target)
                )
            }
            DomainEvent::GoalAmountChanged { title, added, amount, total, .. } => {
                let action = if *added { "added" } else { "withdrew" };
                format!(
                    "You {action} {} VND for the goal '{title}'. Current amount: {} VND.",
                    format_grouped(*amount),
                    format_grouped(*total)
                )
            }
            DomainEvent::GoalDeleted { title, .. } => {
                format!("You deleted the saving goal '{title}'.")
            }
            DomainEvent::TransactionRecorded { .. } => "You added a new transaction!".into(),
            DomainEvent::TransactionUpdated { .. } => "You edited a transaction!".into(),
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, event: DomainEvent) -> anyhow::Result<()>;
}

/// Production sink: one notification row per event.
pub struct NotificationSink {
    db: PgPool,
}

impl NotificationSink {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventSink for NotificationSink {
    async fn publish(&self, event: DomainEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, content, is_read, created_at)
            VALUES ($1, $2, $3, false, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.user_id())
        .bind(event.message())
        .bind(OffsetDateTime::now_utc())
        .execute(&self.db)
        .await?;
        Ok(())
    }
}

/// In-memory sink so tests can assert on published events without a
/// notification store.
#[derive(Default)]
pub struct MemorySink {
    events: std::sync::Mutex<Vec<DomainEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events.lock().expect("sink lock"))
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn publish(&self, event: DomainEvent) -> anyhow::Result<()> {
        self.events.lock().expect("sink lock").push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_created_message_includes_grouped_target_and_deadline() {
        let msg = DomainEvent::GoalCreated {
            user_id: Uuid::new_v4(),
            title: "New bike".into(),
            target: 2_500_000,
            deadline: Some("01/12/2025 00:00:00".into()),
        }
        .message();
        assert!(msg.contains("'New bike'"));
        assert!(msg.contains("2,500,000 VND"));
        assert!(msg.contains("due 01/12/2025 00:00:00"));
    }

    #[test]
    fn goal_amount_message_distinguishes_add_and_withdraw() {
        let add = DomainEvent::GoalAmountChanged {
            user_id: Uuid::new_v4(),
            title: "Trip".into(),
            added: true,
            amount: 40_000,
            total: 140_000,
        };
        assert!(add.message().contains("added 40,000 VND"));
        assert!(add.message().contains("Current amount: 140,000 VND"));

        let withdraw = DomainEvent::GoalAmountChanged {
            user_id: Uuid::new_v4(),
            title: "Trip".into(),
            added: false,
            amount: 40_000,
            total: 100_000,
        };
        assert!(withdraw.message().contains("withdrew 40,000 VND"));
    }

    #[tokio::test]
    async fn memory_sink_records_events() {
        let sink = MemorySink::new();
        let user_id = Uuid::new_v4();
        sink.publish(DomainEvent::BudgetCreated { user_id })
            .await
            .unwrap();
        sink.publish(DomainEvent::BudgetDeleted { user_id })
            .await
            .unwrap();
        let events = sink.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], DomainEvent::BudgetCreated { user_id });
        assert!(sink.drain().is_empty());
    }
}
