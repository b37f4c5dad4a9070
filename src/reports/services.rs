use std::collections::HashMap;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::money;
use crate::state::AppState;
use crate::timefmt;
use crate::transactions::repo::TransactionRow;
use crate::transactions::services::KIND_INCOME;

const DAY: &[FormatItem<'_>] = format_description!("[day]-[month]-[year]");

fn parse_day(s: &str) -> Result<Date, ServiceError> {
    Date::parse(s.trim(), DAY)
        .map_err(|_| ServiceError::validation(format!("Invalid date '{s}', expected dd-MM-yyyy")))
}

/// Renders the income and expense sections with per-row category names and a
/// total per section. Spreadsheet apps open the CSV directly.
pub fn render_csv(
    transactions: &[TransactionRow],
    categories: &HashMap<Uuid, String>,
) -> Result<Vec<u8>, ServiceError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let (income, expense): (Vec<_>, Vec<_>) = transactions
        .iter()
        .partition(|tx| tx.kind == KIND_INCOME);

    for (title, rows) in [("INCOME", income), ("EXPENSE", expense)] {
        writer
            .write_record([title])
            .map_err(|err| ServiceError::Internal(format!("CSV write failed: {err}")))?;
        writer
            .write_record(["No.", "Category", "Amount", "Date", "Note"])
            .map_err(|err| ServiceError::Internal(format!("CSV write failed: {err}")))?;
        let mut total: i64 = 0;
        for (n, tx) in rows.iter().enumerate() {
            let category = categories
                .get(&tx.category_id)
                .map(String::as_str)
                .unwrap_or("Unknown");
            writer
                .write_record([
                    (n + 1).to_string(),
                    category.to_string(),
                    money::format_amount(tx.amount),
                    timefmt::format_wire(tx.created_at),
                    tx.note.clone().unwrap_or_default(),
                ])
                .map_err(|err| ServiceError::Internal(format!("CSV write failed: {err}")))?;
            total += tx.amount;
        }
        let total = money::format_amount(total);
        writer
            .write_record(["Total", "", total.as_str()])
            .map_err(|err| ServiceError::Internal(format!("CSV write failed: {err}")))?;
        writer
            .write_record([""])
            .map_err(|err| ServiceError::Internal(format!("CSV write failed: {err}")))?;
    }

    writer
        .into_inner()
        .map_err(|err| ServiceError::Internal(format!("CSV flush failed: {err}")))
}

/// Loads the caller's transactions inside the inclusive `[start, end]` day
/// range and returns the CSV bytes plus the download filename.
pub async fn export(
    state: &AppState,
    user_id: Uuid,
    start: &str,
    end: &str,
) -> Result<(Vec<u8>, String), ServiceError> {
    let from_day = parse_day(start)?;
    let to_day = parse_day(end)?;
    if to_day < from_day {
        return Err(ServiceError::validation("End date is before start date"));
    }
    let from = PrimitiveDateTime::new(from_day, Time::MIDNIGHT).assume_utc();
    let to = PrimitiveDateTime::new(to_day, Time::MAX).assume_utc();

    let transactions =
        crate::transactions::repo::list_in_range(&state.db, user_id, from, to).await?;
    let categories = crate::categories::repo::name_lookup(&state.db).await?;

    let bytes = render_csv(&transactions, &categories)?;
    let filename = format!("transactions_{}_{}.csv", start.trim(), end.trim());
    Ok((bytes, filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn row(kind: &str, amount: i64, category_id: Uuid, note: Option<&str>) -> TransactionRow {
        TransactionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category_id,
            kind: kind.to_string(),
            amount,
            note: note.map(str::to_string),
            created_at: datetime!(2025-03-07 09:05:00 UTC),
            updated_at: None,
        }
    }

    #[test]
    fn renders_sections_with_totals() {
        let food = Uuid::new_v4();
        let salary = Uuid::new_v4();
        let categories = HashMap::from([
            (food, "Food".to_string()),
            (salary, "Salary".to_string()),
        ]);
        let rows = vec![
            row("income", 1_000_000, salary, None),
            row("expense", 40_000, food, Some("Lunch")),
            row("expense", 15_000, food, None),
        ];

        let bytes = render_csv(&rows, &categories).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("INCOME"));
        assert!(text.contains("EXPENSE"));
        assert!(text.contains("Salary,1000000"));
        assert!(text.contains("Food,40000"));
        assert!(text.contains("Lunch"));
        assert!(text.contains("Total,,1000000"));
        assert!(text.contains("Total,,55000"));
    }

    #[test]
    fn unknown_category_is_labelled() {
        let rows = vec![row("expense", 500, Uuid::new_v4(), None)];
        let bytes = render_csv(&rows, &HashMap::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Unknown"));
    }

    #[test]
    fn empty_range_still_renders_headers() {
        let bytes = render_csv(&[], &HashMap::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("INCOME"));
        assert!(text.contains("Total,,0"));
    }

    #[test]
    fn day_parsing_accepts_wire_shape_only() {
        assert!(parse_day("07-03-2025").is_ok());
        assert!(parse_day(" 07-03-2025 ").is_ok());
        assert!(parse_day("2025-03-07").is_err());
        assert!(parse_day("07/03/2025").is_err());
    }
}
