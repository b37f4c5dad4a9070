use bytes::Bytes;
use tracing::{error, warn};

use super::dto::{DraftTransaction, ExtractedItem};
use crate::error::ServiceError;
use crate::money;
use crate::state::AppState;
use crate::transactions::services::KIND_EXPENSE;

/// Asks for a strict JSON array so `extract_items` has something to find even
/// when the model wraps it in prose or code fences.
pub fn build_receipt_prompt(categories: &[String]) -> String {
    let list = categories.join(", ");
    format!(
        "Analyse this receipt image and return a JSON array of objects with fields:\n\
         - category (one of: {list})\n\
         - amount (integer, VND)\n\
         - note (short item description)\n\
         \n\
         Read the price of every line item, account for tax or discounts, assign each \
         item to the best matching category and sum the amounts per category. Skip \
         categories with no items.\n\
         \n\
         Example output:\n\
         [\n\
           {{\"category\": \"Food\", \"amount\": 20000, \"note\": \"Crab noodles\"}},\n\
           {{\"category\": \"Other\", \"amount\": 15000, \"note\": \"Plastic bag\"}}\n\
         ]\n\
         \n\
         Return only the JSON array, no other text. If the image is unreadable or is \
         not a receipt, return an empty array []."
    )
}

/// Pulls the first `[...]` span out of free-form model output and parses it.
/// Retries once with single quotes rewritten, then gives up with an empty list.
pub fn extract_items(text: &str) -> Vec<ExtractedItem> {
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        warn!("no JSON array in model output");
        return Vec::new();
    };
    if end < start {
        warn!("no JSON array in model output");
        return Vec::new();
    }
    let json = &text[start..=end];
    match serde_json::from_str::<Vec<ExtractedItem>>(json) {
        Ok(items) => items,
        Err(first) => {
            let fixed = json.replace('\'', "\"");
            serde_json::from_str::<Vec<ExtractedItem>>(&fixed).unwrap_or_else(|_| {
                warn!(%first, "model output is not a parsable JSON array");
                Vec::new()
            })
        }
    }
}

/// One model round trip. The assistant call failing or producing garbage is a
/// normal outcome here and collapses to an empty draft list.
pub async fn scan(
    state: &AppState,
    image: Bytes,
    mime: &str,
) -> Result<Vec<DraftTransaction>, ServiceError> {
    let categories: Vec<String> = crate::categories::repo::name_lookup(&state.db)
        .await?
        .into_values()
        .collect();
    let prompt = build_receipt_prompt(&categories);

    let reply = match state.assistant.generate_from_image(&prompt, image, mime).await {
        Ok(reply) => reply,
        Err(err) => {
            error!(error = %err, "receipt extraction call failed");
            return Ok(Vec::new());
        }
    };

    let drafts = extract_items(&reply)
        .into_iter()
        .filter(|item| item.amount >= 1.0)
        .map(|item| DraftTransaction {
            category: item.category,
            kind: KIND_EXPENSE.to_string(),
            amount: money::format_amount(item.amount.round() as i64),
            note: item.note.filter(|n| !n.trim().is_empty()),
        })
        .collect();
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_array_from_code_fence() {
        let text = "Here you go:\n```json\n[{\"category\": \"Food\", \"amount\": 20000, \"note\": \"Pho\"}]\n```";
        let items = extract_items(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Food");
        assert_eq!(items[0].amount, 20000.0);
        assert_eq!(items[0].note.as_deref(), Some("Pho"));
    }

    #[test]
    fn recovers_from_single_quotes() {
        let text = "[{'category': 'Other', 'amount': 5000}]";
        let items = extract_items(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Other");
        assert!(items[0].note.is_none());
    }

    #[test]
    fn garbage_yields_empty_list() {
        assert!(extract_items("sorry, I cannot read this image").is_empty());
        assert!(extract_items("] backwards [").is_empty());
        assert!(extract_items("[not json at all]").is_empty());
    }

    #[test]
    fn empty_array_yields_empty_list() {
        assert!(extract_items("[]").is_empty());
    }

    #[test]
    fn prompt_names_every_category() {
        let prompt = build_receipt_prompt(&["Food".into(), "Transport".into()]);
        assert!(prompt.contains("Food, Transport"));
        assert!(prompt.contains("empty array"));
    }
}
