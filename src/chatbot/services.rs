use crate::error::ServiceError;
use crate::state::AppState;

/// Free-form question, raw model text back. No conversation memory.
pub async fn reply(state: &AppState, message: &str) -> Result<String, ServiceError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ServiceError::validation("Message is required"));
    }
    state
        .assistant
        .generate_from_text(message)
        .await
        .map_err(|err| ServiceError::External(format!("Assistant call failed: {err}")))
}

/// Prompt for turning a sentence like "lunch cost 40000 today" into a JSON
/// array of category/amount/note objects. Categories are numbered so the
/// model answers with an index rather than a free-text name.
pub fn build_parse_prompt(message: &str, categories: &[(usize, String)]) -> String {
    let list = categories
        .iter()
        .map(|(n, name)| format!("{n}: {name}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "The following is a request to add a transaction in a personal finance app: \"{message}\"\n\
         Available categories: {list}.\n\
         \n\
         Reply with this shape.\n\
         Example input: \"lunch today cost 40000\"\n\
         [\n\
           {{ \"category\": \"8\", \"amount\": 40000, \"note\": \"Lunch\" }}\n\
         ]\n\
         \n\
         Return only the JSON array, no other text. If the category or amount cannot \
         be determined, return an empty array []."
    )
}

/// Returns the raw model output unprocessed; the client does its own parsing.
pub async fn parse_transaction(state: &AppState, message: &str) -> Result<String, ServiceError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ServiceError::validation("Message is required"));
    }
    let mut names: Vec<String> = crate::categories::repo::name_lookup(&state.db)
        .await?
        .into_values()
        .collect();
    names.sort();
    let numbered: Vec<(usize, String)> = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| (i + 1, name))
        .collect();
    let prompt = build_parse_prompt(message, &numbered);
    state
        .assistant
        .generate_from_text(&prompt)
        .await
        .map_err(|err| ServiceError::External(format!("Assistant call failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn reply_returns_raw_model_text() {
        let state = AppState::fake();
        let reply = reply(&state, "how much did I spend?").await.unwrap();
        assert_eq!(reply, "[]");
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let state = AppState::fake();
        assert!(reply(&state, "   ").await.is_err());
    }

    #[test]
    fn parse_prompt_numbers_categories() {
        let cats = vec![(1, "Food".to_string()), (2, "Salary".to_string())];
        let prompt = build_parse_prompt("lunch 40000", &cats);
        assert!(prompt.contains("1: Food, 2: Salary"));
        assert!(prompt.contains("\"lunch 40000\""));
        assert!(prompt.contains("empty array"));
    }
}
