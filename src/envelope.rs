use serde::{Deserialize, Serialize};

/// Minimal response envelope used by update/delete endpoints and all error paths.
/// Endpoints with a payload define their own response struct carrying the same
/// two leading fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_the_wire_shape() {
        let v = serde_json::to_value(StatusResponse::ok("Budget deleted")).unwrap();
        assert_eq!(v, serde_json::json!({"success": true, "message": "Budget deleted"}));
    }
}
