use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A quote response as returned by the routing service. The body is kept
/// verbatim so it can be handed back when the swap transaction is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub generation: u64,
    pub quote_response: Value,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(generation: u64, quote_response: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation,
            quote_response,
            created_at: Utc::now(),
        }
    }

    /// `outAmount` in base units, if the response carries a usable one.
    pub fn out_amount(&self) -> Option<u64> {
        match self.quote_response.get("outAmount")? {
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn out_amount_accepts_string_and_integer() {
        let quote = Quote::new(1, json!({ "outAmount": "9998099", "routePlan": [] }));
        assert_eq!(quote.out_amount(), Some(9_998_099));

        let quote = Quote::new(1, json!({ "outAmount": 42 }));
        assert_eq!(quote.out_amount(), Some(42));
    }

    #[test]
    fn out_amount_rejects_missing_or_malformed() {
        assert_eq!(Quote::new(1, json!({ "error": "no route" })).out_amount(), None);
        assert_eq!(Quote::new(1, json!({ "outAmount": "12.5" })).out_amount(), None);
        assert_eq!(Quote::new(1, json!({ "outAmount": -3 })).out_amount(), None);
        assert_eq!(Quote::new(1, json!({ "outAmount": null })).out_amount(), None);
        assert_eq!(Quote::new(1, json!("not an object")).out_amount(), None);
    }
}
