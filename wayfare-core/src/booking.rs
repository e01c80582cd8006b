use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const MISSING_PAYLOAD: &str = "A booking payload object is required.";
pub const MISSING_FLIGHT: &str = "Flight details are required.";
pub const MISSING_HOTEL: &str = "Hotel details are required.";
pub const MISSING_USER: &str = "User details are required.";
pub const MISSING_PAYMENT: &str = "Payment details are required.";

/// Structural check of a booking payload.
///
/// Returns the first failing check's message, in the order payload, flight,
/// hotel, user, payment; `None` when every section is a JSON object.
pub fn validate_booking_payload(payload: &Value) -> Option<&'static str> {
    let Some(fields) = payload.as_object() else {
        return Some(MISSING_PAYLOAD);
    };

    [
        ("flight", MISSING_FLIGHT),
        ("hotel", MISSING_HOTEL),
        ("user", MISSING_USER),
        ("payment", MISSING_PAYMENT),
    ]
    .into_iter()
    .find(|(key, _)| !fields.get(*key).is_some_and(Value::is_object))
    .map(|(_, message)| message)
}

/// The persisted form of a booking: the request payload with the raw
/// `payment` section replaced by `{ "transactionId": ... }` and the top-level
/// `transactionId` folded into it. Card data never reaches storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingRecord(Map<String, Value>);

impl BookingRecord {
    pub fn from_payload(mut payload: Map<String, Value>) -> Self {
        let payment = payload.remove("payment");
        let top_level = payload.remove("transactionId");

        let transaction_id = top_level
            .filter(is_present)
            .or_else(|| {
                payment
                    .as_ref()
                    .and_then(|p| p.get("transactionId"))
                    .cloned()
                    .filter(is_present)
            })
            .unwrap_or(Value::Null);

        payload.insert("payment".to_string(), json!({ "transactionId": transaction_id }));
        Self(payload)
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.0
            .get("payment")
            .and_then(|p| p.get("transactionId"))
            .and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Falsy ids (`null`, `false`, `0`, `""`) count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}
