use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps sensitive data (card numbers, payment tokens) so that it never shows up
/// in `Debug`/`Display` output, e.g. `tracing::info!("{:?}", payment)`.
///
/// Serialization passes the inner value through untouched; callers that persist
/// data are expected to drop sensitive fields before writing.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Keeps only the last four digits of a card number: `"4242 4242 4242 4242"` -> `"**** 4242"`.
pub fn redact_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return "****".to_string();
    }
    let last4: String = digits[digits.len() - 4..].iter().collect();
    format!("**** {}", last4)
}
