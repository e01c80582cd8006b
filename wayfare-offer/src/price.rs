//! Suppliers report prices as JSON numbers or as decimal strings ("512.34").

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    fn into_f64<E: Error>(self) -> Result<f64, E> {
        match self {
            RawPrice::Number(n) => Ok(n),
            RawPrice::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| E::custom(format!("invalid price {:?}: {}", s, e))),
        }
    }
}

pub(crate) fn flexible<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawPrice::deserialize(deserializer)?.into_f64()
}

pub(crate) fn flexible_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawPrice>::deserialize(deserializer)?
        .map(RawPrice::into_f64)
        .transpose()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "super::flexible")]
        total: f64,
        #[serde(default, deserialize_with = "super::flexible_opt")]
        min_rate: Option<f64>,
    }

    #[test]
    fn test_number_and_string_prices() {
        let p: Priced = serde_json::from_value(json!({ "total": "512.34", "min_rate": 99 })).unwrap();
        assert_eq!(p.total, 512.34);
        assert_eq!(p.min_rate, Some(99.0));

        let p: Priced = serde_json::from_value(json!({ "total": 10.5 })).unwrap();
        assert_eq!(p.total, 10.5);
        assert_eq!(p.min_rate, None);
    }

    #[test]
    fn test_garbage_price_is_an_error() {
        assert!(serde_json::from_value::<Priced>(json!({ "total": "cheap" })).is_err());
    }
}
