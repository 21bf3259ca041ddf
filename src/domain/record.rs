// ============================================================================
// Money Wire Shape
// JSON representation: {"assetId": "...", "tokens": "..."}
// ============================================================================

use super::{AssetId, Money};
use crate::error::Result;
use crate::numeric::parse_decimal;
use crate::registry::AssetRegistry;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Untyped-boundary twin of [`Money`]: the asset is only named, not resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoneyRecord {
    #[serde(rename = "assetId")]
    pub asset_id: AssetId,
    pub tokens: String,
}

impl From<&Money> for MoneyRecord {
    fn from(money: &Money) -> Self {
        Self {
            asset_id: money.asset_id().clone(),
            tokens: money.to_tokens(),
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Money", 2)?;
        state.serialize_field("assetId", self.asset_id())?;
        state.serialize_field("tokens", &self.to_tokens())?;
        state.end()
    }
}

impl Money {
    pub fn to_record(&self) -> MoneyRecord {
        MoneyRecord::from(self)
    }

    /// Rebuild a value from its JSON shape, resolving the asset through
    /// `registry`.
    pub async fn from_record(record: MoneyRecord, registry: &AssetRegistry) -> Result<Money> {
        Money::from_tokens(record.tokens, record.asset_id, registry).await
    }

    /// Whether an untyped JSON value has the shape of a serialized `Money`:
    /// an object with exactly a string `assetId` and a decimal string `tokens`.
    pub fn is_money(value: &serde_json::Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        if object.len() != 2 {
            return false;
        }

        let asset_ok = object
            .get("assetId")
            .and_then(|id| id.as_str())
            .is_some_and(|id| !id.is_empty());
        let tokens_ok = object
            .get("tokens")
            .and_then(|tokens| tokens.as_str())
            .is_some_and(|tokens| parse_decimal(tokens).is_ok());

        asset_ok && tokens_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AssetDescriptor;
    use serde_json::json;
    use std::sync::Arc;

    fn thousand_waves() -> Money {
        Money::from_tokens_with("1000", Arc::new(AssetDescriptor::native())).unwrap()
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_string(&thousand_waves()).unwrap();
        assert_eq!(json, r#"{"assetId":"WAVES","tokens":"1000.00000000"}"#);
    }

    #[test]
    fn test_record_matches_serialized_money() {
        let money = thousand_waves();
        assert_eq!(
            serde_json::to_value(&money).unwrap(),
            serde_json::to_value(money.to_record()).unwrap()
        );
    }

    #[test]
    fn test_record_deserialize() {
        let record: MoneyRecord =
            serde_json::from_str(r#"{"assetId":"FOUR","tokens":"1.5000"}"#).unwrap();
        assert_eq!(record.asset_id.as_str(), "FOUR");
        assert_eq!(record.tokens, "1.5000");

        let extra = serde_json::from_str::<MoneyRecord>(
            r#"{"assetId":"FOUR","tokens":"1.5000","coins":"15000"}"#,
        );
        assert!(extra.is_err());
    }

    #[test]
    fn test_is_money() {
        assert!(Money::is_money(
            &serde_json::to_value(thousand_waves()).unwrap()
        ));
        assert!(Money::is_money(&json!({"assetId": "FOUR", "tokens": "1.0000"})));

        assert!(!Money::is_money(&json!("1000.00000000 WAVES")));
        assert!(!Money::is_money(&json!({"assetId": "WAVES", "tokens": 1000})));
        assert!(!Money::is_money(&json!({"assetId": "WAVES", "tokens": "lots"})));
        assert!(!Money::is_money(&json!({"assetId": "", "tokens": "1"})));
        assert!(!Money::is_money(&json!({"assetId": "WAVES"})));
        assert!(!Money::is_money(
            &json!({"assetId": "WAVES", "tokens": "1", "name": "Waves"})
        ));
    }
}
