//! Typed decoding of Kaltura block attributes.
//!
//! Stored attributes are loosely typed: an id may be saved as a number, a
//! flag as a string. Decoding happens once here so the rest of the crate
//! only sees [`KalturaAttributes`].

use serde_json::Value;

use crate::node::BlockAttrs;
use crate::record::BlockRecord;

/// Attribute key for the provider account id.
pub const ATTR_PARTNER_ID: &str = "partnerId";
/// Attribute key for the media id.
pub const ATTR_ENTRY_ID: &str = "entryId";
/// Attribute key for the poster image URL.
pub const ATTR_POSTER: &str = "poster";
/// Attribute key for the autoplay flag.
pub const ATTR_AUTOPLAY: &str = "autoplay";
/// Attribute key for the consent flag.
pub const ATTR_CONSENT_REQUIRED: &str = "consentRequired";

/// Attributes of one Kaltura block, as present in storage.
///
/// `None` means the key was absent. Defaults are applied by
/// [`into_record`](Self::into_record).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KalturaAttributes {
    pub partner_id: Option<String>,
    pub entry_id: Option<String>,
    pub poster: Option<String>,
    pub autoplay: Option<bool>,
    pub consent_required: Option<bool>,
}

impl KalturaAttributes {
    /// Decode from a block's attribute map.
    pub fn decode(attrs: &BlockAttrs) -> Self {
        Self {
            partner_id: attrs.get(ATTR_PARTNER_ID).map(coerce_string),
            entry_id: attrs.get(ATTR_ENTRY_ID).map(coerce_string),
            poster: attrs.get(ATTR_POSTER).map(coerce_string),
            autoplay: attrs.get(ATTR_AUTOPLAY).map(truthy),
            consent_required: attrs.get(ATTR_CONSENT_REQUIRED).map(truthy),
        }
    }

    /// Apply defaults: empty strings, autoplay off, consent required.
    pub fn into_record(self) -> BlockRecord {
        BlockRecord {
            provider_account_id: self.partner_id.unwrap_or_default(),
            media_id: self.entry_id.unwrap_or_default(),
            poster_url: self.poster.unwrap_or_default(),
            autoplay: self.autoplay.unwrap_or(false),
            consent_required: self.consent_required.unwrap_or(true),
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// String form of a stored value. Scalars are stringified, `true` becomes
/// `"1"`, and `false`, `null` and containers become empty.
///
/// Integral floats print without a fraction only while they are exact;
/// larger magnitudes keep their float form.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Truthiness of a stored value.
///
/// Empty strings, `"0"`, zero, `false`, `null` and empty containers are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn attrs(value: Value) -> BlockAttrs {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_decode_full() {
        let decoded = KalturaAttributes::decode(&attrs(json!({
            "partnerId": "123",
            "entryId": "1_abc",
            "poster": "https://cdn/p.jpg",
            "autoplay": true,
            "consentRequired": false
        })));

        assert_eq!(decoded.partner_id.as_deref(), Some("123"));
        assert_eq!(decoded.autoplay, Some(true));
        assert_eq!(decoded.consent_required, Some(false));
    }

    #[test]
    fn test_defaults() {
        let record = KalturaAttributes::decode(&BlockAttrs::new()).into_record();
        assert_eq!(record.provider_account_id, "");
        assert_eq!(record.media_id, "");
        assert_eq!(record.poster_url, "");
        assert!(!record.autoplay);
        assert!(record.consent_required);
    }

    #[test]
    fn test_present_but_null_consent_is_false() {
        let record =
            KalturaAttributes::decode(&attrs(json!({ "consentRequired": null }))).into_record();
        assert!(!record.consent_required);
    }

    #[test]
    fn test_loose_types() {
        let record = KalturaAttributes::decode(&attrs(json!({
            "partnerId": 123,
            "entryId": ["not", "a", "string"],
            "autoplay": "1",
            "consentRequired": "0"
        })))
        .into_record();

        assert_eq!(record.provider_account_id, "123");
        assert_eq!(record.media_id, "");
        assert!(record.autoplay);
        assert!(!record.consent_required);
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce_string(&json!("x")), "x");
        assert_eq!(coerce_string(&json!(42)), "42");
        assert_eq!(coerce_string(&json!(42.0)), "42");
        assert_eq!(coerce_string(&json!(1.5)), "1.5");
        assert_eq!(coerce_string(&json!(-7.0)), "-7");
        assert_eq!(coerce_string(&json!(9007199254740991.0)), "9007199254740991");
        assert_eq!(coerce_string(&json!(u64::MAX)), u64::MAX.to_string());
        assert_eq!(coerce_string(&json!(true)), "1");
        assert_eq!(coerce_string(&json!(false)), "");
        assert_eq!(coerce_string(&Value::Null), "");
        assert_eq!(coerce_string(&json!({"a": 1})), "");
    }

    #[test]
    fn test_coerce_string_large_float_keeps_float_form() {
        let large = json!(1e20);
        let coerced = coerce_string(&large);

        assert_eq!(coerced, large.to_string());
        assert_ne!(coerced, i64::MAX.to_string());
        assert_eq!(coerced.parse::<f64>().unwrap(), 1e20);
    }

    #[test]
    fn test_truthy() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!("yes")));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!([0])));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!([])));
        assert!(!truthy(&Value::Null));
    }
}
