//! # Source — Payment Source Variant
//!
//! A payment source resolved from documents whose `object` tag is
//! `"source"`. The `type` field is an open tag (new source types appear
//! without notice), so it is kept as a string. The per-type payload lives
//! under the key named by `type` and is kept as a generic mapping; for card
//! sources it is additionally parsed into [`SourceCardData`].
//!
//! ## Required fields
//!
//! - `object` must be `"source"`.
//! - `id` must be a non-empty string.
//!
//! Everything else is optional. Unknown closed-vocabulary codes read as
//! absent rather than failing the source.

use chrono::{DateTime, Utc};
use serde::Serialize;

use paymodel_core::fields::{
    opt_bool, opt_code, opt_flat_mapping, opt_generic_mapping, opt_i64, opt_object, opt_string,
    JsonObject,
};
use paymodel_core::{parse_opt_code, Converter, FlatStringMapping, GenericValue};

use crate::card::{CardBrand, CardFunding, TokenizationMethod};
use crate::redirect::SourceRedirect;

paymodel_core::closed_vocabulary! {
    /// Lifecycle status of a source.
    pub enum SourceStatus: "source status" {
        Canceled => "canceled",
        Chargeable => "chargeable",
        Consumed => "consumed",
        Failed => "failed",
        Pending => "pending",
    }
}

paymodel_core::closed_vocabulary! {
    /// Whether a source can be charged more than once.
    pub enum SourceUsage: "source usage" {
        Reusable => "reusable",
        SingleUse => "single_use",
    }
}

paymodel_core::closed_vocabulary! {
    /// Authentication flow the customer must complete.
    pub enum SourceFlow: "source flow" {
        Redirect => "redirect",
        Receiver => "receiver",
        CodeVerification => "code_verification",
        None => "none",
    }
}

paymodel_core::closed_vocabulary! {
    /// 3D Secure support reported for a card source.
    pub enum ThreeDSecureStatus: "three_d_secure status" {
        Required => "required",
        Optional => "optional",
        NotSupported => "not_supported",
        Recommended => "recommended",
        Unknown => "unknown",
    }
}

/// Discriminator value carried by source documents.
pub const VALUE_SOURCE: &str = "source";

/// Source `type` whose payload is card data.
pub const SOURCE_TYPE_CARD: &str = "card";

/// Top-level source fields. A `type` naming one of these has no payload.
const RESERVED_FIELDS: &[&str] = &[
    "id",
    "object",
    "type",
    "amount",
    "client_secret",
    "created",
    "currency",
    "flow",
    "livemode",
    "metadata",
    "owner",
    "receiver",
    "redirect",
    "statement_descriptor",
    "status",
    "usage",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: Option<String>,
    pub amount: Option<i64>,
    pub client_secret: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub flow: Option<SourceFlow>,
    pub livemode: Option<bool>,
    pub metadata: Option<FlatStringMapping>,
    pub redirect: Option<SourceRedirect>,
    pub status: Option<SourceStatus>,
    pub usage: Option<SourceUsage>,
    /// The payload under the key named by `type`, as a generic mapping.
    pub type_data: Option<GenericValue>,
    /// Typed view of `type_data` when `type` is `"card"`.
    pub card_data: Option<SourceCardData>,
}

impl Source {
    /// Parse a source with the default converter.
    pub fn from_json(obj: &JsonObject) -> Option<Self> {
        Self::from_json_with(&Converter::default(), obj)
    }

    pub fn from_json_with(converter: &Converter, obj: &JsonObject) -> Option<Self> {
        if opt_string(obj, "object").as_deref() != Some(VALUE_SOURCE) {
            return None;
        }
        let id = opt_string(obj, "id")?;
        let source_type = opt_string(obj, "type");
        let type_data = source_type
            .as_deref()
            .filter(|t| !RESERVED_FIELDS.contains(t))
            .and_then(|t| opt_generic_mapping(converter, obj, t));
        let card_data = match (source_type.as_deref(), &type_data) {
            (Some(SOURCE_TYPE_CARD), Some(data)) => Some(SourceCardData::from_mapping(data)),
            _ => None,
        };

        Some(Self {
            id,
            source_type,
            amount: opt_i64(obj, "amount"),
            client_secret: opt_string(obj, "client_secret"),
            created: opt_i64(obj, "created").and_then(|secs| DateTime::from_timestamp(secs, 0)),
            currency: opt_string(obj, "currency"),
            flow: opt_code(obj, "flow"),
            livemode: opt_bool(obj, "livemode"),
            metadata: opt_flat_mapping(converter, obj, "metadata"),
            redirect: opt_object(obj, "redirect").map(SourceRedirect::from_json),
            status: opt_code(obj, "status"),
            usage: opt_code(obj, "usage"),
            type_data,
            card_data,
        })
    }

    /// Whether this source carries card data.
    pub fn is_card(&self) -> bool {
        self.source_type.as_deref() == Some(SOURCE_TYPE_CARD)
    }
}

/// Card details of a source whose `type` is `"card"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCardData {
    pub brand: Option<CardBrand>,
    pub country: Option<String>,
    pub exp_month: Option<i64>,
    pub exp_year: Option<i64>,
    pub funding: Option<CardFunding>,
    pub last4: Option<String>,
    pub three_d_secure_status: Option<ThreeDSecureStatus>,
    pub tokenization_method: Option<TokenizationMethod>,
    pub dynamic_last4: Option<String>,
}

impl SourceCardData {
    pub fn from_mapping(data: &GenericValue) -> Self {
        Self {
            brand: parse_opt_code(data.get_text("brand")),
            country: data.get_text("country").map(str::to_string),
            exp_month: data.get("exp_month").and_then(GenericValue::as_i64),
            exp_year: data.get("exp_year").and_then(GenericValue::as_i64),
            funding: parse_opt_code(data.get_text("funding")),
            last4: data.get_text("last4").map(str::to_string),
            three_d_secure_status: parse_opt_code(data.get_text("three_d_secure")),
            tokenization_method: parse_opt_code(data.get_text("tokenization_method")),
            dynamic_last4: data.get_text("dynamic_last4").map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::RedirectStatus;
    use serde_json::{json, Value};

    fn card_source_json() -> Value {
        json!({
            "id": "src_19t3xKBZqEXluyI4uz2dxAfQ",
            "object": "source",
            "amount": 1000,
            "client_secret": "src_client_secret_of43INi1HteJwXVe3Aa4xvAC",
            "created": 1486165890,
            "currency": "usd",
            "flow": "redirect",
            "livemode": false,
            "metadata": {"order": "6735", "note": null},
            "redirect": {
                "return_url": "https://google.com",
                "status": "succeeded",
                "url": "examplecompany://redirect-link"
            },
            "status": "chargeable",
            "type": "card",
            "usage": "reusable",
            "card": {
                "brand": "Visa",
                "country": "US",
                "exp_month": 12,
                "exp_year": 2050,
                "funding": "credit",
                "last4": "4242",
                "three_d_secure": "optional",
                "tokenization_method": "google_pay",
                "dynamic_last4": null
            }
        })
    }

    fn parse(value: &Value) -> Option<Source> {
        Source::from_json(value.as_object().unwrap())
    }

    #[test]
    fn test_parses_card_source() {
        let source = parse(&card_source_json()).unwrap();
        assert_eq!(source.id, "src_19t3xKBZqEXluyI4uz2dxAfQ");
        assert_eq!(source.amount, Some(1000));
        assert_eq!(source.flow, Some(SourceFlow::Redirect));
        assert_eq!(source.status, Some(SourceStatus::Chargeable));
        assert_eq!(source.usage, Some(SourceUsage::Reusable));
        assert_eq!(source.livemode, Some(false));
        assert_eq!(
            source.created.map(|c| c.timestamp()),
            Some(1486165890)
        );
        assert_eq!(
            source.redirect.as_ref().and_then(|r| r.status),
            Some(RedirectStatus::Succeeded)
        );
        let metadata = source.metadata.as_ref().unwrap();
        assert_eq!(metadata.get("order").map(String::as_str), Some("6735"));
        assert!(!metadata.contains_key("note"));
        assert!(source.is_card());
    }

    #[test]
    fn test_card_data_is_typed() {
        let source = parse(&card_source_json()).unwrap();
        let card = source.card_data.unwrap();
        assert_eq!(card.brand, Some(CardBrand::Visa));
        assert_eq!(card.exp_month, Some(12));
        assert_eq!(card.funding, Some(CardFunding::Credit));
        assert_eq!(card.three_d_secure_status, Some(ThreeDSecureStatus::Optional));
        assert_eq!(card.tokenization_method, Some(TokenizationMethod::GooglePay));
        assert_eq!(card.dynamic_last4, None);
        assert_eq!(
            source.type_data.as_ref().and_then(|d| d.get("dynamic_last4")),
            Some(&GenericValue::Null)
        );
    }

    #[test]
    fn test_non_card_source_keeps_generic_payload() {
        let source = parse(&json!({
            "id": "src_sepa",
            "object": "source",
            "type": "sepa_debit",
            "sepa_debit": {"bank_code": "37040044", "last4": "3000", "mandate": {"status": "active"}}
        }))
        .unwrap();
        assert!(!source.is_card());
        assert_eq!(source.card_data, None);
        let data = source.type_data.unwrap();
        assert_eq!(data.get_text("bank_code"), Some("37040044"));
        assert_eq!(
            data.get("mandate").and_then(|m| m.get_text("status")),
            Some("active")
        );
    }

    #[test]
    fn test_type_naming_a_top_level_field_has_no_payload() {
        for reserved in ["metadata", "redirect"] {
            let source = parse(&json!({
                "id": "src_odd",
                "object": "source",
                "type": reserved,
                "metadata": {"order": "6735"},
                "redirect": {"url": "https://example.com", "status": "pending"}
            }))
            .unwrap();
            assert_eq!(source.source_type.as_deref(), Some(reserved));
            assert_eq!(source.type_data, None);
            assert_eq!(source.card_data, None);
            assert!(source.metadata.is_some());
            assert!(source.redirect.is_some());
        }
    }

    #[test]
    fn test_missing_id_is_absent() {
        let mut doc = card_source_json();
        doc.as_object_mut().unwrap().remove("id");
        assert_eq!(parse(&doc), None);
        doc["id"] = json!("null");
        assert_eq!(parse(&doc), None);
    }

    #[test]
    fn test_wrong_object_tag_is_absent() {
        let mut doc = card_source_json();
        doc["object"] = json!("card");
        assert_eq!(parse(&doc), None);
    }

    #[test]
    fn test_minimal_source() {
        let source = parse(&json!({"id": "src_1", "object": "source"})).unwrap();
        assert_eq!(source.source_type, None);
        assert_eq!(source.type_data, None);
        assert_eq!(source.redirect, None);
        assert_eq!(source.created, None);
    }
}
