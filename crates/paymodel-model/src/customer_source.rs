//! # Customer Source — Polymorphic Model Resolver
//!
//! A customer's saved payment method is either a stored card or a source.
//! [`resolve`] reads the `object` discriminator of a document, dispatches to
//! the registered variant parser, and wraps the result in a
//! [`CustomerSource`] handle.
//!
//! ## Failure model
//!
//! Every failure is absence. A document that is not an object, has no
//! discriminator, carries an unrecognized tag, or is missing a field its
//! variant requires resolves to `None`. A response introducing a new tag
//! therefore degrades to "no model available" for older clients.
//!
//! ## Projections
//!
//! `as_card` / `as_source` return the held variant or `None`. They never
//! parse and never fabricate a default for the variant not held.

use serde::Serialize;
use serde_json::Value;

use paymodel_core::fields::opt_string;
use paymodel_core::Converter;

use crate::card::{Card, TokenizationMethod, VALUE_CARD};
use crate::registry::{self, SourceKind, DISCRIMINATOR_FIELD};
use crate::source::Source;

/// One resolved payment source variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum PaymentSource {
    Card(Card),
    Source(Source),
}

impl PaymentSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Card(_) => SourceKind::Card,
            Self::Source(_) => SourceKind::Source,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Card(card) => card.id.as_deref(),
            Self::Source(source) => Some(&source.id),
        }
    }
}

/// Handle over exactly one resolved [`PaymentSource`].
///
/// Equality is structural: two handles are equal when their held variants
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CustomerSource {
    source: PaymentSource,
}

impl CustomerSource {
    pub fn new(source: PaymentSource) -> Self {
        Self { source }
    }

    /// Identifier of the held variant.
    pub fn id(&self) -> Option<&str> {
        self.source.id()
    }

    /// Discriminator tag of the held variant.
    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn as_card(&self) -> Option<&Card> {
        match &self.source {
            PaymentSource::Card(card) => Some(card),
            PaymentSource::Source(_) => None,
        }
    }

    pub fn as_source(&self) -> Option<&Source> {
        match &self.source {
            PaymentSource::Source(source) => Some(source),
            PaymentSource::Card(_) => None,
        }
    }

    /// Payment method type: `"card"` for a card, the source's `type` for a
    /// source (absent when the source carries none).
    pub fn source_type(&self) -> Option<&str> {
        match &self.source {
            PaymentSource::Card(_) => Some(VALUE_CARD),
            PaymentSource::Source(source) => source.source_type.as_deref(),
        }
    }

    /// Wallet that tokenized the underlying card, for cards and card sources.
    pub fn tokenization_method(&self) -> Option<TokenizationMethod> {
        match &self.source {
            PaymentSource::Card(card) => card.tokenization_method,
            PaymentSource::Source(source) => source
                .card_data
                .as_ref()
                .and_then(|data| data.tokenization_method),
        }
    }

    pub fn payment_source(&self) -> &PaymentSource {
        &self.source
    }

    pub fn into_payment_source(self) -> PaymentSource {
        self.source
    }
}

/// Resolves documents into [`CustomerSource`] handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    converter: Converter,
}

impl Resolver {
    pub fn new(converter: Converter) -> Self {
        Self { converter }
    }

    /// Resolve `doc`, or `None` when it does not describe a known,
    /// well-formed variant.
    pub fn resolve(&self, doc: &Value) -> Option<CustomerSource> {
        let obj = doc.as_object()?;
        let tag = opt_string(obj, DISCRIMINATOR_FIELD)?;
        let Some((kind, parse)) = registry::lookup(&tag) else {
            tracing::debug!(tag = %tag, "unrecognized payment source discriminator");
            return None;
        };
        match parse(&self.converter, obj) {
            Some(source) => Some(CustomerSource::new(source)),
            None => {
                tracing::trace!(%kind, "payment source is missing required fields");
                None
            }
        }
    }
}

/// Resolve `doc` with the default converter.
pub fn resolve(doc: &Value) -> Option<CustomerSource> {
    Resolver::default().resolve(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardBrand;
    use serde_json::json;

    fn card_doc() -> Value {
        json!({
            "id": "card_1",
            "object": "card",
            "brand": "Visa",
            "exp_month": 8,
            "exp_year": 2030,
            "last4": "4242",
            "tokenization_method": "google_pay"
        })
    }

    fn source_doc() -> Value {
        json!({
            "id": "src_1",
            "object": "source",
            "type": "card",
            "card": {"brand": "MasterCard", "tokenization_method": "apple_pay"}
        })
    }

    #[test]
    fn test_resolves_card() {
        let resolved = resolve(&card_doc()).unwrap();
        assert_eq!(resolved.kind(), SourceKind::Card);
        assert_eq!(resolved.id(), Some("card_1"));
        assert_eq!(resolved.as_card().and_then(|c| c.brand), Some(CardBrand::Visa));
        assert!(resolved.as_source().is_none());
        assert_eq!(resolved.source_type(), Some("card"));
        assert_eq!(resolved.tokenization_method(), Some(TokenizationMethod::GooglePay));
    }

    #[test]
    fn test_resolves_source() {
        let resolved = resolve(&source_doc()).unwrap();
        assert_eq!(resolved.kind(), SourceKind::Source);
        assert_eq!(resolved.id(), Some("src_1"));
        assert!(resolved.as_card().is_none());
        assert_eq!(resolved.as_source().map(|s| s.id.as_str()), Some("src_1"));
        assert_eq!(resolved.source_type(), Some("card"));
        assert_eq!(resolved.tokenization_method(), Some(TokenizationMethod::ApplePay));
    }

    #[test]
    fn test_non_card_source_has_no_tokenization_method() {
        let resolved = resolve(&json!({
            "id": "src_2",
            "object": "source",
            "type": "alipay",
            "alipay": {"statement_descriptor": "shop"}
        }))
        .unwrap();
        assert_eq!(resolved.source_type(), Some("alipay"));
        assert_eq!(resolved.tokenization_method(), None);
    }

    #[test]
    fn test_unknown_tag_is_absent() {
        assert_eq!(resolve(&json!({"object": "future_type_xyz", "id": "x"})), None);
        assert_eq!(resolve(&json!({"object": "CARD", "id": "x"})), None);
    }

    #[test]
    fn test_missing_or_malformed_discriminator_is_absent() {
        assert_eq!(resolve(&json!({"id": "card_1"})), None);
        assert_eq!(resolve(&json!({"object": 7})), None);
        assert_eq!(resolve(&json!({"object": "null"})), None);
        assert_eq!(resolve(&json!(["card"])), None);
        assert_eq!(resolve(&json!("card")), None);
        assert_eq!(resolve(&Value::Null), None);
    }

    #[test]
    fn test_variant_parse_failure_is_absent() {
        let mut doc = card_doc();
        doc.as_object_mut().unwrap().remove("exp_month");
        assert_eq!(resolve(&doc), None);
    }

    #[test]
    fn test_equality_is_structural() {
        let a = resolve(&card_doc()).unwrap();
        let b = resolve(&card_doc()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, resolve(&source_doc()).unwrap());

        let mut other = card_doc();
        other["last4"] = json!("0000");
        assert_ne!(a, resolve(&other).unwrap());
    }

    #[test]
    fn test_serializes_with_discriminator() {
        let resolved = resolve(&source_doc()).unwrap();
        let value = serde_json::to_value(&resolved).unwrap();
        assert_eq!(value["object"], json!("source"));
        assert_eq!(value["id"], json!("src_1"));
        assert_eq!(value["type"], json!("card"));
    }
}
