//! # Discriminator Registry
//!
//! Fixed table from the `object` tag of a document to the parser for one
//! [`PaymentSource`] variant. The table is a versioned contract with the
//! remote service: adding a tag is backward compatible (older clients see
//! the new tag as unrecognized and resolve to `None`), renaming one is not.
//!
//! Lookup is exact string equality. No case folding, no prefix matching.

use paymodel_core::{ClosedVocabulary, Converter, JsonObject};

use crate::card::Card;
use crate::customer_source::PaymentSource;
use crate::source::Source;

/// Field holding the discriminator.
pub const DISCRIMINATOR_FIELD: &str = "object";

paymodel_core::closed_vocabulary! {
    /// Discriminator tags of the payment source variants.
    pub enum SourceKind: "payment source kind" {
        Card => "card",
        Source => "source",
    }
}

/// Parser for one variant. Returns `None` when required fields are missing.
pub type VariantParser = fn(&Converter, &JsonObject) -> Option<PaymentSource>;

fn parse_card(converter: &Converter, obj: &JsonObject) -> Option<PaymentSource> {
    Card::from_json_with(converter, obj).map(PaymentSource::Card)
}

fn parse_source(converter: &Converter, obj: &JsonObject) -> Option<PaymentSource> {
    Source::from_json_with(converter, obj).map(PaymentSource::Source)
}

/// Registered variants, in registration order.
static REGISTRY: &[(SourceKind, VariantParser)] = &[
    (SourceKind::Card, parse_card),
    (SourceKind::Source, parse_source),
];

/// Find the parser registered for `tag`.
pub fn lookup(tag: &str) -> Option<(SourceKind, VariantParser)> {
    REGISTRY
        .iter()
        .copied()
        .find(|(kind, _)| kind.code() == tag)
}

/// Every registered discriminator string.
pub fn registered_tags() -> Vec<&'static str> {
    REGISTRY.iter().map(|(kind, _)| kind.code()).collect()
}
