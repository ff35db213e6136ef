//! # Card — Stored Card Variant
//!
//! A card saved to a customer, resolved from documents whose `object` tag is
//! `"card"`. Expiry month and year are required; a card without a valid
//! expiry is not a card and parses to `None`.

use serde::Serialize;

use paymodel_core::fields::{opt_code, opt_flat_mapping, opt_i64, opt_string, JsonObject};
use paymodel_core::{Converter, FlatStringMapping};

paymodel_core::closed_vocabulary! {
    /// Card network.
    pub enum CardBrand: "card brand" {
        AmericanExpress => "American Express",
        Discover => "Discover",
        Jcb => "JCB",
        DinersClub => "Diners Club",
        Visa => "Visa",
        MasterCard => "MasterCard",
        UnionPay => "UnionPay",
        Unknown => "Unknown",
    }
}

paymodel_core::closed_vocabulary! {
    /// Funding type of the card.
    pub enum CardFunding: "card funding" {
        Credit => "credit",
        Debit => "debit",
        Prepaid => "prepaid",
        Unknown => "unknown",
    }
}

paymodel_core::closed_vocabulary! {
    /// Wallet that tokenized the card, if any.
    pub enum TokenizationMethod: "tokenization method" {
        ApplePay => "apple_pay",
        GooglePay => "google_pay",
        AndroidPay => "android_pay",
        Masterpass => "masterpass",
        VisaCheckout => "visa_checkout",
    }
}

/// Discriminator value carried by card documents.
pub const VALUE_CARD: &str = "card";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: Option<String>,
    pub exp_month: u8,
    pub exp_year: u16,
    pub brand: Option<CardBrand>,
    pub funding: Option<CardFunding>,
    pub last4: Option<String>,
    pub fingerprint: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
    pub customer: Option<String>,
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line1_check: Option<String>,
    pub address_line2: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub address_zip_check: Option<String>,
    pub address_country: Option<String>,
    pub cvc_check: Option<String>,
    pub tokenization_method: Option<TokenizationMethod>,
    pub metadata: Option<FlatStringMapping>,
}

impl Card {
    /// Parse a card with the default converter.
    pub fn from_json(obj: &JsonObject) -> Option<Self> {
        Self::from_json_with(&Converter::default(), obj)
    }

    /// Parse a card. Returns `None` unless `object` is `"card"` and the
    /// expiry is present and in range (month 1..=12, year 0..=65535).
    pub fn from_json_with(converter: &Converter, obj: &JsonObject) -> Option<Self> {
        if opt_string(obj, "object").as_deref() != Some(VALUE_CARD) {
            return None;
        }
        let exp_month = opt_i64(obj, "exp_month")
            .filter(|m| (1..=12).contains(m))
            .and_then(|m| u8::try_from(m).ok())?;
        let exp_year = opt_i64(obj, "exp_year").and_then(|y| u16::try_from(y).ok())?;

        Some(Self {
            id: opt_string(obj, "id"),
            exp_month,
            exp_year,
            brand: opt_code(obj, "brand"),
            funding: opt_code(obj, "funding"),
            last4: opt_string(obj, "last4"),
            fingerprint: opt_string(obj, "fingerprint"),
            country: opt_string(obj, "country"),
            currency: opt_string(obj, "currency"),
            customer: opt_string(obj, "customer"),
            name: opt_string(obj, "name"),
            address_line1: opt_string(obj, "address_line1"),
            address_line1_check: opt_string(obj, "address_line1_check"),
            address_line2: opt_string(obj, "address_line2"),
            address_city: opt_string(obj, "address_city"),
            address_state: opt_string(obj, "address_state"),
            address_zip: opt_string(obj, "address_zip"),
            address_zip_check: opt_string(obj, "address_zip_check"),
            address_country: opt_string(obj, "address_country"),
            cvc_check: opt_string(obj, "cvc_check"),
            tokenization_method: opt_code(obj, "tokenization_method"),
            metadata: opt_flat_mapping(converter, obj, "metadata"),
        })
    }
}
