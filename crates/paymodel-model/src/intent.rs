//! # Intent Vocabularies and Next Actions
//!
//! Closed vocabularies shared by payment and setup intents, and the
//! `next_action` payload that tells a client how to continue an intent.
//!
//! The next-action payload is converted to a [`GenericValue`] tree first and
//! read from there: its inner shape varies by action type and by 3DS
//! version, so only the fields the client acts on are typed.

use serde::Serialize;
use serde_json::Value;

use paymodel_core::{parse_opt_code, ClosedVocabulary, Converter, GenericValue};

paymodel_core::closed_vocabulary! {
    /// Status of a payment or setup intent.
    pub enum IntentStatus: "intent status" {
        Canceled => "canceled",
        Processing => "processing",
        RequiresAction => "requires_action",
        RequiresConfirmation => "requires_confirmation",
        RequiresPaymentMethod => "requires_payment_method",
        Succeeded => "succeeded",
        /// Only applies to payment intents.
        RequiresCapture => "requires_capture",
    }
}

paymodel_core::closed_vocabulary! {
    /// What the client must do to continue an intent.
    pub enum NextActionType: "next action type" {
        RedirectToUrl => "redirect_to_url",
        UseStripeSdk => "use_stripe_sdk",
    }
}

paymodel_core::closed_vocabulary! {
    /// How a payment method set up by an intent will be used.
    pub enum IntentUsage: "intent usage" {
        OnSession => "on_session",
        OffSession => "off_session",
        OneTime => "one_time",
    }
}

/// Redirect the customer to `url` to authenticate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectData {
    pub url: String,
    pub return_url: Option<String>,
}

impl RedirectData {
    /// `url` is required; `return_url` is optional. Both must be strings.
    pub fn from_mapping(data: &GenericValue) -> Option<Self> {
        let url = data.get_text("url")?.to_string();
        Some(Self {
            url,
            return_url: data.get_text("return_url").map(str::to_string),
        })
    }
}

/// Payload handed to the native authentication SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkData {
    #[serde(rename = "type")]
    pub sdk_type: String,
    pub data: GenericValue,
}

impl SdkData {
    const TYPE_3DS2: &'static str = "stripe_3ds2_fingerprint";
    const TYPE_3DS1: &'static str = "three_d_secure_redirect";

    /// `type` is required.
    pub fn from_mapping(data: &GenericValue) -> Option<Self> {
        let sdk_type = data.get_text("type")?.to_string();
        Some(Self {
            sdk_type,
            data: data.clone(),
        })
    }

    pub fn is_3ds2(&self) -> bool {
        self.sdk_type == Self::TYPE_3DS2
    }

    pub fn is_3ds1(&self) -> bool {
        self.sdk_type == Self::TYPE_3DS1
    }
}

/// A typed `next_action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NextAction {
    RedirectToUrl(RedirectData),
    UseStripeSdk(SdkData),
}

impl NextAction {
    /// Parse a `next_action` object with the default converter.
    pub fn from_json(doc: &Value) -> Option<Self> {
        Self::from_json_with(&Converter::default(), doc)
    }

    /// Reads `type`, then the payload stored under the key of the same name.
    /// Unknown types, missing payloads, and payloads missing required fields
    /// are all absent.
    pub fn from_json_with(converter: &Converter, doc: &Value) -> Option<Self> {
        let tree = converter.to_generic(doc).ok().flatten()?;
        let action_type: NextActionType = parse_opt_code(tree.get_text("type"))?;
        let payload = tree.get(action_type.code())?;
        match action_type {
            NextActionType::RedirectToUrl => {
                RedirectData::from_mapping(payload).map(Self::RedirectToUrl)
            }
            NextActionType::UseStripeSdk => SdkData::from_mapping(payload).map(Self::UseStripeSdk),
        }
    }

    pub fn action_type(&self) -> NextActionType {
        match self {
            Self::RedirectToUrl(_) => NextActionType::RedirectToUrl,
            Self::UseStripeSdk(_) => NextActionType::UseStripeSdk,
        }
    }
}
