//! # paymodel-model — Resolved Payment Models
//!
//! Strongly typed payment models resolved from JSON documents.
//!
//! ## Modules
//!
//! - **Card** (`card.rs`): stored card variant, tag `"card"`.
//! - **Source** (`source.rs`): payment source variant, tag `"source"`, with
//!   typed card data for card sources.
//! - **Registry** (`registry.rs`): fixed discriminator table from tag to
//!   variant parser.
//! - **Customer source** (`customer_source.rs`): the resolver and the
//!   [`CustomerSource`] facade over the resolved variant.
//! - **Redirect** (`redirect.rs`): source redirect and its status vocabulary.
//! - **Intent** (`intent.rs`): intent vocabularies and next-action payloads.
//!
//! ## Design
//!
//! Variants form a closed enum, [`PaymentSource`]; every consumer matches it
//! exhaustively, so adding a variant is a compile error at each use site
//! until handled. Resolution never panics on service input: unknown tags and
//! incomplete documents resolve to `None`.

pub mod card;
pub mod customer_source;
pub mod intent;
pub mod redirect;
pub mod registry;
pub mod source;

pub use card::{Card, CardBrand, CardFunding, TokenizationMethod};
pub use customer_source::{resolve, CustomerSource, PaymentSource, Resolver};
pub use intent::{IntentStatus, IntentUsage, NextAction, NextActionType, RedirectData, SdkData};
pub use redirect::{parse_status, RedirectStatus, SourceRedirect};
pub use registry::{registered_tags, SourceKind, DISCRIMINATOR_FIELD};
pub use source::{
    Source, SourceCardData, SourceFlow, SourceStatus, SourceUsage, ThreeDSecureStatus,
};
