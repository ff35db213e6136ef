//! Source redirect: where a customer is sent to authorize a source, and how
//! that authorization went.

use serde::Serialize;

use paymodel_core::fields::{opt_code, opt_string, JsonObject};

paymodel_core::closed_vocabulary! {
    /// Outcome of a source redirect.
    pub enum RedirectStatus: "redirect status" {
        Failed => "failed",
        Succeeded => "succeeded",
        Pending => "pending",
        NotRequired => "not_required",
    }
}

/// Parse a redirect status code. Exact, case-sensitive match only.
pub fn parse_status(code: &str) -> Option<RedirectStatus> {
    RedirectStatus::from_code(code)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRedirect {
    pub return_url: Option<String>,
    pub status: Option<RedirectStatus>,
    pub url: Option<String>,
}

impl SourceRedirect {
    const FIELD_RETURN_URL: &'static str = "return_url";
    const FIELD_STATUS: &'static str = "status";
    const FIELD_URL: &'static str = "url";

    pub fn from_json(obj: &JsonObject) -> Self {
        Self {
            return_url: opt_string(obj, Self::FIELD_RETURN_URL),
            status: opt_code(obj, Self::FIELD_STATUS),
            url: opt_string(obj, Self::FIELD_URL),
        }
    }
}
