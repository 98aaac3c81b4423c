//! Reading values the shop publishes in its server-rendered pages.
//!
//! Everything that depends on the shop's markup lives here, so a change
//! in the page structure is a change to this file only.

use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Name of the hidden anti-forgery field of the shop's forms.
pub const VERIFICATION_TOKEN_FIELD: &str = "__RequestVerificationToken";

static VERIFICATION_TOKEN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!(r#"[name="{}"]"#, VERIFICATION_TOKEN_FIELD))
        .expect("Verification token selector is valid CSS")
});

static VALIDATION_ERRORS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".validation-summary-errors li, .field-validation-error")
        .expect("Validation error selector is valid CSS")
});

/// Anti-forgery value a form must be posted back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AsRef<str> for VerificationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TokenExtractionError {
    #[error("The page has no `__RequestVerificationToken` field.")]
    Missing,
    #[error("The page has {0} `__RequestVerificationToken` fields, expected exactly one.")]
    Duplicated(usize),
    #[error("The `__RequestVerificationToken` field carries no value.")]
    MissingValue,
}

/// Find the single `__RequestVerificationToken` field of a page and read its value.
pub fn extract_verification_token(html: &str) -> Result<VerificationToken, TokenExtractionError> {
    let document = Html::parse_document(html);
    let fields: Vec<_> = document.select(&VERIFICATION_TOKEN_SELECTOR).collect();
    let field = match fields.as_slice() {
        [] => return Err(TokenExtractionError::Missing),
        [field] => field,
        _ => return Err(TokenExtractionError::Duplicated(fields.len())),
    };
    match field.value().attr("value") {
        Some(value) if !value.is_empty() => Ok(VerificationToken::new(value)),
        _ => Err(TokenExtractionError::MissingValue),
    }
}

/// Messages the shop renders next to a rejected form, e.g. "The specified email already exists".
pub fn extract_validation_errors(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&VALIDATION_ERRORS_SELECTOR)
        .map(|element| {
            element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|message| !message.is_empty())
        .collect()
}
