//! Register through the HTTP API, then hand the resulting login to a browser.
//!
//! The API path skips the UI registration form entirely: the registration
//! page is fetched for its anti-forgery token, the form is posted directly,
//! and the authentication cookie the shop issues is copied into the browser's
//! cookie store. The browser then presents as the new customer on its next
//! navigation.

use crate::api_client::DemoWebShopApiClient;
use crate::browser::{BrowserError, BrowserSession};
use crate::domain::Identity;
use crate::markup::{TokenExtractionError, extract_validation_errors, extract_verification_token};
use crate::telemetry::error_chain_fmt;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};

/// Cookie that marks a browser as logged in to the shop.
pub const AUTH_COOKIE_NAME: &str = "NOPCOMMERCE.AUTH";

#[derive(thiserror::Error)]
pub enum BridgeError {
    #[error("Failed to load the registration page.")]
    RegistrationPage(#[source] reqwest::Error),
    #[error("The registration page did not publish a usable verification token.")]
    Token(#[from] TokenExtractionError),
    #[error("Failed to submit the registration form.")]
    RegistrationSubmission(#[source] reqwest::Error),
    #[error("Registration was rejected with status {status}: {errors:?}")]
    RegistrationRejected {
        status: StatusCode,
        errors: Vec<String>,
    },
    #[error("Registration answered 302 but did not set the `NOPCOMMERCE.AUTH` cookie.")]
    MissingAuthCookie,
    #[error("The browser holds a different `NOPCOMMERCE.AUTH` value than the shop issued.")]
    CookieMismatch,
    #[error("Failed to hand the authentication cookie to the browser.")]
    Browser(#[from] BrowserError),
}

impl std::fmt::Debug for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// The shop's login credential, carried unchanged from the HTTP response
/// into the browser.
#[derive(Debug)]
pub struct AuthCookie {
    name: String,
    value: Secret<String>,
}

impl AuthCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Secret::new(value.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        self.value.expose_secret()
    }
}

/// Register `identity` with the shop over HTTP and return the login cookie it issues.
#[tracing::instrument(
    name = "Registering new customer via API",
    skip(api_client, identity),
    fields(email = %identity.email)
)]
pub async fn register_via_api(
    api_client: &DemoWebShopApiClient,
    identity: &Identity,
) -> Result<AuthCookie, BridgeError> {
    let page = api_client
        .get_registration_page()
        .await
        .map_err(BridgeError::RegistrationPage)?;
    let token = extract_verification_token(&page)?;

    // Session cookies of the page request ride along from the client's jar
    let response = api_client
        .post_registration(&identity.registration_form(&token))
        .await
        .map_err(BridgeError::RegistrationSubmission)?;

    let status = response.status();
    if status != StatusCode::FOUND {
        let errors = rejection_errors(response.text().await);
        tracing::error!(%status, ?errors, "Registration was rejected");
        return Err(BridgeError::RegistrationRejected { status, errors });
    }

    let cookie = response
        .cookies()
        .find(|cookie| cookie.name() == AUTH_COOKIE_NAME)
        .map(|cookie| AuthCookie::new(cookie.name(), cookie.value()))
        .ok_or(BridgeError::MissingAuthCookie)?;
    tracing::info!("Registration accepted");
    Ok(cookie)
}

// An unreadable body still leaves the status to report
fn rejection_errors(body: Result<String, reqwest::Error>) -> Vec<String> {
    match body {
        Ok(body) => extract_validation_errors(&body),
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                "Failed to read the rejected registration body"
            );
            Vec::new()
        }
    }
}

/// Put `cookie` into the browser's cookie store.
#[tracing::instrument(name = "Setting auth cookie in browser", skip_all)]
pub async fn authenticate_browser(
    browser: &BrowserSession,
    cookie: &AuthCookie,
) -> Result<(), BridgeError> {
    // A WebDriver only accepts cookies for the origin of the page it is on,
    // so some page of the shop has to be loaded first. Its content is irrelevant.
    browser.open(browser.cookie_scope_path()).await?;
    browser.add_cookie(cookie.name(), cookie.value()).await?;
    Ok(())
}

/// Check that the browser's auth cookie is byte-identical to `cookie`.
#[tracing::instrument(name = "Checking auth cookie in browser", skip_all)]
pub async fn verify_browser_cookie(
    browser: &BrowserSession,
    cookie: &AuthCookie,
) -> Result<(), BridgeError> {
    let in_browser = browser.cookie(cookie.name()).await?;
    if in_browser.as_bytes() != cookie.value().as_bytes() {
        tracing::error!("Browser cookie differs from the one the shop issued");
        return Err(BridgeError::CookieMismatch);
    }
    Ok(())
}

/// Register via the API and log the browser in as the new customer.
#[tracing::instrument(name = "Registering via API and authenticating browser", skip_all)]
pub async fn register_and_bridge(
    api_client: &DemoWebShopApiClient,
    browser: &BrowserSession,
    identity: &Identity,
) -> Result<AuthCookie, BridgeError> {
    let cookie = register_via_api(api_client, identity).await?;
    authenticate_browser(browser, &cookie).await?;
    Ok(cookie)
}
