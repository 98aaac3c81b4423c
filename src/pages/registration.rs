use super::locators::{
    CONFIRM_PASSWORD_INPUT, EMAIL_INPUT, FIRST_NAME_INPUT, LAST_NAME_INPUT, PASSWORD_INPUT,
    REGISTER_BUTTON, REGISTER_PATH, REGISTRATION_COMPLETED_TEXT, REGISTRATION_RESULT,
    gender_radio,
};
use crate::browser::{BrowserError, BrowserSession};
use crate::domain::Identity;
use secrecy::ExposeSecret;

/// The `/register` form.
pub struct RegistrationPage<'a> {
    browser: &'a BrowserSession,
}

impl<'a> RegistrationPage<'a> {
    #[tracing::instrument(name = "Open registration page", skip_all)]
    pub async fn open(browser: &'a BrowserSession) -> Result<Self, BrowserError> {
        browser.open(REGISTER_PATH).await?;
        Ok(Self { browser })
    }

    #[tracing::instrument(
        name = "Fill registration form",
        skip_all,
        fields(email = %identity.email)
    )]
    pub async fn fill(&self, identity: &Identity) -> Result<(), BrowserError> {
        let password = identity.password.expose_secret();
        self.browser.click(&gender_radio(identity.gender)).await?;
        self.browser.set_value(FIRST_NAME_INPUT, &identity.first_name).await?;
        self.browser.set_value(LAST_NAME_INPUT, &identity.last_name).await?;
        self.browser.set_value(EMAIL_INPUT, &identity.email).await?;
        self.browser.set_value(PASSWORD_INPUT, password).await?;
        self.browser.set_value(CONFIRM_PASSWORD_INPUT, password).await?;
        Ok(())
    }

    pub async fn submit(&self) -> Result<(), BrowserError> {
        self.browser.click(REGISTER_BUTTON).await
    }

    #[tracing::instrument(name = "Verify successful registration", skip_all)]
    pub async fn should_report_success(&self) -> Result<(), BrowserError> {
        self.browser
            .should_have_text(REGISTRATION_RESULT, REGISTRATION_COMPLETED_TEXT)
            .await
    }
}
