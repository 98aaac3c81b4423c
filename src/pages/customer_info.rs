use super::locators::{
    ACCOUNT_LINK, CUSTOMER_INFO_PATH, EMAIL_INPUT, FIRST_NAME_INPUT, LAST_NAME_INPUT,
    SAVE_CUSTOMER_INFO_BUTTON, gender_radio,
};
use crate::browser::{BrowserError, BrowserSession};
use crate::domain::Identity;

/// The `/customer/info` profile form of a logged-in customer.
pub struct CustomerInfoPage<'a> {
    browser: &'a BrowserSession,
}

impl<'a> CustomerInfoPage<'a> {
    #[tracing::instrument(name = "Open user profile page", skip_all)]
    pub async fn open(browser: &'a BrowserSession) -> Result<Self, BrowserError> {
        browser.open(CUSTOMER_INFO_PATH).await?;
        Ok(Self { browser })
    }

    /// Overwrite gender, names and email with those of `identity`.
    #[tracing::instrument(name = "Change user info", skip_all, fields(email = %identity.email))]
    pub async fn fill(&self, identity: &Identity) -> Result<(), BrowserError> {
        self.browser.click(&gender_radio(identity.gender)).await?;
        self.browser.set_value(FIRST_NAME_INPUT, &identity.first_name).await?;
        self.browser.set_value(LAST_NAME_INPUT, &identity.last_name).await?;
        self.browser.set_value(EMAIL_INPUT, &identity.email).await?;
        Ok(())
    }

    pub async fn save(&self) -> Result<(), BrowserError> {
        self.browser.click(SAVE_CUSTOMER_INFO_BUTTON).await
    }

    #[tracing::instrument(
        name = "Check user info in profile",
        skip_all,
        fields(email = %identity.email)
    )]
    pub async fn should_show(&self, identity: &Identity) -> Result<(), BrowserError> {
        self.browser.should_have_text(ACCOUNT_LINK, &identity.email).await?;
        self.browser
            .should_be_selected(&gender_radio(identity.gender))
            .await?;
        self.browser
            .should_have_value(FIRST_NAME_INPUT, &identity.first_name)
            .await?;
        self.browser
            .should_have_value(LAST_NAME_INPUT, &identity.last_name)
            .await?;
        self.browser.should_have_value(EMAIL_INPUT, &identity.email).await
    }
}
