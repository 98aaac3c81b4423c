use super::locators::{ACCOUNT_LINK, HOME_PATH};
use crate::browser::{BrowserError, BrowserSession};

pub struct HomePage<'a> {
    browser: &'a BrowserSession,
}

impl<'a> HomePage<'a> {
    #[tracing::instrument(name = "Open main page", skip_all)]
    pub async fn open(browser: &'a BrowserSession) -> Result<Self, BrowserError> {
        browser.open(HOME_PATH).await?;
        Ok(Self { browser })
    }

    /// The header shows `email` once the customer is logged in.
    pub async fn should_show_account(&self, email: &str) -> Result<(), BrowserError> {
        self.browser.should_have_text(ACCOUNT_LINK, email).await
    }
}
