use crate::configuration::{BrowserKind, WebSettings};
use crate::telemetry::error_chain_fmt;
use fantoccini::cookies::Cookie;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;
use tokio::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(thiserror::Error)]
pub enum BrowserError {
    #[error("Failed to open a WebDriver session.")]
    Connect(#[source] NewSessionError),
    #[error("WebDriver command failed.")]
    Command(#[from] CmdError),
    #[error("`{locator}` should have {expected}, but had {observed}")]
    Expectation {
        locator: String,
        expected: String,
        observed: String,
    },
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for BrowserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// One WebDriver session, owned by one test.
///
/// Element lookups and expectations wait up to the configured timeout
/// before they give up.
pub struct BrowserSession {
    client: Client,
    settings: WebSettings,
}

impl BrowserSession {
    #[tracing::instrument(
        name = "Opening browser session",
        skip(settings),
        fields(webdriver = %settings.webdriver_url)
    )]
    pub async fn connect(settings: &WebSettings) -> Result<Self, BrowserError> {
        let client = ClientBuilder::rustls()
            .map_err(|e| anyhow::anyhow!("Failed to set up TLS for WebDriver: {}", e))?
            .capabilities(capabilities(settings.browser, settings.headless))
            .connect(&settings.webdriver_url)
            .await
            .map_err(BrowserError::Connect)?;
        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }

    /// Same-origin resource loaded only so that cookies may be set.
    pub fn cookie_scope_path(&self) -> &str {
        &self.settings.cookie_scope_path
    }

    #[tracing::instrument(name = "Opening page", skip(self))]
    pub async fn open(&self, path: &str) -> Result<(), BrowserError> {
        self.client.goto(&self.settings.url(path)).await?;
        Ok(())
    }

    async fn find(&self, css: &str) -> Result<Element, BrowserError> {
        let element = self
            .client
            .wait()
            .at_most(self.settings.wait_timeout())
            .every(POLL_INTERVAL)
            .for_element(Locator::Css(css))
            .await?;
        Ok(element)
    }

    pub async fn click(&self, css: &str) -> Result<(), BrowserError> {
        self.find(css).await?.click().await?;
        Ok(())
    }

    pub async fn set_value(&self, css: &str, value: &str) -> Result<(), BrowserError> {
        let element = self.find(css).await?;
        element.clear().await?;
        element.send_keys(value).await?;
        Ok(())
    }

    pub async fn text(&self, css: &str) -> Result<String, BrowserError> {
        Ok(self.find(css).await?.text().await?)
    }

    pub async fn value(&self, css: &str) -> Result<String, BrowserError> {
        Ok(self.find(css).await?.prop("value").await?.unwrap_or_default())
    }

    pub async fn is_selected(&self, css: &str) -> Result<bool, BrowserError> {
        Ok(self.find(css).await?.is_selected().await?)
    }

    pub async fn add_cookie(&self, name: &str, value: &str) -> Result<(), BrowserError> {
        let cookie = Cookie::new(name.to_owned(), value.to_owned());
        self.client.add_cookie(cookie).await?;
        Ok(())
    }

    pub async fn cookie(&self, name: &str) -> Result<String, BrowserError> {
        let cookie = self.client.get_named_cookie(name).await?;
        Ok(cookie.value().to_owned())
    }

    pub async fn should_have_text(&self, css: &str, expected: &str) -> Result<(), BrowserError> {
        let description = format!("text containing {:?}", expected);
        self.eventually(
            css,
            &description,
            || self.text(css),
            |text| text.contains(expected),
        )
        .await
    }

    pub async fn should_have_value(&self, css: &str, expected: &str) -> Result<(), BrowserError> {
        let description = format!("value {:?}", expected);
        self.eventually(
            css,
            &description,
            || self.value(css),
            |value| value.as_str() == expected,
        )
        .await
    }

    pub async fn should_be_selected(&self, css: &str) -> Result<(), BrowserError> {
        self.eventually(
            css,
            "selection",
            || self.is_selected(css),
            |selected| *selected,
        )
        .await
    }

    // Re-reads the element until the check holds or the wait timeout is spent.
    async fn eventually<T, Read, Fut, Check>(
        &self,
        css: &str,
        expected: &str,
        read: Read,
        check: Check,
    ) -> Result<(), BrowserError>
    where
        T: std::fmt::Debug,
        Read: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, BrowserError>>,
        Check: Fn(&T) -> bool,
    {
        let deadline = Instant::now() + self.settings.wait_timeout();
        loop {
            let observed = read().await?;
            if check(&observed) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Expectation {
                    locator: css.to_owned(),
                    expected: expected.to_owned(),
                    observed: format!("{:?}", observed),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn close(self) -> Result<(), BrowserError> {
        self.client.close().await?;
        Ok(())
    }
}

fn capabilities(
    browser: BrowserKind,
    headless: bool,
) -> serde_json::Map<String, serde_json::Value> {
    let mut capabilities = serde_json::Map::new();
    capabilities.insert("browserName".into(), browser.as_str().into());
    if headless {
        match browser {
            BrowserKind::Chrome => {
                capabilities.insert(
                    "goog:chromeOptions".into(),
                    serde_json::json!({ "args": ["--headless=new", "--window-size=1920,1080"] }),
                );
            }
            BrowserKind::Firefox => {
                capabilities.insert(
                    "moz:firefoxOptions".into(),
                    serde_json::json!({ "args": ["-headless"] }),
                );
            }
        }
    }
    capabilities
}
