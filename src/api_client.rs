use crate::configuration::ApiSettings;
use crate::domain::RegistrationForm;
use reqwest::{Client, Response};

pub const REGISTER_PATH: &str = "/register";

/// HTTP session against the shop.
///
/// The client keeps its own cookie jar, so the session cookie handed out with
/// the registration page travels along with the registration post. Redirects
/// are not followed: a successful registration answers with a 302 that has
/// to be observed, not chased.
#[derive(Clone, Debug)]
pub struct DemoWebShopApiClient {
    base_url: String,
    http_client: Client,
}

impl DemoWebShopApiClient {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, reqwest::Error> {
        Self::new(settings.base_url.clone(), settings.timeout())
    }

    #[tracing::instrument(name = "Fetching registration page", skip(self))]
    pub async fn get_registration_page(&self) -> Result<String, reqwest::Error> {
        let url = format!("{}{}", self.base_url, REGISTER_PATH);
        let response = self.http_client.get(&url).send().await?;
        log_response(&response);
        response
            .error_for_status()
            .map_err(|e| {
                tracing::error!("Failed to fetch the registration page: {:?}", e);
                e
            })?
            .text()
            .await
    }

    /// Post the registration form. The status is left to the caller to judge.
    #[tracing::instrument(name = "Posting registration form", skip(self, form))]
    pub async fn post_registration(
        &self,
        form: &RegistrationForm,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, REGISTER_PATH);
        tracing::debug!(
            fields = ?form.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            "Submitting registration form"
        );
        let response = self.http_client.post(&url).form(form).send().await?;
        log_response(&response);
        Ok(response)
    }
}

fn log_response(response: &Response) {
    let cookie_names: Vec<String> = response.cookies().map(|c| c.name().to_owned()).collect();
    tracing::debug!(
        url = %response.url(),
        status = %response.status(),
        set_cookies = ?cookie_names,
        "Received response"
    );
}
