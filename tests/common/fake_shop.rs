use crate::common::helpers::init_tracing;
use crate::common::test_data::{SESSION_COOKIE_NAME, SESSION_COOKIE_VALUE, TEST_TOKEN};
use demowebshop_e2e::api_client::DemoWebShopApiClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A wiremock server answering the shop's `/register` endpoint.
pub struct FakeShop {
    pub server: MockServer,
    pub api_client: DemoWebShopApiClient,
}

pub fn registration_page_html(token_fields: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html>
        <head><title>Demo Web Shop. Register</title></head>
        <body>
            <div class="header-links"><a href="/register" class="ico-register">Register</a></div>
            <div class="page registration-page">
                <form action="/register" method="post">
                    {token_fields}
                    <div class="gender">
                        <input id="gender-male" name="Gender" type="radio" value="M" />
                        <input id="gender-female" name="Gender" type="radio" value="F" />
                    </div>
                    <input id="FirstName" name="FirstName" type="text" value="" />
                    <input id="LastName" name="LastName" type="text" value="" />
                    <input id="Email" name="Email" type="text" value="" />
                    <input id="Password" name="Password" type="password" />
                    <input id="ConfirmPassword" name="ConfirmPassword" type="password" />
                    <input type="submit" id="register-button" value="Register" />
                </form>
            </div>
        </body>
        </html>"#
    )
}

pub fn token_field(value: &str) -> String {
    format!(r#"<input name="__RequestVerificationToken" type="hidden" value="{value}" />"#)
}

/// Registration page with a single token field and a session cookie.
pub fn registration_page_response() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header(
            "Set-Cookie",
            format!("{SESSION_COOKIE_NAME}={SESSION_COOKIE_VALUE}; path=/; HttpOnly").as_str(),
        )
        .set_body_raw(
            registration_page_html(&token_field(TEST_TOKEN)),
            "text/html; charset=utf-8",
        )
}

/// What the shop answers to an accepted registration.
pub fn registration_accepted_response(auth_cookie_value: &str) -> ResponseTemplate {
    ResponseTemplate::new(302)
        .insert_header("Location", "/registerresult/1")
        .insert_header(
            "Set-Cookie",
            format!("NOPCOMMERCE.AUTH={auth_cookie_value}; path=/; HttpOnly").as_str(),
        )
}

/// The form re-rendered with a validation summary, as for a duplicate email.
pub fn registration_rejected_response(message: &str) -> ResponseTemplate {
    let summary = format!(
        r#"<div class="message-error"><div class="validation-summary-errors"><ul><li>{message}</li></ul></div></div>"#
    );
    ResponseTemplate::new(200).set_body_raw(
        registration_page_html(&format!("{}{}", summary, token_field(TEST_TOKEN))),
        "text/html; charset=utf-8",
    )
}

impl FakeShop {
    pub async fn mount_registration_page(&self, response: ResponseTemplate) {
        Mock::given(path("/register"))
            .and(method("GET"))
            .respond_with(response)
            .named("Registration page")
            .mount(&self.server)
            .await;
    }

    pub async fn post_requests(&self) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|request| request.method.as_str() == "POST")
            .collect()
    }
}

pub async fn spawn_fake_shop() -> FakeShop {
    init_tracing();

    let server = MockServer::start().await;
    let api_client = DemoWebShopApiClient::new(server.uri(), std::time::Duration::from_secs(2))
        .expect("Failed to build the API client.");
    FakeShop { server, api_client }
}
